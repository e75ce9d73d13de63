//! Interactive prompts.
//!
//! Every numeric question loops until it gets a valid answer; there is no
//! attempt limit. Only end of input breaks out of a loop.

use colored::Colorize;
use data_loader::{Genre, UserId};
use engine::Preferences;
use pipeline::select_genres;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Why an answer was rejected
#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("'{0}' is not a whole number")]
    NotAnInteger(String),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{0} should be a positive integer")]
    NotPositive(&'static str),

    #[error("{0} is too large")]
    TooLarge(&'static str),

    #[error("Rating must be between 1.0 and 5.0")]
    RatingOutOfRange,
}

fn parse_positive(s: &str, what: &'static str) -> Result<u64, InputError> {
    let value: i128 = s
        .parse()
        .map_err(|_| InputError::NotAnInteger(s.to_string()))?;
    if value <= 0 {
        return Err(InputError::NotPositive(what));
    }
    u64::try_from(value).map_err(|_| InputError::TooLarge(what))
}

/// Positive integer that fits a user ID
pub fn parse_user_id(s: &str) -> Result<UserId, InputError> {
    let value = parse_positive(s, "User ID")?;
    UserId::try_from(value).map_err(|_| InputError::TooLarge("User ID"))
}

/// Positive integer count of recommendations
pub fn parse_count(s: &str) -> Result<usize, InputError> {
    let value = parse_positive(s, "Number of recommendations")?;
    usize::try_from(value).map_err(|_| InputError::TooLarge("Number of recommendations"))
}

/// Float in [1.0, 5.0]; NaN and infinities are rejected by the range check
pub fn parse_min_rating(s: &str) -> Result<f32, InputError> {
    let value: f32 = s.parse().map_err(|_| InputError::NotANumber(s.to_string()))?;
    if !(1.0..=5.0).contains(&value) {
        return Err(InputError::RatingOutOfRange);
    }
    Ok(value)
}

/// Reads answers from `input` and writes questions to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask once and return the raw line without its line ending.
    ///
    /// End of input is reported as `UnexpectedEof`.
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before all questions were answered",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask until `parse` accepts the trimmed answer
    pub fn ask_until<T, F>(&mut self, question: &str, parse: F) -> io::Result<T>
    where
        F: Fn(&str) -> Result<T, InputError>,
    {
        loop {
            let answer = self.ask(question)?;
            match parse(answer.trim()) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!("Rejected answer {:?}: {}", answer, e);
                    writeln!(
                        self.output,
                        "{}",
                        format!("Invalid input: {}. Please try again.", e).red()
                    )?;
                }
            }
        }
    }

    /// Run the whole questionnaire
    pub fn collect_preferences(&mut self) -> io::Result<Preferences> {
        writeln!(self.output, "{}", "Welcome to the Movie Recommender System!".bold().green())?;

        let user_id = self.ask_until("\nEnter your User ID (numeric value): ", parse_user_id)?;
        let count = self.ask_until(
            "How many movie recommendations would you like? (e.g., 5, 10): ",
            parse_count,
        )?;

        let labels: Vec<&str> = Genre::ALL.iter().map(|g| g.label()).collect();
        writeln!(self.output, "\nAvailable genres: {}", labels.join(", "))?;
        let genres = select_genres(&self.ask("Enter your preferred genres (comma-separated): ")?);

        let min_rating = self.ask_until(
            "Enter your preferred minimum rating (between 1.0 and 5.0): ",
            parse_min_rating,
        )?;

        let movie_name = self.ask("Enter a movie name you like (optional, leave blank to skip): ")?;
        let movie_name = Some(movie_name.trim().to_string()).filter(|name| !name.is_empty());

        Ok(Preferences {
            user_id,
            count,
            genres,
            min_rating: Some(min_rating),
            movie_name,
        })
    }

    /// Give back the writer to inspect the transcript
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        colored::control::set_override(false);
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_user_id_rejects_bad_input() {
        for bad in ["abc", "", "0", "-3", "1.5", "4294967296", "99999999999999999999999999999999999999999"] {
            assert!(parse_user_id(bad).is_err(), "accepted {bad:?}");
        }
        assert_eq!(parse_user_id("42"), Ok(42));
        assert_eq!(parse_user_id("-1"), Err(InputError::NotPositive("User ID")));
    }

    #[test]
    fn test_count_rejects_non_positive() {
        assert_eq!(parse_count("0"), Err(InputError::NotPositive("Number of recommendations")));
        assert_eq!(parse_count("10"), Ok(10));
    }

    #[test]
    fn test_min_rating_range() {
        for bad in ["0.99", "5.01", "-1", "NaN", "inf", "five", ""] {
            assert!(parse_min_rating(bad).is_err(), "accepted {bad:?}");
        }
        assert_eq!(parse_min_rating("1.0"), Ok(1.0));
        assert_eq!(parse_min_rating("5"), Ok(5.0));
        assert_eq!(parse_min_rating("3.5"), Ok(3.5));
    }

    #[test]
    fn test_ask_until_reprompts() {
        let mut p = prompter("abc\n-5\n0\n7\n");
        let id = p.ask_until("id? ", parse_user_id).unwrap();
        assert_eq!(id, 7);

        let transcript = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(transcript.matches("id? ").count(), 4);
        assert_eq!(transcript.matches("Please try again.").count(), 3);
    }

    #[test]
    fn test_eof_ends_the_loop() {
        let mut p = prompter("nope\n");
        let err = p.ask_until("id? ", parse_user_id).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_collect_preferences() {
        let mut p = prompter("x\n12\n0\n5\nSci-Fi, Western, Action\n6\n4.5\n  Toy Story \n");
        let prefs = p.collect_preferences().unwrap();

        assert_eq!(
            prefs,
            Preferences {
                user_id: 12,
                count: 5,
                genres: vec![Genre::SciFi, Genre::Action],
                min_rating: Some(4.5),
                movie_name: Some("Toy Story".to_string()),
            }
        );
    }

    #[test]
    fn test_blank_movie_name_is_skipped() {
        let mut p = prompter("1\n10\n\n3\n\n");
        let prefs = p.collect_preferences().unwrap();

        assert!(prefs.genres.is_empty());
        assert_eq!(prefs.movie_name, None);
    }
}
