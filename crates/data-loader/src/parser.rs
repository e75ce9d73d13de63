//! Parser for the ratings and movies CSV files.
//!
//! - rating.csv: userId,movieId,rating,timestamp
//! - movie.csv: movieId,title,genres
//!
//! Columns are located by header name, so extra or reordered columns are fine.
//! Rating rows with an empty or absent cell in any of the four columns are dropped;
//! anything else that fails to parse is an error.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fmt::Display;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Ratings parsed from disk plus how many rows were discarded
#[derive(Debug, Default)]
pub struct ParsedRatings {
    pub ratings: Vec<Rating>,
    /// Rows skipped because a required cell was empty
    pub dropped: usize,
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            DataLoadError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            DataLoadError::IoError(e)
        }
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Find the position of every requested column in the header row
fn column_positions<const N: usize>(
    headers: &StringRecord,
    columns: [&str; N],
    file: &str,
) -> Result<[usize; N]> {
    let mut positions = [0; N];
    for (slot, column) in positions.iter_mut().zip(columns) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DataLoadError::MissingColumn {
                file: file.to_string(),
                column: column.to_string(),
            })?;
    }
    Ok(positions)
}

fn parse_field<T>(value: &str, column: &str, file: &str, line: u64) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Invalid {}: {} ({})", column, value, e),
    })
}

/// Accepts either Unix seconds or `YYYY-MM-DD HH:MM:SS` (read as UTC)
fn parse_timestamp(value: &str, file: &str, line: u64) -> Result<i64> {
    if let Ok(secs) = value.parse::<i64>() {
        return Ok(secs);
    }
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line,
            reason: format!("Invalid timestamp: {} ({})", value, e),
        })
}

/// Parse the ratings CSV file
pub fn parse_ratings(path: &Path) -> Result<ParsedRatings> {
    parse_ratings_from_reader(open(path)?, &file_label(path))
}

/// Parse ratings from any reader; `file` is only used in error messages
pub fn parse_ratings_from_reader<R: Read>(reader: R, file: &str) -> Result<ParsedRatings> {
    let csv_err = |source: csv::Error| DataLoadError::CsvError {
        file: file.to_string(),
        source,
    };
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let [user_idx, movie_idx, rating_idx, ts_idx] = column_positions(
        &headers,
        ["userId", "movieId", "rating", "timestamp"],
        file,
    )?;

    let mut parsed = ParsedRatings::default();
    for result in rdr.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let cells = [user_idx, movie_idx, rating_idx, ts_idx].map(|i| record.get(i).unwrap_or(""));
        if cells.iter().any(|cell| cell.is_empty()) {
            debug!("Dropping {} line {}: missing value", file, line);
            parsed.dropped += 1;
            continue;
        }
        let [user_id, movie_id, rating, timestamp] = cells;

        parsed.ratings.push(Rating {
            user_id: parse_field(user_id, "userId", file, line)?,
            movie_id: parse_field(movie_id, "movieId", file, line)?,
            rating: parse_field(rating, "rating", file, line)?,
            timestamp: parse_timestamp(timestamp, file, line)?,
        });
    }
    Ok(parsed)
}

/// Parse the movies CSV file
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    parse_movies_from_reader(open(path)?, &file_label(path))
}

/// Parse movies from any reader; `file` is only used in error messages
pub fn parse_movies_from_reader<R: Read>(reader: R, file: &str) -> Result<Vec<Movie>> {
    let csv_err = |source: csv::Error| DataLoadError::CsvError {
        file: file.to_string(),
        source,
    };
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let [id_idx, title_idx, genres_idx] =
        column_positions(&headers, ["movieId", "title", "genres"], file)?;

    let mut movies = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let title = record.get(title_idx).unwrap_or("");
        movies.push(Movie {
            id: parse_field(record.get(id_idx).unwrap_or(""), "movieId", file, line)?,
            title: title.to_string(),
            year: extract_year_from_title(title),
            genres: parse_genres(record.get(genres_idx).unwrap_or("")),
        });
    }
    Ok(movies)
}

/// Extract year from movie title
///
/// Example: "Toy Story (1995)" -> Some(1995)
///          "Movie Title" -> None
fn extract_year_from_title(title: &str) -> Option<u16> {
    let start = title.rfind('(')?;
    let end = title.rfind(')')?;
    if start < end {
        let year_str = &title[start + 1..end];
        if year_str.len() == 4 {
            return year_str.parse::<u16>().ok();
        }
    }
    None
}

/// Split the genre column on pipes or commas
///
/// Example: "Action|Adventure|Sci-Fi" -> ["Action", "Adventure", "Sci-Fi"]
fn parse_genres(s: &str) -> Vec<String> {
    s.split(['|', ','])
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year_from_title("Toy Story (1995)"), Some(1995));
        assert_eq!(extract_year_from_title("Movie Title"), None);
        assert_eq!(extract_year_from_title("Seven (a.k.a. Se7en) (1995)"), Some(1995));
        assert_eq!(extract_year_from_title("Babylon 5 (TV)"), None);
    }

    #[test]
    fn test_parse_genres_pipe_and_comma() {
        assert_eq!(parse_genres("Action|Adventure|Sci-Fi"), vec!["Action", "Adventure", "Sci-Fi"]);
        assert_eq!(parse_genres("Comedy, Romance"), vec!["Comedy", "Romance"]);
        assert!(parse_genres("").is_empty());
    }

    #[test]
    fn test_parse_ratings_drops_missing_values() {
        let data = "userId,movieId,rating,timestamp\n\
                    1,2,3.5,1112486027\n\
                    1,,4.0,1112484676\n\
                    2,29,,1112484819\n\
                    3,32,5.0,2005-04-02 23:53:47\n";
        let parsed = parse_ratings_from_reader(data.as_bytes(), "rating.csv").unwrap();

        assert_eq!(parsed.ratings.len(), 2);
        assert_eq!(parsed.dropped, 2);
        assert_eq!(parsed.ratings[0].movie_id, 2);
        assert_eq!(parsed.ratings[1].timestamp, 1112486027);
    }

    #[test]
    fn test_parse_ratings_reports_bad_cell() {
        let data = "userId,movieId,rating,timestamp\n1,abc,3.5,1112486027\n";
        let err = parse_ratings_from_reader(data.as_bytes(), "rating.csv").unwrap_err();

        match err {
            DataLoadError::ParseError { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("movieId"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_column() {
        let data = "userId,movieId,score\n1,2,3.0\n";
        let err = parse_ratings_from_reader(data.as_bytes(), "rating.csv").unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn { ref column, .. } if column == "rating"));
    }

    #[test]
    fn test_parse_movies_with_quoted_title() {
        let data = "movieId,title,genres\n\
                    1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy\n\
                    11,\"American President, The (1995)\",Comedy|Drama|Romance\n";
        let movies = parse_movies_from_reader(data.as_bytes(), "movie.csv").unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[1].title, "American President, The (1995)");
        assert_eq!(movies[1].year, Some(1995));
        assert_eq!(movies[1].genres, vec!["Comedy", "Drama", "Romance"]);
    }
}
