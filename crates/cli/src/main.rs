mod display;
mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use data_loader::DataIndex;
use engine::{persist, AlsConfig, Outcome, RecommenderSession, SessionConfig};
use prompt::Prompter;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// ReelRecs - ALS movie recommender demo
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Interactive movie recommendations with ALS matrix factorization", long_about = None)]
struct Cli {
    /// Ratings CSV (userId,movieId,rating,timestamp)
    #[arg(long, default_value = "data/rating.csv")]
    ratings: PathBuf,

    /// Movies CSV (movieId,title,genres)
    #[arg(long, default_value = "data/movie.csv")]
    movies: PathBuf,

    /// Directory the trained model is written to (replaced on every run)
    #[arg(long, default_value = "movie_recommender_model")]
    model_dir: PathBuf,

    /// Number of latent factors
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    factors: u32,

    /// ALS iterations
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    iterations: u32,

    /// ALS regularization strength
    #[arg(long, default_value = "0.1")]
    regularization: f32,

    /// Share of filtered ratings used for training, the rest is for evaluation
    #[arg(long, default_value = "0.8", value_parser = parse_fraction)]
    train_fraction: f64,

    /// Seed for the train/test split (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            als: AlsConfig {
                factors: self.factors,
                iterations: self.iterations,
                regularization: self.regularization,
            },
            train_fraction: self.train_fraction,
            seed: self.seed,
        }
    }
}

fn parse_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!("{value} is not strictly between 0 and 1"))
    }
}

fn main() -> Result<()> {
    // Warn by default so log lines don't interleave with the prompts
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    println!("{}", "\nLoading datasets...".bold().blue());
    let start = Instant::now();
    let data_index = Arc::new(
        DataIndex::load_from_files(&cli.ratings, &cli.movies)
            .context("Failed to load ratings/movies dataset")?,
    );
    let (movies, ratings) = data_index.counts();
    println!(
        "{} Loaded {} movies and {} ratings in {:?}",
        "✓".green(),
        movies,
        ratings,
        start.elapsed()
    );

    println!("{}", "\nPreview of available movie genres:".bold().blue());
    display::preview_table(&data_index.preview(5)).printstd();

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let prefs = prompter
        .collect_preferences()
        .context("Failed to read preferences")?;

    println!("{}", "\nPlease wait for a moment...".bold().yellow());
    let session = RecommenderSession::new(data_index, cli.session_config());
    let report = session.run(&prefs).context("Recommendation run failed")?;

    println!(
        "\nModel evaluation completed. RMSE = {:.4}\n",
        report.evaluation.rmse
    );

    print_outcome(&mut io::stdout(), &report.outcome, prefs.user_id, prefs.count)
        .context("Failed to print results")?;

    persist::save_model(&report.model, &report.evaluation, &cli.model_dir)
        .with_context(|| format!("Failed to save model to {}", cli.model_dir.display()))?;

    println!("{}", "\nThank you for using the Movie Recommender System!".bold().green());
    Ok(())
}

/// Write either the search results or the recommendation table
fn print_outcome<W: Write>(out: &mut W, outcome: &Outcome, user_id: u32, count: usize) -> io::Result<()> {
    match outcome {
        Outcome::Search { query, matches } => match matches.first() {
            Some(best) => {
                writeln!(out, "\nBest match for '{}' is '{}'.", query, best.title)?;
                write!(out, "{}", display::search_table(matches))?;
            }
            None => writeln!(out, "\nNo close matches found for '{}'.", query)?,
        },
        Outcome::Recommendations(recommendations) => {
            writeln!(
                out,
                "{}",
                format!("\nTop {} recommendations for User {}:", count, user_id)
                    .bold()
                    .green()
            )?;
            if recommendations.is_empty() {
                writeln!(
                    out,
                    "{}",
                    format!("User {} has no ratings in the training data for these filters.", user_id)
                        .yellow()
                )?;
            }
            write!(out, "{}", display::recommendation_table(recommendations))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{Recommendation, SearchMatch};

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["reel-recs"]).unwrap();
        assert_eq!(cli.ratings, PathBuf::from("data/rating.csv"));
        assert_eq!(cli.model_dir, PathBuf::from("movie_recommender_model"));

        let config = cli.session_config();
        assert_eq!(config.als, AlsConfig::default());
        assert_eq!(config.train_fraction, 0.8);
        assert_eq!(config.seed, None);
    }

    fn render(outcome: &Outcome) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        print_outcome(&mut out, outcome, 7, 3).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_print_search_outcome() {
        let outcome = Outcome::Search {
            query: "heat".to_string(),
            matches: vec![SearchMatch {
                movie_id: 6,
                title: "Heat (1995)".to_string(),
                year: Some(1995),
                score: 88.0,
            }],
        };
        let transcript = render(&outcome);
        assert!(transcript.contains("Best match for 'heat' is 'Heat (1995)'."));
        assert!(transcript.contains("Match"));
        assert!(!transcript.contains("recommendations"));
    }

    #[test]
    fn test_print_search_without_matches() {
        let outcome = Outcome::Search {
            query: "zzz".to_string(),
            matches: vec![],
        };
        let transcript = render(&outcome);
        assert_eq!(transcript, "\nNo close matches found for 'zzz'.\n");
    }

    #[test]
    fn test_print_recommendations() {
        let outcome = Outcome::Recommendations(vec![Recommendation {
            movie_id: 6,
            title: "Heat (1995)".to_string(),
            predicted_rating: 4.256,
        }]);
        let transcript = render(&outcome);
        assert!(transcript.contains("Top 3 recommendations for User 7:"));
        assert!(transcript.contains("4.26"));
        assert!(!transcript.contains("no ratings"));
    }

    #[test]
    fn test_print_empty_recommendations_adds_note() {
        let transcript = render(&Outcome::Recommendations(vec![]));
        assert!(transcript.contains("Top 3 recommendations for User 7:"));
        assert!(transcript.contains("User 7 has no ratings in the training data"));
    }

    #[test]
    fn test_cli_rejects_bad_values() {
        assert!(Cli::try_parse_from(["reel-recs", "--train-fraction", "1.5"]).is_err());
        assert!(Cli::try_parse_from(["reel-recs", "--iterations", "0"]).is_err());
        assert!(Cli::try_parse_from(["reel-recs", "--seed", "7", "--factors", "4"]).is_ok());
    }
}
