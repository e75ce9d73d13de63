//! Times loading both CSV files and reports how the whitelisted genres are
//! spread over the catalogue.
//!
//! Run with: cargo run --release --example benchmark_load -- [RATINGS] [MOVIES]

use data_loader::{DataIndex, DataLoadError, Genre};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> Result<(), DataLoadError> {
    let mut args = env::args().skip(1);
    let ratings_path = PathBuf::from(args.next().unwrap_or_else(|| "data/rating.csv".to_string()));
    let movies_path = PathBuf::from(args.next().unwrap_or_else(|| "data/movie.csv".to_string()));

    println!(
        "Loading {} and {}...",
        ratings_path.display(),
        movies_path.display()
    );

    let start = Instant::now();
    let index = DataIndex::load_from_files(&ratings_path, &movies_path)?;
    let elapsed = start.elapsed();
    let (movies, ratings) = index.counts();

    println!("Loaded {movies} movies and {ratings} ratings in {elapsed:?}");
    println!("Dropped rating rows: {}", index.dropped_ratings());
    println!(
        "Throughput: {:.0} ratings/second",
        ratings as f64 / elapsed.as_secs_f64()
    );

    let mut ratings_per_movie: HashMap<u32, usize> = HashMap::new();
    for rating in index.ratings() {
        *ratings_per_movie.entry(rating.movie_id).or_default() += 1;
    }

    println!("\n{:<10} {:>8} {:>12}", "Genre", "Movies", "Ratings");
    for genre in Genre::ALL {
        let (titles, rated) = index
            .movies()
            .filter(|movie| movie.has_genre(genre))
            .fold((0usize, 0usize), |(titles, rated), movie| {
                (titles + 1, rated + ratings_per_movie.get(&movie.id).copied().unwrap_or(0))
            });
        println!("{:<10} {:>8} {:>12}", genre.label(), titles, rated);
    }

    Ok(())
}
