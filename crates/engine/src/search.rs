//! Fuzzy movie title search.
//!
//! Scores are on a 0-100 scale. Three similarity views are combined and the
//! best one wins:
//! - whole-string normalized Levenshtein
//! - the same over sorted word tokens, so word order matters less
//! - best-window partial match, so "toy story" finds "Toy Story (1995)"
//!
//! All string metrics come from `strsim`.

use data_loader::{Movie, MovieId};
use rayon::prelude::*;
use strsim::{jaro_winkler, normalized_levenshtein};

/// Partial and token views are discounted so an exact whole-string match
/// always outranks them
const TOKEN_SORT_WEIGHT: f64 = 0.95;
const PARTIAL_WEIGHT: f64 = 0.9;

/// One scored title
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatch {
    pub movie_id: MovieId,
    pub title: String,
    pub year: Option<u16>,
    /// 0 (nothing in common) to 100 (identical after normalization)
    pub score: f64,
}

/// Lowercase, turn punctuation into spaces, collapse whitespace
fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().collect::<Vec<_>>()
            } else {
                vec![' ']
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn token_sort(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Best similarity between `short` and any equally long window of `long`
fn partial_ratio(short: &str, long: &str) -> f64 {
    let short_len = short.chars().count();
    let long_chars: Vec<char> = long.chars().collect();
    if short_len == 0 || long_chars.len() <= short_len {
        return normalized_levenshtein(short, long);
    }

    long_chars
        .windows(short_len)
        .map(|window| {
            let window: String = window.iter().collect();
            // Levenshtein decides, Jaro-Winkler breaks near-ties between windows
            normalized_levenshtein(short, &window) + jaro_winkler(short, &window) * 1e-3
        })
        .fold(0.0, f64::max)
        .min(1.0)
}

/// Similarity between a query and a title, 0-100
pub fn score(query: &str, title: &str) -> f64 {
    let query = normalize(query);
    let title = normalize(title);
    if query.is_empty() || title.is_empty() {
        return 0.0;
    }

    let ratio = normalized_levenshtein(&query, &title);
    let sorted = normalized_levenshtein(&token_sort(&query), &token_sort(&title)) * TOKEN_SORT_WEIGHT;
    let partial = if query.chars().count() < title.chars().count() {
        partial_ratio(&query, &title)
    } else {
        partial_ratio(&title, &query)
    } * PARTIAL_WEIGHT;

    (ratio.max(sorted).max(partial) * 100.0).clamp(0.0, 100.0)
}

/// The `k` best titles for `query`, best first. Ties keep movie order.
pub fn top_matches(query: &str, movies: &[Movie], k: usize) -> Vec<SearchMatch> {
    let mut scored: Vec<SearchMatch> = movies
        .par_iter()
        .map(|movie| SearchMatch {
            movie_id: movie.id,
            title: movie.title.clone(),
            year: movie.year,
            score: score(query, &movie.title),
        })
        .collect();

    // Stable sort so equal scores stay in file order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(k);
    scored
}

/// Resolve a free-text name to the closest title.
///
/// Returns `None` only when there are no movies to search.
pub fn fuzzy_movie_search(query: &str, movies: &[Movie]) -> Option<SearchMatch> {
    top_matches(query, movies, 1).into_iter().next()
}
