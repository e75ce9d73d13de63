//! Table rendering for the console.

use data_loader::Movie;
use engine::{Recommendation, SearchMatch};
use prettytable::{format, Cell, Row, Table};

fn new_table(titles: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_DEFAULT);
    table.set_titles(Row::new(titles.iter().map(|t| Cell::new(t)).collect()));
    table
}

/// Title | Genres for the first few movies
pub fn preview_table(movies: &[&Movie]) -> Table {
    let mut table = new_table(&["Title", "Genres"]);
    for movie in movies {
        table.add_row(Row::new(vec![
            Cell::new(&movie.title),
            Cell::new(&movie.genres_display()),
        ]));
    }
    table
}

/// Title | Predicted Rating, rank order preserved
pub fn recommendation_table(recommendations: &[Recommendation]) -> Table {
    let mut table = new_table(&["Title", "Predicted Rating"]);
    for rec in recommendations {
        table.add_row(Row::new(vec![
            Cell::new(&rec.title),
            Cell::new(&format!("{:.2}", rec.predicted_rating)),
        ]));
    }
    table
}

/// Title | Year | Match score for fuzzy search results
pub fn search_table(matches: &[SearchMatch]) -> Table {
    let mut table = new_table(&["Title", "Year", "Match"]);
    for m in matches {
        let year = m.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string());
        table.add_row(Row::new(vec![
            Cell::new(&m.title),
            Cell::new(&year),
            Cell::new(&format!("{:.0}", m.score)),
        ]));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_table_formats_two_decimals() {
        let recs = vec![
            Recommendation {
                movie_id: 1,
                title: "Heat (1995)".to_string(),
                predicted_rating: 4.5678,
            },
            Recommendation {
                movie_id: 2,
                title: "Casino (1995)".to_string(),
                predicted_rating: 3.0,
            },
        ];
        let table = recommendation_table(&recs);
        assert_eq!(table.len(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("Predicted Rating"));
        assert!(rendered.contains("4.57"));
        assert!(rendered.contains("3.00"));
        assert!(rendered.find("Heat").unwrap() < rendered.find("Casino").unwrap());
    }

    #[test]
    fn test_preview_table_joins_genres() {
        let movie = Movie {
            id: 1,
            title: "Toy Story (1995)".to_string(),
            year: Some(1995),
            genres: vec!["Adventure".to_string(), "Comedy".to_string()],
        };
        let rendered = preview_table(&[&movie]).to_string();
        assert!(rendered.contains("Adventure|Comedy"));
    }

    #[test]
    fn test_search_table_rows() {
        let matches = vec![
            SearchMatch {
                movie_id: 8,
                title: "Seven (a.k.a. Se7en) (1995)".to_string(),
                year: Some(1995),
                score: 90.0,
            },
            SearchMatch {
                movie_id: 9,
                title: "Untitled".to_string(),
                year: None,
                score: 12.0,
            },
        ];
        let table = search_table(&matches);
        assert_eq!(table.len(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("Year"));
        assert!(rendered.contains("1995"));
        assert!(rendered.contains("90"));
        assert!(rendered.contains(" - "));
    }
}
