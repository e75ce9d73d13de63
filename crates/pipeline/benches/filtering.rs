//! Benchmarks for the join and filters
//!
//! Run with: cargo bench --package pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{DataIndex, Genre, Movie, Rating};
use pipeline::{filter_by_genre_and_rating, join_ratings};

const GENRES: [&str; 6] = ["Action", "Comedy", "Drama", "Sci-Fi", "Horror", "Western"];

fn synthetic_index(users: u32, movies: u32) -> DataIndex {
    let mut index = DataIndex::new();
    for id in 1..=movies {
        index.insert_movie(Movie {
            id,
            title: format!("Movie {id} (2000)"),
            year: Some(2000),
            genres: vec![
                GENRES[id as usize % GENRES.len()].to_string(),
                GENRES[(id as usize / 3) % GENRES.len()].to_string(),
            ],
        });
    }
    for user_id in 1..=users {
        for movie_id in (user_id % 7 + 1..=movies).step_by(7) {
            index.insert_rating(Rating {
                user_id,
                movie_id,
                rating: ((user_id * movie_id) % 9 + 2) as f32 / 2.0,
                timestamp: 0,
            });
        }
    }
    index
}

fn bench_join(c: &mut Criterion) {
    let index = synthetic_index(2000, 1000);

    c.bench_function("join_ratings", |b| {
        b.iter(|| black_box(join_ratings(black_box(&index), |_| true)))
    });

    c.bench_function("join_ratings_single_genre", |b| {
        b.iter(|| black_box(join_ratings(black_box(&index), |m| m.has_genre(Genre::Horror))))
    });
}

fn bench_filter(c: &mut Criterion) {
    let index = synthetic_index(2000, 1000);
    let genres = [Genre::Action, Genre::SciFi];

    c.bench_function("filter_by_genre_and_rating", |b| {
        b.iter(|| {
            let filtered = filter_by_genre_and_rating(&index, black_box(&genres), Some(3.5)).unwrap();
            black_box(filtered)
        })
    });
}

criterion_group!(benches, bench_join, bench_filter);
criterion_main!(benches);
