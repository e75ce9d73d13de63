//! Random train/test split.

use crate::error::{EngineError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default share of rows that go to training
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;

/// Send each row to the training side with probability `train_fraction`.
///
/// The two halves partition the input: every row lands on exactly one side
/// and relative order is preserved. Sizes are only approximately
/// `train_fraction` / `1 - train_fraction`. With `seed` set the split is
/// reproducible.
pub fn random_split<T>(rows: Vec<T>, train_fraction: f64, seed: Option<u64>) -> Result<(Vec<T>, Vec<T>)> {
    if !(0.0..=1.0).contains(&train_fraction) {
        return Err(EngineError::InvalidConfig {
            field: "train_fraction".to_string(),
            reason: format!("{} is not within [0, 1]", train_fraction),
        });
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let (train, test): (Vec<T>, Vec<T>) = rows
        .into_iter()
        .partition(|_| rng.random_bool(train_fraction));
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_is_a_partition() {
        let rows: Vec<u32> = (0..1000).collect();
        let (train, test) = random_split(rows, DEFAULT_TRAIN_FRACTION, Some(7)).unwrap();

        assert_eq!(train.len() + test.len(), 1000);
        let mut all: Vec<u32> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..1000).collect::<Vec<_>>());

        // Loose bounds: 0.8 of 1000 with a fixed seed
        assert!(train.len() > 700 && train.len() < 900);
        assert!(train.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = random_split((0..200).collect::<Vec<u32>>(), 0.5, Some(42)).unwrap();
        let b = random_split((0..200).collect::<Vec<u32>>(), 0.5, Some(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_extreme_fractions() {
        let (train, test) = random_split(vec![1, 2, 3], 1.0, None).unwrap();
        assert_eq!((train.len(), test.len()), (3, 0));

        let (train, test) = random_split(vec![1, 2, 3], 0.0, None).unwrap();
        assert_eq!((train.len(), test.len()), (0, 3));

        assert!(random_split(vec![1], 1.5, None).is_err());
    }
}
