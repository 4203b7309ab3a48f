//! Uniform sampling of eligible keys without replacement.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Builds the run's RNG: fixed when `seed` is given, OS-seeded otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Draws `min(n, keys.len())` distinct keys uniformly at random.
///
/// Runs a Fisher-Yates shuffle over the first `n` positions, which leaves
/// a uniformly chosen ordered subset at the front.
pub fn sample_keys<R: Rng + ?Sized>(mut keys: Vec<String>, n: usize, rng: &mut R) -> Vec<String> {
    let len = keys.len();
    let take = n.min(len);
    for i in 0..take {
        let j = rng.random_range(i..len);
        keys.swap(i, j);
    }
    keys.truncate(take);
    keys
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn keys(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_sample_distinct_subset() {
        let input = keys(&["1", "2", "3", "4", "5"]);
        let pool: BTreeSet<String> = input.iter().cloned().collect();
        for seed in 0..50 {
            let sample = sample_keys(input.clone(), 3, &mut seeded_rng(Some(seed)));
            assert_eq!(sample.len(), 3);
            let unique: BTreeSet<String> = sample.iter().cloned().collect();
            assert_eq!(unique.len(), 3);
            assert!(unique.is_subset(&pool));
        }
    }

    #[test]
    fn test_sample_larger_than_pool_returns_all() {
        let input = keys(&["a", "b", "c"]);
        let mut sample = sample_keys(input.clone(), 10, &mut seeded_rng(Some(7)));
        sample.sort();
        assert_eq!(sample, input);
    }

    #[test]
    fn test_sample_zero() {
        let sample = sample_keys(keys(&["a", "b"]), 0, &mut seeded_rng(Some(1)));
        assert!(sample.is_empty());
    }

    #[test]
    fn test_sample_empty_pool() {
        let sample = sample_keys(Vec::new(), 5, &mut seeded_rng(None));
        assert!(sample.is_empty());
    }

    #[test]
    fn test_same_seed_same_sample() {
        let input = keys(&["1", "2", "3", "4", "5", "6", "7", "8"]);
        let first = sample_keys(input.clone(), 4, &mut seeded_rng(Some(42)));
        let second = sample_keys(input, 4, &mut seeded_rng(Some(42)));
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_key_can_be_drawn() {
        let input = keys(&["1", "2", "3", "4"]);
        let mut rng = seeded_rng(Some(3));
        let mut seen = BTreeSet::new();
        for _ in 0..200 {
            seen.extend(sample_keys(input.clone(), 1, &mut rng));
        }
        assert_eq!(seen.len(), 4);
    }
}
