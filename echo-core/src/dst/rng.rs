//! `DeterministicRng` - Seeded Random Number Generator
//!
//! `TigerStyle`: ChaCha20-based RNG; all randomness flows through this.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// A deterministic random number generator.
///
/// `TigerStyle`:
/// - Same seed always produces the same sequence
/// - `fork` creates independent derived streams
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    rng: ChaCha20Rng,
    seed: u64,
    fork_counter: u64,
}

impl DeterministicRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The original seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A random float in [0, 1).
    pub fn next_float(&mut self) -> f64 {
        let value = self.rng.gen::<f64>();

        // Postcondition
        assert!((0.0..1.0).contains(&value), "float must be in [0, 1)");
        value
    }

    /// A random u64.
    pub fn next_u64(&mut self) -> u64 {
        self.rng.gen()
    }

    /// A random integer in [min, max] (inclusive).
    ///
    /// # Panics
    /// Panics if min > max.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        // Precondition
        assert!(min <= max, "min ({}) must be <= max ({})", min, max);

        self.rng.gen_range(min..=max)
    }

    /// A random usize in [min, max] (inclusive).
    ///
    /// # Panics
    /// Panics if min > max.
    pub fn next_usize(&mut self, min: usize, max: usize) -> usize {
        // Precondition
        assert!(min <= max, "min ({}) must be <= max ({})", min, max);

        self.rng.gen_range(min..=max)
    }

    /// A random boolean that is true with the given probability.
    ///
    /// # Panics
    /// Panics if probability is not in [0, 1].
    pub fn next_bool(&mut self, probability: f64) -> bool {
        // Precondition
        assert!(
            (0.0..=1.0).contains(&probability),
            "probability must be in [0, 1], got {}",
            probability
        );

        self.next_float() < probability
    }

    /// A random element from a slice.
    ///
    /// # Panics
    /// Panics if the slice is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        // Precondition
        assert!(!items.is_empty(), "cannot choose from empty slice");

        &items[self.next_usize(0, items.len() - 1)]
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_usize(0, i);
            items.swap(i, j);
        }
    }

    /// Cumulative-sum draw over a slice of non-negative weights.
    ///
    /// Returns the index of the chosen weight, or `None` when the slice is
    /// empty or the total weight is not positive. Callers own the
    /// degenerate-input default (the emotion engine falls back to a calm
    /// mood).
    pub fn next_weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().copied().filter(|w| *w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }

        let roll = self.next_float() * total;
        let mut cumulative = 0.0;
        for (index, weight) in weights.iter().enumerate() {
            if *weight <= 0.0 {
                continue;
            }
            cumulative += weight;
            if roll <= cumulative {
                return Some(index);
            }
        }
        // Floating-point slack: the roll can land a hair past the last bucket.
        weights.iter().rposition(|w| *w > 0.0)
    }

    /// An independent fork of this RNG.
    ///
    /// `TigerStyle`: Forks have independent sequences derived from the
    /// parent seed and fork counter.
    pub fn fork(&mut self) -> Self {
        let fork_seed = self.seed.wrapping_add(
            self.fork_counter
                .wrapping_add(1)
                .wrapping_mul(0x9E37_79B9_7F4A_7C15),
        );
        self.fork_counter += 1;
        Self::new(fork_seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = DeterministicRng::new(12345);
        let mut b = DeterministicRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next_float(), b.next_float());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = DeterministicRng::new(1);
        let mut b = DeterministicRng::new(2);
        let differs = (0..10).any(|_| a.next_float() != b.next_float());
        assert!(differs);
    }

    #[test]
    fn test_next_int_bounds() {
        let mut rng = DeterministicRng::new(42);
        for _ in 0..100 {
            let v = rng.next_int(5, 10);
            assert!((5..=10).contains(&v));
        }
    }

    #[test]
    fn test_next_bool_extremes() {
        let mut rng = DeterministicRng::new(42);
        for _ in 0..50 {
            assert!(!rng.next_bool(0.0));
            assert!(rng.next_bool(1.0));
        }
    }

    #[test]
    fn test_weighted_index_empty_is_none() {
        let mut rng = DeterministicRng::new(42);
        assert_eq!(rng.next_weighted_index(&[]), None);
    }

    #[test]
    fn test_weighted_index_zero_total_is_none() {
        let mut rng = DeterministicRng::new(42);
        assert_eq!(rng.next_weighted_index(&[0.0, 0.0, 0.0]), None);
    }

    #[test]
    fn test_weighted_index_single_winner() {
        let mut rng = DeterministicRng::new(42);
        for _ in 0..50 {
            assert_eq!(rng.next_weighted_index(&[0.0, 7.5, 0.0]), Some(1));
        }
    }

    #[test]
    fn test_weighted_index_respects_weights() {
        let mut rng = DeterministicRng::new(42);
        let weights = [1.0, 99.0];
        let mut hits = [0u32; 2];
        for _ in 0..1000 {
            hits[rng.next_weighted_index(&weights).unwrap()] += 1;
        }
        assert!(hits[1] > hits[0], "heavy bucket must dominate: {:?}", hits);
    }

    #[test]
    fn test_weighted_index_skips_negative() {
        let mut rng = DeterministicRng::new(7);
        for _ in 0..50 {
            let picked = rng.next_weighted_index(&[-5.0, 1.0]).unwrap();
            assert_eq!(picked, 1);
        }
    }

    #[test]
    fn test_fork_independence() {
        let mut rng = DeterministicRng::new(42);
        let mut f1 = rng.fork();
        let mut f2 = rng.fork();

        assert_ne!(f1.seed(), f2.seed());

        let s1: Vec<f64> = (0..5).map(|_| f1.next_float()).collect();
        let s2: Vec<f64> = (0..5).map(|_| f2.next_float()).collect();
        assert_ne!(s1, s2);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = DeterministicRng::new(42);
        let mut items = vec![1, 2, 3, 4, 5, 6, 7, 8];
        rng.shuffle(&mut items);
        items.sort_unstable();
        assert_eq!(items, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    #[should_panic(expected = "cannot choose from empty slice")]
    fn test_choose_empty_panics() {
        let mut rng = DeterministicRng::new(42);
        let items: Vec<i32> = vec![];
        rng.choose(&items);
    }
}
