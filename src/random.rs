//! Random number generation helpers.
//!
//! Provides seeded RNG construction, open-interval uniform draws, and
//! uniform index selection with replacement.
//!
//! # Reproducibility
//!
//! For reproducible runs, use [`create_rng`] with a fixed seed.
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform.

use rand::Rng;

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++) for high performance.
/// The sequence is deterministic for a given seed on the same platform.
///
/// # Examples
/// ```
/// use bootstrap_lab::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Draws a fresh seed from the thread-local entropy source.
///
/// Used when no fixed seed is configured.
pub fn entropy_seed() -> u64 {
    rand::rng().random()
}

/// Draws a uniform value on the open interval `(0, 1)`.
///
/// Exact zeros are redrawn so the result is always safe to pass to `ln`.
///
/// # Examples
/// ```
/// use bootstrap_lab::random::{create_rng, open_unit};
/// let mut rng = create_rng(7);
/// let u = open_unit(&mut rng);
/// assert!(u > 0.0 && u < 1.0);
/// ```
pub fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.random();
        if u != 0.0 {
            return u;
        }
    }
}

/// Returns `count` indices drawn uniformly from `[0, n)` with replacement.
///
/// Each draw is independent, so indices may repeat.
///
/// # Complexity
/// Time: O(count), Space: O(count)
///
/// # Returns
/// - `None` if `n == 0` (there is nothing to choose from).
///
/// # Examples
/// ```
/// use bootstrap_lab::random::{create_rng, indices_with_replacement};
/// let mut rng = create_rng(42);
/// let idx = indices_with_replacement(5, 8, &mut rng).unwrap();
/// assert_eq!(idx.len(), 8);
/// assert!(idx.iter().all(|&i| i < 5));
/// ```
pub fn indices_with_replacement<R: Rng + ?Sized>(
    n: usize,
    count: usize,
    rng: &mut R,
) -> Option<Vec<usize>> {
    if n == 0 {
        return None;
    }
    Some((0..count).map(|_| rng.random_range(0..n)).collect())
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn indices_in_range(
            seed in 0_u64..10000,
            n in 1_usize..200,
            count in 0_usize..200,
        ) {
            let mut rng = create_rng(seed);
            let idx = indices_with_replacement(n, count, &mut rng).unwrap();
            prop_assert_eq!(idx.len(), count);
            prop_assert!(idx.iter().all(|&i| i < n));
        }
    }
}
