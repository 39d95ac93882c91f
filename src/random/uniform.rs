//! Uniform bounded integer generation over a seeded source.

use crate::random::source::RandomSource;

/// Size of the raw draw range. Raw draws are the top 63 bits of the
/// source's output, so every draw lies in `[0, RAW_RANGE)`.
const RAW_RANGE: u64 = 1 << 63;

/// Rejection-sampling generator of uniform integers in `[0, n)`.
///
/// Owns its [`RandomSource`]; seeding happens once, at source construction,
/// and nothing here touches process-global state. Draws at or above the
/// largest multiple of `n` within the raw range are discarded, which removes
/// the modulo bias a plain `raw % n` would carry.
///
/// # Examples
///
/// ```
/// use sarah2::random::mersenne_twister::MersenneTwister;
/// use sarah2::random::uniform::UniformRandom;
///
/// let mut rng = UniformRandom::new(MersenneTwister::with_seed(1));
/// let value = rng.next_in_range(27);
/// assert!(value < 27);
/// ```
pub struct UniformRandom<R: RandomSource> {
    source: R,
}

impl<R: RandomSource> UniformRandom<R> {
    /// Creates a new generator over the given seeded source.
    pub fn new(source: R) -> Self {
        UniformRandom { source }
    }

    /// Returns a uniformly distributed integer in `[0, n)`.
    ///
    /// Returns 0 for `n == 0`.
    ///
    /// # Panics
    /// Panics if `n` exceeds the raw draw range of 2^63.
    pub fn next_in_range(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let n = n as u64;
        assert!(n <= RAW_RANGE, "bound exceeds the raw draw range");

        // Largest multiple of n not exceeding the raw range; draws at or
        // above it would skew the modulo reduction.
        let limit = (RAW_RANGE / n) * n;
        loop {
            let raw = self.source.next_u64() >> 1;
            if raw < limit {
                return (raw % n) as usize;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::mersenne_twister::MersenneTwister;

    #[test]
    fn test_next_in_range_bounds() {
        let mut rng = UniformRandom::new(MersenneTwister::with_seed(42));
        for n in [1, 2, 3, 7, 27, 100, 1000] {
            for _ in 0..1000 {
                assert!(rng.next_in_range(n) < n);
            }
        }
    }

    #[test]
    fn test_next_in_range_zero() {
        let mut rng = UniformRandom::new(MersenneTwister::with_seed(42));
        assert_eq!(rng.next_in_range(0), 0);
    }

    #[test]
    fn test_next_in_range_one() {
        let mut rng = UniformRandom::new(MersenneTwister::with_seed(42));
        for _ in 0..100 {
            assert_eq!(rng.next_in_range(1), 0);
        }
    }

    #[test]
    fn test_deterministic_sequence() {
        let mut a = UniformRandom::new(MersenneTwister::with_seed(9));
        let mut b = UniformRandom::new(MersenneTwister::with_seed(9));
        for _ in 0..500 {
            assert_eq!(a.next_in_range(27), b.next_in_range(27));
        }
    }

    #[test]
    fn test_all_values_reachable() {
        let mut rng = UniformRandom::new(MersenneTwister::with_seed(3));
        let mut seen = [false; 27];
        for _ in 0..2000 {
            seen[rng.next_in_range(27)] = true;
        }
        assert!(seen.iter().all(|&hit| hit), "some values in [0,27) never drawn");
    }
}
