//! RandomSource trait for seeded raw-value generators.
//!
//! Defines the interface between the key generator and the underlying
//! pseudorandom source. Implementations must produce a deterministic
//! sequence for a fixed seed so that key generation is reproducible in
//! tests.

/// Trait for seeded generators of raw 64-bit pseudorandom values.
///
/// Consumed by [`UniformRandom`](crate::random::uniform::UniformRandom),
/// which turns raw draws into uniformly distributed bounded integers.
/// Implementations own their state; two instances seeded identically must
/// produce identical sequences.
pub trait RandomSource {
    /// Returns the next raw 64-bit pseudorandom value.
    fn next_u64(&mut self) -> u64;
}
