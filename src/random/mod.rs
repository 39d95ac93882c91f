//! Random number generation subsystem for key generation.
//!
//! Provides a seeded, instance-owned pseudorandom source behind the
//! [`RandomSource`](source::RandomSource) trait, and the rejection-sampling
//! [`UniformRandom`](uniform::UniformRandom) wrapper that key generation
//! draws bounded integers from.

pub mod mersenne_twister;
pub mod source;
pub mod uniform;
