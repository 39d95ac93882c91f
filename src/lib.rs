//! sarah2 substitution-permutation network cipher.
//!
//! sarah2 is a classical cipher over a 27-symbol alphabet (the lowercase
//! letters plus `_` as pad), applying a randomly generated keyed
//! substitution table and a fixed shear permutation over a configurable
//! number of rounds. It is an educational cipher demonstrating SPN
//! structure and is NOT cryptographically secure; do not protect real
//! secrets with it.
//!
//! This crate is compatible with the reference implementation: keys
//! serialize to the same 1458-symbol layout and the cipher reproduces the
//! published test vectors.
//!
//! # Architecture
//!
//! ```text
//! alphabet        (fixed 27-symbol set — symbol↔index mapping)
//!     ↕
//! random          (seeded MT19937-64 behind RandomSource, rejection-sampled
//!                  into uniform draws by UniformRandom)
//!     ↕
//! SubstitutionKey (27×27 table of ciphertext pairs — generation,
//!                  validation, persistence)
//!     ↕
//! Sarah2          (engine — per-round pair substitution + shear, driven by
//!                  a Rounds profile)
//! ```
//!
//! # Examples
//!
//! Generate a key, encrypt, and decrypt:
//!
//! ```
//! use sarah2::random::mersenne_twister::MersenneTwister;
//! use sarah2::random::uniform::UniformRandom;
//! use sarah2::{Rounds, Sarah2, SubstitutionKey};
//!
//! let mut rng = UniformRandom::new(MersenneTwister::with_seed(2024));
//! let key = SubstitutionKey::generate(&mut rng);
//! let cipher = Sarah2::new(key).unwrap();
//!
//! let ciphertext = cipher.encrypt(b"attack_at_dawn", Rounds::Maximal).unwrap();
//! let plaintext = cipher.decrypt(&ciphertext, Rounds::Maximal).unwrap();
//! assert_eq!(plaintext, b"attack_at_dawn");
//! ```
//!
//! Odd-length messages are padded with `_`, and the pad stays visible
//! after decryption:
//!
//! ```
//! use sarah2::random::mersenne_twister::MersenneTwister;
//! use sarah2::random::uniform::UniformRandom;
//! use sarah2::{output_size, Rounds, Sarah2, SubstitutionKey};
//!
//! let mut rng = UniformRandom::new(MersenneTwister::with_seed(2024));
//! let cipher = Sarah2::new(SubstitutionKey::generate(&mut rng)).unwrap();
//!
//! let ciphertext = cipher.encrypt(b"oddly", Rounds::Medium).unwrap();
//! assert_eq!(ciphertext.len(), output_size(5));
//!
//! let plaintext = cipher.decrypt(&ciphertext, Rounds::Medium).unwrap();
//! assert_eq!(plaintext, b"oddly_");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod error;
pub mod random;

mod cipher;
mod key;
mod rounds;

pub use cipher::{output_size, Sarah2};
pub use key::{SubstitutionKey, KEY_SIZE};
pub use rounds::Rounds;
