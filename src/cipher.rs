//! Sarah2 cipher engine: round-based encrypt/decrypt over a validated key.
//!
//! Each round substitutes every adjacent symbol pair through the key table
//! and then shears the buffer (odd positions first, even positions after).
//! The shear is skipped on the final encryption round, where it would touch
//! no key material; decryption mirrors that by skipping the interleave on
//! its first round and running the inverse substitution through an index
//! built once per call.

use crate::alphabet::{self, PAD_SYMBOL};
use crate::error::Sarah2Error;
use crate::key::SubstitutionKey;
use crate::rounds::Rounds;

/// Returns the ciphertext length for a plaintext of `message_len` symbols.
///
/// Odd-length messages are padded by one symbol before encryption, so the
/// output length is `message_len + 1` if odd and `message_len` otherwise.
///
/// # Examples
///
/// ```
/// use sarah2::output_size;
///
/// assert_eq!(output_size(5), 6);
/// assert_eq!(output_size(4), 4);
/// ```
pub fn output_size(message_len: usize) -> usize {
    if message_len % 2 != 0 {
        message_len + 1
    } else {
        message_len
    }
}

/// Substitution-permutation cipher engine over a 27-symbol alphabet.
///
/// Owns a [`SubstitutionKey`] that passed validation at construction, so
/// every cipher operation runs against a structurally sound table. Both
/// operations take `&self` and the key is never mutated; a single engine
/// may serve any number of concurrent calls.
///
/// # Examples
///
/// ```
/// use sarah2::random::mersenne_twister::MersenneTwister;
/// use sarah2::random::uniform::UniformRandom;
/// use sarah2::{Rounds, Sarah2, SubstitutionKey};
///
/// let mut rng = UniformRandom::new(MersenneTwister::with_seed(7));
/// let key = SubstitutionKey::generate(&mut rng);
/// let cipher = Sarah2::new(key).unwrap();
///
/// let ciphertext = cipher.encrypt(b"attack_at_dawn", Rounds::Maximal).unwrap();
/// let plaintext = cipher.decrypt(&ciphertext, Rounds::Maximal).unwrap();
/// assert_eq!(plaintext, b"attack_at_dawn");
/// ```
pub struct Sarah2 {
    key: SubstitutionKey,
}

impl Sarah2 {
    /// Creates an engine over the given key.
    ///
    /// # Errors
    /// Returns [`Sarah2Error::InvalidKeyStructure`] if the key fails
    /// validation; an engine never operates on an unvalidated table.
    ///
    /// # Examples
    ///
    /// ```
    /// use sarah2::{Sarah2, SubstitutionKey};
    ///
    /// let bogus = SubstitutionKey::from_bytes(&[0u8; sarah2::KEY_SIZE]).unwrap();
    /// assert!(Sarah2::new(bogus).is_err());
    /// ```
    pub fn new(key: SubstitutionKey) -> Result<Self, Sarah2Error> {
        if !key.is_valid() {
            return Err(Sarah2Error::InvalidKeyStructure);
        }
        Ok(Sarah2 { key })
    }

    /// Returns the engine's key.
    pub fn key(&self) -> &SubstitutionKey {
        &self.key
    }

    /// Encrypts `message`, returning a ciphertext of
    /// [`output_size`]`(message.len())` symbols.
    ///
    /// An odd-length message is padded with one [`PAD_SYMBOL`] first. The
    /// round count is resolved from the padded length.
    ///
    /// # Errors
    /// - [`Sarah2Error::DegenerateLength`] if `message` has fewer than 2
    ///   symbols.
    /// - [`Sarah2Error::InvalidSymbol`] if `message` holds a byte outside
    ///   the alphabet.
    /// - [`Sarah2Error::InvalidRoundCount`] for [`Rounds::Custom`]`(0)`.
    pub fn encrypt(&self, message: &[u8], rounds: Rounds) -> Result<Vec<u8>, Sarah2Error> {
        if message.len() < 2 {
            return Err(Sarah2Error::DegenerateLength);
        }

        let mut buf = message.to_vec();
        if buf.len() % 2 != 0 {
            buf.push(PAD_SYMBOL);
        }

        let num_rounds = rounds.resolve(buf.len())?;
        let mut scratch = Vec::with_capacity(buf.len());
        for round in 0..num_rounds {
            self.substitute(&mut buf)?;
            // A shear on the last round touches no key material.
            if round != num_rounds - 1 {
                shear(&mut buf, &mut scratch);
            }
        }
        Ok(buf)
    }

    /// Decrypts `ciphertext`, returning a plaintext of the same length.
    ///
    /// The rounds argument must resolve to the same count used at
    /// encryption time. Padding introduced by [`encrypt`](Self::encrypt)
    /// is not stripped: a trailing [`PAD_SYMBOL`] stays visible so callers
    /// can detect it.
    ///
    /// # Errors
    /// - [`Sarah2Error::DegenerateLength`] if `ciphertext` has fewer than 2
    ///   symbols.
    /// - [`Sarah2Error::OddCiphertextLength`] if its length is odd.
    /// - [`Sarah2Error::InvalidSymbol`] if it holds a byte outside the
    ///   alphabet.
    /// - [`Sarah2Error::InvalidKeyStructure`] if a pair has no preimage in
    ///   the key table.
    /// - [`Sarah2Error::InvalidRoundCount`] for [`Rounds::Custom`]`(0)`.
    pub fn decrypt(&self, ciphertext: &[u8], rounds: Rounds) -> Result<Vec<u8>, Sarah2Error> {
        if ciphertext.len() < 2 {
            return Err(Sarah2Error::DegenerateLength);
        }
        if ciphertext.len() % 2 != 0 {
            return Err(Sarah2Error::OddCiphertextLength);
        }

        let num_rounds = rounds.resolve(ciphertext.len())?;
        let inverse = self.key.inverse()?;

        let mut buf = ciphertext.to_vec();
        let mut scratch = Vec::with_capacity(buf.len());
        for round in 0..num_rounds {
            // Encryption skipped the shear on its last round.
            if round != 0 {
                interleave(&mut buf, &mut scratch);
            }
            for pair in buf.chunks_exact_mut(2) {
                let plain = inverse.lookup(pair[0], pair[1])?;
                pair.copy_from_slice(&plain);
            }
        }
        Ok(buf)
    }

    /// Replaces every adjacent pair with its keyed substitution, in place.
    fn substitute(&self, buf: &mut [u8]) -> Result<(), Sarah2Error> {
        for pair in buf.chunks_exact_mut(2) {
            let row = alphabet::index_of(pair[0])?;
            let col = alphabet::index_of(pair[1])?;
            let (first, second) = self.key.cell(row, col);
            pair[0] = first;
            pair[1] = second;
        }
        Ok(())
    }
}

/// Rewrites the buffer as all symbols at odd 1-based positions followed by
/// all symbols at even 1-based positions, preserving relative order.
fn shear(buf: &mut [u8], scratch: &mut Vec<u8>) {
    scratch.clear();
    scratch.extend(buf.iter().copied().step_by(2));
    scratch.extend(buf.iter().copied().skip(1).step_by(2));
    buf.copy_from_slice(scratch);
}

/// Inverse of [`shear`]: interleaves the buffer's halves, first half onto
/// even 0-based indices, second half onto odd.
fn interleave(buf: &mut [u8], scratch: &mut Vec<u8>) {
    let half = buf.len() / 2;
    scratch.clear();
    for i in 0..half {
        scratch.push(buf[i]);
        scratch.push(buf[half + i]);
    }
    buf.copy_from_slice(scratch);
}
