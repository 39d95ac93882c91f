//! Keyed substitution table: generation, validation, persistence, rendering.
//!
//! A key is a 27×27 table holding one ciphertext symbol pair per cell; the
//! cell at (row, col) is the substitution for the plaintext pair
//! (`SYMBOLS[row]`, `SYMBOLS[col]`). Storage is a flat 1458-byte buffer in
//! row-major cell order, two bytes per cell, which is also the persisted
//! wire form.

use std::fmt;

use crate::alphabet::{self, NUM_SYMBOLS};
use crate::error::Sarah2Error;
use crate::random::source::RandomSource;
use crate::random::uniform::UniformRandom;

/// Size of a serialized key in bytes: 27 × 27 cells × 2 symbols.
pub const KEY_SIZE: usize = NUM_SYMBOLS * NUM_SYMBOLS * 2;

/// Byte offset of the first symbol of cell (row, col) in the flat table.
const fn cell_offset(row: usize, col: usize) -> usize {
    2 * (col + row * NUM_SYMBOLS)
}

/// A 27×27 substitution table mapping plaintext symbol pairs to ciphertext
/// symbol pairs.
///
/// Immutable once constructed; cipher operations only read it, so one key
/// may back any number of concurrent encrypt/decrypt calls.
#[derive(Clone)]
pub struct SubstitutionKey {
    table: [u8; KEY_SIZE],
}

impl SubstitutionKey {
    /// Generates a fresh key from the given bounded-integer generator.
    ///
    /// The table starts as the identity mapping — cell (r, c) holding
    /// (`SYMBOLS[r]`, `SYMBOLS[c]`) — and every cell in row-major order is
    /// then swapped with the cell at the drawn coordinates. Because only
    /// whole pairs move, the result is always a permutation of the 729
    /// distinct pairs, and [`is_valid`](Self::is_valid) holds by
    /// construction.
    ///
    /// # Parameters
    /// - `rng`: Seeded generator the 1458 coordinate draws come from. The
    ///   same seed reproduces the same key.
    ///
    /// # Examples
    ///
    /// ```
    /// use sarah2::random::mersenne_twister::MersenneTwister;
    /// use sarah2::random::uniform::UniformRandom;
    /// use sarah2::SubstitutionKey;
    ///
    /// let mut rng = UniformRandom::new(MersenneTwister::with_seed(11));
    /// let key = SubstitutionKey::generate(&mut rng);
    /// assert!(key.is_valid());
    /// ```
    pub fn generate<R: RandomSource>(rng: &mut UniformRandom<R>) -> Self {
        let mut table = [0u8; KEY_SIZE];

        // Identity mapping.
        for row in 0..NUM_SYMBOLS {
            for col in 0..NUM_SYMBOLS {
                let offset = cell_offset(row, col);
                table[offset] = alphabet::symbol_at(row);
                table[offset + 1] = alphabet::symbol_at(col);
            }
        }

        // Randomize pair positions. The swap target uses the drawn
        // coordinates in transposed order, (y, x); the persisted key format
        // depends on this exact order.
        for row in 0..NUM_SYMBOLS {
            for col in 0..NUM_SYMBOLS {
                let x = rng.next_in_range(NUM_SYMBOLS);
                let y = rng.next_in_range(NUM_SYMBOLS);
                let a = cell_offset(row, col);
                let b = cell_offset(y, x);
                table.swap(a, b);
                table.swap(a + 1, b + 1);
            }
        }

        SubstitutionKey { table }
    }

    /// Loads a key from its serialized form: exactly [`KEY_SIZE`] symbols in
    /// row-major cell order, two per cell.
    ///
    /// Only the length is checked here; content validity stays a separate
    /// query so an untrusted buffer can be loaded and then interrogated with
    /// [`is_valid`](Self::is_valid).
    ///
    /// # Errors
    /// Returns [`Sarah2Error::InvalidKeyStructure`] if `bytes` is not
    /// exactly [`KEY_SIZE`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Sarah2Error> {
        let table: [u8; KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| Sarah2Error::InvalidKeyStructure)?;
        Ok(SubstitutionKey { table })
    }

    /// Returns the serialized form of the key.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.table
    }

    /// Returns the ciphertext pair stored at cell (row, col).
    ///
    /// # Panics
    /// Panics if `row` or `col` is 27 or more.
    pub fn cell(&self, row: usize, col: usize) -> (u8, u8) {
        assert!(row < NUM_SYMBOLS && col < NUM_SYMBOLS);
        let offset = cell_offset(row, col);
        (self.table[offset], self.table[offset + 1])
    }

    /// Checks the structural validity of the table.
    ///
    /// Every symbol must be an alphabet member and must appear exactly 27
    /// times in the first slot and 27 times in the second slot across the
    /// whole table. This marginal-count check is necessary but not
    /// sufficient for the table to be a bijection on all 729 pairs; it
    /// accepts exactly the keys the reference implementation accepts.
    ///
    /// Never fails: any structural problem, including garbage bytes, yields
    /// `false`.
    pub fn is_valid(&self) -> bool {
        let mut first_counts = [0usize; NUM_SYMBOLS];
        let mut second_counts = [0usize; NUM_SYMBOLS];

        for pair in self.table.chunks_exact(2) {
            let first = match alphabet::index_of(pair[0]) {
                Ok(index) => index,
                Err(_) => return false,
            };
            first_counts[first] += 1;
            if first_counts[first] > NUM_SYMBOLS {
                return false;
            }

            let second = match alphabet::index_of(pair[1]) {
                Ok(index) => index,
                Err(_) => return false,
            };
            second_counts[second] += 1;
            if second_counts[second] > NUM_SYMBOLS {
                return false;
            }
        }

        first_counts.iter().all(|&count| count == NUM_SYMBOLS)
            && second_counts.iter().all(|&count| count == NUM_SYMBOLS)
    }

    /// Builds the ciphertext-pair → plaintext-pair index used by decrypt.
    ///
    /// Cells are visited in row-major order and the first cell storing a
    /// given ciphertext pair wins, matching what a naive forward scan of the
    /// table would find.
    ///
    /// # Errors
    /// Returns [`Sarah2Error::InvalidSymbol`] if the table holds a byte
    /// outside the alphabet.
    pub(crate) fn inverse(&self) -> Result<InverseTable, Sarah2Error> {
        let mut pairs = [None; NUM_SYMBOLS * NUM_SYMBOLS];

        for row in 0..NUM_SYMBOLS {
            for col in 0..NUM_SYMBOLS {
                let (first, second) = self.cell(row, col);
                let slot =
                    alphabet::index_of(first)? * NUM_SYMBOLS + alphabet::index_of(second)?;
                if pairs[slot].is_none() {
                    pairs[slot] = Some([alphabet::symbol_at(row), alphabet::symbol_at(col)]);
                }
            }
        }

        Ok(InverseTable { pairs })
    }
}

impl fmt::Display for SubstitutionKey {
    /// Renders the key as a 27-line grid of space-separated symbol pairs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..NUM_SYMBOLS {
            for col in 0..NUM_SYMBOLS {
                if col > 0 {
                    write!(f, " ")?;
                }
                let (first, second) = self.cell(row, col);
                write!(f, "{}{}", first as char, second as char)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Ciphertext-pair → plaintext-pair index, built once per decrypt call.
pub(crate) struct InverseTable {
    pairs: [Option<[u8; 2]>; NUM_SYMBOLS * NUM_SYMBOLS],
}

impl InverseTable {
    /// Recovers the plaintext pair whose cell stores the given ciphertext
    /// pair.
    ///
    /// # Errors
    /// Returns [`Sarah2Error::InvalidSymbol`] for bytes outside the
    /// alphabet, or [`Sarah2Error::InvalidKeyStructure`] if no cell stores
    /// the pair (the table was not a bijection).
    pub(crate) fn lookup(&self, first: u8, second: u8) -> Result<[u8; 2], Sarah2Error> {
        let slot = alphabet::index_of(first)? * NUM_SYMBOLS + alphabet::index_of(second)?;
        self.pairs[slot].ok_or(Sarah2Error::InvalidKeyStructure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::mersenne_twister::MersenneTwister;

    fn test_rng(seed: u64) -> UniformRandom<MersenneTwister> {
        UniformRandom::new(MersenneTwister::with_seed(seed))
    }

    /// Identity table: cell (r, c) holds (SYMBOLS[r], SYMBOLS[c]).
    fn identity_key() -> SubstitutionKey {
        let mut bytes = [0u8; KEY_SIZE];
        for row in 0..NUM_SYMBOLS {
            for col in 0..NUM_SYMBOLS {
                let offset = cell_offset(row, col);
                bytes[offset] = alphabet::symbol_at(row);
                bytes[offset + 1] = alphabet::symbol_at(col);
            }
        }
        SubstitutionKey::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_generate_is_valid() {
        for seed in [0, 1, 42, 12345, u64::MAX] {
            let key = SubstitutionKey::generate(&mut test_rng(seed));
            assert!(key.is_valid(), "generated key invalid for seed {}", seed);
        }
    }

    #[test]
    fn test_generate_deterministic() {
        let a = SubstitutionKey::generate(&mut test_rng(7));
        let b = SubstitutionKey::generate(&mut test_rng(7));
        assert_eq!(a.as_bytes()[..], b.as_bytes()[..]);
    }

    #[test]
    fn test_generate_different_seeds() {
        let a = SubstitutionKey::generate(&mut test_rng(1));
        let b = SubstitutionKey::generate(&mut test_rng(2));
        assert_ne!(a.as_bytes()[..], b.as_bytes()[..]);
    }

    #[test]
    fn test_generate_is_bijection() {
        let key = SubstitutionKey::generate(&mut test_rng(42));
        let mut seen = [false; NUM_SYMBOLS * NUM_SYMBOLS];
        for pair in key.as_bytes().chunks_exact(2) {
            let slot = alphabet::index_of(pair[0]).unwrap() * NUM_SYMBOLS
                + alphabet::index_of(pair[1]).unwrap();
            assert!(!seen[slot], "pair stored twice");
            seen[slot] = true;
        }
    }

    #[test]
    fn test_identity_key_is_valid() {
        assert!(identity_key().is_valid());
    }

    #[test]
    fn test_all_zero_buffer_is_invalid() {
        let key = SubstitutionKey::from_bytes(&[0u8; KEY_SIZE]).unwrap();
        assert!(!key.is_valid());
    }

    #[test]
    fn test_uniform_fill_is_invalid() {
        // All cells "aa": alphabet members, but counts are 729, not 27.
        let key = SubstitutionKey::from_bytes(&[b'a'; KEY_SIZE]).unwrap();
        assert!(!key.is_valid());
    }

    #[test]
    fn test_from_bytes_wrong_length() {
        assert_eq!(
            SubstitutionKey::from_bytes(&[b'a'; KEY_SIZE - 1]).err(),
            Some(Sarah2Error::InvalidKeyStructure)
        );
        assert_eq!(
            SubstitutionKey::from_bytes(&[]).err(),
            Some(Sarah2Error::InvalidKeyStructure)
        );
    }

    #[test]
    fn test_serialization_roundtrip() {
        let key = SubstitutionKey::generate(&mut test_rng(5));
        let restored = SubstitutionKey::from_bytes(key.as_bytes()).unwrap();
        assert_eq!(key.as_bytes()[..], restored.as_bytes()[..]);
    }

    #[test]
    fn test_cell_matches_flat_layout() {
        let key = identity_key();
        assert_eq!(key.cell(0, 0), (b'_', b'_'));
        assert_eq!(key.cell(1, 0), (b'a', b'_'));
        assert_eq!(key.cell(0, 1), (b'_', b'a'));
        assert_eq!(key.cell(26, 26), (b'z', b'z'));
    }

    #[test]
    fn test_inverse_roundtrips_every_cell() {
        let key = SubstitutionKey::generate(&mut test_rng(13));
        let inverse = key.inverse().unwrap();
        for row in 0..NUM_SYMBOLS {
            for col in 0..NUM_SYMBOLS {
                let (first, second) = key.cell(row, col);
                let plain = inverse.lookup(first, second).unwrap();
                assert_eq!(
                    plain,
                    [alphabet::symbol_at(row), alphabet::symbol_at(col)]
                );
            }
        }
    }

    #[test]
    fn test_inverse_missing_pair() {
        // The identity key never stores the pair it maps a cell to anywhere
        // else, so every pair resolves; a uniform "aa" fill leaves all other
        // slots empty.
        let key = SubstitutionKey::from_bytes(&[b'a'; KEY_SIZE]).unwrap();
        let inverse = key.inverse().unwrap();
        assert_eq!(
            inverse.lookup(b'b', b'b').err(),
            Some(Sarah2Error::InvalidKeyStructure)
        );
    }

    #[test]
    fn test_display_grid_shape() {
        let rendered = identity_key().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), NUM_SYMBOLS);
        for line in &lines {
            assert_eq!(line.split(' ').count(), NUM_SYMBOLS);
        }
        assert!(lines[0].starts_with("__ _a _b"));
    }
}
