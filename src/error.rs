//! Error types for the sarah2 library.

use std::fmt;

/// Errors produced by the sarah2 library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sarah2Error {
    /// A byte outside the 27-symbol alphabet appeared in a message or key.
    InvalidSymbol,
    /// The resolved or supplied round count is zero.
    InvalidRoundCount,
    /// The message or ciphertext is shorter than two symbols.
    DegenerateLength,
    /// The key fails validation, has the wrong size, or maps no cell to an
    /// observed ciphertext pair.
    InvalidKeyStructure,
    /// The ciphertext length is odd and cannot be split into symbol pairs.
    OddCiphertextLength,
}

impl fmt::Display for Sarah2Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sarah2Error::InvalidSymbol => {
                write!(f, "Symbol is not one of the 27 recognized characters")
            }
            Sarah2Error::InvalidRoundCount => {
                write!(f, "Round count must be at least 1")
            }
            Sarah2Error::DegenerateLength => {
                write!(f, "Message must be at least 2 symbols long")
            }
            Sarah2Error::InvalidKeyStructure => {
                write!(f, "Key is not a valid substitution table")
            }
            Sarah2Error::OddCiphertextLength => {
                write!(f, "Ciphertext length is not a multiple of the pair size")
            }
        }
    }
}

impl std::error::Error for Sarah2Error {}
