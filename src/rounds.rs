//! Round-count policy: named profiles resolved against the padded length.

use crate::error::Sarah2Error;

/// Round-count profile for a cipher operation.
///
/// The named profiles scale with message length; pick by threat model:
/// [`Minimal`](Rounds::Minimal) when adversaries never get to choose what
/// gets encrypted, [`Medium`](Rounds::Medium) for heavy traffic under the
/// same assumption, [`Maximal`](Rounds::Maximal) when adversaries can run
/// chosen text through the key. [`Custom`](Rounds::Custom) supplies an exact
/// count. Encrypt and decrypt must resolve the same count for a round trip
/// to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounds {
    /// Exactly the supplied number of rounds.
    Custom(usize),
    /// `ceil(log2(len))` rounds.
    Minimal,
    /// `ceil(log2(len)) + 2` rounds.
    Medium,
    /// `ceil(log2(len)) * 2` rounds.
    Maximal,
}

impl Rounds {
    /// Resolves the profile into a concrete round count for a buffer of
    /// `padded_len` symbols.
    ///
    /// # Errors
    /// Returns [`Sarah2Error::DegenerateLength`] if `padded_len < 2` (the
    /// logarithmic formulas are undefined there) and
    /// [`Sarah2Error::InvalidRoundCount`] if the resolved count is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use sarah2::Rounds;
    ///
    /// assert_eq!(Rounds::Minimal.resolve(14).unwrap(), 4);
    /// assert_eq!(Rounds::Medium.resolve(14).unwrap(), 6);
    /// assert_eq!(Rounds::Maximal.resolve(14).unwrap(), 8);
    /// assert_eq!(Rounds::Custom(3).resolve(14).unwrap(), 3);
    /// ```
    pub fn resolve(self, padded_len: usize) -> Result<usize, Sarah2Error> {
        if padded_len < 2 {
            return Err(Sarah2Error::DegenerateLength);
        }
        let count = match self {
            Rounds::Custom(count) => count,
            Rounds::Minimal => ceil_log2(padded_len),
            Rounds::Medium => ceil_log2(padded_len) + 2,
            Rounds::Maximal => ceil_log2(padded_len) * 2,
        };
        if count == 0 {
            return Err(Sarah2Error::InvalidRoundCount);
        }
        Ok(count)
    }
}

/// `ceil(log2(n))` for `n >= 2`.
fn ceil_log2(n: usize) -> usize {
    usize::BITS as usize - (n - 1).leading_zeros() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_log2_values() {
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(4), 2);
        assert_eq!(ceil_log2(5), 3);
        assert_eq!(ceil_log2(8), 3);
        assert_eq!(ceil_log2(9), 4);
        assert_eq!(ceil_log2(14), 4);
        assert_eq!(ceil_log2(16), 4);
        assert_eq!(ceil_log2(1024), 10);
        assert_eq!(ceil_log2(1025), 11);
    }

    #[test]
    fn test_profiles_for_length_14() {
        assert_eq!(Rounds::Minimal.resolve(14).unwrap(), 4);
        assert_eq!(Rounds::Medium.resolve(14).unwrap(), 6);
        assert_eq!(Rounds::Maximal.resolve(14).unwrap(), 8);
    }

    #[test]
    fn test_custom_count_passthrough() {
        for count in [1, 2, 5, 100] {
            assert_eq!(Rounds::Custom(count).resolve(2).unwrap(), count);
        }
    }

    #[test]
    fn test_custom_zero_rejected() {
        assert_eq!(
            Rounds::Custom(0).resolve(14),
            Err(Sarah2Error::InvalidRoundCount)
        );
    }

    #[test]
    fn test_degenerate_lengths_rejected() {
        for profile in [Rounds::Minimal, Rounds::Medium, Rounds::Maximal, Rounds::Custom(4)] {
            assert_eq!(profile.resolve(0), Err(Sarah2Error::DegenerateLength));
            assert_eq!(profile.resolve(1), Err(Sarah2Error::DegenerateLength));
        }
    }

    #[test]
    fn test_minimum_length_resolves() {
        assert_eq!(Rounds::Minimal.resolve(2).unwrap(), 1);
        assert_eq!(Rounds::Medium.resolve(2).unwrap(), 3);
        assert_eq!(Rounds::Maximal.resolve(2).unwrap(), 2);
    }
}
