//! RAPPOR encoding parameters and their validation.

use crate::utilities::error::{RapporError, Result};

/// Largest `num_bits` any digest can back. A single hash byte selects the
/// Bloom bit, so positions beyond 255 could never be set.
pub const MAX_BITS: u32 = 256;

/// Largest `num_bits` when PRR noise comes from one HMAC-SHA256 digest
/// (one byte per bit).
pub const MAX_FIXED_BITS: u32 = 32;

/// Can't be more than the number of bytes in an MD5 digest.
pub const MAX_HASHES: u32 = 16;

/// The RAPPOR parameters shared by every report of one metric.
///
/// Fields are set once by [`Params::new`] and only read afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    num_bits: u32,
    num_hashes: u32,
    num_cohorts: u32,
    prob_f: f64,
    prob_p: f64,
    prob_q: f64,
}

impl Params {
    /// Create a new set of parameters.
    /// ## Arguments
    ///   * `num_bits`: width `k` of the Bloom filter and of every report
    ///   * `num_hashes`: number `h` of Bloom bits set per value
    ///   * `num_cohorts`: number `m` of cohorts the population is split into
    ///   * `prob_f`: probability of replacing a Bloom bit in the PRR
    ///   * `prob_p`: probability of reporting 1 for a PRR bit of 0
    ///   * `prob_q`: probability of reporting 1 for a PRR bit of 1
    /// ## Returns
    /// The parameters, or a configuration error.
    /// ## Errors
    /// Returns an error if a count is zero or above its maximum, or if a
    /// probability is outside `(0.0, 1.0]`. Bounds that depend on the HMAC
    /// in use (the 32-bit ceiling, byte alignment) are checked when the
    /// `Encoder` is built.
    pub fn new(num_bits: u32, num_hashes: u32, num_cohorts: u32,
               prob_f: f64, prob_p: f64, prob_q: f64) -> Result<Params> {
        let params = Params { num_bits, num_hashes, num_cohorts, prob_f, prob_p, prob_q };
        params.check()?;
        Ok(params)
    }

    fn check(&self) -> Result<()> {
        if self.num_bits == 0 {
            return Err(RapporError::NumBitsNotPositive);
        }
        if self.num_hashes == 0 {
            return Err(RapporError::NumHashesNotPositive);
        }
        if self.num_cohorts == 0 {
            return Err(RapporError::NumCohortsNotPositive);
        }
        // Check maximum values.
        if self.num_bits > MAX_BITS {
            return Err(RapporError::NumBitsTooLarge { num_bits: self.num_bits, max: MAX_BITS });
        }
        if self.num_hashes > MAX_HASHES {
            return Err(RapporError::NumHashesTooLarge {
                num_hashes: self.num_hashes,
                max: MAX_HASHES,
            });
        }

        check_probability(self.prob_f, "prob_f")?;
        check_probability(self.prob_p, "prob_p")?;
        check_probability(self.prob_q, "prob_q")?;
        Ok(())
    }

    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    pub fn num_cohorts(&self) -> u32 {
        self.num_cohorts
    }

    pub fn prob_f(&self) -> f64 {
        self.prob_f
    }

    pub fn prob_p(&self) -> f64 {
        self.prob_p
    }

    pub fn prob_q(&self) -> f64 {
        self.prob_q
    }
}

/// Probabilities must be in `(0.0, 1.0]`. A zero probability is taken to
/// be a missing setting. NaN fails both comparisons and is rejected too.
fn check_probability(prob: f64, name: &'static str) -> Result<()> {
    if prob > 0.0 && prob <= 1.0 {
        Ok(())
    } else {
        Err(RapporError::InvalidProbability { name, value: prob })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_with_probs(f: f64, p: f64, q: f64) -> Result<Params> {
        Params::new(32, 2, 128, f, p, q)
    }

    #[test]
    fn test_valid_params() {
        let params = Params::new(32, 2, 128, 0.25, 0.75, 0.5).unwrap();
        assert_eq!(params.num_bits(), 32);
        assert_eq!(params.num_hashes(), 2);
        assert_eq!(params.num_cohorts(), 128);
        assert_eq!(params.prob_f(), 0.25);
        assert_eq!(params.prob_p(), 0.75);
        assert_eq!(params.prob_q(), 0.5);
    }

    #[test]
    fn test_counts_must_be_positive() {
        assert!(matches!(Params::new(0, 2, 128, 0.25, 0.75, 0.5),
                         Err(RapporError::NumBitsNotPositive)));
        assert!(matches!(Params::new(32, 0, 128, 0.25, 0.75, 0.5),
                         Err(RapporError::NumHashesNotPositive)));
        assert!(matches!(Params::new(32, 2, 0, 0.25, 0.75, 0.5),
                         Err(RapporError::NumCohortsNotPositive)));
    }

    #[test]
    fn test_maximums() {
        assert!(Params::new(MAX_BITS, 16, 1, 0.25, 0.75, 0.5).is_ok());
        assert!(matches!(Params::new(MAX_BITS + 1, 2, 1, 0.25, 0.75, 0.5),
                         Err(RapporError::NumBitsTooLarge { num_bits: 257, max: 256 })));
        let err = Params::new(32, 17, 128, 0.25, 0.75, 0.5).unwrap_err();
        assert!(err.to_string().contains("can't be greater than 16"));
    }

    #[test]
    fn test_probabilities() {
        // One is allowed, zero and anything above one are not.
        assert!(params_with_probs(1.0, 1.0, 1.0).is_ok());
        for &bad in &[0.0, -0.1, 1.1, std::f64::NAN] {
            let err = params_with_probs(bad, 0.75, 0.5).unwrap_err();
            assert!(err.to_string().starts_with("prob_f should be between"));
            let err = params_with_probs(0.25, bad, 0.5).unwrap_err();
            assert!(err.to_string().starts_with("prob_p should be between"));
            let err = params_with_probs(0.25, 0.75, bad).unwrap_err();
            assert!(err.to_string().starts_with("prob_q should be between"));
        }
    }
}
