//! Errors returned by parameter validation and by the encoding pipeline.

use thiserror::Error;

/// Everything that can go wrong while building or running an encoder.
///
/// Configuration faults are detected once, when an `Encoder` is built, and
/// mean the encoder must not be used. Operational faults are detected per
/// report; the failed call produces no output and the encoder stays usable.
#[derive(Debug, Error)]
pub enum RapporError {
    #[error("num_bits must be positive")]
    NumBitsNotPositive,

    #[error("num_bits ({num_bits}) can't be greater than {max}")]
    NumBitsTooLarge { num_bits: u32, max: u32 },

    #[error("num_bits ({0}) must be divisible by 8")]
    NumBitsNotByteAligned(u32),

    #[error("num_hashes must be positive")]
    NumHashesNotPositive,

    #[error("num_hashes ({num_hashes}) can't be greater than {max}")]
    NumHashesTooLarge { num_hashes: u32, max: u32 },

    #[error("num_cohorts must be positive")]
    NumCohortsNotPositive,

    #[error("cohort ({cohort}) must be less than num_cohorts ({num_cohorts})")]
    CohortOutOfRange { cohort: u32, num_cohorts: u32 },

    #[error("{name} should be between 0.0 and 1.0 (and non-zero) (got {value:.2})")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("hash function didn't return enough bytes (needed {needed}, got {got})")]
    HashTooShort { needed: usize, got: usize },

    #[error("HMAC returned {got} bytes, expected {expected}")]
    HmacLength { expected: usize, got: usize },

    #[error("random mask has width {got}, expected {expected}")]
    MaskWidth { expected: usize, got: usize },

    #[error("randomness source failed: {0}")]
    Randomness(String),

    #[error("crypto backend error: {0}")]
    Crypto(#[from] openssl::error::ErrorStack),
}

impl RapporError {
    /// Returns true for faults that make an encoder unusable, false for
    /// per-call failures the caller may retry.
    pub fn is_configuration(&self) -> bool {
        match self {
            RapporError::NumBitsNotPositive
            | RapporError::NumBitsTooLarge { .. }
            | RapporError::NumBitsNotByteAligned(_)
            | RapporError::NumHashesNotPositive
            | RapporError::NumHashesTooLarge { .. }
            | RapporError::NumCohortsNotPositive
            | RapporError::CohortOutOfRange { .. }
            | RapporError::InvalidProbability { .. } => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RapporError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(RapporError::NumBitsNotPositive.is_configuration());
        assert!(RapporError::CohortOutOfRange { cohort: 4, num_cohorts: 4 }.is_configuration());
        assert!(!RapporError::HashTooShort { needed: 2, got: 1 }.is_configuration());
        assert!(!RapporError::Randomness("read failed".to_string()).is_configuration());
    }

    #[test]
    fn test_messages() {
        let e = RapporError::NumBitsTooLarge { num_bits: 64, max: 32 };
        assert!(e.to_string().contains("can't be greater than 32"));
        let e = RapporError::InvalidProbability { name: "prob_f", value: 1.1 };
        assert!(e.to_string().starts_with("prob_f should be between"));
        assert!(RapporError::NumBitsNotByteAligned(63).to_string().contains("divisible by 8"));
    }
}
