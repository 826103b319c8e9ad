//! Permanent randomized response.
//!
//! The PRR replaces each Bloom bit, with probability `f`, by a coin flip.
//! Both the decision and the coin come from `HMAC(secret, value)`, so the
//! same value always gets the same PRR under one secret and repeated
//! reports cannot be averaged to recover the Bloom filter.

use crate::utilities::bits::Bits;
use crate::utilities::error::{RapporError, Result};
use crate::utilities::hashing::HmacFunction;
use crate::utilities::params::Params;

/// The two masks read from the HMAC digest.
#[derive(Debug, Clone, PartialEq)]
pub struct PrrMasks {
    /// Coin flips used where noise fires.
    pub uniform: Bits,
    /// Positions where the Bloom bit is replaced.
    pub f_mask: Bits,
}

/// Derive the uniform and noise masks for `value`.
///
/// Byte `i` of the digest drives bit `i`: its low bit is the coin, and its
/// upper 7 bits, read as an integer below 128, select noise when below
/// `floor(prob_f * 128)`.
/// ## Errors
/// Returns `HmacLength` if the digest does not have the length the HMAC
/// declares for this request.
pub fn prr_masks<M: HmacFunction + ?Sized>(hmac: &M, secret: &[u8], params: &Params,
                                           value: &[u8]) -> Result<PrrMasks> {
    let num_bits = params.num_bits() as usize;
    let digest = hmac.mac(secret, value, num_bits)?;

    let expected = hmac.width().expected_len(num_bits);
    if digest.len() != expected || digest.len() < num_bits {
        return Err(RapporError::HmacLength { expected, got: digest.len() });
    }

    let threshold128 = (params.prob_f() * 128.0) as u8;
    let uniform = Bits::from_fn(num_bits, |i| digest[i] & 0x01 == 1);
    let f_mask = Bits::from_fn(num_bits, |i| (digest[i] >> 1) < threshold128);
    Ok(PrrMasks { uniform, f_mask })
}

/// `PRR = (bloom AND NOT f_mask) OR (uniform AND f_mask)`.
pub fn permanent_response(bloom: &Bits, masks: &PrrMasks) -> Bits {
    (bloom & &!&masks.f_mask) | (&masks.uniform & &masks.f_mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::hashing::{DigestWidth, HmacDrbg, HmacSha256};

    /// Returns a canned digest regardless of input.
    struct CannedHmac(Vec<u8>);

    impl HmacFunction for CannedHmac {
        fn width(&self) -> DigestWidth {
            DigestWidth::Fixed(32)
        }

        fn mac(&self, _key: &[u8], _message: &[u8], _num_bytes: usize) -> Result<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    fn params(num_bits: u32, prob_f: f64) -> Params {
        Params::new(num_bits, 2, 128, prob_f, 0.75, 0.5).unwrap()
    }

    #[test]
    fn test_mask_bits_from_digest_bytes() {
        let mut digest = vec![0u8; 32];
        // bit 0: coin 1, rand128 = 0 -> noise
        digest[0] = 0x01;
        // bit 1: coin 0, rand128 = 31 -> noise (threshold 32)
        digest[1] = 31 << 1;
        // bit 2: coin 1, rand128 = 32 -> no noise
        digest[2] = (32 << 1) | 1;
        let masks = prr_masks(&CannedHmac(digest), b"s", &params(8, 0.25), b"v").unwrap();
        assert_eq!(masks.uniform.to_u32(), Some(0b101));
        assert_eq!(masks.f_mask.to_u32(), Some(0b1111_1011));
    }

    #[test]
    fn test_combination() {
        let bloom = Bits::from_u64(8, 0b1100_1100);
        let masks = PrrMasks {
            uniform: Bits::from_u64(8, 0b1010_1010),
            f_mask: Bits::from_u64(8, 0b1111_0000),
        };
        assert_eq!(permanent_response(&bloom, &masks).to_u32(), Some(0b1010_1100));
    }

    #[test]
    fn test_f_one_is_all_noise() {
        let masks = prr_masks(&HmacSha256, b"client-secret", &params(32, 1.0), b"foo").unwrap();
        assert_eq!(masks.f_mask, Bits::ones(32));
        let prr = permanent_response(&Bits::zeros(32), &masks);
        assert_eq!(prr, masks.uniform);
        assert_eq!(prr.to_u32(), Some(0x07e3_ec42));
    }

    #[test]
    fn test_deterministic() {
        let p = params(32, 0.25);
        let a = prr_masks(&HmacSha256, b"client-secret", &p, b"foo").unwrap();
        let b = prr_masks(&HmacSha256, b"client-secret", &p, b"foo").unwrap();
        assert_eq!(a, b);
        let other = prr_masks(&HmacSha256, b"other-secret", &p, b"foo").unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn test_wrong_digest_length() {
        match prr_masks(&CannedHmac(vec![0; 20]), b"s", &params(8, 0.25), b"v") {
            Err(RapporError::HmacLength { expected: 32, got: 20 }) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_drbg_digest_matches_width() {
        let masks = prr_masks(&HmacDrbg, b"client-secret", &params(64, 0.25), b"foo").unwrap();
        assert_eq!(masks.uniform.num_bits(), 64);
        assert_eq!(masks.f_mask.num_bits(), 64);
    }
}
