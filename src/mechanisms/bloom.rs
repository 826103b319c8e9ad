//! Bloom filter construction.

use crate::utilities::bits::Bits;
use crate::utilities::error::{RapporError, Result};
use crate::utilities::hashing::HashFunction;
use crate::utilities::params::Params;

/// Map `value` to a Bloom filter of `params.num_bits()` bits.
///
/// The hash input is the 4-byte big-endian cohort followed by the value.
/// Each of the first `num_hashes` digest bytes selects bit
/// `byte % num_bits`; two bytes selecting the same bit set it once.
/// ## Errors
/// Returns `HashTooShort` if the digest has fewer than `num_hashes` bytes,
/// or any error raised by the hash itself.
pub fn bloom_filter<H: HashFunction + ?Sized>(hash: &H, params: &Params, cohort: u32,
                                              value: &[u8]) -> Result<Bits> {
    let num_bits = params.num_bits() as usize;
    let num_hashes = params.num_hashes() as usize;

    // 4 byte cohort + actual value
    let mut hash_input = Vec::with_capacity(4 + value.len());
    hash_input.extend_from_slice(&cohort.to_be_bytes());
    hash_input.extend_from_slice(value);

    let digest = hash.hash(&hash_input)?;
    if digest.len() < num_hashes {
        return Err(RapporError::HashTooShort { needed: num_hashes, got: digest.len() });
    }

    let mut bloom = Bits::zeros(num_bits);
    for &byte in &digest[..num_hashes] {
        bloom.set(byte as usize % num_bits);
    }
    Ok(bloom)
}
