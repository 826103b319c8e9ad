//! Hash and HMAC capabilities consumed by the encoder, with OpenSSL-backed
//! implementations.

use openssl::hash::{hash, MessageDigest};
use openssl::pkey::PKey;
use openssl::sign::Signer;

use crate::utilities::error::Result;
use crate::utilities::params::{MAX_BITS, MAX_FIXED_BITS};

/// Unkeyed hash used to place a value in the Bloom filter.
pub trait HashFunction {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// How many keyed bytes an HMAC can yield per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestWidth {
    /// Always exactly this many bytes, whatever is requested.
    Fixed(usize),
    /// Exactly the requested number of bytes, up to `max_bits` bytes.
    /// Report widths must then be byte aligned.
    Extendable { max_bits: u32 },
}

impl DigestWidth {
    /// Number of bytes a call asking for `num_bytes` must return.
    pub fn expected_len(&self, num_bytes: usize) -> usize {
        match *self {
            DigestWidth::Fixed(len) => len,
            DigestWidth::Extendable { .. } => num_bytes,
        }
    }
}

/// Keyed hash whose output seeds the permanent randomized response.
pub trait HmacFunction {
    fn width(&self) -> DigestWidth;

    /// `HMAC(key, message)`. `num_bytes` is how much keyed material the
    /// caller will consume; fixed-width functions may ignore it.
    fn mac(&self, key: &[u8], message: &[u8], num_bytes: usize) -> Result<Vec<u8>>;
}

impl<'a, T: HashFunction + ?Sized> HashFunction for &'a T {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>> {
        (**self).hash(input)
    }
}

impl<'a, T: HmacFunction + ?Sized> HmacFunction for &'a T {
    fn width(&self) -> DigestWidth {
        (**self).width()
    }

    fn mac(&self, key: &[u8], message: &[u8], num_bytes: usize) -> Result<Vec<u8>> {
        (**self).mac(key, message, num_bytes)
    }
}

/// MD5, 16 bytes. Enough for the maximum of 16 Bloom hashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5;

impl HashFunction for Md5 {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(hash(MessageDigest::md5(), input)?.to_vec())
    }
}

/// SHA-256, 32 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256;

impl HashFunction for Sha256 {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(hash(MessageDigest::sha256(), input)?.to_vec())
    }
}

/// HMAC-SHA256. One 32-byte digest, so reports are at most 32 bits wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256;

impl HmacFunction for HmacSha256 {
    fn width(&self) -> DigestWidth {
        DigestWidth::Fixed(MAX_FIXED_BITS as usize)
    }

    fn mac(&self, key: &[u8], message: &[u8], _num_bytes: usize) -> Result<Vec<u8>> {
        hmac_sha256(key, message)
    }
}

/// HMAC_DRBG over SHA-256 (NIST SP 800-90A), seeded with `key || message`.
/// Produces as many bytes as requested, which lifts the 32-bit ceiling of
/// [`HmacSha256`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacDrbg;

impl HmacDrbg {
    // HMAC_DRBG_Update.
    fn update(k: &mut Vec<u8>, v: &mut Vec<u8>, seed: &[u8]) -> Result<()> {
        for &round in &[0x00u8, 0x01] {
            if round == 0x01 && seed.is_empty() {
                break;
            }
            let mut input = Vec::with_capacity(v.len() + 1 + seed.len());
            input.extend_from_slice(v);
            input.push(round);
            input.extend_from_slice(seed);
            *k = hmac_sha256(&k[..], &input)?;
            *v = hmac_sha256(&k[..], &v[..])?;
        }
        Ok(())
    }
}

impl HmacFunction for HmacDrbg {
    fn width(&self) -> DigestWidth {
        DigestWidth::Extendable { max_bits: MAX_BITS }
    }

    fn mac(&self, key: &[u8], message: &[u8], num_bytes: usize) -> Result<Vec<u8>> {
        let mut k = vec![0x00; 32];
        let mut v = vec![0x01; 32];
        let mut seed = Vec::with_capacity(key.len() + message.len());
        seed.extend_from_slice(key);
        seed.extend_from_slice(message);
        HmacDrbg::update(&mut k, &mut v, &seed)?;

        let mut out = Vec::with_capacity(num_bytes + 32);
        while out.len() < num_bytes {
            v = hmac_sha256(&k, &v)?;
            out.extend_from_slice(&v);
        }
        out.truncate(num_bytes);
        Ok(out)
    }
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let pkey = PKey::hmac(key)?;
    let mut signer = Signer::new(MessageDigest::sha256(), &pkey)?;
    signer.update(message)?;
    Ok(signer.sign_to_vec()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_md5_known_answer() {
        assert_eq!(hex(&Md5.hash(b"").unwrap()), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_hmac_sha256_known_answer() {
        let mac = HmacSha256.mac(b"key", b"The quick brown fox jumps over the lazy dog", 4).unwrap();
        assert_eq!(hex(&mac),
                   "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8");
        assert_eq!(HmacSha256.width(), DigestWidth::Fixed(32));
    }

    #[test]
    fn test_drbg_length_and_prefix() {
        let short = HmacDrbg.mac(b"client-secret", b"foo", 8).unwrap();
        assert_eq!(hex(&short), "94a4d17a6c6768a8");
        let long = HmacDrbg.mac(b"client-secret", b"foo", 64).unwrap();
        assert_eq!(long.len(), 64);
        assert_eq!(&long[..8], &short[..]);
        assert_ne!(HmacDrbg.mac(b"client-secret", b"bar", 8).unwrap(), short);
    }

    #[test]
    fn test_hash_through_reference() {
        let md5 = Md5;
        let by_ref: &dyn HashFunction = &md5;
        assert_eq!(by_ref.hash(b"foo").unwrap(), Md5.hash(b"foo").unwrap());
        assert_eq!(Sha256.hash(b"foo").unwrap().len(), 32);
    }
}
