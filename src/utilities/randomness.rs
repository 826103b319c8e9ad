//! Randomness sources for the instantaneous randomized response.

use std::rc::Rc;
use std::sync::Arc;

use openssl::rand::rand_bytes;

use crate::utilities::bits::Bits;
use crate::utilities::error::{RapporError, Result};

/// Source of Bernoulli masks for the IRR.
///
/// Each call must return an independent `num_bits` wide mask in which every
/// bit is 1 with probability `prob`. A source that cannot produce one must
/// return an error rather than a default pattern.
pub trait IrrRand {
    fn mask(&self, prob: f64, num_bits: usize) -> Result<Bits>;
}

impl<'a, T: IrrRand + ?Sized> IrrRand for &'a T {
    fn mask(&self, prob: f64, num_bits: usize) -> Result<Bits> {
        (**self).mask(prob, num_bits)
    }
}

impl<T: IrrRand + ?Sized> IrrRand for Box<T> {
    fn mask(&self, prob: f64, num_bits: usize) -> Result<Bits> {
        (**self).mask(prob, num_bits)
    }
}

impl<T: IrrRand + ?Sized> IrrRand for Rc<T> {
    fn mask(&self, prob: f64, num_bits: usize) -> Result<Bits> {
        (**self).mask(prob, num_bits)
    }
}

impl<T: IrrRand + ?Sized> IrrRand for Arc<T> {
    fn mask(&self, prob: f64, num_bits: usize) -> Result<Bits> {
        (**self).mask(prob, num_bits)
    }
}

/// Cryptographically secure randomness from OpenSSL.
///
/// Draws one byte per bit and sets the bit when the byte falls below
/// `floor(prob * 256)`. Stateless, so it can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratorOpenSSL;

impl IrrRand for GeneratorOpenSSL {
    fn mask(&self, prob: f64, num_bits: usize) -> Result<Bits> {
        let mut buf = vec![0u8; num_bits];
        rand_bytes(&mut buf).map_err(|e| RapporError::Randomness(e.to_string()))?;

        let threshold256 = (prob * 256.0) as u16;
        Ok(Bits::from_fn(num_bits, |i| (buf[i] as u16) < threshold256))
    }
}
