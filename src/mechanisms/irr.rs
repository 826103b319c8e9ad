//! Instantaneous randomized response.

use crate::utilities::bits::Bits;
use crate::utilities::error::{RapporError, Result};
use crate::utilities::params::Params;
use crate::utilities::randomness::IrrRand;

/// Draw fresh noise over `prr` for one report.
///
/// Two masks are drawn: `p_bits` at rate `prob_p` and `q_bits` at rate
/// `prob_q`, giving `IRR = (p_bits AND NOT prr) OR (q_bits AND prr)`.
/// ## Errors
/// Propagates any failure of the randomness source, and returns `MaskWidth`
/// if it hands back a mask of the wrong width.
pub fn instantaneous_response<R: IrrRand + ?Sized>(rand: &R, params: &Params,
                                                   prr: &Bits) -> Result<Bits> {
    let num_bits = params.num_bits() as usize;
    let p_bits = draw(rand, params.prob_p(), num_bits)?;
    let q_bits = draw(rand, params.prob_q(), num_bits)?;
    Ok((p_bits & !prr) | (q_bits & prr.clone()))
}

fn draw<R: IrrRand + ?Sized>(rand: &R, prob: f64, num_bits: usize) -> Result<Bits> {
    let mask = rand.mask(prob, num_bits)?;
    if mask.num_bits() != num_bits {
        return Err(RapporError::MaskWidth { expected: num_bits, got: mask.num_bits() });
    }
    Ok(mask)
}
