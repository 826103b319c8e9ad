//! The RAPPOR encoder: owns the parameters and the injected capabilities
//! and runs Bloom filter, PRR and IRR in order.

use tracing::{debug, warn};

use crate::mechanisms::bloom::bloom_filter;
use crate::mechanisms::irr::instantaneous_response;
use crate::mechanisms::prr::{permanent_response, prr_masks};
use crate::utilities::bits::Bits;
use crate::utilities::error::{RapporError, Result};
use crate::utilities::hashing::{DigestWidth, HashFunction, HmacFunction};
use crate::utilities::params::Params;
use crate::utilities::randomness::IrrRand;

/// Message keyed with the client secret to pick a cohort.
const COHORT_MESSAGE: &[u8] = b"";

/// The capabilities an encoder depends on.
///
/// `cohort` must be below the `num_cohorts` of the parameters it is used
/// with; this is checked by [`Encoder::new`].
#[derive(Debug, Clone)]
pub struct Deps<H, M, R> {
    pub cohort: u32,
    pub hash: H,
    pub client_secret: Vec<u8>,
    pub hmac: M,
    pub irr_rand: R,
}

impl<H: HashFunction, M: HmacFunction, R: IrrRand> Deps<H, M, R> {
    pub fn new<S: Into<Vec<u8>>>(cohort: u32, hash: H, client_secret: S, hmac: M,
                                 irr_rand: R) -> Deps<H, M, R> {
        Deps { cohort, hash, client_secret: client_secret.into(), hmac, irr_rand }
    }
}

/// Derive a stable cohort from the client secret.
///
/// The first four bytes of `HMAC(secret, "")`, read little-endian, modulo
/// `num_cohorts`. For a power-of-two `num_cohorts` this is the same as
/// masking with `num_cohorts - 1`. A device keeps its cohort for as long
/// as it keeps its secret.
/// ## Errors
/// Returns `NumCohortsNotPositive` for zero cohorts, `HmacLength` for a
/// digest shorter than four bytes, or the HMAC's own error.
pub fn assign_cohort<M: HmacFunction + ?Sized>(hmac: &M, client_secret: &[u8],
                                               num_cohorts: u32) -> Result<u32> {
    if num_cohorts == 0 {
        return Err(RapporError::NumCohortsNotPositive);
    }
    let digest = hmac.mac(client_secret, COHORT_MESSAGE, 4)?;
    if digest.len() < 4 {
        return Err(RapporError::HmacLength { expected: 4, got: digest.len() });
    }
    let c = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
    Ok(c % num_cohorts)
}

/// Every intermediate of one report. For tests and debugging; only the
/// `irr` may leave the device.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedReport {
    pub bloom: Bits,
    pub prr: Bits,
    pub irr: Bits,
}

/// Encodes values of one metric into RAPPOR reports.
#[derive(Debug)]
pub struct Encoder<H, M, R> {
    encoder_id: String,
    params: Params,
    deps: Deps<H, M, R>,
}

impl<H: HashFunction, M: HmacFunction, R: IrrRand> Encoder<H, M, R> {
    /// Create a new encoder.
    /// ## Arguments
    ///   * `encoder_id`: name of the metric, attached to log events
    ///   * `params`: the RAPPOR parameters
    ///   * `deps`: cohort, hash, HMAC, client secret and randomness source
    /// ## Returns
    /// An `Encoder`, or the configuration fault that prevents building one.
    /// ## Errors
    /// Returns an error if `num_bits` is wider than the HMAC can back (more
    /// than 32 with HMAC-SHA256), is not a multiple of 8 with an extendable
    /// HMAC, or if the cohort is not below `num_cohorts`.
    pub fn new<S: Into<String>>(encoder_id: S, params: Params,
                                deps: Deps<H, M, R>) -> Result<Encoder<H, M, R>> {
        let encoder_id = encoder_id.into();
        let num_bits = params.num_bits();

        match deps.hmac.width() {
            DigestWidth::Fixed(len) => {
                let max = len as u32;
                if num_bits > max {
                    return Err(RapporError::NumBitsTooLarge { num_bits, max });
                }
            }
            DigestWidth::Extendable { max_bits } => {
                if num_bits > max_bits {
                    return Err(RapporError::NumBitsTooLarge { num_bits, max: max_bits });
                }
                if num_bits % 8 != 0 {
                    return Err(RapporError::NumBitsNotByteAligned(num_bits));
                }
            }
        }
        check_cohort(deps.cohort, &params)?;

        debug!(encoder_id = %encoder_id, num_bits, num_hashes = params.num_hashes(),
               cohort = deps.cohort, "created encoder");
        Ok(Encoder { encoder_id, params, deps })
    }

    pub fn encoder_id(&self) -> &str {
        &self.encoder_id
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn cohort(&self) -> u32 {
        self.deps.cohort
    }

    /// Move the encoder to another cohort.
    /// ## Errors
    /// Returns `CohortOutOfRange`, leaving the cohort unchanged, if
    /// `cohort >= num_cohorts`.
    pub fn set_cohort(&mut self, cohort: u32) -> Result<()> {
        check_cohort(cohort, &self.params)?;
        self.deps.cohort = cohort;
        Ok(())
    }

    /// Encode `value` into an IRR report of `num_bits` bits.
    /// ## Errors
    /// Returns an error, and no report, if the hash, HMAC or randomness
    /// source fails. The encoder remains usable.
    pub fn encode(&self, value: &[u8]) -> Result<Bits> {
        self.encode_internal(value).map(|report| report.irr)
    }

    pub fn encode_string(&self, value: &str) -> Result<Bits> {
        self.encode(value.as_bytes())
    }

    /// Encode an integer as its 4-byte big-endian representation.
    pub fn encode_u32(&self, value: u32) -> Result<Bits> {
        self.encode(&value.to_be_bytes())
    }

    /// Encode `value` and return the Bloom filter and PRR along with the IRR.
    pub fn encode_internal(&self, value: &[u8]) -> Result<EncodedReport> {
        let bloom = bloom_filter(&self.deps.hash, &self.params, self.deps.cohort, value)
            .map_err(|e| self.stage_failed("bloom filter", e))?;

        // Compute Permanent Randomized Response (PRR).
        let masks = prr_masks(&self.deps.hmac, &self.deps.client_secret, &self.params, value)
            .map_err(|e| self.stage_failed("PRR masks", e))?;
        let prr = permanent_response(&bloom, &masks);

        // Compute Instantaneous Randomized Response (IRR).
        let irr = instantaneous_response(&self.deps.irr_rand, &self.params, &prr)
            .map_err(|e| self.stage_failed("IRR masks", e))?;

        Ok(EncodedReport { bloom, prr, irr })
    }

    fn stage_failed(&self, stage: &str, err: RapporError) -> RapporError {
        warn!(encoder_id = %self.encoder_id, stage, error = %err, "encoding failed");
        err
    }
}

fn check_cohort(cohort: u32, params: &Params) -> Result<()> {
    if cohort >= params.num_cohorts() {
        return Err(RapporError::CohortOutOfRange { cohort, num_cohorts: params.num_cohorts() });
    }
    Ok(())
}
