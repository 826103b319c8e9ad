//! # RAPPOR Client Crate
//! Implements the client side of RAPPOR (Randomized Aggregatable
//! Privacy-Preserving Ordinal Response), based on
//! [Erlingsson, Pihur and Korolova '14](https://arxiv.org/abs/1407.6981).
//!
//! A sensitive string or integer is turned into a noised bit vector that can
//! be sent to a collector and aggregated with many others, without revealing
//! any single client's true value.
//! ## Background
//! Encoding runs three steps in order:
//! 1. **Bloom filter.** The value, prefixed by the client's cohort, is hashed
//!    and `num_hashes` digest bytes each select one of `num_bits` bits.
//! 2. **Permanent randomized response (PRR).** With probability `f` each
//!    Bloom bit is replaced by a coin flip. Both are read from
//!    `HMAC(secret, value)`, so the PRR of a value never changes and repeated
//!    reports do not leak more over time.
//! 3. **Instantaneous randomized response (IRR).** Every report draws fresh
//!    noise: a PRR bit of 0 is reported as 1 with probability `p`, a PRR bit
//!    of 1 with probability `q`.
//!
//! The hash, the HMAC and the randomness source are injected through
//! [`Deps`]; the crate ships OpenSSL-backed implementations of each.
//! Errors are returned, never logged and swallowed. Logging goes through
//! `tracing`; install a subscriber to see it.
//! ## Details
//! ### Example Usage
//! **Building an encoder**
//! ```
//! use rappor::{Deps, Encoder, GeneratorOpenSSL, HmacSha256, Md5, Params};
//!
//! let params = Params::new(32,    // num_bits (k)
//!                          2,     // num_hashes (h)
//!                          128,   // num_cohorts (m)
//!                          0.25,  // probability f for PRR
//!                          0.75,  // probability p for IRR
//!                          0.5).unwrap(); // probability q for IRR
//! let deps = Deps::new(3, Md5, "client-secret", HmacSha256, GeneratorOpenSSL);
//! let encoder = Encoder::new("metric-name", params, deps).unwrap();
//! let report = encoder.encode_string("foo").unwrap();
//! assert_eq!(report.num_bits(), 32);
//! ```
//! **Wider reports**
//!
//! HMAC-SHA256 backs at most 32 bits. `HmacDrbg` yields as many bytes as
//! needed, for byte-aligned widths up to 256 bits.
//! ```
//! use rappor::{assign_cohort, Deps, Encoder, GeneratorOpenSSL, HmacDrbg, Md5, Params};
//!
//! let params = Params::new(64, 2, 128, 0.25, 0.75, 0.5).unwrap();
//! let cohort = assign_cohort(&HmacDrbg, b"client-secret", 128).unwrap();
//! let deps = Deps::new(cohort, Md5, "client-secret", HmacDrbg, GeneratorOpenSSL);
//! let encoder = Encoder::new("metric-name", params, deps).unwrap();
//! let report = encoder.encode(b"foo").unwrap();
//! assert_eq!(report.as_bytes().len(), 8);
//! ```

/// RAPPOR utilities: parameters, bit masks, hashing and randomness
pub mod utilities;
/// RAPPOR noising mechanisms
pub mod mechanisms;
/// The encoder facade
pub mod encoder;

pub use encoder::{assign_cohort, Deps, EncodedReport, Encoder};
pub use utilities::bits::Bits;
pub use utilities::error::{RapporError, Result};
pub use utilities::hashing::{DigestWidth, HashFunction, HmacDrbg, HmacFunction, HmacSha256,
                             Md5, Sha256};
pub use utilities::params::Params;
pub use utilities::randomness::{GeneratorOpenSSL, IrrRand};
