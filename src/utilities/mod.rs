/// Fixed-width report masks
pub mod bits;
/// Error type shared by the crate
pub mod error;
/// Hash and HMAC capabilities
pub mod hashing;
/// Parameter definitions and validation
pub mod params;
/// Randomness sources for the IRR
pub mod randomness;
