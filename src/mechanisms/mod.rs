/// Bloom filter construction
pub mod bloom;
/// Permanent randomized response
pub mod prr;
/// Instantaneous randomized response
pub mod irr;
