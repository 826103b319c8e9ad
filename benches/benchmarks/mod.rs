pub mod encode_benchmark;
pub mod width_benchmark;
