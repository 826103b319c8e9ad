use criterion::{black_box, criterion_group, Criterion};
use rappor::{Deps, Encoder, GeneratorOpenSSL, HmacSha256, Md5, Params};

/// Encoding cost at the usual 32-bit setting, per pipeline stage.
pub fn encode_benchmark(c: &mut Criterion) {
    let params = Params::new(32, 2, 128, 0.25, 0.75, 0.5).unwrap();
    let deps = Deps::new(3, Md5, "client-secret", HmacSha256, GeneratorOpenSSL);
    let encoder = Encoder::new("bench", params, deps).unwrap();

    c.bench_function("encode 32 bits", |b| {
        b.iter(|| encoder.encode(black_box(b"foo")).unwrap())
    });
    c.bench_function("encode_internal 32 bits", |b| {
        b.iter(|| encoder.encode_internal(black_box(b"foo")).unwrap())
    });
}

criterion_group!(benches, encode_benchmark);
