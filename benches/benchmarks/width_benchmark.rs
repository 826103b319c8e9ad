use criterion::{black_box, criterion_group, BenchmarkId, Criterion};
use rappor::{Deps, Encoder, GeneratorOpenSSL, HmacDrbg, Md5, Params};

/// HMAC_DRBG output grows with the report width; measure how encoding scales.
pub fn width_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode by width");
    for &num_bits in &[32u32, 64, 128, 256] {
        let params = Params::new(num_bits, 2, 128, 0.25, 0.75, 0.5).unwrap();
        let deps = Deps::new(3, Md5, "client-secret", HmacDrbg, GeneratorOpenSSL);
        let encoder = Encoder::new("bench", params, deps).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(num_bits), &encoder, |b, e| {
            b.iter(|| e.encode(black_box(b"foo")).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, width_benchmark);
