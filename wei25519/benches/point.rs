//! Wei25519 `AffinePoint` benchmarks

use criterion::{
    black_box, criterion_group, criterion_main, measurement::Measurement, BenchmarkGroup, Criterion,
};
use hex_literal::hex;
use wei25519::{AffinePoint, FieldBytes, FieldElement, Scalar};

fn test_scalar() -> Scalar {
    let bytes = hex!("f642eddaed12dca331d76a2e24e06039a0077f4b5b627cfcecff53c20cbf1e4f");
    Scalar::from_bytes_reduced(FieldBytes::from_slice(&bytes))
}

fn bench_field_invert<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let x = AffinePoint::GENERATOR.x();
    group.bench_function("field invert", |b| b.iter(|| black_box(x).invert()));
}

fn bench_point_add<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let p = AffinePoint::GENERATOR;
    let q = p.double();
    group.bench_function("point add", |b| b.iter(|| black_box(p) + black_box(q)));
    group.bench_function("point double", |b| b.iter(|| black_box(q).double()));
}

fn bench_point_mul<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let s = test_scalar();
    group.bench_function("mul_by_generator", |b| {
        b.iter(|| AffinePoint::mul_by_generator(&black_box(s)))
    });
}

fn bench_montgomery<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let p = AffinePoint::mul_by_generator(&test_scalar());
    group.bench_function("to_montgomery", |b| b.iter(|| black_box(p).to_montgomery()));

    let u = FieldElement::from_u64(9);
    let m = wei25519::MontgomeryPoint::new(u, false);
    group.bench_function("lift", |b| b.iter(|| black_box(m).lift()));
}

fn bench_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("point operations");
    bench_field_invert(&mut group);
    bench_point_add(&mut group);
    bench_point_mul(&mut group);
    bench_montgomery(&mut group);
    group.finish();
}

criterion_group!(benches, bench_point);
criterion_main!(benches);
