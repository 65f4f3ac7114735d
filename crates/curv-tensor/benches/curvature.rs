use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curv_metric::constants::M_SUN;
use curv_metric::families::Schwarzschild;
use curv_metric::PhysicalConstants;
use curv_tensor::{ConnectionBuilder, CurvatureEngine, CurvatureStrategy};

fn bench_curvature(c: &mut Criterion) {
    let m = Schwarzschild::new(M_SUN, PhysicalConstants::si());
    let x = [0.0, 10.0 * m.r_s(), std::f64::consts::FRAC_PI_2, 0.0];

    c.bench_function("christoffel_schwarzschild", |b| {
        let builder = ConnectionBuilder::default();
        b.iter(|| builder.christoffel(black_box(&m), black_box(&x)).unwrap())
    });

    c.bench_function("ricci_direct", |b| {
        let engine = CurvatureEngine::new(CurvatureStrategy::DirectRicci);
        b.iter(|| engine.ricci(black_box(&m), black_box(&x)).unwrap())
    });

    c.bench_function("ricci_full_riemann", |b| {
        let engine = CurvatureEngine::new(CurvatureStrategy::FullRiemann);
        b.iter(|| engine.ricci(black_box(&m), black_box(&x)).unwrap())
    });

    c.bench_function("kretschmann", |b| {
        let engine = CurvatureEngine::new(CurvatureStrategy::FullRiemann);
        b.iter(|| engine.kretschmann(black_box(&m), black_box(&x)).unwrap())
    });
}

criterion_group!(benches, bench_curvature);
criterion_main!(benches);
