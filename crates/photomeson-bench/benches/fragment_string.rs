//! Criterion benchmarks for Lund string fragmentation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use photomeson_core::{Flavor, FourVector, RngStream};
use photomeson_fragment::{FragmentationConfig, Fragmenter, Parton};
use photomeson_test_utils::standard_tables;

/// A `u`–`ud` string of mass `w` along the z axis.
fn string(w: f64) -> (Parton, Parton) {
    let diquark = Flavor::diquark(Flavor::UP, Flavor::DOWN, 0).unwrap();
    (
        Parton::new(Flavor::UP, FourVector::new(0.0, 0.0, -0.5 * w, 0.5 * w)),
        Parton::new(diquark, FourVector::new(0.0, 0.0, 0.5 * w, 0.5 * w)),
    )
}

fn bench_fragment_string(c: &mut Criterion) {
    let config = FragmentationConfig::default();
    let fragmenter = Fragmenter::new(&config, standard_tables());
    let mut group = c.benchmark_group("fragment_string");
    for w in [3.0, 10.0, 100.0] {
        let (a, b) = string(w);
        let mut rng = RngStream::new(7);
        group.bench_with_input(BenchmarkId::from_parameter(w), &w, |bench, _| {
            bench.iter(|| {
                // Rejected strings are part of the measured cost.
                let hadrons = fragmenter.fragment_string(&a, &b, &mut rng);
                black_box(hadrons.map(|h| h.len()).unwrap_or(0));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fragment_string);
criterion_main!(benches);
