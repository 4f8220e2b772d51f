//! Criterion benchmarks for the decay-chain processor.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use photomeson_arena::{Entry, EventArena};
use photomeson_core::{FourVector, ParticleCode, ParticleTable, RngStream};
use photomeson_decay::{DecayConfig, DecayProcessor, StableSet};
use photomeson_test_utils::standard_tables;

/// Unstable hadrons typical of a multiparticle event.
const PARENTS: [ParticleCode; 6] = [
    ParticleCode::DELTA_PP,
    ParticleCode::RHO0,
    ParticleCode::OMEGA,
    ParticleCode::ETA,
    ParticleCode::K0,
    ParticleCode::SIGMA0,
];

fn bench_decay_chain(c: &mut Criterion) {
    let tables = standard_tables();
    let config = DecayConfig::default();
    let processor = DecayProcessor::new(&config);
    let stable = StableSet::standard(false);
    let mut arena = EventArena::with_capacity(2000);
    let mut rng = RngStream::new(3);

    c.bench_function("decay_chain", |b| {
        b.iter(|| {
            arena.reset();
            for (i, &code) in PARENTS.iter().enumerate() {
                let mass = tables.mass(code).unwrap();
                let p = FourVector::on_shell(0.1 * i as f64, 0.0, 1.0, mass);
                arena.push(Entry::new(code, p, mass)).unwrap();
            }
            let decays = processor.run(&mut arena, tables, &stable, &mut rng).unwrap();
            black_box(decays);
        });
    });
}

criterion_group!(benches, bench_decay_chain);
criterion_main!(benches);
