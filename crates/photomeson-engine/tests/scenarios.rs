//! Integration test: physics scenarios near threshold and in the
//! ultra-relativistic regime of cosmic-ray nucleons on background photons.

use photomeson_core::{EventError, ParticleCode, Species};
use photomeson_engine::{EngineConfig, InteractionMode};
use photomeson_tables::THRESHOLD_S;
use photomeson_test_utils::{assert_conserved, context_with, seeded_context, standard_tables};

#[test]
fn delta_region_gives_nucleon_and_pion() {
    let config = EngineConfig {
        pions_stable: true,
        ..EngineConfig::default()
    };
    let mut ctx = context_with(config, 1);
    let mut resonant = 0;
    for _ in 0..200 {
        let record = ctx.generate_at(Species::Proton, 1e9, 1e-9, 1.2).unwrap();
        assert_eq!(record.len(), 2, "{:?}", record.particles);
        assert_conserved(&record, standard_tables(), Species::Proton, 1e-3);
        let codes: Vec<_> = record.particles.iter().map(|p| p.code).collect();
        assert!(
            codes == [ParticleCode::PROTON, ParticleCode::PI0]
                || codes == [ParticleCode::NEUTRON, ParticleCode::PI_PLUS],
            "{codes:?}"
        );
        if record.mode == Some(InteractionMode::Resonance) {
            resonant += 1;
        }
    }
    assert!(resonant > 150, "{resonant}");
}

#[test]
fn multiparticle_onset_never_exhausts_retries() {
    for (seed, species) in [(11, Species::Proton), (12, Species::Neutron)] {
        let mut ctx = seeded_context(seed);
        let mut multiparticle = 0;
        for _ in 0..1000 {
            match ctx.generate_at(species, 1e9, 1e-9, 1.95) {
                Ok(record) => {
                    assert_conserved(&record, standard_tables(), species, 1e-3);
                    if record.mode == Some(InteractionMode::Multiparticle) {
                        multiparticle += 1;
                    }
                }
                Err(e) => {
                    assert!(
                        !matches!(e, EventError::RetriesExhausted { .. }),
                        "{species:?}: {e}"
                    );
                }
            }
        }
        assert!(multiparticle > 50, "{species:?}: {multiparticle}");
    }
}

#[test]
fn delta_decay_products_are_fully_decayed_by_default() {
    let mut ctx = seeded_context(2);
    for _ in 0..100 {
        let record = ctx.generate_at(Species::Neutron, 1e9, 1e-9, 1.2).unwrap();
        assert_conserved(&record, standard_tables(), Species::Neutron, 1e-3);
        // π0 → γγ and π± → μ ν → e ν ν ν leave only stable leptons,
        // photons and the nucleon.
        assert!(record.len() >= 3);
        assert_eq!(
            record
                .particles
                .iter()
                .filter(|p| matches!(p.code, ParticleCode::PROTON | ParticleCode::NEUTRON))
                .count(),
            1
        );
    }
}

#[test]
fn nucleon_keeps_most_of_its_energy() {
    let e_nucleon = 1e11;
    let mut ctx = seeded_context(3);
    let mut fractions = Vec::new();
    for _ in 0..200 {
        let record = ctx.generate(Species::Proton, e_nucleon, 1e-9).unwrap();
        if record.is_empty() {
            continue;
        }
        assert!(record.s.is_some_and(|s| s >= THRESHOLD_S));
        let nucleon: f64 = record
            .particles
            .iter()
            .filter(|p| matches!(p.code, ParticleCode::PROTON | ParticleCode::NEUTRON))
            .map(|p| p.momentum.e)
            .sum();
        fractions.push(nucleon / e_nucleon);
    }
    assert!(fractions.len() > 150);
    let mean = fractions.iter().sum::<f64>() / fractions.len() as f64;
    // Mean inelasticity of photopion production lies between 0.2 and 0.5.
    assert!(mean > 0.3 && mean < 0.95, "{mean}");
}
