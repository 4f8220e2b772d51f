//! Test utilities for photomeson development.
//!
//! Provides a [`ScriptedStream`] that replays fixed uniforms, a shared
//! [`standard_tables`] instance with a [`seeded_context`] built on it,
//! and event-level assertions ([`assert_conserved`], [`event_hash`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::OnceLock;

use photomeson_core::{ParticleTable, Species, UniformSource};
use photomeson_engine::{EngineConfig, EventContext, EventRecord};
use photomeson_tables::StandardTables;

/// Replays a fixed sequence of uniforms, starting over at the end.
///
/// Handy for driving a sampling routine down a chosen branch.
#[derive(Clone, Debug)]
pub struct ScriptedStream {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedStream {
    /// A stream cycling through `values`.
    ///
    /// # Panics
    ///
    /// If `values` is empty or holds a value outside `[0, 1)`.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "scripted stream needs at least one value");
        assert!(
            values.iter().all(|v| (0.0..1.0).contains(v)),
            "scripted values must lie in [0, 1)"
        );
        Self { values, next: 0 }
    }

    /// Uniforms handed out so far.
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl UniformSource for ScriptedStream {
    fn uniform(&mut self) -> f64 {
        let v = self.values[self.next % self.values.len()];
        self.next += 1;
        v
    }
}

/// Process-wide built-in tables.
pub fn standard_tables() -> &'static StandardTables {
    static TABLES: OnceLock<StandardTables> = OnceLock::new();
    TABLES.get_or_init(StandardTables::new)
}

/// A default-configured context over [`standard_tables`].
pub fn seeded_context(seed: u64) -> EventContext<'static> {
    context_with(EngineConfig::default(), seed)
}

/// A context with `config` over [`standard_tables`].
///
/// # Panics
///
/// If `config` does not validate.
pub fn context_with(config: EngineConfig, seed: u64) -> EventContext<'static> {
    match EventContext::new(config, standard_tables(), seed) {
        Ok(ctx) => ctx,
        Err(e) => panic!("invalid test config: {e}"),
    }
}

/// Assert that `record` carries the charge and baryon number of a
/// `species` nucleon and the incident four-momentum within `tolerance`
/// relative to the incident energy. Empty records pass.
pub fn assert_conserved(
    record: &EventRecord,
    tables: &dyn ParticleTable,
    species: Species,
    tolerance: f64,
) {
    if record.is_empty() {
        return;
    }
    let incident = record
        .incident
        .unwrap_or_else(|| panic!("non-empty record without incident momentum"));
    let mut charge = 0;
    let mut baryons = 0;
    for p in &record.particles {
        charge += tables
            .charge(p.code)
            .unwrap_or_else(|| panic!("no charge for {}", p.code));
        baryons += tables
            .baryon_number(p.code)
            .unwrap_or_else(|| panic!("no baryon number for {}", p.code));
        assert!(p.momentum.is_finite(), "non-finite momentum for {}", p.code);
    }
    assert_eq!(charge, species.charge(), "charge");
    assert_eq!(baryons, 1, "baryon number");
    let total = record.total_momentum();
    let diff = total.max_abs_diff(&incident);
    assert!(
        diff <= tolerance * incident.e,
        "four-momentum off by {diff}: {total:?} vs {incident:?}"
    );
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

fn fnv1a(hash: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(hash, |h, &b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME))
}

/// FNV-1a hash over codes and exact momentum bits of every particle.
///
/// Two runs with the same seed must give the same hash.
pub fn event_hash(record: &EventRecord) -> u64 {
    let mut h = FNV_OFFSET;
    for p in &record.particles {
        h = fnv1a(h, &p.code.raw().to_le_bytes());
        h = fnv1a(h, &p.pdg.to_le_bytes());
        for x in [p.momentum.px, p.momentum.py, p.momentum.pz, p.momentum.e, p.mass] {
            h = fnv1a(h, &x.to_bits().to_le_bytes());
        }
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_stream_cycles() {
        let mut s = ScriptedStream::new([0.1, 0.5]);
        let got: Vec<f64> = (0..5).map(|_| s.uniform()).collect();
        assert_eq!(got, [0.1, 0.5, 0.1, 0.5, 0.1]);
        assert_eq!(s.consumed(), 5);
    }

    #[test]
    #[should_panic(expected = "at least one value")]
    fn empty_script_panics() {
        let _ = ScriptedStream::new(Vec::<f64>::new());
    }

    #[test]
    fn fnv_matches_reference() {
        // FNV-1a of "a".
        assert_eq!(fnv1a(FNV_OFFSET, b"a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(event_hash(&EventRecord::default()), FNV_OFFSET);
    }

    #[test]
    fn empty_records_are_conserved() {
        assert_conserved(
            &EventRecord::default(),
            standard_tables(),
            Species::Proton,
            1e-3,
        );
    }
}
