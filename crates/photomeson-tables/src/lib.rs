//! Read-only physics data for the photomeson event generator.
//!
//! [`StandardTables`] implements [`ParticleTable`] over the built-in
//! particle records and decay tables. The resonance table and the
//! cross-section parameterisation are exposed as plain constants and
//! functions, since they are consumed only by the interaction classifier
//! and the resonance engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cross_section;
mod decays;
pub mod particles;
pub mod resonances;

use indexmap::IndexMap;
use photomeson_core::{DecayChannel, ParticleCode, ParticleTable, Species};

pub use cross_section::{CrossSections, THRESHOLD_S};
pub use particles::{ParticleRecord, NUCLEON_MASS};
pub use resonances::{ChannelKind, Isospin, Resonance, RESONANCES};

/// The built-in particle and decay tables.
///
/// Lookups go through `IndexMap` so that iteration over records follows
/// table order, keeping any code that walks the table deterministic.
#[derive(Clone, Debug)]
pub struct StandardTables {
    records: IndexMap<ParticleCode, ParticleRecord>,
    decays: IndexMap<ParticleCode, Vec<DecayChannel>>,
}

impl StandardTables {
    /// Build the tables.
    pub fn new() -> Self {
        let mut records = IndexMap::new();
        for r in particles::all_records() {
            records.insert(r.code, r);
        }
        for species in [Species::Proton, Species::Neutron] {
            for (i, res) in RESONANCES.iter().enumerate() {
                let code = ParticleCode::resonance(species, i);
                let (pdg_plus, pdg_zero) = particles::RESONANCE_PDG[i];
                let (suffix, pdg) = match species {
                    Species::Proton => ("+", pdg_plus),
                    Species::Neutron => ("0", pdg_zero),
                };
                records.insert(
                    code,
                    ParticleRecord {
                        code,
                        name: format!("{}{suffix}", res.name),
                        mass: res.mass,
                        width: res.width,
                        charge: species.charge(),
                        baryon_number: 1,
                        pdg,
                    },
                );
            }
        }

        let mut decays: IndexMap<ParticleCode, Vec<DecayChannel>> = IndexMap::new();
        for (code, mut channels) in decays::base_decay_tables() {
            decays::normalise(&mut channels);
            let conj = code.conjugate();
            if conj != code && !decays.contains_key(&conj) {
                decays.insert(conj, channels.iter().map(DecayChannel::conjugate).collect());
            }
            decays.insert(code, channels);
        }

        Self { records, decays }
    }

    /// Full record of a particle.
    pub fn record(&self, code: ParticleCode) -> Option<&ParticleRecord> {
        self.records.get(&code)
    }

    /// All records in table order.
    pub fn records(&self) -> impl Iterator<Item = &ParticleRecord> {
        self.records.values()
    }

    /// Codes that carry a decay table.
    pub fn unstable_codes(&self) -> impl Iterator<Item = ParticleCode> + '_ {
        self.decays.keys().copied()
    }
}

impl Default for StandardTables {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleTable for StandardTables {
    fn mass(&self, code: ParticleCode) -> Option<f64> {
        self.records.get(&code).map(|r| r.mass)
    }

    fn width(&self, code: ParticleCode) -> Option<f64> {
        self.records.get(&code).map(|r| r.width)
    }

    fn charge(&self, code: ParticleCode) -> Option<i32> {
        self.records.get(&code).map(|r| r.charge)
    }

    fn baryon_number(&self, code: ParticleCode) -> Option<i32> {
        self.records.get(&code).map(|r| r.baryon_number)
    }

    fn pdg_id(&self, code: ParticleCode) -> Option<i32> {
        self.records.get(&code).map(|r| r.pdg)
    }

    fn name(&self, code: ParticleCode) -> Option<&str> {
        self.records.get(&code).map(|r| r.name.as_str())
    }

    fn decay_channels(&self, code: ParticleCode) -> Option<&[DecayChannel]> {
        self.decays.get(&code).map(Vec::as_slice)
    }
}
