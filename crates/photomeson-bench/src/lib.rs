//! Benchmark profiles for the photomeson event generator.
//!
//! Each [`Profile`] fixes a nucleon species and the lab energies of the
//! pair, optionally pinning the invariant mass:
//!
//! - [`delta_profile`]: cosmic-ray proton on a background photon at the
//!   Δ(1232) peak
//! - [`sampled_profile`]: the same pair with `s` drawn by the sampler
//! - [`multiparticle_profile`]: a neutron at `s = 100 GeV²`, dominated by
//!   string fragmentation

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use photomeson_core::{EventError, Species};
use photomeson_engine::{EventContext, EventRecord};

/// A fixed collision setup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Profile {
    /// Name used as the benchmark id.
    pub name: &'static str,
    /// Incident nucleon.
    pub species: Species,
    /// Nucleon lab energy in GeV.
    pub e_nucleon: f64,
    /// Photon lab energy in GeV.
    pub e_photon: f64,
    /// Fixed invariant mass squared, or `None` to sample it.
    pub s: Option<f64>,
}

impl Profile {
    /// Generate one event of this profile in `ctx`.
    pub fn generate(&self, ctx: &mut EventContext<'_>) -> Result<EventRecord, EventError> {
        match self.s {
            Some(s) => ctx.generate_at(self.species, self.e_nucleon, self.e_photon, s),
            None => ctx.generate(self.species, self.e_nucleon, self.e_photon),
        }
    }
}

/// Proton at 1e9 GeV on a 1e-9 GeV photon, pinned to `s = 1.5 GeV²`.
pub fn delta_profile() -> Profile {
    Profile {
        name: "delta",
        species: Species::Proton,
        e_nucleon: 1e9,
        e_photon: 1e-9,
        s: Some(1.5),
    }
}

/// Proton at 1e11 GeV on a 1e-9 GeV photon with sampled `s`.
pub fn sampled_profile() -> Profile {
    Profile {
        name: "sampled",
        species: Species::Proton,
        e_nucleon: 1e11,
        e_photon: 1e-9,
        s: None,
    }
}

/// Neutron at 1e3 GeV on a 1 GeV photon, pinned to `s = 100 GeV²`.
pub fn multiparticle_profile() -> Profile {
    Profile {
        name: "multiparticle",
        species: Species::Neutron,
        e_nucleon: 1e3,
        e_photon: 1.0,
        s: Some(100.0),
    }
}

/// All profiles in benchmark order.
pub fn profiles() -> [Profile; 3] {
    [delta_profile(), sampled_profile(), multiparticle_profile()]
}
