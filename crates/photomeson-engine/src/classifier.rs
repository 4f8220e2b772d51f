//! Interaction classification.

use std::fmt;

use photomeson_core::{Species, UniformSource};
use photomeson_tables::CrossSections;

/// Interaction mode of one photon–nucleon event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    /// s-channel baryon resonance.
    Resonance,
    /// t-channel `γN → N′π`.
    DirectSinglePion,
    /// t-channel `γN → Δπ`.
    DirectDeltaPion,
    /// Diffractive `γN → Nρ0`.
    DiffractiveRho,
    /// Diffractive `γN → Nω`.
    DiffractiveOmega,
    /// String fragmentation of the multiparticle background.
    Multiparticle,
}

impl InteractionMode {
    /// All modes in the order of [`CrossSections::as_array`].
    pub const ALL: [Self; 6] = [
        Self::Resonance,
        Self::DirectSinglePion,
        Self::DirectDeltaPion,
        Self::DiffractiveRho,
        Self::DiffractiveOmega,
        Self::Multiparticle,
    ];

    /// Position in [`Self::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Resonance => 0,
            Self::DirectSinglePion => 1,
            Self::DirectDeltaPion => 2,
            Self::DiffractiveRho => 3,
            Self::DiffractiveOmega => 4,
            Self::Multiparticle => 5,
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Resonance => "resonance",
            Self::DirectSinglePion => "direct N pi",
            Self::DirectDeltaPion => "direct Delta pi",
            Self::DiffractiveRho => "diffractive rho",
            Self::DiffractiveOmega => "diffractive omega",
            Self::Multiparticle => "multiparticle",
        };
        f.write_str(name)
    }
}

/// Pick the interaction mode at nucleon-frame photon energy `eps_prime`
/// with one cumulative draw over the six partial cross sections.
///
/// `None` below threshold, where every partial cross section vanishes.
pub fn classify(
    eps_prime: f64,
    species: Species,
    rng: &mut dyn UniformSource,
) -> Option<InteractionMode> {
    let weights = CrossSections::at(species, eps_prime).as_array();
    rng.pick_weighted(&weights).map(|i| InteractionMode::ALL[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use photomeson_core::RngStream;
    use photomeson_tables::cross_section::photon_energy_nucleon_frame;

    #[test]
    fn index_matches_order() {
        for (i, mode) in InteractionMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
        }
    }

    #[test]
    fn below_threshold_is_unclassified() {
        let mut rng = RngStream::new(1);
        assert_eq!(classify(0.1, Species::Proton, &mut rng), None);
    }

    #[test]
    fn delta_region_is_mostly_resonant() {
        let mut rng = RngStream::new(2);
        let eps = photon_energy_nucleon_frame(1.2);
        let resonant = (0..2000)
            .filter(|_| classify(eps, Species::Proton, &mut rng) == Some(InteractionMode::Resonance))
            .count();
        // σ_Δ ≈ 200 μb against ≈ 37 μb of direct pion production.
        assert!(resonant > 1550, "{resonant}");
    }

    #[test]
    fn high_energy_is_mostly_multiparticle() {
        let mut rng = RngStream::new(3);
        let mut counts = [0usize; 6];
        for _ in 0..2000 {
            let mode = classify(100.0, Species::Neutron, &mut rng).unwrap();
            counts[mode.index()] += 1;
        }
        assert!(counts[InteractionMode::Multiparticle.index()] > 1600, "{counts:?}");
        assert!(counts[InteractionMode::DiffractiveRho.index()] > 50, "{counts:?}");
    }
}
