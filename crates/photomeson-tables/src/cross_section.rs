//! Photon–nucleon cross-section parameterisation.
//!
//! All cross sections are in μb and take the photon energy in the nucleon
//! rest frame, `ε′ = (s − m²)/(2m)`, in GeV. The total splits into six
//! exclusive contributions matching the interaction modes: resonance
//! excitation, two direct channels, two diffractive channels and the
//! multiparticle background.

use photomeson_core::Species;

use crate::particles::NUCLEON_MASS;
use crate::resonances::{Resonance, RESONANCES, RESONANCE_COUNT};

/// Lowest invariant mass squared (GeV²) at which photopion production
/// is possible.
pub const THRESHOLD_S: f64 = 1.1646;

/// `ħ²c²` in μb·GeV².
const HBARC2_MICROBARN: f64 = 389.379;

/// Centre-of-mass energy squared for a nucleon-frame photon energy.
pub fn invariant_mass_squared(eps_prime: f64) -> f64 {
    NUCLEON_MASS * NUCLEON_MASS + 2.0 * NUCLEON_MASS * eps_prime
}

/// Photon energy in the nucleon rest frame for invariant mass squared `s`.
pub fn photon_energy_nucleon_frame(s: f64) -> f64 {
    (s - NUCLEON_MASS * NUCLEON_MASS) / (2.0 * NUCLEON_MASS)
}

/// Photon momentum in the centre-of-mass frame.
fn cm_photon_momentum(s: f64) -> f64 {
    (s - NUCLEON_MASS * NUCLEON_MASS) / (2.0 * s.sqrt())
}

/// Threshold power law `Pl(x, th, max, α)`.
///
/// Rises from zero at `th`, peaks at `max` and falls as `x^-α` above it.
pub fn threshold_power_law(x: f64, threshold: f64, max: f64, alpha: f64) -> f64 {
    if x <= threshold {
        return 0.0;
    }
    let a = alpha * max / threshold;
    ((x - threshold) / (max - threshold)).powf(a - alpha) * (x / max).powf(-a)
}

/// Linear ramp from zero at `threshold` to one at `threshold + width`.
pub fn linear_ramp(x: f64, threshold: f64, width: f64) -> f64 {
    if x <= threshold {
        0.0
    } else if x < threshold + width {
        (x - threshold) / width
    } else {
        1.0
    }
}

/// Peak cross section of a resonance in μb.
pub fn resonance_peak(res: &Resonance, species: Species) -> f64 {
    let k = cm_photon_momentum(res.mass * res.mass);
    let spin_factor = (f64::from(res.two_j) + 1.0) / 4.0;
    4.0 * std::f64::consts::PI / (k * k) * spin_factor * res.b_gamma(species) * HBARC2_MICROBARN
}

/// Breit–Wigner cross section of one resonance in μb.
pub fn resonance_cross_section(res: &Resonance, species: Species, eps_prime: f64) -> f64 {
    let s = invariant_mass_squared(eps_prime);
    if s <= THRESHOLD_S {
        return 0.0;
    }
    let k = cm_photon_momentum(s);
    let k_r = cm_photon_momentum(res.mass * res.mass);
    let gm2 = (res.width * res.mass).powi(2);
    let ds = s - res.mass * res.mass;
    resonance_peak(res, species) * (k_r / k).powi(2) * gm2 / (ds * ds + gm2)
}

/// Cross sections of all tabulated resonances, in table order.
pub fn resonance_cross_sections(species: Species, eps_prime: f64) -> [f64; RESONANCE_COUNT] {
    let mut out = [0.0; RESONANCE_COUNT];
    for (o, res) in out.iter_mut().zip(RESONANCES.iter()) {
        *o = resonance_cross_section(res, species, eps_prime);
    }
    out
}

/// Direct single-pion production (`γN → N′π`) in μb.
pub fn direct_single_pion(eps_prime: f64) -> f64 {
    92.7 * threshold_power_law(eps_prime, 0.152, 0.25, 2.0)
}

/// Direct Δπ production in μb.
pub fn direct_delta_pion(eps_prime: f64) -> f64 {
    37.7 * threshold_power_law(eps_prime, 0.4, 0.6, 2.0)
}

/// Reggeon (one-string) part of the high-energy cross section in μb.
pub fn high_energy_reggeon(s: f64) -> f64 {
    29.3 * s.powf(-0.34)
}

/// Pomeron (two-string) part of the high-energy cross section in μb.
pub fn high_energy_pomeron(s: f64) -> f64 {
    59.3 * s.powf(0.095)
}

/// Total high-energy cross section in μb.
pub fn high_energy_total(s: f64) -> f64 {
    high_energy_reggeon(s) + high_energy_pomeron(s)
}

/// Diffractive ρ0 production in μb.
pub fn diffractive_rho(eps_prime: f64) -> f64 {
    let s = invariant_mass_squared(eps_prime);
    0.075 * linear_ramp(eps_prime, 0.85, 0.4) * high_energy_total(s)
}

/// Diffractive ω production in μb.
pub fn diffractive_omega(eps_prime: f64) -> f64 {
    let s = invariant_mass_squared(eps_prime);
    0.0085 * linear_ramp(eps_prime, 1.11, 0.3) * high_energy_total(s)
}

/// Non-diffractive multiparticle production in μb.
pub fn multiparticle(eps_prime: f64) -> f64 {
    let s = invariant_mass_squared(eps_prime);
    let ramped = linear_ramp(eps_prime, 0.5, 0.1) * high_energy_total(s);
    (ramped - diffractive_rho(eps_prime) - diffractive_omega(eps_prime)).max(0.0)
}

/// Probability that a multiparticle event has one-string topology.
pub fn one_string_fraction(s: f64) -> f64 {
    let total = high_energy_total(s);
    if total > 0.0 {
        high_energy_reggeon(s) / total
    } else {
        0.0
    }
}

/// The six exclusive contributions at one energy, in μb.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CrossSections {
    /// Sum over the resonance table.
    pub resonance: f64,
    /// Direct `N′π`.
    pub direct_single_pion: f64,
    /// Direct `Δπ`.
    pub direct_delta_pion: f64,
    /// Diffractive `Nρ0`.
    pub diffractive_rho: f64,
    /// Diffractive `Nω`.
    pub diffractive_omega: f64,
    /// Multiparticle background.
    pub multiparticle: f64,
}

impl CrossSections {
    /// Evaluate every contribution.
    pub fn at(species: Species, eps_prime: f64) -> Self {
        if invariant_mass_squared(eps_prime) < THRESHOLD_S {
            return Self::default();
        }
        Self {
            resonance: resonance_cross_sections(species, eps_prime).iter().sum(),
            direct_single_pion: direct_single_pion(eps_prime),
            direct_delta_pion: direct_delta_pion(eps_prime),
            diffractive_rho: diffractive_rho(eps_prime),
            diffractive_omega: diffractive_omega(eps_prime),
            multiparticle: multiparticle(eps_prime),
        }
    }

    /// Contributions in classification order.
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.resonance,
            self.direct_single_pion,
            self.direct_delta_pion,
            self.diffractive_rho,
            self.diffractive_omega,
            self.multiparticle,
        ]
    }

    /// Total cross section.
    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

/// Total photon–nucleon cross section in μb.
pub fn total_cross_section(species: Species, eps_prime: f64) -> f64 {
    CrossSections::at(species, eps_prime).total()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resonances::DELTA_1232;
    use proptest::prelude::*;

    #[test]
    fn delta_peak_is_about_four_hundred_microbarn() {
        let peak = resonance_peak(&RESONANCES[DELTA_1232], Species::Proton);
        assert!((380.0..450.0).contains(&peak), "peak {peak}");
    }

    #[test]
    fn delta_dominates_near_threshold() {
        let eps = photon_energy_nucleon_frame(1.2);
        let xs = CrossSections::at(Species::Proton, eps);
        assert!(xs.resonance > 0.0);
        assert!(xs.resonance > 3.0 * xs.direct_single_pion);
        assert_eq!(xs.multiparticle, 0.0);
        assert_eq!(xs.diffractive_rho, 0.0);
    }

    #[test]
    fn below_threshold_is_zero() {
        let eps = photon_energy_nucleon_frame(1.16);
        assert_eq!(total_cross_section(Species::Neutron, eps), 0.0);
    }

    #[test]
    fn power_law_peaks_at_one() {
        assert!((threshold_power_law(0.25, 0.152, 0.25, 2.0) - 1.0).abs() < 1e-12);
        assert_eq!(threshold_power_law(0.1, 0.152, 0.25, 2.0), 0.0);
    }

    #[test]
    fn high_energy_is_dominated_by_multiparticle() {
        let eps = photon_energy_nucleon_frame(100.0);
        let xs = CrossSections::at(Species::Proton, eps);
        assert!(xs.multiparticle > 0.8 * xs.total());
        let frac = one_string_fraction(100.0);
        assert!(frac > 0.0 && frac < 0.2, "fraction {frac}");
    }

    proptest! {
        #[test]
        fn contributions_are_non_negative(eps in 0.0f64..1000.0) {
            for species in [Species::Proton, Species::Neutron] {
                let xs = CrossSections::at(species, eps);
                for v in xs.as_array() {
                    prop_assert!(v >= 0.0 && v.is_finite());
                }
            }
        }
    }
}
