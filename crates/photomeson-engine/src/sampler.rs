//! Invariant-mass sampling for a nucleon in an isotropic photon field.
//!
//! For a photon of lab energy ε hitting a nucleon of energy `E` at angle
//! θ, `s = m² + 2ε(E − p cos θ)`. Averaging over an isotropic field turns
//! the interaction rate into a density in `s` proportional to
//! `(s − m²)·σ(s)` on `[s_th, m² + 2ε(E + p)]`; the angle follows from
//! the sampled `s`.
//!
//! Below the pivot the density is sampled by rejection under a flat
//! envelope; above it under a power law `s^1.095`, inverted in closed
//! form. Envelope heights come from a scan of the density when the
//! sampler is built.

use photomeson_core::{EventError, FourVector, ParticleTable, Species, UniformSource};
use photomeson_tables::cross_section::{photon_energy_nucleon_frame, total_cross_section};
use photomeson_tables::{NUCLEON_MASS, THRESHOLD_S};
use tracing::warn;

use crate::config::SamplerConfig;

/// Grid points of the envelope scan below the pivot.
const LOW_SCAN_POINTS: usize = 2000;
/// Grid points per decade of the tail scan.
const TAIL_SCAN_PER_DECADE: usize = 50;
/// Highest `s` in GeV² covered by the tail scan.
const TAIL_SCAN_LIMIT: f64 = 1e14;

/// A nucleon of lab energy `e_nucleon` along +z meeting a photon of lab
/// energy `e_photon`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collision {
    /// Incident nucleon.
    pub species: Species,
    /// Nucleon mass in GeV.
    pub mass: f64,
    /// Nucleon lab energy in GeV.
    pub e_nucleon: f64,
    /// Photon lab energy in GeV.
    pub e_photon: f64,
}

impl Collision {
    /// Check the energies and take the nucleon mass from `tables`.
    pub fn new(
        species: Species,
        tables: &dyn ParticleTable,
        e_nucleon: f64,
        e_photon: f64,
    ) -> Result<Self, EventError> {
        let mass = tables.require_mass(species.code())?;
        if !e_nucleon.is_finite() || e_nucleon < mass {
            return Err(EventError::InvalidInput {
                reason: format!("nucleon energy {e_nucleon} GeV is below its mass {mass} GeV"),
            });
        }
        if !e_photon.is_finite() || e_photon <= 0.0 {
            return Err(EventError::InvalidInput {
                reason: format!("photon energy must be finite and positive, got {e_photon}"),
            });
        }
        Ok(Self {
            species,
            mass,
            e_nucleon,
            e_photon,
        })
    }

    /// Nucleon lab momentum.
    pub fn nucleon_momentum(&self) -> f64 {
        let (e, m) = (self.e_nucleon, self.mass);
        ((e - m) * (e + m)).max(0.0).sqrt()
    }

    /// `E − p`, computed without cancellation.
    fn energy_minus_momentum(&self) -> f64 {
        self.mass * self.mass / (self.e_nucleon + self.nucleon_momentum())
    }

    /// `s` at lab angle `cos` between photon and nucleon.
    pub fn invariant_mass_squared(&self, cos: f64) -> f64 {
        let p = self.nucleon_momentum();
        self.mass * self.mass
            + 2.0 * self.e_photon * (self.energy_minus_momentum() + p * (1.0 - cos))
    }

    /// Highest `s`, reached head-on.
    pub fn max_invariant_mass_squared(&self) -> f64 {
        self.invariant_mass_squared(-1.0)
    }

    /// Cosine of the lab angle between photon and nucleon that yields `s`.
    ///
    /// Clamped to `[-1, 1]` against rounding at the ends of the range.
    pub fn incidence_cosine(&self, s: f64) -> f64 {
        let p = self.nucleon_momentum();
        if p <= 0.0 {
            return 0.0;
        }
        let x = (s - self.mass * self.mass) / (2.0 * self.e_photon);
        (1.0 - (x - self.energy_minus_momentum()) / p).clamp(-1.0, 1.0)
    }

    /// Photon lab momentum at incidence `cos` and azimuth `phi`.
    pub fn photon_momentum(&self, cos: f64, phi: f64) -> FourVector {
        let sin = (1.0 - cos * cos).max(0.0).sqrt();
        let (sp, cp) = phi.sin_cos();
        let e = self.e_photon;
        FourVector::new(e * sin * cp, e * sin * sp, e * cos, e)
    }

    /// Total lab four-momentum of nucleon and photon.
    pub fn total_momentum(&self, cos: f64, phi: f64) -> FourVector {
        FourVector::new(0.0, 0.0, self.nucleon_momentum(), self.e_nucleon)
            + self.photon_momentum(cos, phi)
    }

    /// Polar and azimuthal angle of the nucleon in the centre-of-mass
    /// frame, with axes parallel to the lab axes.
    ///
    /// The component transverse to the boost is boost invariant and the
    /// longitudinal one follows from the centre-of-mass momentum, so
    /// nothing cancels at `γ ≈ 1e9`.
    pub fn cm_nucleon_direction(&self, cos: f64, phi: f64) -> (f64, f64) {
        let total = self.total_momentum(cos, phi);
        let p_total = total.p_abs();
        if p_total <= 0.0 {
            return (0.0, 0.0);
        }
        let s = self.invariant_mass_squared(cos);
        let k = (s - self.mass * self.mass) / (2.0 * s.sqrt());
        let p = self.nucleon_momentum();
        let pt2 = total.pt2();

        // Transverse part of (0, 0, p) with respect to the boost axis.
        let f = p / (p_total * p_total);
        let trans = [-f * total.pz * total.px, -f * total.pz * total.py, f * pt2];
        let pt = p * pt2.sqrt() / p_total;

        // Sign of β − cos(photon, boost), expanded to avoid E − p cos θ.
        let e_minus_p = self.energy_minus_momentum();
        let one_minus_cos = 1.0 - cos;
        let forward = p * (self.e_nucleon * one_minus_cos - e_minus_p)
            - self.e_photon * (e_minus_p + p * one_minus_cos);
        let long = (k * k - pt * pt).max(0.0).sqrt() * if forward < 0.0 { -1.0 } else { 1.0 };

        let d = FourVector::new(
            trans[0] + long * total.px / p_total,
            trans[1] + long * total.py / p_total,
            trans[2] + long * total.pz / p_total,
            k,
        );
        (d.theta(), d.phi())
    }
}

/// Sampling density `(s − m²)·σ(s)` in arbitrary units, `m` the mass of
/// the incident nucleon. The cross section is parameterised in `ε′` over
/// the shared nucleon mass.
fn density(species: Species, mass: f64, s: f64) -> f64 {
    let eps = photon_energy_nucleon_frame(s);
    (s - mass * mass).max(0.0) * total_cross_section(species, eps)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Envelope {
    /// Flat height on `[s_th, pivot]`.
    low: f64,
    /// Normalisation `C` of the tail `C·s^a`.
    tail: f64,
}

/// Draws `s` for one nucleon–photon pair.
#[derive(Clone, Debug)]
pub struct InvariantMassSampler {
    config: SamplerConfig,
    envelopes: [Envelope; 2],
}

impl InvariantMassSampler {
    /// Build a sampler, scanning the density of both nucleon species with
    /// their masses from `tables`.
    ///
    /// A species missing from `tables` is scanned with the shared nucleon
    /// mass; [`Collision::new`] rejects it before any sampling happens.
    pub fn new(config: &SamplerConfig, tables: &dyn ParticleTable) -> Self {
        let envelopes = [Species::Proton, Species::Neutron].map(|sp| {
            let mass = tables.mass(sp.code()).unwrap_or(NUCLEON_MASS);
            scan(config, sp, mass)
        });
        Self {
            config: config.clone(),
            envelopes,
        }
    }

    fn envelope(&self, species: Species) -> Envelope {
        match species {
            Species::Proton => self.envelopes[0],
            Species::Neutron => self.envelopes[1],
        }
    }

    /// Sample `s`, or `None` if even a head-on collision stays below
    /// the threshold.
    ///
    /// After `max_attempts` rejections the last candidate is returned and
    /// a warning is logged; the candidate lies inside the allowed range.
    pub fn sample(&self, collision: &Collision, rng: &mut dyn UniformSource) -> Option<f64> {
        let species = collision.species;
        let s_lo = THRESHOLD_S;
        let s_hi = collision.max_invariant_mass_squared();
        if s_hi <= s_lo {
            return None;
        }
        let env = self.envelope(species);
        let pivot = self.config.pivot;
        let a1 = self.config.tail_exponent + 1.0;

        let low_hi = s_hi.min(pivot);
        let w_low = env.low * (low_hi - s_lo);
        let (tail_lo, tail_hi) = (pivot.powf(a1), s_hi.powf(a1));
        let w_tail = if s_hi > pivot {
            env.tail * (tail_hi - tail_lo) / a1
        } else {
            0.0
        };

        let mut last = s_lo;
        for _ in 0..self.config.max_attempts {
            let (s, height) = if rng.uniform() * (w_low + w_tail) < w_low {
                (s_lo + (low_hi - s_lo) * rng.uniform(), env.low)
            } else {
                let s = (tail_lo + rng.uniform() * (tail_hi - tail_lo)).powf(1.0 / a1);
                (s, env.tail * s.powf(self.config.tail_exponent))
            };
            last = s.clamp(s_lo, s_hi);
            if rng.uniform() * height <= density(species, collision.mass, last) {
                return Some(last);
            }
        }
        warn!(
            attempts = self.config.max_attempts,
            s = last,
            "invariant-mass sampler exhausted, returning last attempt"
        );
        Some(last)
    }
}

fn scan(config: &SamplerConfig, species: Species, mass: f64) -> Envelope {
    let (lo, hi) = (THRESHOLD_S, config.pivot);
    let step = (hi - lo) / LOW_SCAN_POINTS as f64;
    let low = (0..=LOW_SCAN_POINTS)
        .map(|i| density(species, mass, lo + step * i as f64))
        .fold(0.0, f64::max);

    let decades = (TAIL_SCAN_LIMIT / hi).log10().max(1.0);
    let points = (decades * TAIL_SCAN_PER_DECADE as f64).ceil() as usize;
    let tail = (0..=points)
        .map(|i| {
            let s = hi * 10f64.powf(decades * i as f64 / points as f64);
            density(species, mass, s) / s.powf(config.tail_exponent)
        })
        .fold(0.0, f64::max);

    Envelope {
        low: low * config.envelope_margin,
        tail: tail * config.envelope_margin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photomeson_core::RngStream;
    use photomeson_tables::StandardTables;

    fn sampler() -> InvariantMassSampler {
        InvariantMassSampler::new(&SamplerConfig::default(), &StandardTables::new())
    }

    fn collision(species: Species, e_nucleon: f64, e_photon: f64) -> Collision {
        Collision::new(species, &StandardTables::new(), e_nucleon, e_photon).unwrap()
    }

    #[test]
    fn invalid_energies_are_rejected() {
        let tables = StandardTables::new();
        assert!(Collision::new(Species::Proton, &tables, 0.5, 1.0).is_err());
        assert!(Collision::new(Species::Proton, &tables, 10.0, 0.0).is_err());
        assert!(Collision::new(Species::Neutron, &tables, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn below_threshold_gives_none() {
        let mut rng = RngStream::new(1);
        // Nucleon at rest and a 100 MeV photon: s_max ≈ 1.07 GeV².
        let c = collision(Species::Proton, NUCLEON_MASS, 0.1);
        assert!(sampler().sample(&c, &mut rng).is_none());
    }

    #[test]
    fn samples_stay_in_range() {
        let mut rng = RngStream::new(2);
        let s = sampler();
        let c = collision(Species::Proton, 1e10, 1e-9);
        let s_hi = c.max_invariant_mass_squared();
        for _ in 0..500 {
            let v = s.sample(&c, &mut rng).unwrap();
            assert!((THRESHOLD_S..=s_hi).contains(&v), "{v}");
        }
    }

    #[test]
    fn tail_is_reached_at_high_energy() {
        let mut rng = RngStream::new(3);
        let s = sampler();
        let c = collision(Species::Neutron, 1e12, 1e-9);
        let above = (0..500)
            .filter(|_| s.sample(&c, &mut rng).unwrap() > 10.0)
            .count();
        // s_max ≈ 4000 GeV²: the tail dominates the integral.
        assert!(above > 400, "{above}");
    }

    #[test]
    fn envelope_covers_density() {
        let config = SamplerConfig::default();
        let tables = StandardTables::new();
        for species in [Species::Proton, Species::Neutron] {
            let mass = tables.mass(species.code()).unwrap();
            let env = scan(&config, species, mass);
            for i in 0..400 {
                let s = THRESHOLD_S + (config.pivot - THRESHOLD_S) * (i as f64 + 0.5) / 400.0;
                assert!(density(species, mass, s) <= env.low);
            }
            for s in [12.0, 50.0, 1e3, 1e6] {
                assert!(density(species, mass, s) <= env.tail * s.powf(config.tail_exponent));
            }
        }
    }

    #[test]
    fn density_uses_the_incident_nucleon_mass() {
        let tables = StandardTables::new();
        let mp = tables.mass(Species::Proton.code()).unwrap();
        let mn = tables.mass(Species::Neutron.code()).unwrap();
        assert!(mn > mp);
        let s = 1.5;
        let ratio = density(Species::Neutron, mn, s) / density(Species::Neutron, mp, s);
        assert!((ratio - (s - mn * mn) / (s - mp * mp)).abs() < 1e-12);
    }

    #[test]
    fn incidence_cosine_inverts_s() {
        let c = collision(Species::Neutron, 5.0, 0.3);
        for cos in [-1.0, -0.4, 0.0, 0.7, 1.0] {
            let s = c.invariant_mass_squared(cos);
            assert!((c.incidence_cosine(s) - cos).abs() < 1e-9);
        }
    }

    #[test]
    fn incidence_cosine_survives_large_boosts() {
        let c = collision(Species::Proton, 1e9, 1e-9);
        let s_hi = c.max_invariant_mass_squared();
        assert!((s_hi - (NUCLEON_MASS * NUCLEON_MASS + 4.0)).abs() < 1e-6);
        assert!((c.incidence_cosine(s_hi) + 1.0).abs() < 1e-9);
        let cos = c.incidence_cosine(1.2);
        assert!(cos > -1.0 && cos < 1.0);
        assert!((c.invariant_mass_squared(cos) - 1.2).abs() < 1e-9);
    }

    #[test]
    fn cm_direction_matches_boost_at_moderate_energy() {
        use photomeson_kinematics::{boost_to_frame, Frame};
        let c = collision(Species::Proton, 3.0, 0.4);
        for cos in [-0.9, -0.2, 0.3] {
            let phi = 1.1;
            let s = c.invariant_mass_squared(cos);
            let total = c.total_momentum(cos, phi);
            let frame = Frame::new(total, s.sqrt()).unwrap();
            let nucleon = FourVector::new(0.0, 0.0, c.nucleon_momentum(), c.e_nucleon);
            let cm = boost_to_frame(&nucleon, &frame);
            let (theta, phi_n) = c.cm_nucleon_direction(cos, phi);
            assert!((cm.theta() - theta).abs() < 1e-9, "{cos}");
            assert!((cm.phi() - phi_n).abs() < 1e-9, "{cos}");
        }
    }

    #[test]
    fn cm_direction_is_finite_for_extreme_boosts() {
        let c = collision(Species::Neutron, 1e11, 1e-9);
        let cos = c.incidence_cosine(1.5);
        let (theta, phi) = c.cm_nucleon_direction(cos, 0.3);
        assert!(theta.is_finite() && phi.is_finite());
        // Head-on photon: the nucleon keeps its direction.
        let (theta, _) = c.cm_nucleon_direction(-1.0, 0.0);
        assert!(theta.abs() < 1e-9);
    }

    #[test]
    fn exhausted_sampler_returns_last_attempt() {
        let config = SamplerConfig {
            max_attempts: 1,
            ..SamplerConfig::default()
        };
        let sampler = InvariantMassSampler::new(&config, &StandardTables::new());
        let c = collision(Species::Proton, 1e10, 1e-9);
        let mut rng = RngStream::new(4);
        for _ in 0..50 {
            let v = sampler.sample(&c, &mut rng);
            assert!(v.is_some_and(|s| s >= THRESHOLD_S));
        }
    }
}
