//! Two-body t-channel production: direct pions and diffractive vector
//! mesons.
//!
//! Both are built in the centre-of-mass frame with the nucleon along +z
//! and the photon along −z. The momentum transfer `t` between photon and
//! meson follows `exp(b·t)` between its kinematic bounds; the meson polar
//! angle is solved from `t` and the azimuth is uniform.

use std::ops::Range;

use photomeson_arena::{Entry, EventArena};
use photomeson_core::{EventError, ParticleCode, ParticleTable, Species, UniformSource};
use photomeson_kinematics::{two_body_decay, two_body_momentum};
use tracing::debug;

use crate::resonance::effective_mass;

/// t slope of direct `N′π` production in GeV⁻².
pub const SINGLE_PION_SLOPE: f64 = 12.0;
/// t slope of direct `Δπ` production in GeV⁻².
pub const DELTA_PION_SLOPE: f64 = 6.0;
/// t slope of diffractive vector-meson production in GeV⁻².
pub const DIFFRACTIVE_SLOPE: f64 = 6.5;

/// Direct (pion-exchange) channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectChannel {
    /// `γp → nπ+`, `γn → pπ−`.
    SinglePion,
    /// `γp → Δ++π−`, `γn → Δ−π+`.
    DeltaPion,
}

impl DirectChannel {
    /// `(baryon, meson)` produced on `species`.
    pub fn products(self, species: Species) -> (ParticleCode, ParticleCode) {
        use ParticleCode as P;
        match (self, species) {
            (Self::SinglePion, Species::Proton) => (P::NEUTRON, P::PI_PLUS),
            (Self::SinglePion, Species::Neutron) => (P::PROTON, P::PI_MINUS),
            (Self::DeltaPion, Species::Proton) => (P::DELTA_PP, P::PI_MINUS),
            (Self::DeltaPion, Species::Neutron) => (P::DELTA_M, P::PI_PLUS),
        }
    }

    fn slope(self) -> f64 {
        match self {
            Self::SinglePion => SINGLE_PION_SLOPE,
            Self::DeltaPion => DELTA_PION_SLOPE,
        }
    }
}

/// Vector mesons produced diffractively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VectorMeson {
    /// ρ0.
    Rho,
    /// ω.
    Omega,
}

impl VectorMeson {
    /// Particle code of the meson.
    pub fn code(self) -> ParticleCode {
        match self {
            Self::Rho => ParticleCode::RHO0,
            Self::Omega => ParticleCode::OMEGA,
        }
    }
}

/// Direct pion production at `sqrt_s`. Returns the range of the products.
pub fn direct_production(
    arena: &mut EventArena,
    species: Species,
    sqrt_s: f64,
    channel: DirectChannel,
    tables: &dyn ParticleTable,
    rng: &mut dyn UniformSource,
) -> Result<Range<usize>, EventError> {
    let (baryon, meson) = channel.products(species);
    debug!(?channel, baryon = %baryon, meson = %meson, "direct production");
    let exchange = Exchange {
        species,
        sqrt_s,
        baryon,
        meson,
        slope: channel.slope(),
        polarized: false,
    };
    exchange.produce(arena, tables, rng)
}

/// Diffractive `γN → N V` at `sqrt_s`. The meson carries its helicity
/// axis. Returns the range of the products.
pub fn diffractive_production(
    arena: &mut EventArena,
    species: Species,
    sqrt_s: f64,
    vector: VectorMeson,
    tables: &dyn ParticleTable,
    rng: &mut dyn UniformSource,
) -> Result<Range<usize>, EventError> {
    debug!(?vector, "diffractive production");
    let exchange = Exchange {
        species,
        sqrt_s,
        baryon: species.code(),
        meson: vector.code(),
        slope: DIFFRACTIVE_SLOPE,
        polarized: true,
    };
    exchange.produce(arena, tables, rng)
}

/// Bounds `(t_min, t_max)` of the momentum transfer from a photon of
/// centre-of-mass momentum `k` to a meson of mass `mm` and momentum `q`.
pub fn t_bounds(k: f64, q: f64, mm: f64) -> (f64, f64) {
    let e_m = (q * q + mm * mm).sqrt();
    let t = |cos: f64| mm * mm - 2.0 * (k * e_m - k * q * cos);
    (t(-1.0), t(1.0))
}

struct Exchange {
    species: Species,
    sqrt_s: f64,
    baryon: ParticleCode,
    meson: ParticleCode,
    slope: f64,
    polarized: bool,
}

impl Exchange {
    fn produce(
        &self,
        arena: &mut EventArena,
        tables: &dyn ParticleTable,
        rng: &mut dyn UniformSource,
    ) -> Result<Range<usize>, EventError> {
        let sqrt_s = self.sqrt_s;
        let nucleon_mass = tables.require_mass(self.species.code())?;
        let (mb, mm) = effective_mass(sqrt_s, self.baryon, self.meson, tables)?;
        let forbidden = || EventError::KinematicallyForbidden {
            reason: format!("{} + {} above {sqrt_s} GeV", self.baryon, self.meson),
        };
        let k = two_body_momentum(sqrt_s, 0.0, nucleon_mass).ok_or_else(forbidden)?;
        let q = two_body_momentum(sqrt_s, mb, mm).ok_or_else(forbidden)?;
        if k <= 0.0 || q <= 0.0 {
            return Err(forbidden());
        }

        let (t_min, t_max) = t_bounds(k, q, mm);
        let t = rng.truncated_exponential(self.slope, t_min, t_max);
        let e_m = (q * q + mm * mm).sqrt();
        // Angle between meson and photon; the photon runs along −z.
        let cos = ((t - mm * mm + 2.0 * k * e_m) / (2.0 * k * q)).clamp(-1.0, 1.0);
        let (pm, pb) = two_body_decay(sqrt_s, mm, mb, -cos, rng.azimuth())?;

        let mut meson = Entry::new(self.meson, pm, mm);
        if self.polarized {
            meson = meson.with_spin_axis(pm.three());
        }
        Ok(arena.extend([Entry::new(self.baryon, pb, mb), meson])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photomeson_core::{FourVector, RngStream};
    use photomeson_tables::StandardTables;

    #[test]
    fn products_conserve_charge() {
        let tables = StandardTables::new();
        for species in [Species::Proton, Species::Neutron] {
            for channel in [DirectChannel::SinglePion, DirectChannel::DeltaPion] {
                let (b, m) = channel.products(species);
                let q = tables.charge(b).unwrap() + tables.charge(m).unwrap();
                assert_eq!(q, species.charge());
            }
        }
    }

    #[test]
    fn t_bounds_are_ordered_and_negative() {
        let (lo, hi) = t_bounds(0.8, 0.6, 0.775_5);
        assert!(lo < hi);
        assert!(hi < 0.0);
    }

    #[test]
    fn direct_pions_are_forward_of_the_photon() {
        let tables = StandardTables::new();
        let mut rng = RngStream::new(1);
        let sqrt_s = 1.8;
        let mut backward = 0;
        for _ in 0..500 {
            let mut arena = EventArena::with_capacity(8);
            let range = direct_production(
                &mut arena,
                Species::Proton,
                sqrt_s,
                DirectChannel::SinglePion,
                &tables,
                &mut rng,
            )
            .unwrap();
            assert_eq!(range, 0..2);
            let (b, m) = (arena.get(0).unwrap(), arena.get(1).unwrap());
            assert_eq!(b.code, ParticleCode::NEUTRON);
            let total = b.momentum + m.momentum;
            assert!(total.max_abs_diff(&FourVector::at_rest(sqrt_s)) < 1e-12);
            if m.momentum.pz < 0.0 {
                backward += 1;
            }
        }
        // A steep t slope keeps the pion along the photon direction (−z).
        assert!(backward > 400, "{backward}");
    }

    #[test]
    fn diffractive_meson_carries_helicity_axis() {
        let tables = StandardTables::new();
        let mut rng = RngStream::new(2);
        let mut arena = EventArena::with_capacity(8);
        diffractive_production(
            &mut arena,
            Species::Neutron,
            2.5,
            VectorMeson::Rho,
            &tables,
            &mut rng,
        )
        .unwrap();
        let nucleon = arena.get(0).unwrap();
        let rho = arena.get(1).unwrap();
        assert_eq!(nucleon.code, ParticleCode::NEUTRON);
        assert_eq!(rho.code, ParticleCode::RHO0);
        let axis = rho.spin_axis.unwrap();
        let p = rho.momentum;
        let cos = (axis[0] * p.px + axis[1] * p.py + axis[2] * p.pz) / p.p_abs();
        assert!((cos - 1.0).abs() < 1e-9);
    }

    #[test]
    fn delta_is_reduced_close_to_threshold() {
        let tables = StandardTables::new();
        let mut rng = RngStream::new(3);
        let mut arena = EventArena::with_capacity(8);
        direct_production(
            &mut arena,
            Species::Neutron,
            1.3,
            DirectChannel::DeltaPion,
            &tables,
            &mut rng,
        )
        .unwrap();
        let delta = arena.get(0).unwrap();
        assert_eq!(delta.code, ParticleCode::DELTA_M);
        assert!(delta.mass < 1.232);
        assert!((delta.momentum.mass() - delta.mass).abs() < 1e-9);
    }
}
