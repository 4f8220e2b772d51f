//! s-channel baryon resonances.
//!
//! A resonance is picked in proportion to its Breit–Wigner cross section
//! at the event energy, one of its exclusive channels is picked among
//! those open at `√s`, and the resonance is decayed into a baryon and a
//! meson in the centre-of-mass frame. The resonance stays in the record
//! as decayed history; unstable products (Δ, ρ, η) are left alive for the
//! decay-chain processor.
//!
//! Near threshold a wide product may not fit at its nominal mass. It then
//! takes an effective mass halfway between its own decay threshold and
//! the mass still available, so that both the two-body state and its
//! later decay stay open.

use std::ops::Range;

use photomeson_arena::{Entry, EventArena};
use photomeson_core::{EventError, FourVector, ParticleCode, ParticleTable, Species, UniformSource};
use photomeson_kinematics::two_body_decay;
use photomeson_tables::cross_section::resonance_cross_sections;
use photomeson_tables::{ChannelKind, Resonance, RESONANCES};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Width in GeV above which a product may be taken off its nominal mass.
const REDUCIBLE_WIDTH: f64 = 0.01;
/// Draws of the decay angle before the last one is used as is.
const MAX_ANGULAR_ATTEMPTS: u32 = 1000;

/// A chosen exclusive channel with its charge state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResonanceDecay {
    /// Isospin class of the channel.
    pub kind: ChannelKind,
    /// Baryon product.
    pub baryon: ParticleCode,
    /// Meson product.
    pub meson: ParticleCode,
}

/// Pick the excited resonance, as an index into [`RESONANCES`].
///
/// `None` when no resonance contributes at `eps_prime`.
pub fn select_resonance(
    eps_prime: f64,
    species: Species,
    rng: &mut dyn UniformSource,
) -> Option<usize> {
    rng.pick_weighted(&resonance_cross_sections(species, eps_prime))
}

/// Lightest mass `code` can take: its decay threshold if it is wide,
/// its nominal mass otherwise.
pub fn mass_floor(code: ParticleCode, tables: &dyn ParticleTable) -> Result<f64, EventError> {
    let mass = tables.require_mass(code)?;
    if !is_reducible(code, tables) {
        return Ok(mass);
    }
    let mut floor = mass;
    for channel in tables.decay_channels(code).unwrap_or(&[]) {
        let mut sum = 0.0;
        for &d in &channel.daughters {
            sum += tables.require_mass(d)?;
        }
        floor = floor.min(sum);
    }
    Ok(floor)
}

fn is_reducible(code: ParticleCode, tables: &dyn ParticleTable) -> bool {
    tables.width(code).is_some_and(|w| w > REDUCIBLE_WIDTH) && tables.is_unstable(code)
}

/// Pick an exclusive channel and charge state of `res` that is open at
/// `sqrt_s`, weighting by branching ratio times Clebsch–Gordan weight.
pub fn select_channel(
    res: &Resonance,
    species: Species,
    sqrt_s: f64,
    tables: &dyn ParticleTable,
    rng: &mut dyn UniformSource,
) -> Result<ResonanceDecay, EventError> {
    let mut candidates: SmallVec<[(f64, ResonanceDecay); 8]> = SmallVec::new();
    for channel in res.channels {
        for &(cg, baryon, meson) in channel.kind.charge_states(res.isospin, species) {
            if mass_floor(baryon, tables)? + mass_floor(meson, tables)? < sqrt_s {
                let decay = ResonanceDecay {
                    kind: channel.kind,
                    baryon,
                    meson,
                };
                candidates.push((channel.branching * cg, decay));
            }
        }
    }
    let weights: SmallVec<[f64; 8]> = candidates.iter().map(|(w, _)| *w).collect();
    let chosen = rng
        .pick_weighted(&weights)
        .ok_or_else(|| EventError::KinematicallyForbidden {
            reason: format!("no channel of {} is open at {sqrt_s} GeV", res.name),
        })?;
    Ok(candidates[chosen].1)
}

/// Masses of the two products at `sqrt_s`.
///
/// Nominal masses when they fit; otherwise the wide product is moved to
/// an effective mass. Fails when no product can be reduced far enough.
pub fn effective_mass(
    sqrt_s: f64,
    baryon: ParticleCode,
    meson: ParticleCode,
    tables: &dyn ParticleTable,
) -> Result<(f64, f64), EventError> {
    let mb = tables.require_mass(baryon)?;
    let mm = tables.require_mass(meson)?;
    if mb + mm < sqrt_s {
        return Ok((mb, mm));
    }
    if is_reducible(meson, tables) {
        let (floor, room) = (mass_floor(meson, tables)?, sqrt_s - mb);
        if room > floor {
            return Ok((mb, 0.5 * (floor + room)));
        }
    }
    if is_reducible(baryon, tables) {
        let (floor, room) = (mass_floor(baryon, tables)?, sqrt_s - mm);
        if room > floor {
            return Ok((0.5 * (floor + room), mm));
        }
    }
    Err(EventError::KinematicallyForbidden {
        reason: format!("{baryon} + {meson} cannot be produced at {sqrt_s} GeV"),
    })
}

/// Decay angle of the baryon relative to the incoming nucleon.
///
/// Rejection against the resonance's angular polynomial, which never
/// exceeds one. An exhausted loop keeps its last draw.
pub fn angular_cosine(res: &Resonance, rng: &mut dyn UniformSource) -> f64 {
    let mut cos = rng.cosine();
    if res.angular.is_isotropic() {
        return cos;
    }
    for _ in 0..MAX_ANGULAR_ATTEMPTS {
        if rng.accept(res.angular.eval(cos)) {
            return cos;
        }
        cos = rng.cosine();
    }
    trace!(resonance = res.name, "angular sampling exhausted");
    cos
}

/// Write the resonance at rest in the centre-of-mass frame and its two
/// products into `arena`. Returns the range of the products.
pub fn decay_resonance(
    arena: &mut EventArena,
    species: Species,
    index: usize,
    sqrt_s: f64,
    decay: &ResonanceDecay,
    tables: &dyn ParticleTable,
    rng: &mut dyn UniformSource,
) -> Result<Range<usize>, EventError> {
    let res = RESONANCES.get(index).ok_or_else(|| EventError::InvalidInput {
        reason: format!("resonance index {index} out of range"),
    })?;
    let (mb, mm) = effective_mass(sqrt_s, decay.baryon, decay.meson, tables)?;
    let cos = angular_cosine(res, rng);
    let (pb, pm) = two_body_decay(sqrt_s, mb, mm, cos, rng.azimuth())?;
    debug!(
        resonance = res.name,
        baryon = %decay.baryon,
        meson = %decay.meson,
        "resonance decay"
    );

    let code = ParticleCode::resonance(species, index);
    let parent = arena.push(Entry::new(code, FourVector::at_rest(sqrt_s), sqrt_s))?;
    let range = arena.extend([
        Entry::new(decay.baryon, pb, mb).with_parent(parent),
        Entry::new(decay.meson, pm, mm).with_parent(parent),
    ])?;
    arena.mark_decayed(parent)?;
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use photomeson_arena::Status;
    use photomeson_core::RngStream;
    use photomeson_tables::cross_section::photon_energy_nucleon_frame;
    use photomeson_tables::resonances::DELTA_1232;
    use photomeson_tables::StandardTables;

    #[test]
    fn delta_dominates_near_threshold() {
        let mut rng = RngStream::new(1);
        let eps = photon_energy_nucleon_frame(1.3);
        let delta = (0..1000)
            .filter(|_| select_resonance(eps, Species::Proton, &mut rng) == Some(DELTA_1232))
            .count();
        assert!(delta > 800, "{delta}");
    }

    #[test]
    fn delta_decays_to_nucleon_pion() {
        let tables = StandardTables::new();
        let mut rng = RngStream::new(2);
        let res = &RESONANCES[DELTA_1232];
        for _ in 0..200 {
            let d = select_channel(res, Species::Proton, 1.2, &tables, &mut rng).unwrap();
            assert_eq!(d.kind, ChannelKind::NucleonPion);
            assert!(matches!(
                (d.baryon, d.meson),
                (ParticleCode::PROTON, ParticleCode::PI0) | (ParticleCode::NEUTRON, ParticleCode::PI_PLUS)
            ));
        }
    }

    #[test]
    fn closed_channels_are_skipped() {
        let tables = StandardTables::new();
        let mut rng = RngStream::new(3);
        // Just above Nπ threshold only the pion channels of a heavy
        // resonance are open.
        for res in &RESONANCES[1..] {
            for _ in 0..50 {
                let d = select_channel(res, Species::Neutron, 1.1, &tables, &mut rng);
                if let Ok(d) = d {
                    assert_eq!(d.kind, ChannelKind::NucleonPion, "{}", res.name);
                }
            }
        }
    }

    #[test]
    fn wide_product_is_reduced_near_threshold() {
        let tables = StandardTables::new();
        let (mb, mm) =
            effective_mass(1.3, ParticleCode::DELTA_PP, ParticleCode::PI_MINUS, &tables).unwrap();
        assert!((mm - 0.139_57).abs() < 1e-4);
        assert!(mb + mm < 1.3);
        assert!(mb > mass_floor(ParticleCode::DELTA_PP, &tables).unwrap());
    }

    #[test]
    fn narrow_products_below_threshold_are_fatal() {
        let tables = StandardTables::new();
        let err = effective_mass(1.0, ParticleCode::PROTON, ParticleCode::ETA, &tables).unwrap_err();
        assert!(matches!(err, EventError::KinematicallyForbidden { .. }));
    }

    #[test]
    fn angular_distribution_is_symmetric_and_bounded() {
        let mut rng = RngStream::new(4);
        let res = &RESONANCES[DELTA_1232];
        let n = 4000;
        let mean: f64 = (0..n).map(|_| angular_cosine(res, &mut rng)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "{mean}");
    }

    #[test]
    fn resonance_is_kept_as_history() {
        let tables = StandardTables::new();
        let mut rng = RngStream::new(5);
        let mut arena = EventArena::with_capacity(16);
        let decay = ResonanceDecay {
            kind: ChannelKind::NucleonPion,
            baryon: ParticleCode::PROTON,
            meson: ParticleCode::PI0,
        };
        let range =
            decay_resonance(&mut arena, Species::Proton, DELTA_1232, 1.2, &decay, &tables, &mut rng)
                .unwrap();
        assert_eq!(range, 1..3);
        let parent = arena.get(0).unwrap();
        assert_eq!(parent.status, Status::Decayed);
        assert!(parent.code.is_decayed_marker());
        let total = arena.get(1).unwrap().momentum + arena.get(2).unwrap().momentum;
        assert!(total.max_abs_diff(&FourVector::at_rest(1.2)) < 1e-12);
    }
}
