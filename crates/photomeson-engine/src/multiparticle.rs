//! Multiparticle production through string fragmentation.
//!
//! The photon is resolved into a quark pair with vector-meson-dominance
//! weights and the nucleon into a quark and a diquark. In the one-string
//! (reggeon) topology the photon antiquark annihilates a nucleon quark of
//! its own flavor and a single string joins the photon quark to the
//! nucleon diquark; occasionally the diquark is resolved and the three
//! quarks meet at a junction. In the two-string (pomeron) topology both
//! objects split and two strings cross between them. Ends are massless
//! and share the light-cone momenta `√s` of their parents, so the partons
//! always sum to `(0, 0, 0, √s)` in the centre-of-mass frame.
//!
//! After fragmentation four empirical corrections may reject the attempt;
//! the whole branch is then rebuilt, up to
//! [`EngineConfig::max_multiparticle_retries`] times.

use std::ops::Range;

use photomeson_arena::{ArenaError, Entry, EventArena};
use photomeson_core::{
    EventError, Flavor, FourVector, ParticleCode, ParticleTable, Species, UniformSource,
};
use photomeson_fragment::{
    lightest_hadron_mass, DipoleShower, FragmentError, FragmentationScheme, Fragmenter, Hadron,
    Parton,
};
use photomeson_kinematics::phase_space;
use photomeson_tables::cross_section::one_string_fraction;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::metrics::EventStats;

/// VMD weights of the photon's `uū`, `dd̄` and `ss̄` content.
const PHOTON_VALENCE: [(Flavor, f64); 3] = [
    (Flavor::UP, 2.0 / 3.0),
    (Flavor::DOWN, 1.0 / 6.0),
    (Flavor::STRANGE, 1.0 / 6.0),
];
/// Spin-0 share of a nucleon remnant diquark of unlike flavors.
const REMNANT_SPIN0: f64 = 0.75;
/// Draws of the momentum fractions before falling back to one string.
const MAX_SHARING_ATTEMPTS: u32 = 100;
/// Draws of a valence fraction before the last one is kept.
const MAX_FRACTION_DRAWS: u32 = 100;
/// Smallest light-cone fraction given to a string end.
const MIN_FRACTION: f64 = 1e-3;

/// String topology of one attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum Topology {
    /// Open strings given by their two ends.
    Strings(SmallVec<[(Parton, Parton); 2]>),
    /// Three quarks meeting at a baryon junction.
    Junction([Parton; 3]),
}

impl Topology {
    /// Every parton of the topology.
    pub fn partons(&self) -> SmallVec<[Parton; 4]> {
        match self {
            Self::Strings(strings) => strings.iter().flat_map(|(a, b)| [*a, *b]).collect(),
            Self::Junction(legs) => legs.iter().copied().collect(),
        }
    }
}

/// Why an attempt is thrown away.
#[derive(Debug)]
enum Failure {
    /// Build the branch again.
    Retry(&'static str),
    /// Stop the event.
    Fatal(EventError),
}

impl From<FragmentError> for Failure {
    fn from(e: FragmentError) -> Self {
        if e.is_recoverable() {
            trace!(error = %e, "fragmentation rejected");
            Self::Retry("fragmentation")
        } else {
            Self::Fatal(e.into())
        }
    }
}

impl From<EventError> for Failure {
    fn from(e: EventError) -> Self {
        Self::Fatal(e)
    }
}

impl From<ArenaError> for Failure {
    fn from(e: ArenaError) -> Self {
        Self::Fatal(e.into())
    }
}

/// Builds multiparticle final states.
pub struct MultiparticleModel<'a> {
    config: &'a EngineConfig,
    tables: &'a dyn ParticleTable,
    fragmenter: Fragmenter<'a>,
    shower: DipoleShower<'a>,
}

impl<'a> MultiparticleModel<'a> {
    /// Model using the fragmentation, shower and correction settings of
    /// `config`.
    pub fn new(config: &'a EngineConfig, tables: &'a dyn ParticleTable) -> Self {
        Self {
            config,
            tables,
            fragmenter: Fragmenter::new(&config.fragmentation, tables),
            shower: DipoleShower::new(&config.shower),
        }
    }

    /// Write a multiparticle event at `sqrt_s` into `arena`: the string
    /// ends as fragmented partons followed by the hadrons. Returns the
    /// range of the hadrons.
    pub fn produce(
        &self,
        arena: &mut EventArena,
        species: Species,
        sqrt_s: f64,
        rng: &mut dyn UniformSource,
        stats: &mut EventStats,
    ) -> Result<Range<usize>, EventError> {
        let checkpoint = arena.checkpoint();
        let attempts = self.config.max_multiparticle_retries;
        for attempt in 0..attempts {
            arena.truncate(checkpoint);
            match self.attempt(arena, species, sqrt_s, rng, stats) {
                Ok(range) => return Ok(range),
                Err(Failure::Retry(reason)) => {
                    trace!(attempt, reason, "multiparticle attempt rejected");
                    stats.multiparticle_retries += 1;
                }
                Err(Failure::Fatal(e)) => {
                    arena.truncate(checkpoint);
                    return Err(e);
                }
            }
        }
        arena.truncate(checkpoint);
        Err(EventError::RetriesExhausted {
            stage: "multiparticle production",
            attempts,
        })
    }

    fn attempt(
        &self,
        arena: &mut EventArena,
        species: Species,
        sqrt_s: f64,
        rng: &mut dyn UniformSource,
        stats: &mut EventStats,
    ) -> Result<Range<usize>, Failure> {
        let topology = self.topology(species, sqrt_s, rng)?;
        let mut hadrons = self.fragment(&topology, rng)?;
        if let Err(reason) = self.corrections(&hadrons, sqrt_s, rng) {
            stats.correction_rejections += 1;
            return Err(Failure::Retry(reason));
        }
        if let Some(replacement) = self.low_energy_override(species, &hadrons, sqrt_s, rng)? {
            stats.low_energy_overrides += 1;
            hadrons = replacement;
        }

        let partons = topology.partons();
        let first = arena.len();
        let range = arena.extend(
            partons
                .iter()
                .map(|p| Entry::new(ParticleCode::parton(p.flavor), p.momentum, 0.0)),
        )?;
        for index in range {
            arena.mark_fragmented(index)?;
        }
        let hadrons = arena.extend(
            hadrons
                .iter()
                .map(|h| Entry::new(h.code, h.momentum, h.mass).with_parent(first)),
        )?;
        Ok(hadrons)
    }

    // ── Topology ───────────────────────────────────────────────────

    /// Resolve photon and nucleon into string ends.
    pub fn topology(
        &self,
        species: Species,
        sqrt_s: f64,
        rng: &mut dyn UniformSource,
    ) -> Result<Topology, EventError> {
        let s = sqrt_s * sqrt_s;
        if !rng.accept(one_string_fraction(s)) {
            if let Some(t) = self.two_strings(species, sqrt_s, rng)? {
                debug!(sqrt_s, "two-string topology");
                return Ok(t);
            }
            trace!(sqrt_s, "two-string sharing failed, using one string");
        }
        debug!(sqrt_s, "one-string topology");
        self.one_string(species, sqrt_s, rng)
    }

    fn one_string(
        &self,
        species: Species,
        sqrt_s: f64,
        rng: &mut dyn UniformSource,
    ) -> Result<Topology, EventError> {
        let valence = species.valence();
        // The photon antiquark must find a nucleon quark of its flavor.
        let weights = valence.map(photon_weight);
        let i = rng.pick_weighted(&weights).ok_or_else(|| EventError::InvalidInput {
            reason: format!("{species} has no valence quark the photon can annihilate"),
        })?;
        let q = valence[i];
        let (a, b) = remnant(&valence, i);
        let photon_quark = Parton::new(q, minus(sqrt_s));

        if rng.accept(self.config.fragmentation.junction_probability) {
            let x = valence_fraction(rng);
            debug!(sqrt_s, "junction topology");
            return Ok(Topology::Junction([
                photon_quark,
                Parton::new(a, plus(x * sqrt_s)),
                Parton::new(b, plus((1.0 - x) * sqrt_s)),
            ]));
        }
        let diquark = remnant_diquark(a, b, rng)?;
        Ok(Topology::Strings(smallvec::smallvec![(
            photon_quark,
            Parton::new(diquark, plus(sqrt_s)),
        )]))
    }

    fn two_strings(
        &self,
        species: Species,
        sqrt_s: f64,
        rng: &mut dyn UniformSource,
    ) -> Result<Option<Topology>, EventError> {
        let weights = PHOTON_VALENCE.map(|(_, w)| w);
        let f = rng
            .pick_weighted(&weights)
            .map(|i| PHOTON_VALENCE[i].0)
            .unwrap_or(Flavor::UP);
        let valence = species.valence();
        let i = (rng.uniform() * 3.0) as usize % 3;
        let q_n = valence[i];
        let (a, b) = remnant(&valence, i);
        let diquark = remnant_diquark(a, b, rng)?;

        let s = sqrt_s * sqrt_s;
        let need_1 = lightest_hadron_mass(q_n) + lightest_hadron_mass(f.anti());
        let need_2 = lightest_hadron_mass(f) + lightest_hadron_mass(diquark);
        for _ in 0..MAX_SHARING_ATTEMPTS {
            let x_n = valence_fraction(rng);
            let x_g = photon_fraction(rng);
            let m1 = (x_n * (1.0 - x_g) * s).sqrt();
            let m2 = ((1.0 - x_n) * x_g * s).sqrt();
            if m1 > need_1 && m2 > need_2 {
                return Ok(Some(Topology::Strings(smallvec::smallvec![
                    (
                        Parton::new(q_n, plus(x_n * sqrt_s)),
                        Parton::new(f.anti(), minus((1.0 - x_g) * sqrt_s)),
                    ),
                    (
                        Parton::new(f, minus(x_g * sqrt_s)),
                        Parton::new(diquark, plus((1.0 - x_n) * sqrt_s)),
                    ),
                ])));
            }
        }
        Ok(None)
    }

    // ── Fragmentation ──────────────────────────────────────────────

    fn fragment(
        &self,
        topology: &Topology,
        rng: &mut dyn UniformSource,
    ) -> Result<Vec<Hadron>, FragmentError> {
        if self.config.fragmentation.scheme == FragmentationScheme::Independent {
            let jets = topology.partons();
            return self.fragmenter.fragment_independent(
                &jets,
                self.config.fragmentation.compensation,
                rng,
            );
        }
        match topology {
            Topology::Junction(legs) => self.fragmenter.fragment_junction(legs, rng),
            Topology::Strings(strings) => {
                let mut hadrons = Vec::new();
                for (a, b) in strings {
                    let mass = (a.momentum + b.momentum).mass();
                    if self.shower.applies_to(mass) {
                        for chain in self.shower.shower_dipole(a, b, rng)? {
                            hadrons.extend(self.fragmenter.fragment_chain(&chain, rng)?);
                        }
                    } else {
                        hadrons.extend(self.fragmenter.fragment_string(a, b, rng)?);
                    }
                }
                Ok(hadrons)
            }
        }
    }

    // ── Corrections ────────────────────────────────────────────────

    /// Apply the rejecting corrections. `Err` names the one that fired.
    fn corrections(
        &self,
        hadrons: &[Hadron],
        sqrt_s: f64,
        rng: &mut dyn UniformSource,
    ) -> Result<(), &'static str> {
        let c = &self.config.corrections;
        if c.reject_two_body && duplicates_two_body(hadrons) {
            return Err("two-body final state");
        }
        if c.pi0_suppression && !rng.accept(pi0_acceptance(hadrons, c.pi0_tolerance)) {
            return Err("neutral pion excess");
        }
        if c.leading_baryon_veto
            && !rng.accept(leading_baryon_acceptance(hadrons, sqrt_s, self.tables))
        {
            return Err("leading baryon");
        }
        Ok(())
    }

    /// Exact phase-space state replacing a three-hadron (lower window) or
    /// four-hadron (upper window) fragmentation output, if the draw
    /// selects it.
    fn low_energy_override(
        &self,
        species: Species,
        hadrons: &[Hadron],
        sqrt_s: f64,
        rng: &mut dyn UniformSource,
    ) -> Result<Option<Vec<Hadron>>, EventError> {
        let c = &self.config.corrections;
        if !c.low_energy_override {
            return Ok(None);
        }
        let (window, extra_pi0) = match hadrons.len() {
            3 if in_window(sqrt_s, c.three_body_window) => (c.three_body_window, false),
            4 if in_window(sqrt_s, c.four_body_window) => (c.four_body_window, true),
            _ => return Ok(None),
        };
        if !rng.accept(override_probability(sqrt_s, window)) {
            return Ok(None);
        }

        let mut codes: SmallVec<[ParticleCode; 4]> = SmallVec::new();
        codes.extend([species.code(), ParticleCode::PI_PLUS, ParticleCode::PI_MINUS]);
        if extra_pi0 {
            codes.push(ParticleCode::PI0);
        }
        let masses = codes
            .iter()
            .map(|&c| self.tables.require_mass(c))
            .collect::<Result<SmallVec<[f64; 4]>, _>>()?;
        if masses.iter().sum::<f64>() >= sqrt_s {
            return Ok(None);
        }
        let momenta = phase_space(sqrt_s, &masses, rng, self.config.decay.max_attempts)?;
        trace!(sqrt_s, n = codes.len(), "low-energy phase-space override");
        Ok(Some(
            codes
                .iter()
                .zip(momenta.iter())
                .zip(masses.iter())
                .map(|((&code, &momentum), &mass)| Hadron {
                    code,
                    momentum,
                    mass,
                })
                .collect(),
        ))
    }
}

/// Massless parton along +z with light-cone momentum `w`.
fn plus(w: f64) -> FourVector {
    let w = w.max(0.0);
    FourVector::new(0.0, 0.0, 0.5 * w, 0.5 * w)
}

/// Massless parton along −z with light-cone momentum `w`.
fn minus(w: f64) -> FourVector {
    let w = w.max(0.0);
    FourVector::new(0.0, 0.0, -0.5 * w, 0.5 * w)
}

fn photon_weight(q: Flavor) -> f64 {
    PHOTON_VALENCE
        .iter()
        .find(|(f, _)| *f == q)
        .map_or(0.0, |(_, w)| *w)
}

/// The two valence quarks left after removing the one at `i`.
fn remnant(valence: &[Flavor; 3], i: usize) -> (Flavor, Flavor) {
    match i {
        0 => (valence[1], valence[2]),
        1 => (valence[0], valence[2]),
        _ => (valence[0], valence[1]),
    }
}

fn remnant_diquark(
    a: Flavor,
    b: Flavor,
    rng: &mut dyn UniformSource,
) -> Result<Flavor, EventError> {
    let spin = if a == b || !rng.accept(REMNANT_SPIN0) { 1 } else { 0 };
    Flavor::diquark(a, b, spin).ok_or_else(|| EventError::InvalidInput {
        reason: format!("{a} and {b} do not form a diquark"),
    })
}

/// Light-cone fraction of a nucleon valence quark,
/// `∝ x^(−1/2)(1 − x)^(3/2)`.
fn valence_fraction(rng: &mut dyn UniformSource) -> f64 {
    let mut x = 0.5;
    for _ in 0..MAX_FRACTION_DRAWS {
        x = rng.uniform().powi(2);
        if rng.accept((1.0 - x).powf(1.5)) {
            break;
        }
    }
    x.clamp(MIN_FRACTION, 1.0 - MIN_FRACTION)
}

/// Light-cone fraction of the photon quark, `∝ (x(1 − x))^(−1/2)`.
fn photon_fraction(rng: &mut dyn UniformSource) -> f64 {
    let x = (0.5 * std::f64::consts::PI * rng.uniform()).sin().powi(2);
    x.clamp(MIN_FRACTION, 1.0 - MIN_FRACTION)
}

fn is_nucleon(code: ParticleCode) -> bool {
    matches!(code, ParticleCode::PROTON | ParticleCode::NEUTRON)
}

/// A nucleon with a single pion, ρ0 or ω repeats a direct or diffractive
/// final state.
fn duplicates_two_body(hadrons: &[Hadron]) -> bool {
    use ParticleCode as P;
    let [a, b] = hadrons else {
        return false;
    };
    let pair = |n: &Hadron, m: &Hadron| {
        is_nucleon(n.code)
            && matches!(m.code, P::PI0 | P::PI_PLUS | P::PI_MINUS | P::RHO0 | P::OMEGA)
    };
    pair(a, b) || pair(b, a)
}

/// Acceptance of an event with `n0` neutral and `nc` charged pions:
/// one up to `nc/2 + tolerance` neutral pions, falling as its inverse
/// above.
fn pi0_acceptance(hadrons: &[Hadron], tolerance: f64) -> f64 {
    let n0 = hadrons.iter().filter(|h| h.code == ParticleCode::PI0).count() as f64;
    let nc = hadrons
        .iter()
        .filter(|h| matches!(h.code, ParticleCode::PI_PLUS | ParticleCode::PI_MINUS))
        .count() as f64;
    let limit = 0.5 * nc + tolerance;
    if n0 > limit {
        limit / n0
    } else {
        1.0
    }
}

/// `(2E_B/√s)²` for the most forward baryon when it moves along the
/// nucleon direction, one otherwise.
fn leading_baryon_acceptance(hadrons: &[Hadron], sqrt_s: f64, tables: &dyn ParticleTable) -> f64 {
    let leading = hadrons
        .iter()
        .filter(|h| tables.baryon_number(h.code).is_some_and(|b| b != 0))
        .max_by(|a, b| a.momentum.pz.total_cmp(&b.momentum.pz));
    match leading {
        Some(h) if h.momentum.pz > 0.0 => (2.0 * h.momentum.e / sqrt_s).powi(2).min(1.0),
        _ => 1.0,
    }
}

fn in_window(sqrt_s: f64, (lo, hi): (f64, f64)) -> bool {
    sqrt_s >= lo && sqrt_s < hi
}

/// Falls logarithmically from one at the bottom of the window to zero at
/// the top.
fn override_probability(sqrt_s: f64, (lo, hi): (f64, f64)) -> f64 {
    ((hi / sqrt_s).ln() / (hi / lo).ln()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use photomeson_core::RngStream;
    use photomeson_fragment::total_momentum;
    use photomeson_tables::StandardTables;

    fn hadron(code: ParticleCode, pz: f64, mass: f64) -> Hadron {
        Hadron {
            code,
            momentum: FourVector::on_shell(0.0, 0.0, pz, mass),
            mass,
        }
    }

    fn charge(tables: &StandardTables, hadrons: &[Hadron]) -> i32 {
        hadrons.iter().map(|h| tables.charge(h.code).unwrap()).sum()
    }

    #[test]
    fn topologies_conserve_momentum_and_quantum_numbers() {
        let tables = StandardTables::new();
        let config = EngineConfig::default();
        let model = MultiparticleModel::new(&config, &tables);
        let mut rng = RngStream::new(1);
        for species in [Species::Proton, Species::Neutron] {
            for _ in 0..200 {
                let t = model.topology(species, 5.0, &mut rng).unwrap();
                let partons = t.partons();
                let total: FourVector = partons.iter().map(|p| p.momentum).sum();
                assert!(total.max_abs_diff(&FourVector::at_rest(5.0)) < 1e-12);
                let q: i32 = partons.iter().map(|p| p.flavor.charge_thirds()).sum();
                let b: i32 = partons.iter().map(|p| p.flavor.baryon_thirds()).sum();
                assert_eq!(q, 3 * species.charge());
                assert_eq!(b, 3);
            }
        }
    }

    #[test]
    fn produce_conserves_charge_and_momentum() {
        let tables = StandardTables::new();
        let config = EngineConfig::default();
        let model = MultiparticleModel::new(&config, &tables);
        let mut rng = RngStream::new(2);
        let mut stats = EventStats::default();
        for &sqrt_s in &[1.7, 2.2, 4.0, 20.0] {
            for _ in 0..20 {
                let mut arena = EventArena::with_capacity(2000);
                let range = model
                    .produce(&mut arena, Species::Proton, sqrt_s, &mut rng, &mut stats)
                    .unwrap();
                let hadrons: Vec<Hadron> = range
                    .map(|i| {
                        let e = arena.get(i).unwrap();
                        Hadron {
                            code: e.code,
                            momentum: e.momentum,
                            mass: e.mass,
                        }
                    })
                    .collect();
                assert!(hadrons.len() >= 2);
                assert_eq!(charge(&tables, &hadrons), 1);
                let total = total_momentum(&hadrons);
                assert!(total.max_abs_diff(&FourVector::at_rest(sqrt_s)) < 1e-6 * sqrt_s);
                let totals = arena.totals(&tables).unwrap();
                assert_eq!(totals.baryon_number, 1);
            }
        }
    }

    #[test]
    fn exhausted_retries_are_fatal_and_leave_the_record_clean() {
        let tables = StandardTables::new();
        let mut config = EngineConfig::default();
        config.max_multiparticle_retries = 1;
        config.corrections.pi0_tolerance = 0.0;
        let model = MultiparticleModel::new(&config, &tables);
        let mut stats = EventStats::default();
        let mut failures = 0u64;
        for seed in 0..40 {
            let mut rng = RngStream::new(seed);
            let mut arena = EventArena::with_capacity(2000);
            match model.produce(&mut arena, Species::Neutron, 1.45, &mut rng, &mut stats) {
                Ok(_) => {}
                Err(e) => {
                    assert!(matches!(e, EventError::RetriesExhausted { attempts: 1, .. }));
                    assert!(arena.is_empty());
                    failures += 1;
                }
            }
        }
        assert_eq!(failures, stats.multiparticle_retries);
    }

    #[test]
    fn two_body_duplicates_are_detected() {
        let p = hadron(ParticleCode::PROTON, 0.3, 0.938_27);
        let rho = hadron(ParticleCode::RHO0, -0.3, 0.775_5);
        let k = hadron(ParticleCode::K_PLUS, -0.3, 0.493_68);
        assert!(duplicates_two_body(&[p, rho]));
        assert!(duplicates_two_body(&[rho, p]));
        assert!(!duplicates_two_body(&[p, k]));
        assert!(!duplicates_two_body(&[p, rho, rho]));
    }

    #[test]
    fn pi0_acceptance_falls_with_excess() {
        let pi0 = hadron(ParticleCode::PI0, 0.1, 0.134_98);
        let pip = hadron(ParticleCode::PI_PLUS, 0.1, 0.139_57);
        assert_eq!(pi0_acceptance(&[pi0, pip, pip], 1.0), 1.0);
        let a = pi0_acceptance(&[pi0, pi0, pi0, pi0], 1.0);
        assert!((a - 0.25).abs() < 1e-12);
    }

    #[test]
    fn slow_forward_baryons_are_vetoed() {
        let tables = StandardTables::new();
        let slow = [hadron(ParticleCode::PROTON, 0.1, 0.938_27)];
        let fast = [hadron(ParticleCode::PROTON, 2.0, 0.938_27)];
        let backward = [hadron(ParticleCode::NEUTRON, -0.1, 0.939_57)];
        let expected = (2.0 * slow[0].momentum.e / 4.0).powi(2);
        assert!((leading_baryon_acceptance(&slow, 4.0, &tables) - expected).abs() < 1e-12);
        assert!(expected > 0.2 && expected < 0.25, "{expected}");
        assert_eq!(leading_baryon_acceptance(&fast, 4.0, &tables), 1.0);
        assert_eq!(leading_baryon_acceptance(&backward, 4.0, &tables), 1.0);
    }

    #[test]
    fn baryons_at_rest_pass_the_veto_near_onset() {
        let tables = StandardTables::new();
        let resting = [
            hadron(ParticleCode::PROTON, 0.01, 0.938_27),
            hadron(ParticleCode::PI0, -0.2, 0.134_98),
        ];
        assert_eq!(leading_baryon_acceptance(&resting, 1.4, &tables), 1.0);
    }

    #[test]
    fn override_probability_is_logarithmic() {
        let w = (1.6, 1.95);
        assert!((override_probability(1.6, w) - 1.0).abs() < 1e-12);
        assert!(override_probability(1.95, w).abs() < 1e-12);
        let mid = (1.6f64 * 1.95).sqrt();
        assert!((override_probability(mid, w) - 0.5).abs() < 1e-12);
    }

    fn pions(n: usize) -> Vec<Hadron> {
        (0..n)
            .map(|i| hadron(ParticleCode::PI0, 0.1 * i as f64, 0.134_98))
            .collect()
    }

    #[test]
    fn override_yields_fixed_channels() {
        let tables = StandardTables::new();
        let config = EngineConfig::default();
        let model = MultiparticleModel::new(&config, &tables);
        let mut rng = RngStream::new(3);
        let (three, four) = (pions(3), pions(4));
        let mut seen = 0;
        for _ in 0..200 {
            if let Some(h) = model
                .low_energy_override(Species::Neutron, &three, 1.62, &mut rng)
                .unwrap()
            {
                assert_eq!(h.len(), 3);
                assert_eq!(h[0].code, ParticleCode::NEUTRON);
                assert_eq!(charge(&tables, &h), 0);
                seen += 1;
            }
            if let Some(h) = model
                .low_energy_override(Species::Proton, &four, 2.0, &mut rng)
                .unwrap()
            {
                assert_eq!(h.len(), 4);
                assert_eq!(charge(&tables, &h), 1);
            }
        }
        assert!(seen > 150, "{seen}");
        assert!(model
            .low_energy_override(Species::Proton, &three, 3.0, &mut rng)
            .unwrap()
            .is_none());
    }

    #[test]
    fn override_needs_matching_multiplicity() {
        let tables = StandardTables::new();
        let config = EngineConfig::default();
        let model = MultiparticleModel::new(&config, &tables);
        let mut rng = RngStream::new(4);
        for _ in 0..200 {
            for n in [2, 4, 5, 6] {
                let out = model
                    .low_energy_override(Species::Neutron, &pions(n), 1.62, &mut rng)
                    .unwrap();
                assert!(out.is_none(), "{n} hadrons replaced in the lower window");
            }
            for n in [2, 3, 5, 6] {
                let out = model
                    .low_energy_override(Species::Proton, &pions(n), 2.0, &mut rng)
                    .unwrap();
                assert!(out.is_none(), "{n} hadrons replaced in the upper window");
            }
        }
    }
}
