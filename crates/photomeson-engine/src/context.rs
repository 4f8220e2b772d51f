//! The per-context event generator.
//!
//! An [`EventContext`] owns everything one event touches: the event
//! record, the random stream, the stable-particle set and the statistics.
//! Contexts share nothing mutable, so independent contexts can run on
//! different threads; a single context generates one event at a time.
//!
//! # Pipeline
//!
//! 1. Sample `s` for the nucleon–photon pair and the photon direction.
//! 2. Classify the interaction at the nucleon-frame photon energy.
//! 3. Build the final state in the centre-of-mass frame (nucleon along
//!    +z): resonance decay, direct or diffractive two-body production, or
//!    string fragmentation.
//! 4. Decay every unstable entry.
//! 5. Rotate and boost the live entries into the lab frame and check
//!    charge, baryon number and four-momentum against the initial state.

use photomeson_arena::EventArena;
use photomeson_core::{
    EventError, FourVector, ParticleCode, ParticleTable, RngStream, Species, UniformSource,
};
use photomeson_decay::{DecayProcessor, StableSet};
use photomeson_kinematics::{boost_from_frame, rotate, Frame};
use photomeson_tables::cross_section::photon_energy_nucleon_frame;
use photomeson_tables::{RESONANCES, THRESHOLD_S};
use tracing::{debug, warn};

use crate::classifier::{classify, InteractionMode};
use crate::config::{ConfigError, EngineConfig, FailurePolicy};
use crate::metrics::EventStats;
use crate::multiparticle::MultiparticleModel;
use crate::production::{diffractive_production, direct_production, DirectChannel, VectorMeson};
use crate::resonance::{decay_resonance, select_channel, select_resonance};
use crate::sampler::{Collision, InvariantMassSampler};

// ── EventRecord ────────────────────────────────────────────────────

/// One stable particle of a generated event, in the lab frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FinalParticle {
    /// Four-momentum in GeV.
    pub momentum: FourVector,
    /// Mass in GeV.
    pub mass: f64,
    /// Internal particle code.
    pub code: ParticleCode,
    /// PDG Monte-Carlo number.
    pub pdg: i32,
}

/// The stable final state of one event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventRecord {
    /// Stable particles in record order.
    pub particles: Vec<FinalParticle>,
    /// Interaction mode, `None` when nothing interacted.
    pub mode: Option<InteractionMode>,
    /// Invariant mass squared in GeV², `None` when none was reachable.
    pub s: Option<f64>,
    /// Lab four-momentum of nucleon plus photon, once a photon direction
    /// has been drawn.
    pub incident: Option<FourVector>,
}

impl EventRecord {
    fn empty(s: Option<f64>) -> Self {
        Self {
            particles: Vec::new(),
            mode: None,
            s,
            incident: None,
        }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether no particle was produced.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Sum of the particle four-momenta.
    pub fn total_momentum(&self) -> FourVector {
        self.particles.iter().map(|p| p.momentum).sum()
    }
}

// ── EventContext ───────────────────────────────────────────────────

/// Generator state for one stream of events.
pub struct EventContext<'t> {
    config: EngineConfig,
    tables: &'t dyn ParticleTable,
    arena: EventArena,
    rng: RngStream,
    stable: StableSet,
    sampler: InvariantMassSampler,
    stats: EventStats,
}

impl std::fmt::Debug for EventContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventContext")
            .field("config", &self.config)
            .field("seed", &self.rng.seed())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<'t> EventContext<'t> {
    /// Validate `config` and build a context reading particle data from
    /// `tables`, seeded with `seed`.
    pub fn new(
        config: EngineConfig,
        tables: &'t dyn ParticleTable,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let arena = EventArena::with_capacity(config.arena_capacity);
        let stable = StableSet::standard(config.pions_stable);
        let sampler = InvariantMassSampler::new(&config.sampler, tables);
        Ok(Self {
            config,
            tables,
            arena,
            rng: RngStream::new(seed),
            stable,
            sampler,
            stats: EventStats::default(),
        })
    }

    /// The configuration this context was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Statistics since construction or the last [`reset_stats`](Self::reset_stats).
    pub fn stats(&self) -> &EventStats {
        &self.stats
    }

    /// Zero the statistics.
    pub fn reset_stats(&mut self) {
        self.stats = EventStats::default();
    }

    /// Restart the random stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// Generate one event for a nucleon of lab energy `e_nucleon` (along
    /// +z) in an isotropic field of photons of energy `e_photon`.
    ///
    /// Returns an empty record when even a head-on collision stays below
    /// threshold. Invalid energies are always returned as errors; other
    /// failures follow [`EngineConfig::failure_policy`].
    pub fn generate(
        &mut self,
        species: Species,
        e_nucleon: f64,
        e_photon: f64,
    ) -> Result<EventRecord, EventError> {
        let collision = Collision::new(species, self.tables, e_nucleon, e_photon)?;
        let s = self.sampler.sample(&collision, &mut self.rng);
        self.finish(&collision, s)
    }

    /// Like [`generate`](Self::generate) at a fixed invariant mass
    /// squared `s`, which must be reachable by the pair.
    pub fn generate_at(
        &mut self,
        species: Species,
        e_nucleon: f64,
        e_photon: f64,
        s: f64,
    ) -> Result<EventRecord, EventError> {
        let collision = Collision::new(species, self.tables, e_nucleon, e_photon)?;
        let s_max = collision.max_invariant_mass_squared();
        if !s.is_finite() || s > s_max {
            return Err(EventError::InvalidInput {
                reason: format!("s = {s} GeV² exceeds the reachable {s_max} GeV²"),
            });
        }
        self.finish(&collision, Some(s))
    }

    fn finish(&mut self, collision: &Collision, s: Option<f64>) -> Result<EventRecord, EventError> {
        let record = match s {
            Some(s) if s >= THRESHOLD_S => self.interact(collision, s),
            _ => {
                self.stats.below_threshold += 1;
                Ok(EventRecord::empty(s))
            }
        };
        let record = match record {
            Ok(record) => record,
            Err(e) => match self.config.failure_policy {
                FailurePolicy::Propagate => {
                    self.arena.reset();
                    return Err(e);
                }
                FailurePolicy::DiscardEvent => {
                    warn!(error = %e, s = ?s, species = %collision.species, "event discarded");
                    self.arena.reset();
                    self.stats.discarded_events += 1;
                    EventRecord::empty(s)
                }
            },
        };
        self.stats.events += 1;
        self.stats.particles += record.len() as u64;
        Ok(record)
    }

    fn interact(&mut self, collision: &Collision, s: f64) -> Result<EventRecord, EventError> {
        let Self {
            config,
            tables,
            arena,
            rng,
            stable,
            stats,
            ..
        } = self;
        let tables: &dyn ParticleTable = *tables;
        let species = collision.species;
        let sqrt_s = s.sqrt();
        let eps_prime = photon_energy_nucleon_frame(s);
        let cos = collision.incidence_cosine(s);
        let phi = rng.azimuth();
        let total = collision.total_momentum(cos, phi);
        arena.reset();

        let Some(mode) = classify(eps_prime, species, rng) else {
            stats.below_threshold += 1;
            return Ok(EventRecord {
                incident: Some(total),
                ..EventRecord::empty(Some(s))
            });
        };
        stats.record_mode(mode);
        debug!(%mode, s, %species, "interaction");

        match mode {
            InteractionMode::Resonance => {
                let index = select_resonance(eps_prime, species, rng).ok_or_else(|| {
                    EventError::KinematicallyForbidden {
                        reason: format!("no resonance contributes at s = {s} GeV²"),
                    }
                })?;
                let decay = select_channel(&RESONANCES[index], species, sqrt_s, tables, rng)?;
                decay_resonance(arena, species, index, sqrt_s, &decay, tables, rng)?;
            }
            InteractionMode::DirectSinglePion => {
                direct_production(arena, species, sqrt_s, DirectChannel::SinglePion, tables, rng)?;
            }
            InteractionMode::DirectDeltaPion => {
                direct_production(arena, species, sqrt_s, DirectChannel::DeltaPion, tables, rng)?;
            }
            InteractionMode::DiffractiveRho => {
                diffractive_production(arena, species, sqrt_s, VectorMeson::Rho, tables, rng)?;
            }
            InteractionMode::DiffractiveOmega => {
                diffractive_production(arena, species, sqrt_s, VectorMeson::Omega, tables, rng)?;
            }
            InteractionMode::Multiparticle => {
                MultiparticleModel::new(config, tables).produce(arena, species, sqrt_s, rng, stats)?;
            }
        }

        let decays = DecayProcessor::new(&config.decay).run(arena, tables, stable, rng)?;
        stats.decays += decays as u64;

        let (theta_n, phi_n) = collision.cm_nucleon_direction(cos, phi);
        let frame = Frame::new(total, sqrt_s)?;
        arena.transform_alive(|p| boost_from_frame(&rotate(p, theta_n, phi_n), &frame));
        check_conservation(arena, tables, species, &total, config.conservation_tolerance)?;

        let snapshot = arena.compact_stable();
        let particles = snapshot
            .entries()
            .iter()
            .map(|e| {
                let pdg = tables
                    .pdg_id(e.code)
                    .ok_or(EventError::UnknownParticle { code: e.code })?;
                Ok(FinalParticle {
                    momentum: e.momentum,
                    mass: e.mass,
                    code: e.code,
                    pdg,
                })
            })
            .collect::<Result<Vec<_>, EventError>>()?;
        Ok(EventRecord {
            particles,
            mode: Some(mode),
            s: Some(s),
            incident: Some(total),
        })
    }
}

/// Compare the live entries with the initial state: charge and baryon
/// number exactly, each momentum component within `tolerance · E`.
fn check_conservation(
    arena: &EventArena,
    tables: &dyn ParticleTable,
    species: Species,
    initial: &FourVector,
    tolerance: f64,
) -> Result<(), EventError> {
    let totals = arena.totals(tables)?;
    if totals.charge != species.charge() {
        return Err(EventError::ConservationViolated {
            quantity: "charge",
            expected: f64::from(species.charge()),
            found: f64::from(totals.charge),
        });
    }
    if totals.baryon_number != 1 {
        return Err(EventError::ConservationViolated {
            quantity: "baryon number",
            expected: 1.0,
            found: f64::from(totals.baryon_number),
        });
    }
    let limit = tolerance * initial.e;
    let found = totals.momentum;
    let components = [
        ("px", initial.px, found.px),
        ("py", initial.py, found.py),
        ("pz", initial.pz, found.pz),
        ("energy", initial.e, found.e),
    ];
    for (quantity, expected, found) in components {
        if !found.is_finite() || (found - expected).abs() > limit {
            return Err(EventError::ConservationViolated {
                quantity,
                expected,
                found,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use photomeson_tables::StandardTables;

    fn context(tables: &StandardTables, seed: u64) -> EventContext<'_> {
        EventContext::new(EngineConfig::default(), tables, seed).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let tables = StandardTables::new();
        let config = EngineConfig {
            max_multiparticle_retries: 0,
            ..EngineConfig::default()
        };
        assert!(EventContext::new(config, &tables, 1).is_err());
    }

    #[test]
    fn unreachable_s_is_invalid_input() {
        let tables = StandardTables::new();
        let mut ctx = context(&tables, 1);
        let err = ctx.generate_at(Species::Proton, 2.0, 0.1, 100.0).unwrap_err();
        assert!(matches!(err, EventError::InvalidInput { .. }));
        assert_eq!(ctx.stats().events, 0);
    }

    #[test]
    fn below_threshold_s_is_empty() {
        let tables = StandardTables::new();
        let mut ctx = context(&tables, 2);
        let record = ctx.generate_at(Species::Neutron, 1e9, 1e-9, 1.0).unwrap();
        assert!(record.is_empty());
        assert_eq!(record.mode, None);
        assert_eq!(ctx.stats().below_threshold, 1);
    }

    #[test]
    fn record_conserves_lab_momentum() {
        let tables = StandardTables::new();
        let mut ctx = context(&tables, 3);
        for _ in 0..20 {
            let record = ctx.generate(Species::Proton, 20.0, 0.5).unwrap();
            if record.is_empty() {
                continue;
            }
            let total = record.total_momentum();
            let incident = record.incident.unwrap();
            assert!((incident.e - 20.5).abs() < 1e-12);
            assert!(total.max_abs_diff(&incident) < 1e-6, "{total:?}");
            assert!(record.particles.iter().all(|p| p.pdg != 0));
        }
        assert_eq!(ctx.stats().events, 20);
    }

    #[test]
    fn conservation_check_reports_charge() {
        let tables = StandardTables::new();
        let mut arena = EventArena::with_capacity(8);
        arena
            .push(photomeson_arena::Entry::new(
                ParticleCode::NEUTRON,
                FourVector::at_rest(0.939_57),
                0.939_57,
            ))
            .unwrap();
        let err = check_conservation(
            &arena,
            &tables,
            Species::Proton,
            &FourVector::at_rest(0.939_57),
            1e-3,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EventError::ConservationViolated { quantity: "charge", .. }
        ));
    }

    #[test]
    fn reseeding_repeats_events() {
        let tables = StandardTables::new();
        let mut ctx = context(&tables, 4);
        let a = ctx.generate(Species::Neutron, 10.0, 1.0).unwrap();
        ctx.reseed(4);
        let b = ctx.generate(Species::Neutron, 10.0, 1.0).unwrap();
        assert_eq!(a, b);
    }
}
