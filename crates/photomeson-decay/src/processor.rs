//! The single-pass decay-chain processor.
//!
//! [`DecayProcessor::run`] walks the event record once from the front.
//! Daughters are appended at the end, so they are reached later in the
//! same pass; a chain such as `Δ → p π0 → p γ γ` resolves without
//! recursion. Decayed parents stay in the record with their code shifted
//! to the marker range.

use photomeson_arena::{Entry, EventArena};
use photomeson_core::{MatrixElement, ParticleCode, ParticleTable, UniformSource};
use photomeson_kinematics::{
    boost_from_frame, phase_space_weighted, Frame, KinematicsError, Momenta,
};
use smallvec::SmallVec;
use tracing::trace;

use crate::config::DecayConfig;
use crate::error::DecayError;
use crate::matrix::{dalitz_decay, weight};
use crate::stable::StableSet;

/// Decays every unstable entry of an event record.
#[derive(Clone, Copy, Debug)]
pub struct DecayProcessor<'a> {
    config: &'a DecayConfig,
}

impl<'a> DecayProcessor<'a> {
    /// Processor with the parameters of `config`.
    pub fn new(config: &'a DecayConfig) -> Self {
        Self { config }
    }

    /// Decay all live entries not in `stable`, including the daughters
    /// produced along the way. Returns the number of decays performed.
    pub fn run(
        &self,
        arena: &mut EventArena,
        tables: &dyn ParticleTable,
        stable: &StableSet,
        rng: &mut dyn UniformSource,
    ) -> Result<usize, DecayError> {
        let mut decays = 0;
        let mut index = 0;
        while index < arena.len() {
            let entry = arena.get(index)?;
            if entry.is_alive() && !stable.contains(entry.code) && tables.is_unstable(entry.code) {
                self.decay_entry(arena, index, tables, rng)?;
                decays += 1;
            }
            index += 1;
        }
        Ok(decays)
    }

    /// Decay the entry at `index` and return the range of its daughters.
    pub fn decay_entry(
        &self,
        arena: &mut EventArena,
        index: usize,
        tables: &dyn ParticleTable,
        rng: &mut dyn UniformSource,
    ) -> Result<std::ops::Range<usize>, DecayError> {
        let parent = arena.get(index)?.clone();
        let code = parent.code;
        let channels = tables
            .decay_channels(code)
            .ok_or(DecayError::UnknownParticle { code })?;

        let mut weights: SmallVec<[f64; 8]> = SmallVec::with_capacity(channels.len());
        let mut lightest = f64::INFINITY;
        for channel in channels {
            let sum = daughter_masses(&channel.daughters, tables)?.iter().sum::<f64>();
            lightest = lightest.min(sum);
            let open = channel.daughters.len() == 1 || sum < parent.mass;
            weights.push(if open { channel.branching } else { 0.0 });
        }
        let chosen = rng
            .pick_weighted(&weights)
            .ok_or(DecayError::ClosedChannel {
                code,
                mass: parent.mass,
                required: lightest,
            })?;
        let channel = &channels[chosen];
        let masses = daughter_masses(&channel.daughters, tables)?;
        trace!(index, code = %code, channel = chosen, "decay");

        let daughters: Vec<Entry> = if let [only] = channel.daughters.as_slice() {
            vec![Entry::new(*only, parent.momentum, masses[0]).with_parent(index)]
        } else {
            let rest = self
                .rest_frame_momenta(&parent, &channel.daughters, channel.matrix_element, &masses, rng)
                .map_err(|e| match e {
                    KinematicsError::RetriesExhausted { attempts } => {
                        DecayError::RetriesExhausted { code, attempts }
                    }
                    other => other.into(),
                })?;
            let frame = Frame::new(parent.momentum, parent.mass)?;
            channel
                .daughters
                .iter()
                .zip(rest.iter())
                .zip(masses.iter())
                .map(|((&d, p), &m)| Entry::new(d, boost_from_frame(p, &frame), m).with_parent(index))
                .collect()
        };
        let range = arena.extend(daughters)?;
        arena.mark_decayed(index)?;
        Ok(range)
    }

    fn rest_frame_momenta(
        &self,
        parent: &Entry,
        daughters: &[ParticleCode],
        matrix_element: MatrixElement,
        masses: &[f64],
        rng: &mut dyn UniformSource,
    ) -> Result<Momenta, KinematicsError> {
        let attempts = self.config.max_attempts;
        let me = if self.config.matrix_elements {
            matrix_element
        } else {
            MatrixElement::Phase
        };
        if me == MatrixElement::Dalitz {
            let photons: SmallVec<[usize; 1]> = daughters
                .iter()
                .enumerate()
                .filter(|(_, d)| **d == ParticleCode::PHOTON)
                .map(|(i, _)| i)
                .collect();
            if let [photon] = photons.as_slice() {
                return dalitz_decay(parent.mass, masses, *photon, rng, attempts);
            }
        }
        let (mass, axis) = (parent.mass, parent.spin_axis);
        phase_space_weighted(mass, masses, rng, attempts, |m| weight(me, mass, masses, m, axis))
    }
}

fn daughter_masses(
    daughters: &[ParticleCode],
    tables: &dyn ParticleTable,
) -> Result<SmallVec<[f64; 4]>, DecayError> {
    daughters
        .iter()
        .map(|&d| tables.mass(d).ok_or(DecayError::UnknownParticle { code: d }))
        .collect()
}
