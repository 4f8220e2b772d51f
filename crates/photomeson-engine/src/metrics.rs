//! Per-context event statistics.
//!
//! [`EventStats`] accumulates over every call to
//! [`EventContext::generate`](crate::EventContext::generate) until it is
//! reset; nothing here feeds back into the physics.

use crate::classifier::InteractionMode;

/// Cumulative counters of one generator context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventStats {
    /// Calls that returned an event, empty or not.
    pub events: u64,
    /// Events below the interaction threshold.
    pub below_threshold: u64,
    /// Events per [`InteractionMode`], indexed by [`InteractionMode::index`].
    pub modes: [u64; 6],
    /// Re-attempts of the multiparticle branch.
    pub multiparticle_retries: u64,
    /// Multiparticle attempts rejected by an empirical correction.
    pub correction_rejections: u64,
    /// Multiparticle events replaced by a low-multiplicity phase-space state.
    pub low_energy_overrides: u64,
    /// Particle decays performed by the decay-chain processor.
    pub decays: u64,
    /// Events dropped under [`FailurePolicy::DiscardEvent`](crate::FailurePolicy).
    pub discarded_events: u64,
    /// Stable particles returned.
    pub particles: u64,
}

impl EventStats {
    /// Events generated in `mode`.
    pub fn mode_count(&self, mode: InteractionMode) -> u64 {
        self.modes[mode.index()]
    }

    pub(crate) fn record_mode(&mut self, mode: InteractionMode) {
        self.modes[mode.index()] += 1;
    }
}
