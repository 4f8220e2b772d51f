//! Immutable copy of the final state.

use photomeson_core::FourVector;

use crate::entry::Entry;

/// The live entries of an event record, compacted and frozen.
///
/// Produced by [`EventArena::compact_stable`](crate::EventArena::compact_stable)
/// once decays are done. Owns its data so it can outlive the arena and be
/// handed across threads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventSnapshot {
    entries: Vec<Entry>,
}

impl EventSnapshot {
    pub(crate) fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries in record order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Sum of all four-momenta.
    pub fn total_momentum(&self) -> FourVector {
        self.entries.iter().map(|e| e.momentum).sum()
    }

    /// Consume into the owned entries.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}
