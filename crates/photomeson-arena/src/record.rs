//! The append-only event record.
//!
//! [`EventArena`] owns every entry created while one event is generated.
//! Entries are only ever appended; decayed and fragmented entries stay in
//! place with their status flipped, so the record doubles as the event
//! history. The record can be rolled back to a [`Checkpoint`], which is how
//! a failed multiparticle attempt discards its partial output before the
//! next try.

use photomeson_core::{EventError, FourVector, ParticleTable};

use crate::config::ArenaConfig;
use crate::entry::{Entry, Status};
use crate::error::ArenaError;
use crate::snapshot::EventSnapshot;

/// Length of the record at some point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// Number of entries at the checkpoint.
    pub fn len(self) -> usize {
        self.0
    }

    /// Whether the record was empty at the checkpoint.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Conserved quantities summed over a set of entries.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    /// Electric charge in units of e.
    pub charge: i32,
    /// Baryon number.
    pub baryon_number: i32,
    /// Four-momentum.
    pub momentum: FourVector,
}

/// Fixed-capacity, append-only particle record for one event.
#[derive(Clone, Debug)]
pub struct EventArena {
    entries: Vec<Entry>,
    capacity: usize,
}

impl EventArena {
    /// Create an empty record.
    pub fn new(config: &ArenaConfig) -> Self {
        Self::with_capacity(config.capacity)
    }

    /// Create an empty record holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Drop every entry. The backing allocation is kept.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries, including history.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry and return its index.
    pub fn push(&mut self, entry: Entry) -> Result<usize, ArenaError> {
        if self.entries.len() >= self.capacity {
            return Err(ArenaError::CapacityExceeded {
                requested: self.entries.len() + 1,
                capacity: self.capacity,
            });
        }
        self.entries.push(entry);
        Ok(self.entries.len() - 1)
    }

    /// Append several entries atomically: either all fit or none is added.
    pub fn extend<I>(&mut self, entries: I) -> Result<std::ops::Range<usize>, ArenaError>
    where
        I: IntoIterator<Item = Entry>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = entries.into_iter();
        let start = self.entries.len();
        let requested = start + iter.len();
        if requested > self.capacity {
            return Err(ArenaError::CapacityExceeded {
                requested,
                capacity: self.capacity,
            });
        }
        self.entries.extend(iter);
        Ok(start..self.entries.len())
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Result<&Entry, ArenaError> {
        let len = self.entries.len();
        self.entries
            .get(index)
            .ok_or(ArenaError::IndexOutOfRange { index, len })
    }

    /// Mutable entry at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Entry, ArenaError> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or(ArenaError::IndexOutOfRange { index, len })
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Entries that are still alive, with their indices.
    pub fn alive(&self) -> impl Iterator<Item = (usize, &Entry)> {
        self.entries.iter().enumerate().filter(|(_, e)| e.is_alive())
    }

    /// Remember the current length.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.entries.len())
    }

    /// Discard everything appended after `checkpoint`.
    ///
    /// Entries before the checkpoint whose status changed since are not
    /// restored; callers only mark entries after taking the checkpoint
    /// they intend to roll back to.
    pub fn truncate(&mut self, checkpoint: Checkpoint) {
        self.entries.truncate(checkpoint.0);
    }

    /// Flag a live entry as decayed and shift its code to the marker range.
    pub fn mark_decayed(&mut self, index: usize) -> Result<(), ArenaError> {
        let entry = self.get_mut(index)?;
        if !entry.is_alive() {
            return Err(ArenaError::NotAlive { index });
        }
        entry.status = Status::Decayed;
        entry.code = entry.code.marked_decayed();
        Ok(())
    }

    /// Flag a live parton entry as hadronised.
    pub fn mark_fragmented(&mut self, index: usize) -> Result<(), ArenaError> {
        let entry = self.get_mut(index)?;
        if !entry.is_alive() {
            return Err(ArenaError::NotAlive { index });
        }
        entry.status = Status::Fragmented;
        Ok(())
    }

    /// Sum charge, baryon number and four-momentum over live entries.
    pub fn totals(&self, table: &dyn ParticleTable) -> Result<Totals, EventError> {
        let mut totals = Totals::default();
        for (_, e) in self.alive() {
            totals.charge += table.require_charge(e.code)?;
            totals.baryon_number += table.require_baryon_number(e.code)?;
            totals.momentum += e.momentum;
        }
        Ok(totals)
    }

    /// Copy the live entries into an immutable snapshot.
    pub fn compact_stable(&self) -> EventSnapshot {
        EventSnapshot::new(self.alive().map(|(_, e)| e.clone()).collect())
    }

    /// Apply `f` to the momentum of every live entry.
    pub fn transform_alive<F>(&mut self, mut f: F)
    where
        F: FnMut(&FourVector) -> FourVector,
    {
        for e in self.entries.iter_mut().filter(|e| e.is_alive()) {
            e.momentum = f(&e.momentum);
        }
    }
}
