//! Event record configuration.

use photomeson_core::EventError;

/// Configuration for the event record.
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Maximum number of entries, including decayed history.
    ///
    /// Default: 2000. A single event at the highest energies the cross
    /// sections are tuned for stays well below a few hundred entries.
    pub capacity: usize,
}

impl ArenaConfig {
    /// Default maximum number of entries.
    pub const DEFAULT_CAPACITY: usize = 2000;

    /// Create a config with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Check that the capacity can hold at least an initial state and
    /// one two-body final state.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.capacity < 4 {
            return Err(EventError::InvalidInput {
                reason: format!("arena capacity {} is below the minimum of 4", self.capacity),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
