//! Error types shared across the event generator.
//!
//! [`EventError`] is the fatal class: an event that raises it is unusable
//! and is either returned to the caller or discarded, depending on the
//! context's failure policy. Recoverable rejections never reach this type;
//! they are retried inside the loop that produced them.

use std::error::Error;
use std::fmt;

use crate::code::ParticleCode;

/// Errors from the fixed-capacity event record.
///
/// Defined here so that [`EventError`] can wrap it; the arena crate
/// re-exports it as its own error type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The record is full.
    CapacityExceeded {
        /// Number of entries the push would have required.
        requested: usize,
        /// Maximum number of entries.
        capacity: usize,
    },
    /// An entry index past the end of the record.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Current record length.
        len: usize,
    },
    /// The entry was already decayed or fragmented.
    NotAlive {
        /// Index of the entry.
        index: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                capacity,
            } => write!(
                f,
                "event record capacity exceeded: requested {requested} entries, capacity {capacity}"
            ),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "entry {index} out of range (len {len})")
            }
            Self::NotAlive { index } => write!(f, "entry {index} is no longer alive"),
        }
    }
}

impl Error for ArenaError {}

/// Fatal event-generation errors.
#[derive(Clone, Debug, PartialEq)]
pub enum EventError {
    /// A conserved quantity of the final state differs from the initial state.
    ConservationViolated {
        /// Which quantity failed (`"charge"`, `"baryon number"`, `"energy"`, ...).
        quantity: &'static str,
        /// Value of the initial state.
        expected: f64,
        /// Value summed over the final state.
        found: f64,
    },
    /// A bookkeeping-critical retry loop ran out of attempts.
    RetriesExhausted {
        /// Name of the stage that gave up.
        stage: &'static str,
        /// Number of attempts made.
        attempts: u32,
    },
    /// A particle code with no entry in the particle table.
    UnknownParticle {
        /// The unknown code.
        code: ParticleCode,
    },
    /// A configuration the tables claim is reachable cannot be built.
    KinematicallyForbidden {
        /// Description of the impossible configuration.
        reason: String,
    },
    /// The event record rejected an operation.
    Arena(ArenaError),
    /// The caller passed energies or masses that cannot describe an event.
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConservationViolated {
                quantity,
                expected,
                found,
            } => write!(
                f,
                "{quantity} not conserved: expected {expected}, found {found}"
            ),
            Self::RetriesExhausted { stage, attempts } => {
                write!(f, "{stage} gave up after {attempts} attempts")
            }
            Self::UnknownParticle { code } => write!(f, "unknown particle code {code}"),
            Self::KinematicallyForbidden { reason } => {
                write!(f, "kinematically forbidden: {reason}")
            }
            Self::Arena(e) => write!(f, "event record: {e}"),
            Self::InvalidInput { reason } => write!(f, "invalid input: {reason}"),
        }
    }
}

impl Error for EventError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for EventError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}
