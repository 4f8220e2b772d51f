//! Errors raised while decaying the event record.

use std::error::Error;
use std::fmt;

use photomeson_core::{ArenaError, EventError, ParticleCode};
use photomeson_kinematics::KinematicsError;

/// Fatal failures of the decay-chain processor.
#[derive(Clone, Debug, PartialEq)]
pub enum DecayError {
    /// A parent or daughter code missing from the particle table.
    UnknownParticle {
        /// The unknown code.
        code: ParticleCode,
    },
    /// No decay channel of the entry is open at its mass.
    ClosedChannel {
        /// Code of the entry.
        code: ParticleCode,
        /// Mass of the entry.
        mass: f64,
        /// Lightest daughter mass sum over all channels.
        required: f64,
    },
    /// Accept/reject generation of one decay ran out of attempts.
    RetriesExhausted {
        /// Code of the decaying entry.
        code: ParticleCode,
        /// Number of attempts made.
        attempts: u32,
    },
    /// The kinematics of a decay could not be built.
    Kinematics(KinematicsError),
    /// The event record rejected the daughters.
    Arena(ArenaError),
}

impl fmt::Display for DecayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownParticle { code } => write!(f, "no particle data for code {code}"),
            Self::ClosedChannel {
                code,
                mass,
                required,
            } => write!(
                f,
                "particle {code} of mass {mass} has no open channel (lightest needs {required})"
            ),
            Self::RetriesExhausted { code, attempts } => {
                write!(f, "decay of {code} gave up after {attempts} attempts")
            }
            Self::Kinematics(e) => write!(f, "decay kinematics: {e}"),
            Self::Arena(e) => write!(f, "event record: {e}"),
        }
    }
}

impl Error for DecayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kinematics(e) => Some(e),
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for DecayError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

impl From<KinematicsError> for DecayError {
    fn from(e: KinematicsError) -> Self {
        Self::Kinematics(e)
    }
}

impl From<DecayError> for EventError {
    fn from(e: DecayError) -> Self {
        match e {
            DecayError::UnknownParticle { code } => Self::UnknownParticle { code },
            DecayError::RetriesExhausted { attempts, .. } => Self::RetriesExhausted {
                stage: "particle decay",
                attempts,
            },
            DecayError::Arena(a) => Self::Arena(a),
            other => Self::KinematicallyForbidden {
                reason: other.to_string(),
            },
        }
    }
}
