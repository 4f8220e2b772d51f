//! Kinematics error type.

use std::error::Error;
use std::fmt;

use photomeson_core::EventError;

/// Errors from kinematic reconstruction.
#[derive(Clone, Debug, PartialEq)]
pub enum KinematicsError {
    /// The parent mass cannot accommodate the daughter masses.
    BelowThreshold {
        /// Available invariant mass.
        mass: f64,
        /// Sum of the requested daughter masses.
        required: f64,
    },
    /// A bounded rejection loop ran out of attempts.
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
    },
    /// The input momenta cannot define a rest frame or axis.
    Degenerate {
        /// Description of the degeneracy.
        reason: &'static str,
    },
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowThreshold { mass, required } => {
                write!(f, "mass {mass} below threshold {required}")
            }
            Self::RetriesExhausted { attempts } => {
                write!(f, "phase-space generation gave up after {attempts} attempts")
            }
            Self::Degenerate { reason } => write!(f, "degenerate kinematics: {reason}"),
        }
    }
}

impl Error for KinematicsError {}

impl From<KinematicsError> for EventError {
    fn from(e: KinematicsError) -> Self {
        match e {
            KinematicsError::RetriesExhausted { attempts } => EventError::RetriesExhausted {
                stage: "phase-space generation",
                attempts,
            },
            other => EventError::KinematicallyForbidden {
                reason: other.to_string(),
            },
        }
    }
}
