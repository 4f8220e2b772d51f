//! Hadronisation error type.
//!
//! Every variant except [`FragmentError::UnknownHadron`] is a recoverable
//! rejection: the caller retries the whole multiparticle branch.

use std::error::Error;
use std::fmt;

use photomeson_core::{EventError, Flavor, ParticleCode};
use photomeson_kinematics::KinematicsError;

/// Failure of a fragmentation or shower attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum FragmentError {
    /// Two flavors cannot be joined into a colour singlet.
    FlavorMismatch {
        /// First flavor.
        first: Flavor,
        /// Second flavor.
        second: Flavor,
    },
    /// The system is too light for the hadrons it must produce.
    MassTooSmall {
        /// Available invariant mass.
        mass: f64,
        /// Smallest mass that would have worked.
        required: f64,
    },
    /// Energy-momentum bookkeeping ran out of phase space.
    EnergyExhausted {
        /// Step that failed.
        stage: &'static str,
    },
    /// A bounded restart loop gave up.
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
    },
    /// A closed string without gluons.
    NoGluons,
    /// A composed hadron is missing from the particle table.
    UnknownHadron {
        /// The hadron code.
        code: ParticleCode,
    },
}

impl FragmentError {
    /// Whether retrying the branch can succeed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::UnknownHadron { .. })
    }
}

impl fmt::Display for FragmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlavorMismatch { first, second } => {
                write!(f, "flavors {first} and {second} do not form a singlet")
            }
            Self::MassTooSmall { mass, required } => {
                write!(f, "system mass {mass} below required {required}")
            }
            Self::EnergyExhausted { stage } => write!(f, "energy exhausted during {stage}"),
            Self::RetriesExhausted { attempts } => {
                write!(f, "fragmentation gave up after {attempts} attempts")
            }
            Self::NoGluons => write!(f, "closed string has no gluons"),
            Self::UnknownHadron { code } => write!(f, "hadron {code} has no table entry"),
        }
    }
}

impl Error for FragmentError {}

impl From<KinematicsError> for FragmentError {
    fn from(e: KinematicsError) -> Self {
        match e {
            KinematicsError::BelowThreshold { mass, required } => {
                Self::MassTooSmall { mass, required }
            }
            KinematicsError::RetriesExhausted { attempts } => Self::RetriesExhausted { attempts },
            KinematicsError::Degenerate { reason } => Self::EnergyExhausted { stage: reason },
        }
    }
}

impl From<FragmentError> for EventError {
    fn from(e: FragmentError) -> Self {
        match e {
            FragmentError::UnknownHadron { code } => EventError::UnknownParticle { code },
            FragmentError::RetriesExhausted { attempts } => EventError::RetriesExhausted {
                stage: "string fragmentation",
                attempts,
            },
            other => EventError::KinematicallyForbidden {
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_hadrons_are_fatal() {
        assert!(FragmentError::NoGluons.is_recoverable());
        assert!(FragmentError::EnergyExhausted { stage: "x" }.is_recoverable());
        assert!(!FragmentError::UnknownHadron {
            code: ParticleCode(999)
        }
        .is_recoverable());
    }

    #[test]
    fn kinematic_threshold_becomes_mass_too_small() {
        let e: FragmentError = KinematicsError::BelowThreshold {
            mass: 1.0,
            required: 2.0,
        }
        .into();
        assert_eq!(
            e,
            FragmentError::MassTooSmall {
                mass: 1.0,
                required: 2.0
            }
        );
    }

    #[test]
    fn converts_to_event_error() {
        let e: EventError = FragmentError::UnknownHadron {
            code: ParticleCode(77),
        }
        .into();
        assert_eq!(
            e,
            EventError::UnknownParticle {
                code: ParticleCode(77)
            }
        );
        let e: EventError = FragmentError::RetriesExhausted { attempts: 100 }.into();
        assert!(matches!(e, EventError::RetriesExhausted { attempts: 100, .. }));
    }
}
