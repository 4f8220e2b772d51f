//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] gathers every tunable of one generator context.
//! [`validate()`](EngineConfig::validate) checks ranges once, when
//! [`EventContext`](crate::EventContext) is built; nothing is re-checked
//! per event.

use std::error::Error;
use std::fmt;

use photomeson_arena::ArenaConfig;
use photomeson_core::EventError;
use photomeson_decay::DecayConfig;
use photomeson_fragment::{FragmentationConfig, ShowerConfig};

// ── FailurePolicy ──────────────────────────────────────────────────

/// What a context does with a fatal event error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return the error to the caller.
    #[default]
    Propagate,
    /// Log it, count it in [`EventStats::discarded_events`](crate::EventStats),
    /// and return an empty event.
    DiscardEvent,
}

// ── SamplerConfig ──────────────────────────────────────────────────

/// Invariant-mass sampler parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplerConfig {
    /// `s` in GeV² separating rejection sampling from the power-law
    /// tail. Default: 10.0.
    pub pivot: f64,
    /// Exponent of the tail envelope `s^exponent`. Default: 1.095.
    pub tail_exponent: f64,
    /// Safety factor applied to the scanned envelope heights. Default: 1.1.
    pub envelope_margin: f64,
    /// Attempts before the last one is returned as is. Default: 100 000.
    pub max_attempts: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            pivot: 10.0,
            tail_exponent: 1.095,
            envelope_margin: 1.1,
            max_attempts: 100_000,
        }
    }
}

// ── CorrectionConfig ───────────────────────────────────────────────

/// Switches for the empirical corrections of multiparticle events.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrectionConfig {
    /// Retry events whose hadrons repeat a two-body diffractive or
    /// direct final state. Default: true.
    pub reject_two_body: bool,
    /// Suppress events with more neutral pions than isospin suggests.
    /// Default: true.
    pub pi0_suppression: bool,
    /// Neutral pions tolerated above half the charged pion count.
    /// Default: 1.0.
    pub pi0_tolerance: f64,
    /// Accept events whose most forward baryon moves along the nucleon
    /// with probability `(2E_B/√s)²`. Default: true.
    pub leading_baryon_veto: bool,
    /// Replace three-hadron events in the lower window and four-hadron
    /// events in the upper window by exact phase-space states.
    /// Default: true.
    pub low_energy_override: bool,
    /// √s window in GeV of the three-body override. Default: 1.6–1.95.
    pub three_body_window: (f64, f64),
    /// √s window in GeV of the four-body override. Default: 1.95–2.55.
    pub four_body_window: (f64, f64),
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            reject_two_body: true,
            pi0_suppression: true,
            pi0_tolerance: 1.0,
            leading_baryon_veto: true,
            low_energy_override: true,
            three_body_window: (1.6, 1.95),
            four_body_window: (1.95, 2.55),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`].
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Arena configuration is invalid.
    Arena(EventError),
    /// Fragmentation parameters are out of range.
    InvalidFragmentation {
        /// Description of the violated range.
        reason: String,
    },
    /// Shower parameters are out of range.
    InvalidShower {
        /// Description of the violated range.
        reason: String,
    },
    /// Decay parameters are out of range.
    InvalidDecay {
        /// Description of the violated range.
        reason: String,
    },
    /// Invariant-mass sampler parameters are out of range.
    InvalidSampler {
        /// Description of the violated range.
        reason: String,
    },
    /// Correction windows are empty or inverted.
    InvalidCorrections {
        /// Description of the violated range.
        reason: String,
    },
    /// Conservation tolerance is not finite and positive.
    InvalidTolerance {
        /// The invalid value.
        value: f64,
    },
    /// Multiparticle retries set to zero.
    RetriesZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::InvalidFragmentation { reason } => {
                write!(f, "invalid fragmentation config: {reason}")
            }
            Self::InvalidShower { reason } => write!(f, "invalid shower config: {reason}"),
            Self::InvalidDecay { reason } => write!(f, "invalid decay config: {reason}"),
            Self::InvalidSampler { reason } => write!(f, "invalid sampler config: {reason}"),
            Self::InvalidCorrections { reason } => {
                write!(f, "invalid correction config: {reason}")
            }
            Self::InvalidTolerance { value } => {
                write!(f, "conservation_tolerance must be finite and positive, got {value}")
            }
            Self::RetriesZero => write!(f, "max_multiparticle_retries must be at least 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EventError> for ConfigError {
    fn from(e: EventError) -> Self {
        Self::Arena(e)
    }
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Complete configuration of one generator context.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Invariant-mass sampler.
    pub sampler: SamplerConfig,
    /// Lund fragmentation parameters.
    pub fragmentation: FragmentationConfig,
    /// Final-state parton shower. Off by default.
    pub shower: ShowerConfig,
    /// Empirical corrections of multiparticle events.
    pub corrections: CorrectionConfig,
    /// Decay-chain processor.
    pub decay: DecayConfig,
    /// Keep π0 and π± (and K±, K0L, μ±) in the final state. Default: false.
    pub pions_stable: bool,
    /// Event record capacity. Default: 2000.
    pub arena_capacity: usize,
    /// Relative tolerance of the final four-momentum check. Default: 1e-3.
    pub conservation_tolerance: f64,
    /// Handling of fatal event errors. Default: [`FailurePolicy::Propagate`].
    pub failure_policy: FailurePolicy,
    /// Re-attempts of the multiparticle branch before giving up. Default: 50.
    pub max_multiparticle_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sampler: SamplerConfig::default(),
            fragmentation: FragmentationConfig::default(),
            shower: ShowerConfig::default(),
            corrections: CorrectionConfig::default(),
            decay: DecayConfig::default(),
            pions_stable: false,
            arena_capacity: ArenaConfig::DEFAULT_CAPACITY,
            conservation_tolerance: 1e-3,
            failure_policy: FailurePolicy::Propagate,
            max_multiparticle_retries: 50,
        }
    }
}

impl EngineConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ArenaConfig::new(self.arena_capacity).validate()?;
        self.fragmentation
            .validate()
            .map_err(|reason| ConfigError::InvalidFragmentation { reason })?;
        self.shower
            .validate()
            .map_err(|reason| ConfigError::InvalidShower { reason })?;
        self.decay
            .validate()
            .map_err(|reason| ConfigError::InvalidDecay { reason })?;

        let s = &self.sampler;
        if !s.pivot.is_finite() || s.pivot <= photomeson_tables::THRESHOLD_S {
            return Err(ConfigError::InvalidSampler {
                reason: format!("pivot must lie above the threshold, got {}", s.pivot),
            });
        }
        if !s.tail_exponent.is_finite() || s.tail_exponent <= 0.0 {
            return Err(ConfigError::InvalidSampler {
                reason: format!("tail_exponent must be positive, got {}", s.tail_exponent),
            });
        }
        if !s.envelope_margin.is_finite() || s.envelope_margin < 1.0 {
            return Err(ConfigError::InvalidSampler {
                reason: format!("envelope_margin must be >= 1.0, got {}", s.envelope_margin),
            });
        }
        if s.max_attempts == 0 {
            return Err(ConfigError::InvalidSampler {
                reason: "max_attempts must be at least 1".to_string(),
            });
        }

        let c = &self.corrections;
        for (name, (lo, hi)) in [
            ("three_body_window", c.three_body_window),
            ("four_body_window", c.four_body_window),
        ] {
            if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo < hi) {
                return Err(ConfigError::InvalidCorrections {
                    reason: format!("{name} ({lo}, {hi}) is not an increasing range"),
                });
            }
        }
        if !c.pi0_tolerance.is_finite() || c.pi0_tolerance < 0.0 {
            return Err(ConfigError::InvalidCorrections {
                reason: format!("pi0_tolerance must be >= 0, got {}", c.pi0_tolerance),
            });
        }

        if !self.conservation_tolerance.is_finite() || self.conservation_tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance {
                value: self.conservation_tolerance,
            });
        }
        if self.max_multiparticle_retries == 0 {
            return Err(ConfigError::RetriesZero);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.arena_capacity, 2000);
        assert_eq!(config.max_multiparticle_retries, 50);
        assert_eq!(config.sampler.max_attempts, 100_000);
        assert_eq!(config.failure_policy, FailurePolicy::Propagate);
    }

    #[test]
    fn small_arena_is_rejected() {
        let config = EngineConfig {
            arena_capacity: 1,
            ..EngineConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Arena(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn pivot_below_threshold_is_rejected() {
        let mut config = EngineConfig::default();
        config.sampler.pivot = 1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSampler { .. })
        ));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let mut config = EngineConfig::default();
        config.corrections.four_body_window = (2.5, 1.9);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCorrections { .. })
        ));
    }

    #[test]
    fn zero_tolerance_and_retries_are_rejected() {
        let config = EngineConfig {
            conservation_tolerance: 0.0,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidTolerance { value: 0.0 })
        );
        let config = EngineConfig {
            max_multiparticle_retries: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::RetriesZero));
    }

    #[test]
    fn sub_config_errors_are_wrapped() {
        let mut config = EngineConfig::default();
        config.fragmentation.lund_b = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFragmentation { .. })
        ));
    }
}
