//! Event generator for photon–nucleon interactions.
//!
//! [`EventContext`] samples the invariant mass of a nucleon in an
//! isotropic photon field, classifies the interaction and builds the final
//! state: s-channel resonance decays, direct and diffractive two-body
//! production near threshold, and string fragmentation of the
//! multiparticle background. Unstable particles are decayed and the event
//! is returned in the lab frame as an [`EventRecord`].
//!
//! Each context owns its record, random stream and statistics. Nothing is
//! global, so independent contexts may run on separate threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod classifier;
pub mod config;
pub mod context;
pub mod metrics;
pub mod multiparticle;
pub mod production;
pub mod resonance;
pub mod sampler;

pub use classifier::{classify, InteractionMode};
pub use config::{ConfigError, CorrectionConfig, EngineConfig, FailurePolicy, SamplerConfig};
pub use context::{EventContext, EventRecord, FinalParticle};
pub use metrics::EventStats;
pub use multiparticle::{MultiparticleModel, Topology};
pub use production::{DirectChannel, VectorMeson};
pub use sampler::{Collision, InvariantMassSampler};
