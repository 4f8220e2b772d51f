//! Decay-chain processing for photomeson.
//!
//! [`DecayProcessor`] resolves every unstable entry of an
//! [`EventArena`](photomeson_arena::EventArena) into final-state particles
//! in one forward pass. Channels are picked by cumulative branching ratio
//! among those open at the entry's mass; momenta come from exact two-body
//! kinematics or the M-generator, reweighted by the channel's
//! [`MatrixElement`](photomeson_core::MatrixElement). Which particles
//! count as final is decided by a [`StableSet`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod matrix;
pub mod processor;
pub mod stable;

pub use config::DecayConfig;
pub use error::DecayError;
pub use processor::DecayProcessor;
pub use stable::StableSet;
