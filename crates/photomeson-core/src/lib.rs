//! Core types and traits for the photomeson event generator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared by every stage of photopion event
//! generation: particle codes, quark flavors, four-momenta, the uniform
//! random stream, the read-only [`ParticleTable`] collaborator and the
//! fatal [`EventError`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod code;
pub mod error;
pub mod flavor;
pub mod momentum;
pub mod random;
pub mod traits;

pub use code::{ParticleCode, Species};
pub use error::{ArenaError, EventError};
pub use flavor::Flavor;
pub use momentum::FourVector;
pub use random::{RngStream, UniformSource};
pub use traits::{DecayChannel, MatrixElement, ParticleTable};
