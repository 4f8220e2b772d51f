//! Stateless kinematic utilities for photomeson.
//!
//! Lorentz boosts between frames (accurate at Lorentz factors of 1e9),
//! rotations, the Källén function, two-body decays, mass-shell rescaling
//! of parton pairs and N-body phase space. Every function is pure apart
//! from the random draws it takes through a
//! [`UniformSource`](photomeson_core::UniformSource).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boost;
pub mod error;
pub mod phase_space;
pub mod two_body;

pub use boost::{align_with, boost, boost_from_frame, boost_to_frame, rotate, rotate_back, Frame};
pub use error::KinematicsError;
pub use phase_space::{phase_space, phase_space_weighted, weighted_event, Momenta, WeightedEvent};
pub use two_body::{kallen, rescale_to_mass_shell, two_body_decay, two_body_momentum};
