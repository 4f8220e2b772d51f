//! Hadronisation for photomeson.
//!
//! Colour-singlet parton systems are turned into on-shell hadrons here.
//! [`Fragmenter`] implements Lund string fragmentation of open strings,
//! gluon-kinked chains, closed gluon loops and baryon junctions, as well as
//! independent fragmentation with a choice of momentum compensation.
//! [`DipoleShower`] optionally evolves heavy string systems into
//! colour-ordered parton chains before they are fragmented.
//!
//! Every routine conserves the four-momentum of its input exactly up to
//! rounding; flavor and baryon number are conserved by construction.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod flavors;
pub mod independent;
pub mod junction;
pub mod parton;
pub mod sampling;
pub mod shower;
pub mod string;

pub use config::{CompensationScheme, FragmentationConfig, FragmentationScheme, ShowerConfig};
pub use error::FragmentError;
pub use flavors::{lightest_hadron_mass, Break, FlavorGenerator};
pub use parton::{total_momentum, Hadron, Parton};
pub use sampling::{lund_peak, sample_pt, sample_z};
pub use shower::DipoleShower;
pub use string::Fragmenter;
