//! Photomeson: a photon–nucleon photopion event generator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all photomeson sub-crates. For most users, adding `photomeson` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use photomeson::prelude::*;
//!
//! let tables = StandardTables::new();
//! let mut ctx = EventContext::new(EngineConfig::default(), &tables, 42).unwrap();
//!
//! // A 1e11 GeV proton in a field of 1 eV photons.
//! let event = ctx.generate(Species::Proton, 1e11, 1e-9).unwrap();
//! for p in &event.particles {
//!     assert_ne!(p.pdg, 0);
//! }
//! assert_eq!(ctx.stats().events, 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `photomeson-core` | Particle codes, four-vectors, random streams, errors |
//! | [`tables`] | `photomeson-tables` | Particle data, resonances, cross sections |
//! | [`kinematics`] | `photomeson-kinematics` | Boosts, rotations, two-body and N-body phase space |
//! | [`arena`] | `photomeson-arena` | The per-event particle record |
//! | [`fragment`] | `photomeson-fragment` | String and independent fragmentation, parton shower |
//! | [`decay`] | `photomeson-decay` | Decay-chain processing |
//! | [`engine`] | `photomeson-engine` | Event generation contexts |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Particle codes, four-vectors, random streams and errors (`photomeson-core`).
pub use photomeson_core as types;

/// Particle data, baryon resonances and cross sections (`photomeson-tables`).
///
/// [`tables::StandardTables`] implements [`types::ParticleTable`] over the
/// built-in data.
pub use photomeson_tables as tables;

/// Lorentz boosts, rotations and phase-space generation (`photomeson-kinematics`).
pub use photomeson_kinematics as kinematics;

/// The per-event particle record (`photomeson-arena`).
pub use photomeson_arena as arena;

/// Hadronisation of parton systems (`photomeson-fragment`).
///
/// [`fragment::Fragmenter`] for Lund strings, chains, junctions and
/// independent jets; [`fragment::DipoleShower`] for final-state radiation.
pub use photomeson_fragment as fragment;

/// Decay-chain processing (`photomeson-decay`).
pub use photomeson_decay as decay;

/// Event generation (`photomeson-engine`).
///
/// [`engine::EventContext`] is the entry point.
pub use photomeson_engine as engine;

/// Common imports for typical photomeson usage.
///
/// ```rust
/// use photomeson::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use photomeson_core::{FourVector, ParticleCode, ParticleTable, Species, UniformSource};

    // Errors
    pub use photomeson_core::EventError;
    pub use photomeson_engine::ConfigError;

    // Tables
    pub use photomeson_tables::StandardTables;

    // Engine
    pub use photomeson_engine::{
        EngineConfig, EventContext, EventRecord, EventStats, FailurePolicy, FinalParticle,
        InteractionMode,
    };
}
