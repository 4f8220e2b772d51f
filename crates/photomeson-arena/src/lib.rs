//! Fixed-capacity event record for photomeson.
//!
//! One [`EventArena`] is owned by each generation context and reused
//! across events. During an event it is append-only:
//!
//! ```text
//! EventArena
//! ├── Entry × n         (code, four-momentum, mass, status, parent)
//! ├── Checkpoint        (length marker for rolling back a failed attempt)
//! └── EventSnapshot     (live entries, compacted once decays are done)
//! ```
//!
//! # Entry lifecycle
//!
//! - **Alive:** part of the current final state.
//! - **Decayed:** replaced by daughters appended at the end; the code is
//!   shifted by 10000 so it can never be mistaken for a stable particle.
//! - **Fragmented:** a parton whose hadrons were appended.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod entry;
pub mod error;
pub mod record;
pub mod snapshot;

pub use config::ArenaConfig;
pub use entry::{Entry, Status};
pub use error::ArenaError;
pub use record::{Checkpoint, EventArena, Totals};
pub use snapshot::EventSnapshot;
