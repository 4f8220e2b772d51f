//! A single particle entry of the event record.

use photomeson_core::{FourVector, ParticleCode};

/// Lifecycle state of an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Present in the current final state.
    Alive,
    /// Replaced by its decay products; kept for history.
    Decayed,
    /// A parton that was hadronised; kept for history.
    Fragmented,
}

/// One particle (or parton) of the event record.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// Internal code. Decayed entries carry the shifted marker code.
    pub code: ParticleCode,
    /// Four-momentum in the frame the event is being built in.
    pub momentum: FourVector,
    /// Mass actually used for this entry (may differ from the nominal
    /// mass for resonances reduced to a kinematic threshold).
    pub mass: f64,
    /// Lifecycle state.
    pub status: Status,
    /// Index of the entry this one was produced from.
    pub parent: Option<usize>,
    /// Unit vector of the helicity axis for polarised vector mesons.
    pub spin_axis: Option<[f64; 3]>,
}

impl Entry {
    /// A live entry with no parent.
    pub fn new(code: ParticleCode, momentum: FourVector, mass: f64) -> Self {
        Self {
            code,
            momentum,
            mass,
            status: Status::Alive,
            parent: None,
            spin_axis: None,
        }
    }

    /// Set the parent index.
    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Attach a helicity axis (normalised on the way in).
    pub fn with_spin_axis(mut self, axis: [f64; 3]) -> Self {
        let norm = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
        if norm > 0.0 {
            self.spin_axis = Some([axis[0] / norm, axis[1] / norm, axis[2] / norm]);
        }
        self
    }

    /// Whether the entry belongs to the current final state.
    pub fn is_alive(&self) -> bool {
        self.status == Status::Alive
    }
}
