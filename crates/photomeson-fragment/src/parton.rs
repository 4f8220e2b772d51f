//! Inputs and outputs of hadronisation.

use photomeson_core::{Flavor, FourVector, ParticleCode};

/// A quark, diquark or gluon with its momentum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parton {
    /// Flavor (gluon for colour octets).
    pub flavor: Flavor,
    /// Four-momentum.
    pub momentum: FourVector,
}

impl Parton {
    /// A parton of `flavor` carrying `momentum`.
    pub fn new(flavor: Flavor, momentum: FourVector) -> Self {
        Self { flavor, momentum }
    }

    /// Whether this parton is a gluon.
    pub fn is_gluon(&self) -> bool {
        self.flavor.is_gluon()
    }
}

/// A hadron produced by fragmentation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hadron {
    /// Internal particle code.
    pub code: ParticleCode,
    /// Four-momentum.
    pub momentum: FourVector,
    /// Mass used for the momentum.
    pub mass: f64,
}

/// Sum of hadron momenta.
pub fn total_momentum(hadrons: &[Hadron]) -> FourVector {
    hadrons.iter().map(|h| h.momentum).sum()
}

/// Whether `a` and `b` are a triplet and an antitriplet, in either order.
pub(crate) fn complementary(a: Flavor, b: Flavor) -> bool {
    (a.is_triplet() && b.is_antitriplet()) || (a.is_antitriplet() && b.is_triplet())
}
