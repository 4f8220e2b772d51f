//! The read-only particle-data collaborator.
//!
//! Masses, widths, quantum numbers, decay tables and the external
//! numbering are all reached through [`ParticleTable`]. The engine never
//! mutates table data; one table instance is shared by every context.

use smallvec::SmallVec;

use crate::code::ParticleCode;
use crate::error::EventError;

/// Weighting applied to a decay channel on top of phase space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatrixElement {
    /// Pure phase space.
    Phase,
    /// ω/φ → π+π−π0, weighted by `|p+ × p−|²` in the parent frame.
    OmegaToThreePions,
    /// Dalitz decay `X → γ e+ e−` with the Kroll–Wada pair-mass spectrum.
    Dalitz,
    /// V−A weighting of semileptonic decays (`μ → e ν ν`).
    WeakLepton,
    /// Vector meson carrying a helicity axis: `sin²θ` relative to that axis.
    /// Falls back to phase space when the parent has no axis.
    Polarized,
}

/// One exclusive decay mode of an unstable particle.
#[derive(Clone, Debug, PartialEq)]
pub struct DecayChannel {
    /// Branching ratio of this mode.
    pub branching: f64,
    /// Decay products, in table order.
    pub daughters: SmallVec<[ParticleCode; 4]>,
    /// Weighting applied when generating the momenta.
    pub matrix_element: MatrixElement,
}

impl DecayChannel {
    /// Phase-space channel.
    pub fn new(branching: f64, daughters: &[ParticleCode]) -> Self {
        Self::with_matrix_element(branching, daughters, MatrixElement::Phase)
    }

    /// Channel with an explicit matrix element.
    pub fn with_matrix_element(
        branching: f64,
        daughters: &[ParticleCode],
        matrix_element: MatrixElement,
    ) -> Self {
        Self {
            branching,
            daughters: daughters.iter().copied().collect(),
            matrix_element,
        }
    }

    /// The charge-conjugate channel.
    pub fn conjugate(&self) -> Self {
        Self {
            branching: self.branching,
            daughters: self.daughters.iter().map(|d| d.conjugate()).collect(),
            matrix_element: self.matrix_element,
        }
    }
}

/// Read-only particle data keyed by internal code.
///
/// Every method returns `None` for codes the table does not know. The
/// provided `require_*` helpers turn that into
/// [`EventError::UnknownParticle`] for call sites where a missing entry
/// means corrupted data.
pub trait ParticleTable {
    /// Nominal mass in GeV.
    fn mass(&self, code: ParticleCode) -> Option<f64>;

    /// Total width in GeV (zero for stable particles).
    fn width(&self, code: ParticleCode) -> Option<f64>;

    /// Electric charge in units of e.
    fn charge(&self, code: ParticleCode) -> Option<i32>;

    /// Baryon number.
    fn baryon_number(&self, code: ParticleCode) -> Option<i32>;

    /// External (PDG Monte-Carlo) identifier.
    fn pdg_id(&self, code: ParticleCode) -> Option<i32>;

    /// Short printable name.
    fn name(&self, code: ParticleCode) -> Option<&str>;

    /// Decay channels, or `None` if the particle has no decay table.
    fn decay_channels(&self, code: ParticleCode) -> Option<&[DecayChannel]>;

    /// Mass, or an error for unknown codes.
    fn require_mass(&self, code: ParticleCode) -> Result<f64, EventError> {
        self.mass(code)
            .ok_or(EventError::UnknownParticle { code })
    }

    /// Charge, or an error for unknown codes.
    fn require_charge(&self, code: ParticleCode) -> Result<i32, EventError> {
        self.charge(code)
            .ok_or(EventError::UnknownParticle { code })
    }

    /// Baryon number, or an error for unknown codes.
    fn require_baryon_number(&self, code: ParticleCode) -> Result<i32, EventError> {
        self.baryon_number(code)
            .ok_or(EventError::UnknownParticle { code })
    }

    /// Whether the particle has at least one decay channel.
    fn is_unstable(&self, code: ParticleCode) -> bool {
        self.decay_channels(code).is_some_and(|c| !c.is_empty())
    }
}
