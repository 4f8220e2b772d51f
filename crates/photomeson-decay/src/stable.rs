//! Which particles the processor leaves undecayed.

use indexmap::IndexSet;
use photomeson_core::ParticleCode;

/// Set of codes treated as final-state particles.
///
/// Codes without a decay table are always final; the set only matters
/// for particles that could decay. Membership is checked for the code
/// as given, so a set must list both members of a charge-conjugate pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StableSet {
    codes: IndexSet<ParticleCode>,
}

impl StableSet {
    /// Photons, leptons, neutrinos and nucleons.
    pub fn always() -> Self {
        use ParticleCode as P;
        let mut set = Self::default();
        set.extend([
            P::PHOTON,
            P::POSITRON,
            P::ELECTRON,
            P::NU_E,
            P::NU_E_BAR,
            P::NU_MU,
            P::NU_MU_BAR,
            P::PROTON,
            P::NEUTRON,
            P::PROTON.conjugate(),
            P::NEUTRON.conjugate(),
        ]);
        set
    }

    /// The stability convention of an event: with `pions_stable` the
    /// pions, charged kaons, `K0L` and muons are kept as well.
    pub fn standard(pions_stable: bool) -> Self {
        use ParticleCode as P;
        let mut set = Self::always();
        if pions_stable {
            set.extend([
                P::PI0,
                P::PI_PLUS,
                P::PI_MINUS,
                P::K_PLUS,
                P::K_MINUS,
                P::K0_LONG,
                P::MU_PLUS,
                P::MU_MINUS,
            ]);
        }
        set
    }

    /// Add one code.
    pub fn insert(&mut self, code: ParticleCode) -> bool {
        self.codes.insert(code)
    }

    /// Add several codes.
    pub fn extend<I: IntoIterator<Item = ParticleCode>>(&mut self, codes: I) {
        self.codes.extend(codes);
    }

    /// Whether `code` must not be decayed.
    pub fn contains(&self, code: ParticleCode) -> bool {
        self.codes.contains(&code)
    }

    /// Number of listed codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
