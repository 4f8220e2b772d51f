//! Strongly-typed particle codes and the incident [`Species`].
//!
//! The internal numbering follows the classic cosmic-ray convention:
//! small positive integers for leptons, mesons and baryons, negated codes
//! for antibaryons, and explicit conjugate codes for charged and strange
//! mesons. Codes with `|code| >= 10000` never describe a stable particle:
//! they are either decayed entries (shifted by [`ParticleCode::DECAYED_SHIFT`])
//! or partons recorded before fragmentation.

use std::fmt;

use crate::flavor::Flavor;

/// Internal particle identifier.
///
/// `ParticleCode(n)` with `0 < |n| < 10000` is a physical particle known to
/// the [`ParticleTable`](crate::ParticleTable). Decayed entries keep their
/// history with the code shifted away from zero by 10000.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleCode(pub i32);

impl ParticleCode {
    /// Offset added (away from zero) to the code of a decayed entry.
    pub const DECAYED_SHIFT: i32 = 10_000;
    /// Offset used for partons (quarks, antiquarks, diquarks, gluons).
    pub const PARTON_OFFSET: i32 = 20_000;

    /// Photon.
    pub const PHOTON: Self = Self(1);
    /// Positron.
    pub const POSITRON: Self = Self(2);
    /// Electron.
    pub const ELECTRON: Self = Self(3);
    /// Positive muon.
    pub const MU_PLUS: Self = Self(4);
    /// Negative muon.
    pub const MU_MINUS: Self = Self(5);
    /// Neutral pion.
    pub const PI0: Self = Self(6);
    /// Positive pion.
    pub const PI_PLUS: Self = Self(7);
    /// Negative pion.
    pub const PI_MINUS: Self = Self(8);
    /// Positive kaon.
    pub const K_PLUS: Self = Self(9);
    /// Negative kaon.
    pub const K_MINUS: Self = Self(10);
    /// Long-lived neutral kaon.
    pub const K0_LONG: Self = Self(11);
    /// Short-lived neutral kaon.
    pub const K0_SHORT: Self = Self(12);
    /// Proton.
    pub const PROTON: Self = Self(13);
    /// Neutron.
    pub const NEUTRON: Self = Self(14);
    /// Electron neutrino.
    pub const NU_E: Self = Self(15);
    /// Electron antineutrino.
    pub const NU_E_BAR: Self = Self(16);
    /// Muon neutrino.
    pub const NU_MU: Self = Self(17);
    /// Muon antineutrino.
    pub const NU_MU_BAR: Self = Self(18);
    /// Neutral kaon (strangeness eigenstate).
    pub const K0: Self = Self(21);
    /// Neutral antikaon (strangeness eigenstate).
    pub const K0_BAR: Self = Self(22);
    /// Eta meson.
    pub const ETA: Self = Self(23);
    /// Eta-prime meson.
    pub const ETA_PRIME: Self = Self(24);
    /// Positive rho.
    pub const RHO_PLUS: Self = Self(25);
    /// Negative rho.
    pub const RHO_MINUS: Self = Self(26);
    /// Neutral rho.
    pub const RHO0: Self = Self(27);
    /// Positive K*.
    pub const KSTAR_PLUS: Self = Self(28);
    /// Negative K*.
    pub const KSTAR_MINUS: Self = Self(29);
    /// Neutral K*.
    pub const KSTAR0: Self = Self(30);
    /// Neutral anti-K*.
    pub const KSTAR0_BAR: Self = Self(31);
    /// Omega meson.
    pub const OMEGA: Self = Self(32);
    /// Phi meson.
    pub const PHI: Self = Self(33);
    /// Positive sigma.
    pub const SIGMA_PLUS: Self = Self(34);
    /// Neutral sigma.
    pub const SIGMA0: Self = Self(35);
    /// Negative sigma.
    pub const SIGMA_MINUS: Self = Self(36);
    /// Neutral xi.
    pub const XI0: Self = Self(37);
    /// Negative xi.
    pub const XI_MINUS: Self = Self(38);
    /// Lambda.
    pub const LAMBDA: Self = Self(39);
    /// Delta(1232)++.
    pub const DELTA_PP: Self = Self(40);
    /// Delta(1232)+.
    pub const DELTA_P: Self = Self(41);
    /// Delta(1232)0.
    pub const DELTA_0: Self = Self(42);
    /// Delta(1232)-.
    pub const DELTA_M: Self = Self(43);
    /// Sigma(1385)+.
    pub const SIGMASTAR_PLUS: Self = Self(44);
    /// Sigma(1385)0.
    pub const SIGMASTAR0: Self = Self(45);
    /// Sigma(1385)-.
    pub const SIGMASTAR_MINUS: Self = Self(46);
    /// Xi(1530)0.
    pub const XISTAR0: Self = Self(47);
    /// Xi(1530)-.
    pub const XISTAR_MINUS: Self = Self(48);
    /// Omega-.
    pub const OMEGA_MINUS: Self = Self(49);

    /// First code of the nucleon resonances excited on a proton.
    pub const PROTON_RESONANCE_BASE: i32 = 51;
    /// First code of the nucleon resonances excited on a neutron.
    pub const NEUTRON_RESONANCE_BASE: i32 = 61;

    /// Raw signed value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Whether this code is flagged as a decayed history entry.
    pub fn is_decayed_marker(self) -> bool {
        let a = self.0.abs();
        (Self::DECAYED_SHIFT..Self::PARTON_OFFSET).contains(&a)
    }

    /// Whether this code denotes a parton recorded before fragmentation.
    pub fn is_parton(self) -> bool {
        self.0.abs() >= Self::PARTON_OFFSET
    }

    /// Whether this code can describe a final-state particle.
    pub fn is_physical(self) -> bool {
        self.0 != 0 && self.0.abs() < Self::DECAYED_SHIFT
    }

    /// The code with the decayed marker applied (idempotent).
    pub fn marked_decayed(self) -> Self {
        if self.is_physical() {
            Self(self.0 + self.0.signum() * Self::DECAYED_SHIFT)
        } else {
            self
        }
    }

    /// The physical code behind a decayed marker.
    pub fn unmarked(self) -> Self {
        if self.is_decayed_marker() {
            Self(self.0 - self.0.signum() * Self::DECAYED_SHIFT)
        } else {
            self
        }
    }

    /// Code used to record a parton of the given flavor.
    pub fn parton(flavor: Flavor) -> Self {
        let raw = flavor.raw();
        Self(raw.signum() * (Self::PARTON_OFFSET + raw.abs()))
    }

    /// Flavor of a parton code, if this is one.
    pub fn parton_flavor(self) -> Option<Flavor> {
        if self.is_parton() {
            Some(Flavor(self.0.signum() * (self.0.abs() - Self::PARTON_OFFSET)))
        } else {
            None
        }
    }

    /// Code of the `index`-th nucleon resonance excited on `species`.
    pub fn resonance(species: Species, index: usize) -> Self {
        let base = match species {
            Species::Proton => Self::PROTON_RESONANCE_BASE,
            Species::Neutron => Self::NEUTRON_RESONANCE_BASE,
        };
        Self(base + index as i32)
    }

    /// Antiparticle code.
    ///
    /// Baryons are negated, charged mesons and leptons swap with their
    /// conjugate partner, and self-conjugate particles map to themselves.
    pub fn conjugate(self) -> Self {
        let c = self.0;
        let partner = match c.abs() {
            2 => 3,
            3 => 2,
            4 => 5,
            5 => 4,
            7 => 8,
            8 => 7,
            9 => 10,
            10 => 9,
            15 => 16,
            16 => 15,
            17 => 18,
            18 => 17,
            21 => 22,
            22 => 21,
            25 => 26,
            26 => 25,
            28 => 29,
            29 => 28,
            30 => 31,
            31 => 30,
            1 | 6 | 11 | 12 | 23 | 24 | 27 | 32 | 33 => c.abs(),
            _ => return Self(-c),
        };
        Self(partner * c.signum())
    }
}

impl fmt::Display for ParticleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ParticleCode {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// Incident nucleon species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Species {
    /// Incident proton.
    Proton,
    /// Incident neutron.
    Neutron,
}

impl Species {
    /// Particle code of the nucleon.
    pub fn code(self) -> ParticleCode {
        match self {
            Self::Proton => ParticleCode::PROTON,
            Self::Neutron => ParticleCode::NEUTRON,
        }
    }

    /// Electric charge in units of e.
    pub fn charge(self) -> i32 {
        match self {
            Self::Proton => 1,
            Self::Neutron => 0,
        }
    }

    /// The other nucleon.
    pub fn isospin_partner(self) -> Self {
        match self {
            Self::Proton => Self::Neutron,
            Self::Neutron => Self::Proton,
        }
    }

    /// Valence quark flavors, up-type first.
    pub fn valence(self) -> [Flavor; 3] {
        match self {
            Self::Proton => [Flavor::UP, Flavor::UP, Flavor::DOWN],
            Self::Neutron => [Flavor::UP, Flavor::DOWN, Flavor::DOWN],
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proton => write!(f, "proton"),
            Self::Neutron => write!(f, "neutron"),
        }
    }
}
