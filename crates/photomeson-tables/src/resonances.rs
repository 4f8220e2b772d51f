//! The nine photo-excited baryon resonances and their exclusive channels.
//!
//! Each resonance carries its Breit–Wigner parameters, photo-couplings for
//! both nucleon species, the decay angular distribution in the resonance
//! rest frame and the list of two-body channels. Channels are expressed as
//! isospin classes ([`ChannelKind`]); the charge states follow from the
//! resonance isospin through [`ChannelKind::charge_states`].

use photomeson_core::{ParticleCode, Species};

/// Resonance isospin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Isospin {
    /// N* states.
    Half,
    /// Δ* states.
    ThreeHalves,
}

/// Angular distribution of the two-body decay, as a polynomial in `cos²θ`.
///
/// `coefficients[k]` multiplies `cos^(2k)θ`. Every tabulated polynomial is
/// non-negative and bounded by one on `[-1, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngularDistribution {
    /// Coefficients of `1, z², z⁴`.
    pub coefficients: [f64; 3],
}

impl AngularDistribution {
    /// Flat in `cos θ`.
    pub const ISOTROPIC: Self = Self {
        coefficients: [1.0, 0.0, 0.0],
    };

    /// Evaluate at `z = cos θ`.
    pub fn eval(&self, z: f64) -> f64 {
        let z2 = z * z;
        let [c0, c1, c2] = self.coefficients;
        c0 + z2 * (c1 + z2 * c2)
    }

    /// Whether the distribution is flat.
    pub fn is_isotropic(&self) -> bool {
        self.coefficients[1] == 0.0 && self.coefficients[2] == 0.0
    }
}

/// Isospin class of a two-body resonance channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Nucleon + pion.
    NucleonPion,
    /// Nucleon + eta.
    NucleonEta,
    /// Δ(1232) + pion.
    DeltaPion,
    /// Nucleon + rho.
    NucleonRho,
}

/// `(weight, baryon, meson)` charge states of one channel.
pub type ChargeStates = &'static [(f64, ParticleCode, ParticleCode)];

impl ChannelKind {
    /// Charge states reached from a resonance of `isospin` excited on
    /// `species`, with their Clebsch–Gordan weights.
    pub fn charge_states(self, isospin: Isospin, species: Species) -> ChargeStates {
        use ParticleCode as P;
        match (self, isospin, species) {
            (Self::NucleonPion, Isospin::Half, Species::Proton) => {
                &[(1.0 / 3.0, P::PROTON, P::PI0), (2.0 / 3.0, P::NEUTRON, P::PI_PLUS)]
            }
            (Self::NucleonPion, Isospin::Half, Species::Neutron) => {
                &[(1.0 / 3.0, P::NEUTRON, P::PI0), (2.0 / 3.0, P::PROTON, P::PI_MINUS)]
            }
            (Self::NucleonPion, Isospin::ThreeHalves, Species::Proton) => {
                &[(2.0 / 3.0, P::PROTON, P::PI0), (1.0 / 3.0, P::NEUTRON, P::PI_PLUS)]
            }
            (Self::NucleonPion, Isospin::ThreeHalves, Species::Neutron) => {
                &[(2.0 / 3.0, P::NEUTRON, P::PI0), (1.0 / 3.0, P::PROTON, P::PI_MINUS)]
            }
            (Self::NucleonEta, _, Species::Proton) => &[(1.0, P::PROTON, P::ETA)],
            (Self::NucleonEta, _, Species::Neutron) => &[(1.0, P::NEUTRON, P::ETA)],
            (Self::DeltaPion, Isospin::Half, Species::Proton) => &[
                (1.0 / 2.0, P::DELTA_PP, P::PI_MINUS),
                (1.0 / 3.0, P::DELTA_P, P::PI0),
                (1.0 / 6.0, P::DELTA_0, P::PI_PLUS),
            ],
            (Self::DeltaPion, Isospin::Half, Species::Neutron) => &[
                (1.0 / 6.0, P::DELTA_P, P::PI_MINUS),
                (1.0 / 3.0, P::DELTA_0, P::PI0),
                (1.0 / 2.0, P::DELTA_M, P::PI_PLUS),
            ],
            (Self::DeltaPion, Isospin::ThreeHalves, Species::Proton) => &[
                (2.0 / 5.0, P::DELTA_PP, P::PI_MINUS),
                (1.0 / 15.0, P::DELTA_P, P::PI0),
                (8.0 / 15.0, P::DELTA_0, P::PI_PLUS),
            ],
            (Self::DeltaPion, Isospin::ThreeHalves, Species::Neutron) => &[
                (8.0 / 15.0, P::DELTA_P, P::PI_MINUS),
                (1.0 / 15.0, P::DELTA_0, P::PI0),
                (2.0 / 5.0, P::DELTA_M, P::PI_PLUS),
            ],
            (Self::NucleonRho, Isospin::Half, Species::Proton) => {
                &[(1.0 / 3.0, P::PROTON, P::RHO0), (2.0 / 3.0, P::NEUTRON, P::RHO_PLUS)]
            }
            (Self::NucleonRho, Isospin::Half, Species::Neutron) => {
                &[(1.0 / 3.0, P::NEUTRON, P::RHO0), (2.0 / 3.0, P::PROTON, P::RHO_MINUS)]
            }
            (Self::NucleonRho, Isospin::ThreeHalves, Species::Proton) => {
                &[(2.0 / 3.0, P::PROTON, P::RHO0), (1.0 / 3.0, P::NEUTRON, P::RHO_PLUS)]
            }
            (Self::NucleonRho, Isospin::ThreeHalves, Species::Neutron) => {
                &[(2.0 / 3.0, P::NEUTRON, P::RHO0), (1.0 / 3.0, P::PROTON, P::RHO_MINUS)]
            }
        }
    }
}

/// One exclusive channel of a resonance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResonanceChannel {
    /// Isospin class.
    pub kind: ChannelKind,
    /// Branching ratio at the nominal mass.
    pub branching: f64,
}

/// A tabulated baryon resonance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resonance {
    /// Name, e.g. `"N(1520)"`.
    pub name: &'static str,
    /// Breit–Wigner mass in GeV.
    pub mass: f64,
    /// Breit–Wigner width in GeV.
    pub width: f64,
    /// Twice the spin.
    pub two_j: u8,
    /// Isospin.
    pub isospin: Isospin,
    /// Photo-coupling branching ratio on a proton.
    pub b_gamma_proton: f64,
    /// Photo-coupling branching ratio on a neutron.
    pub b_gamma_neutron: f64,
    /// Decay angular distribution in the rest frame.
    pub angular: AngularDistribution,
    /// Exclusive channels.
    pub channels: &'static [ResonanceChannel],
}

impl Resonance {
    /// Photo-coupling for `species`.
    pub fn b_gamma(&self, species: Species) -> f64 {
        match species {
            Species::Proton => self.b_gamma_proton,
            Species::Neutron => self.b_gamma_neutron,
        }
    }
}

const fn ch(kind: ChannelKind, branching: f64) -> ResonanceChannel {
    ResonanceChannel { kind, branching }
}

const fn ang(c0: f64, c1: f64, c2: f64) -> AngularDistribution {
    AngularDistribution {
        coefficients: [c0, c1, c2],
    }
}

use ChannelKind::{DeltaPion as DP, NucleonEta as NE, NucleonPion as NP, NucleonRho as NR};

/// Number of tabulated resonances.
pub const RESONANCE_COUNT: usize = 9;

/// Index of Δ(1232) in [`RESONANCES`].
pub const DELTA_1232: usize = 0;

/// The resonance table, in order of increasing mass.
pub const RESONANCES: [Resonance; RESONANCE_COUNT] = [
    Resonance {
        name: "Delta(1232)",
        mass: 1.231,
        width: 0.11,
        two_j: 3,
        isospin: Isospin::ThreeHalves,
        b_gamma_proton: 5.6e-3,
        b_gamma_neutron: 6.1e-3,
        angular: ang(1.0, -0.6, 0.0),
        channels: &[ch(NP, 1.0)],
    },
    Resonance {
        name: "N(1440)",
        mass: 1.440,
        width: 0.35,
        two_j: 1,
        isospin: Isospin::Half,
        b_gamma_proton: 0.5e-3,
        b_gamma_neutron: 0.3e-3,
        angular: AngularDistribution::ISOTROPIC,
        channels: &[ch(NP, 0.65), ch(DP, 0.35)],
    },
    Resonance {
        name: "N(1520)",
        mass: 1.515,
        width: 0.11,
        two_j: 3,
        isospin: Isospin::Half,
        b_gamma_proton: 4.6e-3,
        b_gamma_neutron: 4.0e-3,
        angular: ang(0.25, 0.75, 0.0),
        channels: &[ch(NP, 0.6), ch(DP, 0.2), ch(NR, 0.2)],
    },
    Resonance {
        name: "N(1535)",
        mass: 1.525,
        width: 0.1,
        two_j: 1,
        isospin: Isospin::Half,
        b_gamma_proton: 2.5e-3,
        b_gamma_neutron: 2.5e-3,
        angular: AngularDistribution::ISOTROPIC,
        channels: &[ch(NP, 0.45), ch(NE, 0.45), ch(DP, 0.05), ch(NR, 0.05)],
    },
    Resonance {
        name: "N(1650)",
        mass: 1.675,
        width: 0.16,
        two_j: 1,
        isospin: Isospin::Half,
        b_gamma_proton: 1.0e-3,
        b_gamma_neutron: 0.0,
        angular: AngularDistribution::ISOTROPIC,
        channels: &[ch(NP, 0.7), ch(NE, 0.1), ch(DP, 0.1), ch(NR, 0.1)],
    },
    Resonance {
        name: "N(1675)",
        mass: 1.675,
        width: 0.15,
        two_j: 5,
        isospin: Isospin::Half,
        b_gamma_proton: 0.0,
        b_gamma_neutron: 0.2e-3,
        angular: ang(0.125, -0.25, 1.125),
        channels: &[ch(NP, 0.45), ch(DP, 0.55)],
    },
    Resonance {
        name: "N(1680)",
        mass: 1.680,
        width: 0.125,
        two_j: 5,
        isospin: Isospin::Half,
        b_gamma_proton: 2.1e-3,
        b_gamma_neutron: 0.0,
        angular: ang(0.375, 1.25, -0.625),
        channels: &[ch(NP, 0.65), ch(DP, 0.15), ch(NR, 0.2)],
    },
    Resonance {
        name: "Delta(1700)",
        mass: 1.690,
        width: 0.29,
        two_j: 3,
        isospin: Isospin::ThreeHalves,
        b_gamma_proton: 2.0e-3,
        b_gamma_neutron: 2.0e-3,
        angular: ang(0.5, 0.5, 0.0),
        channels: &[ch(NP, 0.15), ch(DP, 0.55), ch(NR, 0.3)],
    },
    Resonance {
        name: "Delta(1950)",
        mass: 1.895,
        width: 0.35,
        two_j: 7,
        isospin: Isospin::ThreeHalves,
        b_gamma_proton: 0.2e-3,
        b_gamma_neutron: 0.2e-3,
        angular: ang(0.25, 1.5, -0.75),
        channels: &[ch(NP, 0.4), ch(DP, 0.25), ch(NR, 0.35)],
    },
];
