//! Decay tables of the unstable hadrons and leptons.
//!
//! Only particles (not their conjugates) are listed; the table builder
//! derives the conjugate tables with [`DecayChannel::conjugate`].
//! Branching ratios are normalised to unit sum when the table is built.

use photomeson_core::{DecayChannel, MatrixElement, ParticleCode};

use ParticleCode as P;

fn phase(br: f64, daughters: &[ParticleCode]) -> DecayChannel {
    DecayChannel::new(br, daughters)
}

fn with_me(br: f64, daughters: &[ParticleCode], me: MatrixElement) -> DecayChannel {
    DecayChannel::with_matrix_element(br, daughters, me)
}

/// Decay channels of every listed particle, unnormalised.
pub(crate) fn base_decay_tables() -> Vec<(ParticleCode, Vec<DecayChannel>)> {
    use MatrixElement::{Dalitz, OmegaToThreePions, Polarized, WeakLepton};
    vec![
        (
            P::PI0,
            vec![
                phase(0.988, &[P::PHOTON, P::PHOTON]),
                with_me(0.0117, &[P::PHOTON, P::POSITRON, P::ELECTRON], Dalitz),
            ],
        ),
        (P::PI_PLUS, vec![phase(1.0, &[P::MU_PLUS, P::NU_MU])]),
        (
            P::MU_PLUS,
            vec![with_me(
                1.0,
                &[P::POSITRON, P::NU_E, P::NU_MU_BAR],
                WeakLepton,
            )],
        ),
        (
            P::K_PLUS,
            vec![
                phase(0.6356, &[P::MU_PLUS, P::NU_MU]),
                phase(0.2067, &[P::PI_PLUS, P::PI0]),
                phase(0.0559, &[P::PI_PLUS, P::PI_PLUS, P::PI_MINUS]),
                phase(0.0176, &[P::PI_PLUS, P::PI0, P::PI0]),
                phase(0.0507, &[P::PI0, P::POSITRON, P::NU_E]),
                phase(0.0335, &[P::PI0, P::MU_PLUS, P::NU_MU]),
            ],
        ),
        (
            P::K0_LONG,
            vec![
                phase(0.2028, &[P::PI_PLUS, P::ELECTRON, P::NU_E_BAR]),
                phase(0.2028, &[P::PI_MINUS, P::POSITRON, P::NU_E]),
                phase(0.1352, &[P::PI_PLUS, P::MU_MINUS, P::NU_MU_BAR]),
                phase(0.1352, &[P::PI_MINUS, P::MU_PLUS, P::NU_MU]),
                phase(0.1952, &[P::PI0, P::PI0, P::PI0]),
                phase(0.1254, &[P::PI_PLUS, P::PI_MINUS, P::PI0]),
            ],
        ),
        (
            P::K0_SHORT,
            vec![
                phase(0.692, &[P::PI_PLUS, P::PI_MINUS]),
                phase(0.308, &[P::PI0, P::PI0]),
            ],
        ),
        (
            P::K0,
            vec![phase(0.5, &[P::K0_SHORT]), phase(0.5, &[P::K0_LONG])],
        ),
        (
            P::ETA,
            vec![
                phase(0.3941, &[P::PHOTON, P::PHOTON]),
                phase(0.3268, &[P::PI0, P::PI0, P::PI0]),
                phase(0.2292, &[P::PI_PLUS, P::PI_MINUS, P::PI0]),
                phase(0.0422, &[P::PI_PLUS, P::PI_MINUS, P::PHOTON]),
                with_me(0.0069, &[P::PHOTON, P::POSITRON, P::ELECTRON], Dalitz),
            ],
        ),
        (
            P::ETA_PRIME,
            vec![
                phase(0.426, &[P::PI_PLUS, P::PI_MINUS, P::ETA]),
                phase(0.289, &[P::RHO0, P::PHOTON]),
                phase(0.228, &[P::PI0, P::PI0, P::ETA]),
                phase(0.0252, &[P::OMEGA, P::PHOTON]),
                phase(0.0222, &[P::PHOTON, P::PHOTON]),
            ],
        ),
        (P::RHO_PLUS, vec![with_me(1.0, &[P::PI_PLUS, P::PI0], Polarized)]),
        (P::RHO0, vec![with_me(1.0, &[P::PI_PLUS, P::PI_MINUS], Polarized)]),
        (
            P::KSTAR_PLUS,
            vec![
                phase(2.0 / 3.0, &[P::K0, P::PI_PLUS]),
                phase(1.0 / 3.0, &[P::K_PLUS, P::PI0]),
            ],
        ),
        (
            P::KSTAR0,
            vec![
                phase(2.0 / 3.0, &[P::K_PLUS, P::PI_MINUS]),
                phase(1.0 / 3.0, &[P::K0, P::PI0]),
            ],
        ),
        (
            P::OMEGA,
            vec![
                with_me(0.892, &[P::PI_PLUS, P::PI_MINUS, P::PI0], OmegaToThreePions),
                with_me(0.0828, &[P::PI0, P::PHOTON], Polarized),
                with_me(0.0153, &[P::PI_PLUS, P::PI_MINUS], Polarized),
            ],
        ),
        (
            P::PHI,
            vec![
                phase(0.489, &[P::K_PLUS, P::K_MINUS]),
                phase(0.342, &[P::K0_LONG, P::K0_SHORT]),
                phase(0.051, &[P::RHO_PLUS, P::PI_MINUS]),
                phase(0.051, &[P::RHO0, P::PI0]),
                phase(0.051, &[P::RHO_MINUS, P::PI_PLUS]),
                phase(0.013, &[P::ETA, P::PHOTON]),
            ],
        ),
        (
            P::SIGMA_PLUS,
            vec![
                phase(0.5157, &[P::PROTON, P::PI0]),
                phase(0.4831, &[P::NEUTRON, P::PI_PLUS]),
            ],
        ),
        (P::SIGMA0, vec![phase(1.0, &[P::LAMBDA, P::PHOTON])]),
        (P::SIGMA_MINUS, vec![phase(1.0, &[P::NEUTRON, P::PI_MINUS])]),
        (P::XI0, vec![phase(1.0, &[P::LAMBDA, P::PI0])]),
        (P::XI_MINUS, vec![phase(1.0, &[P::LAMBDA, P::PI_MINUS])]),
        (
            P::LAMBDA,
            vec![
                phase(0.639, &[P::PROTON, P::PI_MINUS]),
                phase(0.358, &[P::NEUTRON, P::PI0]),
            ],
        ),
        (P::DELTA_PP, vec![phase(1.0, &[P::PROTON, P::PI_PLUS])]),
        (
            P::DELTA_P,
            vec![
                phase(2.0 / 3.0, &[P::PROTON, P::PI0]),
                phase(1.0 / 3.0, &[P::NEUTRON, P::PI_PLUS]),
            ],
        ),
        (
            P::DELTA_0,
            vec![
                phase(2.0 / 3.0, &[P::NEUTRON, P::PI0]),
                phase(1.0 / 3.0, &[P::PROTON, P::PI_MINUS]),
            ],
        ),
        (P::DELTA_M, vec![phase(1.0, &[P::NEUTRON, P::PI_MINUS])]),
        (
            P::SIGMASTAR_PLUS,
            vec![
                phase(0.87, &[P::LAMBDA, P::PI_PLUS]),
                phase(0.065, &[P::SIGMA_PLUS, P::PI0]),
                phase(0.065, &[P::SIGMA0, P::PI_PLUS]),
            ],
        ),
        (
            P::SIGMASTAR0,
            vec![
                phase(0.87, &[P::LAMBDA, P::PI0]),
                phase(0.065, &[P::SIGMA_PLUS, P::PI_MINUS]),
                phase(0.065, &[P::SIGMA_MINUS, P::PI_PLUS]),
            ],
        ),
        (
            P::SIGMASTAR_MINUS,
            vec![
                phase(0.87, &[P::LAMBDA, P::PI_MINUS]),
                phase(0.065, &[P::SIGMA0, P::PI_MINUS]),
                phase(0.065, &[P::SIGMA_MINUS, P::PI0]),
            ],
        ),
        (
            P::XISTAR0,
            vec![
                phase(1.0 / 3.0, &[P::XI0, P::PI0]),
                phase(2.0 / 3.0, &[P::XI_MINUS, P::PI_PLUS]),
            ],
        ),
        (
            P::XISTAR_MINUS,
            vec![
                phase(1.0 / 3.0, &[P::XI_MINUS, P::PI0]),
                phase(2.0 / 3.0, &[P::XI0, P::PI_MINUS]),
            ],
        ),
        (
            P::OMEGA_MINUS,
            vec![
                phase(0.678, &[P::LAMBDA, P::K_MINUS]),
                phase(0.236, &[P::XI0, P::PI_MINUS]),
                phase(0.086, &[P::XI_MINUS, P::PI0]),
            ],
        ),
    ]
}

/// Rescale branching ratios to unit sum.
pub(crate) fn normalise(channels: &mut [DecayChannel]) {
    let total: f64 = channels.iter().map(|c| c.branching).sum();
    if total > 0.0 {
        for c in channels.iter_mut() {
            c.branching /= total;
        }
    }
}
