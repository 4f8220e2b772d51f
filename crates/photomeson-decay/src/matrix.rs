//! Matrix-element weights applied on top of phase space, and the Dalitz
//! pair generator.
//!
//! Every weight is normalised to its maximum over the decay's phase space
//! so that it can be used directly as an acceptance probability.

use photomeson_core::{FourVector, MatrixElement, UniformSource};
use photomeson_kinematics::{
    align_with, boost_from_frame, two_body_decay, KinematicsError, Frame, Momenta,
};
use smallvec::SmallVec;

/// Acceptance weight in `[0, 1]` of one rest-frame configuration.
///
/// `spin_axis` is the helicity axis of the parent; a boost along the
/// parent's flight direction leaves it unchanged, so it is used as is in
/// the rest frame.
pub fn weight(
    matrix_element: MatrixElement,
    parent_mass: f64,
    masses: &[f64],
    momenta: &[FourVector],
    spin_axis: Option<[f64; 3]>,
) -> f64 {
    let w = match matrix_element {
        MatrixElement::Phase | MatrixElement::Dalitz => 1.0,
        MatrixElement::OmegaToThreePions => three_pion(parent_mass, masses, momenta),
        MatrixElement::WeakLepton => weak_lepton(parent_mass, momenta),
        MatrixElement::Polarized => polarized(momenta, spin_axis),
    };
    w.clamp(0.0, 1.0)
}

/// `|p1 × p2|²` relative to its value at the centre of the Dalitz plot.
fn three_pion(parent_mass: f64, masses: &[f64], momenta: &[FourVector]) -> f64 {
    let [a, b, ..] = momenta else {
        return 1.0;
    };
    let [cx, cy, cz] = cross(a.three(), b.three());
    let value = cx * cx + cy * cy + cz * cz;

    let kinetic = (parent_mass - masses.iter().sum::<f64>()) / masses.len() as f64;
    let p2 = |m: f64| (m + kinetic).powi(2) - m * m;
    let (pa2, pb2) = match masses {
        [ma, mb, ..] => (p2(*ma), p2(*mb)),
        _ => return 1.0,
    };
    // Momenta at 120° to each other: sin² = 3/4.
    let max = 0.75 * pa2 * pb2;
    if max > 0.0 {
        value / max
    } else {
        1.0
    }
}

/// V−A weight for daughters ordered `(ℓ, ν_ℓ, ν_parent)`:
/// `(P · p_νℓ)(p_ℓ · p_νparent)`, bounded by `M⁴/16`.
fn weak_lepton(parent_mass: f64, momenta: &[FourVector]) -> f64 {
    let [lepton, nu_lepton, nu_parent, ..] = momenta else {
        return 1.0;
    };
    let parent = FourVector::at_rest(parent_mass);
    let value = parent.dot(nu_lepton) * lepton.dot(nu_parent);
    value / (parent_mass.powi(4) / 16.0)
}

/// `sin²θ` of the first daughter relative to the helicity axis.
fn polarized(momenta: &[FourVector], spin_axis: Option<[f64; 3]>) -> f64 {
    let (Some(axis), Some(first)) = (spin_axis, momenta.first()) else {
        return 1.0;
    };
    let p = first.p_abs();
    if p <= 0.0 {
        return 1.0;
    }
    let [x, y, z] = first.three();
    let cos = (x * axis[0] + y * axis[1] + z * axis[2]) / p;
    1.0 - cos * cos
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Dalitz decay `X → γ ℓ+ ℓ−` at rest.
///
/// The pair mass follows the Kroll–Wada spectrum
/// `(1/m²)(1 − m²/M²)³(1 + 2mℓ²/m²)√(1 − 4mℓ²/m²)`; the leptons come out
/// with a `1 + cos²θ` distribution in the pair rest frame. `photon` is
/// the index of the photon among the three daughters; the returned
/// momenta follow the daughter order.
pub fn dalitz_decay(
    mass: f64,
    masses: &[f64],
    photon: usize,
    rng: &mut dyn UniformSource,
    max_attempts: u32,
) -> Result<Momenta, KinematicsError> {
    let leptons: SmallVec<[usize; 2]> = (0..masses.len()).filter(|&i| i != photon).collect();
    let (first, second) = match leptons.as_slice() {
        [a, b] if masses.len() == 3 => (*a, *b),
        _ => {
            return Err(KinematicsError::Degenerate {
                reason: "Dalitz decay needs a photon and a lepton pair",
            })
        }
    };
    let ml = masses[first];
    let lo = 4.0 * ml * ml;
    let hi = mass * mass;
    if ml <= 0.0 || lo >= hi {
        return Err(KinematicsError::BelowThreshold {
            mass,
            required: 2.0 * ml,
        });
    }

    let mut pair_mass2 = None;
    for _ in 0..max_attempts {
        let m2 = lo * (hi / lo).powf(rng.uniform());
        let r = lo / m2;
        let w = (1.0 - m2 / hi).powi(3) * (1.0 + 0.5 * r) * (1.0 - r).max(0.0).sqrt();
        if rng.accept(w) {
            pair_mass2 = Some(m2);
            break;
        }
    }
    let m2 = pair_mass2.ok_or(KinematicsError::RetriesExhausted {
        attempts: max_attempts,
    })?;
    let m = m2.sqrt();

    let (gamma, pair) = two_body_decay(mass, 0.0, m, rng.cosine(), rng.azimuth())?;
    let mut cos = rng.cosine();
    for _ in 0..max_attempts {
        if rng.accept(0.5 * (1.0 + cos * cos)) {
            break;
        }
        cos = rng.cosine();
    }
    let (l1, l2) = two_body_decay(m, ml, masses[second], cos, rng.azimuth())?;
    let frame = Frame::new(pair, m)?;
    let l1 = boost_from_frame(&align_with(&l1, &pair), &frame);
    let l2 = boost_from_frame(&align_with(&l2, &pair), &frame);

    let mut out: Momenta = SmallVec::from_elem(FourVector::ZERO, 3);
    out[photon] = gamma;
    out[first] = l1;
    out[second] = l2;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use photomeson_core::RngStream;
    use photomeson_kinematics::phase_space;

    const M_E: f64 = 0.000_511;
    const M_PI: f64 = 0.139_57;
    const M_PI0: f64 = 0.134_98;

    #[test]
    fn three_pion_weight_is_bounded() {
        let mut rng = RngStream::new(3);
        let masses = [M_PI, M_PI, M_PI0];
        for _ in 0..2000 {
            let m = phase_space(0.782_65, &masses, &mut rng, 800).unwrap();
            let w = three_pion(0.782_65, &masses, &m);
            assert!(w >= 0.0 && w <= 1.05, "{w}");
        }
    }

    #[test]
    fn weak_lepton_weight_is_bounded() {
        let mut rng = RngStream::new(4);
        let masses = [M_E, 0.0, 0.0];
        let mut sum = 0.0;
        for _ in 0..2000 {
            let m = phase_space(0.105_66, &masses, &mut rng, 800).unwrap();
            let w = weak_lepton(0.105_66, &m);
            assert!((0.0..=1.0 + 1e-9).contains(&w), "{w}");
            sum += w;
        }
        assert!(sum > 0.0);
    }

    #[test]
    fn polarized_weight_vanishes_along_axis() {
        let along = [FourVector::new(0.0, 0.0, 0.3, 0.4)];
        let across = [FourVector::new(0.3, 0.0, 0.0, 0.4)];
        let axis = Some([0.0, 0.0, 1.0]);
        assert!(polarized(&along, axis).abs() < 1e-12);
        assert!((polarized(&across, axis) - 1.0).abs() < 1e-12);
        assert_eq!(polarized(&along, None), 1.0);
    }

    #[test]
    fn dalitz_conserves_momentum_and_orders_daughters() {
        let mut rng = RngStream::new(5);
        let masses = [0.0, M_E, M_E];
        for _ in 0..500 {
            let m = dalitz_decay(M_PI0, &masses, 0, &mut rng, 800).unwrap();
            let sum: FourVector = m.iter().sum();
            assert!(sum.max_abs_diff(&FourVector::at_rest(M_PI0)) < 1e-12);
            assert!(m[0].mass2().abs() < 1e-12);
            assert!((m[1].mass() - M_E).abs() < 1e-7);
            let pair = m[1] + m[2];
            assert!(pair.mass() >= 2.0 * M_E - 1e-9);
        }
    }

    #[test]
    fn dalitz_pair_mass_prefers_small_values() {
        let mut rng = RngStream::new(6);
        let masses = [0.0, M_E, M_E];
        let mut low = 0;
        for _ in 0..1000 {
            let m = dalitz_decay(M_PI0, &masses, 0, &mut rng, 800).unwrap();
            if (m[1] + m[2]).mass() < 0.02 {
                low += 1;
            }
        }
        assert!(low > 500, "low = {low}");
    }
}
