//! Two-body kinematics: the Källén function, rest-frame decays and
//! mass-shell rescaling of parton pairs.

use photomeson_core::FourVector;

use crate::boost::{boost_from_frame, boost_to_frame, Frame};
use crate::error::KinematicsError;

/// Källén triangle function `λ(a, b, c) = a² + b² + c² − 2ab − 2bc − 2ca`.
pub fn kallen(a: f64, b: f64, c: f64) -> f64 {
    a * a + b * b + c * c - 2.0 * (a * b + b * c + c * a)
}

/// Daughter momentum in the rest frame of a two-body decay `M → m1 m2`.
///
/// Returns `None` below threshold. Exactly at threshold the momentum is 0.
pub fn two_body_momentum(m: f64, m1: f64, m2: f64) -> Option<f64> {
    if m < m1 + m2 || m <= 0.0 {
        return None;
    }
    let lam = kallen(m * m, m1 * m1, m2 * m2).max(0.0);
    Some(lam.sqrt() / (2.0 * m))
}

/// Two-body decay in the parent rest frame.
///
/// The first daughter moves in the direction `(cos_theta, phi)`; the second
/// recoils against it.
pub fn two_body_decay(
    m: f64,
    m1: f64,
    m2: f64,
    cos_theta: f64,
    phi: f64,
) -> Result<(FourVector, FourVector), KinematicsError> {
    let p = two_body_momentum(m, m1, m2).ok_or(KinematicsError::BelowThreshold {
        mass: m,
        required: m1 + m2,
    })?;
    let cos_theta = cos_theta.clamp(-1.0, 1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
    let (sp, cp) = phi.sin_cos();
    let (x, y, z) = (p * sin_theta * cp, p * sin_theta * sp, p * cos_theta);
    let e1 = (p * p + m1 * m1).sqrt();
    let e2 = (p * p + m2 * m2).sqrt();
    Ok((FourVector::new(x, y, z, e1), FourVector::new(-x, -y, -z, e2)))
}

/// Put two momenta on new mass shells while conserving their sum.
///
/// The pair is boosted to its rest frame, the three-momenta are rescaled
/// along the original direction of `p1` to the two-body momentum for
/// `(m1, m2)`, and the result is boosted back.
pub fn rescale_to_mass_shell(
    p1: &FourVector,
    p2: &FourVector,
    m1: f64,
    m2: f64,
) -> Result<(FourVector, FourVector), KinematicsError> {
    let total = *p1 + *p2;
    let w = total.mass();
    let frame = Frame::new(total, w)?;
    let p = two_body_momentum(w, m1, m2).ok_or(KinematicsError::BelowThreshold {
        mass: w,
        required: m1 + m2,
    })?;
    let rest1 = boost_to_frame(p1, &frame);
    let dir = rest1.p_abs();
    if dir <= 0.0 {
        return Err(KinematicsError::Degenerate {
            reason: "pair momenta are collinear in their rest frame",
        });
    }
    let scale = p / dir;
    let q1 = FourVector::on_shell(rest1.px * scale, rest1.py * scale, rest1.pz * scale, m1);
    let q2 = FourVector::on_shell(-q1.px, -q1.py, -q1.pz, m2);
    Ok((boost_from_frame(&q1, &frame), boost_from_frame(&q2, &frame)))
}
