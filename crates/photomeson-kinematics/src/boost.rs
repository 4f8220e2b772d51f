//! Lorentz boosts and rotations.
//!
//! Boosts between frames are written in the four-vector form
//!
//! ```text
//! p′ = p + P · ( (p⃗·P⃗) / (M (E_P + M)) ± E / M )
//! ```
//!
//! which stays accurate for Lorentz factors around 1e9, where the
//! velocity form `β = P/E` loses every significant digit of `1 − β`.
//! The frame mass is carried explicitly in [`Frame`] so that callers who
//! know it analytically (e.g. `√s`) never recompute it from a nearly
//! light-like `P`.

use photomeson_core::FourVector;

use crate::error::KinematicsError;

/// A reference frame defined by its four-momentum and invariant mass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    momentum: FourVector,
    mass: f64,
}

impl Frame {
    /// Frame of a system with known total momentum and invariant mass.
    pub fn new(momentum: FourVector, mass: f64) -> Result<Self, KinematicsError> {
        if mass.is_nan() || mass <= 0.0 || !momentum.is_finite() {
            return Err(KinematicsError::Degenerate {
                reason: "frame mass must be positive",
            });
        }
        Ok(Self { momentum, mass })
    }

    /// Frame of a system, taking the mass from the momentum itself.
    pub fn from_momentum(momentum: FourVector) -> Result<Self, KinematicsError> {
        Self::new(momentum, momentum.mass())
    }

    /// Total four-momentum of the frame.
    pub fn momentum(&self) -> FourVector {
        self.momentum
    }

    /// Invariant mass of the frame.
    pub fn mass(&self) -> f64 {
        self.mass
    }
}

/// Express `p`, given in the lab, in the rest frame of `frame`.
pub fn boost_to_frame(p: &FourVector, frame: &Frame) -> FourVector {
    transform(p, frame, -1.0)
}

/// Express `p`, given in the rest frame of `frame`, in the lab.
pub fn boost_from_frame(p: &FourVector, frame: &Frame) -> FourVector {
    transform(p, frame, 1.0)
}

fn transform(p: &FourVector, frame: &Frame, sign: f64) -> FourVector {
    let big = frame.momentum;
    let m = frame.mass;
    let pp = p.px * big.px + p.py * big.py + p.pz * big.pz;
    let e = (p.e * big.e + sign * pp) / m;
    let k = pp / (m * (big.e + m)) + sign * p.e / m;
    FourVector::new(p.px + k * big.px, p.py + k * big.py, p.pz + k * big.pz, e)
}

/// Boost by velocity `beta` (in units of c).
///
/// A particle at rest ends up moving with velocity `beta`.
pub fn boost(p: &FourVector, beta: [f64; 3]) -> FourVector {
    let b2 = beta[0] * beta[0] + beta[1] * beta[1] + beta[2] * beta[2];
    if b2 <= 0.0 {
        return *p;
    }
    let gamma = 1.0 / (1.0 - b2).max(1e-300).sqrt();
    let bp = beta[0] * p.px + beta[1] * p.py + beta[2] * p.pz;
    let k = (gamma - 1.0) / b2 * bp + gamma * p.e;
    FourVector::new(
        p.px + k * beta[0],
        p.py + k * beta[1],
        p.pz + k * beta[2],
        gamma * (p.e + bp),
    )
}

/// Rotate by polar angle `theta` about y, then by azimuth `phi` about z.
///
/// A vector along +z ends up pointing in the direction `(theta, phi)`.
pub fn rotate(p: &FourVector, theta: f64, phi: f64) -> FourVector {
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    FourVector::new(
        ct * cp * p.px - sp * p.py + st * cp * p.pz,
        ct * sp * p.px + cp * p.py + st * sp * p.pz,
        -st * p.px + ct * p.pz,
        p.e,
    )
}

/// Inverse of [`rotate`].
pub fn rotate_back(p: &FourVector, theta: f64, phi: f64) -> FourVector {
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    FourVector::new(
        ct * cp * p.px + ct * sp * p.py - st * p.pz,
        -sp * p.px + cp * p.py,
        st * cp * p.px + st * sp * p.py + ct * p.pz,
        p.e,
    )
}

/// Rotate `p`, defined with +z along `axis`, into the frame of `axis`.
pub fn align_with(p: &FourVector, axis: &FourVector) -> FourVector {
    rotate(p, axis.theta(), axis.phi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: &FourVector, b: &FourVector, tol: f64) -> bool {
        a.max_abs_diff(b) <= tol * (1.0 + a.e.abs().max(b.e.abs()))
    }

    #[test]
    fn frame_momentum_goes_to_rest() {
        let p = FourVector::on_shell(0.4, -1.2, 30.0, 1.3);
        let frame = Frame::from_momentum(p).unwrap();
        let rest = boost_to_frame(&p, &frame);
        assert!(close(&rest, &FourVector::at_rest(1.3), 1e-10));
    }

    #[test]
    fn ultra_relativistic_round_trip() {
        let m: f64 = 0.93827;
        let e = 1e9;
        let pz = (e * e - m * m).sqrt();
        let frame = Frame::new(FourVector::new(0.0, 0.0, pz, e), m).unwrap();
        let a = FourVector::on_shell(0.1, 0.2, -0.15, 0.13957);
        let b = FourVector::new(-0.1, -0.2, 0.15, m - a.e);
        let lab_a = boost_from_frame(&a, &frame);
        let lab_b = boost_from_frame(&b, &frame);
        assert!(lab_a.e > 1e7);
        // Transverse momentum is untouched by a boost along z.
        assert!((lab_a.px - 0.1).abs() < 1e-12 && (lab_a.py - 0.2).abs() < 1e-12);
        let sum = lab_a + lab_b;
        assert!((sum.e / e - 1.0).abs() < 1e-12);
        assert!((sum.pz / pz - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rotation_maps_z_axis_to_direction() {
        let z = FourVector::new(0.0, 0.0, 1.0, 1.0);
        let r = rotate(&z, 0.7, 2.1);
        assert!((r.theta() - 0.7).abs() < 1e-12);
        assert!((r.phi() - 2.1).abs() < 1e-12);
    }

    #[test]
    fn velocity_boost_matches_frame_boost() {
        let frame_p = FourVector::on_shell(1.0, 2.0, -3.0, 2.5);
        let frame = Frame::from_momentum(frame_p).unwrap();
        let beta = [
            frame_p.px / frame_p.e,
            frame_p.py / frame_p.e,
            frame_p.pz / frame_p.e,
        ];
        let p = FourVector::on_shell(0.3, -0.1, 0.2, 0.5);
        let a = boost(&p, beta);
        let b = boost_from_frame(&p, &frame);
        assert!(close(&a, &b, 1e-10), "{a:?} vs {b:?}");
    }

    proptest! {
        #[test]
        fn boost_round_trip_preserves_vector(
            q in prop::array::uniform3(-50.0f64..50.0),
            m in 0.1f64..10.0,
            k in prop::array::uniform3(-5.0f64..5.0),
            mk in 0.0f64..2.0,
        ) {
            let frame = Frame::new(FourVector::on_shell(q[0], q[1], q[2], m), m).unwrap();
            let p = FourVector::on_shell(k[0], k[1], k[2], mk);
            let back = boost_to_frame(&boost_from_frame(&p, &frame), &frame);
            prop_assert!(close(&p, &back, 1e-9));
            let lab = boost_from_frame(&p, &frame);
            prop_assert!((lab.mass2() - p.mass2()).abs() < 1e-7 * (1.0 + lab.e * lab.e));
        }

        #[test]
        fn rotate_back_inverts_rotate(
            k in prop::array::uniform3(-5.0f64..5.0),
            theta in 0.0f64..std::f64::consts::PI,
            phi in -3.0f64..3.0,
        ) {
            let p = FourVector::on_shell(k[0], k[1], k[2], 0.2);
            let r = rotate_back(&rotate(&p, theta, phi), theta, phi);
            prop_assert!(close(&p, &r, 1e-12));
        }
    }
}
