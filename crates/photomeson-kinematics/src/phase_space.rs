//! N-body phase space by the M-generator method.
//!
//! Intermediate invariant masses `M_2 < … < M_{n−1}` are drawn from
//! sorted uniforms, each step is a two-body decay of `M_k` into
//! `M_{k−1}` and `m_k`, and the event weight is the product of the
//! two-body momenta. Dividing by the product of the largest momenta each
//! step can reach gives a weight in `[0, 1]` that is used directly as the
//! acceptance probability.

use photomeson_core::{FourVector, UniformSource};
use smallvec::SmallVec;

use crate::boost::{boost_from_frame, Frame};
use crate::error::KinematicsError;
use crate::two_body::{two_body_decay, two_body_momentum};

/// Momenta of one decay, in the order of the requested masses.
pub type Momenta = SmallVec<[FourVector; 4]>;

/// One unweighted phase-space configuration and its relative weight.
#[derive(Clone, Debug)]
pub struct WeightedEvent {
    /// Daughter momenta in the parent rest frame.
    pub momenta: Momenta,
    /// Weight in `[0, 1]` relative to the maximum.
    pub weight: f64,
}

/// Generate one configuration without rejection.
pub fn weighted_event(
    mass: f64,
    masses: &[f64],
    rng: &mut dyn UniformSource,
) -> Result<WeightedEvent, KinematicsError> {
    let n = masses.len();
    let sum: f64 = masses.iter().sum();
    if n < 2 || mass < sum {
        return Err(KinematicsError::BelowThreshold {
            mass,
            required: sum,
        });
    }
    let kinetic = mass - sum;

    // Intermediate masses: inv[k] is the mass of the subsystem 0..=k.
    let mut u: SmallVec<[f64; 4]> = (0..n.saturating_sub(2)).map(|_| rng.uniform()).collect();
    u.sort_by(|a, b| a.total_cmp(b));
    let mut inv: SmallVec<[f64; 4]> = SmallVec::with_capacity(n);
    let mut partial = masses[0];
    inv.push(partial);
    for k in 1..n {
        partial += masses[k];
        let fraction = if k + 1 == n { 1.0 } else { u[k - 1] };
        inv.push(partial + fraction * kinetic);
    }

    let mut weight = 1.0;
    let mut partial_min = masses[0];
    for k in 1..n {
        let p = two_body_momentum(inv[k], inv[k - 1], masses[k]).unwrap_or(0.0);
        let max_parent = partial_min + masses[k] + kinetic;
        let p_max = two_body_momentum(max_parent, partial_min, masses[k]).unwrap_or(0.0);
        weight *= if p_max > 0.0 { p / p_max } else { 0.0 };
        partial_min += masses[k];
    }

    let mut momenta: Momenta = SmallVec::with_capacity(n);
    let (a, b) = two_body_decay(inv[1], masses[0], masses[1], rng.cosine(), rng.azimuth())?;
    momenta.push(a);
    momenta.push(b);
    for k in 2..n {
        let (sub, last) = two_body_decay(inv[k], inv[k - 1], masses[k], rng.cosine(), rng.azimuth())?;
        let frame = Frame::new(sub, inv[k - 1])?;
        for p in momenta.iter_mut() {
            *p = boost_from_frame(p, &frame);
        }
        momenta.push(last);
    }
    Ok(WeightedEvent {
        momenta,
        weight: weight.clamp(0.0, 1.0),
    })
}

/// Phase-space decay of a particle at rest, optionally reweighted.
///
/// `matrix_element` must return values in `[0, 1]`; it multiplies the
/// phase-space weight before the accept/reject step. Exhausting
/// `max_attempts` is an error.
pub fn phase_space_weighted<F>(
    mass: f64,
    masses: &[f64],
    rng: &mut dyn UniformSource,
    max_attempts: u32,
    mut matrix_element: F,
) -> Result<Momenta, KinematicsError>
where
    F: FnMut(&[FourVector]) -> f64,
{
    if masses.len() == 2 {
        // Closed form: phase space is flat in the two-body solid angle.
        for _ in 0..max_attempts {
            let (a, b) = two_body_decay(mass, masses[0], masses[1], rng.cosine(), rng.azimuth())?;
            let m = [a, b];
            if rng.uniform() < matrix_element(&m) {
                return Ok(m.into_iter().collect());
            }
        }
        return Err(KinematicsError::RetriesExhausted {
            attempts: max_attempts,
        });
    }
    for _ in 0..max_attempts {
        let event = weighted_event(mass, masses, rng)?;
        let w = event.weight * matrix_element(&event.momenta);
        if rng.uniform() < w {
            return Ok(event.momenta);
        }
    }
    Err(KinematicsError::RetriesExhausted {
        attempts: max_attempts,
    })
}

/// Pure phase-space decay of a particle at rest.
pub fn phase_space(
    mass: f64,
    masses: &[f64],
    rng: &mut dyn UniformSource,
    max_attempts: u32,
) -> Result<Momenta, KinematicsError> {
    phase_space_weighted(mass, masses, rng, max_attempts, |_| 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use photomeson_core::RngStream;

    #[test]
    fn three_body_conserves_momentum() {
        let mut rng = RngStream::new(17);
        let masses = [0.13957, 0.13957, 0.13498];
        for _ in 0..200 {
            let m = phase_space(0.78265, &masses, &mut rng, 800).unwrap();
            let sum: FourVector = m.iter().sum();
            assert!(sum.max_abs_diff(&FourVector::at_rest(0.78265)) < 1e-10);
            for (p, mass) in m.iter().zip(masses.iter()) {
                assert!((p.mass() - mass).abs() < 1e-7);
            }
        }
    }

    #[test]
    fn weights_are_bounded() {
        let mut rng = RngStream::new(5);
        for _ in 0..1000 {
            let ev = weighted_event(1.0, &[0.1, 0.2, 0.05, 0.0], &mut rng).unwrap();
            assert!((0.0..=1.0).contains(&ev.weight));
            assert_eq!(ev.momenta.len(), 4);
        }
    }

    #[test]
    fn below_threshold_is_rejected() {
        let mut rng = RngStream::new(1);
        let r = phase_space(0.3, &[0.14, 0.14, 0.14], &mut rng, 10);
        assert!(matches!(r, Err(KinematicsError::BelowThreshold { .. })));
    }

    #[test]
    fn impossible_matrix_element_exhausts_attempts() {
        let mut rng = RngStream::new(1);
        let r = phase_space_weighted(1.0, &[0.1, 0.1, 0.1], &mut rng, 50, |_| 0.0);
        assert_eq!(r.unwrap_err(), KinematicsError::RetriesExhausted { attempts: 50 });
    }
}
