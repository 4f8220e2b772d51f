//! Fragmentation of three strings meeting at a baryon junction.
//!
//! Work happens in the rest frame of the three legs, taken as the junction
//! rest frame. The two softest legs are fragmented from their ends inward;
//! the flavors they leave behind are joined into a diquark that carries the
//! unused momentum of both legs, and the hardest leg is fragmented as an
//! ordinary string against that diquark.

use photomeson_core::{Flavor, FourVector, UniformSource};
use photomeson_kinematics::{boost_from_frame, boost_to_frame, rotate, Frame};
use tracing::trace;

use crate::error::FragmentError;
use crate::parton::{Hadron, Parton};
use crate::sampling::{sample_pt, sample_z};
use crate::string::Fragmenter;

/// Hadrons one junction leg may produce.
const MAX_LEG_HADRONS: usize = 100;

impl Fragmenter<'_> {
    /// Fragment a junction system of three quarks (or three antiquarks).
    pub fn fragment_junction(
        &self,
        legs: &[Parton; 3],
        rng: &mut dyn UniformSource,
    ) -> Result<Vec<Hadron>, FragmentError> {
        let sign = legs[0].flavor.raw().signum();
        if legs
            .iter()
            .any(|l| !l.flavor.is_quark() || l.flavor.raw().signum() != sign)
        {
            return Err(FragmentError::FlavorMismatch {
                first: legs[0].flavor,
                second: legs[1].flavor,
            });
        }
        let total: FourVector = legs.iter().map(|l| l.momentum).sum();
        let frame = Frame::from_momentum(total)?;
        let local: [Parton; 3] =
            legs.map(|l| Parton::new(l.flavor, boost_to_frame(&l.momentum, &frame)));
        let mut order = [0usize, 1, 2];
        order.sort_by(|&i, &j| local[i].momentum.e.total_cmp(&local[j].momentum.e));

        for attempt in 0..self.config.max_restarts {
            match self.split_junction(&local, order, rng) {
                Ok(hadrons) => {
                    return Ok(hadrons
                        .into_iter()
                        .map(|h| Hadron {
                            momentum: boost_from_frame(&h.momentum, &frame),
                            ..h
                        })
                        .collect());
                }
                Err(e) if e.is_recoverable() => {
                    trace!(attempt, error = %e, "junction restart");
                }
                Err(e) => return Err(e),
            }
        }
        Err(FragmentError::RetriesExhausted {
            attempts: self.config.max_restarts,
        })
    }

    fn split_junction(
        &self,
        legs: &[Parton; 3],
        order: [usize; 3],
        rng: &mut dyn UniformSource,
    ) -> Result<Vec<Hadron>, FragmentError> {
        let mut hadrons = Vec::new();
        let (fa, rest_a) = self.fragment_leg(&legs[order[0]], &mut hadrons, rng)?;
        let (fb, rest_b) = self.fragment_leg(&legs[order[1]], &mut hadrons, rng)?;

        let spin1 = 3.0 * self.config.spin1_diquark;
        let spin = if fa.raw() == fb.raw() || rng.accept(spin1 / (1.0 + spin1)) {
            1
        } else {
            0
        };
        let diquark = Flavor::diquark(fa, fb, spin).ok_or(FragmentError::FlavorMismatch {
            first: fa,
            second: fb,
        })?;
        let remnant = Parton::new(diquark, rest_a + rest_b);
        hadrons.extend(self.fragment_string(&legs[order[2]], &remnant, rng)?);
        Ok(hadrons)
    }

    /// Peel hadrons off one leg until its light-cone momentum runs low.
    ///
    /// Returns the flavor left at the junction side and the momentum not
    /// given to hadrons.
    fn fragment_leg(
        &self,
        leg: &Parton,
        out: &mut Vec<Hadron>,
        rng: &mut dyn UniformSource,
    ) -> Result<(Flavor, FourVector), FragmentError> {
        let p = leg.momentum;
        let p_abs = p.p_abs();
        if p_abs <= 0.0 {
            return Ok((leg.flavor, p));
        }
        let (theta, phi) = (p.theta(), p.phi());
        let mut w_plus = p.e + p_abs;
        let mut flavor = leg.flavor;
        let (mut px, mut py) = (0.0, 0.0);
        let mut taken = FourVector::ZERO;

        for _ in 0..MAX_LEG_HADRONS {
            if 0.5 * w_plus < self.config.stop_mass + flavor.constituent_mass() {
                break;
            }
            let brk = self.flavors.split(flavor, false, rng)?;
            let mass = self.hadron_mass(brk.hadron)?;
            let (qx, qy) = sample_pt(self.config.sigma_pt, rng);
            let (hx, hy) = (px - qx, py - qy);
            let mt2 = mass * mass + hx * hx + hy * hy;
            let z = sample_z(self.config.lund_a, self.config.lund_b, mt2, rng);
            let plus = z * w_plus;
            let minus = mt2 / plus;
            let local = FourVector::new(hx, hy, 0.5 * (plus - minus), 0.5 * (plus + minus));
            let momentum = rotate(&local, theta, phi);
            w_plus -= plus;
            taken += momentum;
            out.push(Hadron {
                code: brk.hadron,
                momentum,
                mass,
            });
            flavor = brk.new_end;
            px = qx;
            py = qy;
        }
        Ok((flavor, p - taken))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photomeson_core::{ParticleTable, RngStream};
    use photomeson_tables::StandardTables;

    use crate::config::FragmentationConfig;

    fn legs(sign: i32) -> [Parton; 3] {
        let e = 6.0;
        let s = 3f64.sqrt() / 2.0;
        [
            Parton::new(Flavor(2 * sign), FourVector::new(0.0, e, 0.0, e)),
            Parton::new(Flavor(2 * sign), FourVector::new(e * s, -0.5 * e, 0.0, e)),
            Parton::new(Flavor(sign), FourVector::new(-e * s, -0.5 * e, 1.0, e + 0.1)),
        ]
    }

    #[test]
    fn junction_makes_one_baryon() {
        let tables = StandardTables::new();
        let config = FragmentationConfig::default();
        let frag = Fragmenter::new(&config, &tables);
        let mut rng = RngStream::new(31);
        for sign in [1, -1] {
            let legs = legs(sign);
            let total: FourVector = legs.iter().map(|l| l.momentum).sum();
            for _ in 0..20 {
                let hadrons = frag.fragment_junction(&legs, &mut rng).unwrap();
                let sum: FourVector = hadrons.iter().map(|h| h.momentum).sum();
                assert!(sum.max_abs_diff(&total) < 1e-8 * total.e);
                let baryons: i32 = hadrons
                    .iter()
                    .map(|h| tables.baryon_number(h.code).unwrap())
                    .sum();
                assert_eq!(baryons, sign);
                let charge: i32 = hadrons.iter().map(|h| tables.charge(h.code).unwrap()).sum();
                assert_eq!(charge, sign);
            }
        }
    }

    #[test]
    fn mixed_legs_are_rejected() {
        let tables = StandardTables::new();
        let config = FragmentationConfig::default();
        let frag = Fragmenter::new(&config, &tables);
        let mut rng = RngStream::new(32);
        let mut l = legs(1);
        l[2].flavor = Flavor(-1);
        assert!(matches!(
            frag.fragment_junction(&l, &mut rng),
            Err(FragmentError::FlavorMismatch { .. })
        ));
    }
}
