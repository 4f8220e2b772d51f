//! Independent fragmentation with global momentum compensation.
//!
//! Every jet is hadronised along its own axis without any string
//! bookkeeping, so the hadrons do not add up to the jets. Three passes
//! repair that, all in the rest frame of the jet system:
//!
//! 1. the flavors left at the jet ends are joined into extra hadrons;
//! 2. the missing three-momentum is restored by the chosen
//!    [`CompensationScheme`];
//! 3. all three-momenta are scaled by a common factor until the energy
//!    matches the system mass.

use photomeson_core::{Flavor, FourVector, UniformSource};
use photomeson_kinematics::{boost_from_frame, boost_to_frame, rotate, Frame};
use tracing::trace;

use crate::config::CompensationScheme;
use crate::error::FragmentError;
use crate::parton::{complementary, Hadron, Parton};
use crate::sampling::{sample_pt, sample_z};
use crate::string::Fragmenter;

/// Relative precision of the energy rescaling.
const RESCALE_PRECISION: f64 = 2e-6;
/// Newton iterations of the energy rescaling.
const MAX_RESCALE_ITERATIONS: u32 = 10;
/// Hadrons one jet may produce.
const MAX_JET_HADRONS: usize = 200;
/// Redraws of a leftover hadron rejected by η/η′ acceptance.
const MAX_COMBINE_DRAWS: u32 = 50;

impl Fragmenter<'_> {
    /// Hadronise `jets` independently and rebalance with `scheme`.
    ///
    /// Gluon jets are first split into a collinear quark pair of equal
    /// momenta. Hadrons are returned in the frame of the input momenta.
    pub fn fragment_independent(
        &self,
        jets: &[Parton],
        scheme: CompensationScheme,
        rng: &mut dyn UniformSource,
    ) -> Result<Vec<Hadron>, FragmentError> {
        if jets.is_empty() {
            return Ok(Vec::new());
        }
        let total: FourVector = jets.iter().map(|j| j.momentum).sum();
        let w = total.mass();
        let frame = Frame::new(total, w)?;
        let mut local = Vec::with_capacity(jets.len() + 2);
        for jet in jets {
            let p = boost_to_frame(&jet.momentum, &frame);
            if jet.is_gluon() {
                let q = self.flavors.quark(rng);
                local.push(Parton::new(q, p * 0.5));
                local.push(Parton::new(q.anti(), p * 0.5));
            } else {
                local.push(Parton::new(jet.flavor, p));
            }
        }

        for attempt in 0..self.config.max_restarts {
            match self.independent_attempt(&local, w, scheme, rng) {
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
                    trace!(attempt, error = %e, "independent fragmentation restart");
                }
                Err(e) => return Err(e),
            }
        }
        Err(FragmentError::RetriesExhausted {
            attempts: self.config.max_restarts,
        })
    }

    fn independent_attempt(
        &self,
        jets: &[Parton],
        w: f64,
        scheme: CompensationScheme,
        rng: &mut dyn UniformSource,
    ) -> Result<Vec<Hadron>, FragmentError> {
        let mut hadrons = Vec::new();
        let mut axes = Vec::new();
        let mut leftovers = Vec::with_capacity(jets.len());
        for jet in jets {
            let left = self.fragment_jet(jet, &mut hadrons, &mut axes, rng)?;
            leftovers.push(left);
        }
        self.join_leftovers(leftovers, &mut hadrons, &mut axes, rng)?;
        compensate(&mut hadrons, &axes, scheme)?;
        rescale_energy(&mut hadrons, w)?;
        Ok(hadrons)
    }

    /// Hadronise one jet; returns the flavor left at its end.
    fn fragment_jet(
        &self,
        jet: &Parton,
        out: &mut Vec<Hadron>,
        axes: &mut Vec<[f64; 3]>,
        rng: &mut dyn UniformSource,
    ) -> Result<Flavor, FragmentError> {
        let p = jet.momentum;
        let p_abs = p.p_abs();
        if p_abs <= 0.0 {
            return Ok(jet.flavor);
        }
        let axis = [p.px / p_abs, p.py / p_abs, p.pz / p_abs];
        let (theta, phi) = (p.theta(), p.phi());
        let mut w_plus = p.e + p_abs;
        let mut flavor = jet.flavor;
        let (mut px, mut py) = (0.0, 0.0);

        for _ in 0..MAX_JET_HADRONS {
            if w_plus < self.config.jet_cutoff {
                break;
            }
            let brk = self.flavors.split(flavor, true, rng)?;
            let mass = self.hadron_mass(brk.hadron)?;
            let (qx, qy) = sample_pt(self.config.sigma_pt, rng);
            let (hx, hy) = (px - qx, py - qy);
            let mt2 = mass * mass + hx * hx + hy * hy;
            let z = sample_z(self.lund_a(flavor, brk.new_end), self.config.lund_b, mt2, rng);
            let plus = z * w_plus;
            if plus * plus <= mt2 {
                // The hadron would move against the jet: the jet is used up.
                break;
            }
            let minus = mt2 / plus;
            let local = FourVector::new(hx, hy, 0.5 * (plus - minus), 0.5 * (plus + minus));
            out.push(Hadron {
                code: brk.hadron,
                momentum: rotate(&local, theta, phi),
                mass,
            });
            axes.push(axis);
            w_plus -= plus;
            flavor = brk.new_end;
            px = qx;
            py = qy;
        }
        Ok(flavor)
    }

    /// Join the leftover end flavors pairwise into hadrons at rest.
    fn join_leftovers(
        &self,
        mut open: Vec<Flavor>,
        out: &mut Vec<Hadron>,
        axes: &mut Vec<[f64; 3]>,
        rng: &mut dyn UniformSource,
    ) -> Result<(), FragmentError> {
        while let Some(a) = open.pop() {
            let Some(j) = open.iter().rposition(|&b| complementary(a, b)) else {
                return Err(FragmentError::FlavorMismatch {
                    first: a,
                    second: open.last().copied().unwrap_or(a),
                });
            };
            let b = open.remove(j);
            let mut code = None;
            for _ in 0..MAX_COMBINE_DRAWS {
                code = self.flavors.combine(a, b, rng)?;
                if code.is_some() {
                    break;
                }
            }
            let code = code.ok_or(FragmentError::FlavorMismatch {
                first: a,
                second: b,
            })?;
            let mass = self.hadron_mass(code)?;
            out.push(Hadron {
                code,
                momentum: FourVector::at_rest(mass),
                mass,
            });
            axes.push([0.0; 3]);
        }
        Ok(())
    }
}

/// Restore zero total three-momentum.
fn compensate(
    hadrons: &mut [Hadron],
    axes: &[[f64; 3]],
    scheme: CompensationScheme,
) -> Result<(), FragmentError> {
    if hadrons.is_empty() {
        return Ok(());
    }
    let total: FourVector = hadrons.iter().map(|h| h.momentum).sum();
    let weights: Vec<f64> = match scheme {
        CompensationScheme::Boost => {
            let frame = Frame::from_momentum(total)?;
            for h in hadrons.iter_mut() {
                h.momentum = boost_to_frame(&h.momentum, &frame);
            }
            return Ok(());
        }
        CompensationScheme::JetAxis => hadrons
            .iter()
            .zip(axes)
            .map(|(h, a)| {
                let p = &h.momentum;
                (p.px * a[0] + p.py * a[1] + p.pz * a[2]).abs()
            })
            .collect(),
        CompensationScheme::Additive => hadrons.iter().map(|h| h.momentum.e).collect(),
    };
    let mut sum: f64 = weights.iter().sum();
    let weights = if sum > 0.0 {
        weights
    } else {
        sum = hadrons.iter().map(|h| h.momentum.e).sum();
        hadrons.iter().map(|h| h.momentum.e).collect()
    };
    for (h, wgt) in hadrons.iter_mut().zip(&weights) {
        let f = wgt / sum;
        let p = &h.momentum;
        h.momentum = FourVector::on_shell(
            p.px - f * total.px,
            p.py - f * total.py,
            p.pz - f * total.pz,
            h.mass,
        );
    }
    Ok(())
}

/// Scale all three-momenta by a common factor so that the energies add
/// up to `w`. The total three-momentum must already vanish.
fn rescale_energy(hadrons: &mut [Hadron], w: f64) -> Result<(), FragmentError> {
    let required: f64 = hadrons.iter().map(|h| h.mass).sum();
    if required >= w {
        return Err(FragmentError::MassTooSmall { mass: w, required });
    }
    let mut alpha: f64 = 1.0;
    for _ in 0..MAX_RESCALE_ITERATIONS {
        let (mut f, mut df) = (-w, 0.0);
        for h in hadrons.iter() {
            let p2 = h.momentum.p2();
            let e = (h.mass * h.mass + alpha * alpha * p2).sqrt();
            f += e;
            if e > 0.0 {
                df += alpha * p2 / e;
            }
        }
        if f.abs() <= RESCALE_PRECISION * w {
            for h in hadrons.iter_mut() {
                let p = &h.momentum;
                h.momentum =
                    FourVector::on_shell(alpha * p.px, alpha * p.py, alpha * p.pz, h.mass);
            }
            return Ok(());
        }
        if df <= 0.0 {
            break;
        }
        alpha = (alpha - f / df).max(0.0);
    }
    Err(FragmentError::EnergyExhausted {
        stage: "energy rescaling",
    })
}
