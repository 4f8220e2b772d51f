//! Timelike parton shower of a colour dipole.
//!
//! Each end of the dipole evolves in virtuality `t` from `W²/4` down to
//! `Q0²` with the veto algorithm: trial values come from an overestimated
//! Sudakov form factor with a frozen coupling, and are accepted with the
//! ratio of the true splitting kernel and running coupling to their
//! overestimates. Branchings are `q → q g`, `g → g g` and `g → q q̄`.
//!
//! Kinematics are built top-down once the tree is complete: the two ends
//! are put on their virtual mass shells, then every branching is solved
//! as a two-body decay in the parent rest frame with the polar angle fixed
//! by the energy sharing `z`.

use std::f64::consts::PI;

use photomeson_core::{Flavor, FourVector, UniformSource};
use photomeson_kinematics::{
    align_with, boost_from_frame, boost_to_frame, rescale_to_mass_shell, two_body_decay,
    two_body_momentum, Frame,
};

use crate::config::ShowerConfig;
use crate::error::FragmentError;
use crate::parton::{complementary, Parton};

const C_F: f64 = 4.0 / 3.0;
const C_A: f64 = 3.0;
const T_R: f64 = 0.5;
/// Trial steps of one parton before it is left unbranched.
const MAX_TRIALS: u32 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Splitting {
    QuarkGluon,
    GluonGluon,
    GluonQuarks,
}

/// One parton of the shower tree.
#[derive(Clone, Debug)]
struct Node {
    flavor: Flavor,
    /// Virtuality; zero for final partons.
    t: f64,
    /// Energy share of the first daughter.
    z: f64,
    momentum: FourVector,
    children: Option<Box<(Node, Node)>>,
}

impl Node {
    fn leaf(flavor: Flavor) -> Self {
        Self {
            flavor,
            t: 0.0,
            z: 0.0,
            momentum: FourVector::ZERO,
            children: None,
        }
    }
}

/// Colour-ordered output while flattening the tree.
enum Item {
    Parton(Parton),
    Break,
}

/// Virtuality-ordered final-state shower.
#[derive(Clone, Copy, Debug)]
pub struct DipoleShower<'a> {
    config: &'a ShowerConfig,
}

impl<'a> DipoleShower<'a> {
    /// Shower with the parameters of `config`.
    pub fn new(config: &'a ShowerConfig) -> Self {
        Self { config }
    }

    /// Whether a system of invariant mass `mass` should be showered.
    pub fn applies_to(&self, mass: f64) -> bool {
        self.config.enabled && mass >= self.config.min_mass
    }

    fn alpha_s(&self, q2: f64) -> f64 {
        let nf = f64::from(self.config.flavors);
        let lambda2 = self.config.lambda_qcd * self.config.lambda_qcd;
        12.0 * PI / ((33.0 - 2.0 * nf) * (q2 / lambda2).ln())
    }

    /// Shower the dipole spanned by `first` and `second`.
    ///
    /// Returns colour-connected chains `end, g, …, g, end`, each running
    /// from a parton of `first`'s representation to one of `second`'s.
    /// A `g → q q̄` branching cuts the dipole into two chains. The summed
    /// momentum of all chains equals that of the input pair.
    pub fn shower_dipole(
        &self,
        first: &Parton,
        second: &Parton,
        rng: &mut dyn UniformSource,
    ) -> Result<Vec<Vec<Parton>>, FragmentError> {
        if !complementary(first.flavor, second.flavor) {
            return Err(FragmentError::FlavorMismatch {
                first: first.flavor,
                second: second.flavor,
            });
        }
        let total = first.momentum + second.momentum;
        let w = total.mass();
        let frame = Frame::new(total, w)?;
        let p1 = boost_to_frame(&first.momentum, &frame);
        let p2 = boost_to_frame(&second.momentum, &frame);

        let mut budget = self.config.max_branchings;
        let t_start = 0.25 * w * w;
        let mut n1 = self.evolve(first.flavor, p1.e, t_start.min(p1.e * p1.e), PI, &mut budget, rng);
        let mut n2 = self.evolve(second.flavor, p2.e, t_start.min(p2.e * p2.e), PI, &mut budget, rng);
        if n1.t.sqrt() + n2.t.sqrt() >= w {
            n1 = Node::leaf(first.flavor);
            n2 = Node::leaf(second.flavor);
        }
        let (q1, q2) = rescale_to_mass_shell(&p1, &p2, n1.t.sqrt(), n2.t.sqrt())?;
        self.place(&mut n1, q1, rng)?;
        self.place(&mut n2, q2, rng)?;

        let triplet_first = first.flavor.is_triplet();
        let mut items = Vec::new();
        seq_start(&n1, triplet_first, &mut items, rng);
        seq_end(&n2, triplet_first, &mut items, rng);

        let mut chains = vec![Vec::new()];
        for item in items {
            match item {
                Item::Parton(p) => {
                    if let Some(chain) = chains.last_mut() {
                        chain.push(Parton::new(p.flavor, boost_from_frame(&p.momentum, &frame)));
                    }
                }
                Item::Break => chains.push(Vec::new()),
            }
        }
        Ok(chains)
    }

    /// Evolve one parton of energy `energy` below virtuality `t_max`.
    fn evolve(
        &self,
        flavor: Flavor,
        energy: f64,
        t_max: f64,
        angle_max: f64,
        budget: &mut u32,
        rng: &mut dyn UniformSource,
    ) -> Node {
        let t0 = self.config.cutoff * self.config.cutoff;
        let alpha_max = self.alpha_s(0.5 * t0);
        let nf = f64::from(self.config.flavors);
        let mut t = t_max;

        for _ in 0..MAX_TRIALS {
            if t <= 4.0 * t0 || *budget == 0 {
                break;
            }
            let eps = t0 / t;
            let log_range = ((1.0 - eps) / eps).ln();
            let weights = if flavor.is_gluon() {
                [0.0, C_A * log_range, nf * T_R * (1.0 - 2.0 * eps)]
            } else {
                [2.0 * C_F * log_range, 0.0, 0.0]
            };
            let total: f64 = weights.iter().sum();
            if total <= 0.0 {
                break;
            }
            t *= rng.uniform_open().powf(2.0 * PI / (alpha_max * total));
            if t <= 4.0 * t0 {
                break;
            }

            let kind = match rng.pick_weighted(&weights) {
                Some(0) => Splitting::QuarkGluon,
                Some(1) => Splitting::GluonGluon,
                _ => Splitting::GluonQuarks,
            };
            let z = match kind {
                Splitting::QuarkGluon => 1.0 - eps * ((1.0 - eps) / eps).powf(rng.uniform()),
                Splitting::GluonGluon => {
                    let soft = eps * ((1.0 - eps) / eps).powf(rng.uniform());
                    if rng.uniform() < 0.5 {
                        soft
                    } else {
                        1.0 - soft
                    }
                }
                Splitting::GluonQuarks => eps + (1.0 - 2.0 * eps) * rng.uniform(),
            };

            let eps_now = t0 / t;
            if z < eps_now || z > 1.0 - eps_now {
                continue;
            }
            let zz = z * (1.0 - z);
            let theta2 = t / (zz * energy * energy);
            if self.config.angular_ordering && theta2 > angle_max * angle_max {
                continue;
            }
            let kernel_ratio = match kind {
                Splitting::QuarkGluon => 0.5 * (1.0 + z * z),
                Splitting::GluonGluon => z * z + (1.0 - z) * (1.0 - z) + zz * zz,
                Splitting::GluonQuarks => z * z + (1.0 - z) * (1.0 - z),
            };
            let coupling_ratio = self.alpha_s((zz * t).max(0.5 * t0)) / alpha_max;
            if !rng.accept(kernel_ratio * coupling_ratio) {
                continue;
            }

            *budget -= 1;
            let (fa, fb) = match kind {
                Splitting::QuarkGluon => (flavor, Flavor::GLUON),
                Splitting::GluonGluon => (Flavor::GLUON, Flavor::GLUON),
                Splitting::GluonQuarks => {
                    let q = 1 + (rng.uniform() * nf).floor().min(nf - 1.0) as i32;
                    (Flavor(q), Flavor(-q))
                }
            };
            let theta = theta2.sqrt();
            let a = self.evolve(fa, z * energy, z * z * t, theta, budget, rng);
            let b = self.evolve(fb, (1.0 - z) * energy, (1.0 - z) * (1.0 - z) * t, theta, budget, rng);
            return Node {
                flavor,
                t,
                z,
                momentum: FourVector::ZERO,
                children: Some(Box::new((a, b))),
            };
        }
        Node::leaf(flavor)
    }

    /// Assign momenta to `node` and, recursively, its daughters.
    fn place(
        &self,
        node: &mut Node,
        momentum: FourVector,
        rng: &mut dyn UniformSource,
    ) -> Result<(), FragmentError> {
        node.momentum = momentum;
        let z = node.z;
        let m = node.t.sqrt();
        let Some(children) = node.children.as_mut() else {
            return Ok(());
        };
        let (a, b) = &mut **children;
        let (ma, mb) = (a.t.sqrt(), b.t.sqrt());
        let p_star = two_body_momentum(m, ma, mb).ok_or(FragmentError::MassTooSmall {
            mass: m,
            required: ma + mb,
        })?;
        let frame = Frame::new(momentum, m)?;
        let gamma = momentum.e / m;
        let beta_gamma = momentum.p_abs() / m;
        let ea_star = (p_star * p_star + ma * ma).sqrt();
        let cos_theta = if beta_gamma * p_star > 0.0 {
            ((z * momentum.e - gamma * ea_star) / (beta_gamma * p_star)).clamp(-1.0, 1.0)
        } else {
            rng.cosine()
        };
        let (qa, qb) = two_body_decay(m, ma, mb, cos_theta, rng.azimuth())?;
        let qa = boost_from_frame(&align_with(&qa, &momentum), &frame);
        let qb = boost_from_frame(&align_with(&qb, &momentum), &frame);
        self.place(a, qa, rng)?;
        self.place(b, qb, rng)
    }
}

fn leaf_item(node: &Node) -> Item {
    Item::Parton(Parton::new(node.flavor, node.momentum))
}

/// A quark-type parton opening a chain, followed by its emissions.
fn seq_start(node: &Node, triplet_first: bool, out: &mut Vec<Item>, rng: &mut dyn UniformSource) {
    match node.children.as_deref() {
        None => out.push(leaf_item(node)),
        Some((quark, gluon)) => {
            seq_start(quark, triplet_first, out, rng);
            seq_gluon(gluon, triplet_first, out, rng);
        }
    }
}

/// Emissions of a quark-type parton closing a chain, then the parton.
fn seq_end(node: &Node, triplet_first: bool, out: &mut Vec<Item>, rng: &mut dyn UniformSource) {
    match node.children.as_deref() {
        None => out.push(leaf_item(node)),
        Some((quark, gluon)) => {
            seq_gluon(gluon, triplet_first, out, rng);
            seq_end(quark, triplet_first, out, rng);
        }
    }
}

fn seq_gluon(node: &Node, triplet_first: bool, out: &mut Vec<Item>, rng: &mut dyn UniformSource) {
    match node.children.as_deref() {
        None => out.push(leaf_item(node)),
        Some((a, b)) if a.flavor.is_gluon() => {
            let (x, y) = if rng.uniform() < 0.5 { (a, b) } else { (b, a) };
            seq_gluon(x, triplet_first, out, rng);
            seq_gluon(y, triplet_first, out, rng);
        }
        Some((quark, antiquark)) => {
            // g → q q̄ closes the running chain and opens a new one.
            let (closing, opening) = if triplet_first {
                (antiquark, quark)
            } else {
                (quark, antiquark)
            };
            seq_end(closing, triplet_first, out, rng);
            out.push(Item::Break);
            seq_start(opening, triplet_first, out, rng);
        }
    }
}
