//! Lund string fragmentation of open, kinked and closed strings.
//!
//! An open string is split in its rest frame, with the first end along
//! `+z`. Each step takes a hadron off a randomly chosen end: the end's
//! light-cone momentum `W±` shrinks by `z·W±` and the opposite component
//! by `m_T²/(z·W±)`. When the remaining mass falls below
//!
//! ```text
//! W_min · (1 + (2u − 1) · smearing),   W_min = m_end1 + m_end2 + stop_mass
//! ```
//!
//! the rest is closed by exactly two hadrons. Any step that runs out of
//! light-cone momentum restarts the whole string.

use photomeson_core::{Flavor, FourVector, ParticleCode, ParticleTable, UniformSource};
use photomeson_kinematics::{boost_from_frame, boost_to_frame, kallen, rotate, Frame};
use tracing::trace;

use crate::config::FragmentationConfig;
use crate::error::FragmentError;
use crate::flavors::{lightest_hadron_mass, FlavorGenerator};
use crate::parton::{complementary, Hadron, Parton};
use crate::sampling::{sample_pt, sample_z};

/// Hadrons one string may produce before the attempt is abandoned.
const MAX_HADRONS: usize = 400;
/// Draws of the final hadron pair before the attempt is abandoned.
const MAX_FINAL_ATTEMPTS: u32 = 20;
/// Neighbouring gluons lighter than this (GeV) are merged before splitting.
const GLUON_MERGE_MASS: f64 = 1.0;

/// Hadronisation engine for one configuration and particle table.
///
/// Stateless between calls; every random decision goes through the
/// stream passed in.
#[derive(Clone, Copy)]
pub struct Fragmenter<'a> {
    pub(crate) config: &'a FragmentationConfig,
    pub(crate) table: &'a dyn ParticleTable,
    pub(crate) flavors: FlavorGenerator<'a>,
}

impl std::fmt::Debug for Fragmenter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fragmenter")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

/// One end of the string while it is being split.
///
/// `plus`/`minus` are the light-cone coordinates of the last break on this
/// side, measured from the production point in momentum units. The string
/// left between the two vertices has `W+ = plus₀ − plus₁` and
/// `W− = minus₁ − minus₀`.
#[derive(Clone, Copy, Debug)]
struct End {
    flavor: Flavor,
    px: f64,
    py: f64,
    plus: f64,
    minus: f64,
}

impl End {
    fn new(flavor: Flavor, plus: f64, minus: f64) -> Self {
        Self {
            flavor,
            px: 0.0,
            py: 0.0,
            plus,
            minus,
        }
    }

    /// `Γ = x+ · x−` of the break vertex.
    fn gamma(&self) -> f64 {
        self.plus * self.minus
    }
}

/// Light-cone momenta `(W+, W−)` of the string between two break vertices.
fn remaining(ends: &[End; 2]) -> (f64, f64) {
    (ends[0].plus - ends[1].plus, ends[1].minus - ends[0].minus)
}

impl<'a> Fragmenter<'a> {
    /// Fragmenter using `config` and hadron masses from `table`.
    pub fn new(config: &'a FragmentationConfig, table: &'a dyn ParticleTable) -> Self {
        Self {
            config,
            table,
            flavors: FlavorGenerator::new(config),
        }
    }

    /// The flavor generator used at string breaks.
    pub fn flavors(&self) -> &FlavorGenerator<'a> {
        &self.flavors
    }

    pub(crate) fn hadron_mass(&self, code: ParticleCode) -> Result<f64, FragmentError> {
        self.table
            .mass(code)
            .ok_or(FragmentError::UnknownHadron { code })
    }

    pub(crate) fn lund_a(&self, old: Flavor, new: Flavor) -> f64 {
        if old.is_diquark() || new.is_diquark() {
            self.config.lund_a + self.config.diquark_a_shift
        } else {
            self.config.lund_a
        }
    }

    /// Fragment the open string spanned by `first` and `second`.
    ///
    /// One end must be a colour triplet and the other an antitriplet.
    /// Hadrons are returned in the frame of the input momenta.
    pub fn fragment_string(
        &self,
        first: &Parton,
        second: &Parton,
        rng: &mut dyn UniformSource,
    ) -> Result<Vec<Hadron>, FragmentError> {
        if !complementary(first.flavor, second.flavor) {
            return Err(FragmentError::FlavorMismatch {
                first: first.flavor,
                second: second.flavor,
            });
        }
        let total = first.momentum + second.momentum;
        let w = total.mass();
        let required = lightest_hadron_mass(first.flavor) + lightest_hadron_mass(second.flavor);
        if w < required {
            return Err(FragmentError::MassTooSmall { mass: w, required });
        }
        let frame = Frame::new(total, w)?;
        let axis = boost_to_frame(&first.momentum, &frame);
        if axis.p_abs() < 1e-6 * w {
            return Err(FragmentError::EnergyExhausted {
                stage: "string axis",
            });
        }
        let (theta, phi) = (axis.theta(), axis.phi());

        for attempt in 0..self.config.max_restarts {
            match self.split_string(first.flavor, second.flavor, w, rng) {
                Ok(local) => {
                    return Ok(local
                        .into_iter()
                        .map(|h| Hadron {
                            momentum: boost_from_frame(&rotate(&h.momentum, theta, phi), &frame),
                            ..h
                        })
                        .collect());
                }
                Err(e) if e.is_recoverable() => {
                    trace!(attempt, mass = w, error = %e, "string restart");
                }
                Err(e) => return Err(e),
            }
        }
        Err(FragmentError::RetriesExhausted {
            attempts: self.config.max_restarts,
        })
    }

    /// One attempt in the string rest frame, first end along `+z`.
    fn split_string(
        &self,
        f1: Flavor,
        f2: Flavor,
        w: f64,
        rng: &mut dyn UniformSource,
    ) -> Result<Vec<Hadron>, FragmentError> {
        let mut ends = [End::new(f1, w, 0.0), End::new(f2, 0.0, w)];
        let mut forward: Vec<Hadron> = Vec::new();
        let mut backward: Vec<Hadron> = Vec::new();

        loop {
            if forward.len() + backward.len() >= MAX_HADRONS {
                return Err(FragmentError::EnergyExhausted {
                    stage: "string splitting",
                });
            }
            let (w_plus, w_minus) = remaining(&ends);
            let (rx, ry) = (ends[0].px + ends[1].px, ends[0].py + ends[1].py);
            let remaining2 = w_plus * w_minus - rx * rx - ry * ry;
            let w_min = ends[0].flavor.constituent_mass()
                + ends[1].flavor.constituent_mass()
                + self.config.stop_mass;
            let smear = 1.0 + (2.0 * rng.uniform() - 1.0) * self.config.stop_smearing;
            if remaining2 < (w_min * smear).powi(2) {
                break;
            }

            let side = usize::from(rng.uniform() >= 0.5);
            let end = ends[side];
            let brk = self.flavors.split(end.flavor, true, rng)?;
            let mass = self.hadron_mass(brk.hadron)?;
            let (qx, qy) = sample_pt(self.config.sigma_pt, rng);
            let (hx, hy) = (end.px - qx, end.py - qy);
            let mt2 = mass * mass + hx * hx + hy * hy;
            let z = sample_z(
                self.lund_a(end.flavor, brk.new_end),
                self.config.lund_b,
                mt2,
                rng,
            );

            let (plus, minus) = if side == 0 {
                let plus = z * w_plus;
                (plus, mt2 / plus)
            } else {
                let minus = z * w_minus;
                (mt2 / minus, minus)
            };
            if plus >= w_plus || minus >= w_minus {
                return Err(FragmentError::EnergyExhausted {
                    stage: "string splitting",
                });
            }
            let (vertex_plus, vertex_minus) = if side == 0 {
                (end.plus - plus, end.minus + minus)
            } else {
                (end.plus + plus, end.minus - minus)
            };
            // The new break sits on the hyperbola Γ' = (1 − z)(Γ + m_T²/z),
            // with z taken from this side's vertex.
            let z_vertex = if side == 0 { plus / end.plus } else { minus / end.minus };
            let expected = (1.0 - z_vertex) * (end.gamma() + mt2 / z_vertex);
            let gamma = vertex_plus * vertex_minus;
            if gamma <= 0.0 || (gamma - expected).abs() > 1e-6 * (w * w).max(1.0) {
                return Err(FragmentError::EnergyExhausted {
                    stage: "string vertex",
                });
            }

            let hadron = Hadron {
                code: brk.hadron,
                momentum: FourVector::new(hx, hy, 0.5 * (plus - minus), 0.5 * (plus + minus)),
                mass,
            };
            if side == 0 {
                forward.push(hadron);
            } else {
                backward.push(hadron);
            }
            ends[side] = End {
                flavor: brk.new_end,
                px: qx,
                py: qy,
                plus: vertex_plus,
                minus: vertex_minus,
            };
        }

        trace!(
            hadrons = forward.len() + backward.len(),
            gamma_forward = ends[0].gamma(),
            gamma_backward = ends[1].gamma(),
            "string stopped"
        );
        let (w_plus, w_minus) = remaining(&ends);
        let (h0, h1) = self.final_pair(&ends, w_plus, w_minus, rng)?;
        forward.push(h0);
        backward.push(h1);
        forward.extend(backward.into_iter().rev());
        Ok(forward)
    }

    /// Close the remaining system `(W+, W−, p_T of both ends)` with two
    /// hadrons. The first returned hadron is on the `+z` side.
    fn final_pair(
        &self,
        ends: &[End; 2],
        w_plus: f64,
        w_minus: f64,
        rng: &mut dyn UniformSource,
    ) -> Result<(Hadron, Hadron), FragmentError> {
        let s = w_plus * w_minus;
        for _ in 0..MAX_FINAL_ATTEMPTS {
            let side = usize::from(rng.uniform() >= 0.5);
            let other = 1 - side;
            let allow_diquark = !ends[other].flavor.is_diquark();
            let brk = self.flavors.split(ends[side].flavor, allow_diquark, rng)?;
            let Some(closing) = self.flavors.combine(ends[other].flavor, brk.new_end, rng)? else {
                continue;
            };
            let (qx, qy) = sample_pt(self.config.sigma_pt, rng);

            let mut codes = [brk.hadron; 2];
            codes[other] = closing;
            let mut pt = [[0.0; 2]; 2];
            pt[side] = [ends[side].px - qx, ends[side].py - qy];
            pt[other] = [ends[other].px + qx, ends[other].py + qy];
            let masses = [self.hadron_mass(codes[0])?, self.hadron_mass(codes[1])?];
            let mt2 = [
                masses[0] * masses[0] + pt[0][0] * pt[0][0] + pt[0][1] * pt[0][1],
                masses[1] * masses[1] + pt[1][0] * pt[1][0] + pt[1][1] * pt[1][1],
            ];
            if s <= 0.0 || s.sqrt() <= mt2[0].sqrt() + mt2[1].sqrt() {
                continue;
            }
            let lam = kallen(s, mt2[0], mt2[1]).max(0.0).sqrt();
            let plus0 = w_plus * (s + mt2[0] - mt2[1] + lam) / (2.0 * s);
            let minus0 = mt2[0] / plus0;
            let (plus1, minus1) = (w_plus - plus0, w_minus - minus0);
            let make = |i: usize, plus: f64, minus: f64| Hadron {
                code: codes[i],
                momentum: FourVector::new(
                    pt[i][0],
                    pt[i][1],
                    0.5 * (plus - minus),
                    0.5 * (plus + minus),
                ),
                mass: masses[i],
            };
            return Ok((make(0, plus0, minus0), make(1, plus1, minus1)));
        }
        Err(FragmentError::EnergyExhausted {
            stage: "final hadron pair",
        })
    }

    /// Fragment an open chain `end, g, g, …, end` with gluon kinks.
    ///
    /// Gluons too close in mass to a neighbour are absorbed into it; each
    /// remaining gluon is split into a collinear quark pair, cutting the
    /// chain into independent two-end strings.
    pub fn fragment_chain(
        &self,
        partons: &[Parton],
        rng: &mut dyn UniformSource,
    ) -> Result<Vec<Hadron>, FragmentError> {
        let (first, last) = match partons {
            [first, .., last] => (*first, *last),
            [only] => {
                return Err(FragmentError::FlavorMismatch {
                    first: only.flavor,
                    second: only.flavor,
                })
            }
            [] => return Err(FragmentError::NoGluons),
        };
        let mut chain: Vec<Parton> = partons.to_vec();
        if chain[1..chain.len() - 1].iter().any(|p| !p.is_gluon()) {
            return Err(FragmentError::FlavorMismatch {
                first: first.flavor,
                second: last.flavor,
            });
        }
        merge_soft_gluons(&mut chain);

        let mut hadrons = Vec::new();
        let mut start = chain[0];
        for gluon in &chain[1..chain.len() - 1] {
            let q = self.flavors.quark(rng);
            let closing = if start.flavor.is_triplet() {
                q.anti()
            } else {
                q
            };
            let half = gluon.momentum * 0.5;
            hadrons.extend(self.fragment_string(&start, &Parton::new(closing, half), rng)?);
            start = Parton::new(closing.anti(), half);
        }
        hadrons.extend(self.fragment_string(&start, &last, rng)?);
        Ok(hadrons)
    }

    /// Fragment a closed gluon loop.
    ///
    /// The loop is cut at a gluon picked with probability proportional to
    /// its energy; the cut gluon becomes a quark pair sharing its momentum
    /// at a uniform fraction, and the resulting open chain is fragmented.
    ///
    /// Photon–nucleon topologies always end on quarks or diquarks, so the
    /// event engine never calls this; it is the entry point for callers
    /// hadronising gluon-only systems.
    pub fn fragment_closed(
        &self,
        gluons: &[Parton],
        rng: &mut dyn UniformSource,
    ) -> Result<Vec<Hadron>, FragmentError> {
        if gluons.is_empty() || gluons.iter().any(|g| !g.is_gluon()) {
            return Err(FragmentError::NoGluons);
        }
        let energies: Vec<f64> = gluons.iter().map(|g| g.momentum.e).collect();
        let start = rng.pick_weighted(&energies).ok_or(FragmentError::NoGluons)?;
        let x = rng.uniform();
        let q = self.flavors.quark(rng);
        let cut = gluons[start].momentum;

        let n = gluons.len();
        let mut chain = Vec::with_capacity(n + 1);
        chain.push(Parton::new(q, cut * (1.0 - x)));
        for k in 1..n {
            chain.push(gluons[(start + k) % n]);
        }
        chain.push(Parton::new(q.anti(), cut * x));
        self.fragment_chain(&chain, rng)
    }
}

/// Absorb interior gluons whose pair mass with a neighbour is small.
fn merge_soft_gluons(chain: &mut Vec<Parton>) {
    loop {
        let n = chain.len();
        if n <= 2 {
            return;
        }
        let mut lightest: Option<(usize, usize, f64)> = None;
        for i in 1..n - 1 {
            for j in [i - 1, i + 1] {
                let m = (chain[i].momentum + chain[j].momentum).mass();
                if m < GLUON_MERGE_MASS && lightest.is_none_or(|(_, _, best)| m < best) {
                    lightest = Some((i, j, m));
                }
            }
        }
        let Some((gluon, into, _)) = lightest else {
            return;
        };
        let p = chain[gluon].momentum;
        chain[into].momentum += p;
        chain.remove(gluon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photomeson_core::RngStream;
    use photomeson_tables::StandardTables;

    fn back_to_back(f1: Flavor, f2: Flavor, w: f64) -> (Parton, Parton) {
        (
            Parton::new(f1, FourVector::new(0.0, 0.0, 0.5 * w, 0.5 * w)),
            Parton::new(f2, FourVector::new(0.0, 0.0, -0.5 * w, 0.5 * w)),
        )
    }

    fn charge(tables: &StandardTables, hadrons: &[Hadron]) -> i32 {
        hadrons
            .iter()
            .map(|h| tables.charge(h.code).unwrap())
            .sum()
    }

    fn baryons(tables: &StandardTables, hadrons: &[Hadron]) -> i32 {
        hadrons
            .iter()
            .map(|h| tables.baryon_number(h.code).unwrap())
            .sum()
    }

    fn assert_momentum(total: &FourVector, hadrons: &[Hadron]) {
        let sum: FourVector = hadrons.iter().map(|h| h.momentum).sum();
        let tol = 1e-8 * (1.0 + total.e);
        assert!(sum.max_abs_diff(total) < tol, "sum {sum:?} total {total:?}");
        for h in hadrons {
            assert!(
                (h.momentum.mass() - h.mass).abs() < 1e-6 * (1.0 + h.momentum.e),
                "{h:?}"
            );
            assert!(h.momentum.e > 0.0);
        }
    }

    #[test]
    fn quark_antiquark_string_conserves_everything() {
        let tables = StandardTables::new();
        let config = FragmentationConfig::default();
        let frag = Fragmenter::new(&config, &tables);
        let mut rng = RngStream::new(21);
        let (a, b) = back_to_back(Flavor::UP, Flavor(-1), 10.0);
        for _ in 0..50 {
            let hadrons = frag.fragment_string(&a, &b, &mut rng).unwrap();
            assert!(hadrons.len() >= 2);
            assert_momentum(&(a.momentum + b.momentum), &hadrons);
            assert_eq!(charge(&tables, &hadrons), 1);
            assert_eq!(baryons(&tables, &hadrons), 0);
        }
    }

    #[test]
    fn break_vertices_follow_the_gamma_hyperbola() {
        let w = 10.0;
        let mut ends = [End::new(Flavor::UP, w, 0.0), End::new(Flavor(-2), 0.0, w)];
        assert_eq!(remaining(&ends), (w, w));
        assert_eq!(ends[0].gamma(), 0.0);

        let (z, mt2) = (0.4, 0.3);
        let plus = z * w;
        ends[0].plus -= plus;
        ends[0].minus += mt2 / plus;
        assert!((ends[0].gamma() - (1.0 - z) * mt2 / z).abs() < 1e-12);

        let (z2, mt2b) = (0.25, 0.5);
        let minus = z2 * ends[1].minus;
        let gamma_before = ends[1].gamma();
        ends[1].minus -= minus;
        ends[1].plus += mt2b / minus;
        let expected = (1.0 - z2) * (gamma_before + mt2b / z2);
        assert!((ends[1].gamma() - expected).abs() < 1e-12);

        let (wp, wm) = remaining(&ends);
        assert!((wp - (w - plus - mt2b / minus)).abs() < 1e-12);
        assert!((wm - (w - mt2 / plus - minus)).abs() < 1e-12);
    }

    #[test]
    fn quark_diquark_string_carries_one_baryon() {
        let tables = StandardTables::new();
        let config = FragmentationConfig::default();
        let frag = Fragmenter::new(&config, &tables);
        let mut rng = RngStream::new(22);
        let (a, b) = back_to_back(Flavor::UP, Flavor(2101), 6.0);
        for _ in 0..50 {
            let hadrons = frag.fragment_string(&a, &b, &mut rng).unwrap();
            assert_momentum(&(a.momentum + b.momentum), &hadrons);
            assert_eq!(charge(&tables, &hadrons), 1);
            assert_eq!(baryons(&tables, &hadrons), 1);
        }
    }

    #[test]
    fn boosted_string_keeps_lab_momentum() {
        let tables = StandardTables::new();
        let config = FragmentationConfig::default();
        let frag = Fragmenter::new(&config, &tables);
        let mut rng = RngStream::new(23);
        let a = Parton::new(Flavor::DOWN, FourVector::new(0.3, 1.0, 40.0, 40.0137));
        let b = Parton::new(Flavor(-2), FourVector::new(-0.5, 0.2, 5.0, 5.05));
        let hadrons = frag.fragment_string(&a, &b, &mut rng).unwrap();
        assert_momentum(&(a.momentum + b.momentum), &hadrons);
        assert_eq!(charge(&tables, &hadrons), -1);
    }

    #[test]
    fn same_seed_same_hadrons() {
        let tables = StandardTables::new();
        let config = FragmentationConfig::default();
        let frag = Fragmenter::new(&config, &tables);
        let (a, b) = back_to_back(Flavor::UP, Flavor(-2), 8.0);
        let one = frag.fragment_string(&a, &b, &mut RngStream::new(5)).unwrap();
        let two = frag.fragment_string(&a, &b, &mut RngStream::new(5)).unwrap();
        assert_eq!(one, two);
    }

    #[test]
    fn light_and_mismatched_strings_are_rejected() {
        let tables = StandardTables::new();
        let config = FragmentationConfig::default();
        let frag = Fragmenter::new(&config, &tables);
        let mut rng = RngStream::new(24);
        let (a, b) = back_to_back(Flavor::UP, Flavor(2101), 1.0);
        assert!(matches!(
            frag.fragment_string(&a, &b, &mut rng),
            Err(FragmentError::MassTooSmall { .. })
        ));
        let (a, b) = back_to_back(Flavor::UP, Flavor::DOWN, 5.0);
        assert!(matches!(
            frag.fragment_string(&a, &b, &mut rng),
            Err(FragmentError::FlavorMismatch { .. })
        ));
    }

    #[test]
    fn gluon_chain_conserves_momentum_and_charge() {
        let tables = StandardTables::new();
        let config = FragmentationConfig::default();
        let frag = Fragmenter::new(&config, &tables);
        let mut rng = RngStream::new(25);
        let chain = [
            Parton::new(Flavor::UP, FourVector::new(0.0, 0.0, 10.0, 10.0)),
            Parton::new(Flavor::GLUON, FourVector::new(6.0, 0.0, 0.0, 6.0)),
            Parton::new(Flavor(-2), FourVector::new(-6.0, 0.0, -10.0, 11.661_903_789_690_6)),
        ];
        let total: FourVector = chain.iter().map(|p| p.momentum).sum();
        let hadrons = frag.fragment_chain(&chain, &mut rng).unwrap();
        assert_momentum(&total, &hadrons);
        assert_eq!(charge(&tables, &hadrons), 0);
    }

    #[test]
    fn soft_gluon_is_merged_away() {
        let mut chain = vec![
            Parton::new(Flavor::UP, FourVector::new(0.0, 0.0, 5.0, 5.0)),
            Parton::new(Flavor::GLUON, FourVector::new(0.0, 0.01, 0.2, 0.20025)),
            Parton::new(Flavor(-2), FourVector::new(0.0, 0.0, -5.0, 5.0)),
        ];
        let total: FourVector = chain.iter().map(|p| p.momentum).sum();
        merge_soft_gluons(&mut chain);
        assert_eq!(chain.len(), 2);
        let after: FourVector = chain.iter().map(|p| p.momentum).sum();
        assert!(after.max_abs_diff(&total) < 1e-12);
    }

    #[test]
    fn closed_loop_is_neutral() {
        let tables = StandardTables::new();
        let config = FragmentationConfig::default();
        let frag = Fragmenter::new(&config, &tables);
        let mut rng = RngStream::new(26);
        let gluons = [
            Parton::new(Flavor::GLUON, FourVector::new(0.0, 0.0, 8.0, 8.0)),
            Parton::new(Flavor::GLUON, FourVector::new(0.0, 6.0, -4.0, 7.211_102_550_927_978)),
            Parton::new(Flavor::GLUON, FourVector::new(0.0, -6.0, -4.0, 7.211_102_550_927_978)),
        ];
        let total: FourVector = gluons.iter().map(|p| p.momentum).sum();
        // A cut very close to one end can leave a piece too light to split.
        let mut successes = 0;
        for _ in 0..20 {
            let Ok(hadrons) = frag.fragment_closed(&gluons, &mut rng) else {
                continue;
            };
            successes += 1;
            assert_momentum(&total, &hadrons);
            assert_eq!(charge(&tables, &hadrons), 0);
            assert_eq!(baryons(&tables, &hadrons), 0);
        }
        assert!(successes >= 15, "successes = {successes}");
        assert_eq!(
            frag.fragment_closed(&[], &mut rng),
            Err(FragmentError::NoGluons)
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn strings_conserve_over_masses(w in 2.0f64..60.0, seed in 0u64..1000) {
                let tables = StandardTables::new();
                let config = FragmentationConfig::default();
                let frag = Fragmenter::new(&config, &tables);
                let mut rng = RngStream::new(seed);
                let (a, b) = back_to_back(Flavor::UP, Flavor(2101), w);
                let hadrons = frag.fragment_string(&a, &b, &mut rng).unwrap();
                let sum: FourVector = hadrons.iter().map(|h| h.momentum).sum();
                prop_assert!(sum.max_abs_diff(&(a.momentum + b.momentum)) < 1e-8 * (1.0 + w));
                prop_assert_eq!(charge(&tables, &hadrons), 1);
                prop_assert_eq!(baryons(&tables, &hadrons), 1);
            }
        }
    }
}
