//! Flavor generation at string breaks and hadron composition.
//!
//! A break next to an end of flavor `f` creates a partner `x` in the
//! complementary colour representation. The hadron is `f + x`; the
//! remaining string is terminated by `x̄`, which has the same
//! representation as `f`.
//!
//! ```text
//!   end f  ─┐             ┌─ new end x̄ ── … rest of string
//!           └─ hadron(f x)┘
//! ```

use photomeson_core::{Flavor, ParticleCode, UniformSource};

use crate::config::FragmentationConfig;
use crate::error::FragmentError;

/// Relative weight of the decuplet for a quark joined to a spin-1 diquark.
const DECUPLET_FROM_SPIN1: f64 = 2.0 / 3.0;

/// Outcome of one string break.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Break {
    /// The hadron made from the old end and the created partner.
    pub hadron: ParticleCode,
    /// The flavor now terminating the string.
    pub new_end: Flavor,
}

/// Draws quark and diquark flavors and composes hadrons from them.
#[derive(Clone, Copy, Debug)]
pub struct FlavorGenerator<'a> {
    config: &'a FragmentationConfig,
}

impl<'a> FlavorGenerator<'a> {
    /// Generator using the flavor parameters of `config`.
    pub fn new(config: &'a FragmentationConfig) -> Self {
        Self { config }
    }

    /// A light quark (positive code) with `u : d : s = 1 : 1 : s/u`.
    pub fn quark(&self, rng: &mut dyn UniformSource) -> Flavor {
        let weights = [1.0, 1.0, self.config.strange_suppression];
        match rng.pick_weighted(&weights) {
            Some(i) => Flavor(i as i32 + 1),
            None => Flavor::DOWN,
        }
    }

    /// A diquark (positive code), weighted by quark content and spin.
    pub fn diquark(&self, rng: &mut dyn UniformSource) -> Flavor {
        let strange = self.config.strange_suppression * self.config.strange_diquark_suppression;
        let quark_weight = |q: i32| if q == 3 { strange } else { 1.0 };
        let spin1 = 3.0 * self.config.spin1_diquark;
        let mut candidates = [(Flavor::DOWN, 0.0); 9];
        let mut n = 0;
        for hi in 1..=3 {
            for lo in 1..=hi {
                let pair = quark_weight(hi) * quark_weight(lo) * if hi == lo { 1.0 } else { 2.0 };
                for spin in 0..=1u8 {
                    if let Some(dq) = Flavor::diquark(Flavor(hi), Flavor(lo), spin) {
                        let w = if spin == 0 { 1.0 } else { spin1 };
                        candidates[n] = (dq, pair * w);
                        n += 1;
                    }
                }
            }
        }
        let weights: Vec<f64> = candidates[..n].iter().map(|c| c.1).collect();
        rng.pick_weighted(&weights)
            .map(|i| candidates[i].0)
            .unwrap_or(Flavor(2101))
    }

    /// Partner created next to `end`, in the complementary representation.
    ///
    /// A quark-type end may pull a diquark instead of an antiquark when
    /// `allow_diquark` is set; a diquark end always pulls a quark.
    pub fn partner(
        &self,
        end: Flavor,
        allow_diquark: bool,
        rng: &mut dyn UniformSource,
    ) -> Result<Flavor, FragmentError> {
        let sign = end.raw().signum();
        if end.is_quark() {
            let qq = self.config.diquark_suppression;
            if allow_diquark && rng.accept(qq / (1.0 + qq)) {
                Ok(Flavor(sign * self.diquark(rng).raw()))
            } else {
                Ok(Flavor(-sign * self.quark(rng).raw()))
            }
        } else if end.is_diquark() {
            Ok(Flavor(sign * self.quark(rng).raw()))
        } else {
            Err(FragmentError::FlavorMismatch {
                first: end,
                second: end,
            })
        }
    }

    /// One break: draw a partner for `end` and compose the hadron.
    ///
    /// Draws are repeated while η or η′ acceptance rejects the hadron.
    pub fn split(
        &self,
        end: Flavor,
        allow_diquark: bool,
        rng: &mut dyn UniformSource,
    ) -> Result<Break, FragmentError> {
        loop {
            let x = self.partner(end, allow_diquark, rng)?;
            if let Some(hadron) = self.combine(end, x, rng)? {
                return Ok(Break {
                    hadron,
                    new_end: x.anti(),
                });
            }
        }
    }

    /// Hadron made of a triplet and an antitriplet flavor, in either order.
    ///
    /// Returns `Ok(None)` when an η or η′ is drawn and then rejected by its
    /// acceptance; the caller draws again.
    pub fn combine(
        &self,
        a: Flavor,
        b: Flavor,
        rng: &mut dyn UniformSource,
    ) -> Result<Option<ParticleCode>, FragmentError> {
        let mismatch = FragmentError::FlavorMismatch {
            first: a,
            second: b,
        };
        if a.is_quark() && b.is_quark() {
            if a.raw().signum() == b.raw().signum() {
                return Err(mismatch);
            }
            let (q, qbar) = if a.raw() > 0 { (a, b) } else { (b, a) };
            return Ok(self.meson(q.raw(), -qbar.raw(), rng));
        }
        let (quark, diquark) = if a.is_quark() && b.is_diquark() {
            (a, b)
        } else if a.is_diquark() && b.is_quark() {
            (b, a)
        } else {
            return Err(mismatch);
        };
        if quark.raw().signum() != diquark.raw().signum() {
            return Err(mismatch);
        }
        let code = self.baryon(quark, diquark, rng);
        Ok(Some(if quark.raw() > 0 {
            code
        } else {
            ParticleCode(-code.raw())
        }))
    }

    fn meson(&self, q: i32, qbar: i32, rng: &mut dyn UniformSource) -> Option<ParticleCode> {
        let strange = q == 3 || qbar == 3;
        let vector_fraction = if strange {
            self.config.vector_fraction_strange
        } else {
            self.config.vector_fraction_light
        };
        let vector = rng.accept(vector_fraction);
        let pick = |ps: ParticleCode, v: ParticleCode| if vector { v } else { ps };
        let code = match (q, qbar) {
            (2, 1) => pick(ParticleCode::PI_PLUS, ParticleCode::RHO_PLUS),
            (1, 2) => pick(ParticleCode::PI_MINUS, ParticleCode::RHO_MINUS),
            (2, 3) => pick(ParticleCode::K_PLUS, ParticleCode::KSTAR_PLUS),
            (3, 2) => pick(ParticleCode::K_MINUS, ParticleCode::KSTAR_MINUS),
            (1, 3) => pick(ParticleCode::K0, ParticleCode::KSTAR0),
            (3, 1) => pick(ParticleCode::K0_BAR, ParticleCode::KSTAR0_BAR),
            (3, 3) if vector => ParticleCode::PHI,
            (3, 3) => {
                if rng.uniform() < 0.5 {
                    ParticleCode::ETA
                } else {
                    ParticleCode::ETA_PRIME
                }
            }
            _ if vector => {
                if rng.uniform() < 0.5 {
                    ParticleCode::RHO0
                } else {
                    ParticleCode::OMEGA
                }
            }
            _ => {
                let u = rng.uniform();
                if u < 0.5 {
                    ParticleCode::PI0
                } else if u < 0.75 {
                    ParticleCode::ETA
                } else {
                    ParticleCode::ETA_PRIME
                }
            }
        };
        let acceptance = match code {
            ParticleCode::ETA => self.config.eta_acceptance,
            ParticleCode::ETA_PRIME => self.config.eta_prime_acceptance,
            _ => 1.0,
        };
        if acceptance < 1.0 && !rng.accept(acceptance) {
            return None;
        }
        Some(code)
    }

    /// Baryon (positive code) from a quark and a diquark of the same sign.
    fn baryon(&self, quark: Flavor, diquark: Flavor, rng: &mut dyn UniformSource) -> ParticleCode {
        let (d1, d2) = diquark.constituents();
        let mut counts = [0u8; 3];
        for f in [quark, d1, d2] {
            counts[(f.raw().unsigned_abs() as usize).clamp(1, 3) - 1] += 1;
        }
        let [nd, nu, ns] = counts;
        let all_same = counts.contains(&3);
        let decuplet =
            all_same || (diquark.diquark_spin() == 1 && rng.accept(DECUPLET_FROM_SPIN1));
        let pick = |octet: ParticleCode, dec: ParticleCode| if decuplet { dec } else { octet };
        match (nu, nd, ns) {
            (3, 0, 0) => ParticleCode::DELTA_PP,
            (2, 1, 0) => pick(ParticleCode::PROTON, ParticleCode::DELTA_P),
            (1, 2, 0) => pick(ParticleCode::NEUTRON, ParticleCode::DELTA_0),
            (0, 3, 0) => ParticleCode::DELTA_M,
            (2, 0, 1) => pick(ParticleCode::SIGMA_PLUS, ParticleCode::SIGMASTAR_PLUS),
            (0, 2, 1) => pick(ParticleCode::SIGMA_MINUS, ParticleCode::SIGMASTAR_MINUS),
            (1, 0, 2) => pick(ParticleCode::XI0, ParticleCode::XISTAR0),
            (0, 1, 2) => pick(ParticleCode::XI_MINUS, ParticleCode::XISTAR_MINUS),
            (0, 0, 3) => ParticleCode::OMEGA_MINUS,
            _ => {
                // uds: Λ or Σ0 from the isospin of the ud pair.
                if decuplet {
                    ParticleCode::SIGMASTAR0
                } else {
                    let ud = diquark.raw().abs() / 100 == 21;
                    let lambda = if ud {
                        diquark.diquark_spin() == 0
                    } else {
                        rng.uniform() < 0.5
                    };
                    if lambda {
                        ParticleCode::LAMBDA
                    } else {
                        ParticleCode::SIGMA0
                    }
                }
            }
        }
    }
}

/// Mass of the lightest hadron an end of this flavor can be part of.
///
/// A lower bound used to reject strings too light to split.
pub fn lightest_hadron_mass(end: Flavor) -> f64 {
    let strange = end.strangeness_content();
    if end.is_diquark() {
        match strange {
            0 => 0.93827,
            1 => 1.11568,
            _ => 1.3149,
        }
    } else if strange > 0 {
        0.49368
    } else {
        0.13498
    }
}
