//! The uniform random stream and the sampling primitives built on it.
//!
//! Every stochastic decision in the generator draws from a single
//! [`UniformSource`]. Components receive it by `&mut dyn UniformSource` so
//! that tests can substitute a scripted stream, while production code uses
//! the seeded [`RngStream`]. Given the same seed, an event is reproduced
//! bit-for-bit.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A stateful generator of uniform deviates in `[0, 1)`.
///
/// Only [`uniform`](UniformSource::uniform) is required; the provided
/// methods derive the non-uniform distributions used across the engine.
pub trait UniformSource {
    /// Next uniform deviate in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform deviate in `(0, 1)`, safe to pass to `ln`.
    fn uniform_open(&mut self) -> f64 {
        self.uniform().max(f64::MIN_POSITIVE)
    }

    /// Bernoulli trial with success probability `p`.
    fn accept(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    /// Standard normal deviate (Box-Muller transform).
    fn gaussian(&mut self) -> f64 {
        let u1 = self.uniform_open();
        let u2 = self.uniform();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Uniform azimuth in `[0, 2π)`.
    fn azimuth(&mut self) -> f64 {
        2.0 * PI * self.uniform()
    }

    /// Random sign, `+1.0` or `-1.0` with equal probability.
    fn sign(&mut self) -> f64 {
        if self.uniform() < 0.5 {
            -1.0
        } else {
            1.0
        }
    }

    /// Uniform cosine in `[-1, 1)`.
    fn cosine(&mut self) -> f64 {
        2.0 * self.uniform() - 1.0
    }

    /// Exponential deviate with density `slope * exp(-slope * x)`, `x >= 0`.
    fn exponential(&mut self, slope: f64) -> f64 {
        -self.uniform_open().ln() / slope
    }

    /// Deviate in `[lo, hi]` with density proportional to `exp(slope * x)`.
    ///
    /// Used for Mandelstam-t sampling, where `slope > 0` favours the upper
    /// (least negative) bound.
    fn truncated_exponential(&mut self, slope: f64, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return hi;
        }
        if slope.abs() < 1e-12 {
            return lo + (hi - lo) * self.uniform();
        }
        let span = 1.0 - (-slope * (hi - lo)).exp();
        let x = hi + (1.0 - self.uniform() * span).ln() / slope;
        x.clamp(lo, hi)
    }

    /// Breit-Wigner (Cauchy) mass in `[lo, hi]` around `mass` with `width`.
    fn breit_wigner(&mut self, mass: f64, width: f64, lo: f64, hi: f64) -> f64 {
        if width <= 0.0 || hi <= lo {
            return mass.clamp(lo, hi.max(lo));
        }
        let half = 0.5 * width;
        let a_lo = ((lo - mass) / half).atan();
        let a_hi = ((hi - mass) / half).atan();
        let m = mass + half * (a_lo + self.uniform() * (a_hi - a_lo)).tan();
        m.clamp(lo, hi)
    }

    /// Index chosen with probability proportional to `weights`.
    ///
    /// Returns `None` if no weight is positive.
    fn pick_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }
        let target = self.uniform() * total;
        let mut cumulative = 0.0;
        let mut last = None;
        for (i, &w) in weights.iter().enumerate() {
            if w <= 0.0 {
                continue;
            }
            cumulative += w;
            last = Some(i);
            if target < cumulative {
                return Some(i);
            }
        }
        last
    }
}

/// Seeded production stream backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct RngStream {
    rng: ChaCha8Rng,
    seed: u64,
    draws: u64,
}

impl RngStream {
    /// Create a stream from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            draws: 0,
        }
    }

    /// Restart the stream from a new seed.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// The seed this stream was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of uniforms drawn since creation.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl UniformSource for RngStream {
    fn uniform(&mut self) -> f64 {
        self.draws += 1;
        self.rng.random::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RngStream::new(12345);
        let mut b = RngStream::new(12345);
        for _ in 0..100 {
            assert_eq!(a.uniform(), b.uniform());
        }
        assert_eq!(a.draws(), 100);
    }

    #[test]
    fn uniform_in_unit_interval() {
        let mut rng = RngStream::new(42);
        for _ in 0..10_000 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u), "value {u} out of range");
        }
    }

    #[test]
    fn reseed_restarts_sequence() {
        let mut rng = RngStream::new(7);
        let first = rng.uniform();
        for _ in 0..10 {
            rng.uniform();
        }
        rng.reseed(7);
        assert_eq!(rng.uniform(), first);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn truncated_exponential_stays_in_bounds() {
        let mut rng = RngStream::new(3);
        for _ in 0..5_000 {
            let t = rng.truncated_exponential(6.0, -2.5, -0.1);
            assert!((-2.5..=-0.1).contains(&t));
        }
    }

    #[test]
    fn truncated_exponential_favours_upper_bound() {
        let mut rng = RngStream::new(11);
        let n = 20_000;
        let near_top = (0..n)
            .filter(|_| rng.truncated_exponential(10.0, -1.0, 0.0) > -0.1)
            .count();
        // P(t > -0.1) = (1 - e^-1) / (1 - e^-10) ≈ 0.632.
        let frac = near_top as f64 / n as f64;
        assert!((frac - 0.632).abs() < 0.02, "fraction {frac}");
    }

    #[test]
    fn breit_wigner_respects_window() {
        let mut rng = RngStream::new(5);
        for _ in 0..5_000 {
            let m = rng.breit_wigner(0.775, 0.149, 0.28, 0.6);
            assert!((0.28..=0.6).contains(&m));
        }
    }

    #[test]
    fn gaussian_has_unit_variance() {
        let mut rng = RngStream::new(99);
        let n = 50_000;
        let samples: Vec<f64> = (0..n).map(|_| rng.gaussian()).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.02, "mean {mean}");
        assert!((var - 1.0).abs() < 0.03, "variance {var}");
    }

    #[test]
    fn pick_weighted_skips_zero_weights() {
        let mut rng = RngStream::new(1);
        for _ in 0..1_000 {
            let i = rng.pick_weighted(&[0.0, 2.0, 0.0, 1.0]).unwrap();
            assert!(i == 1 || i == 3);
        }
        assert_eq!(rng.pick_weighted(&[0.0, 0.0]), None);
    }
}
