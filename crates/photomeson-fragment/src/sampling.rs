//! Longitudinal and transverse momentum sampling for string breaks.
//!
//! The Lund symmetric fragmentation function
//!
//! ```text
//! f(z) ∝ (1/z) (1 − z)^a exp(−b m_T² / z)
//! ```
//!
//! is log-concave in `ln z`, so tangents taken at one point below and one
//! above the peak bound it from above. The sampler splits `(0, 1)` into
//! three regions: a rising power law below `z1`, a flat band up to `z2`,
//! and a falling power law above it.

use std::f64::consts::FRAC_1_SQRT_2;

use photomeson_core::UniformSource;
use tracing::trace;

/// Attempts before the sampler settles for the peak position.
const MAX_Z_ATTEMPTS: u32 = 1000;

/// Position of the maximum of the Lund function.
pub fn lund_peak(a: f64, b_mt2: f64) -> f64 {
    let bm = b_mt2.max(1e-6);
    if (1.0 - a).abs() < 0.01 {
        return bm / (1.0 + bm);
    }
    let c = 1.0 + bm;
    (c - (c * c - 4.0 * (1.0 - a) * bm).max(0.0).sqrt()) / (2.0 * (1.0 - a))
}

fn log_lund(a: f64, bm: f64, z: f64) -> f64 {
    let tail = if a == 0.0 { 0.0 } else { a * (1.0 - z).ln() };
    -z.ln() + tail - bm / z
}

/// `d ln f / d ln z`.
fn log_slope(a: f64, bm: f64, z: f64) -> f64 {
    -1.0 - a * z / (1.0 - z) + bm / z
}

/// `∫ (z / z_ref)^k dz` over `[lo, hi]`.
fn power_area(z_ref: f64, k: f64, lo: f64, hi: f64) -> f64 {
    let e = k + 1.0;
    if e.abs() < 1e-9 {
        z_ref * (hi / lo).ln()
    } else {
        z_ref / e * ((hi / z_ref).powf(e) - (lo / z_ref).powf(e))
    }
}

/// Invert the power-law CDF on `[lo, hi]`.
fn power_sample(k: f64, lo: f64, hi: f64, u: f64) -> f64 {
    let e = k + 1.0;
    if e.abs() < 1e-9 {
        lo * (hi / lo).powf(u)
    } else {
        let (a, b) = (lo.powf(e), hi.powf(e));
        (a + u * (b - a)).powf(1.0 / e)
    }
}

/// Light-cone fraction `z` from the Lund symmetric function.
///
/// `mt2` is the squared transverse mass of the hadron being produced.
/// Exhausting the attempt cap returns the peak position.
pub fn sample_z(a: f64, b: f64, mt2: f64, rng: &mut dyn UniformSource) -> f64 {
    let bm = (b * mt2).max(1e-6);
    let z_max = lund_peak(a, bm).clamp(1e-6, 1.0 - 1e-6);
    let norm = log_lund(a, bm, z_max);
    let rel = |z: f64| (log_lund(a, bm, z) - norm).exp();

    let z1 = 0.5 * z_max;
    let z2 = z_max + 0.5 * (1.0 - z_max);
    let (f1, k1) = (rel(z1), log_slope(a, bm, z1));
    let (f2, k2) = (rel(z2), log_slope(a, bm, z2));
    let areas = [
        f1 * power_area(z1, k1, 0.0, z1),
        z2 - z1,
        f2 * power_area(z2, k2, z2, 1.0),
    ];

    for _ in 0..MAX_Z_ATTEMPTS {
        let (z, bound) = match rng.pick_weighted(&areas) {
            Some(0) => {
                let z = power_sample(k1, 0.0, z1, rng.uniform());
                (z, f1 * (z / z1).powf(k1))
            }
            Some(2) => {
                let z = power_sample(k2, z2, 1.0, rng.uniform());
                (z, f2 * (z / z2).powf(k2))
            }
            _ => (z1 + (z2 - z1) * rng.uniform(), 1.0),
        };
        if z <= 0.0 || z >= 1.0 || !z.is_finite() {
            continue;
        }
        if rng.uniform() * bound <= rel(z) {
            return z;
        }
    }
    trace!(a, b_mt2 = bm, "z sampling exhausted, using the peak");
    z_max
}

/// Transverse momentum `(px, py)` of a created quark pair.
///
/// Each component is Gaussian with width `sigma / √2`.
pub fn sample_pt(sigma: f64, rng: &mut dyn UniformSource) -> (f64, f64) {
    let width = sigma * FRAC_1_SQRT_2;
    (width * rng.gaussian(), width * rng.gaussian())
}

#[cfg(test)]
mod tests {
    use super::*;
    use photomeson_core::RngStream;

    #[test]
    fn peak_solves_the_stationarity_condition() {
        for (a, bm) in [(0.3, 0.05), (0.3, 1.0), (0.8, 3.0), (1.0, 0.5), (0.0, 0.2)] {
            let z = lund_peak(a, bm);
            assert!(z > 0.0 && z < 1.0);
            assert!(log_slope(a, bm, z).abs() < 1e-6, "a {a} bm {bm} z {z}");
        }
    }

    #[test]
    fn samples_stay_in_unit_interval() {
        let mut rng = RngStream::new(11);
        for mt2 in [0.02, 0.3, 1.0, 4.0] {
            for _ in 0..2000 {
                let z = sample_z(0.3, 0.58, mt2, &mut rng);
                assert!(z > 0.0 && z < 1.0, "z = {z}");
            }
        }
    }

    #[test]
    fn heavier_hadrons_take_larger_fractions() {
        let mut rng = RngStream::new(12);
        let n = 5000;
        let mean = |mt2: f64, rng: &mut RngStream| {
            (0..n).map(|_| sample_z(0.3, 0.58, mt2, rng)).sum::<f64>() / n as f64
        };
        let pion = mean(0.15, &mut rng);
        let nucleon = mean(1.0, &mut rng);
        assert!(nucleon > pion, "pion {pion} nucleon {nucleon}");
    }

    #[test]
    fn sampled_mean_matches_numerical_integral() {
        let (a, b, mt2) = (0.3, 0.58, 0.5);
        let bm = b * mt2;
        let steps = 200_000;
        let (mut w, mut wz) = (0.0, 0.0);
        for i in 0..steps {
            let z = (i as f64 + 0.5) / steps as f64;
            let f = log_lund(a, bm, z).exp();
            w += f;
            wz += f * z;
        }
        let exact = wz / w;
        let mut rng = RngStream::new(13);
        let n = 40_000;
        let mean = (0..n).map(|_| sample_z(a, b, mt2, &mut rng)).sum::<f64>() / n as f64;
        assert!((mean - exact).abs() < 0.01, "mean {mean} exact {exact}");
    }

    #[test]
    fn pt_width() {
        let mut rng = RngStream::new(14);
        let n = 20_000;
        let mut sum2 = 0.0;
        for _ in 0..n {
            let (x, y) = sample_pt(0.36, &mut rng);
            sum2 += x * x + y * y;
        }
        let rms = (sum2 / n as f64).sqrt();
        assert!((rms - 0.36).abs() < 0.01, "rms {rms}");
    }
}
