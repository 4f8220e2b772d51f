//! Minkowski four-vectors with metric `(+,-,-,-)`.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A four-momentum `(px, py, pz, E)` in GeV.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FourVector {
    /// x component of the three-momentum.
    pub px: f64,
    /// y component of the three-momentum.
    pub py: f64,
    /// z component of the three-momentum.
    pub pz: f64,
    /// Energy.
    pub e: f64,
}

impl FourVector {
    /// The zero vector.
    pub const ZERO: Self = Self {
        px: 0.0,
        py: 0.0,
        pz: 0.0,
        e: 0.0,
    };

    /// Build from components.
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// On-shell vector with the given three-momentum and mass.
    pub fn on_shell(px: f64, py: f64, pz: f64, mass: f64) -> Self {
        let e = (px * px + py * py + pz * pz + mass * mass).sqrt();
        Self { px, py, pz, e }
    }

    /// A particle of the given mass at rest.
    pub fn at_rest(mass: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, mass)
    }

    /// Squared three-momentum.
    pub fn p2(&self) -> f64 {
        self.px * self.px + self.py * self.py + self.pz * self.pz
    }

    /// Magnitude of the three-momentum.
    pub fn p_abs(&self) -> f64 {
        self.p2().sqrt()
    }

    /// Squared transverse momentum with respect to the z axis.
    pub fn pt2(&self) -> f64 {
        self.px * self.px + self.py * self.py
    }

    /// Invariant mass squared (may be slightly negative for lightlike input).
    pub fn mass2(&self) -> f64 {
        self.e * self.e - self.p2()
    }

    /// Invariant mass, with negative mass-squared clamped to zero.
    pub fn mass(&self) -> f64 {
        self.mass2().max(0.0).sqrt()
    }

    /// Minkowski scalar product.
    pub fn dot(&self, other: &Self) -> f64 {
        self.e * other.e - self.px * other.px - self.py * other.py - self.pz * other.pz
    }

    /// Light-cone component `E + pz`.
    pub fn plus(&self) -> f64 {
        self.e + self.pz
    }

    /// Light-cone component `E - pz`.
    pub fn minus(&self) -> f64 {
        self.e - self.pz
    }

    /// Polar angle of the three-momentum.
    pub fn theta(&self) -> f64 {
        self.pt2().sqrt().atan2(self.pz)
    }

    /// Azimuthal angle of the three-momentum.
    pub fn phi(&self) -> f64 {
        if self.px == 0.0 && self.py == 0.0 {
            0.0
        } else {
            self.py.atan2(self.px)
        }
    }

    /// Three-momentum as an array.
    pub fn three(&self) -> [f64; 3] {
        [self.px, self.py, self.pz]
    }

    /// Whether every component is finite.
    pub fn is_finite(&self) -> bool {
        self.px.is_finite() && self.py.is_finite() && self.pz.is_finite() && self.e.is_finite()
    }

    /// Largest absolute component difference to `other`.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        (self.px - other.px)
            .abs()
            .max((self.py - other.py).abs())
            .max((self.pz - other.pz).abs())
            .max((self.e - other.e).abs())
    }
}

impl Add for FourVector {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.px + rhs.px,
            self.py + rhs.py,
            self.pz + rhs.pz,
            self.e + rhs.e,
        )
    }
}

impl Sub for FourVector {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.px - rhs.px,
            self.py - rhs.py,
            self.pz - rhs.pz,
            self.e - rhs.e,
        )
    }
}

impl Neg for FourVector {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.px, -self.py, -self.pz, -self.e)
    }
}

impl Mul<f64> for FourVector {
    type Output = Self;
    fn mul(self, k: f64) -> Self {
        Self::new(self.px * k, self.py * k, self.pz * k, self.e * k)
    }
}

impl AddAssign for FourVector {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for FourVector {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Sum for FourVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| acc + p)
    }
}

impl<'a> Sum<&'a FourVector> for FourVector {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| acc + *p)
    }
}
