//! Quark, diquark and gluon flavor codes used by the fragmentation engines.
//!
//! Flavors use the PDG parton numbering: `1` d, `2` u, `3` s, `21` gluon and
//! four-digit diquark codes `ab0s` (`a >= b`, spin digit `2s+1`). Negative
//! codes denote the antiparticle. A [`Flavor`] is the "open end" of a string
//! while it is being split hadron by hadron.

use std::fmt;

/// Signed parton flavor code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Flavor(pub i32);

impl Flavor {
    /// Down quark.
    pub const DOWN: Self = Self(1);
    /// Up quark.
    pub const UP: Self = Self(2);
    /// Strange quark.
    pub const STRANGE: Self = Self(3);
    /// Gluon.
    pub const GLUON: Self = Self(21);

    /// Raw signed value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Antiparticle flavor. The gluon is its own antiparticle.
    pub fn anti(self) -> Self {
        if self.is_gluon() {
            self
        } else {
            Self(-self.0)
        }
    }

    /// `d`, `u` or `s` (or their antiquarks).
    pub fn is_quark(self) -> bool {
        (1..=3).contains(&self.0.abs())
    }

    /// Two-quark system.
    pub fn is_diquark(self) -> bool {
        let a = self.0.abs();
        if !(1000..10_000).contains(&a) {
            return false;
        }
        let q1 = a / 1000;
        let q2 = (a / 100) % 10;
        let zero = (a / 10) % 10;
        let spin = a % 10;
        (1..=3).contains(&q1)
            && (1..=q1).contains(&q2)
            && zero == 0
            && (spin == 1 || spin == 3)
            && !(q1 == q2 && spin == 1)
    }

    /// The gluon.
    pub fn is_gluon(self) -> bool {
        self.0 == 21
    }

    /// Colour triplet: a quark or an antidiquark.
    pub fn is_triplet(self) -> bool {
        (self.is_quark() && self.0 > 0) || (self.is_diquark() && self.0 < 0)
    }

    /// Colour antitriplet: an antiquark or a diquark.
    pub fn is_antitriplet(self) -> bool {
        (self.is_quark() && self.0 < 0) || (self.is_diquark() && self.0 > 0)
    }

    /// Build a diquark from two quark flavors and a spin (0 or 1).
    ///
    /// Returns `None` when the quarks have opposite signs, are not light
    /// quarks, or form a spin-0 diquark of identical flavors.
    pub fn diquark(a: Flavor, b: Flavor, spin: u8) -> Option<Self> {
        if !a.is_quark() || !b.is_quark() || a.0.signum() != b.0.signum() || spin > 1 {
            return None;
        }
        let (hi, lo) = if a.0.abs() >= b.0.abs() {
            (a.0.abs(), b.0.abs())
        } else {
            (b.0.abs(), a.0.abs())
        };
        if hi == lo && spin == 0 {
            return None;
        }
        let code = 1000 * hi + 100 * lo + 2 * i32::from(spin) + 1;
        Some(Self(a.0.signum() * code))
    }

    /// Constituent quarks of a diquark (with the diquark's sign), or the
    /// flavor itself twice for a quark.
    pub fn constituents(self) -> (Flavor, Flavor) {
        if self.is_diquark() {
            let a = self.0.abs();
            let s = self.0.signum();
            (Flavor(s * (a / 1000)), Flavor(s * ((a / 100) % 10)))
        } else {
            (self, self)
        }
    }

    /// Diquark spin (0 or 1); zero for anything else.
    pub fn diquark_spin(self) -> u8 {
        if self.is_diquark() && self.0.abs() % 10 == 3 {
            1
        } else {
            0
        }
    }

    /// Number of strange (anti)quarks carried.
    pub fn strangeness_content(self) -> u32 {
        if self.is_quark() {
            u32::from(self.0.abs() == 3)
        } else if self.is_diquark() {
            let (a, b) = self.constituents();
            u32::from(a.0.abs() == 3) + u32::from(b.0.abs() == 3)
        } else {
            0
        }
    }

    /// Electric charge in units of e/3.
    pub fn charge_thirds(self) -> i32 {
        let quark = |q: i32| match q.abs() {
            2 => 2 * q.signum(),
            1 | 3 => -q.signum(),
            _ => 0,
        };
        if self.is_quark() {
            quark(self.0)
        } else if self.is_diquark() {
            let (a, b) = self.constituents();
            quark(a.0) + quark(b.0)
        } else {
            0
        }
    }

    /// Baryon number in units of 1/3.
    pub fn baryon_thirds(self) -> i32 {
        if self.is_quark() {
            self.0.signum()
        } else if self.is_diquark() {
            2 * self.0.signum()
        } else {
            0
        }
    }

    /// Constituent mass in GeV, used for string threshold estimates.
    pub fn constituent_mass(self) -> f64 {
        let quark = |q: i32| match q.abs() {
            1 | 2 => 0.325,
            3 => 0.5,
            _ => 0.0,
        };
        if self.is_quark() {
            quark(self.0)
        } else if self.is_diquark() {
            let (a, b) = self.constituents();
            let binding = if self.diquark_spin() == 0 { 0.2 } else { 0.077 };
            quark(a.0) + quark(b.0) - binding
        } else {
            0.0
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Flavor {
    fn from(v: i32) -> Self {
        Self(v)
    }
}
