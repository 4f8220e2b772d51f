//! Tunable parameters of hadronisation and the parton shower.
//!
//! Defaults reproduce the Lund settings used for photoproduction at
//! a few GeV. [`validate()`](FragmentationConfig::validate) checks ranges
//! only; the engine calls it once when a context is built.

// ── FragmentationScheme ────────────────────────────────────────────

/// Which hadronisation model turns parton systems into hadrons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FragmentationScheme {
    /// Lund string fragmentation of colour-connected systems.
    #[default]
    String,
    /// Independent fragmentation of each parton along its own axis.
    Independent,
}

// ── CompensationScheme ─────────────────────────────────────────────

/// How independent fragmentation restores the total three-momentum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompensationScheme {
    /// Boost the hadron system to the rest frame of the target system.
    #[default]
    Boost,
    /// Share the missing momentum in proportion to each hadron's
    /// longitudinal momentum along its jet axis.
    JetAxis,
    /// Share the missing momentum in proportion to hadron energies.
    Additive,
}

// ── FragmentationConfig ────────────────────────────────────────────

/// Lund fragmentation parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentationConfig {
    /// Lund symmetric function `a`. Default: 0.3.
    pub lund_a: f64,
    /// Lund symmetric function `b` in GeV⁻². Default: 0.58.
    pub lund_b: f64,
    /// Added to `a` when a diquark takes part in the break. Default: 0.5.
    pub diquark_a_shift: f64,
    /// Width of the primary transverse momentum in GeV. Default: 0.36.
    pub sigma_pt: f64,
    /// `s/u` quark pair suppression. Default: 0.3.
    pub strange_suppression: f64,
    /// `qq/q` diquark production relative to quarks. Default: 0.1.
    pub diquark_suppression: f64,
    /// Extra suppression of strange diquarks. Default: 0.4.
    pub strange_diquark_suppression: f64,
    /// Spin-1 diquark suppression, on top of spin counting. Default: 0.05.
    pub spin1_diquark: f64,
    /// Vector fraction of mesons made of u and d quarks. Default: 0.5.
    pub vector_fraction_light: f64,
    /// Vector fraction of mesons carrying strangeness. Default: 0.6.
    pub vector_fraction_strange: f64,
    /// Acceptance of a produced η. Default: 1.0.
    pub eta_acceptance: f64,
    /// Acceptance of a produced η′. Default: 0.4.
    pub eta_prime_acceptance: f64,
    /// Remaining mass (GeV) above the end masses at which a string stops
    /// splitting and is closed by two hadrons. Default: 0.8.
    pub stop_mass: f64,
    /// Relative smearing of the stop mass. Default: 0.2.
    pub stop_smearing: f64,
    /// Light-cone momentum (GeV) below which an independent jet stops.
    /// Default: 0.1.
    pub jet_cutoff: f64,
    /// Restarts of one string before giving up. Default: 100.
    pub max_restarts: u32,
    /// Hadronisation model. Default: [`FragmentationScheme::String`].
    pub scheme: FragmentationScheme,
    /// Momentum compensation for independent fragmentation.
    pub compensation: CompensationScheme,
    /// Probability that a nucleon diquark is resolved into a junction in
    /// multiparticle production. Default: 0.05.
    pub junction_probability: f64,
}

impl Default for FragmentationConfig {
    fn default() -> Self {
        Self {
            lund_a: 0.3,
            lund_b: 0.58,
            diquark_a_shift: 0.5,
            sigma_pt: 0.36,
            strange_suppression: 0.3,
            diquark_suppression: 0.1,
            strange_diquark_suppression: 0.4,
            spin1_diquark: 0.05,
            vector_fraction_light: 0.5,
            vector_fraction_strange: 0.6,
            eta_acceptance: 1.0,
            eta_prime_acceptance: 0.4,
            stop_mass: 0.8,
            stop_smearing: 0.2,
            jet_cutoff: 0.1,
            max_restarts: 100,
            scheme: FragmentationScheme::String,
            compensation: CompensationScheme::Boost,
            junction_probability: 0.05,
        }
    }
}

impl FragmentationConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("lund_b", self.lund_b),
            ("sigma_pt", self.sigma_pt),
            ("stop_mass", self.stop_mass),
            ("jet_cutoff", self.jet_cutoff),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(format!("{name} must be finite and positive, got {v}"));
            }
        }
        let non_negative = [
            ("lund_a", self.lund_a),
            ("diquark_a_shift", self.diquark_a_shift),
            ("strange_suppression", self.strange_suppression),
            ("diquark_suppression", self.diquark_suppression),
            ("strange_diquark_suppression", self.strange_diquark_suppression),
            ("spin1_diquark", self.spin1_diquark),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(format!("{name} must be finite and non-negative, got {v}"));
            }
        }
        let fractions = [
            ("vector_fraction_light", self.vector_fraction_light),
            ("vector_fraction_strange", self.vector_fraction_strange),
            ("eta_acceptance", self.eta_acceptance),
            ("eta_prime_acceptance", self.eta_prime_acceptance),
            ("stop_smearing", self.stop_smearing),
            ("junction_probability", self.junction_probability),
        ];
        for (name, v) in fractions {
            if !(0.0..=1.0).contains(&v) {
                return Err(format!("{name} must lie in [0, 1], got {v}"));
            }
        }
        if self.stop_smearing >= 1.0 {
            return Err("stop_smearing must be below 1".into());
        }
        if self.eta_acceptance <= 0.0 {
            return Err("eta_acceptance must be positive".into());
        }
        if self.max_restarts == 0 {
            return Err("max_restarts must be at least 1".into());
        }
        Ok(())
    }
}

// ── ShowerConfig ───────────────────────────────────────────────────

/// Final-state parton shower parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ShowerConfig {
    /// Shower string systems before fragmentation. Default: false.
    pub enabled: bool,
    /// Minimum system mass (GeV) for the shower to run. Default: 10.0.
    pub min_mass: f64,
    /// Virtuality cutoff `Q0` in GeV. Default: 1.0.
    pub cutoff: f64,
    /// `Λ_QCD` in GeV for the one-loop running coupling. Default: 0.29.
    pub lambda_qcd: f64,
    /// Active flavors in `g → q q̄`. Default: 3.
    pub flavors: u8,
    /// Veto emissions at wider angles than the previous one. Default: true.
    pub angular_ordering: bool,
    /// Upper bound on branchings per system. Default: 200.
    pub max_branchings: u32,
}

impl Default for ShowerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_mass: 10.0,
            cutoff: 1.0,
            lambda_qcd: 0.29,
            flavors: 3,
            angular_ordering: true,
            max_branchings: 200,
        }
    }
}

impl ShowerConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), String> {
        if !self.lambda_qcd.is_finite() || self.lambda_qcd <= 0.0 {
            return Err(format!("lambda_qcd must be positive, got {}", self.lambda_qcd));
        }
        // The coupling is evaluated down to Q0²/2.
        if !self.cutoff.is_finite() || self.cutoff * self.cutoff <= 2.0 * self.lambda_qcd.powi(2) {
            return Err(format!(
                "cutoff {} must exceed sqrt(2) * lambda_qcd {}",
                self.cutoff, self.lambda_qcd
            ));
        }
        if !self.min_mass.is_finite() || self.min_mass < 2.0 * self.cutoff {
            return Err(format!(
                "min_mass {} must be at least twice the cutoff",
                self.min_mass
            ));
        }
        if !(1..=3).contains(&self.flavors) {
            return Err(format!("flavors must be 1, 2 or 3, got {}", self.flavors));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(FragmentationConfig::default().validate().is_ok());
        assert!(ShowerConfig::default().validate().is_ok());
    }

    #[test]
    fn negative_width_rejected() {
        let cfg = FragmentationConfig {
            sigma_pt: -0.1,
            ..FragmentationConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("sigma_pt"), "{err}");
    }

    #[test]
    fn fraction_out_of_range_rejected() {
        let cfg = FragmentationConfig {
            eta_prime_acceptance: 1.5,
            ..FragmentationConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn shower_cutoff_below_lambda_rejected() {
        let cfg = ShowerConfig {
            cutoff: 0.2,
            ..ShowerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
