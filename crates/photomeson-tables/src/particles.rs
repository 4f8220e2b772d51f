//! Particle records: masses, widths, quantum numbers and PDG identifiers.

use photomeson_core::ParticleCode;

/// Static data of one particle species.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleRecord {
    /// Internal code.
    pub code: ParticleCode,
    /// Printable name.
    pub name: String,
    /// Nominal mass in GeV.
    pub mass: f64,
    /// Total width in GeV.
    pub width: f64,
    /// Electric charge in units of e.
    pub charge: i32,
    /// Baryon number.
    pub baryon_number: i32,
    /// PDG Monte-Carlo identifier.
    pub pdg: i32,
}

impl ParticleRecord {
    /// The antiparticle record, or `None` for self-conjugate particles.
    pub fn antiparticle(&self) -> Option<Self> {
        let code = self.code.conjugate();
        if code == self.code {
            return None;
        }
        Some(Self {
            code,
            name: format!("anti-{}", self.name),
            mass: self.mass,
            width: self.width,
            charge: -self.charge,
            baryon_number: -self.baryon_number,
            pdg: -self.pdg,
        })
    }
}

/// Nucleon mass used wherever the species-averaged value is enough.
pub const NUCLEON_MASS: f64 = 0.93827;

/// `(code, name, mass, width, charge, baryon, pdg)` for every listed species.
///
/// Antibaryons and the conjugates of charged mesons that are not listed are
/// derived with [`ParticleRecord::antiparticle`].
pub(crate) const BASE_PARTICLES: &[(i32, &str, f64, f64, i32, i32, i32)] = &[
    (1, "gamma", 0.0, 0.0, 0, 0, 22),
    (2, "e+", 0.000_511, 0.0, 1, 0, -11),
    (3, "e-", 0.000_511, 0.0, -1, 0, 11),
    (4, "mu+", 0.105_66, 0.0, 1, 0, -13),
    (5, "mu-", 0.105_66, 0.0, -1, 0, 13),
    (6, "pi0", 0.134_98, 0.0, 0, 0, 111),
    (7, "pi+", 0.139_57, 0.0, 1, 0, 211),
    (8, "pi-", 0.139_57, 0.0, -1, 0, -211),
    (9, "K+", 0.493_68, 0.0, 1, 0, 321),
    (10, "K-", 0.493_68, 0.0, -1, 0, -321),
    (11, "K0L", 0.497_61, 0.0, 0, 0, 130),
    (12, "K0S", 0.497_61, 0.0, 0, 0, 310),
    (13, "p", 0.938_27, 0.0, 1, 1, 2212),
    (14, "n", 0.939_57, 0.0, 0, 1, 2112),
    (15, "nu_e", 0.0, 0.0, 0, 0, 12),
    (16, "nu_e_bar", 0.0, 0.0, 0, 0, -12),
    (17, "nu_mu", 0.0, 0.0, 0, 0, 14),
    (18, "nu_mu_bar", 0.0, 0.0, 0, 0, -14),
    (21, "K0", 0.497_61, 0.0, 0, 0, 311),
    (22, "K0_bar", 0.497_61, 0.0, 0, 0, -311),
    (23, "eta", 0.547_85, 1.31e-6, 0, 0, 221),
    (24, "eta'", 0.957_78, 1.96e-4, 0, 0, 331),
    (25, "rho+", 0.775_5, 0.149, 1, 0, 213),
    (26, "rho-", 0.775_5, 0.149, -1, 0, -213),
    (27, "rho0", 0.775_5, 0.149, 0, 0, 113),
    (28, "K*+", 0.891_66, 0.050_8, 1, 0, 323),
    (29, "K*-", 0.891_66, 0.050_8, -1, 0, -323),
    (30, "K*0", 0.895_55, 0.047_3, 0, 0, 313),
    (31, "K*0_bar", 0.895_55, 0.047_3, 0, 0, -313),
    (32, "omega", 0.782_65, 0.008_49, 0, 0, 223),
    (33, "phi", 1.019_46, 0.004_26, 0, 0, 333),
    (34, "Sigma+", 1.189_37, 0.0, 1, 1, 3222),
    (35, "Sigma0", 1.192_64, 0.0, 0, 1, 3212),
    (36, "Sigma-", 1.197_45, 0.0, -1, 1, 3112),
    (37, "Xi0", 1.314_86, 0.0, 0, 1, 3322),
    (38, "Xi-", 1.321_71, 0.0, -1, 1, 3312),
    (39, "Lambda", 1.115_68, 0.0, 0, 1, 3122),
    (40, "Delta++", 1.232, 0.117, 2, 1, 2224),
    (41, "Delta+", 1.232, 0.117, 1, 1, 2214),
    (42, "Delta0", 1.232, 0.117, 0, 1, 2114),
    (43, "Delta-", 1.232, 0.117, -1, 1, 1114),
    (44, "Sigma*+", 1.382_8, 0.036, 1, 1, 3224),
    (45, "Sigma*0", 1.383_7, 0.036, 0, 1, 3214),
    (46, "Sigma*-", 1.387_2, 0.039_4, -1, 1, 3114),
    (47, "Xi*0", 1.531_8, 0.009_1, 0, 1, 3324),
    (48, "Xi*-", 1.535_0, 0.009_9, -1, 1, 3314),
    (49, "Omega-", 1.672_45, 0.0, -1, 1, 3334),
];

/// PDG identifiers of the nine photo-excited resonances, `(charge +1, charge 0)`.
pub(crate) const RESONANCE_PDG: [(i32, i32); 9] = [
    (2214, 2114),
    (12212, 12112),
    (2124, 1214),
    (22212, 22112),
    (32212, 32112),
    (2216, 2116),
    (12216, 12116),
    (12214, 12114),
    (2218, 2118),
];

/// Every base record, expanded with the missing antiparticles.
pub(crate) fn all_records() -> Vec<ParticleRecord> {
    let mut records: Vec<ParticleRecord> = BASE_PARTICLES
        .iter()
        .map(
            |&(code, name, mass, width, charge, baryon_number, pdg)| ParticleRecord {
                code: ParticleCode(code),
                name: name.to_string(),
                mass,
                width,
                charge,
                baryon_number,
                pdg,
            },
        )
        .collect();
    let antibaryons: Vec<ParticleRecord> = records
        .iter()
        .filter(|r| r.baryon_number != 0)
        .filter_map(ParticleRecord::antiparticle)
        .collect();
    records.extend(antibaryons);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antiproton_is_derived() {
        let records = all_records();
        let pbar = records
            .iter()
            .find(|r| r.code == ParticleCode(-13))
            .unwrap();
        assert_eq!(pbar.charge, -1);
        assert_eq!(pbar.baryon_number, -1);
        assert_eq!(pbar.pdg, -2212);
    }

    #[test]
    fn meson_conjugates_are_listed_explicitly() {
        let records = all_records();
        for r in records.iter().filter(|r| r.baryon_number == 0) {
            let conj = r.code.conjugate();
            let partner = records.iter().find(|o| o.code == conj).unwrap();
            assert_eq!(partner.charge, -r.charge, "{}", r.name);
        }
    }

    #[test]
    fn codes_are_unique() {
        let records = all_records();
        let mut codes: Vec<i32> = records.iter().map(|r| r.code.raw()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), records.len());
    }
}
