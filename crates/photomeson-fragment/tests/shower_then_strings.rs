//! A showered dipole fragmented chain by chain conserves the dipole's
//! four-momentum, charge and baryon number.

use photomeson_core::{Flavor, FourVector, ParticleTable, RngStream};
use photomeson_fragment::{
    total_momentum, DipoleShower, FragmentationConfig, Fragmenter, Parton, ShowerConfig,
};
use photomeson_tables::StandardTables;

#[test]
fn showered_dipole_hadronises_consistently() {
    let tables = StandardTables::new();
    let frag_config = FragmentationConfig::default();
    let shower_config = ShowerConfig {
        enabled: true,
        ..ShowerConfig::default()
    };
    let fragmenter = Fragmenter::new(&frag_config, &tables);
    let shower = DipoleShower::new(&shower_config);

    // u quark against a ud diquark, boosted along +z.
    let quark = Parton::new(Flavor::UP, FourVector::new(0.0, 0.0, 30.0, 30.0));
    let diquark = Parton::new(Flavor(2101), FourVector::new(0.0, 0.0, -25.0, 25.05));
    let total = quark.momentum + diquark.momentum;
    assert!(shower.applies_to(total.mass()));

    let mut produced = 0;
    for seed in 0..10 {
        let mut rng = RngStream::new(1000 + seed);
        let Ok(chains) = shower.shower_dipole(&quark, &diquark, &mut rng) else {
            panic!("shower failed for seed {seed}");
        };
        let mut hadrons = Vec::new();
        let mut failed = false;
        for chain in &chains {
            match fragmenter.fragment_chain(chain, &mut rng) {
                Ok(h) => hadrons.extend(h),
                Err(_) => failed = true,
            }
        }
        if failed {
            continue;
        }
        produced += 1;
        let sum = total_momentum(&hadrons);
        assert!(sum.max_abs_diff(&total) < 1e-7 * total.e, "seed {seed}");
        let charge: i32 = hadrons.iter().map(|h| tables.charge(h.code).unwrap()).sum();
        assert_eq!(charge, 1);
        let baryons: i32 = hadrons
            .iter()
            .map(|h| tables.baryon_number(h.code).unwrap())
            .sum();
        assert_eq!(baryons, 1);
    }
    assert!(produced >= 5, "produced = {produced}");
}
