//! Laminate example - quasi-isotropic carbon/epoxy plate
//!
//! Usage: `laminate-example [stack.json]`. Without an argument a
//! `[0/45/-45/90]s` laminate is built.

use anyhow::{Context, Result};
use composites::prelude::*;
use log::info;

fn default_definition() -> StackDefinition {
    // T300/5208, SI units
    let laminaprop = [181e9, 10.3e9, 0.28, 7.17e9, 7.17e9, 4.0e9];
    StackDefinition::uniform(&[0.0, 45.0, -45.0, 90.0, 90.0, -45.0, 45.0, 0.0], 1.25e-4, &laminaprop)
        .with_density(1600.0)
}

fn print_matrix(name: &str, m: &composites::math::Mat3) {
    println!("{name} =");
    for i in 0..3 {
        println!("  [{:>14.6e} {:>14.6e} {:>14.6e}]", m[(i, 0)], m[(i, 1)], m[(i, 2)]);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let definition = match std::env::args().nth(1) {
        Some(path) => StackDefinition::from_path(&path)
            .with_context(|| format!("failed to read stack definition {path}"))?,
        None => default_definition(),
    };
    info!("Stack {:?}", definition.stack);

    let mut lam = definition.build().context("failed to build laminate")?;

    println!("=== Laminate: {} plies, h = {:.4e} ===\n", lam.plies().len(), lam.thickness());
    print_matrix("A", &lam.a()?);
    print_matrix("B", &lam.b()?);
    print_matrix("D", &lam.d()?);

    let atrans = lam.atrans()?;
    println!("Atrans = [[{:.6e}, {:.6e}], [{:.6e}, {:.6e}]]", atrans[(0, 0)], atrans[(0, 1)], atrans[(1, 0)], atrans[(1, 1)]);

    let k = lam.compute_shear_correction_factors()?;
    println!("\nShear correction: k13 = {:.5}, k23 = {:.5}", k.k13, k.k23);

    let eq = lam.equivalent_properties()?;
    println!(
        "Equivalent: E1 = {:.4e}, E2 = {:.4e}, G12 = {:.4e}, nu12 = {:.4}, nu21 = {:.4}",
        eq.e1, eq.e2, eq.g12, eq.nu12, eq.nu21
    );
    println!("Density: {:.2}", lam.density()?);

    let lp = lam.lamination_parameters()?;
    println!("\nLamination parameters:");
    for (name, xi) in [("xiA", lp.xi_a), ("xiB", lp.xi_b), ("xiD", lp.xi_d), ("xiE", lp.xi_e)] {
        println!("  {name} = [{:.5}, {:.5}, {:.5}, {:.5}, {:.5}]", xi[0], xi[1], xi[2], xi[3], xi[4]);
    }

    if let ConstitutiveMatrix::ThirdOrder { in_plane, .. } = lam.constitutive_matrix(PlateTheory::ThirdOrder)? {
        println!("\nTSDT H11 = {:.6e}", in_plane[(6, 6)]);
    }

    Ok(())
}
