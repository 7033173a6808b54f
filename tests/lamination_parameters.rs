use std::sync::Arc;

use approx::assert_relative_eq;
use composites::math::{relative_difference, Mat3, SHEAR_COUPLING_ENTRIES};
use composites::prelude::*;

const LAMINAPROP: [f64; 6] = [142e9, 7.72e9, 0.34, 3.8e9, 3.8e9, 2.9e9];

fn material() -> Arc<Material> {
    Arc::new(Material::new(&LAMINAPROP, None).unwrap())
}

fn stack(angles: &[f64], offset: f64) -> Laminate {
    let mat = material();
    let plies = angles
        .iter()
        .map(|&a| Ply::new(a, 1.5e-4, Arc::clone(&mat)).unwrap())
        .collect();
    Laminate::from_plies(plies, offset, LaminateOptions::default()).unwrap()
}

fn parametric_copy(lam: &Laminate) -> Laminate {
    let lp = lam.lamination_parameters().unwrap();
    Laminate::from_lamination_parameters(lam.thickness(), lam.common_material().unwrap(), lp).unwrap()
}

fn assert_same_stiffness(lam: &Laminate, other: &Laminate) {
    let (s, o) = (lam.stiffness().unwrap(), other.stiffness().unwrap());
    // B is measured against A so that vanishing coupling does not inflate the error
    let a_scale = s.a.amax();
    assert!(relative_difference(&o.a, &s.a) < 1e-6);
    assert!((o.b - s.b).amax() <= 1e-6 * a_scale * lam.thickness());
    assert!(relative_difference(&o.d, &s.d) < 1e-6);
    assert!(relative_difference(&o.atrans, &s.atrans) < 1e-6);
}

#[test]
fn test_round_trip_through_parameters() {
    for angles in [
        vec![0.0, 45.0, 90.0],
        vec![0.0, 45.0, -45.0, 90.0, 90.0, -45.0, 45.0, 0.0],
        vec![30.0, -60.0, 15.0, 0.0, 75.0],
        vec![25.0],
    ] {
        let lam = stack(&angles, 0.0);
        assert_same_stiffness(&lam, &parametric_copy(&lam));
    }
}

#[test]
fn test_round_trip_with_offset() {
    let lam = stack(&[0.0, 45.0, -30.0, 90.0], 2e-4);
    let copy = parametric_copy(&lam);
    assert_same_stiffness(&lam, &copy);
    assert!(copy.b().unwrap().amax() > 0.0);
}

#[test]
fn test_to_parametric_keeps_stiffness() {
    let mut lam = stack(&[0.0, 60.0, -60.0], 0.0);
    let before = lam.clone();
    lam.to_parametric().unwrap();
    assert!(matches!(lam.layup(), Layup::Parametric { .. }));
    lam.rebuild().unwrap();
    assert_same_stiffness(&before, &lam);
    assert!(lam.stiffness().unwrap().higher_order.is_none());
}

#[test]
fn test_balanced_constraint_equivalence() {
    let angles = [0.0, 30.0, 45.0, -10.0, 90.0];
    let mut by_stiffness = stack(&angles, 0.0);
    by_stiffness.force_balanced().unwrap();
    let mut by_parameters = stack(&angles, 0.0);
    by_parameters.force_balanced_lp().unwrap();

    assert_same_stiffness(&by_stiffness, &by_parameters);
    let a = by_parameters.a().unwrap();
    assert!(a[(0, 2)].abs() < 1e-9 * a.amax());
    assert!(a[(1, 2)].abs() < 1e-9 * a.amax());
}

#[test]
fn test_symmetric_constraint_equivalence() {
    let angles = [0.0, 30.0, 45.0, -10.0, 90.0];
    let mut by_stiffness = stack(&angles, 0.0);
    by_stiffness.force_symmetric().unwrap();
    let mut by_parameters = stack(&angles, 0.0);
    by_parameters.force_symmetric_lp().unwrap();

    assert_same_stiffness(&by_stiffness, &by_parameters);
    assert_eq!(by_parameters.b().unwrap(), Mat3::zeros());
}

#[test]
fn test_orthotropic_constraint_equivalence() {
    let angles = [0.0, 30.0, 45.0, -10.0, 90.0];
    let mut by_stiffness = stack(&angles, 0.0);
    by_stiffness.force_orthotropic().unwrap();
    let mut by_parameters = stack(&angles, 0.0);
    by_parameters.force_orthotropic_lp().unwrap();

    assert_same_stiffness(&by_stiffness, &by_parameters);

    let s = by_stiffness.stiffness().unwrap();
    let ho = s.higher_order.unwrap();
    for m in [s.a, s.b, s.d, ho.e, ho.f, ho.h] {
        for (i, j) in SHEAR_COUPLING_ENTRIES {
            assert_eq!(m[(i, j)], 0.0);
        }
    }
}

#[test]
fn test_smeared_constraint_equivalence() {
    let angles = [0.0, 30.0, 45.0, -10.0, 90.0];
    let mut by_stiffness = stack(&angles, 0.0);
    by_stiffness.force_smeared().unwrap();
    let mut by_parameters = stack(&angles, 0.0);
    by_parameters.force_smeared_lp().unwrap();

    assert_same_stiffness(&by_stiffness, &by_parameters);

    let h = by_stiffness.thickness();
    let s = by_stiffness.stiffness().unwrap();
    assert_relative_eq!(s.d, s.a * (h * h / 12.0), max_relative = 1e-12);
    assert_eq!(s.b, Mat3::zeros());
    let ho = s.higher_order.unwrap();
    assert_relative_eq!(ho.f, s.a * (h.powi(4) / 80.0), max_relative = 1e-12);
    assert_relative_eq!(ho.dtrans, s.atrans * (h * h / 12.0), max_relative = 1e-12);
}

#[test]
fn test_symmetric_is_idempotent() {
    let mut lam = stack(&[0.0, 45.0, 90.0], 0.0);
    lam.force_symmetric().unwrap();
    let once = *lam.stiffness().unwrap();
    lam.force_symmetric().unwrap();
    assert_eq!(*lam.stiffness().unwrap(), once);
    assert_eq!(once.b, Mat3::zeros());
}

#[test]
fn test_constraints_rejected_with_offset() {
    let mut lam = stack(&[0.0, 45.0, 90.0], 1e-4);
    for result in [
        lam.force_symmetric(),
        lam.force_balanced(),
        lam.force_orthotropic(),
        lam.force_smeared(),
        lam.force_balanced_lp(),
        lam.force_symmetric_lp(),
        lam.force_orthotropic_lp(),
        lam.force_smeared_lp(),
    ] {
        assert!(matches!(result, Err(LaminateError::OffsetConstraint { .. })));
    }
    assert!(!lam.constraints().any());
}

#[test]
fn test_parameters_of_constrained_laminate() {
    let mut lam = stack(&[0.0, 30.0, 90.0], 0.0);
    lam.force_balanced().unwrap();
    let lp = lam.lamination_parameters().unwrap();
    assert_eq!(lp.xi_a[2], 0.0);
    assert_eq!(lp.xi_a[4], 0.0);
}

#[test]
fn test_gradient_predicts_stack_change() {
    // moving a ply changes the stiffness linearly in the lamination parameters
    let lam = stack(&[0.0, 45.0, -45.0, 90.0], 0.0);
    let other = stack(&[0.0, 40.0, -45.0, 90.0], 0.0);
    let lp = lam.lamination_parameters().unwrap();
    let lp_other = other.lamination_parameters().unwrap();

    let mut delta = lp_other;
    delta.xi_a -= lp.xi_a;
    delta.xi_b -= lp.xi_b;
    delta.xi_d -= lp.xi_d;
    delta.xi_e -= lp.xi_e;

    let grad = LaminationParameterGradient::new(lam.thickness(), &lam.common_material().unwrap()).unwrap();
    let predicted = lam.abde().unwrap() + grad.directional(&delta);
    let exact = other.abde().unwrap();
    assert!(relative_difference(&predicted, &exact) < 1e-9);
}
