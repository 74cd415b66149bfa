use std::f64::consts::PI;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::Vector3;
use proptest::prelude::*;

use super::*;

#[test]
fn test_quat_product_convention() {
    let p = Quat::new(1.0, 0.0, 0.0, 1.0);
    let q = Quat::new(0.0, 1.0, 0.0, 2.0);
    let pq = p * q;
    assert_abs_diff_eq!(pq.x, 2.0);
    assert_abs_diff_eq!(pq.y, 1.0);
    assert_abs_diff_eq!(pq.z, 1.0);
    assert_abs_diff_eq!(pq.w, 2.0);

    let qp = q * p;
    assert_abs_diff_eq!(qp.x, 2.0);
    assert_abs_diff_eq!(qp.y, 1.0);
    assert_abs_diff_eq!(qp.z, -1.0);
    assert_abs_diff_eq!(qp.w, 2.0);
}

#[test]
fn test_quat_conjugate_inverts() {
    let q = eu2qu(Euler::new(0.3, 0.7, 1.1));
    let prod = q * q.conjugate();
    assert_abs_diff_eq!(prod.w.abs(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(prod.vector_part().norm(), 0.0, epsilon = 1e-12);
}

#[test]
fn test_eu2qu_z_rotation() {
    let q = eu2qu(Euler::new(0.5 * PI, 0.0, 0.0));
    assert_abs_diff_eq!(q.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(q.y, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(q.z, -(0.25 * PI).sin(), epsilon = 1e-12);
    assert_abs_diff_eq!(q.w, (0.25 * PI).cos(), epsilon = 1e-12);
}

#[test]
fn test_eu2om_matches_qu2om() {
    let eu = Euler::new(0.3, 0.4, 0.5);
    let direct = eu2om(eu);
    let via_quat = qu2om(eu2qu(eu));
    for i in 0..3 {
        for j in 0..3 {
            assert_abs_diff_eq!(direct[(i, j)], via_quat[(i, j)], epsilon = 1e-12);
        }
    }
}

#[test]
fn test_threefold_axis_permutes_cube_axes() {
    // A 120 degree rotation about [111] takes [100] to [001] in the sample
    // frame.
    let axis = Vector3::new(1.0, 1.0, 1.0).normalize();
    let q = ax2qu(AxisAngle::new(axis, 2.0 * PI / 3.0));
    let rotated = qu2om(q).transpose() * Vector3::new(1.0, 0.0, 0.0);
    assert_abs_diff_eq!(rotated.x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rotated.y, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rotated.z, 1.0, epsilon = 1e-12);
}

#[test]
fn test_qu2ax_round_trip() {
    let q = eu2qu(Euler::new(1.2, 0.6, 0.1));
    let back = ax2qu(qu2ax(q));
    assert_abs_diff_eq!(q.dot(&back).abs(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_qu2ax_identity() {
    let ax = qu2ax(Quat::identity());
    assert_abs_diff_eq!(ax.angle, 0.0);
    assert_abs_diff_eq!(ax.axis.z, 1.0);
}

#[test]
fn test_rodrigues_homochoric_round_trip() {
    let rod = ax2ro(AxisAngle::new(Vector3::new(0.0, 0.6, 0.8), 0.9));
    let back = ho2ro(ro2ho(rod));
    assert_relative_eq!(rod.x, back.x, epsilon = 1e-7);
    assert_relative_eq!(rod.y, back.y, epsilon = 1e-7);
    assert_relative_eq!(rod.z, back.z, epsilon = 1e-7);
}

#[test]
fn test_half_turn_rodrigues_sentinel() {
    let rod = Vector3::new(2e10, 0.0, 0.0);
    let ax = ro2ax(rod);
    assert_abs_diff_eq!(ax.angle, PI);
    assert_abs_diff_eq!(ax.axis.x, 1.0);
}

#[test]
fn test_compose_rodrigues_adds_coaxial_angles() {
    let r1 = Vector3::new(0.0, 0.0, (0.15f64).tan());
    let r2 = Vector3::new(0.0, 0.0, (0.25f64).tan());
    let composed = compose_rodrigues(r1, r2);
    assert_relative_eq!(composed.z, (0.4f64).tan(), epsilon = 1e-12);
    assert_abs_diff_eq!(composed.x, 0.0, epsilon = 1e-12);
}

#[test]
fn test_wrap_two_pi() {
    assert_abs_diff_eq!(wrap_two_pi(-0.5), 2.0 * PI - 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(wrap_two_pi(2.0 * PI + 0.25), 0.25, epsilon = 1e-12);
}

proptest! {
    #[test]
    fn test_euler_quaternion_round_trip(
        phi1 in 0.01f64..6.0,
        phi in 0.01f64..3.0,
        phi2 in 0.01f64..6.0,
    ) {
        let q = eu2qu(Euler::new(phi1, phi, phi2));
        let back = eu2qu(qu2eu(q));
        prop_assert!((q.dot(&back).abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_homochoric_round_trip(
        x in -0.6f64..0.6,
        y in -0.6f64..0.6,
        z in -0.6f64..0.6,
    ) {
        let ho = Vector3::new(x, y, z);
        prop_assume!(ho.norm() > 1e-3);
        let back = ro2ho(ho2ro(ho));
        prop_assert!((ho - back).norm() < 1e-6);
    }
}
