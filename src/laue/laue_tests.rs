use std::f64::consts::PI;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::orientation::{ax2qu, eu2ro, qu2ax};

#[test]
fn test_space_group_mapping() {
    assert_eq!(LaueClass::from_space_group(1), Ok(LaueClass::Triclinic));
    assert_eq!(LaueClass::from_space_group(14), Ok(LaueClass::Monoclinic));
    assert_eq!(LaueClass::from_space_group(167), Ok(LaueClass::Trigonal));
    assert_eq!(LaueClass::from_space_group(194), Ok(LaueClass::Hexagonal));
    assert_eq!(LaueClass::from_space_group(225), Ok(LaueClass::Cubic));
    assert_eq!(
        LaueClass::from_space_group(100),
        Err(LaueError::UnsupportedLaueClass { space_group: 100 })
    );
}

#[test]
fn test_table_shapes() {
    for class in LaueClass::all() {
        let table = class.table();
        assert_eq!(table.quat_ops.len(), table.rod_ops.len());
        assert_eq!(table.quat_ops.len(), table.mat_ops.len());
        let bins = table.odf_num_bins;
        assert_eq!(bins[0] * bins[1] * bins[2], table.odf_size);
        for op in &table.quat_ops {
            assert_abs_diff_eq!(op.norm(), 1.0, epsilon = 1e-7);
        }
    }
}

#[test]
fn test_quaternion_tables_are_closed() {
    for class in [LaueClass::Cubic, LaueClass::Hexagonal, LaueClass::Trigonal] {
        let ops = &class.table().quat_ops;
        for a in ops {
            for b in ops {
                let product = *a * *b;
                let closed = ops
                    .iter()
                    .any(|c| (product.dot(c).abs() - 1.0).abs() < 1e-6);
                assert!(closed, "{class} operator product left the group");
            }
        }
    }
}

#[test]
fn test_symmetric_rotation_has_zero_misorientation() {
    let q1 = Quat::identity();
    let q2 = eu2qu(Euler::new(0.5 * PI, 0.0, 0.0));
    let ax = LaueClass::Cubic.calc_misorientation(q1, q2);
    assert_abs_diff_eq!(ax.angle, 0.0, epsilon = 1e-6);
}

#[test]
fn test_generic_loop_matches_cubic_fast_path() {
    let mut rng = StdRng::seed_from_u64(19);
    let random_euler = |rng: &mut StdRng| {
        Euler::new(
            rng.gen::<f64>() * 2.0 * PI,
            rng.gen::<f64>() * PI,
            rng.gen::<f64>() * 2.0 * PI,
        )
    };
    let table = LaueClass::Cubic.table();
    for _ in 0..1000 {
        let (e1, e2) = (random_euler(&mut rng), random_euler(&mut rng));
        let (q1, q2) = (eu2qu(e1), eu2qu(e2));
        let fast = cubic::calc_misorientation(q1, q2);
        let generic = misorientation_internal(table, q1, q2);
        assert_abs_diff_eq!(fast.angle, generic.angle, epsilon = 1e-6);
    }
}

#[test]
fn test_hexagonal_c_axis_rotation_is_symmetric() {
    let q1 = Quat::identity();
    let q2 = ax2qu(AxisAngle::new(Vector3::new(0.0, 0.0, 1.0), PI / 3.0));
    let ax = LaueClass::Hexagonal.calc_misorientation(q1, q2);
    assert_abs_diff_eq!(ax.angle, 0.0, epsilon = 1e-6);
}

#[test]
fn test_odf_fz_reduction_is_idempotent() {
    let rods = [
        eu2ro(Euler::new(1.3, 0.8, 2.1)),
        eu2ro(Euler::new(0.1, 1.4, 4.4)),
        eu2ro(Euler::new(5.9, 0.3, 0.7)),
    ];
    for class in LaueClass::all() {
        for rod in rods {
            let reduced = class.get_odf_fz_rod(rod);
            let twice = class.get_odf_fz_rod(reduced);
            assert_abs_diff_eq!((reduced - twice).norm(), 0.0, epsilon = 1e-10);
        }
    }
}

#[test]
fn test_fz_quat_maximises_scalar_part() {
    let q = eu2qu(Euler::new(2.2, 0.9, 1.7));
    for class in LaueClass::all() {
        let fz = class.get_fz_quat(q);
        assert!(fz.w >= 0.0);
        for sym in &class.table().quat_ops {
            assert!(fz.w >= (*sym * q).w.abs() - 1e-12);
        }
    }
}

#[test]
fn test_nearest_quat_is_closest_equivalent() {
    let q1 = eu2qu(Euler::new(0.4, 0.5, 0.6));
    let q2 = eu2qu(Euler::new(2.4, 1.1, 3.0));
    let nearest = LaueClass::Cubic.get_nearest_quat(q1, q2);
    let nearest_dist = 1.0 - nearest.dot(&q1).abs();
    for sym in &LaueClass::Cubic.table().quat_ops {
        let dist = 1.0 - (*sym * q2).dot(&q1).abs();
        assert!(nearest_dist <= dist + 1e-12);
    }
}

#[test]
fn test_cubic_fz_quat_reduces_large_z_rotation() {
    // 100 degrees about z composes with the -90 degree operator to 10.
    let q = ax2qu(AxisAngle::new(
        Vector3::new(0.0, 0.0, 1.0),
        100.0 * PI / 180.0,
    ));
    let fz = LaueClass::Cubic.get_fz_quat(q);
    let ax = qu2ax(fz);
    assert_relative_eq!(ax.angle, 10.0 * PI / 180.0, epsilon = 1e-9);
}

#[test]
fn test_odf_bin_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);
    let class = LaueClass::Cubic;
    // Central bins of the homochoric grid, well inside the fundamental zone.
    for choose in [3087, 2764, 3086, 3105] {
        let eu = class.determine_euler_angles(&mut rng, choose);
        let rod = class.get_odf_fz_rod(eu2ro(eu));
        assert_eq!(class.get_odf_bin(rod), choose);
    }
}

#[test]
fn test_miso_bin_round_trip() -> Result<(), LaueError> {
    let mut rng = StdRng::seed_from_u64(11);
    let class = LaueClass::Cubic;
    // x bin strictly above the y and z bins keeps the descending component
    // sort of the misorientation zone from moving the vector between bins.
    let choose = 10 + 9 * 18 + 9 * 18 * 18;
    for _ in 0..20 {
        let rod = class.determine_rodrigues_vector(&mut rng, choose)?;
        assert_eq!(class.get_miso_bin(rod), choose);
    }
    Ok(())
}

#[test]
fn test_monoclinic_mdf_fz_is_unsupported() {
    let result = LaueClass::Monoclinic.get_mdf_fz_rod(Vector3::new(0.1, 0.2, 0.3));
    assert_eq!(
        result,
        Err(LaueError::UnsupportedOperation {
            class: LaueClass::Monoclinic,
            operation: "get_mdf_fz_rod",
        })
    );
}

#[test]
fn test_randomize_euler_angles_preserves_orientation() {
    let mut rng = StdRng::seed_from_u64(3);
    let eu = Euler::new(0.8, 0.9, 1.0);
    for class in LaueClass::all() {
        let randomized = class.randomize_euler_angles(&mut rng, eu);
        let ax = class.calc_misorientation(eu2qu(eu), eu2qu(randomized));
        assert_abs_diff_eq!(ax.angle, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn test_unit_triangle_bounds() {
    let cubic = LaueClass::Cubic;
    assert!(cubic.in_unit_triangle(20.0 * PI / 180.0, 10.0 * PI / 180.0));
    assert!(!cubic.in_unit_triangle(50.0 * PI / 180.0, 10.0 * PI / 180.0));
    assert!(!cubic.in_unit_triangle(0.0, 80.0 * PI / 180.0));

    let trigonal = LaueClass::Trigonal;
    assert!(trigonal.in_unit_triangle(-60.0 * PI / 180.0, 0.3));
    assert!(!trigonal.in_unit_triangle(10.0 * PI / 180.0, 0.3));
}

#[test]
fn test_sphere_coords_counts_and_antipodes() {
    let eulers = [Euler::new(0.1, 0.2, 0.3), Euler::new(1.0, 0.5, 0.2)];
    let families = LaueClass::Cubic.generate_sphere_coords(&eulers);
    assert_eq!(families[0].len(), 6 * eulers.len());
    assert_eq!(families[1].len(), 12 * eulers.len());
    assert_eq!(families[2].len(), 8 * eulers.len());
    // Coordinates come in antipodal pairs.
    for family in &families {
        for pair in family.chunks(2) {
            assert_abs_diff_eq!((pair[0] + pair[1]).norm(), 0.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_cubic_schmid_factor_for_axial_load() {
    let result = LaueClass::Cubic
        .get_schmid_factor_and_ss(Vector3::new(0.0, 0.0, 1.0))
        .unwrap();
    assert_relative_eq!(result.schmid, 1.0 / 6f64.sqrt(), epsilon = 1e-7);
}

#[test]
fn test_symmetry_expanded_schmid_matches_fixed_table() {
    let load = Vector3::new(0.0, 0.0, 1.0);
    let expanded = LaueClass::Cubic.get_schmid_factor_and_ss_for_system(
        load,
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(0.0, 1.0, -1.0),
    );
    assert_relative_eq!(expanded.schmid, 1.0 / 6f64.sqrt(), epsilon = 1e-7);
}

#[test]
fn test_m_prime_of_identical_grains_is_one() {
    let q = eu2qu(Euler::new(0.3, 0.6, 0.9));
    let m = LaueClass::Cubic
        .get_m_prime(q, q, Vector3::new(0.0, 0.0, 1.0))
        .unwrap();
    assert_relative_eq!(m, 1.0, epsilon = 1e-9);
}

#[test]
fn test_slip_metrics_unsupported_outside_cubic() {
    let q = Quat::identity();
    let load = Vector3::new(0.0, 0.0, 1.0);
    assert!(LaueClass::Hexagonal.get_f1(q, q, load, true).is_err());
    assert!(LaueClass::Trigonal.get_f1spt(q, q, load, true).is_err());
    assert!(LaueClass::Monoclinic.get_f7(q, q, load, true).is_err());
    assert!(LaueClass::Hexagonal
        .get_schmid_factor_and_ss(load)
        .is_err());
}

#[test]
fn test_f_metrics_are_positive_for_generic_pair() {
    let q1 = eu2qu(Euler::new(0.2, 0.4, 0.6));
    let q2 = eu2qu(Euler::new(1.2, 0.8, 0.3));
    let load = Vector3::new(0.0, 0.0, 1.0);
    let f1 = LaueClass::Cubic.get_f1(q1, q2, load, true).unwrap();
    let f1spt = LaueClass::Cubic.get_f1spt(q1, q2, load, true).unwrap();
    let f7 = LaueClass::Cubic.get_f7(q1, q2, load, true).unwrap();
    assert!(f1 > 0.0);
    assert!(f1spt > 0.0);
    assert!(f7 > 0.0);
}

#[test]
fn test_symmetry_names() {
    assert_eq!(LaueClass::Cubic.symmetry_name(), "Cubic m-3m");
    assert_eq!(LaueClass::Hexagonal.symmetry_name(), "Hexagonal 6/mmm");
    assert_eq!(LaueClass::Trigonal.symmetry_name(), "Trigonal -3m");
    assert_eq!(LaueClass::Monoclinic.symmetry_name(), "Monoclinic 2/m");
    assert_eq!(LaueClass::Triclinic.symmetry_name(), "Triclinic -1");
}
