//! The Cubic m-3m Laue class.
//!
//! Cubic symmetry admits a closed-form disorientation: the sorted absolute
//! components of the misorientation quaternion fall into one of three
//! coset types whose largest scalar part can be written down directly, so no
//! loop over the 24 operators is needed. This module also carries the
//! {111}<110> slip-system table and the slip-transmission metrics that are
//! only defined for cubic metals.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use lazy_static::lazy_static;
use nalgebra::{Matrix3, Vector3};

use crate::laue::{rod_nearest_origin, LaueTable, SchmidFactor};
use crate::orientation::{ax2ro, qu2om, ro2ax, AxisAngle, Quat};

#[cfg(test)]
#[path = "cubic_tests.rs"]
mod cubic_tests;

lazy_static! {
    /// Symmetry tables of the Cubic m-3m class.
    pub(crate) static ref TABLE: LaueTable = {
        let r = FRAC_1_SQRT_2;
        let s = 1.0 / 3f64.sqrt();
        let quat_ops = vec![
            Quat::new(0.0, 0.0, 0.0, 1.0),
            Quat::new(1.0, 0.0, 0.0, 0.0),
            Quat::new(0.0, 1.0, 0.0, 0.0),
            Quat::new(0.0, 0.0, 1.0, 0.0),
            Quat::new(r, 0.0, 0.0, r),
            Quat::new(0.0, r, 0.0, r),
            Quat::new(0.0, 0.0, r, r),
            Quat::new(-r, 0.0, 0.0, r),
            Quat::new(0.0, -r, 0.0, r),
            Quat::new(0.0, 0.0, -r, r),
            Quat::new(r, r, 0.0, 0.0),
            Quat::new(-r, r, 0.0, 0.0),
            Quat::new(0.0, r, r, 0.0),
            Quat::new(0.0, -r, r, 0.0),
            Quat::new(r, 0.0, r, 0.0),
            Quat::new(-r, 0.0, r, 0.0),
            Quat::new(0.5, 0.5, 0.5, 0.5),
            Quat::new(-0.5, -0.5, -0.5, 0.5),
            Quat::new(0.5, -0.5, 0.5, 0.5),
            Quat::new(-0.5, 0.5, -0.5, 0.5),
            Quat::new(-0.5, 0.5, 0.5, 0.5),
            Quat::new(0.5, -0.5, -0.5, 0.5),
            Quat::new(-0.5, -0.5, 0.5, 0.5),
            Quat::new(0.5, 0.5, -0.5, 0.5),
        ];
        // Half-turn operators carry large finite sentinel components.
        let big = 1e10;
        let rod_ops = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(big, 0.0, 0.0),
            Vector3::new(0.0, big, 0.0),
            Vector3::new(0.0, 0.0, big),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(big, big, 0.0),
            Vector3::new(-big, big, 0.0),
            Vector3::new(0.0, big, big),
            Vector3::new(0.0, -big, big),
            Vector3::new(big, 0.0, big),
            Vector3::new(-big, 0.0, big),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-1.0, -1.0, -1.0),
            Vector3::new(1.0, -1.0, 1.0),
            Vector3::new(-1.0, 1.0, -1.0),
            Vector3::new(-1.0, 1.0, 1.0),
            Vector3::new(1.0, -1.0, -1.0),
            Vector3::new(-1.0, -1.0, 1.0),
            Vector3::new(1.0, 1.0, -1.0),
        ];
        let mat_ops = vec![
            Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0),
            Matrix3::new(1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 1.0, 0.0),
            Matrix3::new(1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0),
            Matrix3::new(1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, -1.0, 0.0),
            Matrix3::new(0.0, 0.0, -1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0),
            Matrix3::new(0.0, 0.0, 1.0, 0.0, 1.0, 0.0, -1.0, 0.0, 0.0),
            Matrix3::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0),
            Matrix3::new(-1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0),
            Matrix3::new(0.0, 1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0),
            Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0),
            Matrix3::new(0.0, -1.0, 0.0, 0.0, 0.0, 1.0, -1.0, 0.0, 0.0),
            Matrix3::new(0.0, 0.0, 1.0, -1.0, 0.0, 0.0, 0.0, -1.0, 0.0),
            Matrix3::new(0.0, -1.0, 0.0, 0.0, 0.0, -1.0, 1.0, 0.0, 0.0),
            Matrix3::new(0.0, 0.0, -1.0, 1.0, 0.0, 0.0, 0.0, -1.0, 0.0),
            Matrix3::new(0.0, 1.0, 0.0, 0.0, 0.0, -1.0, -1.0, 0.0, 0.0),
            Matrix3::new(0.0, 0.0, -1.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0),
            Matrix3::new(0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0),
            Matrix3::new(0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0),
            Matrix3::new(0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, -1.0),
            Matrix3::new(-1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0),
            Matrix3::new(0.0, 0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, 0.0),
            Matrix3::new(-1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, -1.0, 0.0),
            Matrix3::new(0.0, 0.0, -1.0, 0.0, -1.0, 0.0, -1.0, 0.0, 0.0),
            Matrix3::new(0.0, -1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, -1.0),
        ];
        let odf_num_bins = [18, 18, 18];
        let init = (0.75 * (0.25 * PI - (0.25 * PI).sin())).cbrt();
        let odf_dim_init = [init, init, init];
        let odf_dim_step = LaueTable::step_from_init(&odf_dim_init, &odf_num_bins);
        LaueTable {
            name: "Cubic m-3m",
            quat_ops,
            rod_ops,
            mat_ops,
            has_inversion: true,
            odf_num_bins,
            odf_dim_init,
            odf_dim_step,
            odf_size: 5832,
            mdf_size: 5832,
            mdf_plot_bins: 13,
            pole_figure_names: ["<001>", "<011>", "<111>"],
            pole_directions: [
                vec![
                    Vector3::new(1.0, 0.0, 0.0),
                    Vector3::new(0.0, 1.0, 0.0),
                    Vector3::new(0.0, 0.0, 1.0),
                ],
                vec![
                    Vector3::new(r, r, 0.0),
                    Vector3::new(r, 0.0, r),
                    Vector3::new(0.0, r, r),
                    Vector3::new(-r, r, 0.0),
                    Vector3::new(-r, 0.0, r),
                    Vector3::new(0.0, -r, r),
                ],
                vec![
                    Vector3::new(s, s, s),
                    Vector3::new(-s, s, s),
                    Vector3::new(s, -s, s),
                    Vector3::new(s, s, -s),
                ],
            ],
        }
    };

    /// Slip directions of the twelve {111}<110> systems.
    static ref SLIP_DIRECTIONS: [Vector3<f64>; 12] = [
        Vector3::new(0.0, 1.0, -1.0),
        Vector3::new(1.0, 0.0, -1.0),
        Vector3::new(1.0, -1.0, 0.0),
        Vector3::new(1.0, -1.0, 0.0),
        Vector3::new(1.0, 0.0, 1.0),
        Vector3::new(0.0, 1.0, 1.0),
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(0.0, 1.0, 1.0),
        Vector3::new(1.0, 0.0, -1.0),
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(1.0, 0.0, 1.0),
        Vector3::new(0.0, 1.0, -1.0),
    ];

    /// Slip-plane normals of the twelve {111}<110> systems.
    static ref SLIP_PLANES: [Vector3<f64>; 12] = [
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, 1.0, -1.0),
        Vector3::new(1.0, 1.0, -1.0),
        Vector3::new(1.0, 1.0, -1.0),
        Vector3::new(1.0, -1.0, 1.0),
        Vector3::new(1.0, -1.0, 1.0),
        Vector3::new(1.0, -1.0, 1.0),
        Vector3::new(-1.0, 1.0, 1.0),
        Vector3::new(-1.0, 1.0, 1.0),
        Vector3::new(-1.0, 1.0, 1.0),
    ];
}

// ==============
// Disorientation
// ==============

/// Closed-form cubic disorientation.
///
/// The absolute components of the misorientation quaternion are sorted in
/// ascending order; the largest achievable scalar part over the 24 cosets is
/// then one of three expressions, and the winning expression determines the
/// rotation axis directly.
#[must_use]
pub(crate) fn calc_misorientation(q1: Quat, q2: Quat) -> AxisAngle {
    let qc = (q1 * q2.conjugate()).element_wise_abs();
    let mut c = [qc.x, qc.y, qc.z, qc.w];
    c.sort_by(f64::total_cmp);
    let [x, y, z, w] = c;

    let type1 = w;
    let type2 = (z + w) * FRAC_1_SQRT_2;
    let type3 = (x + y + z + w) * 0.5;
    let (cos_half, coset) = if type2 > type1 && type2 >= type3 {
        (type2, 2)
    } else if type3 > type1 {
        (type3, 3)
    } else {
        (type1, 1)
    };

    let cos_half = cos_half.clamp(-1.0, 1.0);
    let angle = 2.0 * cos_half.acos();
    let sin_half = (1.0 - cos_half * cos_half).sqrt();
    if sin_half < 1e-12 || angle.abs() < 1e-12 {
        return AxisAngle::new(Vector3::new(0.0, 0.0, 1.0), angle);
    }
    let axis = match coset {
        1 => Vector3::new(x, y, z),
        2 => Vector3::new(
            (x - y) * FRAC_1_SQRT_2,
            (x + y) * FRAC_1_SQRT_2,
            (z - w) * FRAC_1_SQRT_2,
        ),
        _ => Vector3::new(
            (x - y + z - w) * 0.5,
            (x + y - z - w) * 0.5,
            (-x + y + z - w) * 0.5,
        ),
    } / sin_half;
    AxisAngle::new(axis.normalize(), angle)
}

// ================
// Fundamental zone
// ================

/// Reduces a misorientation Rodrigues vector into the cubic misorientation
/// fundamental zone: nearest-origin reduction followed by sorting the
/// absolute axis components in descending order.
#[must_use]
pub(crate) fn mdf_fz_rod(rod: Vector3<f64>) -> Vector3<f64> {
    let ax = ro2ax(rod_nearest_origin(&TABLE.rod_ops, rod));
    let mut n = [ax.axis.x.abs(), ax.axis.y.abs(), ax.axis.z.abs()];
    n.sort_by(f64::total_cmp);
    ax2ro(AxisAngle::new(Vector3::new(n[2], n[1], n[0]), ax.angle))
}

/// Maximum polar angle of the cubic unit triangle at azimuth `eta` (radians).
/// The boundary is the trace of the {011} great circle between the [001] and
/// [111] vertices.
#[must_use]
pub(crate) fn unit_triangle_chi_max(eta: f64) -> f64 {
    let eta_deg = eta * 180.0 / PI;
    let tangent = if eta_deg > 45.0 {
        (0.5 * PI - eta).tan()
    } else {
        eta.tan()
    };
    (1.0 / (2.0 + tangent * tangent))
        .sqrt()
        .clamp(-1.0, 1.0)
        .acos()
}

// ============
// Slip metrics
// ============

/// Maximum Schmid factor over the twelve {111}<110> systems for a loading
/// direction given in the crystal frame.
#[must_use]
pub(crate) fn schmid_factor_and_ss(load: Vector3<f64>) -> SchmidFactor {
    let mag = load.norm();
    let root3_mag = mag * 3f64.sqrt();
    let root2_mag = mag * 2f64.sqrt();
    let theta = [
        ((load.x + load.y + load.z) / root3_mag).abs(),
        ((load.x + load.y - load.z) / root3_mag).abs(),
        ((load.x - load.y + load.z) / root3_mag).abs(),
        ((-load.x + load.y + load.z) / root3_mag).abs(),
    ];
    let lambda = [
        ((load.x + load.y) / root2_mag).abs(),
        ((load.x + load.z) / root2_mag).abs(),
        ((load.x - load.y) / root2_mag).abs(),
        ((load.x - load.z) / root2_mag).abs(),
        ((load.y + load.z) / root2_mag).abs(),
        ((load.y - load.z) / root2_mag).abs(),
    ];
    // (theta, lambda) index pairs of the twelve systems, in slip-system order.
    let systems = [
        (0, 5),
        (0, 3),
        (0, 2),
        (1, 2),
        (1, 1),
        (1, 4),
        (2, 0),
        (2, 4),
        (2, 3),
        (3, 0),
        (3, 1),
        (3, 5),
    ];
    let mut best = SchmidFactor {
        schmid: theta[0] * lambda[5],
        angle_components: [theta[0], lambda[5]],
        slip_system: 0,
    };
    for (i, &(t, l)) in systems.iter().enumerate().skip(1) {
        let schmid = theta[t] * lambda[l];
        if schmid > best.schmid {
            best = SchmidFactor {
                schmid,
                angle_components: [theta[t], lambda[l]],
                slip_system: i,
            };
        }
    }
    best
}

/// Crystal-to-sample rotation matrix of an orientation quaternion.
fn sample_frame_matrix(q: Quat) -> Matrix3<f64> {
    qu2om(q).transpose()
}

/// Finds the slip system of maximum Schmid factor for a grain and returns its
/// sample-frame plane normal and slip direction, both normalised.
fn max_schmid_system(g: &Matrix3<f64>, ld: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let mut best_schmid = -1.0;
    let mut best_hkl = Vector3::zeros();
    let mut best_uvw = Vector3::zeros();
    for (plane, direction) in SLIP_PLANES.iter().zip(SLIP_DIRECTIONS.iter()) {
        let hkl = (g * plane).normalize();
        let uvw = (g * direction).normalize();
        let schmid = ld.dot(&hkl).abs() * ld.dot(&uvw).abs();
        if schmid > best_schmid {
            best_schmid = schmid;
            best_hkl = hkl;
            best_uvw = uvw;
        }
    }
    (best_hkl, best_uvw)
}

/// Luster-Morris slip transmission parameter between two grains: the product
/// of the plane-normal and slip-direction alignment cosines of each grain's
/// most stressed system.
#[must_use]
pub(crate) fn m_prime(q1: Quat, q2: Quat, load: Vector3<f64>) -> f64 {
    let ld = load.normalize();
    let (hkl1, uvw1) = max_schmid_system(&sample_frame_matrix(q1), &ld);
    let (hkl2, uvw2) = max_schmid_system(&sample_frame_matrix(q2), &ld);
    hkl1.dot(&hkl2).abs() * uvw1.dot(&uvw2).abs()
}

/// Accumulated slip-direction misalignment of one grain-1 system against all
/// twelve systems of grain 2.
fn total_direction_misalignment(uvw1: &Vector3<f64>, uvw2s: &[Vector3<f64>]) -> f64 {
    uvw2s.iter().map(|uvw2| uvw1.dot(uvw2).abs()).sum()
}

fn total_plane_misalignment(hkl1: &Vector3<f64>, hkl2s: &[Vector3<f64>]) -> f64 {
    hkl2s.iter().map(|hkl2| hkl1.dot(hkl2).abs()).sum()
}

fn sample_frame_systems(g: &Matrix3<f64>) -> (Vec<Vector3<f64>>, Vec<Vector3<f64>>) {
    let hkls = SLIP_PLANES.iter().map(|p| (g * p).normalize()).collect();
    let uvws = SLIP_DIRECTIONS.iter().map(|d| (g * d).normalize()).collect();
    (hkls, uvws)
}

/// Slip transmission metric F1. With `max_schmid_factor` set, only grain 1's
/// most stressed system contributes; otherwise the maximum over all twelve
/// systems is returned.
#[must_use]
pub(crate) fn f1(q1: Quat, q2: Quat, load: Vector3<f64>, max_schmid_factor: bool) -> f64 {
    let ld = load.normalize();
    let (hkl1s, uvw1s) = sample_frame_systems(&sample_frame_matrix(q1));
    let (_, uvw2s) = sample_frame_systems(&sample_frame_matrix(q2));
    let mut max_schmid = 0.0;
    let mut result = 0.0;
    for (hkl1, uvw1) in hkl1s.iter().zip(uvw1s.iter()) {
        let direction_component = ld.dot(uvw1).abs();
        let schmid = ld.dot(hkl1).abs() * direction_component;
        if schmid > max_schmid || !max_schmid_factor {
            let value =
                schmid * direction_component * total_direction_misalignment(uvw1, &uvw2s);
            if max_schmid_factor {
                max_schmid = schmid;
                result = value;
            } else if value > result {
                result = value;
            }
        }
    }
    result
}

/// Slip transmission metric F1spt: F1 weighted additionally by the
/// accumulated slip-plane misalignment.
#[must_use]
pub(crate) fn f1spt(q1: Quat, q2: Quat, load: Vector3<f64>, max_schmid_factor: bool) -> f64 {
    let ld = load.normalize();
    let (hkl1s, uvw1s) = sample_frame_systems(&sample_frame_matrix(q1));
    let (hkl2s, uvw2s) = sample_frame_systems(&sample_frame_matrix(q2));
    let mut max_schmid = 0.0;
    let mut result = 0.0;
    for (hkl1, uvw1) in hkl1s.iter().zip(uvw1s.iter()) {
        let direction_component = ld.dot(uvw1).abs();
        let schmid = ld.dot(hkl1).abs() * direction_component;
        if schmid > max_schmid || !max_schmid_factor {
            let value = schmid
                * direction_component
                * total_direction_misalignment(uvw1, &uvw2s)
                * total_plane_misalignment(hkl1, &hkl2s);
            if max_schmid_factor {
                max_schmid = schmid;
                result = value;
            } else if value > result {
                result = value;
            }
        }
    }
    result
}

/// Slip transmission metric F7: the squared direction component weighted by
/// the accumulated slip-direction misalignment.
#[must_use]
pub(crate) fn f7(q1: Quat, q2: Quat, load: Vector3<f64>, max_schmid_factor: bool) -> f64 {
    let ld = load.normalize();
    let (hkl1s, uvw1s) = sample_frame_systems(&sample_frame_matrix(q1));
    let (_, uvw2s) = sample_frame_systems(&sample_frame_matrix(q2));
    let mut max_schmid = 0.0;
    let mut result = 0.0;
    for (hkl1, uvw1) in hkl1s.iter().zip(uvw1s.iter()) {
        let direction_component = ld.dot(uvw1).abs();
        let schmid = ld.dot(hkl1).abs() * direction_component;
        if schmid > max_schmid || !max_schmid_factor {
            let value = direction_component
                * direction_component
                * total_direction_misalignment(uvw1, &uvw2s);
            if max_schmid_factor {
                max_schmid = schmid;
                result = value;
            } else if value > result {
                result = value;
            }
        }
    }
    result
}
