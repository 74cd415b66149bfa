//! The Hexagonal 6/mmm Laue class.

use std::f64::consts::PI;

use lazy_static::lazy_static;
use nalgebra::{Matrix3, Vector3};

use crate::laue::{azimuth_folded_mdf_rod, LaueTable};
use crate::orientation::Quat;

#[cfg(test)]
#[path = "hexagonal_tests.rs"]
mod hexagonal_tests;

lazy_static! {
    /// Symmetry tables of the Hexagonal 6/mmm class.
    pub(crate) static ref TABLE: LaueTable = {
        let h = 3f64.sqrt() / 2.0;
        let quat_ops = vec![
            Quat::new(0.0, 0.0, 0.0, 1.0),
            Quat::new(0.0, 0.0, 0.5, h),
            Quat::new(0.0, 0.0, h, 0.5),
            Quat::new(0.0, 0.0, 1.0, 0.0),
            Quat::new(0.0, 0.0, h, -0.5),
            Quat::new(0.0, 0.0, 0.5, -h),
            Quat::new(1.0, 0.0, 0.0, 0.0),
            Quat::new(h, 0.5, 0.0, 0.0),
            Quat::new(0.5, h, 0.0, 0.0),
            Quat::new(0.0, 1.0, 0.0, 0.0),
            Quat::new(-0.5, h, 0.0, 0.0),
            Quat::new(-h, 0.5, 0.0, 0.0),
        ];
        // tan(15 deg) steps about the c axis, in-plane half-turns encoded
        // with large sentinel magnitudes.
        let t30 = (PI / 6.0).tan();
        let t60 = (PI / 3.0).tan();
        let big = 1e12;
        let rod_ops = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, t30),
            Vector3::new(0.0, 0.0, t60),
            Vector3::new(0.0, 0.0, big),
            Vector3::new(0.0, 0.0, -t60),
            Vector3::new(0.0, 0.0, -t30),
            Vector3::new(big, 0.0, 0.0),
            Vector3::new(h, 0.5, 0.0) * 10.0 * big,
            Vector3::new(0.5, h, 0.0) * 10.0 * big,
            Vector3::new(0.0, big, 0.0),
            Vector3::new(-0.5, h, 0.0) * 10.0 * big,
            Vector3::new(-h, 0.5, 0.0) * 10.0 * big,
        ];
        let mat_ops = vec![
            Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0),
            Matrix3::new(-0.5, h, 0.0, -h, -0.5, 0.0, 0.0, 0.0, 1.0),
            Matrix3::new(-0.5, -h, 0.0, h, -0.5, 0.0, 0.0, 0.0, 1.0),
            Matrix3::new(0.5, h, 0.0, -h, 0.5, 0.0, 0.0, 0.0, 1.0),
            Matrix3::new(-1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0),
            Matrix3::new(0.5, -h, 0.0, h, 0.5, 0.0, 0.0, 0.0, 1.0),
            Matrix3::new(-0.5, -h, 0.0, -h, 0.5, 0.0, 0.0, 0.0, -1.0),
            Matrix3::new(1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0),
            Matrix3::new(-0.5, h, 0.0, h, 0.5, 0.0, 0.0, 0.0, -1.0),
            Matrix3::new(0.5, h, 0.0, h, -0.5, 0.0, 0.0, 0.0, -1.0),
            Matrix3::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0),
            Matrix3::new(0.5, -h, 0.0, -h, -0.5, 0.0, 0.0, 0.0, -1.0),
        ];
        let odf_num_bins = [36, 36, 12];
        let init01 = (0.75 * (0.5 * PI - (0.5 * PI).sin())).cbrt();
        let init2 = (0.75 * (PI / 6.0 - (PI / 6.0).sin())).cbrt();
        let odf_dim_init = [init01, init01, init2];
        let odf_dim_step = LaueTable::step_from_init(&odf_dim_init, &odf_num_bins);
        LaueTable {
            name: "Hexagonal 6/mmm",
            quat_ops,
            rod_ops,
            mat_ops,
            has_inversion: true,
            odf_num_bins,
            odf_dim_init,
            odf_dim_step,
            odf_size: 15552,
            mdf_size: 15552,
            mdf_plot_bins: 20,
            pole_figure_names: ["<0001>", "<10-10>", "<2-1-10>"],
            pole_directions: [
                vec![Vector3::new(0.0, 0.0, 1.0)],
                vec![
                    Vector3::new(h, 0.5, 0.0),
                    Vector3::new(0.0, 1.0, 0.0),
                    Vector3::new(-h, 0.5, 0.0),
                ],
                vec![
                    Vector3::new(1.0, 0.0, 0.0),
                    Vector3::new(0.5, h, 0.0),
                    Vector3::new(-0.5, h, 0.0),
                ],
            ],
        }
    };
}

/// Reduces a misorientation Rodrigues vector into the hexagonal
/// misorientation fundamental zone by folding the axis azimuth into the
/// leading 30 degree sector.
#[must_use]
pub(crate) fn mdf_fz_rod(rod: Vector3<f64>) -> Vector3<f64> {
    azimuth_folded_mdf_rod(&TABLE.rod_ops, rod, 30.0)
}
