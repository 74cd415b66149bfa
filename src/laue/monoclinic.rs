//! The Monoclinic 2/m Laue class.

use std::f64::consts::PI;

use lazy_static::lazy_static;
use nalgebra::{Matrix3, Vector3};

use crate::laue::LaueTable;
use crate::orientation::Quat;

lazy_static! {
    /// Symmetry tables of the Monoclinic 2/m class. The quaternion table
    /// holds the two-fold rotation about the b axis; the matrix table carries
    /// the upstream two-fold about c, and the two are kept as published.
    pub(crate) static ref TABLE: LaueTable = {
        let quat_ops = vec![
            Quat::new(0.0, 0.0, 0.0, 1.0),
            Quat::new(0.0, 1.0, 0.0, 0.0),
        ];
        let rod_ops = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1e10, 0.0),
        ];
        let mat_ops = vec![
            Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0),
            Matrix3::new(-1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0),
        ];
        let odf_num_bins = [72, 36, 72];
        // The first axis carries a 0.7 prefactor rather than the solid-angle
        // 0.75, as published.
        let odf_dim_init = [
            (0.7 * (PI - PI.sin())).cbrt(),
            (0.75 * (0.5 * PI - (0.5 * PI).sin())).cbrt(),
            (0.75 * (PI - PI.sin())).cbrt(),
        ];
        let odf_dim_step = LaueTable::step_from_init(&odf_dim_init, &odf_num_bins);
        LaueTable {
            name: "Monoclinic 2/m",
            quat_ops,
            rod_ops,
            mat_ops,
            has_inversion: true,
            odf_num_bins,
            odf_dim_init,
            odf_dim_step,
            odf_size: 186624,
            mdf_size: 186624,
            mdf_plot_bins: 36,
            pole_figure_names: ["<001>", "<100>", "<010>"],
            pole_directions: [
                vec![Vector3::new(0.0, 0.0, 1.0)],
                vec![Vector3::new(1.0, 0.0, 0.0)],
                vec![Vector3::new(0.0, 1.0, 0.0)],
            ],
        }
    };
}
