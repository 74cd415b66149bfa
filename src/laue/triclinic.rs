//! The Triclinic -1 Laue class: the identity is the only proper rotation.

use std::f64::consts::PI;

use lazy_static::lazy_static;
use nalgebra::{Matrix3, Vector3};

use crate::laue::LaueTable;
use crate::orientation::Quat;

lazy_static! {
    /// Symmetry tables of the Triclinic -1 class.
    pub(crate) static ref TABLE: LaueTable = {
        let odf_num_bins = [72, 36, 72];
        let odf_dim_init = [
            (0.75 * (PI - PI.sin())).cbrt(),
            (0.75 * (0.5 * PI - (0.5 * PI).sin())).cbrt(),
            (0.75 * (PI - PI.sin())).cbrt(),
        ];
        let odf_dim_step = LaueTable::step_from_init(&odf_dim_init, &odf_num_bins);
        LaueTable {
            name: "Triclinic -1",
            quat_ops: vec![Quat::identity()],
            rod_ops: vec![Vector3::new(0.0, 0.0, 0.0)],
            mat_ops: vec![Matrix3::identity()],
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
