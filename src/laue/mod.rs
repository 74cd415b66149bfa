//! Laue-class symmetry tables and the orientation analysis engine.
//!
//! Each implemented Laue class carries a static [`LaueTable`] with its
//! symmetry operators in quaternion, Rodrigues, and matrix form together with
//! the geometry of its homochoric binning grid. [`LaueClass`] dispatches the
//! generic algorithms (misorientation, fundamental-zone reduction, binning,
//! slip metrics) to the class tables, overriding them where a class has a
//! specialised form such as the Cubic misorientation fast path.

use std::error::Error;
use std::fmt;
use std::f64::consts::PI;

use nalgebra::{Matrix3, Vector3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::orientation::{
    ax2ro, compose_rodrigues, eu2om, eu2qu, qu2ax, qu2eu, ro2ax, ro2ho, ho2ro, ro2eu, AxisAngle,
    Euler, Quat,
};

pub mod cubic;
pub mod hexagonal;
pub mod monoclinic;
pub mod triclinic;
pub mod trigonal;

#[cfg(test)]
#[path = "laue_tests.rs"]
mod laue_tests;

// ================
// Enum definitions
// ================

/// The implemented Laue classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaueClass {
    /// Cubic m-3m (24 proper rotations).
    Cubic,

    /// Hexagonal 6/mmm (12 proper rotations).
    Hexagonal,

    /// Trigonal -3m (6 proper rotations).
    Trigonal,

    /// Monoclinic 2/m (2 proper rotations).
    Monoclinic,

    /// Triclinic -1 (identity only).
    Triclinic,
}

impl fmt::Display for LaueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symmetry_name())
    }
}

// =================
// Error definitions
// =================

/// Errors arising from Laue-class analysis requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaueError {
    /// The requested operation has no defined form for the given class.
    UnsupportedOperation {
        class: LaueClass,
        operation: &'static str,
    },

    /// The space group belongs to a Laue class that is not implemented.
    UnsupportedLaueClass { space_group: u32 },
}

impl fmt::Display for LaueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaueError::UnsupportedOperation { class, operation } => {
                write!(f, "Operation `{operation}` is not defined for the {class} Laue class.")
            }
            LaueError::UnsupportedLaueClass { space_group } => {
                write!(f, "Space group {space_group} belongs to an unimplemented Laue class.")
            }
        }
    }
}

impl Error for LaueError {}

// =================
// Table definitions
// =================

/// The static data of one Laue class: its proper rotation operators in three
/// representations and the geometry of its homochoric binning grid.
#[derive(Clone, Debug)]
pub struct LaueTable {
    /// Hermann-Mauguin style symmetry name.
    pub name: &'static str,

    /// Symmetry operators as unit quaternions. The identity is element 0.
    pub quat_ops: Vec<Quat>,

    /// Symmetry operators as scaled Rodrigues vectors. Half-turn operators
    /// use large finite sentinel components.
    pub rod_ops: Vec<Vector3<f64>>,

    /// Symmetry operators as passive rotation matrices.
    pub mat_ops: Vec<Matrix3<f64>>,

    /// Whether the class contains the inversion. All Laue classes do.
    pub has_inversion: bool,

    /// Number of homochoric bins along each axis.
    pub odf_num_bins: [usize; 3],

    /// Homochoric half-width of the binning grid along each axis.
    pub odf_dim_init: [f64; 3],

    /// Homochoric bin width along each axis.
    pub odf_dim_step: [f64; 3],

    /// Total number of ODF bins.
    pub odf_size: usize,

    /// Total number of MDF bins.
    pub mdf_size: usize,

    /// Number of bins used when plotting misorientation distributions.
    pub mdf_plot_bins: usize,

    /// Names of the three standard pole-figure families.
    pub pole_figure_names: [&'static str; 3],

    /// Base directions of each pole-figure family. Antipodes are generated on
    /// the fly, so each family contributes twice this many sphere points per
    /// orientation.
    pub pole_directions: [Vec<Vector3<f64>>; 3],
}

impl LaueTable {
    /// Number of symmetry operators.
    pub fn num_sym_ops(&self) -> usize {
        self.quat_ops.len()
    }

    /// Number of sphere points each family contributes per orientation,
    /// including antipodes.
    pub fn family_sizes(&self) -> [usize; 3] {
        [
            2 * self.pole_directions[0].len(),
            2 * self.pole_directions[1].len(),
            2 * self.pole_directions[2].len(),
        ]
    }

    /// Derives the bin widths from the half-widths and bin counts.
    pub(crate) fn step_from_init(init: &[f64; 3], bins: &[usize; 3]) -> [f64; 3] {
        [
            init[0] / (bins[0] / 2) as f64,
            init[1] / (bins[1] / 2) as f64,
            init[2] / (bins[2] / 2) as f64,
        ]
    }
}

/// The Schmid factor of the most favourably oriented slip system under a
/// loading direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchmidFactor {
    /// The Schmid factor itself.
    pub schmid: f64,

    /// Cosine-derived angle components: the load/plane-normal term and the
    /// load/slip-direction term of the winning system.
    pub angle_components: [f64; 2],

    /// Index of the winning slip system.
    pub slip_system: usize,
}

// ==========================
// Class dispatch and queries
// ==========================

impl LaueClass {
    /// All implemented classes.
    pub fn all() -> [LaueClass; 5] {
        [
            LaueClass::Cubic,
            LaueClass::Hexagonal,
            LaueClass::Trigonal,
            LaueClass::Monoclinic,
            LaueClass::Triclinic,
        ]
    }

    /// Maps an International Tables space-group number (1-230) to its
    /// implementing Laue class.
    ///
    /// # Errors
    ///
    /// Space groups of the orthorhombic (16-74) and tetragonal (75-142)
    /// systems belong to Laue classes that are not implemented.
    pub fn from_space_group(space_group: u32) -> Result<Self, LaueError> {
        match space_group {
            1..=2 => Ok(LaueClass::Triclinic),
            3..=15 => Ok(LaueClass::Monoclinic),
            143..=167 => Ok(LaueClass::Trigonal),
            168..=194 => Ok(LaueClass::Hexagonal),
            195..=230 => Ok(LaueClass::Cubic),
            _ => Err(LaueError::UnsupportedLaueClass { space_group }),
        }
    }

    /// The static symmetry table of this class.
    pub fn table(&self) -> &'static LaueTable {
        match self {
            LaueClass::Cubic => &cubic::TABLE,
            LaueClass::Hexagonal => &hexagonal::TABLE,
            LaueClass::Trigonal => &trigonal::TABLE,
            LaueClass::Monoclinic => &monoclinic::TABLE,
            LaueClass::Triclinic => &triclinic::TABLE,
        }
    }

    pub fn symmetry_name(&self) -> &'static str {
        self.table().name
    }

    pub fn num_sym_ops(&self) -> usize {
        self.table().num_sym_ops()
    }

    pub fn has_inversion(&self) -> bool {
        self.table().has_inversion
    }

    pub fn odf_size(&self) -> usize {
        self.table().odf_size
    }

    pub fn mdf_size(&self) -> usize {
        self.table().mdf_size
    }

    pub fn mdf_plot_bins(&self) -> usize {
        self.table().mdf_plot_bins
    }

    pub fn odf_num_bins(&self) -> [usize; 3] {
        self.table().odf_num_bins
    }

    pub fn default_pole_figure_names(&self) -> [&'static str; 3] {
        self.table().pole_figure_names
    }

    // ==============
    // Misorientation
    // ==============

    /// Computes the disorientation between two orientations: the axis-angle
    /// pair of minimum rotation angle over all symmetry operators.
    #[must_use]
    pub fn calc_misorientation(&self, q1: Quat, q2: Quat) -> AxisAngle {
        match self {
            LaueClass::Cubic => cubic::calc_misorientation(q1, q2),
            _ => misorientation_internal(self.table(), q1, q2),
        }
    }

    /// Returns the symmetry equivalent of `q2` nearest to `q1`.
    #[must_use]
    pub fn get_nearest_quat(&self, q1: Quat, q2: Quat) -> Quat {
        nearest_quat(&self.table().quat_ops, q1, q2)
    }

    /// Returns the symmetry equivalent of `q` nearest the identity, with a
    /// non-negative scalar part.
    #[must_use]
    pub fn get_fz_quat(&self, q: Quat) -> Quat {
        quat_nearest_origin(&self.table().quat_ops, q)
    }

    // =========================
    // Fundamental-zone reducers
    // =========================

    /// Reduces a Rodrigues vector into the orientation (ODF) fundamental zone
    /// by keeping the symmetry composition nearest the origin. Idempotent.
    #[must_use]
    pub fn get_odf_fz_rod(&self, rod: Vector3<f64>) -> Vector3<f64> {
        rod_nearest_origin(&self.table().rod_ops, rod)
    }

    /// Reduces a Rodrigues vector into the misorientation (MDF) fundamental
    /// zone.
    ///
    /// # Errors
    ///
    /// The Monoclinic class has no defined misorientation fundamental zone.
    pub fn get_mdf_fz_rod(&self, rod: Vector3<f64>) -> Result<Vector3<f64>, LaueError> {
        match self {
            LaueClass::Cubic => Ok(cubic::mdf_fz_rod(rod)),
            LaueClass::Hexagonal => Ok(hexagonal::mdf_fz_rod(rod)),
            LaueClass::Trigonal => Ok(trigonal::mdf_fz_rod(rod)),
            LaueClass::Monoclinic => Err(LaueError::UnsupportedOperation {
                class: *self,
                operation: "get_mdf_fz_rod",
            }),
            LaueClass::Triclinic => Ok(self.get_odf_fz_rod(rod)),
        }
    }

    // =======
    // Binning
    // =======

    /// Returns the flat homochoric bin index of an orientation given as a
    /// Rodrigues vector. The caller is expected to have reduced the vector
    /// into the ODF fundamental zone.
    #[must_use]
    pub fn get_odf_bin(&self, rod: Vector3<f64>) -> usize {
        homochoric_bin(self.table(), ro2ho(rod))
    }

    /// Returns the flat homochoric bin index of a misorientation given as a
    /// Rodrigues vector. The grid is shared with [`Self::get_odf_bin`].
    #[must_use]
    pub fn get_miso_bin(&self, rod: Vector3<f64>) -> usize {
        homochoric_bin(self.table(), ro2ho(rod))
    }

    /// Draws a representative orientation from an ODF bin: the bin centre is
    /// jittered uniformly within the bin, reduced into the fundamental zone,
    /// and returned as Euler angles.
    #[must_use]
    pub fn determine_euler_angles<R: Rng + ?Sized>(&self, rng: &mut R, choose: usize) -> Euler {
        let ho = self.determine_homochoric(rng, choose);
        let ro = self.get_odf_fz_rod(ho2ro(ho));
        ro2eu(ro)
    }

    /// Draws a representative misorientation from an MDF bin as a Rodrigues
    /// vector reduced into the misorientation fundamental zone.
    ///
    /// # Errors
    ///
    /// See [`Self::get_mdf_fz_rod`].
    pub fn determine_rodrigues_vector<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        choose: usize,
    ) -> Result<Vector3<f64>, LaueError> {
        let ho = self.determine_homochoric(rng, choose);
        self.get_mdf_fz_rod(ho2ro(ho))
    }

    fn determine_homochoric<R: Rng + ?Sized>(&self, rng: &mut R, choose: usize) -> Vector3<f64> {
        let table = self.table();
        let bins = table.odf_num_bins;
        let phi = [
            choose % bins[0],
            (choose / bins[0]) % bins[1],
            choose / (bins[0] * bins[1]),
        ];
        let mut ho = Vector3::zeros();
        for i in 0..3 {
            let random: f64 = rng.gen();
            ho[i] = table.odf_dim_step[i] * phi[i] as f64 + table.odf_dim_step[i] * random
                - table.odf_dim_init[i];
        }
        ho
    }

    /// Returns a uniformly drawn symmetry-operator index.
    pub fn random_symmetry_operator_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.num_sym_ops())
    }

    /// Applies a uniformly drawn symmetry operator to an orientation given in
    /// Euler angles.
    pub fn randomize_euler_angles<R: Rng + ?Sized>(&self, rng: &mut R, eu: Euler) -> Euler {
        let sym = self.table().quat_ops[self.random_symmetry_operator_index(rng)];
        qu2eu(sym * eu2qu(eu))
    }

    // =====================
    // Stereographic regions
    // =====================

    /// Tests whether a crystal direction given by its polar angles lies in
    /// the standard stereographic unit triangle of this class.
    #[must_use]
    pub fn in_unit_triangle(&self, eta: f64, chi: f64) -> bool {
        let (eta_min, eta_max) = self.ipf_eta_range();
        !(eta < eta_min || eta > eta_max || chi < 0.0 || chi > self.ipf_chi_max(eta))
    }

    /// Azimuth range of the unit triangle in radians.
    pub(crate) fn ipf_eta_range(&self) -> (f64, f64) {
        let deg = match self {
            LaueClass::Cubic => (0.0, 45.0),
            LaueClass::Hexagonal => (0.0, 30.0),
            LaueClass::Trigonal => (-90.0, -30.0),
            LaueClass::Monoclinic => (0.0, 180.0),
            LaueClass::Triclinic => (0.0, 360.0),
        };
        (deg.0 * PI / 180.0, deg.1 * PI / 180.0)
    }

    /// Maximum polar angle of the unit triangle at the given azimuth, in
    /// radians.
    pub(crate) fn ipf_chi_max(&self, eta: f64) -> f64 {
        match self {
            LaueClass::Cubic => cubic::unit_triangle_chi_max(eta),
            _ => 0.5 * PI,
        }
    }

    // ==================
    // Pole-figure coords
    // ==================

    /// Expands orientations into sphere coordinates for the three standard
    /// pole-figure families. Every base direction is rotated into the sample
    /// frame and emitted together with its antipode.
    #[must_use]
    pub fn generate_sphere_coords(&self, eulers: &[Euler]) -> [Vec<Vector3<f64>>; 3] {
        let table = self.table();
        let sizes = table.family_sizes();
        let mut families = [
            Vec::with_capacity(sizes[0] * eulers.len()),
            Vec::with_capacity(sizes[1] * eulers.len()),
            Vec::with_capacity(sizes[2] * eulers.len()),
        ];
        for eu in eulers {
            let g_transpose = eu2om(*eu).transpose();
            for (family, directions) in families.iter_mut().zip(table.pole_directions.iter()) {
                for direction in directions {
                    let coord = g_transpose * direction;
                    family.push(coord);
                    family.push(-coord);
                }
            }
        }
        families
    }

    // ============
    // Slip metrics
    // ============

    /// Computes the maximum Schmid factor over the fixed slip-system table of
    /// this class.
    ///
    /// # Errors
    ///
    /// Only the Cubic class carries a fixed {111}<110> slip-system table.
    pub fn get_schmid_factor_and_ss(&self, load: Vector3<f64>) -> Result<SchmidFactor, LaueError> {
        match self {
            LaueClass::Cubic => Ok(cubic::schmid_factor_and_ss(load)),
            _ => Err(self.unsupported("get_schmid_factor_and_ss")),
        }
    }

    /// Computes the maximum Schmid factor of a caller-supplied slip system
    /// expanded over the symmetry operators of this class. Symmetry variants
    /// with a negative-z plane normal are skipped to avoid duplicates.
    #[must_use]
    pub fn get_schmid_factor_and_ss_for_system(
        &self,
        load: Vector3<f64>,
        plane: Vector3<f64>,
        direction: Vector3<f64>,
    ) -> SchmidFactor {
        let table = self.table();
        let load_mag = load.norm();
        let plane_mag = plane.norm() * load_mag;
        let direction_mag = direction.norm() * load_mag;

        let mut result = SchmidFactor {
            schmid: 0.0,
            angle_components: [0.0, 0.0],
            slip_system: 0,
        };
        for (i, sym) in table.mat_ops.iter().enumerate() {
            let slip_plane = sym * plane;
            if slip_plane.z < 0.0 {
                continue;
            }
            let slip_direction = sym * direction;
            let cos_phi = load.dot(&slip_plane).abs() / plane_mag;
            let cos_lambda = load.dot(&slip_direction).abs() / direction_mag;
            let schmid = cos_phi * cos_lambda;
            if schmid > result.schmid {
                result = SchmidFactor {
                    schmid,
                    angle_components: [
                        cos_phi.clamp(-1.0, 1.0).acos(),
                        cos_lambda.clamp(-1.0, 1.0).acos(),
                    ],
                    slip_system: i,
                };
            }
        }
        result
    }

    /// Luster-Morris slip transmission parameter m' between two orientations.
    ///
    /// # Errors
    ///
    /// Defined for the Cubic class only.
    pub fn get_m_prime(&self, q1: Quat, q2: Quat, load: Vector3<f64>) -> Result<f64, LaueError> {
        match self {
            LaueClass::Cubic => Ok(cubic::m_prime(q1, q2, load)),
            _ => Err(self.unsupported("get_m_prime")),
        }
    }

    /// Slip transmission metric F1.
    ///
    /// # Errors
    ///
    /// Defined for the Cubic class only.
    pub fn get_f1(
        &self,
        q1: Quat,
        q2: Quat,
        load: Vector3<f64>,
        max_schmid_factor: bool,
    ) -> Result<f64, LaueError> {
        match self {
            LaueClass::Cubic => Ok(cubic::f1(q1, q2, load, max_schmid_factor)),
            _ => Err(self.unsupported("get_f1")),
        }
    }

    /// Slip transmission metric F1spt.
    ///
    /// # Errors
    ///
    /// Defined for the Cubic class only.
    pub fn get_f1spt(
        &self,
        q1: Quat,
        q2: Quat,
        load: Vector3<f64>,
        max_schmid_factor: bool,
    ) -> Result<f64, LaueError> {
        match self {
            LaueClass::Cubic => Ok(cubic::f1spt(q1, q2, load, max_schmid_factor)),
            _ => Err(self.unsupported("get_f1spt")),
        }
    }

    /// Slip transmission metric F7.
    ///
    /// # Errors
    ///
    /// Defined for the Cubic class only.
    pub fn get_f7(
        &self,
        q1: Quat,
        q2: Quat,
        load: Vector3<f64>,
        max_schmid_factor: bool,
    ) -> Result<f64, LaueError> {
        match self {
            LaueClass::Cubic => Ok(cubic::f7(q1, q2, load, max_schmid_factor)),
            _ => Err(self.unsupported("get_f7")),
        }
    }

    fn unsupported(&self, operation: &'static str) -> LaueError {
        LaueError::UnsupportedOperation {
            class: *self,
            operation,
        }
    }
}

// ==================
// Generic algorithms
// ==================

/// Generic symmetry-loop disorientation: composes the misorientation with
/// every operator, folds angles above $`\pi`$, and keeps the minimum.
pub(crate) fn misorientation_internal(table: &LaueTable, q1: Quat, q2: Quat) -> AxisAngle {
    let qr = q1 * q2.conjugate();
    let mut wmin = f64::MAX;
    let mut best_axis = Vector3::new(0.0, 0.0, 1.0);
    for sym in &table.quat_ops {
        let ax = qu2ax(*sym * qr);
        let w = if ax.angle > PI {
            2.0 * PI - ax.angle
        } else {
            ax.angle
        };
        if w < wmin {
            wmin = w;
            best_axis = ax.axis;
        }
    }
    if wmin < 1e-12 {
        log::debug!("degenerate disorientation, returning the default axis");
        best_axis = Vector3::new(0.0, 0.0, 1.0);
    }
    AxisAngle::new(best_axis, wmin)
}

/// Composes a Rodrigues vector with every Rodrigues operator and returns the
/// result nearest the origin.
pub(crate) fn rod_nearest_origin(rod_ops: &[Vector3<f64>], rod: Vector3<f64>) -> Vector3<f64> {
    let mut smallest = f64::MAX;
    let mut nearest = rod;
    for sym in rod_ops {
        let composed = compose_rodrigues(*sym, rod);
        let mag = composed.norm();
        if mag < smallest {
            smallest = mag;
            nearest = composed;
        }
    }
    nearest
}

/// Returns the symmetry equivalent of `q2` at minimum quaternion distance
/// from `q1`, constrained to the positive-scalar hemisphere.
pub(crate) fn nearest_quat(quat_ops: &[Quat], q1: Quat, q2: Quat) -> Quat {
    let mut smallest = f64::MAX;
    let mut nearest = q2;
    for sym in quat_ops {
        let mut qc = *sym * q2;
        if qc.w < 0.0 {
            qc = -qc;
        }
        let dist = 1.0 - qc.dot(&q1).abs();
        if dist < smallest {
            smallest = dist;
            nearest = qc;
        }
    }
    nearest
}

/// Returns the symmetry equivalent of `q` with the largest scalar part, i.e.
/// the one nearest the identity.
pub(crate) fn quat_nearest_origin(quat_ops: &[Quat], q: Quat) -> Quat {
    let mut smallest = f64::MAX;
    let mut nearest = q;
    for sym in quat_ops {
        let qc = *sym * q;
        let dist = 1.0 - qc.w.abs();
        if dist < smallest {
            smallest = dist;
            nearest = qc;
        }
    }
    if nearest.w < 0.0 {
        nearest = -nearest;
    }
    nearest
}

/// Flat index of a homochoric vector on the class binning grid. Coordinates
/// outside the grid are clamped to the boundary bins.
pub(crate) fn homochoric_bin(table: &LaueTable, ho: Vector3<f64>) -> usize {
    let bins = table.odf_num_bins;
    let mut index = [0usize; 3];
    for i in 0..3 {
        let bin = ((ho[i] + table.odf_dim_init[i]) / table.odf_dim_step[i]).floor() as isize;
        index[i] = bin.clamp(0, bins[i] as isize - 1) as usize;
    }
    index[2] * bins[0] * bins[1] + index[1] * bins[0] + index[0]
}

/// Folds the axis azimuth of a Rodrigues vector into the leading sector of
/// width `sector_deg` degrees, reflecting odd sectors, and returns the vector
/// rebuilt with the original rotation angle. Shared by the hexagonal and
/// trigonal misorientation fundamental zones.
pub(crate) fn azimuth_folded_mdf_rod(
    rod_ops: &[Vector3<f64>],
    rod: Vector3<f64>,
    sector_deg: f64,
) -> Vector3<f64> {
    let nearest = rod_nearest_origin(rod_ops, rod);
    let ax = ro2ax(nearest);
    let mut axis = ax.axis;
    if axis.z < 0.0 {
        axis = -axis;
    }
    let mut angle_deg = axis.y.atan2(axis.x) * 180.0 / PI;
    if angle_deg < 0.0 {
        angle_deg += 360.0;
    }
    if angle_deg > sector_deg {
        let sector = (angle_deg / sector_deg) as i64;
        let mut folded = angle_deg - sector_deg * sector as f64;
        if sector % 2 != 0 {
            folded = sector_deg - folded;
        }
        let folded = folded * PI / 180.0;
        let in_plane_mag = (axis.x * axis.x + axis.y * axis.y).sqrt();
        axis.x = in_plane_mag * folded.cos();
        axis.y = in_plane_mag * folded.sin();
    }
    ax2ro(AxisAngle::new(axis, ax.angle))
}
