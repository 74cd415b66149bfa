//! The square Modified Lambert projection.
//!
//! Sphere directions are accumulated onto a pair of equal-area square grids,
//! one per hemisphere, via bilinear splatting. The squares can be normalised
//! to multiples-of-random densities and resampled into stereographic or
//! equal-area circular intensity images.

use std::f64::consts::PI;

use nalgebra::Vector3;
use ndarray::Array2;


/// Hemisphere selector for the two square grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Square {
    North,
    South,
}

/// An equal-area square projection of the sphere, one grid per hemisphere.
#[derive(Clone, Debug)]
pub struct ModifiedLambertProjection {
    dimension: usize,
    step_size: f64,
    sphere_radius: f64,
    max_coord: f64,
    min_coord: f64,
    half_dimension_times_step_size: f64,
    north: Array2<f64>,
    south: Array2<f64>,
}

impl ModifiedLambertProjection {
    /// Creates an empty projection whose squares have `dimension` bins per
    /// edge and cover a sphere of radius `sphere_radius`.
    #[must_use]
    pub fn new(dimension: usize, sphere_radius: f64) -> Self {
        let half_sphere_area = 4.0 * PI * sphere_radius * sphere_radius / 2.0;
        let square_edge = half_sphere_area.sqrt();
        let step_size = square_edge / dimension as f64;
        let half_dimension = dimension as f64 / 2.0;
        Self {
            dimension,
            step_size,
            sphere_radius,
            max_coord: square_edge / 2.0,
            min_coord: -square_edge / 2.0,
            half_dimension_times_step_size: half_dimension * step_size,
            north: Array2::zeros((dimension, dimension)),
            south: Array2::zeros((dimension, dimension)),
        }
    }

    /// Accumulates unit sphere directions into a fresh projection, splatting
    /// a unit weight per direction.
    #[must_use]
    pub fn from_points(coords: &[Vector3<f64>], dimension: usize, sphere_radius: f64) -> Self {
        let mut projection = Self::new(dimension, sphere_radius);
        for coord in coords {
            let (sq_coord, square) = projection.square_coord(coord);
            projection.add_interpolated_values(square, sq_coord, 1.0);
        }
        projection
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn sphere_radius(&self) -> f64 {
        self.sphere_radius
    }

    /// Read access to one hemisphere grid, indexed `(row, column)`.
    pub fn square(&self, square: Square) -> &Array2<f64> {
        match square {
            Square::North => &self.north,
            Square::South => &self.south,
        }
    }

    /// Maps a sphere direction to its square coordinates, returning the
    /// hemisphere it belongs to.
    pub fn square_coord(&self, xyz: &Vector3<f64>) -> ((f64, f64), Square) {
        let (adjust, square) = if xyz.z >= 0.0 {
            (-1.0, Square::North)
        } else {
            (1.0, Square::South)
        };
        if xyz.x == 0.0 && xyz.y == 0.0 {
            return ((0.0, 0.0), square);
        }
        let r = self.sphere_radius;
        let factor = (2.0 * r * (r + xyz.z * adjust)).sqrt();
        let half_root_pi = PI.sqrt() / 2.0;
        let (mut sq0, mut sq1) = if xyz.x.abs() >= xyz.y.abs() {
            (
                xyz.x.signum() * factor * half_root_pi,
                xyz.x.signum() * factor * (2.0 / PI.sqrt()) * (xyz.y / xyz.x).atan(),
            )
        } else {
            (
                xyz.y.signum() * factor * (2.0 / PI.sqrt()) * (xyz.x / xyz.y).atan(),
                xyz.y.signum() * factor * half_root_pi,
            )
        };
        // Equatorial directions land exactly on the square edge; nudge them
        // inside so the base bin stays within the grid on both edges.
        if sq0 >= self.max_coord {
            sq0 = self.max_coord - 0.0001;
        } else if sq0 <= self.min_coord {
            sq0 = self.min_coord + 0.0001;
        }
        if sq1 >= self.max_coord {
            sq1 = self.max_coord - 0.0001;
        } else if sq1 <= self.min_coord {
            sq1 = self.min_coord + 0.0001;
        }
        ((sq0, sq1), square)
    }

    /// Maps square coordinates back to a unit sphere direction. Exact inverse
    /// of [`Self::square_coord`] for a unit sphere radius.
    #[must_use]
    pub fn sphere_coord(&self, sq0: f64, sq1: f64, square: Square) -> Vector3<f64> {
        let (a, b, transposed) = if sq0.abs() >= sq1.abs() {
            (sq0, sq1, false)
        } else {
            (sq1, sq0, true)
        };
        if a == 0.0 {
            return match square {
                Square::North => Vector3::new(0.0, 0.0, 1.0),
                Square::South => Vector3::new(0.0, 0.0, -1.0),
            };
        }
        let planar = (2.0 * a / PI) * (PI - a * a).sqrt();
        let phase = b * PI / (4.0 * a);
        let (u, v) = (planar * phase.cos(), planar * phase.sin());
        let height = 1.0 - 2.0 * a * a / PI;
        let (x, y) = if transposed { (v, u) } else { (u, v) };
        match square {
            Square::North => Vector3::new(x, y, height),
            Square::South => Vector3::new(x, y, -height),
        }
    }

    /// Decomposes a square coordinate into its base bin, the fractional
    /// offset from the bin centre, and the sign of that offset.
    fn bin_and_frac(&self, coord: f64) -> (isize, f64, isize) {
        let mod_x = (coord + self.half_dimension_times_step_size) / self.step_size;
        let bin = mod_x.floor();
        let mut frac = mod_x - bin - 0.5;
        let sign = if frac == 0.0 {
            1
        } else if frac < 0.0 {
            -1
        } else {
            1
        };
        frac = frac.abs();
        (bin as isize, frac, sign)
    }

    /// Finds the four bins surrounding a square coordinate together with
    /// their bilinear weights, wrapping across the square edges onto the
    /// opposite side as the Modified Lambert topology requires.
    fn corner_bins(&self, sq_coord: (f64, f64)) -> [((usize, usize), f64); 4] {
        let dim = self.dimension as isize;
        let (abin, mod_x, a_sign) = self.bin_and_frac(sq_coord.0);
        let (bbin, mod_y, b_sign) = self.bin_and_frac(sq_coord.1);

        let mut abin2 = abin + a_sign;
        let mut bbin2 = bbin;
        if !(0..dim).contains(&abin2) {
            abin2 -= a_sign * dim;
            bbin2 = dim - bbin2 - 1;
        }
        let mut abin3 = abin;
        let mut bbin3 = bbin + b_sign;
        if !(0..dim).contains(&bbin3) {
            abin3 = dim - abin3 - 1;
            bbin3 -= b_sign * dim;
        }
        let mut abin4 = abin + a_sign;
        let mut bbin4 = bbin + b_sign;
        let a4_out = !(0..dim).contains(&abin4);
        let b4_out = !(0..dim).contains(&bbin4);
        if a4_out && !b4_out {
            abin4 -= a_sign * dim;
            bbin4 = dim - bbin4 - 1;
        } else if !a4_out && b4_out {
            abin4 = dim - abin4 - 1;
            bbin4 -= b_sign * dim;
        } else if a4_out && b4_out {
            abin4 -= a_sign * dim;
            bbin4 -= b_sign * dim;
        }

        [
            ((bbin as usize, abin as usize), (1.0 - mod_x) * (1.0 - mod_y)),
            ((bbin2 as usize, abin2 as usize), mod_x * (1.0 - mod_y)),
            ((bbin3 as usize, abin3 as usize), (1.0 - mod_x) * mod_y),
            ((bbin4 as usize, abin4 as usize), mod_x * mod_y),
        ]
    }

    /// Splats `value` bilinearly over the four bins surrounding a square
    /// coordinate.
    pub fn add_interpolated_values(&mut self, square: Square, sq_coord: (f64, f64), value: f64) {
        let corners = self.corner_bins(sq_coord);
        let grid = match square {
            Square::North => &mut self.north,
            Square::South => &mut self.south,
        };
        for (index, weight) in corners {
            grid[index] += value * weight;
        }
    }

    /// Reads the bilinearly interpolated intensity at a square coordinate.
    #[must_use]
    pub fn interpolated_value(&self, square: Square, sq_coord: (f64, f64)) -> f64 {
        let grid = self.square(square);
        self.corner_bins(sq_coord)
            .into_iter()
            .map(|(index, weight)| grid[index] * weight)
            .sum()
    }

    /// Normalises each hemisphere grid to unit total intensity.
    pub fn normalize_squares(&mut self) {
        let north_total: f64 = self.north.sum();
        let south_total: f64 = self.south.sum();
        log::trace!(
            "normalising Lambert squares, north total {north_total}, south total {south_total}"
        );
        if north_total > 0.0 {
            self.north.mapv_inplace(|v| v / north_total);
        }
        if south_total > 0.0 {
            self.south.mapv_inplace(|v| v / south_total);
        }
    }

    /// Normalises each hemisphere to multiples-of-random density: unit total
    /// scaled by the number of bins, so a uniform texture reads 1.0
    /// everywhere.
    pub fn normalize_squares_to_mrd(&mut self) {
        self.normalize_squares();
        let num_bins = (self.dimension * self.dimension) as f64;
        self.north.mapv_inplace(|v| v * num_bins);
        self.south.mapv_inplace(|v| v * num_bins);
    }

    /// Resamples the projection into a square stereographic intensity image
    /// of edge `image_dim`. Each pixel inside the unit circle averages the
    /// intensities of the mapped direction and its antipode; pixels outside
    /// the circle are zero.
    #[must_use]
    pub fn create_stereographic_projection(&self, image_dim: usize) -> Array2<f64> {
        let mut intensity = Array2::zeros((image_dim, image_dim));
        let res = 2.0 / image_dim as f64;
        for y in 0..image_dim {
            let ytmp = (y as f64 - image_dim as f64 / 2.0) * res + res / 2.0;
            for x in 0..image_dim {
                let xtmp = (x as f64 - image_dim as f64 / 2.0) * res + res / 2.0;
                let q = xtmp * xtmp + ytmp * ytmp;
                if q > 1.0 {
                    continue;
                }
                let z = -((q - 1.0) / (q + 1.0));
                let xyz = Vector3::new(xtmp * (1.0 + z), ytmp * (1.0 + z), z);
                let mut value = self.sample(&xyz);
                value += self.sample(&-xyz);
                intensity[(y, x)] = value * 0.5;
            }
        }
        intensity
    }

    /// Resamples the projection into an equal-area circular intensity image
    /// of edge `image_dim`.
    #[must_use]
    pub fn create_circular_projection(&self, image_dim: usize) -> Array2<f64> {
        let mut intensity = Array2::zeros((image_dim, image_dim));
        let span = 2.0 * 2f64.sqrt();
        let res = span / image_dim as f64;
        for y in 0..image_dim {
            let ytmp = (y as f64 - image_dim as f64 / 2.0) * res + res / 2.0;
            for x in 0..image_dim {
                let xtmp = (x as f64 - image_dim as f64 / 2.0) * res + res / 2.0;
                let q = xtmp * xtmp + ytmp * ytmp;
                if q > 2.0 {
                    continue;
                }
                let t = (1.0 - q / 4.0).sqrt();
                let xyz = Vector3::new(xtmp * t, ytmp * t, q / 2.0 - 1.0);
                let mut value = self.sample(&xyz);
                value += self.sample(&-xyz);
                intensity[(y, x)] = value * 0.5;
            }
        }
        intensity
    }

    fn sample(&self, xyz: &Vector3<f64>) -> f64 {
        let (sq_coord, square) = self.square_coord(xyz);
        self.interpolated_value(square, sq_coord)
    }
}
