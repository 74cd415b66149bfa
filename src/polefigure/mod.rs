//! Pole-figure generation.
//!
//! Orientations are expanded into sphere coordinates for the three standard
//! pole families of a Laue class, accumulated onto Modified Lambert squares,
//! normalised to multiples-of-random density, resampled into stereographic
//! intensity images, and finally rendered as rainbow-mapped ARGB rasters
//! with a shared intensity scale. The three families are processed in
//! parallel.

use derive_builder::Builder;
use ndarray::Array2;
use rayon::prelude::*;

use crate::color::{drgb, rainbow_color_table, Argb, WHITE};
use crate::lambert::ModifiedLambertProjection;
use crate::laue::LaueClass;
use crate::orientation::Euler;

#[cfg(test)]
#[path = "polefigure_tests.rs"]
mod polefigure_tests;

// ================
// Type definitions
// ================

/// Parameters of a pole-figure rendering run.
#[derive(Builder, Clone, Debug)]
pub struct PoleFigureConfiguration {
    /// Edge length of the Lambert accumulation squares, in bins.
    #[builder(default = "64")]
    pub lambert_dim: usize,

    /// Edge length of the rendered images, in pixels.
    #[builder(default = "512")]
    pub image_dim: usize,

    /// Number of discrete colours in the intensity colour table.
    #[builder(default = "32")]
    pub num_colors: usize,

    /// Radius of the accumulation sphere.
    #[builder(default = "1.0")]
    pub sphere_radius: f64,

    /// Renders hard colour bands instead of the smooth ramp.
    #[builder(default = "false")]
    pub discrete: bool,

    /// Overrides the per-class default family labels.
    #[builder(default)]
    pub labels: Option<[String; 3]>,

    /// Maps each family index to its output slot.
    #[builder(default = "[0, 1, 2]")]
    pub order: [usize; 3],
}

/// One rendered pole figure.
#[derive(Clone, Debug)]
pub struct PoleFigureData {
    /// Family label, e.g. `<111>`.
    pub name: String,

    /// Stereographic intensity image in multiples of random.
    pub intensities: Array2<f64>,

    /// Rainbow-rendered ARGB raster, first row at the top.
    pub image: Array2<Argb>,
}

/// The three pole figures of a run together with their shared intensity
/// scale.
#[derive(Clone, Debug)]
pub struct PoleFigureSet {
    /// Minimum intensity over all three figures.
    pub min_scale: f64,

    /// Maximum intensity over all three figures.
    pub max_scale: f64,

    /// The figures, placed according to the configured output order.
    pub figures: Vec<PoleFigureData>,
}

// ========
// Pipeline
// ========

/// Renders the three standard pole figures of a set of orientations.
///
/// # Arguments
///
/// * `class` - The Laue class of the phase.
/// * `eulers` - The orientations in Bunge Euler angles, radians.
/// * `config` - Rendering parameters.
///
/// # Returns
///
/// The rendered figures on a shared intensity scale.
#[must_use]
pub fn generate_pole_figures(
    class: LaueClass,
    eulers: &[Euler],
    config: &PoleFigureConfiguration,
) -> PoleFigureSet {
    let names: [String; 3] = match &config.labels {
        Some(labels) => labels.clone(),
        None => class.default_pole_figure_names().map(String::from),
    };
    log::debug!(
        "generating {} pole figures {:?} for {} orientations",
        class,
        names,
        eulers.len()
    );

    let families = class.generate_sphere_coords(eulers);
    let intensities: Vec<Array2<f64>> = families[..]
        .par_iter()
        .map(|family| {
            let mut projection = ModifiedLambertProjection::from_points(
                family,
                config.lambert_dim,
                config.sphere_radius,
            );
            projection.normalize_squares_to_mrd();
            projection.create_stereographic_projection(config.image_dim)
        })
        .collect();

    let mut min_scale = f64::MAX;
    let mut max_scale = f64::MIN;
    for intensity in &intensities {
        let (lo, hi) = circle_min_max(intensity);
        min_scale = min_scale.min(lo);
        max_scale = max_scale.max(hi);
    }

    let rendered: Vec<PoleFigureData> = intensities
        .into_par_iter()
        .zip(names.to_vec())
        .map(|(intensity, name)| {
            let image = render_rgba_image(
                &intensity,
                min_scale,
                max_scale,
                config.num_colors,
                config.discrete,
            );
            PoleFigureData {
                name,
                intensities: intensity,
                image,
            }
        })
        .collect();

    // Place each family into its configured output slot.
    let mut figures = Vec::with_capacity(3);
    for slot in 0..3 {
        let family = config
            .order
            .iter()
            .position(|&o| o == slot)
            .unwrap_or(slot);
        figures.push(rendered[family].clone());
    }

    PoleFigureSet {
        min_scale,
        max_scale,
        figures,
    }
}

/// Minimum and maximum intensity over the pixels inside the projection
/// circle.
fn circle_min_max(intensity: &Array2<f64>) -> (f64, f64) {
    let dim = intensity.nrows();
    let res = 2.0 / dim as f64;
    let mut lo = f64::MAX;
    let mut hi = f64::MIN;
    for ((y, x), &value) in intensity.indexed_iter() {
        let ytmp = (y as f64 - dim as f64 / 2.0) * res + res / 2.0;
        let xtmp = (x as f64 - dim as f64 / 2.0) * res + res / 2.0;
        if xtmp * xtmp + ytmp * ytmp > 1.0 {
            continue;
        }
        lo = lo.min(value);
        hi = hi.max(value);
    }
    (lo, hi)
}

/// Maps an intensity image onto the rainbow colour table over the scale
/// `[min_scale, max_scale]`. Pixels outside the projection circle are white,
/// and rows are flipped so the first raster row is the top of the figure.
/// Discrete rendering floors into bands instead of rounding to the nearest
/// table entry.
fn render_rgba_image(
    intensity: &Array2<f64>,
    min_scale: f64,
    max_scale: f64,
    num_colors: usize,
    discrete: bool,
) -> Array2<Argb> {
    let colors = rainbow_color_table(num_colors);
    let dim = intensity.nrows();
    let res = 2.0 / dim as f64;
    let span = max_scale - min_scale;
    let mut image = Array2::from_elem((dim, dim), WHITE);
    for ((y, x), &value) in intensity.indexed_iter() {
        let ytmp = (y as f64 - dim as f64 / 2.0) * res + res / 2.0;
        let xtmp = (x as f64 - dim as f64 / 2.0) * res + res / 2.0;
        if xtmp * xtmp + ytmp * ytmp > 1.0 {
            continue;
        }
        let norm = if span > 0.0 {
            (value - min_scale) / span
        } else {
            0.0
        };
        let index = if discrete {
            ((norm * num_colors as f64) as usize).min(num_colors - 1)
        } else {
            ((norm * (num_colors - 1) as f64).round() as usize).min(num_colors - 1)
        };
        let [r, g, b] = colors[index];
        image[(dim - 1 - y, x)] = drgb(
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
            255,
        );
    }
    image
}
