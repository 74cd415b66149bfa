//! Orientation colour mapping: packed ARGB helpers, the rainbow intensity
//! colour table, inverse-pole-figure and Rodrigues colour schemes, and
//! rasterised colour legends.

use std::f64::consts::FRAC_1_SQRT_2;

use nalgebra::Vector3;
use ndarray::Array2;

use crate::laue::{LaueClass, LaueError};
use crate::orientation::{deg_to_rad, eu2qu, polar_angles, qu2om, rad_to_deg, Euler};

#[cfg(test)]
#[path = "color_tests.rs"]
mod color_tests;

/// A colour packed as `0xAARRGGBB`.
pub type Argb = u32;

/// Packs channel values into an [`Argb`] colour.
#[must_use]
pub fn drgb(r: u8, g: u8, b: u8, a: u8) -> Argb {
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

pub fn alpha(c: Argb) -> u8 {
    (c >> 24) as u8
}

pub fn red(c: Argb) -> u8 {
    (c >> 16) as u8
}

pub fn green(c: Argb) -> u8 {
    (c >> 8) as u8
}

pub fn blue(c: Argb) -> u8 {
    c as u8
}

/// Opaque white, used for raster background and out-of-region pixels.
pub const WHITE: Argb = 0xFFFF_FFFF;

// ============
// Colour table
// ============

/// Control nodes of the rainbow colour table, blue through red.
const RAINBOW_NODES: [[f64; 3]; 5] = [
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
];

/// Generates `num_colors` RGB triplets interpolated linearly through the
/// rainbow control nodes, low intensity mapping to blue and high to red.
#[must_use]
pub fn rainbow_color_table(num_colors: usize) -> Vec<[f64; 3]> {
    let mut colors = Vec::with_capacity(num_colors);
    if num_colors == 1 {
        colors.push(RAINBOW_NODES[0]);
        return colors;
    }
    let spans = (RAINBOW_NODES.len() - 1) as f64;
    for i in 0..num_colors {
        let pos = i as f64 / (num_colors - 1) as f64 * spans;
        let node = (pos.floor() as usize).min(RAINBOW_NODES.len() - 2);
        let frac = pos - node as f64;
        let lo = RAINBOW_NODES[node];
        let hi = RAINBOW_NODES[node + 1];
        colors.push([
            lo[0] + frac * (hi[0] - lo[0]),
            lo[1] + frac * (hi[1] - lo[1]),
            lo[2] + frac * (hi[2] - lo[2]),
        ]);
    }
    colors
}

// ===========
// IPF colours
// ===========

/// Computes the inverse-pole-figure colour of an orientation viewed along a
/// sample reference direction.
///
/// The orientation is swept through the symmetry operators of `class` until
/// the rotated reference direction lands in the standard unit triangle, whose
/// polar coordinates are then blended into the familiar red-green-blue
/// scheme.
///
/// # Arguments
///
/// * `class` - The Laue class of the phase.
/// * `eu` - The orientation in Bunge Euler angles.
/// * `ref_direction` - The sample reference direction, typically a unit axis.
/// * `degrees` - Whether `eu` is given in degrees rather than radians.
///
/// # Returns
///
/// The packed ARGB colour.
#[must_use]
pub fn generate_ipf_color(
    class: LaueClass,
    eu: Euler,
    ref_direction: Vector3<f64>,
    degrees: bool,
) -> Argb {
    let eu = if degrees {
        Euler::new(
            deg_to_rad(eu.phi1),
            deg_to_rad(eu.phi),
            deg_to_rad(eu.phi2),
        )
    } else {
        eu
    };
    let table = class.table();
    let q1 = eu2qu(eu);
    let mut chi = 0.0;
    let mut eta = 0.0;
    for sym in &table.quat_ops {
        let g = qu2om(*sym * q1);
        let mut p = (g * ref_direction).normalize();
        if table.has_inversion && p.z < 0.0 {
            p = -p;
        }
        let (p_chi, p_eta) = polar_angles(&p);
        chi = p_chi;
        eta = p_eta;
        if class.in_unit_triangle(eta, chi) {
            break;
        }
    }

    let (eta_min, eta_max) = class.ipf_eta_range();
    let chi_frac = chi / class.ipf_chi_max(eta);
    let mut rgb = [
        1.0 - chi_frac,
        0.0,
        (eta - eta_min).abs() / (eta_max - eta_min),
    ];
    rgb[1] = (1.0 - rgb[2]) * chi_frac;
    rgb[2] *= chi_frac;
    for c in &mut rgb {
        *c = c.sqrt();
    }
    let max = rgb[0].max(rgb[1]).max(rgb[2]);
    for c in &mut rgb {
        *c /= max;
    }
    drgb(
        (rgb[0] * 255.0) as u8,
        (rgb[1] * 255.0) as u8,
        (rgb[2] * 255.0) as u8,
        255,
    )
}

/// Computes the Rodrigues-space colour of an orientation: each component of
/// the Rodrigues vector is scaled linearly across the homochoric grid extent
/// of the class and mapped to one colour channel.
#[must_use]
pub fn generate_rodrigues_color(class: LaueClass, rod: Vector3<f64>) -> Argb {
    let init = class.table().odf_dim_init;
    let channel = |r: f64, half: f64| ((r + half) / (2.0 * half) * 255.0) as u8;
    drgb(
        channel(rod.x, init[0]),
        channel(rod.y, init[1]),
        channel(rod.z, init[2]),
        255,
    )
}

// =======
// Legends
// =======

/// Rasterises the IPF colour legend of a Laue class into a square ARGB image
/// of edge `image_dim`, row-major with the first row at the top.
///
/// # Errors
///
/// Legends are implemented for the Cubic and Triclinic classes.
pub fn generate_ipf_triangle_legend(
    class: LaueClass,
    image_dim: usize,
) -> Result<Array2<Argb>, LaueError> {
    match class {
        LaueClass::Cubic => Ok(cubic_triangle_legend(image_dim)),
        LaueClass::Triclinic => Ok(triclinic_circle_legend(image_dim)),
        _ => Err(LaueError::UnsupportedOperation {
            class,
            operation: "generate_ipf_triangle_legend",
        }),
    }
}

/// The cubic [001]-[011]-[111] stereographic triangle.
fn cubic_triangle_legend(image_dim: usize) -> Array2<Argb> {
    let mut image = Array2::from_elem((image_dim, image_dim), WHITE);
    let index_const1 = 0.414 / image_dim as f64;
    let index_const2 = 0.207 / image_dim as f64;
    for y_index in 0..image_dim {
        // Raster rows run top to bottom while the triangle's chi axis grows
        // upward.
        let row = image_dim - 1 - y_index;
        for x_index in 0..image_dim {
            let x = x_index as f64 * index_const1 + index_const2;
            let y = y_index as f64 * index_const1 + index_const2;
            let sum = x * x + y * y;
            let a = sum + 1.0;
            let b = 2.0 * sum;
            let c = sum - 1.0;
            let val = (-b + (b * b - 4.0 * a * c).sqrt()) / (2.0 * a);
            let p = Vector3::new((1.0 + val) * x, (1.0 + val) * y, val).normalize();

            let phi_deg = rad_to_deg((p.x * -FRAC_1_SQRT_2 + p.z * FRAC_1_SQRT_2).acos());
            let x1 = p.x / FRAC_1_SQRT_2;
            let theta_deg = rad_to_deg((x1 / (x1 * x1 + p.y * p.y).sqrt()).clamp(-1.0, 1.0).acos());

            if phi_deg < 45.0 || phi_deg > 90.0 || theta_deg > 35.26 {
                continue;
            }
            let mut cd = [p.x.abs(), p.y.abs(), p.z.abs()];
            cd.sort_by(f64::total_cmp);
            let direction = Vector3::new(cd[0], cd[1], cd[2]);
            image[(row, x_index)] = generate_ipf_color(
                LaueClass::Cubic,
                Euler::new(0.0, 0.0, 0.0),
                direction,
                false,
            );
        }
    }
    image
}

/// The triclinic legend covers the whole upper hemisphere, rendered as the
/// stereographic unit disc.
fn triclinic_circle_legend(image_dim: usize) -> Array2<Argb> {
    let mut image = Array2::from_elem((image_dim, image_dim), WHITE);
    let res = 2.0 / image_dim as f64;
    for y_index in 0..image_dim {
        let row = image_dim - 1 - y_index;
        for x_index in 0..image_dim {
            let x = (x_index as f64 - image_dim as f64 / 2.0) * res + res / 2.0;
            let y = (y_index as f64 - image_dim as f64 / 2.0) * res + res / 2.0;
            let sum = x * x + y * y;
            if sum > 1.0 {
                continue;
            }
            let direction = Vector3::new(
                2.0 * x / (1.0 + sum),
                2.0 * y / (1.0 + sum),
                (1.0 - sum) / (1.0 + sum),
            );
            image[(row, x_index)] = generate_ipf_color(
                LaueClass::Triclinic,
                Euler::new(0.0, 0.0, 0.0),
                direction,
                false,
            );
        }
    }
    image
}
