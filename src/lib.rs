//! # laueops: crystallographic orientation and texture analysis
//!
//! `laueops` analyses crystallographic orientations under the point-group
//! symmetries of the Laue classes, with the following capabilities:
//! - symmetry-operator tables (quaternion, Rodrigues, and matrix form) for the
//!   Cubic m-3m, Hexagonal 6/mmm, Trigonal -3m, Monoclinic 2/m, and
//!   Triclinic -1 classes,
//! - orientation representation conversions (Bunge Euler angles, unit
//!   quaternions, axis-angle pairs, Rodrigues vectors, homochoric vectors, and
//!   passive orientation matrices),
//! - misorientation (disorientation) computation with a closed-form Cubic fast
//!   path,
//! - fundamental-zone reduction and homochoric binning for orientation and
//!   misorientation distribution functions,
//! - inverse-pole-figure and Rodrigues colour mapping with rasterised colour
//!   legends,
//! - the square Modified Lambert projection with stereographic and equal-area
//!   circular image export, and
//! - a parallel pole-figure rendering pipeline.
//!
//! Quaternions are stored scalar-last and compose in the passive convention
//! used throughout the orientation literature ($`P = +1`$ in the Rowenhorst
//! *et al.* conventions). All angles are in radians unless a function name
//! says otherwise.

pub mod color;
pub mod lambert;
pub mod laue;
pub mod orientation;
pub mod polefigure;
