//! Orientation representations and the conversions between them.
//!
//! All conversions follow the $`P = +1`$ sign convention of Rowenhorst *et al.*
//! Quaternions are scalar-last, Euler angles are Bunge $`ZXZ`$ triplets in
//! radians, and orientation matrices are passive (they transform sample-frame
//! coordinates into crystal-frame coordinates).

use std::f64::consts::PI;
use std::ops::{Mul, Neg};

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "orientation_tests.rs"]
mod orientation_tests;

/// Threshold below which a rotation is considered the identity.
const IDENTITY_THRESH: f64 = 1e-12;

/// Rodrigues-vector magnitude beyond which the rotation is treated as a
/// half-turn. The symmetry-operator tables encode $`180^\circ`$ operators with
/// large finite sentinel components of order $`10^{10}`$.
const ROD_HALF_TURN_THRESH: f64 = 1e9;

/// Coefficients of the inverse polynomial fit used to recover the rotation
/// half-angle cosine from the squared homochoric magnitude.
const HO_TO_AX_FIT: [f64; 16] = [
    1.000_000_000_001_885_2,
    -0.500_000_000_219_484_7,
    -0.024_999_992_127_593_126,
    -0.003_928_701_544_781_374,
    -0.000_815_270_153_545_043_8,
    -0.000_200_950_042_611_971_2,
    -0.000_023_979_867_760_717_56,
    -0.000_082_028_689_266_058_41,
    0.000_124_487_150_420_900_92,
    -0.000_174_911_421_482_257_7,
    0.000_170_348_193_414_005_4,
    -0.000_120_620_650_041_168_28,
    0.000_059_719_705_868_660_826,
    -0.000_019_807_567_239_656_47,
    0.000_003_953_714_684_212_874,
    -0.000_000_365_550_014_397_195_44,
];

// ================
// Type definitions
// ================

/// A unit quaternion stored scalar-last as $`(x, y, z, w)`$.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quat {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// The identity rotation.
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Returns the conjugate quaternion, which represents the inverse
    /// rotation for unit quaternions.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Returns the quaternion scaled to unit norm.
    #[must_use]
    pub fn normalised(&self) -> Self {
        let n = self.norm();
        Self::new(self.x / n, self.y / n, self.z / n, self.w / n)
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Returns the quaternion with every component replaced by its absolute
    /// value. Only meaningful as an intermediate in symmetry reductions.
    #[must_use]
    pub fn element_wise_abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs(), self.w.abs())
    }

    /// The vector part as a [`Vector3`].
    pub fn vector_part(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl Neg for Quat {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

/// Quaternion composition in the passive orientation convention: `p * q` is
/// the orientation obtained by applying `p` first and `q` second, which is the
/// Hamilton product $`q \otimes p`$.
impl Mul for Quat {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            rhs.x * self.w + rhs.w * self.x + rhs.z * self.y - rhs.y * self.z,
            rhs.y * self.w + rhs.w * self.y + rhs.x * self.z - rhs.z * self.x,
            rhs.z * self.w + rhs.w * self.z + rhs.y * self.x - rhs.x * self.y,
            rhs.w * self.w - rhs.x * self.x - rhs.y * self.y - rhs.z * self.z,
        )
    }
}

/// A Bunge $`ZXZ`$ Euler-angle triplet in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Euler {
    pub phi1: f64,
    pub phi: f64,
    pub phi2: f64,
}

impl Euler {
    pub fn new(phi1: f64, phi: f64, phi2: f64) -> Self {
        Self { phi1, phi, phi2 }
    }
}

/// A rotation given by a unit axis and an angle in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    pub axis: Vector3<f64>,
    pub angle: f64,
}

impl AxisAngle {
    pub fn new(axis: Vector3<f64>, angle: f64) -> Self {
        Self { axis, angle }
    }

    /// The zero rotation about the default $`[001]`$ axis.
    pub fn identity() -> Self {
        Self::new(Vector3::new(0.0, 0.0, 1.0), 0.0)
    }
}

// ===========
// Conversions
// ===========

/// Converts Bunge Euler angles to a unit quaternion.
///
/// # Arguments
///
/// * `eu` - A Bunge Euler-angle triplet.
///
/// # Returns
///
/// The unit quaternion in the positive-scalar hemisphere.
#[must_use]
pub fn eu2qu(eu: Euler) -> Quat {
    let ss = (0.5 * eu.phi).sin();
    let cc = (0.5 * eu.phi).cos();
    let sigma = 0.5 * (eu.phi1 + eu.phi2);
    let delta = 0.5 * (eu.phi1 - eu.phi2);
    let q = Quat::new(
        -ss * delta.cos(),
        -ss * delta.sin(),
        -cc * sigma.sin(),
        cc * sigma.cos(),
    );
    if q.w < 0.0 {
        -q
    } else {
        q
    }
}

/// Converts a unit quaternion to Bunge Euler angles, each wrapped into
/// $`[0, 2\pi)`$.
#[must_use]
pub fn qu2eu(q: Quat) -> Euler {
    let q03 = q.w * q.w + q.z * q.z;
    let q12 = q.x * q.x + q.y * q.y;
    let chi = (q03 * q12).sqrt();
    let (phi1, phi, phi2) = if chi.abs() < IDENTITY_THRESH && q12.abs() < IDENTITY_THRESH {
        ((-2.0 * q.w * q.z).atan2(q.w * q.w - q.z * q.z), 0.0, 0.0)
    } else if chi.abs() < IDENTITY_THRESH && q03.abs() < IDENTITY_THRESH {
        ((2.0 * q.x * q.y).atan2(q.x * q.x - q.y * q.y), PI, 0.0)
    } else {
        (
            (q.x * q.z - q.w * q.y).atan2(-q.w * q.x - q.y * q.z),
            (2.0 * chi).atan2(q03 - q12),
            (q.w * q.y + q.x * q.z).atan2(q.y * q.z - q.w * q.x),
        )
    };
    Euler::new(wrap_two_pi(phi1), wrap_two_pi(phi), wrap_two_pi(phi2))
}

/// Converts Bunge Euler angles to a passive orientation matrix.
#[must_use]
pub fn eu2om(eu: Euler) -> Matrix3<f64> {
    let (s1, c1) = eu.phi1.sin_cos();
    let (s, c) = eu.phi.sin_cos();
    let (s2, c2) = eu.phi2.sin_cos();
    Matrix3::new(
        c1 * c2 - s1 * s2 * c,
        s1 * c2 + c1 * s2 * c,
        s2 * s,
        -c1 * s2 - s1 * c2 * c,
        -s1 * s2 + c1 * c2 * c,
        c2 * s,
        s1 * s,
        -c1 * s,
        c,
    )
}

/// Converts a unit quaternion to a passive orientation matrix.
#[must_use]
pub fn qu2om(q: Quat) -> Matrix3<f64> {
    let qbar = q.w * q.w - (q.x * q.x + q.y * q.y + q.z * q.z);
    Matrix3::new(
        qbar + 2.0 * q.x * q.x,
        2.0 * (q.x * q.y - q.w * q.z),
        2.0 * (q.x * q.z + q.w * q.y),
        2.0 * (q.x * q.y + q.w * q.z),
        qbar + 2.0 * q.y * q.y,
        2.0 * (q.y * q.z - q.w * q.x),
        2.0 * (q.x * q.z - q.w * q.y),
        2.0 * (q.y * q.z + q.w * q.x),
        qbar + 2.0 * q.z * q.z,
    )
}

/// Converts a unit quaternion to an axis-angle pair. The angle lies in
/// $`[0, 2\pi]`$; callers that need the disorientation convention fold angles
/// above $`\pi`$ themselves.
#[must_use]
pub fn qu2ax(q: Quat) -> AxisAngle {
    let omega = 2.0 * q.w.clamp(-1.0, 1.0).acos();
    if omega.abs() < IDENTITY_THRESH {
        return AxisAngle::identity();
    }
    let vmag = (q.x * q.x + q.y * q.y + q.z * q.z).sqrt();
    if vmag < IDENTITY_THRESH {
        return AxisAngle::identity();
    }
    let s = if q.w < 0.0 { -1.0 } else { 1.0 } / vmag;
    AxisAngle::new(Vector3::new(s * q.x, s * q.y, s * q.z), omega)
}

/// Converts an axis-angle pair to a unit quaternion.
#[must_use]
pub fn ax2qu(ax: AxisAngle) -> Quat {
    if ax.angle.abs() < IDENTITY_THRESH {
        return Quat::identity();
    }
    let s = (0.5 * ax.angle).sin();
    Quat::new(
        ax.axis.x * s,
        ax.axis.y * s,
        ax.axis.z * s,
        (0.5 * ax.angle).cos(),
    )
}

/// Converts an axis-angle pair to a scaled Rodrigues vector
/// $`\hat{n} \tan(\omega / 2)`$. Half-turns produce very large but finite
/// components.
#[must_use]
pub fn ax2ro(ax: AxisAngle) -> Vector3<f64> {
    if ax.angle.abs() < IDENTITY_THRESH {
        return Vector3::zeros();
    }
    ax.axis * (0.5 * ax.angle).tan()
}

/// Converts a scaled Rodrigues vector to an axis-angle pair.
#[must_use]
pub fn ro2ax(rod: Vector3<f64>) -> AxisAngle {
    let mag = rod.norm();
    if mag < IDENTITY_THRESH {
        return AxisAngle::identity();
    }
    if mag > ROD_HALF_TURN_THRESH {
        return AxisAngle::new(rod / mag, PI);
    }
    AxisAngle::new(rod / mag, 2.0 * mag.atan())
}

/// Converts a scaled Rodrigues vector to a homochoric vector
/// $`\hat{n}\,\left(\tfrac{3}{4}(\omega - \sin\omega)\right)^{1/3}`$.
#[must_use]
pub fn ro2ho(rod: Vector3<f64>) -> Vector3<f64> {
    let ax = ro2ax(rod);
    let f = 0.75 * (ax.angle - ax.angle.sin());
    ax.axis * f.cbrt()
}

/// Converts a homochoric vector to an axis-angle pair via the inverse
/// polynomial fit.
#[must_use]
pub fn ho2ax(ho: Vector3<f64>) -> AxisAngle {
    let hmag2 = ho.norm_squared();
    if hmag2 < IDENTITY_THRESH {
        return AxisAngle::identity();
    }
    let mut hm = hmag2;
    let mut s = HO_TO_AX_FIT[0] + HO_TO_AX_FIT[1] * hmag2;
    for coeff in &HO_TO_AX_FIT[2..] {
        hm *= hmag2;
        s += coeff * hm;
    }
    AxisAngle::new(ho / hmag2.sqrt(), 2.0 * s.clamp(-1.0, 1.0).acos())
}

/// Converts a homochoric vector to a scaled Rodrigues vector.
#[must_use]
pub fn ho2ro(ho: Vector3<f64>) -> Vector3<f64> {
    ax2ro(ho2ax(ho))
}

/// Converts a scaled Rodrigues vector to Bunge Euler angles.
#[must_use]
pub fn ro2eu(rod: Vector3<f64>) -> Euler {
    qu2eu(ax2qu(ro2ax(rod)))
}

/// Converts Bunge Euler angles to a scaled Rodrigues vector.
#[must_use]
pub fn eu2ro(eu: Euler) -> Vector3<f64> {
    ax2ro(qu2ax(eu2qu(eu)))
}

/// Composes two scaled Rodrigues vectors,
/// $`(\mathbf{r}_1 + \mathbf{r}_2 - \mathbf{r}_1 \times \mathbf{r}_2) /
/// (1 - \mathbf{r}_1 \cdot \mathbf{r}_2)`$.
///
/// The composition of perpendicular half-turns has a vanishing denominator;
/// the resulting components grow without bound exactly as the sentinel
/// encoding of the operator tables expects, so no special casing is applied.
#[must_use]
pub fn compose_rodrigues(r1: Vector3<f64>, r2: Vector3<f64>) -> Vector3<f64> {
    (r1 + r2 - r1.cross(&r2)) / (1.0 - r1.dot(&r2))
}

/// Wraps an angle into $`[0, 2\pi)`$.
#[must_use]
pub fn wrap_two_pi(angle: f64) -> f64 {
    let wrapped = angle % (2.0 * PI);
    if wrapped < 0.0 {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

/// Returns the polar angle $`\chi`$ and azimuth $`\eta`$ of a unit vector,
/// with $`\chi`$ measured from $`+z`$.
#[must_use]
pub fn polar_angles(p: &Vector3<f64>) -> (f64, f64) {
    (p.z.clamp(-1.0, 1.0).acos(), p.y.atan2(p.x))
}

/// Converts degrees to radians.
#[must_use]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Converts radians to degrees.
#[must_use]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}
