//! Chromaticity and chromatic adaptation helpers.
//!
//! White balance is expressed as a shift along the CIE daylight locus
//! (temperature) and perpendicular to it (tint), then applied as a von
//! Kries gain in a cone space:
//!
//! ```text
//! M = cone_to_rgb * diag(reference_white_lms / target_white_lms) * rgb_to_cone
//! ```
//!
//! # Usage
//!
//! ```rust
//! use grade_math::{xyy_to_xyz, xyz_to_xyy, Vec3};
//!
//! let d65 = xyy_to_xyz(Vec3::new(0.31271, 0.32902, 1.0));
//! let back = xyz_to_xyy(d65);
//! assert!((back.x - 0.31271).abs() < 1e-5);
//! ```

use crate::{Mat3, Vec3};

// ============================================================================
// White points
// ============================================================================

/// D65 white chromaticity (CIE 1931 xy).
pub const D65_XY: [f32; 2] = [0.31271, 0.32902];

// ============================================================================
// Chromaticity conversions
// ============================================================================

/// XYZ to xyY. The chromaticity denominator is floored at `1e-5`.
#[inline]
pub fn xyz_to_xyy(v: Vec3) -> Vec3 {
    let sum = (v.x + v.y + v.z).max(1e-5);
    Vec3::new(v.x / sum, v.y / sum, v.y)
}

/// xyY to XYZ. The `y` chromaticity is floored at `1e-5`.
#[inline]
pub fn xyy_to_xyz(v: Vec3) -> Vec3 {
    let a = v.z / v.y.max(1e-5);
    Vec3::new(v.x * a, v.z, (1.0 - v.x - v.y) * a)
}

/// `y` chromaticity of the CIE daylight locus at `x`.
///
/// # Formula
///
/// `y = 2.87x - 3x^2 - 0.275`
#[inline]
pub fn daylight_locus_y(x: f32) -> f32 {
    2.87 * x - 3.0 * x * x - 0.275
}

/// Von Kries adaptation matrix in the cone space given by `rgb_to_cone`.
///
/// Maps colors lit by `target_white` (cone responses) so that it appears
/// as `reference_white`. `cone_to_rgb` must be the inverse of `rgb_to_cone`.
pub fn von_kries(
    rgb_to_cone: &Mat3,
    cone_to_rgb: &Mat3,
    reference_white: Vec3,
    target_white: Vec3,
) -> Mat3 {
    let gain = Mat3::from_diagonal(reference_white / target_white);
    cone_to_rgb.mul_mat(&gain).mul_mat(rgb_to_cone)
}
