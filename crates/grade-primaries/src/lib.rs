//! # grade-primaries
//!
//! Color primaries, the named color space matrices used by the grading
//! pipeline, luminance weights and OkLab.
//!
//! # Matrices
//!
//! Literal matrices ([`SRGB_TO_XYZ`], [`XYZ_TO_REC2020`], [`AP0_TO_AP1`], ...)
//! carry published coefficients. Compound matrices ([`SRGB_TO_REC2020`],
//! [`REC2020_TO_AP0`], ...) are `const` products of those constituents so
//! the two can never drift apart:
//!
//! ```rust
//! use grade_primaries::{SRGB_TO_REC2020, SRGB_TO_XYZ, XYZ_TO_REC2020};
//!
//! assert_eq!(SRGB_TO_REC2020, XYZ_TO_REC2020.mul_mat(&SRGB_TO_XYZ));
//! ```
//!
//! # Primaries
//!
//! | Color Space | White | Role |
//! |-------------|-------|------|
//! | sRGB / Rec.709 | D65 | Display space, legacy grading space |
//! | Rec.2020 | D65 | Grading space |
//! | ACES AP0 | D60 | ACES glow and red modifier |
//! | ACES AP1 | D60 | ACES tone scale |
//!
//! [`rgb_to_xyz_matrix`] derives a matrix from chromaticities; the tests
//! use it to check the literal constants.
//!
//! # Dependencies
//!
//! - `grade-math` - [`Mat3`] and [`Vec3`]
//!
//! # Used By
//!
//! - `grade-tonemap` - ACES and luminance-based operators
//! - `grade-color` - grading space selection, white balance, gamut mapping

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod matrices;
pub mod oklab;

pub use matrices::*;

use grade_math::{Mat3, Vec3};

/// RGB color space primaries as CIE xy chromaticities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y)
    pub r: (f32, f32),
    /// Green primary (x, y)
    pub g: (f32, f32),
    /// Blue primary (x, y)
    pub b: (f32, f32),
    /// White point (x, y)
    pub w: (f32, f32),
    /// Color space name
    pub name: &'static str,
}

impl Primaries {
    /// White point as XYZ (Y=1).
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w.0, self.w.1)
    }
}

// ============================================================================
// White Points & Primaries
// ============================================================================

/// D65 white point (x, y).
pub const D65_XY: (f32, f32) = (0.31270, 0.32900);

/// ACES white point, approximately D60 (x, y).
pub const D60_XY: (f32, f32) = (0.32168, 0.33767);

/// sRGB / Rec.709 primaries.
pub const SRGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "sRGB",
};

/// Rec.2020 primaries.
pub const REC2020: Primaries = Primaries {
    r: (0.7080, 0.2920),
    g: (0.1700, 0.7970),
    b: (0.1310, 0.0460),
    w: D65_XY,
    name: "Rec.2020",
};

/// ACES AP0 primaries (ACES 2065-1).
pub const ACES_AP0: Primaries = Primaries {
    r: (0.7347, 0.2653),
    g: (0.0000, 1.0000),
    b: (0.0001, -0.0770),
    w: D60_XY,
    name: "ACES AP0",
};

/// ACES AP1 primaries (ACEScg).
pub const ACES_AP1: Primaries = Primaries {
    r: (0.7130, 0.2930),
    g: (0.1650, 0.8300),
    b: (0.1280, 0.0440),
    w: D60_XY,
    name: "ACES AP1",
};

// ============================================================================
// Luminance Weights
// ============================================================================

/// Rec.709 / sRGB luminance weights (second row of [`SRGB_TO_XYZ`]).
pub const LUMINANCE_REC709: Vec3 = Vec3::new(0.2126730, 0.7151520, 0.0721750);

/// Rec.2020 luminance weights (second row of [`REC2020_TO_XYZ`]).
pub const LUMINANCE_REC2020: Vec3 = Vec3::new(0.2627002, 0.6779981, 0.0593017);

/// ACES AP1 luminance weights.
pub const LUMINANCE_AP1: Vec3 = Vec3::new(0.272229, 0.674082, 0.0536895);

// ============================================================================
// Matrix Derivation
// ============================================================================

fn xy_to_xyz(x: f32, y: f32) -> Vec3 {
    if y.abs() < 1e-10 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Derives the RGB to XYZ matrix for a set of primaries.
///
/// # Algorithm
///
/// 1. Convert the xy chromaticities to XYZ with Y=1
/// 2. Solve `M * S = W` for the per-primary scale `S`
/// 3. Scale the primary columns by `S`
///
/// # Example
///
/// ```rust
/// use grade_primaries::{rgb_to_xyz_matrix, SRGB};
/// use grade_math::Vec3;
///
/// let white = rgb_to_xyz_matrix(&SRGB) * Vec3::ONE;
/// assert!((white.y - 1.0).abs() < 1e-4);
/// ```
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> Mat3 {
    let r = xy_to_xyz(primaries.r.0, primaries.r.1);
    let g = xy_to_xyz(primaries.g.0, primaries.g.1);
    let b = xy_to_xyz(primaries.b.0, primaries.b.1);
    let m = Mat3::from_row_vecs(r, g, b).transpose();
    let s = m.inverse().unwrap_or(Mat3::IDENTITY) * primaries.white_xyz();
    Mat3::from_row_vecs(r * s.x, g * s.y, b * s.z).transpose()
}

/// Derives the XYZ to RGB matrix, the inverse of [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(primaries: &Primaries) -> Mat3 {
    rgb_to_xyz_matrix(primaries).inverse().unwrap_or(Mat3::IDENTITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_matrix_matches_constant() {
        let m = rgb_to_xyz_matrix(&SRGB);
        assert!(m.max_abs_diff(&SRGB_TO_XYZ) < 1e-3);
    }

    #[test]
    fn test_rec2020_matrix_matches_constant() {
        let m = rgb_to_xyz_matrix(&REC2020);
        assert!(m.max_abs_diff(&REC2020_TO_XYZ) < 1e-3);
    }

    #[test]
    fn test_ap1_matrix_matches_constant() {
        let m = rgb_to_xyz_matrix(&ACES_AP1);
        assert!(m.max_abs_diff(&AP1_TO_XYZ) < 1e-3);
    }

    #[test]
    fn test_luminance_weights_are_y_rows() {
        assert!((SRGB_TO_XYZ.row(1) - LUMINANCE_REC709).abs().max_element() < 1e-6);
        assert!((REC2020_TO_XYZ.row(1) - LUMINANCE_REC2020).abs().max_element() < 1e-6);
        assert!((AP1_TO_XYZ.row(1) - LUMINANCE_AP1).abs().max_element() < 1e-6);
    }

    #[test]
    fn test_luminance_weights_sum_to_one() {
        for w in [LUMINANCE_REC709, LUMINANCE_REC2020, LUMINANCE_AP1] {
            assert!((w.dot(Vec3::ONE) - 1.0).abs() < 1e-5);
        }
    }
}
