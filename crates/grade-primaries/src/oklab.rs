//! OkLab perceptual color space (Björn Ottosson, 2020).
//!
//! Defined relative to linear sRGB. L is lightness in [0, 1] for
//! in-gamut colors, a/b are opponent axes.
//!
//! ```text
//! lms  = M1 * rgb
//! lab  = M2 * cbrt(lms)
//! ```
//!
//! # Example
//!
//! ```rust
//! use grade_math::Vec3;
//! use grade_primaries::oklab;
//!
//! let lab = oklab::srgb_to_oklab(Vec3::ONE);
//! assert!((lab.x - 1.0).abs() < 1e-4);
//! assert!(lab.y.abs() < 1e-4 && lab.z.abs() < 1e-4);
//! ```

use grade_math::{Mat3, Vec3};

/// Linear sRGB to OkLab cone responses.
pub const SRGB_TO_OKLAB_LMS: Mat3 = Mat3::from_rows([
    [0.4122214708, 0.5363325363, 0.0514459929],
    [0.2119034982, 0.6806995451, 0.1073969566],
    [0.0883024619, 0.2817188376, 0.6299787005],
]);

/// Nonlinear OkLab cone responses to Lab.
pub const OKLAB_LMS_TO_LAB: Mat3 = Mat3::from_rows([
    [0.2104542553, 0.7936177850, -0.0040720468],
    [1.9779984951, -2.4285922050, 0.4505937099],
    [0.0259040371, 0.7827717662, -0.8086757660],
]);

/// Lab to nonlinear OkLab cone responses.
pub const OKLAB_LAB_TO_LMS: Mat3 = Mat3::from_rows([
    [1.0, 0.3963377774, 0.2158037573],
    [1.0, -0.1055613458, -0.0638541728],
    [1.0, -0.0894841775, -1.2914855480],
]);

/// OkLab cone responses to linear sRGB.
pub const OKLAB_LMS_TO_SRGB: Mat3 = Mat3::from_rows([
    [4.0767416621, -3.3077115913, 0.2309699292],
    [-1.2684380046, 2.6097574011, -0.3413193965],
    [-0.0041960863, -0.7034186147, 1.7076147010],
]);

/// Linear sRGB to OkLab.
#[inline]
pub fn srgb_to_oklab(rgb: Vec3) -> Vec3 {
    let lms = (SRGB_TO_OKLAB_LMS * rgb).map(f32::cbrt);
    OKLAB_LMS_TO_LAB * lms
}

/// OkLab to linear sRGB.
#[inline]
pub fn oklab_to_srgb(lab: Vec3) -> Vec3 {
    let lms = (OKLAB_LAB_TO_LMS * lab).map(|c| c * c * c);
    OKLAB_LMS_TO_SRGB * lms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black() {
        let lab = srgb_to_oklab(Vec3::ZERO);
        assert!(lab.abs().max_element() < 1e-7);
    }

    #[test]
    fn test_red_reference() {
        // published OkLab of sRGB red
        let lab = srgb_to_oklab(Vec3::X);
        assert!((lab.x - 0.627955).abs() < 1e-4);
        assert!((lab.y - 0.224863).abs() < 1e-4);
        assert!((lab.z - 0.125846).abs() < 1e-4);
    }

    #[test]
    fn test_inverse_matrices() {
        let d = OKLAB_LMS_TO_SRGB.mul_mat(&SRGB_TO_OKLAB_LMS).max_abs_diff(&Mat3::IDENTITY);
        assert!(d < 1e-5);
        let d = OKLAB_LAB_TO_LMS.mul_mat(&OKLAB_LMS_TO_LAB).max_abs_diff(&Mat3::IDENTITY);
        assert!(d < 1e-5);
    }
}
