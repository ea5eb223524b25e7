//! Scalar and vector interpolation helpers.
//!
//! These mirror the shader intrinsics the grading math was written
//! against, so formulas can be transcribed without reinterpretation.
//!
//! ```rust
//! use grade_math::{mix, saturate, smoothstep};
//!
//! assert_eq!(mix(0.0, 10.0, 0.5), 5.0);
//! assert_eq!(saturate(1.5), 1.0);
//! assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
//! ```

use crate::Vec3;

/// Linear interpolation: `a + (b - a) * t`, extrapolating outside [0, 1].
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Alias of [`lerp`] named after the shader intrinsic.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    lerp(a, b, t)
}

/// Component-wise [`mix`] of two triplets with a scalar weight.
#[inline]
pub fn mix3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a.lerp(b, t)
}

/// Clamps to [0, 1].
#[inline]
pub fn saturate(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Hermite interpolation between `edge0` and `edge1`.
///
/// # Formula
///
/// `t = saturate((x - edge0) / (edge1 - edge0)); t * t * (3 - 2t)`
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = saturate((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// Sign of `x`: -1, 0 or 1.
#[inline]
pub fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Fractional part, `x - floor(x)`.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}
