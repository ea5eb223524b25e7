//! Simple closed-form curves.

use grade_math::Vec3;
use grade_primaries::LUMINANCE_REC709;

/// Clamps to [0, 1].
#[inline]
pub fn linear(x: Vec3) -> Vec3 {
    x.clamp01()
}

/// Reinhard on luminance: `x / (1 + Y)`.
///
/// Scaling all channels by the same factor keeps hue, but saturated
/// colors can still exceed 1.
#[inline]
pub fn reinhard(x: Vec3) -> Vec3 {
    x / (1.0 + x.dot(LUMINANCE_REC709))
}

/// Narkowicz 2015 fit of the ACES filmic curve.
///
/// # Formula
///
/// `(x * (2.51x + 0.03)) / (x * (2.43x + 0.59) + 0.14)`
#[inline]
pub fn filmic(x: Vec3) -> Vec3 {
    const A: f32 = 2.51;
    const B: f32 = 0.03;
    const C: f32 = 2.43;
    const D: f32 = 0.59;
    const E: f32 = 0.14;
    (x * (x * A + B)) / (x * (x * C + D) + E)
}
