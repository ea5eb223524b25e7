//! Perceptual adjustment stages.
//!
//! Each stage is a pure function of a linear color and its parameters.
//! The pipeline applies them in this order:
//!
//! ```text
//! exposure -> night adaptation -> (grading space) -> white balance
//!   -> channel mixer -> tonal ranges -> LogC { CDL -> contrast }
//!   -> vibrance -> saturation -> clamp -> curves
//! ```
//!
//! Stages that depend on luminance take the weights of the working space.

use grade_math::{Mat3, Vec3, daylight_locus_y, smoothstep, von_kries, xyy_to_xyz};
use grade_primaries::{
    CAT16_TO_REC2020, CAT16_TO_SRGB, REC2020_TO_CAT16, SRGB_TO_CAT16, XYZ_TO_CAT16,
};
use grade_transfer::acescct;

use crate::WorkingSpace;

/// D65 white in CIECAT16 cone space.
pub const D65_LMS_CAT16: Vec3 = Vec3::new(0.975533, 1.016483, 1.084837);

// ============================================================================
// Exposure & white balance
// ============================================================================

/// Scales by `2^stops`.
#[inline]
pub fn exposure(v: Vec3, stops: f32) -> Vec3 {
    v * stops.exp2()
}

/// Chromatic adaptation matrix for a temperature/tint shift.
///
/// Temperature moves the assumed illuminant along the daylight locus (warm
/// for negative values), tint moves it perpendicular to it (toward green
/// for positive values). Both are in [-1, 1].
pub fn white_balance_matrix(temperature: f32, tint: f32, space: WorkingSpace) -> Mat3 {
    let k = temperature;
    let x = grade_math::D65_XY[0] - k * if k < 0.0 { 0.0214 } else { 0.066 };
    let y = daylight_locus_y(x) + tint * 0.066;

    let lms = XYZ_TO_CAT16 * xyy_to_xyz(Vec3::new(x, y, 1.0));
    match space {
        WorkingSpace::Rec2020 => von_kries(&REC2020_TO_CAT16, &CAT16_TO_REC2020, D65_LMS_CAT16, lms),
        WorkingSpace::Rec709 => von_kries(&SRGB_TO_CAT16, &CAT16_TO_SRGB, D65_LMS_CAT16, lms),
    }
}

// ============================================================================
// Mixing & tonal ranges
// ============================================================================

/// Each output channel is the dot product of the input with its row.
#[inline]
pub fn channel_mixer(v: Vec3, out_red: Vec3, out_green: Vec3, out_blue: Vec3) -> Vec3 {
    Vec3::new(v.dot(out_red), v.dot(out_green), v.dot(out_blue))
}

/// Applies separate gains to shadows, midtones and highlights.
///
/// `ranges` are luminance edges: shadows fade out over `[0]..[1]`,
/// highlights fade in over `[2]..[3]`, midtones take the rest.
pub fn tonal_ranges(
    v: Vec3,
    weights: Vec3,
    shadows: Vec3,
    midtones: Vec3,
    highlights: Vec3,
    ranges: [f32; 4],
) -> Vec3 {
    let y = v.dot(weights);
    let s = 1.0 - smoothstep(ranges[0], ranges[1], y);
    let h = smoothstep(ranges[2], ranges[3], y);
    let m = 1.0 - s - h;
    v.mul_elem(shadows) * s + v.mul_elem(midtones) * m + v.mul_elem(highlights) * h
}

// ============================================================================
// Log-space grading
// ============================================================================

/// ASC CDL slope/offset/power. Expects log-encoded input.
///
/// Power only applies where `v * slope + offset` is positive.
pub fn cdl(v: Vec3, slope: Vec3, offset: Vec3, power: Vec3) -> Vec3 {
    let v = v.mul_elem(slope) + offset;
    let pv = v.pow(power);
    Vec3::new(
        if v.x <= 0.0 { v.x } else { pv.x },
        if v.y <= 0.0 { v.y } else { pv.y },
        if v.z <= 0.0 { v.z } else { pv.z },
    )
}

/// Contrast around log middle gray. Expects log-encoded input.
#[inline]
pub fn contrast(v: Vec3, contrast: f32) -> Vec3 {
    let pivot = Vec3::splat(acescct::MIDDLE_GRAY);
    pivot + (v - pivot) * contrast
}

// ============================================================================
// Saturation
// ============================================================================

/// Saturation boost weighted toward less saturated colors.
///
/// The amount is a logistic function of how much red leads the other
/// channels, so skin tones are protected.
pub fn vibrance(v: Vec3, weights: Vec3, vibrance: f32) -> Vec3 {
    let r = v.x - v.y.max(v.z);
    let s = (vibrance - 1.0) / (1.0 + (-3.0 * r).exp()) + 1.0;
    let l = weights * (1.0 - s);
    Vec3::new(
        v.dot(l + Vec3::X * s),
        v.dot(l + Vec3::Y * s),
        v.dot(l + Vec3::Z * s),
    )
}

/// Linear saturation around luminance.
#[inline]
pub fn saturation(v: Vec3, weights: Vec3, saturation: f32) -> Vec3 {
    let y = Vec3::splat(v.dot(weights));
    y + (v - y) * saturation
}

// ============================================================================
// Curves
// ============================================================================

/// Per-channel curve: a power segment below `mid_point`, a line above it.
///
/// Both segments pass through `(mid_point, mid_point)`. Expects
/// non-negative input.
pub fn curves(v: Vec3, shadow_gamma: Vec3, mid_point: Vec3, highlight_scale: Vec3) -> Vec3 {
    let channel = |v: f32, gamma: f32, mid: f32, scale: f32| {
        if v <= mid {
            let d = 1.0 / mid.powf(gamma - 1.0);
            v.powf(gamma) * d
        } else {
            scale * (v - mid) + mid
        }
    };
    Vec3::new(
        channel(v.x, shadow_gamma.x, mid_point.x, highlight_scale.x),
        channel(v.y, shadow_gamma.y, mid_point.y, highlight_scale.y),
        channel(v.z, shadow_gamma.z, mid_point.z, highlight_scale.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use grade_primaries::LUMINANCE_REC2020;

    fn close(a: Vec3, b: Vec3, eps: f32) -> bool {
        (a - b).abs().max_element() <= eps
    }

    #[test]
    fn test_exposure_stops() {
        assert_eq!(exposure(Vec3::splat(0.25), 2.0), Vec3::ONE);
        assert_eq!(exposure(Vec3::splat(0.25), -1.0), Vec3::splat(0.125));
    }

    #[test]
    fn test_neutral_white_balance_is_near_identity() {
        for space in [WorkingSpace::Rec2020, WorkingSpace::Rec709] {
            let m = white_balance_matrix(0.0, 0.0, space);
            assert!(m.max_abs_diff(&Mat3::IDENTITY) < 1e-2, "{space:?}: {m:?}");
        }
    }

    #[test]
    fn test_warm_white_balance() {
        // positive temperature moves the assumed illuminant toward blue,
        // so compensation warms the image
        let m = white_balance_matrix(0.5, 0.0, WorkingSpace::Rec2020);
        let gray = m * Vec3::splat(0.5);
        assert!(gray.x > gray.z);
        let m = white_balance_matrix(-0.5, 0.0, WorkingSpace::Rec2020);
        let gray = m * Vec3::splat(0.5);
        assert!(gray.z > gray.x);
    }

    #[test]
    fn test_channel_mixer_swap() {
        let v = Vec3::new(0.1, 0.2, 0.3);
        assert_eq!(channel_mixer(v, Vec3::Z, Vec3::Y, Vec3::X), Vec3::new(0.3, 0.2, 0.1));
    }

    #[test]
    fn test_tonal_ranges_unit_gains_identity() {
        let v = Vec3::new(0.3, 0.6, 0.1);
        let out = tonal_ranges(v, LUMINANCE_REC2020, Vec3::ONE, Vec3::ONE, Vec3::ONE, [0.0, 0.333, 0.55, 1.0]);
        assert!(close(out, v, 1e-6));
    }

    #[test]
    fn test_tonal_ranges_shadow_gain() {
        let ranges = [0.0, 0.333, 0.55, 1.0];
        let dark = Vec3::splat(0.01);
        let out = tonal_ranges(dark, LUMINANCE_REC2020, Vec3::splat(2.0), Vec3::ONE, Vec3::ONE, ranges);
        assert!(out.x > 0.019);
        let bright = Vec3::splat(1.0);
        let out = tonal_ranges(bright, LUMINANCE_REC2020, Vec3::splat(2.0), Vec3::ONE, Vec3::ONE, ranges);
        assert!(close(out, bright, 1e-5));
    }

    #[test]
    fn test_cdl_skips_power_below_zero() {
        let out = cdl(Vec3::new(-0.2, 0.25, 0.5), Vec3::ONE, Vec3::ZERO, Vec3::splat(2.0));
        assert_eq!(out.x, -0.2);
        assert_abs_diff_eq!(out.y, 0.0625, epsilon = 1e-7);
        assert_abs_diff_eq!(out.z, 0.25, epsilon = 1e-7);
    }

    #[test]
    fn test_contrast_pivot_is_fixed() {
        let pivot = Vec3::splat(acescct::MIDDLE_GRAY);
        assert_eq!(contrast(pivot, 1.7), pivot);
        let up = contrast(Vec3::splat(0.6), 2.0);
        assert!(up.x > 0.6);
    }

    #[test]
    fn test_saturation_zero_is_gray() {
        let v = Vec3::new(0.8, 0.2, 0.1);
        let out = saturation(v, LUMINANCE_REC2020, 0.0);
        assert_abs_diff_eq!(out.x, out.y, epsilon = 1e-7);
        assert_abs_diff_eq!(out.y, out.z, epsilon = 1e-7);
        assert_abs_diff_eq!(out.x, v.dot(LUMINANCE_REC2020), epsilon = 1e-7);
    }

    #[test]
    fn test_vibrance_one_is_identity() {
        let v = Vec3::new(0.8, 0.2, 0.1);
        assert!(close(vibrance(v, LUMINANCE_REC2020, 1.0), v, 1e-6));
    }

    #[test]
    fn test_vibrance_preserves_gray() {
        let v = Vec3::splat(0.4);
        assert!(close(vibrance(v, LUMINANCE_REC2020, 2.0), v, 1e-5));
    }

    #[test]
    fn test_curves_default_is_identity() {
        let v = Vec3::new(0.0, 0.5, 3.0);
        assert!(close(curves(v, Vec3::ONE, Vec3::ONE, Vec3::ONE), v, 1e-6));
    }

    #[test]
    fn test_curves_continuous_at_mid_point() {
        let mid = Vec3::splat(0.4);
        let below = curves(Vec3::splat(0.4), Vec3::splat(2.2), mid, Vec3::splat(0.5));
        let above = curves(Vec3::splat(0.4001), Vec3::splat(2.2), mid, Vec3::splat(0.5));
        assert!(close(below, mid, 1e-6));
        assert!(close(above, mid, 1e-3));
    }
}
