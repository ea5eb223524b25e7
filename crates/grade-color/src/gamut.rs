//! Gamut mapping of linear sRGB into the sRGB gamut.
//!
//! Colors slightly outside the gamut are left alone. Everything else is
//! projected in OkLab toward a lightness anchor `L0` that adapts to chroma
//! (Ottosson's "adaptive L0, alpha = 0.05" method), stopping at the gamut
//! boundary. Hue is preserved.
//!
//! ```rust
//! use grade_color::gamut::gamut_map_srgb;
//! use grade_math::Vec3;
//!
//! let inside = Vec3::new(0.2, 0.5, 0.9);
//! assert_eq!(gamut_map_srgb(inside), inside);
//!
//! let mapped = gamut_map_srgb(Vec3::new(1.6, -0.4, 0.1));
//! assert!(mapped.all_within(-0.03, 1.03));
//! ```

use grade_math::Vec3;
use grade_primaries::oklab::{OKLAB_LAB_TO_LMS, OKLAB_LMS_TO_SRGB, oklab_to_srgb, srgb_to_oklab};

/// Tolerance around [0, 1] inside which colors are returned unchanged.
pub const GAMUT_TOLERANCE: f32 = 0.03;

/// Strength of the chroma-dependent pull of `L0` toward mid lightness.
const ALPHA: f32 = 0.05;

/// Maps a linear sRGB color into the sRGB gamut.
pub fn gamut_map_srgb(rgb: Vec3) -> Vec3 {
    if rgb.all_within(-GAMUT_TOLERANCE, 1.0 + GAMUT_TOLERANCE) {
        return rgb;
    }

    let lab = srgb_to_oklab(rgb);
    let l = lab.x;
    let c = lab.y.hypot(lab.z).max(1e-5);
    let a = lab.y / c;
    let b = lab.z / c;

    let ld = l - 0.5;
    let e1 = 0.5 + ld.abs() + ALPHA * c;
    let l0 = 0.5 * (1.0 + grade_math::sign(ld) * (e1 - (e1 * e1 - 2.0 * ld.abs()).sqrt()));

    let t = find_gamut_intersection(a, b, l, c, l0);
    let l_clipped = l0 * (1.0 - t) + t * l;
    let c_clipped = t * c;

    oklab_to_srgb(Vec3::new(l_clipped, c_clipped * a, c_clipped * b))
}

// ============================================================================
// Gamut geometry
// ============================================================================

/// Coefficients of the OkLab `a`/`b` axes in the nonlinear LMS rows.
#[inline]
fn lms_axis(a: f32, b: f32) -> Vec3 {
    Vec3::new(
        OKLAB_LAB_TO_LMS.m[0][1] * a + OKLAB_LAB_TO_LMS.m[0][2] * b,
        OKLAB_LAB_TO_LMS.m[1][1] * a + OKLAB_LAB_TO_LMS.m[1][2] * b,
        OKLAB_LAB_TO_LMS.m[2][1] * a + OKLAB_LAB_TO_LMS.m[2][2] * b,
    )
}

/// Largest saturation `S = C / L` inside the gamut for the unit hue `(a, b)`.
///
/// A polynomial fit per sector, refined by one Halley step on the channel
/// that clips first.
pub fn compute_max_saturation(a: f32, b: f32) -> f32 {
    let (k, w) = if -1.881_703_3 * a - 0.809_364_9 * b > 1.0 {
        // red clips first
        ([1.190_862_8, 1.765_767_3, 0.596_626_4, 0.755_151_97, 0.567_712_45], OKLAB_LMS_TO_SRGB.row(0))
    } else if 1.814_441 * a - 1.194_452_8 * b > 1.0 {
        // green
        ([0.739_565_15, -0.459_544_04, 0.082_854_27, 0.125_410_7, 0.145_032_04], OKLAB_LMS_TO_SRGB.row(1))
    } else {
        // blue
        ([1.357_336_5, -0.009_157_99, -1.151_302_1, -0.505_596_06, 0.006_921_67], OKLAB_LMS_TO_SRGB.row(2))
    };

    let s = k[0] + k[1] * a + k[2] * b + k[3] * a * a + k[4] * a * b;

    let kx = lms_axis(a, b);
    let lms_ = Vec3::ONE + kx * s;
    let lms = lms_.mul_elem(lms_).mul_elem(lms_);
    let d1 = (kx * 3.0).mul_elem(lms_).mul_elem(lms_);
    let d2 = (kx.mul_elem(kx) * 6.0).mul_elem(lms_);

    let f = w.dot(lms);
    let f1 = w.dot(d1);
    let f2 = w.dot(d2);

    s - f * f1 / (f1 * f1 - 0.5 * f * f2)
}

/// Lightness and chroma of the gamut cusp for the unit hue `(a, b)`.
pub fn find_cusp(a: f32, b: f32) -> (f32, f32) {
    let s_cusp = compute_max_saturation(a, b);
    let rgb_at_max = oklab_to_srgb(Vec3::new(1.0, s_cusp * a, s_cusp * b));
    let l_cusp = (1.0 / rgb_at_max.max_element()).cbrt();
    (l_cusp, l_cusp * s_cusp)
}

/// Fraction `t` of the way from `(L0, 0)` to `(L1, C1)` at which the line
/// leaves the gamut, for the unit hue `(a, b)`.
pub fn find_gamut_intersection(a: f32, b: f32, l1: f32, c1: f32, l0: f32) -> f32 {
    let (cusp_l, cusp_c) = find_cusp(a, b);

    if (l1 - l0) * cusp_c - (cusp_l - l0) * c1 <= 0.0 {
        // lower half: the boundary is a straight line to black
        return cusp_c * l0 / (c1 * cusp_l + cusp_c * (l0 - l1));
    }

    // upper half: start on the line to white, refine with one Halley step
    let t = cusp_c * (l0 - 1.0) / (c1 * (cusp_l - 1.0) + cusp_c * (l0 - l1));

    let dl = l1 - l0;
    let dc = c1;
    let kx = lms_axis(a, b);
    let ldt = Vec3::splat(dl) + kx * dc;

    let l = l0 * (1.0 - t) + t * l1;
    let c = t * c1;
    let lms_ = Vec3::splat(l) + kx * c;
    let lms = lms_.mul_elem(lms_).mul_elem(lms_);
    let d1 = (ldt * 3.0).mul_elem(lms_).mul_elem(lms_);
    let d2 = (ldt.mul_elem(ldt) * 6.0).mul_elem(lms_);

    let step = |w: Vec3| {
        let f = w.dot(lms) - 1.0;
        let f1 = w.dot(d1);
        let f2 = w.dot(d2);
        let u = f1 / (f1 * f1 - 0.5 * f * f2);
        if u >= 0.0 { -f * u } else { f32::MAX }
    };

    let tr = step(OKLAB_LMS_TO_SRGB.row(0));
    let tg = step(OKLAB_LMS_TO_SRGB.row(1));
    let tb = step(OKLAB_LMS_TO_SRGB.row(2));

    t + tr.min(tg).min(tb)
}
