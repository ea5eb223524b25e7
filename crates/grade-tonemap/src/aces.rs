//! Approximated ACES rendering.
//!
//! Keeps the RRT's glow and red modifier and its global desaturation,
//! then replaces the tone scale and the 100 nit dim-surround ODT with a
//! rational fit (Hill). Input and output are linear Rec.2020.
//!
//! ```text
//! Rec.2020 -> AP0 -> glow -> red modifier -> AP1 -> desaturate
//!          -> brightness -> RRT+ODT fit -> dim surround -> desaturate -> Rec.2020
//! ```

use grade_math::{Vec3, mix3, sign, smoothstep, xyy_to_xyz, xyz_to_xyy};
use grade_primaries::{
    AP0_TO_AP1, AP1_TO_REC2020, AP1_TO_XYZ, LUMINANCE_AP1, REC2020_TO_AP0, XYZ_TO_AP1,
};

/// Largest finite half-float, the ceiling for AP1 values.
pub const HALF_MAX: f32 = 65504.0;

const RRT_GLOW_GAIN: f32 = 0.05;
const RRT_GLOW_MID: f32 = 0.08;

const RRT_RED_SCALE: f32 = 0.82;
const RRT_RED_PIVOT: f32 = 0.03;
const RRT_RED_HUE: f32 = 0.0;
const RRT_RED_WIDTH: f32 = 135.0;

const RRT_SAT_FACTOR: f32 = 0.96;
const ODT_SAT_FACTOR: f32 = 0.93;

const DIM_SURROUND_GAMMA: f32 = 0.9811;

/// Saturation as `(max - min) / max` with small floors.
#[inline]
pub fn rgb_to_saturation(rgb: Vec3) -> f32 {
    const TINY: f32 = 1e-5;
    let mi = rgb.min_element();
    let ma = rgb.max_element();
    (ma.max(TINY) - mi.max(TINY)) / ma.max(1e-2)
}

/// Luminance proxy that weights chroma, used by the glow module.
#[inline]
pub fn rgb_to_yc(rgb: Vec3) -> f32 {
    const YC_RADIUS_WEIGHT: f32 = 1.75;
    let (r, g, b) = (rgb.x, rgb.y, rgb.z);
    let chroma = (b * (b - g) + g * (g - r) + r * (r - b)).max(0.0).sqrt();
    (b + g + r + YC_RADIUS_WEIGHT * chroma) / 3.0
}

/// Hue in degrees [0, 360). Achromatic input has hue 0.
#[inline]
pub fn rgb_to_hue(rgb: Vec3) -> f32 {
    if rgb.x == rgb.y && rgb.y == rgb.z {
        return 0.0;
    }
    let hue = (3.0_f32.sqrt() * (rgb.y - rgb.z))
        .atan2(2.0 * rgb.x - rgb.y - rgb.z)
        .to_degrees();
    if hue < 0.0 { hue + 360.0 } else { hue }
}

/// Signed distance of `hue` from `center`, wrapped to [-180, 180].
#[inline]
pub fn center_hue(hue: f32, center: f32) -> f32 {
    let centered = hue - center;
    if centered < -180.0 {
        centered + 360.0
    } else if centered > 180.0 {
        centered - 360.0
    } else {
        centered
    }
}

/// Smooth S-curve on [-2, 2] mapping to [0, 1].
#[inline]
pub fn sigmoid_shaper(x: f32) -> f32 {
    let t = (1.0 - (x / 2.0).abs()).max(0.0);
    let y = 1.0 + sign(x) * (1.0 - t * t);
    y / 2.0
}

/// Glow gain for a given `yc`.
#[inline]
pub fn glow_fwd(yc: f32, gain: f32, mid: f32) -> f32 {
    if yc <= 2.0 / 3.0 * mid {
        gain
    } else if yc >= 2.0 * mid {
        0.0
    } else {
        gain * (mid / yc - 0.5)
    }
}

/// Compensates a dark-surround rendering for a dim viewing environment.
#[inline]
pub fn dark_to_dim_surround(linear_cv: Vec3) -> Vec3 {
    let mut xyy = xyz_to_xyy(AP1_TO_XYZ * linear_cv);
    xyy.z = xyy.z.clamp(0.0, HALF_MAX).powf(DIM_SURROUND_GAMMA);
    XYZ_TO_AP1 * xyy_to_xyz(xyy)
}

/// ACES approximation with an exposure `brightness` applied before the
/// tone scale.
pub fn aces(color: Vec3, brightness: f32) -> Vec3 {
    let mut ap0 = REC2020_TO_AP0 * color;

    // glow
    let saturation = rgb_to_saturation(ap0);
    let yc = rgb_to_yc(ap0);
    let s = sigmoid_shaper((saturation - 0.4) / 0.2);
    ap0 *= 1.0 + glow_fwd(yc, RRT_GLOW_GAIN * s, RRT_GLOW_MID);

    // red modifier
    let centered = center_hue(rgb_to_hue(ap0), RRT_RED_HUE);
    let mut hue_weight = smoothstep(0.0, 1.0, 1.0 - (2.0 * centered / RRT_RED_WIDTH).abs());
    hue_weight *= hue_weight;
    ap0.x += hue_weight * saturation * (RRT_RED_PIVOT - ap0.x) * (1.0 - RRT_RED_SCALE);

    let mut ap1 = (AP0_TO_AP1 * ap0).clamp_scalar(0.0, HALF_MAX);
    ap1 = mix3(Vec3::splat(ap1.dot(LUMINANCE_AP1)), ap1, RRT_SAT_FACTOR);
    ap1 *= brightness;

    // RRT + ODT (100 nit, dim surround) fit
    const A: f32 = 2.785085;
    const B: f32 = 0.107772;
    const C: f32 = 2.936045;
    const D: f32 = 0.887122;
    const E: f32 = 0.806889;
    let rgb_post = (ap1 * (ap1 * A + B)) / (ap1 * (ap1 * C + D) + E);

    let mut linear_cv = dark_to_dim_surround(rgb_post);
    linear_cv = mix3(Vec3::splat(linear_cv.dot(LUMINANCE_AP1)), linear_cv, ODT_SAT_FACTOR);

    // AP1 -> Rec.2020 leaves small negatives for saturated blues
    (AP1_TO_REC2020 * linear_cv).max(Vec3::ZERO)
}
