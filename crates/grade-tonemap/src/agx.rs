//! AgX display rendering (Troy Sobotka), with the Blender looks.
//!
//! The input is pulled slightly toward the achromatic axis (inset),
//! log2 encoded over a fixed exposure window, shaped by a sigmoid fit,
//! optionally graded by a look, pushed back out (outset) and finally
//! decoded with a 2.2 power.

use grade_math::{Mat3, Vec3};
use grade_primaries::LUMINANCE_REC709;
use grade_transfer::gamma;
use serde::{Deserialize, Serialize};

/// Creative look applied inside the AgX curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgxLook {
    /// Base rendering.
    #[default]
    None,
    /// Warm, more saturated.
    Golden,
    /// Higher contrast and saturation.
    Punchy,
}

impl AgxLook {
    /// Returns `(slope, power, saturation)` of the look.
    const fn cdl(self) -> (Vec3, f32, f32) {
        match self {
            Self::None => (Vec3::ONE, 1.0, 1.0),
            Self::Golden => (Vec3::new(1.0, 0.9, 0.5), 0.8, 1.3),
            Self::Punchy => (Vec3::ONE, 1.35, 1.4),
        }
    }
}

/// Lower end of the encoded exposure window, in stops.
pub const MIN_EV: f32 = -12.47393;
/// Upper end of the encoded exposure window, in stops.
pub const MAX_EV: f32 = 4.026069;

/// Pulls primaries toward white before the curve.
pub const INSET: Mat3 = Mat3::from_rows([
    [0.856627153315983, 0.0951212405381588, 0.0482516061458583],
    [0.137318972929847, 0.761241990602591, 0.101439036467562],
    [0.11189821299995, 0.0767994186031903, 0.811302368396859],
]);

/// Inverse of [`OUTSET`], as published.
pub const OUTSET_INV: Mat3 = Mat3::from_rows([
    [0.899796955911611, 0.0871996192028351, 0.013003424886054],
    [0.11142098895748, 0.875575586156966, 0.0130034248860539],
    [0.11142098895748, 0.0871996192028349, 0.801379391839686],
]);

/// Restores saturation after the curve.
pub const OUTSET: Mat3 = OUTSET_INV.inverted();

/// Degree-7 polynomial fit of the AgX sigmoid on [0, 1].
#[inline]
pub fn contrast_approx(x: f32) -> f32 {
    let x2 = x * x;
    let x4 = x2 * x2;
    let x6 = x4 * x2;
    -17.86 * x6 * x + 78.01 * x6 - 126.7 * x4 * x + 92.06 * x4 - 28.72 * x2 * x + 4.361 * x2
        - 0.1718 * x
        + 0.002857
}

/// Applies a look as slope/power followed by saturation around luma.
#[inline]
pub fn apply_look(v: Vec3, look: AgxLook) -> Vec3 {
    if look == AgxLook::None {
        return v;
    }
    let (slope, power, saturation) = look.cdl();
    let luma = v.dot(LUMINANCE_REC709);
    let graded = (v * slope).powf(power);
    (graded - luma) * saturation + luma
}

/// AgX tone mapping of linear Rec.2020.
pub fn agx(color: Vec3, look: AgxLook) -> Vec3 {
    let v = INSET * color.max(Vec3::ZERO);
    let v = v.max(Vec3::splat(1e-10)).map(f32::log2);
    let v = ((v - MIN_EV) / (MAX_EV - MIN_EV)).clamp01();
    let v = apply_look(v.map(contrast_approx), look);
    (OUTSET * v).map(|c| gamma::eotf(c, 2.2))
}
