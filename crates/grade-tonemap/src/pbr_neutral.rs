//! Khronos PBR Neutral.
//!
//! Leaves colors below the compression threshold untouched (apart from a
//! small black offset), so base colors of physically based materials
//! render close to their authored values.

use grade_math::{Vec3, mix3};

const START_COMPRESSION: f32 = 0.8 - 0.04;
const DESATURATION: f32 = 0.15;

/// PBR Neutral tone mapping.
pub fn pbr_neutral(color: Vec3) -> Vec3 {
    let x = color.min_element();
    let offset = if x < 0.08 { x - 6.25 * x * x } else { 0.04 };
    let color = color - offset;

    let peak = color.max_element();
    if peak < START_COMPRESSION {
        return color;
    }

    let d = 1.0 - START_COMPRESSION;
    let new_peak = 1.0 - d * d / (peak + d - START_COMPRESSION);
    let color = color * (new_peak / peak);

    let g = 1.0 - 1.0 / (DESATURATION * (peak - new_peak) + 1.0);
    mix3(color, Vec3::splat(new_peak), g)
}
