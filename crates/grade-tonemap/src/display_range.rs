//! False-color exposure ramp.
//!
//! Maps the luminance of the input, measured in stops from middle gray,
//! to a fixed color ramp: cyan is middle gray, each stop below moves
//! toward black through blues, each stop above through greens, yellows,
//! reds and purple to white.

use grade_math::{Vec3, fract, mix3, saturate};
use grade_primaries::LUMINANCE_REC2020;

/// Ramp of 16 colors plus a duplicate of the last for interpolation.
pub const DEBUG_COLORS: [Vec3; 17] = [
    Vec3::new(0.0, 0.0, 0.0),         // black
    Vec3::new(0.0, 0.0, 0.1647),      // darkest blue
    Vec3::new(0.0, 0.0, 0.3647),      // darker blue
    Vec3::new(0.0, 0.0, 0.6647),      // dark blue
    Vec3::new(0.0, 0.0, 0.9647),      // blue
    Vec3::new(0.0, 0.9255, 0.9255),   // cyan
    Vec3::new(0.0, 0.5647, 0.0),      // dark green
    Vec3::new(0.0, 0.7843, 0.0),      // green
    Vec3::new(1.0, 1.0, 0.0),         // yellow
    Vec3::new(0.90588, 0.75294, 0.0), // yellow-orange
    Vec3::new(1.0, 0.5647, 0.0),      // orange
    Vec3::new(1.0, 0.0, 0.0),         // bright red
    Vec3::new(0.8392, 0.0, 0.0),      // red
    Vec3::new(1.0, 0.0, 1.0),         // magenta
    Vec3::new(0.6, 0.3333, 0.7882),   // purple
    Vec3::new(1.0, 1.0, 1.0),         // white
    Vec3::new(1.0, 1.0, 1.0),         // white
];

/// Index of the middle gray entry in [`DEBUG_COLORS`].
pub const MIDDLE_GRAY_INDEX: usize = 5;

/// Display range visualization.
pub fn display_range(c: Vec3) -> Vec3 {
    let v = (c.dot(LUMINANCE_REC2020) / 0.18).log2() + MIDDLE_GRAY_INDEX as f32;
    // max/min rather than clamp: NaN from negative luminance maps to black
    let v = v.max(0.0).min(15.0);
    let index = v as usize;
    mix3(DEBUG_COLORS[index], DEBUG_COLORS[index + 1], saturate(fract(v)))
}
