//! 10-10-10-2 unsigned normalized packing.
//!
//! Layout of a packed texel, least significant bits first:
//!
//! ```text
//! bits  0..10  red
//! bits 10..20  green
//! bits 20..30  blue
//! bits 30..32  alpha (always 0)
//! ```
//!
//! This matches `UNSIGNED_INT_2_10_10_10_REV` uploads into an `RGB10_A2`
//! texture.

const MAX_10: f32 = 1023.0;
const MASK_10: u32 = 0x3ff;

/// Quantizes one channel in [0, 1] to 10 bits, rounding to nearest.
#[inline]
pub fn quantize_10(x: f32) -> u32 {
    // NaN saturates to 0 in the cast
    (x.clamp(0.0, 1.0) * MAX_10 + 0.5).floor() as u32
}

/// Packs an RGB triplet in [0, 1] into a 10-10-10-2 word with zero alpha.
#[inline]
pub fn pack_1010102(rgb: [f32; 3]) -> u32 {
    quantize_10(rgb[0]) | (quantize_10(rgb[1]) << 10) | (quantize_10(rgb[2]) << 20)
}

/// Unpacks the RGB channels of a 10-10-10-2 word.
#[inline]
pub fn unpack_1010102(texel: u32) -> [f32; 3] {
    [
        (texel & MASK_10) as f32 / MAX_10,
        ((texel >> 10) & MASK_10) as f32 / MAX_10,
        ((texel >> 20) & MASK_10) as f32 / MAX_10,
    ]
}
