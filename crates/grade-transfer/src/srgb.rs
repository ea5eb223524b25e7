//! sRGB transfer function.
//!
//! Piecewise curve: a linear segment near black and a 1/2.4 power above.
//!
//! # Reference
//!
//! IEC 61966-2-1:1999

/// sRGB EOTF: decodes sRGB to linear light.
///
/// # Formula
///
/// ```text
/// if V <= 0.04045: L = V / 12.92
/// else:            L = ((V + 0.055) / 1.055)^2.4
/// ```
#[inline]
pub fn eotf(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB OETF: encodes linear light to sRGB.
///
/// # Formula
///
/// ```text
/// if L <= 0.0031308: V = L * 12.92
/// else:              V = 1.055 * L^(1/2.4) - 0.055
/// ```
///
/// # Example
///
/// ```rust
/// use grade_transfer::srgb::oetf;
///
/// assert!((oetf(0.18) - 0.4613).abs() < 1e-3);
/// ```
#[inline]
pub fn oetf(l: f32) -> f32 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}
