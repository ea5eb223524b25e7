//! SMPTE ST 2084 Perceptual Quantizer (PQ).
//!
//! The grading pipeline works in relative units, so the normalized
//! variants treat 1.0 as 100 cd/m2.
//!
//! # Reference
//!
//! SMPTE ST 2084:2014

/// Peak luminance in cd/m2.
pub const L_MAX: f32 = 10000.0;

/// Luminance of a normalized value of 1.0, in cd/m2.
pub const REFERENCE_WHITE: f32 = 100.0;

const M1: f32 = 2610.0 / 16384.0;
const M2: f32 = 2523.0 / 4096.0 * 128.0;
const C1: f32 = 3424.0 / 4096.0;
const C2: f32 = 2413.0 / 4096.0 * 32.0;
const C3: f32 = 2392.0 / 4096.0 * 32.0;

/// PQ EOTF: signal [0, 1] to absolute luminance in cd/m2.
#[inline]
pub fn eotf(v: f32) -> f32 {
    if v <= 0.0 {
        return 0.0;
    }
    let vp = v.powf(1.0 / M2);
    let num = (vp - C1).max(0.0);
    let den = C2 - C3 * vp;
    L_MAX * (num / den).powf(1.0 / M1)
}

/// PQ OETF: absolute luminance in cd/m2 to signal [0, 1].
#[inline]
pub fn oetf(l: f32) -> f32 {
    if l <= 0.0 {
        return 0.0;
    }
    let yp = (l / L_MAX).clamp(0.0, 1.0).powf(M1);
    ((C1 + C2 * yp) / (1.0 + C3 * yp)).powf(M2)
}

/// PQ EOTF returning relative luminance (1.0 = 100 cd/m2).
#[inline]
pub fn eotf_normalized(v: f32) -> f32 {
    eotf(v) / REFERENCE_WHITE
}

/// PQ OETF accepting relative luminance (1.0 = 100 cd/m2).
///
/// ```rust
/// use grade_transfer::pq::oetf_normalized;
///
/// assert!((oetf_normalized(1.0) - 0.508).abs() < 0.01);
/// ```
#[inline]
pub fn oetf_normalized(l: f32) -> f32 {
    oetf(l * REFERENCE_WHITE)
}
