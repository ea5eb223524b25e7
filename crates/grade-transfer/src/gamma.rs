//! Pure power-law curves.

/// Decodes with `v^gamma`, negative input maps to 0.
#[inline]
pub fn eotf(v: f32, gamma: f32) -> f32 {
    if v <= 0.0 { 0.0 } else { v.powf(gamma) }
}

/// Encodes with `l^(1/gamma)`, negative input maps to 0.
#[inline]
pub fn oetf(l: f32, gamma: f32) -> f32 {
    if l <= 0.0 { 0.0 } else { l.powf(1.0 / gamma) }
}
