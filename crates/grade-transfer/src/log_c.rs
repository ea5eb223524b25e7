//! ARRI LogC, pure logarithmic form (EI 1000 parameters).
//!
//! Used as the domain of the baked 3D LUT: the renderer encodes scene
//! linear colors with [`encode`] before sampling, and every cell decodes
//! its coordinate with [`decode`]. Contrast and ASC CDL also operate in
//! this space.
//!
//! The toe segment of camera LogC is omitted; the curve is
//! `c * log10(a * x + b) + d` everywhere, so [`encode`] is undefined for
//! `a * x + b <= 0` (x below about -0.0086).

const A: f32 = 5.555556;
const B: f32 = 0.047996;
const C: f32 = 0.244161;
const D: f32 = 0.386036;

/// Scene linear to LogC.
///
/// # Example
///
/// ```rust
/// use grade_transfer::log_c::encode;
///
/// assert!((encode(0.18) - 0.3910).abs() < 1e-3);
/// ```
#[inline]
pub fn encode(linear: f32) -> f32 {
    C * (A * linear + B).log10() + D
}

/// LogC to scene linear.
///
/// # Formula
///
/// `(10^((x - d) / c) - b) / a`
#[inline]
pub fn decode(log: f32) -> f32 {
    (10.0_f32.powf((log - D) / C) - B) / A
}

/// Applies [`encode`] to an RGB triplet.
#[inline]
pub fn encode_rgb(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(encode)
}

/// Applies [`decode`] to an RGB triplet.
#[inline]
pub fn decode_rgb(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for i in 0..=100 {
            let v = i as f32 / 100.0;
            let back = encode(decode(v));
            assert!((v - back).abs() < 1e-4, "v={}, back={}", v, back);
        }
    }

    #[test]
    fn test_zero_coordinate_is_slightly_negative() {
        let black = decode(0.0);
        assert!(black < 0.0 && black > -0.005);
    }

    #[test]
    fn test_unit_coordinate_is_hdr() {
        // top of the LUT domain covers roughly 55x scene linear
        let top = decode(1.0);
        assert!(top > 50.0 && top < 60.0, "top={}", top);
    }
}
