//! ACEScct transfer function.
//!
//! Only the middle gray constant feeds the grading pipeline (the contrast
//! pivot); the full curve is kept so that constant stays checkable.
//!
//! # Reference
//!
//! AMPAS S-2016-001

const X_BRK: f32 = 0.0078125;
const Y_BRK: f32 = 0.155251141552511;
const A: f32 = 10.5402377416545;
const B: f32 = 0.0729055341958355;

/// ACEScct encoding of scene linear 0.18.
pub const MIDDLE_GRAY: f32 = 0.4135884;

/// ACES linear to ACEScct.
///
/// # Formula
///
/// ```text
/// if linear <= 2^-7: A * linear + B
/// else:              (log2(linear) + 9.72) / 17.52
/// ```
#[inline]
pub fn encode(linear: f32) -> f32 {
    if linear <= X_BRK {
        A * linear + B
    } else {
        (linear.log2() + 9.72) / 17.52
    }
}

/// ACEScct to ACES linear.
#[inline]
pub fn decode(cct: f32) -> f32 {
    if cct <= Y_BRK {
        (cct - B) / A
    } else {
        (cct * 17.52 - 9.72).exp2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_gray() {
        assert!((encode(0.18) - MIDDLE_GRAY).abs() < 1e-6);
    }

    #[test]
    fn test_break_continuity() {
        assert!((encode(X_BRK) - Y_BRK).abs() < 1e-6);
        assert!((decode(Y_BRK) - X_BRK).abs() < 1e-6);
    }
}
