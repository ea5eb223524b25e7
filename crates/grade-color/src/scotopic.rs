//! Scotopic (night) adaptation.
//!
//! Simulates the Purkinje shift: in low light rods feed into the cone
//! opponent channels, so blues look brighter and reds darker. Based on the
//! rod intrusion model of Cao, Pokorny, Smith and Zele (2008), evaluated at
//! a fixed scene exposure.

use grade_math::{Mat3, Vec3};

// Spectral sensitivities of the L, M, S cones and of rods to linear sRGB.
const L: Vec3 = Vec3::new(7.696847, 18.424824, 2.068096);
const M: Vec3 = Vec3::new(2.431137, 18.697937, 3.012463);
const S: Vec3 = Vec3::new(0.289117, 1.401833, 13.792292);
const R: Vec3 = Vec3::new(0.466386, 15.564362, 10.059963);

const RGB_TO_LMS: Mat3 = Mat3::from_row_vecs(L, M, S);
const LMS_TO_RGB: Mat3 = RGB_TO_LMS.inverted();

/// Peak cone sensitivities.
const CONE_MAX: Vec3 = Vec3::new(0.63721, 0.39242, 1.6064);
/// Rod input strength per opponent channel.
const ROD_GAIN: Vec3 = Vec3::new(0.2, 0.2, 0.3);

/// Opponent channel deltas to LMS.
const OPPONENT_TO_LMS: Mat3 = Mat3::from_rows([
    [-0.5, 0.0, 0.5],
    [0.5, 0.0, 0.5],
    [0.0, 1.0, 1.0],
]);

/// Rod response to opponent deltas, premultiplied by rod gain and cone
/// normalization.
const WEIGHTED_ROD_RESPONSE: Mat3 = {
    const K: f32 = 45.0;
    const SAT: f32 = 10.0;
    const K3: f32 = 0.6;
    const RW: f32 = 0.139;
    const P: f32 = 0.6189;
    Mat3::from_rows([
        [-(K3 + RW), 1.0 + K3 * RW, 0.0],
        [P * K3, (1.0 - P) * K3, 1.0],
        [P * SAT, (1.0 - P) * SAT, 0.0],
    ])
    .scaled(K / SAT)
    .mul_mat(&Mat3::from_diagonal(ROD_GAIN))
    .mul_mat(&Mat3::diagonal(1.0 / CONE_MAX.x, 1.0 / CONE_MAX.y, 1.0 / CONE_MAX.z))
};

/// Scene exposure the model is evaluated at.
const LOG_EXPOSURE: f32 = 380.0;

/// Applies night adaptation of strength `night` in [0, 1] to linear sRGB.
///
/// Zero returns the input unchanged.
pub fn scotopic_adaptation(v: Vec3, night: f32) -> Vec3 {
    if night <= 0.0 {
        return v;
    }

    let v = v * LOG_EXPOSURE;
    let q = Vec3::new(v.dot(L), v.dot(M), v.dot(S));
    let rod = v.dot(R);

    let gain = (Vec3::splat(0.33).div_elem(CONE_MAX).mul_elem(q + ROD_GAIN * rod))
        .max(Vec3::ZERO)
        .map(|x| 1.0 / (1.0 + x).sqrt());

    let delta = WEIGHTED_ROD_RESPONSE * (gain * rod * night);
    let q_hat = q + OPPONENT_TO_LMS * delta;

    (LMS_TO_RGB * q_hat) / LOG_EXPOSURE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_identity() {
        let v = Vec3::new(0.3, 0.2, 0.7);
        assert_eq!(scotopic_adaptation(v, 0.0), v);
    }

    #[test]
    fn test_lms_roundtrip() {
        let d = LMS_TO_RGB.mul_mat(&RGB_TO_LMS).max_abs_diff(&Mat3::IDENTITY);
        assert!(d < 1e-5);
    }

    #[test]
    fn test_shifts_toward_blue() {
        let v = Vec3::splat(0.05);
        let out = scotopic_adaptation(v, 1.0);
        assert!(out.is_finite());
        assert!(out.z - out.x > v.z - v.x);
    }

    #[test]
    fn test_black_stays_black() {
        let out = scotopic_adaptation(Vec3::ZERO, 1.0);
        assert!(out.abs().max_element() < 1e-7);
    }
}
