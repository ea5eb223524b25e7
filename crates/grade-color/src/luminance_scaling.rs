//! Exposure value invariant luminance scaling (EVILS, Troy Sobotka 2021).
//!
//! Tone maps luminance only, then rebuilds a color with the mapped
//! luminance and the original chroma ratios. Luminance the ratios cannot
//! carry is spread over the remaining headroom, so bright saturated colors
//! desaturate toward white instead of skewing hue.

use grade_math::Vec3;
use grade_tonemap::ToneMapper;

/// Tone maps `x` through its luminance under `weights`.
pub fn luminance_scaling(x: Vec3, tone_mapper: &ToneMapper, weights: Vec3) -> Vec3 {
    let luminance_in = x.dot(weights);
    let luminance_out = tone_mapper.apply(Vec3::splat(luminance_in)).y;

    let peak = x.max_element();
    // 0 / 0 yields NaN, which f32::max maps to 0
    let chroma_ratio = (x / peak).max(Vec3::ZERO);
    let chroma_ratio_luminance = chroma_ratio.dot(weights);

    let max_reserves = Vec3::ONE - chroma_ratio;
    let max_reserves_luminance = max_reserves.dot(weights);

    let luminance_difference = (luminance_out - chroma_ratio_luminance).max(0.0);
    let scaled_luminance_difference =
        luminance_difference / max_reserves_luminance.max(f32::MIN_POSITIVE);

    let chroma_scale =
        (luminance_out - luminance_difference) / chroma_ratio_luminance.max(f32::MIN_POSITIVE);

    chroma_ratio * chroma_scale + max_reserves * scaled_luminance_difference
}

#[cfg(test)]
mod tests {
    use super::*;
    use grade_primaries::LUMINANCE_REC2020;

    #[test]
    fn test_gray_matches_tone_mapper() {
        let tm = ToneMapper::Filmic;
        for v in [0.05, 0.18, 1.0, 4.0] {
            let x = Vec3::splat(v);
            let out = luminance_scaling(x, &tm, LUMINANCE_REC2020);
            let expected = tm.apply(x);
            assert!((out - expected).abs().max_element() < 1e-5, "{v}: {out:?} vs {expected:?}");
        }
    }

    #[test]
    fn test_black_is_black() {
        let out = luminance_scaling(Vec3::ZERO, &ToneMapper::Reinhard, LUMINANCE_REC2020);
        assert!(out.is_finite());
        assert!(out.abs().max_element() < 1e-6);
    }

    #[test]
    fn test_output_luminance_matches_mapped_luminance() {
        let tm = ToneMapper::Reinhard;
        let x = Vec3::new(0.9, 0.3, 0.1);
        let out = luminance_scaling(x, &tm, LUMINANCE_REC2020);
        let target = tm.apply(Vec3::splat(x.dot(LUMINANCE_REC2020))).y;
        assert!((out.dot(LUMINANCE_REC2020) - target).abs() < 1e-5);
    }

    #[test]
    fn test_bright_saturated_moves_toward_white() {
        let tm = ToneMapper::Linear;
        let out = luminance_scaling(Vec3::new(8.0, 0.0, 0.0), &tm, LUMINANCE_REC2020);
        assert!(out.y > 0.0 && out.z > 0.0);
        assert!(out.max_element() <= 1.0 + 1e-5);
    }
}
