//! The per-cell LUT evaluation pipeline.
//!
//! [`ColorGradingPipeline`] resolves everything that only depends on the
//! parameters once (matrices, luminance weights, the LUT mode) and then
//! evaluates single LUT cells. It is `Sync` and cheap to share between
//! bake workers.
//!
//! # Stages
//!
//! ```text
//! coord --LogC decode--> scene linear sRGB
//!   [adjustments]   exposure, night adaptation
//!   grading space   sRGB -> Rec.2020 (identity for legacy Rec.709)
//!   [adjustments]   white balance ... curves
//!   tone mapping    direct, or through luminance only
//!   display space   Rec.2020 -> sRGB
//!   [gamut mapping]
//!   saturate, OETF
//! ```
//!
//! # 1D mode
//!
//! When nothing mixes channels (no adjustments, no luminance scaling, no
//! gamut mapping, a per-channel tone mapper) the whole pipeline is a curve
//! and a 512 entry 1D LUT is enough. LDR tone mappers index that LUT with
//! linear input, others with LogC.

use grade_math::{Mat3, Vec3};
use grade_primaries::{LUMINANCE_REC709, LUMINANCE_REC2020, REC2020_TO_SRGB, SRGB_TO_REC2020};
use grade_tonemap::ToneMapper;
use grade_transfer::{Oetf, log_c};
use tracing::debug;

use crate::adjust;
use crate::gamut::gamut_map_srgb;
use crate::luminance_scaling::luminance_scaling;
use crate::params::{GradingParameters, MAX_DIMENSION, MIN_DIMENSION, WorkingSpace};
use crate::scotopic::scotopic_adaptation;

/// Number of entries in a 1D LUT.
pub const LUT_1D_SIZE: usize = 512;

/// Shape of the LUT a set of parameters needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LutMode {
    /// A single curve applied to each channel.
    OneDimensional {
        /// The curve is indexed by linear input instead of LogC.
        ldr: bool,
    },
    /// A full RGB cube indexed by LogC input.
    ThreeDimensional,
}

/// Evaluates LUT cells for one set of grading parameters.
#[derive(Debug, Clone)]
pub struct ColorGradingPipeline {
    params: GradingParameters,
    mode: LutMode,
    has_adjustments: bool,
    grading_in: Mat3,
    grading_out: Mat3,
    weights: Vec3,
    white_balance: Mat3,
}

impl ColorGradingPipeline {
    /// Resolves the pipeline for `params`.
    ///
    /// `params` are used as given; sanitize them with
    /// [`GradingParameters::clamped`] first if they come from outside.
    pub fn new(params: &GradingParameters) -> Self {
        let has_adjustments = params.has_adjustments();
        let tm = &params.tone_mapper;

        let mode = if !has_adjustments
            && !params.luminance_scaling
            && !params.gamut_mapping
            && tm.is_one_dimensional()
        {
            LutMode::OneDimensional { ldr: tm.is_ldr() }
        } else {
            LutMode::ThreeDimensional
        };

        let (grading_in, grading_out, weights) = match params.working_space {
            WorkingSpace::Rec2020 => (SRGB_TO_REC2020, REC2020_TO_SRGB, LUMINANCE_REC2020),
            WorkingSpace::Rec709 => (Mat3::IDENTITY, Mat3::IDENTITY, LUMINANCE_REC709),
        };

        let white_balance =
            adjust::white_balance_matrix(params.temperature, params.tint, params.working_space);

        debug!(
            tone_mapper = tm.name(),
            ?mode,
            has_adjustments,
            working_space = ?params.working_space,
            output = params.output.name(),
            "Resolved grading pipeline"
        );

        Self {
            params: *params,
            mode,
            has_adjustments,
            grading_in,
            grading_out,
            weights,
            white_balance,
        }
    }

    /// Parameters this pipeline was built from.
    pub fn parameters(&self) -> &GradingParameters {
        &self.params
    }

    /// LUT shape.
    pub fn mode(&self) -> LutMode {
        self.mode
    }

    /// True when a 1D LUT is enough.
    pub fn is_one_dimensional(&self) -> bool {
        matches!(self.mode, LutMode::OneDimensional { .. })
    }

    /// Entries of a 1D LUT, or the edge length of a 3D LUT.
    pub fn lut_dimension(&self) -> usize {
        match self.mode {
            LutMode::OneDimensional { .. } => LUT_1D_SIZE,
            LutMode::ThreeDimensional => {
                self.params.dimension.clamp(MIN_DIMENSION, MAX_DIMENSION) as usize
            }
        }
    }

    /// Luminance weights of the working space.
    pub fn luminance_weights(&self) -> Vec3 {
        self.weights
    }

    /// Grades a scene-referred linear sRGB color to encoded display output.
    pub fn grade(&self, v: Vec3) -> Vec3 {
        let p = &self.params;
        let mut v = v;

        if self.has_adjustments {
            v = adjust::exposure(v, p.exposure);
            v = scotopic_adaptation(v, p.night_adaptation);
        }

        v = self.grading_in * v;

        if self.has_adjustments {
            v = (self.white_balance * v).max(Vec3::ZERO);
            v = adjust::channel_mixer(v, p.out_red, p.out_green, p.out_blue);
            v = adjust::tonal_ranges(
                v,
                self.weights,
                p.shadows,
                p.midtones,
                p.highlights,
                p.tonal_ranges,
            );

            v = v.map(log_c::encode);
            v = adjust::cdl(v, p.slope, p.offset, p.power);
            v = adjust::contrast(v, p.contrast);
            v = v.map(log_c::decode);

            v = adjust::vibrance(v, self.weights, p.vibrance);
            v = adjust::saturation(v, self.weights, p.saturation);
            v = v.max(Vec3::ZERO);
            v = adjust::curves(v, p.curve_gamma, p.curve_mid_point, p.curve_scale);
        }

        v = if p.luminance_scaling {
            luminance_scaling(v, &p.tone_mapper, self.weights)
        } else {
            p.tone_mapper.apply(v)
        };

        v = self.grading_out * v;

        if p.gamut_mapping {
            v = gamut_map_srgb(v);
        }

        encode(v.clamp01(), p.output)
    }

    /// Evaluates a 3D LUT cell at normalized LogC coordinates in [0, 1].
    #[inline]
    pub fn evaluate(&self, coord: Vec3) -> Vec3 {
        let linear = coord.map(log_c::decode).max(Vec3::ZERO);
        self.grade(linear)
    }

    /// Evaluates a 3D LUT cell by its integer index in a cube of edge `dim`.
    #[inline]
    pub fn evaluate_cell(&self, r: usize, g: usize, b: usize, dim: usize) -> Vec3 {
        let last = (dim.max(2) - 1) as f32;
        self.evaluate(Vec3::new(r as f32 / last, g as f32 / last, b as f32 / last))
    }

    /// Evaluates the 1D curve at normalized input `x` in [0, 1].
    ///
    /// Only meaningful in [`LutMode::OneDimensional`]; the matrices into and
    /// out of the grading space are skipped, which is exact on the neutral
    /// axis.
    pub fn evaluate_1d(&self, x: f32) -> f32 {
        let ldr = matches!(self.mode, LutMode::OneDimensional { ldr: true });
        let v = if ldr { x } else { log_c::decode(x).max(0.0) };
        let mapped = self.params.tone_mapper.apply(Vec3::splat(v)).clamp01();
        self.params.output.apply(mapped.x)
    }

    /// Tone mapper in use.
    pub fn tone_mapper(&self) -> &ToneMapper {
        &self.params.tone_mapper
    }
}

#[inline]
fn encode(v: Vec3, oetf: Oetf) -> Vec3 {
    v.map(|c| oetf.apply(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorGradingBuilder, ToneMapping};

    #[test]
    fn test_mode_selection() {
        let b = ColorGradingBuilder::new;
        let mode = |p: GradingParameters| ColorGradingPipeline::new(&p).mode();

        assert_eq!(mode(b().build()), LutMode::ThreeDimensional);
        assert_eq!(
            mode(b().tone_mapper(ToneMapper::Filmic).build()),
            LutMode::OneDimensional { ldr: false }
        );
        assert_eq!(
            mode(b().tone_mapper(ToneMapper::Linear).build()),
            LutMode::OneDimensional { ldr: true }
        );
        assert_eq!(
            mode(b().tone_mapper(ToneMapper::Filmic).exposure(1.0).build()),
            LutMode::ThreeDimensional
        );
        assert_eq!(
            mode(b().tone_mapper(ToneMapper::Filmic).luminance_scaling(true).build()),
            LutMode::ThreeDimensional
        );
        assert_eq!(
            mode(b().tone_mapper(ToneMapper::Filmic).gamut_mapping(true).build()),
            LutMode::ThreeDimensional
        );
        assert_eq!(mode(b().tone_mapper(ToneMapper::PbrNeutral).build()), LutMode::ThreeDimensional);
    }

    #[test]
    fn test_lut_dimension() {
        let p = ColorGradingBuilder::new().dimension(48).build();
        assert_eq!(ColorGradingPipeline::new(&p).lut_dimension(), 48);
        let p = ColorGradingBuilder::new().tone_mapping(ToneMapping::Filmic).build();
        assert_eq!(ColorGradingPipeline::new(&p).lut_dimension(), LUT_1D_SIZE);
    }

    #[test]
    fn test_output_is_bounded() {
        let p = ColorGradingBuilder::new().exposure(2.0).saturation(2.0).build();
        let pipeline = ColorGradingPipeline::new(&p);
        for i in 0..=8 {
            for j in 0..=8 {
                let c = pipeline.evaluate(Vec3::new(i as f32 / 8.0, j as f32 / 8.0, 0.5));
                assert!(c.is_finite());
                assert!(c.all_within(0.0, 1.0), "{c:?}");
            }
        }
    }

    #[test]
    fn test_black_maps_near_black() {
        let pipeline = ColorGradingPipeline::new(&GradingParameters::default());
        let c = pipeline.grade(Vec3::ZERO);
        assert!(c.max_element() < 0.01, "{c:?}");
    }

    #[test]
    fn test_evaluate_cell_corners() {
        let pipeline = ColorGradingPipeline::new(&GradingParameters::default());
        assert_eq!(pipeline.evaluate_cell(0, 0, 0, 32), pipeline.evaluate(Vec3::ZERO));
        assert_eq!(pipeline.evaluate_cell(31, 31, 31, 32), pipeline.evaluate(Vec3::ONE));
    }
}
