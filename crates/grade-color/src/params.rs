//! Grading parameters and their builder.
//!
//! [`GradingParameters`] is plain data: every field is public, every field
//! has a default, and the whole struct (de)serializes so a partial YAML
//! preset works. Values are only sanitized by [`ColorGradingBuilder`] (or
//! [`GradingParameters::clamped`], which routes through it); the pipeline
//! trusts what it is given.
//!
//! # Example
//!
//! ```rust
//! use grade_color::{ColorGradingBuilder, LutFormat};
//! use grade_math::Vec3;
//!
//! let params = ColorGradingBuilder::new()
//!     .exposure(0.5)
//!     .contrast(3.0) // clamped to 2
//!     .slope_offset_power(Vec3::splat(1.1), Vec3::ZERO, Vec3::ONE)
//!     .format(LutFormat::Float)
//!     .build();
//!
//! assert_eq!(params.contrast, 2.0);
//! assert!(params.has_adjustments());
//! ```

use grade_math::{Vec3, saturate};
use grade_tonemap::ToneMapper;
use grade_transfer::Oetf;
use serde::{Deserialize, Serialize};

/// Smallest 3D LUT edge length.
pub const MIN_DIMENSION: u32 = 16;
/// Largest 3D LUT edge length.
pub const MAX_DIMENSION: u32 = 64;
/// Default 3D LUT edge length.
pub const DEFAULT_DIMENSION: u32 = 32;

/// Minimum gap kept between a tonal range edge and its neighbour.
const RANGE_GAP: f32 = 1e-5;

// ============================================================================
// Enums
// ============================================================================

/// Color space the adjustments run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkingSpace {
    /// Linear Rec.2020.
    #[default]
    Rec2020,
    /// Linear sRGB/Rec.709, kept for presets tuned before the move to Rec.2020.
    Rec709,
}

/// Texel format of a baked 3D LUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LutFormat {
    /// 10-10-10-2 unsigned normalized, packed into `u32`.
    #[default]
    Integer,
    /// Four half floats per cell.
    Float,
}

/// Legacy tone-mapping selector.
///
/// Predates [`ToneMapper`]; kept so older presets keep their look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToneMapping {
    /// Clamp only.
    Linear,
    /// ACES with the older brightness.
    AcesLegacy,
    /// ACES.
    Aces,
    /// Filmic, graded in Rec.709.
    Filmic,
    /// False-color exposure ramp.
    DisplayRange,
}

impl ToneMapping {
    /// Operator and working space this selector stands for.
    pub fn resolve(self) -> (ToneMapper, WorkingSpace) {
        match self {
            Self::Linear => (ToneMapper::Linear, WorkingSpace::Rec2020),
            Self::AcesLegacy => (ToneMapper::AcesLegacy, WorkingSpace::Rec2020),
            Self::Aces => (ToneMapper::Aces, WorkingSpace::Rec2020),
            Self::Filmic => (ToneMapper::Filmic, WorkingSpace::Rec709),
            Self::DisplayRange => (ToneMapper::DisplayRange, WorkingSpace::Rec2020),
        }
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// Everything that determines the contents of a baked LUT.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingParameters {
    /// Tone-mapping operator.
    pub tone_mapper: ToneMapper,
    /// Space the adjustments and the tone mapper run in.
    pub working_space: WorkingSpace,
    /// Tone map luminance only and restore chroma afterwards.
    pub luminance_scaling: bool,
    /// Map out-of-gamut display colors back into sRGB.
    pub gamut_mapping: bool,
    /// Exposure in stops.
    pub exposure: f32,
    /// Scotopic (night) adaptation strength in [0, 1].
    pub night_adaptation: f32,
    /// White balance temperature shift in [-1, 1].
    pub temperature: f32,
    /// White balance tint shift in [-1, 1].
    pub tint: f32,
    /// Channel mixer row producing red.
    pub out_red: Vec3,
    /// Channel mixer row producing green.
    pub out_green: Vec3,
    /// Channel mixer row producing blue.
    pub out_blue: Vec3,
    /// Shadow gain.
    pub shadows: Vec3,
    /// Midtone gain.
    pub midtones: Vec3,
    /// Highlight gain.
    pub highlights: Vec3,
    /// Shadows fade out over `[0]..[1]`, highlights fade in over `[2]..[3]` (luminance).
    pub tonal_ranges: [f32; 4],
    /// ASC CDL slope.
    pub slope: Vec3,
    /// ASC CDL offset.
    pub offset: Vec3,
    /// ASC CDL power.
    pub power: Vec3,
    /// Contrast around log middle gray, in [0, 2].
    pub contrast: f32,
    /// Vibrance, in [0, 2].
    pub vibrance: f32,
    /// Saturation, in [0, 2].
    pub saturation: f32,
    /// Curve gamma below the mid point.
    pub curve_gamma: Vec3,
    /// Curve mid point.
    pub curve_mid_point: Vec3,
    /// Curve slope above the mid point.
    pub curve_scale: Vec3,
    /// Output transfer function.
    pub output: Oetf,
    /// 3D LUT texel format.
    pub format: LutFormat,
    /// 3D LUT edge length.
    pub dimension: u32,
}

impl GradingParameters {
    /// Default tonal ranges.
    pub const DEFAULT_TONAL_RANGES: [f32; 4] = [0.0, 0.333, 0.55, 1.0];

    /// Parameters that leave the image untouched before tone mapping.
    pub const DEFAULT: Self = Self {
        tone_mapper: ToneMapper::AcesLegacy,
        working_space: WorkingSpace::Rec2020,
        luminance_scaling: false,
        gamut_mapping: false,
        exposure: 0.0,
        night_adaptation: 0.0,
        temperature: 0.0,
        tint: 0.0,
        out_red: Vec3::X,
        out_green: Vec3::Y,
        out_blue: Vec3::Z,
        shadows: Vec3::ONE,
        midtones: Vec3::ONE,
        highlights: Vec3::ONE,
        tonal_ranges: Self::DEFAULT_TONAL_RANGES,
        slope: Vec3::ONE,
        offset: Vec3::ZERO,
        power: Vec3::ONE,
        contrast: 1.0,
        vibrance: 1.0,
        saturation: 1.0,
        curve_gamma: Vec3::ONE,
        curve_mid_point: Vec3::ONE,
        curve_scale: Vec3::ONE,
        output: Oetf::Srgb,
        format: LutFormat::Integer,
        dimension: DEFAULT_DIMENSION,
    };

    /// True when any adjustment stage differs from its default.
    ///
    /// Tone mapper, working space, output, format and dimension are not
    /// adjustments.
    pub fn has_adjustments(&self) -> bool {
        let d = &Self::DEFAULT;
        self.exposure != d.exposure
            || self.night_adaptation != d.night_adaptation
            || self.temperature != d.temperature
            || self.tint != d.tint
            || self.out_red != d.out_red
            || self.out_green != d.out_green
            || self.out_blue != d.out_blue
            || self.shadows != d.shadows
            || self.midtones != d.midtones
            || self.highlights != d.highlights
            || self.tonal_ranges != d.tonal_ranges
            || self.slope != d.slope
            || self.offset != d.offset
            || self.power != d.power
            || self.contrast != d.contrast
            || self.vibrance != d.vibrance
            || self.saturation != d.saturation
            || self.curve_gamma != d.curve_gamma
            || self.curve_mid_point != d.curve_mid_point
            || self.curve_scale != d.curve_scale
    }

    /// Returns a copy with every field brought into its valid range.
    pub fn clamped(&self) -> Self {
        ColorGradingBuilder::from_parameters(*self).build()
    }

    /// Starts a builder from these parameters without clamping them.
    pub fn to_builder(&self) -> ColorGradingBuilder {
        ColorGradingBuilder { params: *self }
    }
}

impl Default for GradingParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builds [`GradingParameters`], clamping every value it is handed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorGradingBuilder {
    params: GradingParameters,
}

impl ColorGradingBuilder {
    /// Starts from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing parameters, passing each through its setter.
    pub fn from_parameters(p: GradingParameters) -> Self {
        Self::new()
            .tone_mapper(p.tone_mapper)
            .working_space(p.working_space)
            .luminance_scaling(p.luminance_scaling)
            .gamut_mapping(p.gamut_mapping)
            .exposure(p.exposure)
            .night_adaptation(p.night_adaptation)
            .white_balance(p.temperature, p.tint)
            .channel_mixer(p.out_red, p.out_green, p.out_blue)
            .shadows_midtones_highlights(p.shadows, p.midtones, p.highlights, p.tonal_ranges)
            .slope_offset_power(p.slope, p.offset, p.power)
            .contrast(p.contrast)
            .vibrance(p.vibrance)
            .saturation(p.saturation)
            .curves(p.curve_gamma, p.curve_mid_point, p.curve_scale)
            .output(p.output)
            .format(p.format)
            .dimension(p.dimension)
    }

    /// Tone-mapping operator.
    pub fn tone_mapper(mut self, tone_mapper: ToneMapper) -> Self {
        self.params.tone_mapper = tone_mapper;
        self
    }

    /// Legacy selector; also picks the matching working space.
    pub fn tone_mapping(mut self, tone_mapping: ToneMapping) -> Self {
        let (tm, space) = tone_mapping.resolve();
        self.params.tone_mapper = tm;
        self.params.working_space = space;
        self
    }

    /// Working space of the adjustments.
    pub fn working_space(mut self, space: WorkingSpace) -> Self {
        self.params.working_space = space;
        self
    }

    /// Luminance-only tone mapping.
    pub fn luminance_scaling(mut self, enabled: bool) -> Self {
        self.params.luminance_scaling = enabled;
        self
    }

    /// Gamut mapping of the display output.
    pub fn gamut_mapping(mut self, enabled: bool) -> Self {
        self.params.gamut_mapping = enabled;
        self
    }

    /// Exposure in stops. Unbounded.
    pub fn exposure(mut self, exposure: f32) -> Self {
        self.params.exposure = exposure;
        self
    }

    /// Night adaptation, saturated to [0, 1].
    pub fn night_adaptation(mut self, adaptation: f32) -> Self {
        self.params.night_adaptation = saturate(adaptation);
        self
    }

    /// Temperature and tint, each clamped to [-1, 1].
    pub fn white_balance(mut self, temperature: f32, tint: f32) -> Self {
        self.params.temperature = temperature.clamp(-1.0, 1.0);
        self.params.tint = tint.clamp(-1.0, 1.0);
        self
    }

    /// Channel mixer rows, components clamped to [-2, 2].
    pub fn channel_mixer(mut self, out_red: Vec3, out_green: Vec3, out_blue: Vec3) -> Self {
        self.params.out_red = out_red.clamp_scalar(-2.0, 2.0);
        self.params.out_green = out_green.clamp_scalar(-2.0, 2.0);
        self.params.out_blue = out_blue.clamp_scalar(-2.0, 2.0);
        self
    }

    /// Tonal gains (kept non-negative) and their luminance ranges.
    ///
    /// The outer edges are saturated; the inner edges stay strictly
    /// between them, and the highlights edge never falls below the
    /// shadows edge.
    pub fn shadows_midtones_highlights(
        mut self,
        shadows: Vec3,
        midtones: Vec3,
        highlights: Vec3,
        ranges: [f32; 4],
    ) -> Self {
        self.params.shadows = shadows.max(Vec3::ZERO);
        self.params.midtones = midtones.max(Vec3::ZERO);
        self.params.highlights = highlights.max(Vec3::ZERO);

        let lo = saturate(ranges[0]);
        let hi = saturate(ranges[3]);
        let inner = |v: f32| v.max(lo + RANGE_GAP).min(hi - RANGE_GAP);
        let dark = inner(ranges[1]);
        let light = inner(ranges[2]).max(dark);
        self.params.tonal_ranges = [lo, dark, light, hi];
        self
    }

    /// ASC CDL. Slope and power are kept at or above `1e-5`.
    pub fn slope_offset_power(mut self, slope: Vec3, offset: Vec3, power: Vec3) -> Self {
        self.params.slope = slope.max(Vec3::splat(1e-5));
        self.params.offset = offset;
        self.params.power = power.max(Vec3::splat(1e-5));
        self
    }

    /// Contrast, clamped to [0, 2].
    pub fn contrast(mut self, contrast: f32) -> Self {
        self.params.contrast = contrast.clamp(0.0, 2.0);
        self
    }

    /// Vibrance, clamped to [0, 2].
    pub fn vibrance(mut self, vibrance: f32) -> Self {
        self.params.vibrance = vibrance.clamp(0.0, 2.0);
        self
    }

    /// Saturation, clamped to [0, 2].
    pub fn saturation(mut self, saturation: f32) -> Self {
        self.params.saturation = saturation.clamp(0.0, 2.0);
        self
    }

    /// Curves. Gamma and mid point are kept at or above `1e-5`.
    pub fn curves(mut self, shadow_gamma: Vec3, mid_point: Vec3, highlight_scale: Vec3) -> Self {
        self.params.curve_gamma = shadow_gamma.max(Vec3::splat(1e-5));
        self.params.curve_mid_point = mid_point.max(Vec3::splat(1e-5));
        self.params.curve_scale = highlight_scale;
        self
    }

    /// Output transfer function.
    pub fn output(mut self, output: Oetf) -> Self {
        self.params.output = output;
        self
    }

    /// 3D LUT texel format.
    pub fn format(mut self, format: LutFormat) -> Self {
        self.params.format = format;
        self
    }

    /// 3D LUT edge length, clamped to [16, 64].
    pub fn dimension(mut self, dimension: u32) -> Self {
        self.params.dimension = dimension.clamp(MIN_DIMENSION, MAX_DIMENSION);
        self
    }

    /// Finishes the builder.
    pub fn build(self) -> GradingParameters {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_adjustments() {
        assert!(!GradingParameters::default().has_adjustments());
        assert!(!ColorGradingBuilder::new().build().has_adjustments());
    }

    #[test]
    fn test_each_stage_counts_as_adjustment() {
        let b = ColorGradingBuilder::new;
        assert!(b().exposure(0.1).build().has_adjustments());
        assert!(b().night_adaptation(0.2).build().has_adjustments());
        assert!(b().white_balance(0.0, 0.1).build().has_adjustments());
        assert!(b().vibrance(1.2).build().has_adjustments());
        assert!(b().curves(Vec3::ONE, Vec3::splat(0.5), Vec3::ONE).build().has_adjustments());
        assert!(!b().tone_mapper(ToneMapper::Filmic).build().has_adjustments());
        assert!(!b().gamut_mapping(true).dimension(64).build().has_adjustments());
    }

    #[test]
    fn test_builder_clamps() {
        let p = ColorGradingBuilder::new()
            .night_adaptation(3.0)
            .white_balance(-4.0, 2.0)
            .channel_mixer(Vec3::new(5.0, -5.0, 1.0), Vec3::Y, Vec3::Z)
            .slope_offset_power(Vec3::ZERO, Vec3::splat(-0.1), Vec3::splat(-1.0))
            .contrast(-1.0)
            .vibrance(9.0)
            .saturation(2.5)
            .dimension(4)
            .build();
        assert_eq!(p.night_adaptation, 1.0);
        assert_eq!((p.temperature, p.tint), (-1.0, 1.0));
        assert_eq!(p.out_red, Vec3::new(2.0, -2.0, 1.0));
        assert_eq!(p.slope, Vec3::splat(1e-5));
        assert_eq!(p.offset, Vec3::splat(-0.1));
        assert_eq!(p.power, Vec3::splat(1e-5));
        assert_eq!(p.contrast, 0.0);
        assert_eq!(p.vibrance, 2.0);
        assert_eq!(p.saturation, 2.0);
        assert_eq!(p.dimension, MIN_DIMENSION);
        assert_eq!(ColorGradingBuilder::new().dimension(1000).build().dimension, MAX_DIMENSION);
    }

    #[test]
    fn test_tonal_ranges_stay_ordered() {
        let p = ColorGradingBuilder::new()
            .shadows_midtones_highlights(
                Vec3::splat(-1.0),
                Vec3::ONE,
                Vec3::ONE,
                [-0.5, -0.2, 2.0, 0.8],
            )
            .build();
        let [a, b, c, d] = p.tonal_ranges;
        assert_eq!(a, 0.0);
        assert_eq!(d, 0.8);
        assert!(a < b && b < d);
        assert!(a < c && c < d);
        assert_eq!(p.shadows, Vec3::ZERO);
    }

    #[test]
    fn test_tonal_ranges_inner_edges_not_crossed() {
        let p = ColorGradingBuilder::new()
            .shadows_midtones_highlights(Vec3::ONE, Vec3::ONE, Vec3::ONE, [0.0, 0.7, 0.3, 1.0])
            .build();
        let [a, b, c, d] = p.tonal_ranges;
        assert_eq!((a, d), (0.0, 1.0));
        assert_eq!(b, 0.7);
        assert!(b <= c && c < d);
    }

    #[test]
    fn test_filmic_selector_switches_working_space() {
        let p = ColorGradingBuilder::new().tone_mapping(ToneMapping::Filmic).build();
        assert_eq!(p.tone_mapper, ToneMapper::Filmic);
        assert_eq!(p.working_space, WorkingSpace::Rec709);

        let p = ColorGradingBuilder::new().tone_mapping(ToneMapping::Aces).build();
        assert_eq!(p.working_space, WorkingSpace::Rec2020);
    }

    #[test]
    fn test_clamped_is_stable() {
        let mut raw = GradingParameters::default();
        raw.contrast = 7.0;
        raw.dimension = 3;
        let once = raw.clamped();
        assert_eq!(once.clamped(), once);
        assert_eq!(GradingParameters::default().clamped(), GradingParameters::default());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "exposure: 1.5\nslope: [1.1, 1.0, 0.9]\ntone_mapper:\n  type: filmic\nformat: float\n";
        let p: GradingParameters = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(p.exposure, 1.5);
        assert_eq!(p.slope, Vec3::new(1.1, 1.0, 0.9));
        assert_eq!(p.tone_mapper, ToneMapper::Filmic);
        assert_eq!(p.format, LutFormat::Float);
        assert_eq!(p.contrast, 1.0);
        assert_eq!(p.dimension, DEFAULT_DIMENSION);
    }
}
