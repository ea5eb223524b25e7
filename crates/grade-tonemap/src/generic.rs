//! Configurable contrast curve.
//!
//! The curve passes through `(mid_gray_in, mid_gray_out)` and reaches 1.0
//! at `hdr_max`:
//!
//! ```text
//! y = output_scale * x^contrast / (x^contrast + input_scale)
//! ```

use grade_math::Vec3;
use serde::{Deserialize, Serialize};

const MIN_DENOMINATOR: f32 = 1e-6;

/// Raw parameters of a [`GenericToneMapper`], as written in presets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericParameters {
    /// Slope of the curve around middle gray.
    pub contrast: f32,
    /// Scene-referred middle gray.
    pub mid_gray_in: f32,
    /// Display-referred value for middle gray.
    pub mid_gray_out: f32,
    /// Scene-referred value mapped to 1.0.
    pub hdr_max: f32,
}

impl Default for GenericParameters {
    fn default() -> Self {
        Self {
            contrast: GenericToneMapper::DEFAULT.contrast,
            mid_gray_in: GenericToneMapper::DEFAULT.mid_gray_in,
            mid_gray_out: GenericToneMapper::DEFAULT.mid_gray_out,
            hdr_max: GenericToneMapper::DEFAULT.hdr_max,
        }
    }
}

/// Generic tone mapper with eagerly derived curve constants.
///
/// Immutable: use the `with_*` methods to derive a new mapper.
///
/// # Example
///
/// ```rust
/// use grade_math::Vec3;
/// use grade_tonemap::GenericToneMapper;
///
/// let tm = GenericToneMapper::new(1.6, 0.18, 0.227, 64.0);
/// let y = tm.apply(Vec3::splat(0.18)).y;
/// assert!((y - 0.227).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "GenericParameters", into = "GenericParameters")]
pub struct GenericToneMapper {
    contrast: f32,
    mid_gray_in: f32,
    mid_gray_out: f32,
    hdr_max: f32,
    input_scale: f32,
    output_scale: f32,
}

impl GenericToneMapper {
    /// Mapper for contrast 1.55, mid gray 0.18 -> 0.215, hdr max 10.
    pub const DEFAULT: Self = Self {
        contrast: 1.55,
        mid_gray_in: 0.18,
        mid_gray_out: 0.215,
        hdr_max: 10.0,
        input_scale: 0.258_292_9,
        output_scale: 1.007_279_7,
    };

    /// Builds a mapper, clamping the parameters to their valid ranges and
    /// deriving the curve constants.
    ///
    /// `contrast >= 1e-5`, mid grays in `[1e-5, 1]`, `hdr_max >= 1`.
    /// Parameter sets whose curve cannot pass through both anchors (for
    /// example `mid_gray_in == mid_gray_out` with `hdr_max == 1`) get a
    /// floored denominator, so the curve stays finite.
    pub fn new(contrast: f32, mid_gray_in: f32, mid_gray_out: f32, hdr_max: f32) -> Self {
        let contrast = contrast.max(1e-5);
        let mid_gray_in = mid_gray_in.clamp(1e-5, 1.0);
        let mid_gray_out = mid_gray_out.clamp(1e-5, 1.0);
        let hdr_max = hdr_max.max(1.0);

        let a = mid_gray_in.powf(contrast);
        let b = hdr_max.powf(contrast);
        // c < 0 keeps both scales non-negative; c == 0 would divide by zero
        let c = (a - mid_gray_out * b).min(-MIN_DENOMINATOR);
        Self {
            contrast,
            mid_gray_in,
            mid_gray_out,
            hdr_max,
            input_scale: (a * b * (mid_gray_out - 1.0)) / c,
            output_scale: mid_gray_out * (a - b) / c,
        }
    }

    /// Contrast parameter.
    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    /// Scene-referred middle gray.
    pub fn mid_gray_in(&self) -> f32 {
        self.mid_gray_in
    }

    /// Display-referred middle gray.
    pub fn mid_gray_out(&self) -> f32 {
        self.mid_gray_out
    }

    /// Scene-referred value mapped to 1.0.
    pub fn hdr_max(&self) -> f32 {
        self.hdr_max
    }

    /// Derived denominator offset.
    pub fn input_scale(&self) -> f32 {
        self.input_scale
    }

    /// Derived numerator scale.
    pub fn output_scale(&self) -> f32 {
        self.output_scale
    }

    /// New mapper with a different contrast.
    pub fn with_contrast(&self, contrast: f32) -> Self {
        Self::new(contrast, self.mid_gray_in, self.mid_gray_out, self.hdr_max)
    }

    /// New mapper with a different scene-referred middle gray.
    pub fn with_mid_gray_in(&self, mid_gray_in: f32) -> Self {
        Self::new(self.contrast, mid_gray_in, self.mid_gray_out, self.hdr_max)
    }

    /// New mapper with a different display-referred middle gray.
    pub fn with_mid_gray_out(&self, mid_gray_out: f32) -> Self {
        Self::new(self.contrast, self.mid_gray_in, mid_gray_out, self.hdr_max)
    }

    /// New mapper with a different white point.
    pub fn with_hdr_max(&self, hdr_max: f32) -> Self {
        Self::new(self.contrast, self.mid_gray_in, self.mid_gray_out, hdr_max)
    }

    /// Applies the curve per channel.
    #[inline]
    pub fn apply(&self, x: Vec3) -> Vec3 {
        x.map(|c| {
            let p = c.powf(self.contrast);
            self.output_scale * p / (p + self.input_scale).max(f32::MIN_POSITIVE)
        })
    }
}

impl Default for GenericToneMapper {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<GenericParameters> for GenericToneMapper {
    fn from(p: GenericParameters) -> Self {
        Self::new(p.contrast, p.mid_gray_in, p.mid_gray_out, p.hdr_max)
    }
}

impl From<GenericToneMapper> for GenericParameters {
    fn from(tm: GenericToneMapper) -> Self {
        Self {
            contrast: tm.contrast,
            mid_gray_in: tm.mid_gray_in,
            mid_gray_out: tm.mid_gray_out,
            hdr_max: tm.hdr_max,
        }
    }
}
