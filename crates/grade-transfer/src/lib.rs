//! # grade-transfer
//!
//! Transfer functions used by the grading pipeline.
//!
//! # Terminology
//!
//! - **OETF** (Opto-Electronic Transfer Function): Linear -> Encoded
//! - **EOTF** (Electro-Optical Transfer Function): Encoded -> Linear
//!
//! # Supported Functions
//!
//! | Module | Role in the pipeline |
//! |--------|----------------------|
//! | [`srgb`] | SDR output encoding |
//! | [`pq`] | HDR output encoding (ST 2084), 1.0 = 100 cd/m2 |
//! | [`log_c`] | LUT input domain and the CDL/contrast grading space |
//! | [`acescct`] | Reference for the contrast pivot |
//! | [`gamma`] | Pure power curves (AgX display encoding) |
//!
//! # Usage
//!
//! ```rust
//! use grade_transfer::{log_c, Oetf};
//!
//! // LUT coordinates are LogC encoded
//! let linear = log_c::decode(0.5);
//! let display = Oetf::Srgb.apply(linear.clamp(0.0, 1.0));
//! assert!(display > 0.0 && display <= 1.0);
//! ```
//!
//! # Used By
//!
//! - `grade-tonemap` - AgX display gamma
//! - `grade-color` - LUT domain decode, CDL space, output encoding

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod acescct;
pub mod gamma;
pub mod log_c;
pub mod pq;
pub mod srgb;

/// Output encoding applied as the last pipeline step.
///
/// The display primaries are always sRGB/Rec.709; only the curve varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Oetf {
    /// No encoding, linear output.
    Linear,
    /// sRGB piecewise curve.
    #[default]
    Srgb,
    /// SMPTE ST 2084, normalized so 1.0 is 100 cd/m2.
    Pq,
}

impl Oetf {
    /// Encodes one linear value.
    #[inline]
    pub fn apply(self, x: f32) -> f32 {
        match self {
            Self::Linear => x,
            Self::Srgb => srgb::oetf(x),
            Self::Pq => pq::oetf_normalized(x),
        }
    }

    /// Encodes an RGB triplet.
    #[inline]
    pub fn apply_rgb(self, rgb: [f32; 3]) -> [f32; 3] {
        rgb.map(|c| self.apply(c))
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Srgb => "sRGB",
            Self::Pq => "PQ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oetf_dispatch() {
        assert_eq!(Oetf::Linear.apply(0.25), 0.25);
        assert_eq!(Oetf::Srgb.apply(0.25), srgb::oetf(0.25));
        assert_eq!(Oetf::Pq.apply(0.25), pq::oetf_normalized(0.25));
    }

    #[test]
    fn test_oetf_default_is_srgb() {
        assert_eq!(Oetf::default(), Oetf::Srgb);
    }
}
