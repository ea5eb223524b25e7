//! # grade-tonemap
//!
//! Tone-mapping operators: scene-referred linear Rec.2020 in, display
//! linear Rec.2020 out (nominally [0, 1]).
//!
//! # Operators
//!
//! | Operator | 1D | LDR | Notes |
//! |----------|----|-----|-------|
//! | [`ToneMapper::Linear`] | yes | yes | clamp to [0, 1] |
//! | [`ToneMapper::Reinhard`] | no | no | luminance based |
//! | [`ToneMapper::Filmic`] | yes | no | Narkowicz ACES fit |
//! | [`ToneMapper::Aces`] | no | no | RRT + ODT fit, glow, red modifier |
//! | [`ToneMapper::AcesLegacy`] | no | no | as `Aces`, 1/0.6 brighter |
//! | [`ToneMapper::Agx`] | no | no | AgX with optional look |
//! | [`ToneMapper::Generic`] | yes | no | configurable contrast curve |
//! | [`ToneMapper::PbrNeutral`] | no | yes | Khronos PBR Neutral |
//! | [`ToneMapper::DisplayRange`] | no | yes | false-color exposure ramp |
//!
//! **1D** operators act on each channel independently, so the pipeline may
//! bake a 1D LUT for them. **LDR** operators only care about input in
//! [0, 1] and never produce output above 1, so a 1D LUT for them is
//! indexed by linear input directly.
//!
//! # Usage
//!
//! ```rust
//! use grade_math::Vec3;
//! use grade_tonemap::ToneMapper;
//!
//! let tm = ToneMapper::Filmic;
//! let out = tm.apply(Vec3::splat(0.18));
//! assert!(out.x > 0.0 && out.x < 1.0);
//! assert!(tm.is_one_dimensional());
//! ```
//!
//! # Dependencies
//!
//! - `grade-math` - vector math
//! - `grade-primaries` - ACES matrices and luminance weights
//! - `grade-transfer` - AgX display gamma
//! - `serde` - tone mapper selection in grading presets
//!
//! # Used By
//!
//! - `grade-color` - the LUT evaluation pipeline

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod aces;
pub mod agx;
pub mod curves;
pub mod display_range;
pub mod generic;
pub mod pbr_neutral;

pub use agx::AgxLook;
pub use generic::{GenericParameters, GenericToneMapper};

use grade_math::Vec3;
use serde::{Deserialize, Serialize};

/// Brightness multiplier applied by [`ToneMapper::AcesLegacy`].
pub const ACES_LEGACY_BRIGHTNESS: f32 = 1.0 / 0.6;

/// A tone-mapping operator and its parameters.
///
/// Values are immutable; parameterized variants carry their derived
/// constants so [`ToneMapper::apply`] does no setup work per call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ToneMapper {
    /// Clamp to [0, 1].
    Linear,
    /// `x / (1 + luminance(x))`.
    Reinhard,
    /// Narkowicz's fit of the ACES filmic curve, per channel.
    Filmic,
    /// Approximated ACES RRT + ODT.
    Aces,
    /// ACES with the brightness of older releases.
    #[default]
    AcesLegacy,
    /// AgX.
    Agx {
        /// Creative look applied after the base curve.
        #[serde(default)]
        look: AgxLook,
    },
    /// Generic contrast curve.
    Generic(GenericToneMapper),
    /// Khronos PBR Neutral.
    PbrNeutral,
    /// False-color exposure visualization.
    DisplayRange,
}

impl ToneMapper {
    /// Every operator with default parameters, in declaration order.
    pub const ALL: [ToneMapper; 9] = [
        Self::Linear,
        Self::Reinhard,
        Self::Filmic,
        Self::Aces,
        Self::AcesLegacy,
        Self::Agx { look: AgxLook::None },
        Self::Generic(GenericToneMapper::DEFAULT),
        Self::PbrNeutral,
        Self::DisplayRange,
    ];

    /// Maps a scene-referred linear Rec.2020 color to display linear.
    #[inline]
    pub fn apply(&self, c: Vec3) -> Vec3 {
        match self {
            Self::Linear => curves::linear(c),
            Self::Reinhard => curves::reinhard(c),
            Self::Filmic => curves::filmic(c),
            Self::Aces => aces::aces(c, 1.0),
            Self::AcesLegacy => aces::aces(c, ACES_LEGACY_BRIGHTNESS),
            Self::Agx { look } => agx::agx(c, *look),
            Self::Generic(tm) => tm.apply(c),
            Self::PbrNeutral => pbr_neutral::pbr_neutral(c),
            Self::DisplayRange => display_range::display_range(c),
        }
    }

    /// True when each output channel depends only on the same input channel.
    pub fn is_one_dimensional(&self) -> bool {
        matches!(self, Self::Linear | Self::Filmic | Self::Generic(_))
    }

    /// True when only input in [0, 1] matters and output never exceeds 1.
    pub fn is_ldr(&self) -> bool {
        matches!(self, Self::Linear | Self::PbrNeutral | Self::DisplayRange)
    }

    /// Short operator name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Reinhard => "reinhard",
            Self::Filmic => "filmic",
            Self::Aces => "aces",
            Self::AcesLegacy => "aces-legacy",
            Self::Agx { .. } => "agx",
            Self::Generic(_) => "generic",
            Self::PbrNeutral => "pbr-neutral",
            Self::DisplayRange => "display-range",
        }
    }

    /// Looks up a default-parameter operator by [`ToneMapper::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tm| tm.name() == name)
    }
}
