//! # grade-color
//!
//! Color grading: the adjustment stages, gamut mapping, the grading
//! parameters and the pipeline that evaluates one LUT cell.
//!
//! # Architecture
//!
//! ```text
//! grade-color
//! +-- params             GradingParameters, ColorGradingBuilder (clamping)
//! +-- adjust             exposure, white balance, mixer, CDL, vibrance, curves
//! +-- scotopic           night adaptation
//! +-- luminance_scaling  luminance-only tone mapping
//! +-- gamut              OkLab gamut mapping into sRGB
//! +-- pipeline           ColorGradingPipeline, LutMode
//! ```
//!
//! Building a LUT out of cells is left to `grade-lut`; this crate has no
//! notion of memory layout or threads.
//!
//! # Usage
//!
//! ```rust
//! use grade_color::{ColorGradingBuilder, ColorGradingPipeline, LutMode};
//! use grade_color::tonemap::ToneMapper;
//! use grade_math::Vec3;
//!
//! let params = ColorGradingBuilder::new()
//!     .tone_mapper(ToneMapper::Agx { look: Default::default() })
//!     .exposure(0.5)
//!     .build();
//!
//! let pipeline = ColorGradingPipeline::new(&params);
//! assert_eq!(pipeline.mode(), LutMode::ThreeDimensional);
//!
//! let display = pipeline.grade(Vec3::splat(0.18));
//! assert!(display.all_within(0.0, 1.0));
//! ```
//!
//! # Dependencies
//!
//! - `grade-math`, `grade-transfer`, `grade-primaries` - color math
//! - `grade-tonemap` - tone-mapping operators
//! - `serde` - grading presets
//! - `tracing` - pipeline resolution events
//!
//! # Used By
//!
//! - `grade-lut` - LUT baking
//! - `grade-cli` - single color evaluation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adjust;
pub mod gamut;
pub mod luminance_scaling;
mod params;
pub mod pipeline;
pub mod scotopic;

pub use params::{
    ColorGradingBuilder, DEFAULT_DIMENSION, GradingParameters, LutFormat, MAX_DIMENSION,
    MIN_DIMENSION, ToneMapping, WorkingSpace,
};
pub use pipeline::{ColorGradingPipeline, LUT_1D_SIZE, LutMode};

pub use grade_math as math;
pub use grade_primaries as primaries;
pub use grade_tonemap as tonemap;
pub use grade_transfer as transfer;
