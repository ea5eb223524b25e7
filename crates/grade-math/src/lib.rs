//! # grade-math
//!
//! Math primitives for the color-grading pipeline.
//!
//! - [`Vec3`] - RGB, XYZ, LMS and Lab triplets
//! - [`Mat3`] - 3x3 color space matrices, usable in `const` context
//! - Interpolation helpers shaped after shader intrinsics ([`mix`], [`smoothstep`], [`saturate`])
//! - Chromaticity helpers for white balance ([`xyy_to_xyz`], [`daylight_locus_y`])
//!
//! # Design
//!
//! All matrices are stored **row-major** and act on **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! Matrix products are `const fn`, so a compound transform can be declared as
//! the product of its named constituents and evaluated at compile time:
//!
//! ```rust
//! use grade_math::Mat3;
//!
//! const A: Mat3 = Mat3::diagonal(2.0, 2.0, 2.0);
//! const B: Mat3 = Mat3::diagonal(0.5, 0.5, 0.5);
//! const AB: Mat3 = A.mul_mat(&B);
//! assert_eq!(AB, Mat3::IDENTITY);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - interop with engine-side math types
//! - `serde` (optional) - (de)serialization of [`Vec3`] in grading presets
//!
//! # Used By
//!
//! - `grade-primaries` - named and compound color matrices
//! - `grade-tonemap` - tone-mapping operators
//! - `grade-color` - adjustments and the evaluation pipeline

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod adapt;
mod interp;
mod mat3;
mod vec3;

pub use adapt::*;
pub use interp::*;
pub use mat3::*;
pub use vec3::*;

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::{Mat3 as GlamMat3, Vec3 as GlamVec3};
}
