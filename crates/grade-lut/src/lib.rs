//! # grade-lut
//!
//! Bakes color grading LUTs in parallel and hands them to a device.
//!
//! # Flow
//!
//! ```text
//! GradingParameters
//!   -> LutBaker          resolves the pipeline, picks 1D or 3D
//!   -> LutGrid           512 half floats, or dim^3 half4 / 10-10-10-2 cells
//!   -> PixelBuffer       owns the grid, released once by the device
//!   -> DeviceSurface     create_texture + upload_3d
//! ```
//!
//! [`ColorGrading`] does all of it in one call.
//!
//! # Usage
//!
//! ```rust
//! use grade_color::{ColorGradingBuilder, LutFormat};
//! use grade_lut::{ColorGrading, LutKind, MemorySurface, TextureFormat};
//!
//! let params = ColorGradingBuilder::new()
//!     .exposure(0.3)
//!     .dimension(16)
//!     .format(LutFormat::Integer)
//!     .build();
//!
//! let mut surface = MemorySurface::new();
//! let grading = ColorGrading::new(&mut surface, &params).unwrap();
//! assert_eq!(grading.kind(), LutKind::ThreeDimensional);
//! assert_eq!(grading.format(), TextureFormat::Rgb10A2);
//! grading.destroy(&mut surface);
//! ```
//!
//! # Dependencies
//!
//! - `grade-color` - per-cell evaluation
//! - `rayon` - slice-parallel baking
//! - `half`, `bytemuck` - texel storage and raw upload bytes
//! - `thiserror` - [`LutError`]
//! - `tracing` - bake and upload events
//!
//! # Used By
//!
//! - `grade-cli` - `.cube` export
//! - `grade-bench` - bake benchmarks

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod bake;
pub mod cube;
mod error;
mod grid;
pub mod quantize;
pub mod surface;
mod texture;

pub use bake::LutBaker;
pub use cube::{CubeFile, parse_cube, read_cube, write_cube, write_cube_to};
pub use error::{LutError, LutResult};
pub use grid::{LutData, LutGrid, LutKind, slice_range};
pub use quantize::{pack_1010102, unpack_1010102};
pub use surface::{
    DeviceSurface, MemorySurface, MemoryTexture, PixelBuffer, PixelFormat, PixelType, Sampler,
    TextureDesc, TextureFormat, TextureHandle,
};
pub use texture::ColorGrading;
