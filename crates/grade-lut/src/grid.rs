//! Baked LUT storage.
//!
//! A [`LutGrid`] is written once by the baker and never modified; it is
//! moved, not shared, into a [`PixelBuffer`](crate::PixelBuffer) for
//! upload.
//!
//! 3D cells are laid out red fastest, then green, then blue:
//!
//! ```text
//! index(r, g, b) = r + g * dim + b * dim * dim
//! ```

use std::ops::Range;

use half::f16;

use crate::quantize::unpack_1010102;
use crate::surface::{PixelFormat, PixelType, TextureFormat};

/// Whether a grid is a curve or a cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LutKind {
    /// One curve shared by all channels.
    OneDimensional,
    /// A full RGB cube.
    ThreeDimensional,
}

/// Texel data of a baked LUT.
#[derive(Debug, Clone, PartialEq)]
pub enum LutData {
    /// 1D curve, one half float per entry.
    Half1d(Vec<f16>),
    /// 3D cube, RGBA half floats with zero alpha.
    Half4(Vec<[f16; 4]>),
    /// 3D cube, 10-10-10-2 packed.
    Packed(Vec<u32>),
}

impl Default for LutData {
    fn default() -> Self {
        Self::Half1d(Vec::new())
    }
}

impl LutData {
    /// Number of texels.
    pub fn len(&self) -> usize {
        match self {
            Self::Half1d(v) => v.len(),
            Self::Half4(v) => v.len(),
            Self::Packed(v) => v.len(),
        }
    }

    /// True when there are no texels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw texel bytes in native endianness.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Half1d(v) => bytemuck::cast_slice(v),
            Self::Half4(v) => bytemuck::cast_slice(v),
            Self::Packed(v) => bytemuck::cast_slice(v),
        }
    }

    /// Pixel layout of the data as handed to a device.
    pub fn pixel_layout(&self) -> (PixelFormat, PixelType) {
        match self {
            Self::Half1d(_) => (PixelFormat::R, PixelType::Half),
            Self::Half4(_) => (PixelFormat::Rgba, PixelType::Half),
            Self::Packed(_) => (PixelFormat::Rgba, PixelType::UInt2101010Rev),
        }
    }

    /// Texture format able to hold the data.
    pub fn texture_format(&self) -> TextureFormat {
        match self {
            Self::Half1d(_) => TextureFormat::R16F,
            Self::Half4(_) => TextureFormat::Rgba16F,
            Self::Packed(_) => TextureFormat::Rgb10A2,
        }
    }

    /// Decoded RGB of texel `i`. 1D entries are replicated to all channels.
    pub fn rgb(&self, i: usize) -> [f32; 3] {
        match self {
            Self::Half1d(v) => [v[i].to_f32(); 3],
            Self::Half4(v) => [v[i][0].to_f32(), v[i][1].to_f32(), v[i][2].to_f32()],
            Self::Packed(v) => unpack_1010102(v[i]),
        }
    }
}

/// A baked 1D or 3D LUT.
#[derive(Debug, Clone, PartialEq)]
pub struct LutGrid {
    dimension: usize,
    kind: LutKind,
    data: LutData,
}

impl LutGrid {
    pub(crate) fn new(dimension: usize, kind: LutKind, data: LutData) -> Self {
        Self { dimension, kind, data }
    }

    /// Entries of a 1D LUT, or the edge length of a 3D LUT.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Curve or cube.
    pub fn kind(&self) -> LutKind {
        self.kind
    }

    /// Texel data.
    pub fn data(&self) -> &LutData {
        &self.data
    }

    /// Gives up the texel data.
    pub fn into_data(self) -> LutData {
        self.data
    }

    /// Texture extent `[width, height, depth]`.
    pub fn extent(&self) -> [u32; 3] {
        let d = self.dimension as u32;
        match self.kind {
            LutKind::OneDimensional => [d, 1, 1],
            LutKind::ThreeDimensional => [d, d, d],
        }
    }

    /// Decoded RGB of a 3D cell, or of 1D entry `r` when the grid is a curve.
    pub fn sample(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        match self.kind {
            LutKind::OneDimensional => self.data.rgb(r),
            LutKind::ThreeDimensional => {
                let d = self.dimension;
                self.data.rgb(r + g * d + b * d * d)
            }
        }
    }
}

/// Element range of blue slice `b` in a cube of edge `dim`.
#[inline]
pub fn slice_range(b: usize, dim: usize) -> Range<usize> {
    let len = dim * dim;
    b * len..(b + 1) * len
}
