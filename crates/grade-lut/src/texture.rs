//! The color grading texture resource.

use grade_color::GradingParameters;
use tracing::debug;

use crate::bake::LutBaker;
use crate::error::LutResult;
use crate::grid::{LutGrid, LutKind};
use crate::surface::{DeviceSurface, PixelBuffer, Sampler, TextureDesc, TextureFormat, TextureHandle};

/// A baked grading LUT living in a device texture.
///
/// Created by baking and uploading in one step. The texture stays alive
/// until [`ColorGrading::destroy`] is called with the surface that owns it.
#[derive(Debug)]
#[must_use = "the texture leaks on the surface unless destroyed"]
pub struct ColorGrading {
    handle: TextureHandle,
    kind: LutKind,
    dimension: usize,
    format: TextureFormat,
}

impl ColorGrading {
    /// Bakes the LUT for `params` and uploads it to `surface`.
    pub fn new(surface: &mut impl DeviceSurface, params: &GradingParameters) -> LutResult<Self> {
        Self::with_baker(surface, &LutBaker::new(params))
    }

    /// Bakes with an existing baker and uploads the result to `surface`.
    pub fn with_baker(surface: &mut impl DeviceSurface, baker: &LutBaker) -> LutResult<Self> {
        Self::upload(surface, baker.bake())
    }

    /// Uploads an already baked grid.
    pub fn upload(surface: &mut impl DeviceSurface, grid: LutGrid) -> LutResult<Self> {
        let kind = grid.kind();
        let dimension = grid.dimension();
        let extent = grid.extent();
        let format = grid.data().texture_format();
        let sampler = match kind {
            LutKind::OneDimensional => Sampler::Sampler2d,
            LutKind::ThreeDimensional => Sampler::Sampler3d,
        };

        let handle = surface.create_texture(&TextureDesc::new(sampler, extent, format))?;

        let size = grid.data().as_bytes().len();
        let buffer = PixelBuffer::new(grid.into_data()).with_release(move |data| {
            debug!(texels = data.len(), "Released LUT buffer");
        });

        if let Err(e) = surface.upload_3d(handle, 0, [0; 3], extent, buffer) {
            surface.destroy_texture(handle);
            return Err(e);
        }

        debug!(?handle, ?kind, dimension, ?format, bytes = size, "Uploaded color grading LUT");
        Ok(Self {
            handle,
            kind,
            dimension,
            format,
        })
    }

    /// Device texture.
    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    /// Curve or cube.
    pub fn kind(&self) -> LutKind {
        self.kind
    }

    /// Entries of a 1D LUT, or the edge length of a 3D LUT.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Texture storage format.
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Releases the texture.
    pub fn destroy(self, surface: &mut impl DeviceSurface) {
        surface.destroy_texture(self.handle);
    }
}
