//! Device surface contract.
//!
//! The baker never talks to a GPU directly. It asks a [`DeviceSurface`] to
//! create a texture and hands it a [`PixelBuffer`] that owns the texel
//! data. The surface releases the buffer when it is done with it; the
//! release callback runs exactly once, on [`PixelBuffer::release`] or when
//! the buffer is dropped, whichever comes first.
//!
//! [`MemorySurface`] keeps textures in process memory. It backs the tests
//! and the command-line tool.
//!
//! ```rust
//! use grade_lut::{DeviceSurface, MemorySurface, Sampler, TextureDesc, TextureFormat};
//!
//! let mut surface = MemorySurface::new();
//! let desc = TextureDesc::new(Sampler::Sampler3d, [16, 16, 16], TextureFormat::Rgb10A2);
//! let handle = surface.create_texture(&desc).unwrap();
//! assert_eq!(surface.texture(handle).unwrap().bytes().len(), 16 * 16 * 16 * 4);
//! surface.destroy_texture(handle);
//! assert!(surface.is_empty());
//! ```

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{LutError, LutResult};
use crate::grid::LutData;

// ============================================================================
// Descriptors
// ============================================================================

/// Opaque texture identifier issued by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

/// Texture dimensionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sampler {
    /// Two-dimensional texture; 1D LUTs use a height of 1.
    Sampler2d,
    /// Three-dimensional texture.
    Sampler3d,
}

/// Internal texture storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// Single half float channel.
    R16F,
    /// Four half float channels.
    Rgba16F,
    /// 10-bit RGB with 2-bit alpha.
    Rgb10A2,
}

/// Channel layout of uploaded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// One channel.
    R,
    /// Four channels.
    Rgba,
}

/// Component type of uploaded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelType {
    /// IEEE half float per channel.
    Half,
    /// One `u32` per texel, red in the low 10 bits, alpha in the top 2.
    UInt2101010Rev,
}

impl TextureFormat {
    /// Bytes per texel.
    pub fn texel_size(self) -> usize {
        match self {
            Self::R16F => 2,
            Self::Rgba16F => 8,
            Self::Rgb10A2 => 4,
        }
    }

    /// True when data of this layout can be uploaded into this format.
    pub fn accepts(self, format: PixelFormat, ty: PixelType) -> bool {
        matches!(
            (self, format, ty),
            (Self::R16F, PixelFormat::R, PixelType::Half)
                | (Self::Rgba16F, PixelFormat::Rgba, PixelType::Half)
                | (Self::Rgb10A2, PixelFormat::Rgba, PixelType::UInt2101010Rev)
        )
    }
}

/// Texture creation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureDesc {
    /// Dimensionality.
    pub sampler: Sampler,
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Depth in texels, 1 for 2D textures.
    pub depth: u32,
    /// Mip levels.
    pub levels: u8,
    /// Storage format.
    pub format: TextureFormat,
}

impl TextureDesc {
    /// Single-level texture of the given extent.
    pub fn new(sampler: Sampler, extent: [u32; 3], format: TextureFormat) -> Self {
        Self {
            sampler,
            width: extent[0],
            height: extent[1],
            depth: extent[2],
            levels: 1,
            format,
        }
    }

    /// Number of texels in level 0.
    pub fn texel_count(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }
}

// ============================================================================
// Pixel buffer
// ============================================================================

/// Callback receiving the texel data back once a surface is done with it.
pub type ReleaseCallback = Box<dyn FnOnce(LutData) + Send>;

/// Texel data in flight to a device, with its layout and release hook.
pub struct PixelBuffer {
    data: LutData,
    format: PixelFormat,
    ty: PixelType,
    on_release: Option<ReleaseCallback>,
}

impl PixelBuffer {
    /// Wraps `data`; the layout follows from its variant.
    pub fn new(data: LutData) -> Self {
        let (format, ty) = data.pixel_layout();
        Self {
            data,
            format,
            ty,
            on_release: None,
        }
    }

    /// Sets the callback run when the buffer is released.
    pub fn with_release(mut self, callback: impl FnOnce(LutData) + Send + 'static) -> Self {
        self.on_release = Some(Box::new(callback));
        self
    }

    /// Channel layout.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Component type.
    pub fn pixel_type(&self) -> PixelType {
        self.ty
    }

    /// Texel data.
    pub fn data(&self) -> &LutData {
        &self.data
    }

    /// Raw bytes.
    pub fn bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes().len()
    }

    /// Hands the data to the release callback, if any, and frees the buffer.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for PixelBuffer {
    fn drop(&mut self) {
        if let Some(callback) = self.on_release.take() {
            callback(std::mem::take(&mut self.data));
        }
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("format", &self.format)
            .field("type", &self.ty)
            .field("size", &self.size())
            .field("on_release", &self.on_release.is_some())
            .finish()
    }
}

// ============================================================================
// Surface
// ============================================================================

/// Narrow interface to the device that stores LUT textures.
pub trait DeviceSurface {
    /// Creates a texture.
    fn create_texture(&mut self, desc: &TextureDesc) -> LutResult<TextureHandle>;

    /// Uploads a box of texels into `level` of a texture.
    ///
    /// Takes ownership of `buffer` and releases it once the data is
    /// consumed.
    fn upload_3d(
        &mut self,
        handle: TextureHandle,
        level: u8,
        offset: [u32; 3],
        extent: [u32; 3],
        buffer: PixelBuffer,
    ) -> LutResult<()>;

    /// Destroys a texture. Unknown handles are ignored.
    fn destroy_texture(&mut self, handle: TextureHandle);
}

/// A texture held by [`MemorySurface`].
#[derive(Debug, Clone)]
pub struct MemoryTexture {
    desc: TextureDesc,
    bytes: Vec<u8>,
    uploads: usize,
}

impl MemoryTexture {
    /// Creation parameters.
    pub fn desc(&self) -> &TextureDesc {
        &self.desc
    }

    /// Level 0 contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of uploads received.
    pub fn uploads(&self) -> usize {
        self.uploads
    }
}

/// In-process [`DeviceSurface`].
#[derive(Debug, Default)]
pub struct MemorySurface {
    textures: HashMap<TextureHandle, MemoryTexture>,
    next_id: u32,
}

impl MemorySurface {
    /// Empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a live texture.
    pub fn texture(&self, handle: TextureHandle) -> Option<&MemoryTexture> {
        self.textures.get(&handle)
    }

    /// Number of live textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// True when no textures are alive.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl DeviceSurface for MemorySurface {
    fn create_texture(&mut self, desc: &TextureDesc) -> LutResult<TextureHandle> {
        if desc.texel_count() == 0 {
            return Err(LutError::InvalidSize(format!(
                "{}x{}x{}",
                desc.width, desc.height, desc.depth
            )));
        }
        if desc.sampler == Sampler::Sampler2d && desc.depth != 1 {
            return Err(LutError::Surface(format!("2D texture with depth {}", desc.depth)));
        }
        if desc.levels != 1 {
            return Err(LutError::Surface(format!("{} mip levels requested", desc.levels)));
        }

        let handle = TextureHandle(self.next_id);
        self.next_id += 1;
        let bytes = vec![0; desc.texel_count() * desc.format.texel_size()];
        debug!(
            ?handle,
            format = ?desc.format,
            width = desc.width,
            height = desc.height,
            depth = desc.depth,
            "Created texture"
        );
        self.textures.insert(handle, MemoryTexture { desc: *desc, bytes, uploads: 0 });
        Ok(handle)
    }

    fn upload_3d(
        &mut self,
        handle: TextureHandle,
        level: u8,
        offset: [u32; 3],
        extent: [u32; 3],
        buffer: PixelBuffer,
    ) -> LutResult<()> {
        let tex = self
            .textures
            .get_mut(&handle)
            .ok_or(LutError::UnknownTexture(handle))?;
        let desc = tex.desc;

        if level != 0 {
            return Err(LutError::Surface(format!("level {level} out of range")));
        }
        if !desc.format.accepts(buffer.format(), buffer.pixel_type()) {
            return Err(LutError::Surface(format!(
                "{:?}/{:?} data for a {:?} texture",
                buffer.format(),
                buffer.pixel_type(),
                desc.format
            )));
        }
        let dims = [desc.width, desc.height, desc.depth];
        for axis in 0..3 {
            if offset[axis] as u64 + extent[axis] as u64 > dims[axis] as u64 {
                return Err(LutError::InvalidSize(format!(
                    "box {offset:?}+{extent:?} outside {dims:?}"
                )));
            }
        }

        let texel = desc.format.texel_size();
        let row = extent[0] as usize * texel;
        let expected = row * extent[1] as usize * extent[2] as usize;
        if buffer.size() != expected {
            return Err(LutError::InvalidSize(format!(
                "{} bytes for a box of {} bytes",
                buffer.size(),
                expected
            )));
        }

        let src = buffer.bytes();
        let (w, h) = (desc.width as usize, desc.height as usize);
        for z in 0..extent[2] as usize {
            for y in 0..extent[1] as usize {
                let s = (z * extent[1] as usize + y) * row;
                let dz = offset[2] as usize + z;
                let dy = offset[1] as usize + y;
                let d = ((dz * h + dy) * w + offset[0] as usize) * texel;
                tex.bytes[d..d + row].copy_from_slice(&src[s..s + row]);
            }
        }
        tex.uploads += 1;

        trace!(?handle, bytes = expected, "Uploaded texels");
        buffer.release();
        Ok(())
    }

    fn destroy_texture(&mut self, handle: TextureHandle) {
        if self.textures.remove(&handle).is_some() {
            debug!(?handle, "Destroyed texture");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce(LutData) + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        (count, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_release_runs_once_on_drop() {
        let (count, cb) = counter();
        let buffer = PixelBuffer::new(LutData::Packed(vec![0; 4])).with_release(cb);
        drop(buffer);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_returns_data() {
        let (tx, rx) = std::sync::mpsc::channel();
        PixelBuffer::new(LutData::Packed(vec![7; 3]))
            .with_release(move |data| tx.send(data).unwrap())
            .release();
        assert_eq!(rx.recv().unwrap(), LutData::Packed(vec![7; 3]));
    }

    #[test]
    fn test_upload_releases_and_copies() {
        let mut surface = MemorySurface::new();
        let desc = TextureDesc::new(Sampler::Sampler3d, [2, 2, 2], TextureFormat::Rgb10A2);
        let handle = surface.create_texture(&desc).unwrap();

        let (count, cb) = counter();
        let data: Vec<u32> = (1..=8).collect();
        let buffer = PixelBuffer::new(LutData::Packed(data.clone())).with_release(cb);
        surface.upload_3d(handle, 0, [0; 3], [2, 2, 2], buffer).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        let tex = surface.texture(handle).unwrap();
        assert_eq!(tex.bytes(), bytemuck::cast_slice::<u32, u8>(&data));
        assert_eq!(tex.uploads(), 1);
    }

    #[test]
    fn test_partial_upload() {
        let mut surface = MemorySurface::new();
        let desc = TextureDesc::new(Sampler::Sampler3d, [2, 2, 2], TextureFormat::Rgb10A2);
        let handle = surface.create_texture(&desc).unwrap();
        // second blue slice only
        let buffer = PixelBuffer::new(LutData::Packed(vec![9; 4]));
        surface.upload_3d(handle, 0, [0, 0, 1], [2, 2, 1], buffer).unwrap();
        let words: Vec<u32> = surface
            .texture(handle)
            .unwrap()
            .bytes()
            .chunks_exact(4)
            .map(|c| u32::from_ne_bytes(c.try_into().unwrap()))
            .collect();
        assert_eq!(words, [0, 0, 0, 0, 9, 9, 9, 9]);
    }

    #[test]
    fn test_upload_rejects_mismatches() {
        let mut surface = MemorySurface::new();
        let desc = TextureDesc::new(Sampler::Sampler3d, [2, 2, 2], TextureFormat::Rgba16F);
        let handle = surface.create_texture(&desc).unwrap();

        let (count, cb) = counter();
        let wrong_type = PixelBuffer::new(LutData::Packed(vec![0; 8])).with_release(cb);
        assert!(matches!(
            surface.upload_3d(handle, 0, [0; 3], [2, 2, 2], wrong_type),
            Err(LutError::Surface(_))
        ));
        // rejected buffers are still released
        assert_eq!(count.load(Ordering::SeqCst), 1);

        let stale = TextureHandle(99);
        let buffer = PixelBuffer::new(LutData::Half4(Vec::new()));
        assert!(matches!(
            surface.upload_3d(stale, 0, [0; 3], [0; 3], buffer),
            Err(LutError::UnknownTexture(h)) if h == stale
        ));
    }

    #[test]
    fn test_create_rejects_empty() {
        let mut surface = MemorySurface::new();
        let desc = TextureDesc::new(Sampler::Sampler3d, [0, 4, 4], TextureFormat::Rgba16F);
        assert!(surface.create_texture(&desc).is_err());
    }
}
