//! Texture creation, upload and `.cube` export.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use grade_color::tonemap::ToneMapper;
use grade_color::{ColorGradingBuilder, LutFormat};
use grade_lut::{
    ColorGrading, DeviceSurface, LutBaker, LutData, LutError, LutKind, LutResult, MemorySurface,
    PixelBuffer, Sampler, TextureDesc, TextureFormat, TextureHandle, read_cube, write_cube,
};

#[test]
fn test_1d_texture() {
    let mut surface = MemorySurface::new();
    let params = ColorGradingBuilder::new().tone_mapper(ToneMapper::Filmic).build();
    let grading = ColorGrading::new(&mut surface, &params).unwrap();

    assert_eq!(grading.kind(), LutKind::OneDimensional);
    let tex = surface.texture(grading.handle()).unwrap();
    assert_eq!(
        *tex.desc(),
        TextureDesc::new(Sampler::Sampler2d, [512, 1, 1], TextureFormat::R16F)
    );
    assert_eq!(tex.bytes().len(), 1024);
    assert_eq!(tex.uploads(), 1);

    grading.destroy(&mut surface);
    assert!(surface.is_empty());
}

#[test]
fn test_3d_textures() {
    for (format, texture_format, texel) in [
        (LutFormat::Float, TextureFormat::Rgba16F, 8),
        (LutFormat::Integer, TextureFormat::Rgb10A2, 4),
    ] {
        let mut surface = MemorySurface::new();
        let params = ColorGradingBuilder::new().dimension(24).format(format).build();
        let grading = ColorGrading::new(&mut surface, &params).unwrap();

        assert_eq!(grading.kind(), LutKind::ThreeDimensional);
        assert_eq!(grading.dimension(), 24);
        assert_eq!(grading.format(), texture_format);

        let tex = surface.texture(grading.handle()).unwrap();
        assert_eq!(tex.desc().sampler, Sampler::Sampler3d);
        assert_eq!([tex.desc().width, tex.desc().height, tex.desc().depth], [24, 24, 24]);
        assert_eq!(tex.bytes().len(), 24 * 24 * 24 * texel);
        // the last cell is graded white, so it cannot still be zero
        assert!(tex.bytes()[tex.bytes().len() - texel..].iter().any(|&b| b != 0));

        grading.destroy(&mut surface);
        assert!(surface.is_empty());
    }
}

/// A surface that counts releases and can be told to fail uploads.
#[derive(Default)]
struct RecordingSurface {
    inner: MemorySurface,
    fail_uploads: bool,
    releases: Arc<AtomicUsize>,
}

impl DeviceSurface for RecordingSurface {
    fn create_texture(&mut self, desc: &TextureDesc) -> LutResult<TextureHandle> {
        self.inner.create_texture(desc)
    }

    fn upload_3d(
        &mut self,
        handle: TextureHandle,
        level: u8,
        offset: [u32; 3],
        extent: [u32; 3],
        buffer: PixelBuffer,
    ) -> LutResult<()> {
        let releases = self.releases.clone();
        let data = buffer.data().clone();
        // wrap the caller's buffer so releases are observable
        buffer.release();
        let buffer = PixelBuffer::new(data).with_release(move |_| {
            releases.fetch_add(1, Ordering::SeqCst);
        });
        if self.fail_uploads {
            return Err(LutError::Surface("device lost".into()));
        }
        self.inner.upload_3d(handle, level, offset, extent, buffer)
    }

    fn destroy_texture(&mut self, handle: TextureHandle) {
        self.inner.destroy_texture(handle);
    }
}

#[test]
fn test_buffer_released_exactly_once() {
    let mut surface = RecordingSurface::default();
    let params = ColorGradingBuilder::new().dimension(16).build();
    let grading = ColorGrading::new(&mut surface, &params).unwrap();
    assert_eq!(surface.releases.load(Ordering::SeqCst), 1);
    grading.destroy(&mut surface);
    assert_eq!(surface.releases.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failed_upload_destroys_texture() {
    let mut surface = RecordingSurface {
        fail_uploads: true,
        ..Default::default()
    };
    let params = ColorGradingBuilder::new().dimension(16).build();
    let err = ColorGrading::new(&mut surface, &params).unwrap_err();
    assert!(matches!(err, LutError::Surface(_)));
    assert!(surface.inner.is_empty());
    assert_eq!(surface.releases.load(Ordering::SeqCst), 1);
}

#[test]
fn test_cube_export_3d() {
    let params = ColorGradingBuilder::new().dimension(16).format(LutFormat::Float).build();
    let grid = LutBaker::new(&params).bake();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grade.cube");
    write_cube(&path, &grid, "test grade").unwrap();

    let cube = read_cube(&path).unwrap();
    assert_eq!(cube.title.as_deref(), Some("test grade"));
    assert_eq!(cube.kind, LutKind::ThreeDimensional);
    assert_eq!(cube.size, 16);
    assert_eq!(cube.data.len(), 16 * 16 * 16);

    for (r, g, b) in [(0, 0, 0), (15, 0, 0), (0, 15, 0), (0, 0, 15), (7, 8, 9)] {
        let row = cube.data[r + g * 16 + b * 256];
        let cell = grid.sample(r, g, b);
        for ch in 0..3 {
            assert!((row[ch] - cell[ch]).abs() <= 1e-6);
        }
    }
}

#[test]
fn test_cube_export_1d() {
    let params = ColorGradingBuilder::new().tone_mapper(ToneMapper::Linear).build();
    let grid = LutBaker::new(&params).bake();
    let LutData::Half1d(curve) = grid.data() else {
        panic!("expected a 1D curve");
    };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("curve.cube");
    write_cube(&path, &grid, "curve").unwrap();

    let cube = read_cube(&path).unwrap();
    assert_eq!(cube.kind, LutKind::OneDimensional);
    assert_eq!(cube.size, 512);
    for (row, v) in cube.data.iter().zip(curve) {
        assert_eq!(row[0], row[2]);
        assert!((row[0] - v.to_f32()).abs() <= 1e-6);
    }
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(read_cube(dir.path().join("nope.cube")), Err(LutError::Io(_))));
}
