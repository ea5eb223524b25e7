//! Bake coverage, layout and precision.

use std::collections::HashSet;
use std::sync::Arc;

use approx::assert_abs_diff_eq;
use grade_color::tonemap::ToneMapper;
use grade_color::{ColorGradingBuilder, ColorGradingPipeline, LUT_1D_SIZE, LutFormat};
use grade_lut::{LutBaker, LutData, LutKind, pack_1010102, slice_range, unpack_1010102};
use half::f16;

// f16 has 11 significant bits; outputs are in [0, 1]
const HALF_EPS: f32 = 1.0 / 1024.0;

#[test]
fn test_every_cell_written_once() {
    let params = ColorGradingBuilder::new()
        .dimension(32)
        .exposure(0.25)
        .format(LutFormat::Float)
        .build();
    let baker = LutBaker::new(&params);
    assert_eq!(baker.dimension(), 32);

    let sentinel = f16::from_f32(-7.0);
    let mut cells = vec![[sentinel; 4]; 32 * 32 * 32];
    baker.bake_slices(&mut cells).unwrap();

    for (i, cell) in cells.iter().enumerate() {
        assert_eq!(cell[3], f16::ZERO, "alpha of cell {i}");
        for ch in &cell[..3] {
            let v = ch.to_f32();
            assert!((0.0..=1.0).contains(&v), "cell {i} = {v}");
        }
    }
}

#[test]
fn test_slices_are_disjoint() {
    for dim in [16, 33, 64] {
        let mut seen = HashSet::new();
        for b in 0..dim {
            for i in slice_range(b, dim) {
                assert!(seen.insert(i), "index {i} in two slices");
            }
        }
        assert_eq!(seen.len(), dim * dim * dim);
    }
}

#[test]
fn test_cells_match_pipeline() {
    let params = ColorGradingBuilder::new()
        .dimension(16)
        .saturation(1.3)
        .format(LutFormat::Float)
        .build();
    let baker = LutBaker::new(&params);
    let grid = baker.bake();
    let pipeline = ColorGradingPipeline::new(&params);

    for (r, g, b) in [(0, 0, 0), (15, 0, 0), (0, 15, 0), (0, 0, 15), (3, 9, 12), (15, 15, 15)] {
        let expected = pipeline.evaluate_cell(r, g, b, 16);
        let got = grid.sample(r, g, b);
        assert_abs_diff_eq!(got[0], expected.x, epsilon = HALF_EPS);
        assert_abs_diff_eq!(got[1], expected.y, epsilon = HALF_EPS);
        assert_abs_diff_eq!(got[2], expected.z, epsilon = HALF_EPS);
    }
}

#[test]
fn test_1d_grid_matches_pipeline() {
    let params = ColorGradingBuilder::new().tone_mapper(ToneMapper::Filmic).build();
    let baker = LutBaker::new(&params);
    let grid = baker.bake();
    assert_eq!(grid.kind(), LutKind::OneDimensional);
    assert_eq!(grid.dimension(), LUT_1D_SIZE);
    assert_eq!(grid.extent(), [512, 1, 1]);

    let LutData::Half1d(curve) = grid.data() else {
        panic!("expected a 1D curve");
    };
    assert_eq!(curve.len(), LUT_1D_SIZE);

    let pipeline = baker.pipeline();
    for (i, v) in curve.iter().enumerate() {
        let x = i as f32 / (LUT_1D_SIZE - 1) as f32;
        assert_abs_diff_eq!(v.to_f32(), pipeline.evaluate_1d(x), epsilon = HALF_EPS);
    }
}

#[test]
fn test_1d_and_3d_agree_on_gray() {
    // same curve, forced into 3D by gamut mapping (a no-op on gray)
    let curve = LutBaker::new(&ColorGradingBuilder::new().tone_mapper(ToneMapper::Filmic).build()).bake();
    let cube = LutBaker::new(
        &ColorGradingBuilder::new()
            .tone_mapper(ToneMapper::Filmic)
            .gamut_mapping(true)
            .dimension(32)
            .format(LutFormat::Float)
            .build(),
    )
    .bake();
    assert_eq!(curve.kind(), LutKind::OneDimensional);
    assert_eq!(cube.kind(), LutKind::ThreeDimensional);

    let last = (LUT_1D_SIZE - 1) as f32;
    for i in 0..32 {
        // linear lookup into the curve, as a sampler would do
        let pos = i as f32 / 31.0 * last;
        let lo = pos.floor() as usize;
        let hi = (lo + 1).min(LUT_1D_SIZE - 1);
        let t = pos - lo as f32;
        let from_curve = curve.sample(lo, 0, 0)[0] * (1.0 - t) + curve.sample(hi, 0, 0)[0] * t;

        let from_cube = cube.sample(i, i, i);
        for ch in from_cube {
            assert_abs_diff_eq!(ch, from_curve, epsilon = 2e-3);
        }
    }
}

#[test]
fn test_integer_format_packs_10_bits() {
    let params = ColorGradingBuilder::new().dimension(16).build();
    assert_eq!(params.format, LutFormat::Integer);
    let grid = LutBaker::new(&params).bake();
    let LutData::Packed(texels) = grid.data() else {
        panic!("expected packed texels");
    };
    assert_eq!(texels.len(), 16 * 16 * 16);
    assert!(texels.iter().all(|t| t >> 30 == 0));
}

#[test]
fn test_pack_roundtrip() {
    let rgb = [0.5, 0.25, 0.75];
    let back = unpack_1010102(pack_1010102(rgb));
    for ch in 0..3 {
        assert_abs_diff_eq!(back[ch], rgb[ch], epsilon = 1.0 / 1023.0);
    }
}

#[test]
fn test_dedicated_pool_gives_same_result() {
    let params = ColorGradingBuilder::new().dimension(16).vibrance(1.4).build();
    let pool = Arc::new(rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap());
    let on_pool = LutBaker::new(&params).with_pool(pool).bake();
    let global = LutBaker::new(&params).bake();
    assert_eq!(on_pool, global);
}
