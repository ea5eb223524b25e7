//! Output range checks for every operator over a grid of scene values.

use grade_math::Vec3;
use grade_tonemap::{AgxLook, GenericToneMapper, ToneMapper};

const GRID: [f32; 9] = [0.0, 0.001, 0.01, 0.1, 0.18, 0.5, 1.0, 4.0, 64.0];

fn all_mappers() -> Vec<ToneMapper> {
    let mut mappers = ToneMapper::ALL.to_vec();
    mappers.push(ToneMapper::Agx { look: AgxLook::Golden });
    mappers.push(ToneMapper::Agx { look: AgxLook::Punchy });
    mappers.push(ToneMapper::Generic(GenericToneMapper::new(1.6, 0.18, 0.227, 64.0)));
    mappers
}

fn grid_colors() -> impl Iterator<Item = Vec3> {
    GRID.iter()
        .flat_map(|&r| GRID.iter().flat_map(move |&g| GRID.iter().map(move |&b| Vec3::new(r, g, b))))
}

#[test]
fn test_outputs_finite_and_non_negative() {
    for tm in all_mappers() {
        for c in grid_colors() {
            let out = tm.apply(c);
            assert!(out.is_finite(), "{} produced {:?} for {:?}", tm.name(), out, c);
            assert!(out.min_element() >= 0.0, "{} produced {:?} for {:?}", tm.name(), out, c);
        }
    }
}

#[test]
fn test_ldr_mappers_stay_below_one() {
    for tm in all_mappers().into_iter().filter(|tm| tm.is_ldr()) {
        for c in grid_colors() {
            let out = tm.apply(c);
            assert!(out.max_element() <= 1.0 + 1e-5, "{} produced {:?} for {:?}", tm.name(), out, c);
        }
    }
}

#[test]
fn test_one_dimensional_mappers_are_per_channel() {
    for tm in all_mappers().into_iter().filter(|tm| tm.is_one_dimensional()) {
        for c in grid_colors() {
            let out = tm.apply(c);
            for i in 0..3 {
                let alone = tm.apply(Vec3::splat(c[i]));
                assert!((out[i] - alone[i]).abs() < 1e-6, "{} mixes channels", tm.name());
            }
        }
    }
}

#[test]
fn test_gray_ramp_monotonic() {
    for tm in all_mappers().into_iter().filter(|tm| *tm != ToneMapper::DisplayRange) {
        let mut prev = f32::NEG_INFINITY;
        for i in 0..=48 {
            let x = 0.001 * 2.0_f32.powf(i as f32 / 4.0);
            let y = tm.apply(Vec3::splat(x)).y;
            assert!(y >= prev - 1e-6, "{} not monotonic at {}: {} < {}", tm.name(), x, y, prev);
            prev = y;
        }
    }
}

#[test]
fn test_generic_middle_gray_anchor() {
    let tm = ToneMapper::Generic(GenericToneMapper::new(1.6, 0.18, 0.227, 64.0));
    let out = tm.apply(Vec3::splat(0.18));
    assert!((out.y - 0.227).abs() < 1e-3);
}

#[test]
fn test_display_range_middle_gray() {
    let out = ToneMapper::DisplayRange.apply(Vec3::splat(0.18));
    assert_eq!(out, Vec3::new(0.0, 0.9255, 0.9255));
}
