use super::*;
use crate::render::memory::BlockGlyphSurface;

// 6 px cells at the 48 px reference: "FOLD DB" spans columns 0..44
fn six_px_cells() -> BlockGlyphSurface {
    BlockGlyphSurface::new(0.125, 0.1, 0.9)
}

#[test]
fn reference_columns_come_from_the_rasterizer() {
    let solver = FitSolver::default();
    assert_eq!(solver.reference_max_cols(&mut six_px_cells()).unwrap(), 44);
}

#[test]
fn wide_container_clamps_to_max() {
    let solver = FitSolver::default();
    // 800 / 10 = 80 cols; 48 * 80 / 40 = 96
    assert_eq!(solver.scale_font_size(80, 40), 64.0);
    let size = solver
        .solve_font_size(&mut six_px_cells(), 800.0, 10.0)
        .unwrap();
    assert_eq!(size, 64.0);
}

#[test]
fn mid_range_container_scales_linearly() {
    let solver = FitSolver::default();
    // 30 cols; floor(48 * 30 / 44) = 32
    let size = solver
        .solve_font_size(&mut six_px_cells(), 300.0, 10.0)
        .unwrap();
    assert_eq!(size, 32.0);
}

#[test]
fn narrow_container_clamps_to_min() {
    let solver = FitSolver::default();
    assert_eq!(solver.scale_font_size(0, 44), 10.0);
    assert_eq!(solver.scale_font_size(3, 44), 10.0);
}

#[test]
fn empty_reference_returns_reference_size() {
    let solver = FitSolver::default();
    assert_eq!(solver.scale_font_size(80, 0), 48.0);
    // no ink at all: ink box is empty
    let mut blank = BlockGlyphSurface::new(0.5, 0.5, 0.5);
    let size = solver.solve_font_size(&mut blank, 800.0, 10.0).unwrap();
    assert_eq!(size, 48.0);
}

#[test]
fn solved_size_is_monotonic_and_bounded() {
    let solver = FitSolver::default();
    let mut prev = f64::MIN;
    for cols in 0..400u64 {
        let s = solver.scale_font_size(cols, 44);
        assert!(s >= prev, "cols {cols}: {s} < {prev}");
        assert!((10.0..=64.0).contains(&s));
        prev = s;
    }
    for width in [1.0, 99.5, 640.0, 1e6] {
        for cw in [0.5, 7.2, 10.0, 300.0] {
            let s = solver
                .solve_font_size(&mut six_px_cells(), width, cw)
                .unwrap();
            assert!((10.0..=64.0).contains(&s), "{width}/{cw} -> {s}");
        }
    }
}

#[test]
fn available_cols_guards_bad_widths() {
    assert_eq!(available_cols(800.0, 10.0).unwrap(), 80);
    assert_eq!(available_cols(809.9, 10.0).unwrap(), 80);
    assert_eq!(available_cols(0.0, 10.0).unwrap(), 0);
    assert!(available_cols(800.0, 0.0).is_err());
    assert!(available_cols(800.0, f64::NAN).is_err());
    assert!(available_cols(-1.0, 10.0).is_err());
}

#[test]
fn config_validation() {
    let bad = FitConfig {
        min_size: 70.0,
        ..FitConfig::default()
    };
    assert!(FitSolver::new(bad, Rasterizer::default()).is_err());
    let bad = FitConfig {
        char_probe: String::new(),
        ..FitConfig::default()
    };
    assert!(bad.validate().is_err());
    assert!(FitConfig::default().validate().is_ok());
}
