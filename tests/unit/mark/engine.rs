use super::*;
use std::f64::consts::FRAC_PI_2;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn idx(i: usize) -> ShapeIndex {
    ShapeIndex::new(i).unwrap()
}

#[test]
fn rectangles_at_loop_start_scaled_to_size() {
    let engine = ShapeMorphEngine::default();
    for s in engine.states(0.0) {
        assert_eq!(s.t, 0.0);
        assert_eq!(s.rotation, 0.0);
        assert_eq!(s.fill_opacity, 0.0);
        assert!(close(s.half_width, 4.8));
        assert!(close(s.half_height, 2.4));
        assert!(close(s.corner_radius, 1.12));
        assert_eq!(s.vertical_scale, 1.0);
    }
    let offsets = engine.states(0.0).map(|s| s.offset);
    assert!(close(offsets[0], -2.88) && offsets[1] == 0.0 && close(offsets[2], 2.88));
}

#[test]
fn hold_rect_midpoint_is_unmorphed() {
    let engine = ShapeMorphEngine::default();
    let s = engine.shape_state(0.03, idx(0));
    assert_eq!(s.t, 0.0);
    assert_eq!(s.rotation, 0.0);
}

#[test]
fn circles_are_squashed_and_opaque() {
    let engine = ShapeMorphEngine::default();
    for s in engine.states(0.52) {
        assert_eq!(s.t, 1.0);
        assert!(close(s.half_width, 4.8) && close(s.half_height, 4.8));
        assert!(close(s.corner_radius, 4.8));
        assert_eq!(s.vertical_scale, 0.5);
        assert_eq!(s.fill_opacity, 1.0);
    }
    let offsets = engine.states(0.52).map(|s| s.offset);
    assert!(close(offsets[0], -2.72) && close(offsets[2], 2.72));
}

#[test]
fn line_width_has_a_floor() {
    assert_eq!(MarkConfig::default().line_width(), 1.0);
    let big = MarkConfig {
        size: 400.0,
        ..MarkConfig::default()
    };
    assert!(close(big.line_width(), 3.0));
}

#[test]
fn draw_outline_is_centered_on_offset() {
    let engine = ShapeMorphEngine::default();
    let s = engine.shape_state(0.0, idx(0));
    let draw = engine.draw_for(&s);
    let bb = draw.path.bounding_box();
    assert!(close(bb.x0, 16.0 - 4.8) && close(bb.x1, 16.0 + 4.8));
    assert!(close(bb.y0, 16.0 - 2.88 - 2.4) && close(bb.y1, 16.0 - 2.88 + 2.4));
    assert_eq!(draw.color, MarkConfig::default().colors[0]);
    assert_eq!(draw.fill_opacity, 0.0);
    assert_eq!(draw.line_width, 1.0);

    let p = draw.transform * Point::new(bb.x1, bb.y1);
    assert!(close(p.x, bb.x1) && close(p.y, bb.y1));
}

#[test]
fn transform_spins_about_shape_center() {
    let engine = ShapeMorphEngine::default();
    let mut s = engine.shape_state(0.0, idx(2));
    s.rotation = FRAC_PI_2;
    s.vertical_scale = 0.5;
    let draw = engine.draw_for(&s);
    let c = engine.center(s.offset);

    let fixed = draw.transform * c;
    assert!(close(fixed.x, c.x) && close(fixed.y, c.y));
    // squash first, then a quarter turn
    let p = draw.transform * Point::new(c.x, c.y + 2.0);
    assert!(close(p.x, c.x - 1.0) && close(p.y, c.y));
}

#[test]
fn oversized_radius_is_clamped() {
    let engine = ShapeMorphEngine::default();
    let mut s = engine.shape_state(0.0, idx(1));
    s.corner_radius = 100.0;
    let bb = engine.draw_for(&s).path.bounding_box();
    // a radius clamped to the half-height keeps the extents
    assert!((bb.width() - 9.6).abs() < 1e-6);
    assert!((bb.height() - 4.8).abs() < 1e-6);
}

#[test]
fn horizontal_axis_moves_centers_sideways() {
    let cfg = MarkConfig {
        offset_axis: OffsetAxis::Horizontal,
        ..MarkConfig::default()
    };
    let engine = ShapeMorphEngine::new(&cfg).unwrap();
    let c = engine.center(engine.shape_state(0.0, idx(0)).offset);
    assert!(close(c.x, 16.0 - 2.88) && close(c.y, 16.0));
}

#[test]
fn default_axis_stacks_centers_vertically() {
    assert_eq!(MarkConfig::default().offset_axis, OffsetAxis::Vertical);
    let engine = ShapeMorphEngine::default();
    let c = engine.center(engine.shape_state(0.0, idx(0)).offset);
    assert!(close(c.x, 16.0) && close(c.y, 16.0 - 2.88));
}

#[test]
fn frame_paints_back_to_front() {
    let engine = ShapeMorphEngine::default();
    let colors = MarkConfig::default().colors;
    let frame = engine.frame(0.3);
    let painted: Vec<Rgba8> = frame.iter().map(|d| d.color).collect();
    assert_eq!(painted, vec![colors[2], colors[1], colors[0]]);
}

#[test]
fn invalid_mark_config_is_rejected() {
    for cfg in [
        MarkConfig {
            size: 0.0,
            ..MarkConfig::default()
        },
        MarkConfig {
            period_ms: -1.0,
            ..MarkConfig::default()
        },
        MarkConfig {
            rect_offsets: [f64::NAN, 0.0, 0.0],
            ..MarkConfig::default()
        },
    ] {
        assert!(ShapeMorphEngine::new(&cfg).is_err());
    }
}

#[test]
fn config_round_trips_through_json_with_hex_colors() {
    let json = serde_json::to_string(&MarkConfig::default()).unwrap();
    assert!(json.contains("\"#E53935\""));
    assert!(json.contains("\"vertical\""));
    let partial: MarkConfig = serde_json::from_str(r#"{"size": 64}"#).unwrap();
    assert_eq!(partial.size, 64.0);
    assert_eq!(partial.period_ms, 6000.0);
}
