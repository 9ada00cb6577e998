use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn idx(i: usize) -> ShapeIndex {
    ShapeIndex::new(i).unwrap()
}

#[test]
fn boundaries_match_durations() {
    let tl = Timeline::default();
    let fwd = tl.forward_start();
    assert!(close(fwd[0], 0.06) && close(fwd[1], 0.20) && close(fwd[2], 0.34));
    assert!(close(tl.reverse_begin(), 0.56));
    let rev = tl.reverse_start();
    assert!(close(rev[0], 0.84) && close(rev[1], 0.70) && close(rev[2], 0.56));
    let (lo, hi) = tl.all_circle_window();
    assert!(close(lo, 0.48) && close(hi, 0.56));
}

#[test]
fn start_of_loop_holds_rectangles() {
    let tl = Timeline::default();
    let m = tl.morph(0.03, idx(0));
    assert_eq!(m.t, 0.0);
    assert_eq!(m.rotation, 0.0);
    assert_eq!(m.phase, MorphPhase::HoldRect);
    for i in ShapeIndex::ALL {
        assert_eq!(tl.morph(0.0, i).t, 0.0);
    }
}

#[test]
fn all_circles_inside_window() {
    let tl = Timeline::default();
    for k in 1..8 {
        let p = 0.48 + k as f64 * 0.01;
        for i in ShapeIndex::ALL {
            let m = tl.morph(p, i);
            assert_eq!(m.t, 1.0, "p {p} shape {i:?}");
            assert_eq!(m.rotation, 0.0);
        }
    }
}

#[test]
fn reverse_runs_back_to_front() {
    let tl = Timeline::default();
    // shape 2 unmorphs first
    assert_eq!(tl.morph(0.60, idx(2)).phase, MorphPhase::Reverse);
    assert_eq!(tl.morph(0.60, idx(0)).phase, MorphPhase::HoldCircle);
    assert_eq!(tl.morph(0.99, idx(0)).phase, MorphPhase::Rest);
    assert_eq!(tl.morph(0.99, idx(0)).t, 0.0);
}

#[test]
fn midpoint_of_spin_is_half_morphed() {
    let tl = Timeline::default();
    let m = tl.morph(0.06 + 0.07, idx(0));
    assert!(close(m.t, 0.5));
    assert!(close(m.rotation, std::f64::consts::PI));
}

#[test]
fn rotation_and_morph_are_continuous_within_phases() {
    let tl = Timeline::default();
    let step = 1e-4;
    for i in ShapeIndex::ALL {
        let mut prev = tl.morph(0.0, i);
        let mut p = step;
        while p < 1.0 {
            let m = tl.morph(p, i);
            if m.phase == prev.phase {
                assert!((m.rotation - prev.rotation).abs() < 0.02, "rotation jump at {p}");
                assert!((m.t - prev.t).abs() < 0.02, "t jump at {p}");
            }
            assert!((0.0..=1.0).contains(&m.t));
            assert!((0.0..=std::f64::consts::TAU).contains(&m.rotation));
            prev = m;
            p += step;
        }
    }
}

#[test]
fn shape_index_bounds() {
    assert!(ShapeIndex::new(2).is_some());
    assert!(ShapeIndex::new(3).is_none());
    let order: Vec<usize> = ShapeIndex::BACK_TO_FRONT.iter().map(|i| i.get()).collect();
    assert_eq!(order, vec![2, 1, 0]);
}

#[test]
fn overlong_timeline_is_rejected() {
    let cfg = TimelineConfig {
        spin_dur: 0.2,
        ..TimelineConfig::default()
    };
    assert!(Timeline::new(cfg).is_err());
    let cfg = TimelineConfig {
        spin_dur: 0.0,
        ..TimelineConfig::default()
    };
    assert!(cfg.validate().is_err());
    assert!(Timeline::new(TimelineConfig::default()).is_ok());
}
