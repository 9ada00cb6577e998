use super::*;

const ALL: [Ease; 2] = [Ease::Linear, Ease::InOutQuad];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
        assert_eq!(ease.apply(f64::NAN), 0.0);
    }
}

#[test]
fn curves_are_monotonic() {
    for ease in ALL {
        let mut prev = 0.0;
        for k in 1..=100 {
            let v = ease.apply(k as f64 / 100.0);
            assert!(v >= prev, "{ease:?} dips at {k}");
            prev = v;
        }
    }
}

#[test]
fn in_out_quad_matches_closed_form() {
    let e = Ease::InOutQuad;
    for k in 0..=40 {
        let x = k as f64 / 40.0;
        let want = if x < 0.5 {
            2.0 * x * x
        } else {
            1.0 - (-2.0 * x + 2.0).powi(2) / 2.0
        };
        assert!((e.apply(x) - want).abs() < 1e-12, "x = {x}");
    }
    // symmetric about the midpoint
    for x in [0.1, 0.2, 0.3, 0.4] {
        assert!((e.apply(x) + e.apply(1.0 - x) - 1.0).abs() < 1e-12);
    }
}

#[test]
fn default_is_in_out_quad_and_serde_is_snake_case() {
    assert_eq!(Ease::default(), Ease::InOutQuad);
    assert_eq!(
        serde_json::to_string(&Ease::InOutQuad).unwrap(),
        "\"in_out_quad\""
    );
    let e: Ease = serde_json::from_str("\"linear\"").unwrap();
    assert_eq!(e, Ease::Linear);
}

#[test]
fn unknown_curve_names_are_rejected() {
    for name in ["\"in_out_cubic\"", "\"smoothstep\""] {
        assert!(serde_json::from_str::<Ease>(name).is_err(), "{name}");
    }
}
