use super::*;

fn all() -> Vec<Ease> {
    vec![
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InQuart,
        Ease::OutQuart,
        Ease::InOutQuart,
        Ease::InQuint,
        Ease::OutQuint,
        Ease::InOutSine,
        Ease::OutExpo,
        Ease::OutBack { overshoot: 1.5 },
        Ease::OutElastic {
            amplitude: 1.0,
            period: 0.3,
        },
    ]
}

#[test]
fn endpoints_are_stable() {
    for ease in all() {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
        assert_eq!(ease.apply(-3.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(7.0), 1.0, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in all() {
        if matches!(ease, Ease::OutBack { .. } | Ease::OutElastic { .. }) {
            continue;
        }
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn back_out_overshoots_then_settles() {
    let ease = Ease::OutBack { overshoot: 1.5 };
    let peak = (1..100)
        .map(|i| ease.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
    assert!((ease.apply(0.999) - 1.0).abs() < 0.01);
}

#[test]
fn elastic_out_starts_near_zero_and_oscillates_around_one() {
    let ease = Ease::OutElastic {
        amplitude: 1.0,
        period: 0.3,
    };
    assert!(ease.apply(0.001).abs() < 0.05);
    assert!(ease.apply(0.2) > 1.0);
    assert!((ease.apply(0.95) - 1.0).abs() < 0.01);
}

#[test]
fn parses_gsap_names() {
    assert_eq!(Ease::parse("none").unwrap(), Ease::Linear);
    assert_eq!(Ease::parse("power2.out").unwrap(), Ease::OutCubic);
    assert_eq!(Ease::parse("power3.out").unwrap(), Ease::OutQuart);
    assert_eq!(Ease::parse("expo.out").unwrap(), Ease::OutExpo);
    assert_eq!(Ease::parse("sine.inOut").unwrap(), Ease::InOutSine);
    assert_eq!(
        Ease::parse("back.out(1.5)").unwrap(),
        Ease::OutBack { overshoot: 1.5 }
    );
    assert_eq!(
        Ease::parse("elastic.out(1, 0.3)").unwrap(),
        Ease::OutElastic {
            amplitude: 1.0,
            period: 0.3
        }
    );
    assert_eq!(
        Ease::parse("back.out").unwrap(),
        Ease::OutBack {
            overshoot: 1.70158
        }
    );
}

#[test]
fn rejects_bad_names() {
    assert!(Ease::parse("").is_err());
    assert!(Ease::parse("bouncy").is_err());
    assert!(Ease::parse("power2.out(3)").is_err());
    assert!(Ease::parse("back.out(1.5").is_err());
    assert!(Ease::parse("elastic.out(a, b)").is_err());
}
