use super::*;
use crate::foundation::core::Point;

#[test]
fn reads_fall_back_to_defaults() {
    let s = Style::default();
    assert_eq!(s.scalar(Prop::Opacity), 1.0);
    assert_eq!(s.scalar(Prop::Scale), 1.0);
    assert_eq!(s.scalar(Prop::X), 0.0);
    assert_eq!(s.clip(), ClipPath::open());
    assert!(s.is_empty());
}

#[test]
fn set_clamps_and_reports_changes() {
    let mut s = Style::default();
    assert!(!s.set(Prop::Opacity, Value::Scalar(1.4)));
    assert_eq!(s.scalar(Prop::Opacity), 1.0);
    assert!(s.set(Prop::Opacity, Value::Scalar(-0.2)));
    assert_eq!(s.scalar(Prop::Opacity), 0.0);
    assert!(!s.set(Prop::Opacity, Value::Scalar(0.0)));
    assert!(!s.set(Prop::Blur, Value::Scalar(-3.0)));
    assert_eq!(s.scalar(Prop::Blur), 0.0);
}

#[test]
fn every_prop_default_matches_its_kind() {
    for p in Prop::ALL {
        assert_eq!(p.default_value().kind(), p.kind(), "{p:?}");
    }
}

#[test]
fn affine_applies_translation_and_scale() {
    let mut s = Style::default();
    s.set(Prop::X, Value::Scalar(100.0));
    s.set(Prop::Y, Value::Scalar(-20.0));
    s.set(Prop::ScaleX, Value::Scalar(2.0));
    let p = s.affine() * Point::new(10.0, 10.0);
    assert!((p.x - 120.0).abs() < 1e-9);
    assert!((p.y + 10.0).abs() < 1e-9);
}
