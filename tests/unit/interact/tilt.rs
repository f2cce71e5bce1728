use super::*;

fn card() -> Rect {
    Rect::new(100.0, 100.0, 300.0, 400.0)
}

#[test]
fn center_is_flat_and_corners_peak() {
    let gain = TiltParams::default().gain;
    assert_eq!(
        Tilt::from_pointer(card(), Point::new(200.0, 250.0), gain),
        Tilt::default()
    );
    let t = Tilt::from_pointer(card(), Point::new(300.0, 100.0), gain);
    assert_eq!(t.rotation_y, 10.0);
    assert_eq!(t.rotation_x, 10.0);
}

#[test]
fn pointer_outside_is_clamped() {
    let t = Tilt::from_pointer(card(), Point::new(-5000.0, 9000.0), 20.0);
    assert_eq!(t.rotation_y, -10.0);
    assert_eq!(t.rotation_x, -10.0);
}

#[test]
fn degenerate_input_gives_no_tilt() {
    let flat = Rect::new(0.0, 0.0, 0.0, 10.0);
    assert_eq!(
        Tilt::from_pointer(flat, Point::new(1.0, 1.0), 20.0),
        Tilt::default()
    );
    assert_eq!(
        Tilt::from_pointer(card(), Point::new(f64::NAN, 1.0), 20.0),
        Tilt::default()
    );
}

#[test]
fn reset_uses_elastic_settle() {
    let params = TiltParams::default();
    let [y, x] = Tilt::reset(ElementId(3), &params);
    assert_eq!(y.prop, Prop::RotationY);
    assert_eq!(x.to, 0.0.into());
    assert_eq!(x.duration, 1.2);
    assert!(matches!(x.ease, Ease::OutElastic { .. }));
}
