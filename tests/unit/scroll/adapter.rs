use super::*;

fn adapter() -> ScrollAdapter {
    ScrollAdapter::new(5, 0.0, Viewport::new(1280.0, 800.0).unwrap(), 0.1).unwrap()
}

#[test]
fn region_height_is_steps_times_viewport() {
    let a = adapter();
    assert_eq!(a.region().length, 4000.0);
    assert_eq!(a.max_offset(), 4800.0);
    assert!(ScrollAdapter::new(0, 0.0, Viewport::default(), 0.1).is_err());
    assert!(ScrollAdapter::new(1, -5.0, Viewport::default(), 0.1).is_err());
}

#[test]
fn phases_and_events_follow_direction() {
    let mut a = ScrollAdapter::new(2, 100.0, Viewport::new(1000.0, 500.0).unwrap(), 0.1).unwrap();

    let u = a.update(0.0, 0.0);
    assert_eq!(u.phase, ScrollPhase::Above);
    assert!(u.events.is_empty());

    let u = a.update(600.0, 0.1);
    assert_eq!(u.phase, ScrollPhase::Pinned);
    assert_eq!(u.events.as_slice(), [ScrollEvent::Enter]);
    assert_eq!(u.progress, 0.5);
    assert_eq!(u.pin_translation, 500.0);

    let u = a.update(1500.0, 0.2);
    assert_eq!(u.events.as_slice(), [ScrollEvent::Leave]);
    assert_eq!(u.progress, 1.0);
    assert_eq!(u.pin_translation, 1000.0);

    let u = a.update(1000.0, 0.3);
    assert_eq!(u.events.as_slice(), [ScrollEvent::EnterBack]);

    let u = a.update(10.0, 0.4);
    assert_eq!(u.events.as_slice(), [ScrollEvent::LeaveBack]);
    assert_eq!(u.progress, 0.0);

    let u = a.update(5000.0, 0.5);
    assert_eq!(u.events.as_slice(), [ScrollEvent::Enter, ScrollEvent::Leave]);
}

#[test]
fn progress_is_clamped_and_ignores_nan() {
    let mut a = adapter();
    assert_eq!(a.update(-50.0, 0.0).progress, 0.0);
    assert_eq!(a.update(99_999.0, 0.1).progress, 1.0);
    let u = a.update(f64::NAN, 0.2);
    assert_eq!(u.offset, 99_999.0);
}

#[test]
fn resize_recomputes_from_retained_offset() {
    let mut a = adapter();
    a.update(2500.0, 0.0);
    assert_eq!(a.progress(), 0.625);
    let u = a
        .resize(Viewport::new(1280.0, 400.0).unwrap(), 0.016)
        .unwrap();
    assert_eq!(u.progress, 1.0);
    assert_eq!(u.events.as_slice(), [ScrollEvent::Leave]);
    assert!(a.resize(Viewport { width: 0.0, height: 1.0 }, 0.02).is_err());
}

#[test]
fn update_reports_velocity() {
    let mut a = adapter();
    a.update(0.0, 0.0);
    let u = a.update(50.0, 0.05);
    assert!((u.velocity - 1000.0).abs() < 1e-6);
}
