use super::*;

#[test]
fn zero_lag_follows_immediately() {
    let mut s = Scrub::new(0.0);
    s.set_target(0.4, 1.0);
    assert_eq!(s.current(), 0.4);
    assert!(s.is_settled());
}

#[test]
fn lagged_playhead_converges_exactly() {
    let mut s = Scrub::new(1.5);
    s.set_target(1.0, 0.0);
    let mid = s.advance(0.5);
    assert!(mid > 0.0 && mid < 1.0);
    let later = s.advance(1.0);
    assert!(later > mid);
    assert_eq!(s.advance(1.5), 1.0);
    assert!(s.is_settled());
}

#[test]
fn retarget_starts_from_current_position() {
    let mut s = Scrub::new(1.0);
    s.set_target(1.0, 0.0);
    let at = s.advance(0.25);
    s.set_target(0.0, 0.25);
    let just_after = s.advance(0.25);
    assert!((just_after - at).abs() < 1e-12);
    assert_eq!(s.advance(2.0), 0.0);
}

#[test]
fn jump_and_bad_input() {
    let mut s = Scrub::new(f64::NAN);
    assert_eq!(s.lag(), 0.0);
    s.jump(0.7);
    assert_eq!(s.current(), 0.7);
    s.set_target(f64::NAN, 0.0);
    assert_eq!(s.target(), 0.7);
}
