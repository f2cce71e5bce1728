use super::*;

#[test]
fn dom_names_map_to_keys() {
    assert_eq!(ScrollKey::from_dom("ArrowDown"), Some(ScrollKey::ArrowDown));
    assert_eq!(ScrollKey::from_dom(" "), Some(ScrollKey::Space));
    assert_eq!(ScrollKey::from_dom("End"), Some(ScrollKey::End));
    assert_eq!(ScrollKey::from_dom("a"), None);
}

#[test]
fn presses_batch_into_one_request_per_frame() {
    let mut k = KeyboardScroller::new(100.0, 720.0, 5000.0);
    k.press(ScrollKey::ArrowDown);
    k.press(ScrollKey::ArrowDown);
    k.press(ScrollKey::ArrowUp);
    k.press(ScrollKey::PageDown);
    assert_eq!(k.flush_frame(), Some(ScrollRequest::By(820.0)));
    assert_eq!(k.flush_frame(), None);
    assert!(!k.has_pending());
}

#[test]
fn absolute_jumps_absorb_following_deltas() {
    let mut k = KeyboardScroller::new(100.0, 720.0, 5000.0);
    k.press(ScrollKey::ArrowDown);
    k.press(ScrollKey::End);
    k.press(ScrollKey::ArrowUp);
    let req = k.flush_frame().unwrap();
    assert_eq!(req, ScrollRequest::To(4900.0));
    assert_eq!(req.target(0.0, 4800.0), 4800.0);
    assert_eq!(ScrollRequest::By(-50.0).target(20.0, 4800.0), 0.0);
}
