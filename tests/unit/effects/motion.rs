use super::*;

#[test]
fn sweep_response_at_rest_and_moderate_speed() {
    let fx = VelocityFx::default();
    let rest = fx.sample(0.0, 0.0);
    assert_eq!(rest.vehicle_scale_x, Some(1.0));
    assert_eq!(rest.flame_opacity, 0.0);
    assert_eq!(rest.prompt_opacity, 1.0);

    let s = fx.sample(300.0, 0.2);
    assert!((s.vehicle_scale_x.unwrap() - 1.075).abs() < 1e-12);
    assert!((s.vehicle_skew_x.unwrap() + 0.6).abs() < 1e-12);
    assert!((s.flame_opacity - 0.5).abs() < 1e-12);
    assert_eq!(s.flame_x, Some(-6.0));
    assert_eq!(s.flame_scale_x, None);
    assert_eq!(s.prompt_opacity, 0.0);
}

#[test]
fn every_output_stays_clamped_for_any_velocity() {
    let fx = VelocityFx::default();
    let deck = VelocityFx::deck();
    for v in [-1e12, -9000.0, -1.0, 0.0, 42.0, 7000.0, 1e12, f64::NAN, f64::INFINITY] {
        let s = fx.sample(v, 0.5);
        let sx = s.vehicle_scale_x.unwrap();
        assert!((1.0..=1.15).contains(&sx), "{v}: {sx}");
        let skew = s.vehicle_skew_x.unwrap();
        assert!((-10.0..=10.0).contains(&skew), "{v}: {skew}");
        assert!((0.0..=1.0).contains(&s.flame_opacity));
        assert!((-40.0..=0.0).contains(&s.flame_x.unwrap()));

        let d = deck.sample(v, 0.5);
        assert_eq!(d.vehicle_scale_x, None);
        assert!((1.0..=3.0).contains(&d.flame_scale_x.unwrap()));
        assert!((0.0..=1.0).contains(&d.flame_opacity));
    }
}

#[test]
fn skew_leans_against_direction_of_travel() {
    let fx = VelocityFx::default();
    assert_eq!(fx.sample(20_000.0, 0.5).vehicle_skew_x, Some(-10.0));
    assert_eq!(fx.sample(-20_000.0, 0.5).vehicle_skew_x, Some(10.0));
}

#[test]
fn tweens_skip_absent_roles() {
    let fx = VelocityFx::default();
    let s = fx.sample(600.0, 0.0);
    assert_eq!(fx.tweens(&s, None, None, None).len(), 0);
    let all = fx.tweens(&s, Some(ElementId(0)), Some(ElementId(1)), Some(ElementId(2)));
    assert_eq!(all.len(), 5);
    assert!(all.iter().all(|t| t.duration > 0.0));
}

#[test]
fn validation_rejects_bad_constants() {
    assert!(VelocityFx::default().validate().is_ok());
    assert!(VelocityFx::deck().validate().is_ok());
    let mut fx = VelocityFx::default();
    fx.flame.opacity_divisor = 0.0;
    assert!(fx.validate().is_err());
    let mut fx = VelocityFx::default();
    fx.prompt.threshold = 1.5;
    assert!(fx.validate().is_err());
}
