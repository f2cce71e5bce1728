use super::*;

#[test]
fn empty_json_is_the_sweep_page() {
    let cfg = HeroConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, HeroConfig::default());
    assert_eq!(cfg.variant, Variant::Sweep);
    assert_eq!(cfg.pin_steps(), 5);
    assert_eq!(cfg.scrub_lag(), 1.5);
    assert_eq!(cfg.counters().unwrap().len(), 4);
}

#[test]
fn variant_defaults_apply_unless_overridden() {
    let cfg = HeroConfig::from_reader(r#"{"variant":"deck"}"#.as_bytes()).unwrap();
    assert_eq!(cfg.pin_steps(), 4);
    assert_eq!(cfg.scrub_lag(), 1.0);
    assert_eq!(cfg.velocity_fx(), VelocityFx::deck());

    let cfg =
        HeroConfig::from_reader(r#"{"variant":"deck","pin_steps":2,"scrub_lag_secs":0}"#.as_bytes())
            .unwrap();
    assert_eq!(cfg.pin_steps(), 2);
    assert_eq!(cfg.scrub_lag(), 0.0);
}

#[test]
fn invalid_values_are_rejected() {
    for bad in [
        r#"{"pin_steps":0}"#,
        r#"{"viewport":{"width":0,"height":900}}"#,
        r#"{"scrub_lag_secs":-1}"#,
        r#"{"stats":[]}"#,
        r#"{"stats":[{"value":"lots","label":"x"}]}"#,
        r#"{"trail":{"capacity":0}}"#,
        r#"{"unknown_field":1}"#,
        r#"{"variant":"carousel"}"#,
    ] {
        assert!(HeroConfig::from_reader(bad.as_bytes()).is_err(), "{bad}");
    }
}

#[test]
fn missing_file_reports_path() {
    let err = HeroConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("here.json"), "{err}");
}
