use super::*;

#[test]
fn sweep_scene_and_timelines_line_up() {
    let cfg = HeroConfig::default();
    let scene = build_scene(&cfg).unwrap();
    assert!(scene.lookup(DAY_BAND).is_some());
    assert!(scene.lookup(&stat_name(3)).is_some());
    assert!(scene.lookup(&panel_name(0)).is_none());

    let tls = build_timelines(&cfg).unwrap();
    assert_eq!(tls.initial.duration().unwrap(), 0.0);
    assert!((tls.load.duration().unwrap() - 1.5).abs() < 1e-9);
    // vehicle and band span the whole scroll; the cards finish early
    assert!((tls.scroll.duration().unwrap() - 1.0).abs() < 1e-12);

    let compiled = tls.scroll.compile(&scene, cfg.viewport).unwrap();
    assert!(compiled.skipped().is_empty());
}

#[test]
fn deck_builds_one_slide_per_step() {
    let cfg = HeroConfig::for_variant(Variant::Deck);
    let scene = build_scene(&cfg).unwrap();
    assert!(scene.lookup(&panel_name(4)).is_some());
    assert!(scene.lookup(DAY_BAND).is_none());

    let tls = build_timelines(&cfg).unwrap();
    assert!((tls.scroll.duration().unwrap() - 4.0).abs() < 1e-12);
    let compiled = tls.scroll.compile(&scene, cfg.viewport).unwrap();
    assert!(compiled.skipped().is_empty());

    // panel-0 is pushed back four times, once per incoming panel
    let p0 = scene.lookup(&panel_name(0)).unwrap();
    let ch = compiled.channel(p0, Prop::YPercent).unwrap();
    assert_eq!(ch.segments.len(), 4);
    assert_eq!(ch.sample(4.0), Some(Value::Scalar(-20.0)));
}

#[test]
fn custom_stats_drive_counter_targets() {
    let mut cfg = HeroConfig::default();
    cfg.stats = vec![crate::hero::config::StatConfig::new("$1.5k", "Revenue")];
    let scene = build_scene(&cfg).unwrap();
    let tls = build_timelines(&cfg).unwrap();
    let compiled = tls.scroll.compile(&scene, cfg.viewport).unwrap();
    let stat = scene.lookup(&stat_name(0)).unwrap();
    let ch = compiled.channel(stat, Prop::Counter).unwrap();
    assert_eq!(ch.sample(1.0), Some(Value::Scalar(1.5)));
}
