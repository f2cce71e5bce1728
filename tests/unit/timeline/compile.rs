use super::*;
use crate::{
    foundation::core::Length,
    scene::registry::ElementKind,
    timeline::dsl::{StepOpts, TimelineBuilder},
};

fn vp() -> Viewport {
    Viewport::new(1000.0, 800.0).unwrap()
}

fn scene() -> Scene {
    let mut s = Scene::new(vp());
    s.register("headline", ElementKind::Headline).unwrap();
    s.register("car", ElementKind::Vehicle).unwrap();
    s.register("headlights", ElementKind::Headlights).unwrap();
    s
}

fn value_of(writes: &[Write], element: ElementId, prop: Prop) -> Option<f64> {
    writes
        .iter()
        .find(|w| w.element == element && w.prop == prop)
        .and_then(|w| w.value.as_scalar())
}

#[test]
fn to_steps_chain_from_previous_values() {
    let mut s = scene();
    let lights = s.lookup("headlights").unwrap();
    s.write(lights, Prop::Opacity, &Value::Scalar(0.0));

    let tl = TimelineBuilder::new("load")
        .to(
            ["headlights"],
            [(Prop::Opacity, 1.0)],
            StepOpts::new().duration(0.1).ease(Ease::Linear).repeat(3).yoyo(true),
        )
        .unwrap()
        .to(
            ["headlights"],
            [(Prop::Opacity, 0.8)],
            StepOpts::new().duration(0.3).ease(Ease::Linear),
        )
        .unwrap()
        .build()
        .unwrap();
    let c = tl.compile(&s, vp()).unwrap();
    assert!((c.duration() - 0.7).abs() < 1e-9);

    let ch = c.channel(lights, Prop::Opacity).unwrap();
    assert_eq!(ch.segments.len(), 2);
    // yoyo with an odd repeat count lands back on the start value
    assert_eq!(ch.segments[1].from, Value::Scalar(0.0));
    assert!((ch.sample(0.05).unwrap().as_scalar().unwrap() - 0.5).abs() < 1e-9);
    assert!((ch.sample(0.15).unwrap().as_scalar().unwrap() - 0.5).abs() < 1e-9);
    assert!((ch.sample(0.1).unwrap().as_scalar().unwrap() - 1.0).abs() < 1e-9);
    assert!((ch.sample(0.7).unwrap().as_scalar().unwrap() - 0.8).abs() < 1e-9);
    assert_eq!(ch.sample(5.0).unwrap(), Value::Scalar(0.8));
}

#[test]
fn lengths_resolve_and_endpoints_are_exact() {
    let s = scene();
    let car = s.lookup("car").unwrap();
    let tl = TimelineBuilder::new("scroll")
        .from_to(
            ["car"],
            [(Prop::X, Length::Vw(-20.0), Length::Vw(120.0))],
            StepOpts::new().duration(1.0).ease(Ease::Linear),
        )
        .unwrap()
        .build()
        .unwrap();
    let c = tl.compile(&s, vp()).unwrap();
    assert_eq!(value_of(&c.sample_at(0.0), car, Prop::X), Some(-200.0));
    assert_eq!(value_of(&c.sample_at(0.5), car, Prop::X), Some(500.0));
    assert_eq!(value_of(&c.sample_at(1.0), car, Prop::X), Some(1200.0));
}

#[test]
fn absent_targets_are_skipped_but_keep_timing() {
    let s = scene();
    let tl = TimelineBuilder::new("stats")
        .from_to(
            ["stat-0", "car"],
            [(Prop::Opacity, 0.0, 1.0)],
            StepOpts::new().duration(0.35).stagger(0.15),
        )
        .unwrap()
        .build()
        .unwrap();
    let c = tl.compile(&s, vp()).unwrap();
    assert_eq!(c.skipped(), ["stat-0".to_string()]);
    assert_eq!(c.channels().len(), 1);
    assert!((c.channels()[0].segments[0].start - 0.15).abs() < 1e-12);
}

#[test]
fn render_only_emits_crossed_channels() {
    let s = scene();
    let headline = s.lookup("headline").unwrap();
    let car = s.lookup("car").unwrap();
    let tl = TimelineBuilder::new("t")
        .from_to(["headline"], [(Prop::Opacity, 0.0, 1.0)], StepOpts::new().duration(1.0).at("0"))
        .unwrap()
        .from_to(["car"], [(Prop::Opacity, 0.0, 1.0)], StepOpts::new().duration(1.0).at("2"))
        .unwrap()
        .build()
        .unwrap();
    let c = tl.compile(&s, vp()).unwrap();

    assert_eq!(c.render(None, 0.0).len(), 2);
    let w = c.render(Some(0.2), 0.6);
    assert_eq!(w.len(), 1);
    assert_eq!(w[0].element, headline);
    assert!(c.render(Some(1.2), 1.8).is_empty());
    let back = c.render(Some(2.5), 0.5);
    assert_eq!(back.len(), 2);
    assert_eq!(value_of(&back, car, Prop::Opacity), Some(0.0));
    assert!(c.render(Some(0.4), 0.4).is_empty());
}

#[test]
fn apply_counts_changed_writes() {
    let mut s = scene();
    let tl = TimelineBuilder::new("t")
        .from_to(["car"], [(Prop::Scale, 0.5, 1.0)], StepOpts::new().duration(1.0))
        .unwrap()
        .build()
        .unwrap();
    let c = tl.compile(&s, vp()).unwrap();
    assert_eq!(c.apply(&mut s, None, 0.0), 1);
    assert_eq!(c.apply(&mut s, None, 0.0), 0);
    let car = s.lookup("car").unwrap();
    assert_eq!(s.scalar(car, Prop::Scale), Some(0.5));
}
