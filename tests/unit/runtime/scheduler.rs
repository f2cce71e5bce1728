use super::*;
use crate::{
    foundation::core::Viewport,
    scene::registry::ElementKind,
    timeline::dsl::{StepOpts, TimelineBuilder},
};

fn scene() -> (Scene, ElementId) {
    let mut s = Scene::new(Viewport::new(800.0, 600.0).unwrap());
    let car = s.register("car", ElementKind::Vehicle).unwrap();
    (s, car)
}

#[test]
fn playback_renders_initial_state_and_completes() {
    let (mut s, car) = scene();
    let tl = TimelineBuilder::new("load")
        .from_to(
            ["car"],
            [(Prop::Opacity, 0.0, 1.0)],
            StepOpts::new().duration(0.5).ease(Ease::Linear),
        )
        .unwrap()
        .build()
        .unwrap()
        .compile(&s, s.viewport())
        .unwrap();

    let mut sched = Scheduler::new();
    let id = sched.play(tl, &mut s);
    assert_eq!(s.scalar(car, Prop::Opacity), Some(0.0));

    assert!(sched.tick(0.25, &mut s).is_empty());
    assert!((s.scalar(car, Prop::Opacity).unwrap() - 0.5).abs() < 1e-9);
    assert_eq!(sched.tick(1.0, &mut s), vec![id]);
    assert_eq!(s.scalar(car, Prop::Opacity), Some(1.0));
    assert!(!sched.is_playing(id));
    assert!(sched.is_idle());
}

#[test]
fn new_tween_overwrites_same_property() {
    let (mut s, car) = scene();
    let mut sched = Scheduler::new();
    sched
        .tween(&mut s, TweenSpec::new(car, Prop::SkewX, 10.0).duration(1.0))
        .unwrap();
    sched.tick(0.5, &mut s);
    assert!((s.scalar(car, Prop::SkewX).unwrap() - 5.0).abs() < 1e-9);

    sched
        .tween(&mut s, TweenSpec::new(car, Prop::SkewX, 0.0).duration(0.5))
        .unwrap();
    assert_eq!(sched.tween_count(), 1);
    sched.tick(0.25, &mut s);
    assert!((s.scalar(car, Prop::SkewX).unwrap() - 2.5).abs() < 1e-9);
    sched.tick(0.25, &mut s);
    assert_eq!(s.scalar(car, Prop::SkewX), Some(0.0));
    assert_eq!(sched.tween_count(), 0);
}

#[test]
fn zero_duration_tween_writes_immediately() {
    let (mut s, car) = scene();
    let mut sched = Scheduler::new();
    let id = sched
        .tween(&mut s, TweenSpec::new(car, Prop::RotationY, 7.5))
        .unwrap();
    assert!(id.is_none());
    assert_eq!(s.scalar(car, Prop::RotationY), Some(7.5));
}

#[test]
fn tweens_on_absent_elements_and_bad_specs() {
    let (mut s, car) = scene();
    let mut sched = Scheduler::new();
    s.detach(car);
    assert_eq!(
        sched
            .tween(&mut s, TweenSpec::new(car, Prop::X, 1.0).duration(1.0))
            .unwrap(),
        None
    );
    assert!(
        sched
            .tween(&mut s, TweenSpec::new(car, Prop::X, 1.0).duration(-1.0))
            .is_err()
    );
    assert!(
        sched
            .tween(
                &mut s,
                TweenSpec::new(car, Prop::ClipPath, 1.0).duration(1.0)
            )
            .is_err()
    );
}

#[test]
fn starting_a_playback_takes_over_tweened_properties() {
    let (mut s, car) = scene();
    let mut sched = Scheduler::new();
    sched
        .tween(&mut s, TweenSpec::new(car, Prop::Opacity, 0.2).duration(1.0))
        .unwrap();
    sched
        .tween(&mut s, TweenSpec::new(car, Prop::SkewX, 10.0).duration(1.0))
        .unwrap();
    sched.tick(0.5, &mut s);
    assert!((s.scalar(car, Prop::Opacity).unwrap() - 0.6).abs() < 1e-9);

    let flare = TimelineBuilder::new("flare")
        .to(
            ["car"],
            [(Prop::Opacity, 1.0)],
            StepOpts::new().duration(0.5).ease(Ease::Linear),
        )
        .unwrap()
        .build()
        .unwrap()
        .compile(&s, s.viewport())
        .unwrap();
    sched.play(flare, &mut s);
    assert_eq!(sched.tween_count(), 1);

    sched.tick(0.5, &mut s);
    assert_eq!(s.scalar(car, Prop::Opacity), Some(1.0));
    assert_eq!(s.scalar(car, Prop::SkewX), Some(10.0));
}
