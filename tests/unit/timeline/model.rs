use super::*;

fn step(targets: &[&str], position: &str, duration: f64) -> Step {
    Step {
        targets: targets.iter().map(|s| s.to_string()).collect(),
        tweens: vec![PropTween {
            prop: Prop::Opacity,
            from: None,
            to: Value::Scalar(1.0),
        }],
        position: position.parse().unwrap(),
        duration,
        ease: Ease::Linear,
        stagger: 0.0,
        repeat: 0,
        yoyo: false,
    }
}

#[test]
fn position_parse_covers_all_anchors() {
    assert_eq!("".parse::<Position>().unwrap(), Position::default());
    assert_eq!(
        "1.5".parse::<Position>().unwrap(),
        Position::Absolute { at: 1.5 }
    );
    assert_eq!(
        "-=0.5".parse::<Position>().unwrap(),
        Position::End { offset: -0.5 }
    );
    assert_eq!(
        "+=0.25".parse::<Position>().unwrap(),
        Position::End { offset: 0.25 }
    );
    assert_eq!(
        "<".parse::<Position>().unwrap(),
        Position::PrevStart { offset: 0.0 }
    );
    assert_eq!(
        "<0.2".parse::<Position>().unwrap(),
        Position::PrevStart { offset: 0.2 }
    );
    assert_eq!(
        ">-=0.1".parse::<Position>().unwrap(),
        Position::PrevEnd { offset: -0.1 }
    );
    assert_eq!(
        "reveal+=0.3".parse::<Position>().unwrap(),
        Position::Label {
            name: "reveal".to_string(),
            offset: 0.3
        }
    );
    assert!("+=abc".parse::<Position>().is_err());
    assert!("a b".parse::<Position>().is_err());
}

#[test]
fn layout_matches_load_sequence_overlaps() {
    let tl = Timeline {
        name: "load".to_string(),
        entries: vec![
            Entry::Step(step(&["headline"], "", 1.0)),
            Entry::Step(step(&["car"], "-=0.5", 0.5)),
            Entry::Step(Step {
                repeat: 3,
                yoyo: true,
                ..step(&["headlights"], "-=0.2", 0.1)
            }),
            Entry::Step(step(&["headlights"], "", 0.3)),
        ],
    };
    let placed = tl.layout().unwrap();
    let starts: Vec<f64> = placed.iter().map(|p| p.start).collect();
    assert!((starts[0] - 0.0).abs() < 1e-12);
    assert!((starts[1] - 0.5).abs() < 1e-12);
    assert!((starts[2] - 0.8).abs() < 1e-12);
    assert!((starts[3] - 1.2).abs() < 1e-12);
    assert!((tl.duration().unwrap() - 1.5).abs() < 1e-12);
}

#[test]
fn stagger_extends_span_and_labels_resolve() {
    let mut stats = step(&["s0", "s1", "s2"], "intro+=0.1", 0.35);
    stats.stagger = 0.15;
    let tl = Timeline {
        name: "scroll".to_string(),
        entries: vec![
            Entry::Step(step(&["car"], "0", 1.0)),
            Entry::Label {
                name: "intro".to_string(),
                position: "0".parse().unwrap(),
            },
            Entry::Step(stats),
        ],
    };
    let placed = tl.layout().unwrap();
    assert!((placed[1].start - 0.1).abs() < 1e-12);
    assert!((placed[1].step.span() - 0.65).abs() < 1e-12);
    assert!((tl.duration().unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn unknown_label_and_bad_steps_are_rejected() {
    let tl = Timeline {
        name: "t".to_string(),
        entries: vec![Entry::Step(step(&["car"], "missing", 1.0))],
    };
    assert!(tl.layout().is_err());

    let mut bad = step(&["car"], "", 1.0);
    bad.tweens[0].to = Value::Color(crate::foundation::core::palette::GOLD);
    assert!(bad.validate().is_err());

    assert!(step(&[], "", 1.0).validate().is_err());
    assert!(step(&["car"], "", -1.0).validate().is_err());
    assert!(step(&["car"], "", f64::NAN).validate().is_err());
}
