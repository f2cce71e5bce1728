//! Scene layout and choreography of both page variants.

use crate::{
    animation::{ease::Ease, value::Value},
    effects::clip::ClipPath,
    foundation::core::Length,
    foundation::error::HeroResult,
    hero::config::{HeroConfig, Variant},
    scene::{
        registry::{ElementKind, Scene},
        style::Prop,
    },
    timeline::{
        dsl::{StepDefaults, StepOpts, TimelineBuilder},
        model::Timeline,
    },
};

pub const CONTAINER: &str = "hero";
pub const HEADLINE: &str = "headline";
pub const VEHICLE: &str = "vehicle";
pub const FLAME: &str = "flame";
pub const HEADLIGHTS: &str = "headlights";
pub const SCROLL_PROMPT: &str = "scroll-prompt";
pub const DAY_BAND: &str = "day-band";

pub fn stat_name(i: usize) -> String {
    format!("stat-{i}")
}

pub fn panel_name(i: usize) -> String {
    format!("panel-{i}")
}

/// The three timelines a page runs: instant initial state, autoplay load
/// sequence and the scroll-scrubbed sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HeroTimelines {
    pub initial: Timeline,
    pub load: Timeline,
    pub scroll: Timeline,
}

/// Register every element the variant animates.
pub fn build_scene(config: &HeroConfig) -> HeroResult<Scene> {
    let mut scene = Scene::new(config.viewport);
    scene.register(CONTAINER, ElementKind::Container)?;
    scene.register(HEADLINE, ElementKind::Headline)?;
    scene.register(VEHICLE, ElementKind::Vehicle)?;
    scene.register(FLAME, ElementKind::Flame)?;
    scene.register(HEADLIGHTS, ElementKind::Headlights)?;
    scene.register(SCROLL_PROMPT, ElementKind::ScrollPrompt)?;
    match config.variant {
        Variant::Sweep => {
            scene.register(DAY_BAND, ElementKind::Band)?;
            for i in 0..config.stats.len() {
                scene.register(stat_name(i), ElementKind::Card)?;
            }
        }
        Variant::Deck => {
            for i in 0..=config.pin_steps() as usize {
                scene.register(panel_name(i), ElementKind::Panel)?;
            }
            for i in 0..config.stats.len() {
                scene.register(stat_name(i), ElementKind::StatBlock)?;
            }
        }
    }
    Ok(scene)
}

pub fn build_timelines(config: &HeroConfig) -> HeroResult<HeroTimelines> {
    match config.variant {
        Variant::Sweep => sweep(config),
        Variant::Deck => deck(config),
    }
}

fn stats(config: &HeroConfig) -> Vec<String> {
    (0..config.stats.len()).map(stat_name).collect()
}

/// Count every stat up from zero, staggered like the cards themselves.
fn count_up(
    mut tl: TimelineBuilder,
    config: &HeroConfig,
    label: &str,
    stagger: f64,
    opts: &StepOpts,
) -> HeroResult<TimelineBuilder> {
    for (i, counter) in config.counters()?.into_iter().enumerate() {
        let at = format!("{label}+={}", stagger * i as f64);
        tl = tl.from_to(
            [stat_name(i)],
            [(Prop::Counter, 0.0, counter.value)],
            opts.clone().at(at),
        )?;
    }
    Ok(tl)
}

fn sweep(config: &HeroConfig) -> HeroResult<HeroTimelines> {
    let cards = stats(config);

    let initial = TimelineBuilder::new("initial")
        .set(
            cards.clone(),
            [
                (Prop::Y, 150.0),
                (Prop::Opacity, 0.0),
                (Prop::Scale, 0.8),
                (Prop::RotationX, 45.0),
                (Prop::Counter, 0.0),
            ],
            "0",
        )?
        .set([DAY_BAND], [(Prop::ClipPath, Value::from(ClipPath::inset(0.0, 100.0, 0.0, 0.0)))], "0")?
        .set(
            [VEHICLE],
            [(Prop::X, Value::from(Length::Vw(-30.0))), (Prop::Opacity, Value::Scalar(0.0))],
            "0",
        )?
        .set([HEADLIGHTS, FLAME], [(Prop::Opacity, 0.0)], "0")?
        .build()?;

    let load = TimelineBuilder::new("load")
        .from_to(
            [HEADLINE],
            [(Prop::Opacity, 0.0, 1.0), (Prop::Scale, 0.95, 1.0)],
            StepOpts::new().duration(1.0).ease(Ease::OutQuart),
        )?
        .to(
            [VEHICLE],
            [(Prop::Opacity, 1.0)],
            StepOpts::new().duration(0.5).ease(Ease::Linear).at("-=0.5"),
        )?
        // ignition: quick headlight flashes, then settle at partial brightness
        .to(
            [HEADLIGHTS],
            [(Prop::Opacity, 1.0)],
            StepOpts::new().duration(0.1).repeat(3).yoyo(true).at("-=0.2"),
        )?
        .to([HEADLIGHTS], [(Prop::Opacity, 0.8)], StepOpts::new().duration(0.3))?
        .build()?;

    let linear = StepOpts::new().duration(1.0).ease(Ease::Linear).at("0");
    let reveal = StepOpts::new()
        .duration(0.35)
        .ease(Ease::OutBack { overshoot: 1.5 })
        .stagger(0.15)
        .at("cards");

    let scroll = TimelineBuilder::new("scroll")
        .from_to(
            [VEHICLE],
            [(Prop::X, Length::Vw(-20.0), Length::Vw(120.0))],
            linear.clone(),
        )?
        .from_to(
            [DAY_BAND],
            [(
                Prop::ClipPath,
                ClipPath::polygon([(0.0, 0.0), (0.0, 0.0), (-10.0, 100.0), (-10.0, 100.0)]),
                ClipPath::polygon([(0.0, 0.0), (150.0, 0.0), (120.0, 100.0), (0.0, 100.0)]),
            )],
            linear,
        )?
        .label("cards", "0.1")?
        .from_to(
            cards,
            [
                (Prop::Y, 150.0, 0.0),
                (Prop::Opacity, 0.0, 1.0),
                (Prop::Scale, 0.8, 1.0),
                (Prop::RotationX, 45.0, 0.0),
            ],
            reveal,
        )?;
    let scroll = count_up(
        scroll,
        config,
        "cards",
        0.15,
        &StepOpts::new().duration(0.35).ease(Ease::OutQuad),
    )?
    .build()?;

    Ok(HeroTimelines {
        initial,
        load,
        scroll,
    })
}

fn deck(config: &HeroConfig) -> HeroResult<HeroTimelines> {
    let blocks = stats(config);
    let steps = config.pin_steps() as usize;
    let incoming: Vec<String> = (1..=steps).map(panel_name).collect();

    let initial = TimelineBuilder::new("initial")
        .set(incoming, [(Prop::YPercent, 100.0)], "0")?
        .set(
            [VEHICLE],
            [(Prop::X, Value::from(Length::Vw(-20.0))), (Prop::Opacity, Value::Scalar(0.0))],
            "0",
        )?
        .set([HEADLINE], [(Prop::Y, 40.0), (Prop::Opacity, 0.0)], "0")?
        .set(
            blocks.clone(),
            [(Prop::Y, 30.0), (Prop::Opacity, 0.0), (Prop::Counter, 0.0)],
            "0",
        )?
        .set([HEADLIGHTS, FLAME], [(Prop::Opacity, 0.0)], "0")?
        .build()?;

    let load = TimelineBuilder::new("load")
        .defaults(StepDefaults {
            duration: 0.5,
            ease: Ease::OutQuart,
        })
        .to(
            [HEADLINE],
            [(Prop::Opacity, 1.0), (Prop::Y, 0.0)],
            StepOpts::new().duration(1.2).ease(Ease::OutExpo).at("0.2"),
        )?
        .label("stats", "-=0.6")?
        .to(
            blocks,
            [(Prop::Opacity, 1.0), (Prop::Y, 0.0)],
            StepOpts::new().duration(0.8).stagger(0.15).at("stats"),
        )?;
    let load = count_up(load, config, "stats", 0.15, &StepOpts::new().duration(0.8))?
        .to(
            [VEHICLE],
            [(Prop::Opacity, Value::Scalar(1.0)), (Prop::X, Value::from(Length::Vw(0.0)))],
            StepOpts::new().duration(1.5).ease(Ease::OutCubic).at("-=0.8"),
        )?
        .to(
            [HEADLIGHTS],
            [(Prop::Opacity, 1.0)],
            StepOpts::new().duration(0.1).repeat(3).yoyo(true).at("-=0.5"),
        )?
        .to([HEADLIGHTS], [(Prop::Opacity, 0.4)], StepOpts::new().duration(0.3))?
        .build()?;

    let mut scroll = TimelineBuilder::new("scroll").from_to(
        [VEHICLE],
        [(Prop::X, Length::Vw(0.0), Length::Vw(60.0))],
        StepOpts::new()
            .duration(steps as f64)
            .ease(Ease::Linear)
            .at("0"),
    )?;
    for i in 1..=steps {
        let at = format!("{}", i - 1);
        let depth = i as f64;
        // previous panels sink back as the next one slides over them
        scroll = scroll
            .to(
                (0..i).map(panel_name),
                [
                    (Prop::YPercent, -5.0 * depth),
                    (Prop::Scale, 0.95 - 0.02 * depth),
                    (Prop::Brightness, 0.3),
                    (Prop::Blur, 2.0),
                ],
                StepOpts::new().duration(1.0).ease(Ease::Linear).at(at.as_str()),
            )?
            .from_to(
                [panel_name(i)],
                [(Prop::YPercent, 100.0, 0.0)],
                StepOpts::new().duration(1.0).ease(Ease::Linear).at(at.as_str()),
            )?
            .to(
                [VEHICLE],
                [(Prop::Y, -30.0), (Prop::RotationZ, -3.0)],
                StepOpts::new()
                    .duration(0.5)
                    .ease(Ease::InOutSine)
                    .repeat(1)
                    .yoyo(true)
                    .at(at.as_str()),
            )?;
    }
    let scroll = scroll.build()?;

    Ok(HeroTimelines {
        initial,
        load,
        scroll,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/hero/timelines.rs"]
mod tests;
