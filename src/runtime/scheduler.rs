//! Frame-driven playback of one-shot timelines and ad-hoc tweens.
//!
//! Time only advances through [`Scheduler::tick`]; nothing here reads a
//! clock, so callers decide what "now" is.

use slotmap::{SlotMap, new_key_type};

use crate::{
    animation::{ease::Ease, value::Value},
    foundation::error::{HeroError, HeroResult},
    scene::{
        registry::{ElementId, Scene},
        style::Prop,
    },
    timeline::compile::{CompiledTimeline, Segment},
};

new_key_type! {
    pub struct PlaybackId;
    pub struct TweenId;
}

struct Playback {
    timeline: CompiledTimeline,
    time: f64,
}

struct ActiveTween {
    element: ElementId,
    prop: Prop,
    segment: Segment,
    elapsed: f64,
}

/// A single-property tween started at runtime (pointer follow, velocity
/// effects). The start value is captured from the scene when it begins.
#[derive(Clone, Debug, PartialEq)]
pub struct TweenSpec {
    pub element: ElementId,
    pub prop: Prop,
    pub to: Value,
    pub duration: f64,
    pub ease: Ease,
}

impl TweenSpec {
    pub fn new(element: ElementId, prop: Prop, to: impl Into<Value>) -> Self {
        Self {
            element,
            prop,
            to: to.into(),
            duration: 0.0,
            ease: Ease::Linear,
        }
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.duration = secs;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

#[derive(Default)]
pub struct Scheduler {
    playbacks: SlotMap<PlaybackId, Playback>,
    tweens: SlotMap<TweenId, ActiveTween>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a timeline from zero, rendering its initial state immediately.
    pub fn play(&mut self, timeline: CompiledTimeline, scene: &mut Scene) -> PlaybackId {
        self.play_from(timeline, scene, 0.0)
    }

    /// Start a timeline part-way through, e.g. when rebuilding after a resize.
    ///
    /// Tweens already driving a property the timeline animates are killed:
    /// the newer writer owns the property.
    pub fn play_from(&mut self, timeline: CompiledTimeline, scene: &mut Scene, time: f64) -> PlaybackId {
        let time = if time.is_finite() {
            time.clamp(0.0, timeline.duration())
        } else {
            0.0
        };
        for c in timeline.channels() {
            self.kill_tweens_of(c.element, c.prop);
        }
        timeline.apply(scene, None, time);
        tracing::debug!(timeline = %timeline.name, duration = timeline.duration(), time, "play");
        self.playbacks.insert(Playback { timeline, time })
    }

    pub fn is_playing(&self, id: PlaybackId) -> bool {
        self.playbacks.contains_key(id)
    }

    pub fn playback_time(&self, id: PlaybackId) -> Option<f64> {
        self.playbacks.get(id).map(|p| p.time)
    }

    pub fn stop(&mut self, id: PlaybackId) -> bool {
        self.playbacks.remove(id).is_some()
    }

    /// Start a tween, interrupting any tween already driving the same
    /// element property. Returns `None` when the element is absent.
    pub fn tween(&mut self, scene: &mut Scene, spec: TweenSpec) -> HeroResult<Option<TweenId>> {
        if !spec.duration.is_finite() || spec.duration < 0.0 {
            return Err(HeroError::animation("tween duration must be finite and >= 0"));
        }
        if spec.to.kind() != spec.prop.kind() || !spec.to.is_finite() {
            return Err(HeroError::animation(format!(
                "invalid tween target for {:?}",
                spec.prop
            )));
        }
        self.kill_tweens_of(spec.element, spec.prop);

        let Some(from) = scene.get(spec.element, spec.prop) else {
            return Ok(None);
        };
        let to = spec.to.resolve(scene.viewport());
        if spec.duration == 0.0 {
            scene.write(spec.element, spec.prop, &to);
            return Ok(None);
        }
        let segment = Segment {
            start: 0.0,
            duration: spec.duration,
            repeat: 0,
            yoyo: false,
            ease: spec.ease,
            from,
            to,
        };
        Ok(Some(self.tweens.insert(ActiveTween {
            element: spec.element,
            prop: spec.prop,
            segment,
            elapsed: 0.0,
        })))
    }

    pub fn kill_tweens_of(&mut self, element: ElementId, prop: Prop) {
        self.tweens
            .retain(|_, t| !(t.element == element && t.prop == prop));
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_idle(&self) -> bool {
        self.playbacks.is_empty() && self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.playbacks.clear();
        self.tweens.clear();
    }

    /// Advance everything by `dt` seconds and write the results into the
    /// scene. Returns the playbacks that finished during this tick.
    pub fn tick(&mut self, dt: f64, scene: &mut Scene) -> Vec<PlaybackId> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut finished = Vec::new();

        for (id, p) in self.playbacks.iter_mut() {
            let prev = p.time;
            p.time = (p.time + dt).min(p.timeline.duration());
            p.timeline.apply(scene, Some(prev), p.time);
            if p.time >= p.timeline.duration() {
                finished.push(id);
            }
        }
        for id in &finished {
            if let Some(p) = self.playbacks.remove(*id) {
                tracing::debug!(timeline = %p.timeline.name, "playback complete");
            }
        }

        self.tweens.retain(|_, t| {
            t.elapsed += dt;
            let value = t.segment.sample(t.elapsed);
            scene.write(t.element, t.prop, &value);
            t.elapsed < t.segment.duration
        });

        finished
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scheduler.rs"]
mod tests;
