use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::{
        ease::Ease,
        value::{Lerp, Value},
    },
    foundation::core::Viewport,
    foundation::error::HeroResult,
    scene::{
        registry::{ElementId, Scene},
        style::Prop,
    },
    timeline::model::Timeline,
};

/// One resolved interpolation window on a channel.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Segment {
    pub start: f64,
    pub duration: f64,
    pub repeat: u32,
    pub yoyo: bool,
    pub ease: Ease,
    pub from: Value,
    pub to: Value,
}

impl Segment {
    pub fn end(&self) -> f64 {
        self.start + self.duration * f64::from(self.repeat + 1)
    }

    /// Value once every iteration has played.
    pub fn final_value(&self) -> &Value {
        if self.yoyo && self.repeat % 2 == 1 {
            &self.from
        } else {
            &self.to
        }
    }

    pub fn sample(&self, t: f64) -> Value {
        if t < self.start {
            return self.from.clone();
        }
        if self.duration <= 0.0 || t >= self.end() {
            return self.final_value().clone();
        }
        let local = t - self.start;
        let iteration = (local / self.duration).floor();
        let mut phase = (local - iteration * self.duration) / self.duration;
        if self.yoyo && (iteration as u64) % 2 == 1 {
            phase = 1.0 - phase;
        }
        Value::lerp(&self.from, &self.to, self.ease.apply(phase))
    }
}

/// Every segment driving one property of one element, sorted by start.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Channel {
    pub target: String,
    pub element: ElementId,
    pub prop: Prop,
    pub segments: Vec<Segment>,
}

impl Channel {
    /// Value at `t`: the latest-starting segment that has begun wins; before
    /// the first segment the channel shows that segment's start value.
    pub fn sample(&self, t: f64) -> Option<Value> {
        let first = self.segments.first()?;
        let active = self.segments.iter().rev().find(|s| s.start <= t);
        Some(match active {
            Some(seg) => seg.sample(t),
            None => first.from.clone(),
        })
    }

    fn touched(&self, lo: f64, hi: f64) -> bool {
        self.segments.iter().any(|s| s.start <= hi && s.end() >= lo)
    }
}

/// A pending style write produced by evaluating a timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Write {
    pub element: ElementId,
    pub prop: Prop,
    pub value: Value,
}

/// A timeline bound to concrete scene elements and a viewport.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CompiledTimeline {
    pub name: String,
    duration: f64,
    channels: Vec<Channel>,
    skipped: Vec<String>,
}

impl CompiledTimeline {
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Target names that were not present in the scene at compile time.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn channel(&self, element: ElementId, prop: Prop) -> Option<&Channel> {
        self.channels
            .iter()
            .find(|c| c.element == element && c.prop == prop)
    }

    /// Every channel's value at `t`.
    pub fn sample_at(&self, t: f64) -> Vec<Write> {
        self.channels
            .iter()
            .filter_map(|c| {
                c.sample(t).map(|value| Write {
                    element: c.element,
                    prop: c.prop,
                    value,
                })
            })
            .collect()
    }

    /// Writes for a playhead move from `prev` to `cur`. Only channels with a
    /// segment inside the swept interval are emitted; `prev == None` renders
    /// everything.
    pub fn render(&self, prev: Option<f64>, cur: f64) -> Vec<Write> {
        let Some(prev) = prev else {
            return self.sample_at(cur);
        };
        if prev == cur {
            return Vec::new();
        }
        let (lo, hi) = if prev < cur { (prev, cur) } else { (cur, prev) };
        self.channels
            .iter()
            .filter(|c| c.touched(lo, hi))
            .filter_map(|c| {
                c.sample(cur).map(|value| Write {
                    element: c.element,
                    prop: c.prop,
                    value,
                })
            })
            .collect()
    }

    /// Render into the scene; returns how many writes changed something.
    pub fn apply(&self, scene: &mut Scene, prev: Option<f64>, cur: f64) -> usize {
        self.render(prev, cur)
            .into_iter()
            .filter(|w| scene.write(w.element, w.prop, &w.value))
            .count()
    }
}

impl Timeline {
    /// Bind step targets to scene elements and resolve every segment.
    ///
    /// `to`-only tweens start from the value the channel shows at the step's
    /// start, falling back to the element's current style for the first
    /// segment. Absent targets are skipped.
    #[tracing::instrument(skip_all, fields(timeline = %self.name))]
    pub fn compile(&self, scene: &Scene, viewport: Viewport) -> HeroResult<CompiledTimeline> {
        viewport.validate()?;
        self.validate()?;

        let mut placed = self.layout()?;
        let duration = placed
            .iter()
            .map(|p| p.start + p.step.span())
            .fold(0.0, f64::max);
        placed.sort_by(|a, b| a.start.total_cmp(&b.start).then(a.index.cmp(&b.index)));

        let mut channels: Vec<Channel> = Vec::new();
        let mut slots: BTreeMap<(ElementId, Prop), usize> = BTreeMap::new();
        let mut skipped = BTreeSet::new();

        for p in &placed {
            for (i, name) in p.step.targets.iter().enumerate() {
                let Some(id) = scene.lookup(name) else {
                    tracing::debug!(target_name = %name, "skipping absent target");
                    skipped.insert(name.clone());
                    continue;
                };
                let start = p.start + p.step.stagger * i as f64;

                for tw in &p.step.tweens {
                    let slot = *slots.entry((id, tw.prop)).or_insert_with(|| {
                        channels.push(Channel {
                            target: name.clone(),
                            element: id,
                            prop: tw.prop,
                            segments: Vec::new(),
                        });
                        channels.len() - 1
                    });
                    let channel = &mut channels[slot];

                    let from = match &tw.from {
                        Some(v) => v.resolve(viewport),
                        None => channel
                            .sample(start)
                            .or_else(|| scene.get(id, tw.prop))
                            .unwrap_or_else(|| tw.prop.default_value()),
                    };
                    let segment = Segment {
                        start,
                        duration: p.step.duration,
                        repeat: p.step.repeat,
                        yoyo: p.step.yoyo,
                        ease: p.step.ease,
                        from,
                        to: tw.to.resolve(viewport),
                    };
                    let at = channel.segments.partition_point(|s| s.start <= start);
                    channel.segments.insert(at, segment);
                }
            }
        }

        tracing::debug!(
            channels = channels.len(),
            skipped = skipped.len(),
            duration,
            "compiled timeline"
        );

        Ok(CompiledTimeline {
            name: self.name.clone(),
            duration,
            channels,
            skipped: skipped.into_iter().collect(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/compile.rs"]
mod tests;
