use crate::{
    animation::{ease::Ease, value::Value},
    foundation::error::HeroResult,
    scene::style::Prop,
    timeline::model::{Entry, Position, PropTween, Step, Timeline},
};

/// Values a step falls back to when its options leave them unset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepDefaults {
    pub duration: f64,
    pub ease: Ease,
}

impl Default for StepDefaults {
    fn default() -> Self {
        Self {
            duration: 0.5,
            ease: Ease::OutQuad,
        }
    }
}

/// Per-step timing options.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepOpts {
    duration: Option<f64>,
    ease: Option<Ease>,
    at: Option<String>,
    stagger: f64,
    repeat: u32,
    yoyo: bool,
}

impl StepOpts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.duration = Some(secs);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Position string, e.g. `"-=0.5"` or `"<"`.
    pub fn at(mut self, position: impl Into<String>) -> Self {
        self.at = Some(position.into());
        self
    }

    pub fn stagger(mut self, secs: f64) -> Self {
        self.stagger = secs;
        self
    }

    pub fn repeat(mut self, n: u32) -> Self {
        self.repeat = n;
        self
    }

    pub fn yoyo(mut self, on: bool) -> Self {
        self.yoyo = on;
        self
    }
}

pub struct TimelineBuilder {
    name: String,
    defaults: StepDefaults,
    entries: Vec<Entry>,
}

impl TimelineBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            defaults: StepDefaults::default(),
            entries: Vec::new(),
        }
    }

    pub fn defaults(mut self, defaults: StepDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Animate from whatever each target shows at the step start.
    pub fn to<T, S, P, V>(self, targets: T, props: P, opts: StepOpts) -> HeroResult<Self>
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
        P: IntoIterator<Item = (Prop, V)>,
        V: Into<Value>,
    {
        let tweens = props
            .into_iter()
            .map(|(prop, to)| PropTween {
                prop,
                from: None,
                to: to.into(),
            })
            .collect();
        self.push_step(targets, tweens, opts)
    }

    /// Animate between explicit endpoints.
    pub fn from_to<T, S, P, V>(self, targets: T, props: P, opts: StepOpts) -> HeroResult<Self>
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
        P: IntoIterator<Item = (Prop, V, V)>,
        V: Into<Value>,
    {
        let tweens = props
            .into_iter()
            .map(|(prop, from, to)| PropTween {
                prop,
                from: Some(from.into()),
                to: to.into(),
            })
            .collect();
        self.push_step(targets, tweens, opts)
    }

    /// Zero-duration step.
    pub fn set<T, S, P, V>(self, targets: T, props: P, at: &str) -> HeroResult<Self>
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
        P: IntoIterator<Item = (Prop, V)>,
        V: Into<Value>,
    {
        self.to(targets, props, StepOpts::new().duration(0.0).at(at))
    }

    pub fn label(mut self, name: impl Into<String>, at: &str) -> HeroResult<Self> {
        self.entries.push(Entry::Label {
            name: name.into(),
            position: at.parse()?,
        });
        Ok(self)
    }

    pub fn step(mut self, step: Step) -> Self {
        self.entries.push(Entry::Step(step));
        self
    }

    pub fn build(self) -> HeroResult<Timeline> {
        let tl = Timeline {
            name: self.name,
            entries: self.entries,
        };
        tl.validate()?;
        Ok(tl)
    }

    fn push_step<T, S>(mut self, targets: T, tweens: Vec<PropTween>, opts: StepOpts) -> HeroResult<Self>
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let position = match opts.at.as_deref() {
            Some(at) => at.parse()?,
            None => Position::default(),
        };
        let step = Step {
            targets: targets.into_iter().map(Into::into).collect(),
            tweens,
            position,
            duration: opts.duration.unwrap_or(self.defaults.duration),
            ease: opts.ease.unwrap_or(self.defaults.ease),
            stagger: opts.stagger,
            repeat: opts.repeat,
            yoyo: opts.yoyo,
        };
        step.validate()?;
        self.entries.push(Entry::Step(step));
        Ok(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/dsl.rs"]
mod tests;
