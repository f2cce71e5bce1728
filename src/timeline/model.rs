use std::{collections::BTreeMap, str::FromStr};

use crate::{
    animation::ease::Ease,
    animation::value::Value,
    foundation::error::{HeroError, HeroResult},
    scene::style::Prop,
};

/// Where a step (or label) is placed on its timeline, in seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "anchor", rename_all = "snake_case")]
pub enum Position {
    /// Absolute time (`"1.2"`).
    Absolute { at: f64 },
    /// Relative to the end of everything placed so far (`"+=0.3"`, `"-=0.5"`, or nothing).
    End { offset: f64 },
    /// Relative to the previous step's start (`"<"`, `"<0.2"`).
    PrevStart { offset: f64 },
    /// Relative to the previous step's end (`">"`, `">-0.1"`).
    PrevEnd { offset: f64 },
    /// Relative to a label (`"reveal"`, `"reveal+=0.2"`).
    Label { name: String, offset: f64 },
}

impl Default for Position {
    fn default() -> Self {
        Self::End { offset: 0.0 }
    }
}

impl FromStr for Position {
    type Err = HeroError;

    fn from_str(s: &str) -> HeroResult<Self> {
        let s = s.trim();
        let num = |v: &str| -> HeroResult<f64> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(0.0);
            }
            let parsed = if let Some(rest) = v.strip_prefix("+=") {
                rest.trim().parse::<f64>()
            } else if let Some(rest) = v.strip_prefix("-=") {
                rest.trim().parse::<f64>().map(|x| -x)
            } else {
                v.parse::<f64>()
            };
            match parsed {
                Ok(x) if x.is_finite() => Ok(x),
                _ => Err(HeroError::animation(format!("invalid position '{s}'"))),
            }
        };

        if s.is_empty() {
            return Ok(Self::default());
        }
        if s.starts_with("+=") || s.starts_with("-=") {
            return Ok(Self::End { offset: num(s)? });
        }
        if let Some(rest) = s.strip_prefix('<') {
            return Ok(Self::PrevStart { offset: num(rest)? });
        }
        if let Some(rest) = s.strip_prefix('>') {
            return Ok(Self::PrevEnd { offset: num(rest)? });
        }
        if let Ok(at) = s.parse::<f64>() {
            if !at.is_finite() {
                return Err(HeroError::animation(format!("invalid position '{s}'")));
            }
            return Ok(Self::Absolute { at });
        }

        let split = s.find("+=").or_else(|| s.find("-="));
        let (name, offset) = match split {
            Some(i) => (&s[..i], num(&s[i..])?),
            None => (s, 0.0),
        };
        let name = name.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            return Err(HeroError::animation(format!("invalid position '{s}'")));
        }
        Ok(Self::Label {
            name: name.to_string(),
            offset,
        })
    }
}

/// One property animated by a step. `from == None` means "whatever the
/// element shows when the step starts".
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropTween {
    pub prop: Prop,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,
    pub to: Value,
}

/// A timeline step: the same property changes applied to one or more targets.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    /// Scene element names, in stagger order.
    pub targets: Vec<String>,
    pub tweens: Vec<PropTween>,
    #[serde(default)]
    pub position: Position,
    /// Seconds per iteration; zero makes the step an instant set.
    pub duration: f64,
    #[serde(default)]
    pub ease: Ease,
    /// Seconds between consecutive targets' starts.
    #[serde(default)]
    pub stagger: f64,
    /// Extra iterations after the first.
    #[serde(default)]
    pub repeat: u32,
    /// Alternate direction on every other iteration.
    #[serde(default)]
    pub yoyo: bool,
}

impl Step {
    /// Time one target needs to finish all iterations.
    pub fn iteration_span(&self) -> f64 {
        self.duration * f64::from(self.repeat + 1)
    }

    /// Time from the first target's start to the last target's end.
    pub fn span(&self) -> f64 {
        let extra = self.targets.len().saturating_sub(1) as f64;
        self.iteration_span() + self.stagger * extra
    }

    pub fn validate(&self) -> HeroResult<()> {
        if self.targets.is_empty() {
            return Err(HeroError::animation("step must have at least one target"));
        }
        if self.targets.iter().any(|t| t.trim().is_empty()) {
            return Err(HeroError::animation("step target names must be non-empty"));
        }
        if self.tweens.is_empty() {
            return Err(HeroError::animation("step must animate at least one property"));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(HeroError::animation("step duration must be finite and >= 0"));
        }
        if !self.stagger.is_finite() || self.stagger < 0.0 {
            return Err(HeroError::animation("step stagger must be finite and >= 0"));
        }
        for tw in &self.tweens {
            for v in tw.from.iter().chain(std::iter::once(&tw.to)) {
                if v.kind() != tw.prop.kind() {
                    return Err(HeroError::animation(format!(
                        "{:?} expects a {:?} value, got {:?}",
                        tw.prop,
                        tw.prop.kind(),
                        v.kind()
                    )));
                }
                if !v.is_finite() {
                    return Err(HeroError::animation(format!(
                        "{:?} value must be finite",
                        tw.prop
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum Entry {
    Step(Step),
    Label { name: String, position: Position },
}

/// An ordered list of steps sharing one playhead.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    pub name: String,
    pub entries: Vec<Entry>,
}

/// A step with its start time resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedStep<'a> {
    pub index: usize,
    pub start: f64,
    pub step: &'a Step,
}

impl Timeline {
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Step(s) => Some(s),
            Entry::Label { .. } => None,
        })
    }

    pub fn validate(&self) -> HeroResult<()> {
        for step in self.steps() {
            step.validate()?;
        }
        self.layout().map(|_| ())
    }

    /// Resolve every step's start time, in declaration order.
    pub fn layout(&self) -> HeroResult<Vec<PlacedStep<'_>>> {
        let mut end = 0.0f64;
        let mut prev_start = 0.0f64;
        let mut prev_end = 0.0f64;
        let mut labels: BTreeMap<&str, f64> = BTreeMap::new();
        let mut placed = Vec::new();

        for (index, entry) in self.entries.iter().enumerate() {
            let position = match entry {
                Entry::Step(step) => &step.position,
                Entry::Label { position, .. } => position,
            };
            let at = match position {
                Position::Absolute { at } => *at,
                Position::End { offset } => end + offset,
                Position::PrevStart { offset } => prev_start + offset,
                Position::PrevEnd { offset } => prev_end + offset,
                Position::Label { name, offset } => {
                    let base = labels.get(name.as_str()).copied().ok_or_else(|| {
                        HeroError::animation(format!(
                            "timeline '{}' references unknown label '{name}'",
                            self.name
                        ))
                    })?;
                    base + offset
                }
            }
            .max(0.0);

            match entry {
                Entry::Label { name, .. } => {
                    labels.insert(name.as_str(), at);
                }
                Entry::Step(step) => {
                    prev_start = at;
                    prev_end = at + step.span();
                    end = end.max(prev_end);
                    placed.push(PlacedStep {
                        index,
                        start: at,
                        step,
                    });
                }
            }
        }

        Ok(placed)
    }

    /// Total length in seconds.
    pub fn duration(&self) -> HeroResult<f64> {
        Ok(self
            .layout()?
            .iter()
            .map(|p| p.start + p.step.span())
            .fold(0.0, f64::max))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
