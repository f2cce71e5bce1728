use smallvec::SmallVec;

use crate::{
    foundation::core::Viewport,
    foundation::error::{HeroError, HeroResult},
    scroll::velocity::VelocityTracker,
};

/// Where the page scroll sits relative to the pinned region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollPhase {
    Above,
    Pinned,
    Below,
}

/// Boundary crossings, named after the direction of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollEvent {
    /// Crossed the region start going down.
    Enter,
    /// Crossed the region end going down.
    Leave,
    /// Crossed the region end going up.
    EnterBack,
    /// Crossed the region start going up.
    LeaveBack,
}

/// Scroll offsets `[start, start + length]` during which the hero is pinned.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinRegion {
    pub start: f64,
    pub length: f64,
}

impl PinRegion {
    pub fn end(&self) -> f64 {
        self.start + self.length
    }

    pub fn phase_of(&self, offset: f64) -> ScrollPhase {
        if offset < self.start {
            ScrollPhase::Above
        } else if offset > self.end() {
            ScrollPhase::Below
        } else {
            ScrollPhase::Pinned
        }
    }

    pub fn progress_of(&self, offset: f64) -> f64 {
        if self.length <= 0.0 {
            return if offset >= self.start { 1.0 } else { 0.0 };
        }
        ((offset - self.start) / self.length).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScrollUpdate {
    pub offset: f64,
    pub progress: f64,
    pub phase: ScrollPhase,
    pub events: SmallVec<[ScrollEvent; 2]>,
    /// Translation that keeps the pinned section visually fixed.
    pub pin_translation: f64,
    pub velocity: f64,
}

/// Maps raw scroll offsets onto pinned-region progress and boundary events.
#[derive(Clone, Debug)]
pub struct ScrollAdapter {
    steps: u32,
    region_start: f64,
    viewport: Viewport,
    offset: f64,
    phase: Option<ScrollPhase>,
    velocity: VelocityTracker,
}

impl ScrollAdapter {
    pub fn new(steps: u32, region_start: f64, viewport: Viewport, window: f64) -> HeroResult<Self> {
        if steps == 0 {
            return Err(HeroError::validation("pin steps must be >= 1"));
        }
        if !region_start.is_finite() || region_start < 0.0 {
            return Err(HeroError::validation("pin region start must be finite and >= 0"));
        }
        viewport.validate()?;
        Ok(Self {
            steps,
            region_start,
            viewport,
            offset: 0.0,
            phase: None,
            velocity: VelocityTracker::new(window),
        })
    }

    pub fn region(&self) -> PinRegion {
        PinRegion {
            start: self.region_start,
            length: f64::from(self.steps) * self.viewport.height,
        }
    }

    /// Largest meaningful offset: the pinned region plus one screen of
    /// content after it.
    pub fn max_offset(&self) -> f64 {
        self.region().end() + self.viewport.height
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn progress(&self) -> f64 {
        self.region().progress_of(self.offset)
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
            .unwrap_or_else(|| self.region().phase_of(self.offset))
    }

    pub fn velocity(&mut self, now: f64) -> f64 {
        self.velocity.velocity(now)
    }

    pub fn pin_translation(&self) -> f64 {
        let region = self.region();
        match region.phase_of(self.offset) {
            ScrollPhase::Above => 0.0,
            ScrollPhase::Pinned => self.offset - region.start,
            ScrollPhase::Below => region.length,
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn update(&mut self, offset: f64, now: f64) -> ScrollUpdate {
        let offset = if offset.is_finite() {
            offset.max(0.0)
        } else {
            self.offset
        };
        self.offset = offset;
        self.velocity.push(now, offset);

        let next = self.region().phase_of(offset);
        let events = transition(self.phase, next);
        for e in &events {
            tracing::debug!(event = ?e, offset, "pin boundary");
        }
        self.phase = Some(next);
        self.snapshot(events, now)
    }

    /// Recompute the region for a new viewport, keeping the raw offset.
    pub fn resize(&mut self, viewport: Viewport, now: f64) -> HeroResult<ScrollUpdate> {
        viewport.validate()?;
        self.viewport = viewport;
        let next = self.region().phase_of(self.offset);
        let events = transition(self.phase, next);
        self.phase = Some(next);
        Ok(self.snapshot(events, now))
    }

    fn snapshot(&mut self, events: SmallVec<[ScrollEvent; 2]>, now: f64) -> ScrollUpdate {
        ScrollUpdate {
            offset: self.offset,
            progress: self.progress(),
            phase: self.phase(),
            events,
            pin_translation: self.pin_translation(),
            velocity: self.velocity.velocity(now),
        }
    }
}

fn transition(prev: Option<ScrollPhase>, next: ScrollPhase) -> SmallVec<[ScrollEvent; 2]> {
    use ScrollEvent::*;
    use ScrollPhase::*;

    let mut out = SmallVec::new();
    match (prev.unwrap_or(Above), next) {
        (Above, Pinned) => out.push(Enter),
        (Above, Below) => out.extend([Enter, Leave]),
        (Pinned, Below) => out.push(Leave),
        (Pinned, Above) => out.push(LeaveBack),
        (Below, Pinned) => out.push(EnterBack),
        (Below, Above) => out.extend([EnterBack, LeaveBack]),
        _ => {}
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/adapter.rs"]
mod tests;
