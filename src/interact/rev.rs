use crate::{
    animation::ease::Ease,
    foundation::error::HeroResult,
    runtime::scheduler::PlaybackId,
    scene::style::Prop,
    timeline::{
        dsl::{StepOpts, TimelineBuilder},
        model::Timeline,
    },
};

/// The idle → revving → idle cycle behind the vehicle click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevState {
    #[default]
    Idle,
    Revving(PlaybackId),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RevGuard {
    state: RevState,
}

impl RevGuard {
    pub fn state(&self) -> RevState {
        self.state
    }

    pub fn is_revving(&self) -> bool {
        matches!(self.state, RevState::Revving(_))
    }

    /// Record a started rev. Refused (returns `false`) while one is running.
    pub fn begin(&mut self, playback: PlaybackId) -> bool {
        if self.is_revving() {
            return false;
        }
        self.state = RevState::Revving(playback);
        true
    }

    /// Clear the flag if the running rev is among `finished`.
    pub fn finish(&mut self, finished: &[PlaybackId]) -> bool {
        match self.state {
            RevState::Revving(id) if finished.contains(&id) => {
                self.state = RevState::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.state = RevState::Idle;
    }
}

/// Short engine-rev shake: the body rocks, the exhaust flares and the
/// headlights blink, then everything returns to where it was.
pub fn rev_timeline(vehicle: &str, flame: &str, headlights: &str) -> HeroResult<Timeline> {
    TimelineBuilder::new("rev")
        .to(
            [vehicle],
            [(Prop::RotationZ, -2.0)],
            StepOpts::new()
                .duration(0.06)
                .ease(Ease::InOutSine)
                .repeat(5)
                .yoyo(true),
        )?
        .to(
            [flame],
            [(Prop::Opacity, 1.0), (Prop::ScaleX, 1.8)],
            StepOpts::new()
                .duration(0.15)
                .ease(Ease::OutQuad)
                .repeat(1)
                .yoyo(true)
                .at("<"),
        )?
        .to(
            [headlights],
            [(Prop::Opacity, 1.0)],
            StepOpts::new()
                .duration(0.1)
                .ease(Ease::Linear)
                .repeat(1)
                .yoyo(true)
                .at("<"),
        )?
        .build()
}

#[cfg(test)]
#[path = "../../tests/unit/interact/rev.rs"]
mod tests;
