use crate::{
    animation::ease::Ease,
    foundation::core::{Point, Rect},
    runtime::scheduler::TweenSpec,
    scene::{registry::ElementId, style::Prop},
};

/// Card tilt response to the pointer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TiltParams {
    /// Degrees of rotation per unit of normalized offset; the offset is
    /// clamped to ±0.5 so the peak tilt is `gain / 2`.
    pub gain: f64,
    pub follow_secs: f64,
    pub follow_ease: Ease,
    pub reset_secs: f64,
    pub reset_ease: Ease,
}

impl Default for TiltParams {
    fn default() -> Self {
        Self {
            gain: 20.0,
            follow_secs: 0.4,
            follow_ease: Ease::OutCubic,
            reset_secs: 1.2,
            reset_ease: Ease::OutElastic {
                amplitude: 1.0,
                period: 0.3,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Tilt {
    pub rotation_x: f64,
    pub rotation_y: f64,
}

impl Tilt {
    /// Tilt for a pointer over `card`. Degenerate rects and non-finite
    /// pointers give no tilt.
    pub fn from_pointer(card: Rect, pointer: Point, gain: f64) -> Self {
        let (w, h) = (card.width(), card.height());
        if !(w > 0.0 && h > 0.0) || !pointer.x.is_finite() || !pointer.y.is_finite() {
            return Self::default();
        }
        let x_pct = ((pointer.x - card.x0) / w - 0.5).clamp(-0.5, 0.5);
        let y_pct = ((pointer.y - card.y0) / h - 0.5).clamp(-0.5, 0.5);
        Self {
            rotation_x: -y_pct * gain,
            rotation_y: x_pct * gain,
        }
    }

    pub fn follow(self, card: ElementId, params: &TiltParams) -> [TweenSpec; 2] {
        [
            TweenSpec::new(card, Prop::RotationY, self.rotation_y)
                .duration(params.follow_secs)
                .ease(params.follow_ease),
            TweenSpec::new(card, Prop::RotationX, self.rotation_x)
                .duration(params.follow_secs)
                .ease(params.follow_ease),
        ]
    }

    /// Spring back to flat when the pointer leaves.
    pub fn reset(card: ElementId, params: &TiltParams) -> [TweenSpec; 2] {
        [
            TweenSpec::new(card, Prop::RotationY, 0.0)
                .duration(params.reset_secs)
                .ease(params.reset_ease),
            TweenSpec::new(card, Prop::RotationX, 0.0)
                .duration(params.reset_secs)
                .ease(params.reset_ease),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interact/tilt.rs"]
mod tests;
