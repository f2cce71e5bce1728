use crate::{
    animation::ease::Ease,
    foundation::error::{HeroError, HeroResult},
    runtime::scheduler::TweenSpec,
    scene::{registry::ElementId, style::Prop},
};

/// Vehicle stretch and lean while the page is moving.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StretchParams {
    pub stretch_divisor: f64,
    pub stretch_max: f64,
    pub skew_divisor: f64,
    /// Skew is clamped to `±skew_max` degrees in both scroll directions.
    pub skew_max: f64,
    pub secs: f64,
}

impl Default for StretchParams {
    fn default() -> Self {
        Self {
            stretch_divisor: 4000.0,
            stretch_max: 0.15,
            skew_divisor: 500.0,
            skew_max: 10.0,
            secs: 0.3,
        }
    }
}

/// Exhaust flame response.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FlameParams {
    pub opacity_divisor: f64,
    /// `None` leaves the flame's horizontal offset alone.
    pub offset_divisor: Option<f64>,
    pub offset_max: f64,
    /// `None` leaves the flame's horizontal scale alone.
    pub stretch_divisor: Option<f64>,
    pub stretch_max: f64,
    pub secs: f64,
}

impl Default for FlameParams {
    fn default() -> Self {
        Self {
            opacity_divisor: 600.0,
            offset_divisor: Some(50.0),
            offset_max: 40.0,
            stretch_divisor: None,
            stretch_max: 2.0,
            secs: 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PromptParams {
    /// Progress past which the scroll prompt hides.
    pub threshold: f64,
    pub secs: f64,
}

impl Default for PromptParams {
    fn default() -> Self {
        Self {
            threshold: 0.05,
            secs: 0.3,
        }
    }
}

/// Cosmetic effects derived from scroll velocity and progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VelocityFx {
    pub vehicle: Option<StretchParams>,
    pub flame: FlameParams,
    pub prompt: PromptParams,
}

impl Default for VelocityFx {
    fn default() -> Self {
        Self {
            vehicle: Some(StretchParams::default()),
            flame: FlameParams::default(),
            prompt: PromptParams::default(),
        }
    }
}

/// Targets of one velocity update, already clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct MotionSample {
    pub vehicle_scale_x: Option<f64>,
    pub vehicle_skew_x: Option<f64>,
    pub flame_opacity: f64,
    pub flame_x: Option<f64>,
    pub flame_scale_x: Option<f64>,
    pub prompt_opacity: f64,
}

impl VelocityFx {
    /// Settings for the stacked-panel layout: no body stretch, a brighter
    /// flame that lengthens instead of sliding back.
    pub fn deck() -> Self {
        Self {
            vehicle: None,
            flame: FlameParams {
                opacity_divisor: 300.0,
                offset_divisor: None,
                offset_max: 0.0,
                stretch_divisor: Some(800.0),
                stretch_max: 2.0,
                secs: 0.1,
            },
            prompt: PromptParams::default(),
        }
    }

    pub fn validate(&self) -> HeroResult<()> {
        let positive = |name: &str, v: f64| -> HeroResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(HeroError::validation(format!("{name} must be finite and > 0")))
            }
        };
        let non_negative = |name: &str, v: f64| -> HeroResult<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(HeroError::validation(format!("{name} must be finite and >= 0")))
            }
        };

        if let Some(v) = &self.vehicle {
            positive("vehicle.stretch_divisor", v.stretch_divisor)?;
            positive("vehicle.skew_divisor", v.skew_divisor)?;
            non_negative("vehicle.stretch_max", v.stretch_max)?;
            non_negative("vehicle.skew_max", v.skew_max)?;
            non_negative("vehicle.secs", v.secs)?;
        }
        let f = &self.flame;
        positive("flame.opacity_divisor", f.opacity_divisor)?;
        if let Some(d) = f.offset_divisor {
            positive("flame.offset_divisor", d)?;
        }
        if let Some(d) = f.stretch_divisor {
            positive("flame.stretch_divisor", d)?;
        }
        non_negative("flame.offset_max", f.offset_max)?;
        non_negative("flame.stretch_max", f.stretch_max)?;
        non_negative("flame.secs", f.secs)?;
        non_negative("prompt.secs", self.prompt.secs)?;
        if !(0.0..=1.0).contains(&self.prompt.threshold) {
            return Err(HeroError::validation("prompt.threshold must be within [0, 1]"));
        }
        Ok(())
    }

    /// Map a signed velocity (px/s) and progress to effect targets.
    pub fn sample(&self, velocity: f64, progress: f64) -> MotionSample {
        let v = if velocity.is_finite() { velocity } else { 0.0 };
        let speed = v.abs();

        let (vehicle_scale_x, vehicle_skew_x) = match &self.vehicle {
            Some(p) => (
                Some(1.0 + (speed / p.stretch_divisor).min(p.stretch_max)),
                Some(-(v / p.skew_divisor).clamp(-p.skew_max, p.skew_max)),
            ),
            None => (None, None),
        };

        let f = &self.flame;
        MotionSample {
            vehicle_scale_x,
            vehicle_skew_x,
            flame_opacity: (speed / f.opacity_divisor).min(1.0),
            flame_x: f.offset_divisor.map(|d| -(speed / d).min(f.offset_max)),
            flame_scale_x: f.stretch_divisor.map(|d| 1.0 + (speed / d).min(f.stretch_max)),
            prompt_opacity: if progress > self.prompt.threshold { 0.0 } else { 1.0 },
        }
    }

    /// Tweens that carry a sample onto the scene. Absent roles are skipped.
    pub fn tweens(
        &self,
        sample: &MotionSample,
        vehicle: Option<ElementId>,
        flame: Option<ElementId>,
        prompt: Option<ElementId>,
    ) -> Vec<TweenSpec> {
        let mut out = Vec::with_capacity(6);
        if let (Some(id), Some(p)) = (vehicle, &self.vehicle) {
            let tween = |prop, to: f64| TweenSpec::new(id, prop, to).duration(p.secs).ease(Ease::OutQuad);
            if let Some(sx) = sample.vehicle_scale_x {
                out.push(tween(Prop::ScaleX, sx));
            }
            if let Some(skew) = sample.vehicle_skew_x {
                out.push(tween(Prop::SkewX, skew));
            }
        }
        if let Some(id) = flame {
            let secs = self.flame.secs;
            let tween = |prop, to: f64| TweenSpec::new(id, prop, to).duration(secs).ease(Ease::OutQuad);
            out.push(tween(Prop::Opacity, sample.flame_opacity));
            if let Some(x) = sample.flame_x {
                out.push(tween(Prop::X, x));
            }
            if let Some(sx) = sample.flame_scale_x {
                out.push(tween(Prop::ScaleX, sx));
            }
        }
        if let Some(id) = prompt {
            out.push(
                TweenSpec::new(id, Prop::Opacity, sample.prompt_opacity)
                    .duration(self.prompt.secs)
                    .ease(Ease::OutQuad),
            );
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/motion.rs"]
mod tests;
