use std::{fs::File, io::Read, path::Path};

use anyhow::Context;

use crate::{
    effects::{counter::Counter, motion::VelocityFx, trail::TrailParams},
    foundation::core::Viewport,
    foundation::error::{HeroError, HeroResult},
    interact::tilt::TiltParams,
    scroll::velocity::DEFAULT_WINDOW_SECS,
};

/// Page layout and choreography.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Day/night clip sweep with the vehicle crossing the screen.
    #[default]
    Sweep,
    /// Stacked panels sliding up one per screen.
    Deck,
}

impl Variant {
    pub fn default_pin_steps(self) -> u32 {
        match self {
            Self::Sweep => 5,
            Self::Deck => 4,
        }
    }

    pub fn default_scrub_lag(self) -> f64 {
        match self {
            Self::Sweep => 1.5,
            Self::Deck => 1.0,
        }
    }

    pub fn default_velocity_fx(self) -> VelocityFx {
        match self {
            Self::Sweep => VelocityFx::default(),
            Self::Deck => VelocityFx::deck(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StatConfig {
    /// Display value, e.g. `"58%"`; the number part is counted up.
    pub value: String,
    pub label: String,
}

impl StatConfig {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn counter(&self) -> HeroResult<Counter> {
        self.value.parse()
    }
}

/// Everything a host can tune. Every field has a default, so `{}` is a valid
/// configuration; variant-dependent fields left unset follow the variant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    pub variant: Variant,
    pub viewport: Viewport,
    /// Pinned region length in viewport heights.
    pub pin_steps: Option<u32>,
    /// Scroll offset at which the hero pins.
    pub region_start: f64,
    pub scrub_lag_secs: Option<f64>,
    pub velocity_window_secs: f64,
    pub velocity_fx: Option<VelocityFx>,
    pub tilt: TiltParams,
    pub arrow_step_px: f64,
    /// Page keys move by this fraction of the viewport height.
    pub page_step_ratio: f64,
    pub trail: TrailParams,
    pub stats: Vec<StatConfig>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Sweep,
            viewport: Viewport::default(),
            pin_steps: None,
            region_start: 0.0,
            scrub_lag_secs: None,
            velocity_window_secs: DEFAULT_WINDOW_SECS,
            velocity_fx: None,
            tilt: TiltParams::default(),
            arrow_step_px: 120.0,
            page_step_ratio: 0.9,
            trail: TrailParams::default(),
            stats: vec![
                StatConfig::new("58%", "Increase in pick up point use"),
                StatConfig::new("27%", "Reduction in abandoned carts"),
                StatConfig::new("23%", "Decrease in customer phone calls"),
                StatConfig::new("40%", "Engagement boost overall"),
            ],
        }
    }
}

impl HeroConfig {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> HeroResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        Self::from_reader(f)
    }

    pub fn from_reader(r: impl Read) -> HeroResult<Self> {
        let cfg: Self = serde_json::from_reader(r)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn pin_steps(&self) -> u32 {
        self.pin_steps
            .unwrap_or_else(|| self.variant.default_pin_steps())
    }

    pub fn scrub_lag(&self) -> f64 {
        self.scrub_lag_secs
            .unwrap_or_else(|| self.variant.default_scrub_lag())
    }

    pub fn velocity_fx(&self) -> VelocityFx {
        self.velocity_fx
            .unwrap_or_else(|| self.variant.default_velocity_fx())
    }

    pub fn counters(&self) -> HeroResult<Vec<Counter>> {
        self.stats.iter().map(StatConfig::counter).collect()
    }

    pub fn validate(&self) -> HeroResult<()> {
        self.viewport.validate()?;
        if self.pin_steps() == 0 {
            return Err(HeroError::validation("pin_steps must be >= 1"));
        }
        if !self.region_start.is_finite() || self.region_start < 0.0 {
            return Err(HeroError::validation("region_start must be finite and >= 0"));
        }
        let lag = self.scrub_lag();
        if !lag.is_finite() || lag < 0.0 {
            return Err(HeroError::validation("scrub_lag_secs must be finite and >= 0"));
        }
        if !self.velocity_window_secs.is_finite() || self.velocity_window_secs <= 0.0 {
            return Err(HeroError::validation(
                "velocity_window_secs must be finite and > 0",
            ));
        }
        self.velocity_fx().validate()?;

        let t = &self.tilt;
        if !t.gain.is_finite() {
            return Err(HeroError::validation("tilt.gain must be finite"));
        }
        for (name, secs) in [("tilt.follow_secs", t.follow_secs), ("tilt.reset_secs", t.reset_secs)] {
            if !secs.is_finite() || secs < 0.0 {
                return Err(HeroError::validation(format!("{name} must be finite and >= 0")));
            }
        }

        if !self.arrow_step_px.is_finite() || self.arrow_step_px <= 0.0 {
            return Err(HeroError::validation("arrow_step_px must be finite and > 0"));
        }
        if !self.page_step_ratio.is_finite() || self.page_step_ratio <= 0.0 {
            return Err(HeroError::validation("page_step_ratio must be finite and > 0"));
        }

        let tr = &self.trail;
        if tr.capacity == 0 {
            return Err(HeroError::validation("trail.capacity must be >= 1"));
        }
        if !tr.max_age.is_finite() || tr.max_age <= 0.0 {
            return Err(HeroError::validation("trail.max_age must be finite and > 0"));
        }
        if !tr.radius.is_finite() || tr.radius <= 0.0 {
            return Err(HeroError::validation("trail.radius must be finite and > 0"));
        }

        if self.stats.is_empty() {
            return Err(HeroError::validation("at least one stat is required"));
        }
        for s in &self.stats {
            s.counter()
                .map_err(|e| HeroError::validation(format!("stat '{}': {e}", s.label)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hero/config.rs"]
mod tests;
