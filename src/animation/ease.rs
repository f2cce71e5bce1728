use std::f64::consts::{PI, TAU};

use crate::foundation::error::{HeroError, HeroResult};

const DEFAULT_BACK_OVERSHOOT: f64 = 1.70158;

/// Named easing curve. Every curve maps `0 -> 0` and `1 -> 1` exactly; the
/// back and elastic curves overshoot in between.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutSine,
    OutExpo,
    OutBack {
        overshoot: f64,
    },
    OutElastic {
        amplitude: f64,
        period: f64,
    },
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::InQuint => t.powi(5),
            Self::OutQuint => 1.0 - (1.0 - t).powi(5),
            Self::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Self::OutExpo => 1.0 - 2f64.powf(-10.0 * t),
            Self::OutBack { overshoot } => {
                let c1 = overshoot;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
            Self::OutElastic { amplitude, period } => {
                let amp = amplitude.max(1.0);
                let period = if period > 0.0 { period } else { 0.3 };
                let p3 = period / amplitude.clamp(f64::EPSILON, 1.0);
                let p2 = p3 / TAU * (1.0 / amp).asin();
                amp * 2f64.powf(-10.0 * t) * ((t - p2) * (TAU / p3)).sin() + 1.0
            }
        }
    }

    /// Parse a GSAP-style ease name such as `"power3.out"`, `"none"`,
    /// `"back.out(1.5)"` or `"elastic.out(1, 0.3)"`.
    pub fn parse(name: &str) -> HeroResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HeroError::animation("ease name must be non-empty"));
        }

        let (base, args) = match name.find('(') {
            Some(open) => {
                let close = name
                    .rfind(')')
                    .filter(|&c| c > open)
                    .ok_or_else(|| HeroError::animation(format!("unbalanced ease '{name}'")))?;
                (&name[..open], Some(&name[open + 1..close]))
            }
            None => (name, None),
        };
        let args = match args {
            None => Vec::new(),
            Some(a) if a.trim().is_empty() => Vec::new(),
            Some(a) => a
                .split(',')
                .map(|p| {
                    p.trim().parse::<f64>().map_err(|_| {
                        HeroError::animation(format!("invalid ease parameter in '{name}'"))
                    })
                })
                .collect::<HeroResult<Vec<_>>>()?,
        };

        let base = base.trim().to_ascii_lowercase();
        let ease = match base.as_str() {
            "none" | "linear" | "power0" => Self::Linear,
            "power1.in" | "quad.in" => Self::InQuad,
            "power1.out" | "power1" | "quad.out" => Self::OutQuad,
            "power1.inout" | "quad.inout" => Self::InOutQuad,
            "power2.in" | "cubic.in" => Self::InCubic,
            "power2.out" | "power2" | "cubic.out" => Self::OutCubic,
            "power2.inout" | "cubic.inout" => Self::InOutCubic,
            "power3.in" | "quart.in" => Self::InQuart,
            "power3.out" | "power3" | "quart.out" => Self::OutQuart,
            "power3.inout" | "quart.inout" => Self::InOutQuart,
            "power4.in" | "quint.in" | "strong.in" => Self::InQuint,
            "power4.out" | "power4" | "quint.out" | "strong.out" => Self::OutQuint,
            "sine.inout" => Self::InOutSine,
            "expo.out" | "expo" => Self::OutExpo,
            "back.out" | "back" => Self::OutBack {
                overshoot: args.first().copied().unwrap_or(DEFAULT_BACK_OVERSHOOT),
            },
            "elastic.out" | "elastic" => Self::OutElastic {
                amplitude: args.first().copied().unwrap_or(1.0),
                period: args.get(1).copied().unwrap_or(0.3),
            },
            other => {
                return Err(HeroError::animation(format!("unknown ease '{other}'")));
            }
        };

        let takes_args = matches!(ease, Self::OutBack { .. } | Self::OutElastic { .. });
        if !takes_args && !args.is_empty() {
            return Err(HeroError::animation(format!(
                "ease '{base}' does not take parameters"
            )));
        }
        if args.iter().any(|a| !a.is_finite()) {
            return Err(HeroError::animation(format!(
                "ease parameters must be finite in '{name}'"
            )));
        }
        Ok(ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
