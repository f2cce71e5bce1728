use std::{fmt, str::FromStr};

use crate::foundation::error::{HeroError, HeroResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Visible document viewport in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Build a viewport, rejecting non-finite or non-positive sizes.
    pub fn new(width: f64, height: f64) -> HeroResult<Self> {
        let vp = Self { width, height };
        vp.validate()?;
        Ok(vp)
    }

    /// Check viewport invariants.
    pub fn validate(self) -> HeroResult<()> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(HeroError::validation("viewport size must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(HeroError::validation("viewport width/height must be > 0"));
        }
        Ok(())
    }

    /// Drawing-surface size in whole pixels; never zero on either axis.
    pub fn surface_size(self) -> (u32, u32) {
        fn px(v: f64) -> u32 {
            if v.is_finite() {
                v.round().clamp(1.0, f64::from(u32::MAX)) as u32
            } else {
                1
            }
        }
        (px(self.width), px(self.height))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
        }
    }
}

/// A length that may be relative to the viewport.
///
/// Viewport-relative lengths are resolved when a timeline is compiled, so
/// recompiling after a resize moves elements to the equivalent position on
/// the new viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum Length {
    /// Absolute CSS pixels.
    Px(f64),
    /// Percent of viewport width.
    Vw(f64),
    /// Percent of viewport height.
    Vh(f64),
}

impl Length {
    /// Resolve to CSS pixels for a given viewport.
    pub fn to_px(self, vp: Viewport) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Vw(v) => v * vp.width / 100.0,
            Self::Vh(v) => v * vp.height / 100.0,
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Self::Px(v) | Self::Vw(v) | Self::Vh(v) => v.is_finite(),
        }
    }
}

impl FromStr for Length {
    type Err = HeroError;

    /// Parses `"12"`, `"12px"`, `"-20vw"`, `"50vh"`.
    fn from_str(s: &str) -> HeroResult<Self> {
        let s = s.trim();
        let parse = |num: &str| -> HeroResult<f64> {
            let v: f64 = num
                .trim()
                .parse()
                .map_err(|_| HeroError::validation(format!("invalid length '{s}'")))?;
            if !v.is_finite() {
                return Err(HeroError::validation(format!("length '{s}' must be finite")));
            }
            Ok(v)
        };
        if let Some(n) = s.strip_suffix("vw") {
            Ok(Self::Vw(parse(n)?))
        } else if let Some(n) = s.strip_suffix("vh") {
            Ok(Self::Vh(parse(n)?))
        } else if let Some(n) = s.strip_suffix("px") {
            Ok(Self::Px(parse(n)?))
        } else {
            Ok(Self::Px(parse(s)?))
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Vw(v) => write!(f, "{v}vw"),
            Self::Vh(v) => write!(f, "{v}vh"),
        }
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> HeroResult<Self> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| HeroError::validation(format!("color '{s}' must start with '#'")))?;
        let byte = |i: usize, len: usize| -> HeroResult<u8> {
            let part = &hex[i..i + len];
            let v = u8::from_str_radix(part, 16)
                .map_err(|_| HeroError::validation(format!("invalid hex color '{s}'")))?;
            Ok(if len == 1 { v * 17 } else { v })
        };
        if !hex.is_ascii() {
            return Err(HeroError::validation(format!("invalid hex color '{s}'")));
        }
        match hex.len() {
            3 => Ok(Self::rgb(byte(0, 1)?, byte(1, 1)?, byte(2, 1)?)),
            6 => Ok(Self::rgb(byte(0, 2)?, byte(2, 2)?, byte(4, 2)?)),
            8 => Ok(Self {
                r: byte(0, 2)?,
                g: byte(2, 2)?,
                b: byte(4, 2)?,
                a: byte(6, 2)?,
            }),
            _ => Err(HeroError::validation(format!("invalid hex color '{s}'"))),
        }
    }

    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                f64::from(self.a) / 255.0
            )
        }
    }
}

/// Brand palette shared by both page variants.
pub mod palette {
    use super::Rgba8;

    pub const GOLD: Rgba8 = Rgba8::rgb(0xFF, 0xD7, 0x00);
    pub const INK: Rgba8 = Rgba8::rgb(0x1A, 0x1A, 0x1A);
    pub const WHITE: Rgba8 = Rgba8::rgb(0xFF, 0xFF, 0xFF);
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
