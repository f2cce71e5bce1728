use crate::{
    effects::clip::ClipPath,
    foundation::core::{Length, Rgba8, Viewport},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

impl Lerp for ClipPath {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        ClipPath::lerp(a, b, t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Plain numbers; lengths resolve into this kind.
    Scalar,
    Color,
    Clip,
}

/// An animatable property value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Scalar(f64),
    Length(Length),
    Color(Rgba8),
    Clip(ClipPath),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) | Self::Length(_) => ValueKind::Scalar,
            Self::Color(_) => ValueKind::Color,
            Self::Clip(_) => ValueKind::Clip,
        }
    }

    /// Replace viewport-relative lengths with pixels.
    pub fn resolve(&self, vp: Viewport) -> Self {
        match self {
            Self::Length(l) => Self::Scalar(l.to_px(vp)),
            other => other.clone(),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Length(Length::Px(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgba8> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_clip(&self) -> Option<&ClipPath> {
        match self {
            Self::Clip(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Self::Scalar(v) => v.is_finite(),
            Self::Length(l) => l.is_finite(),
            Self::Color(_) => true,
            Self::Clip(c) => c.is_finite(),
        }
    }
}

impl Lerp for Value {
    /// Both sides are expected to be resolved and of the same kind; a kind
    /// mismatch holds `a` until the end of the window.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Scalar(x), Self::Scalar(y)) => Self::Scalar(<f64 as Lerp>::lerp(x, y, t)),
            (Self::Length(Length::Px(x)), Self::Length(Length::Px(y))) => {
                Self::Length(Length::Px(<f64 as Lerp>::lerp(x, y, t)))
            }
            (Self::Length(Length::Vw(x)), Self::Length(Length::Vw(y))) => {
                Self::Length(Length::Vw(<f64 as Lerp>::lerp(x, y, t)))
            }
            (Self::Length(Length::Vh(x)), Self::Length(Length::Vh(y))) => {
                Self::Length(Length::Vh(<f64 as Lerp>::lerp(x, y, t)))
            }
            (Self::Color(x), Self::Color(y)) => Self::Color(<Rgba8 as Lerp>::lerp(x, y, t)),
            (Self::Clip(x), Self::Clip(y)) => Self::Clip(ClipPath::lerp(x, y, t)),
            _ => {
                if t >= 1.0 {
                    b.clone()
                } else {
                    a.clone()
                }
            }
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Length> for Value {
    fn from(v: Length) -> Self {
        Self::Length(v)
    }
}

impl From<Rgba8> for Value {
    fn from(v: Rgba8) -> Self {
        Self::Color(v)
    }
}

impl From<ClipPath> for Value {
    fn from(v: ClipPath) -> Self {
        Self::Clip(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
