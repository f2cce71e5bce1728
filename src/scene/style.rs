use std::collections::BTreeMap;

use crate::{
    animation::value::{Value, ValueKind},
    effects::clip::ClipPath,
    foundation::core::{Affine, Rgba8, Vec2, palette},
};

/// Animatable visual properties of a scene element.
///
/// Angles are in degrees, translations in CSS pixels (after length
/// resolution), `x_percent`/`y_percent` in percent of the element's own box.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Prop {
    X,
    Y,
    XPercent,
    YPercent,
    Scale,
    ScaleX,
    ScaleY,
    SkewX,
    RotationX,
    RotationY,
    RotationZ,
    Opacity,
    Brightness,
    Blur,
    Color,
    Counter,
    ClipPath,
}

impl Prop {
    pub const ALL: [Prop; 17] = [
        Prop::X,
        Prop::Y,
        Prop::XPercent,
        Prop::YPercent,
        Prop::Scale,
        Prop::ScaleX,
        Prop::ScaleY,
        Prop::SkewX,
        Prop::RotationX,
        Prop::RotationY,
        Prop::RotationZ,
        Prop::Opacity,
        Prop::Brightness,
        Prop::Blur,
        Prop::Color,
        Prop::Counter,
        Prop::ClipPath,
    ];

    pub fn kind(self) -> ValueKind {
        match self {
            Prop::Color => ValueKind::Color,
            Prop::ClipPath => ValueKind::Clip,
            _ => ValueKind::Scalar,
        }
    }

    /// Value an element shows when nothing has written the property.
    pub fn default_value(self) -> Value {
        match self {
            Prop::Scale | Prop::ScaleX | Prop::ScaleY | Prop::Opacity | Prop::Brightness => {
                Value::Scalar(1.0)
            }
            Prop::Color => Value::Color(palette::WHITE),
            Prop::ClipPath => Value::Clip(ClipPath::open()),
            _ => Value::Scalar(0.0),
        }
    }

    /// Clamp a resolved value into the property's legal range.
    pub fn clamp(self, value: Value) -> Value {
        match (self, value) {
            (Prop::Opacity, Value::Scalar(v)) => Value::Scalar(v.clamp(0.0, 1.0)),
            (Prop::Brightness | Prop::Blur, Value::Scalar(v)) => Value::Scalar(v.max(0.0)),
            (_, v) => v,
        }
    }
}

/// Resolved style of one element. Only properties that were written are
/// stored; reads fall back to [`Prop::default_value`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Style {
    values: BTreeMap<Prop, Value>,
}

impl Style {
    pub fn get(&self, prop: Prop) -> Value {
        self.values
            .get(&prop)
            .cloned()
            .unwrap_or_else(|| prop.default_value())
    }

    pub fn scalar(&self, prop: Prop) -> f64 {
        self.get(prop).as_scalar().unwrap_or(0.0)
    }

    pub fn color(&self) -> Rgba8 {
        self.get(Prop::Color).as_color().unwrap_or(palette::WHITE)
    }

    pub fn clip(&self) -> ClipPath {
        match self.get(Prop::ClipPath) {
            Value::Clip(c) => c,
            _ => ClipPath::open(),
        }
    }

    /// Store a value; returns `false` when it was already current.
    pub fn set(&mut self, prop: Prop, value: Value) -> bool {
        let value = prop.clamp(value);
        let changed = self.get(prop) != value;
        self.values.insert(prop, value);
        changed
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prop, &Value)> {
        self.values.iter().map(|(p, v)| (*p, v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 2D part of the element transform (3D rotations are left to the host).
    pub fn affine(&self) -> Affine {
        let translate = Vec2::new(self.scalar(Prop::X), self.scalar(Prop::Y));
        let scale = self.scalar(Prop::Scale);
        let sx = scale * self.scalar(Prop::ScaleX);
        let sy = scale * self.scalar(Prop::ScaleY);
        let rot = self.scalar(Prop::RotationZ).to_radians();
        let skew = self.scalar(Prop::SkewX).to_radians().tan();

        // T(translate) * R(rot) * Skew(x) * S(scale)
        Affine::translate(translate)
            * Affine::rotate(rot)
            * Affine::skew(skew, 0.0)
            * Affine::scale_non_uniform(sx, sy)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/style.rs"]
mod tests;
