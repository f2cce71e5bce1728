use std::fmt::Write as _;

use smallvec::{SmallVec, smallvec};

use crate::{
    foundation::core::Point,
    foundation::error::{HeroError, HeroResult},
};

/// Polygon vertices in percent of the element box (`0..=100` spans the box,
/// values outside are allowed and simply fall off the edge).
pub type Vertices = SmallVec<[Point; 4]>;

/// A CSS-style clipping shape applied to an element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ClipPath {
    /// `inset(top right bottom left)`, each in percent.
    Inset {
        top: f64,
        right: f64,
        bottom: f64,
        left: f64,
    },
    /// `polygon(x y, ...)`, coordinates in percent.
    Polygon { points: Vertices },
}

impl ClipPath {
    /// Unclipped element.
    pub fn open() -> Self {
        Self::Inset {
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        }
    }

    pub fn inset(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self::Inset {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn polygon(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::Polygon {
            points: points.into_iter().map(|(x, y)| Point::new(x, y)).collect(),
        }
    }

    pub fn to_polygon(&self) -> Vertices {
        match self {
            Self::Inset {
                top,
                right,
                bottom,
                left,
            } => smallvec![
                Point::new(*left, *top),
                Point::new(100.0 - right, *top),
                Point::new(100.0 - right, 100.0 - bottom),
                Point::new(*left, 100.0 - bottom),
            ],
            Self::Polygon { points } => points.clone(),
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Self::Inset {
                top,
                right,
                bottom,
                left,
            } => [top, right, bottom, left].iter().all(|v| v.is_finite()),
            Self::Polygon { points } => points.iter().all(|p| p.is_finite()),
        }
    }

    /// Geometry interpolation. Insets interpolate edge-wise; anything else is
    /// compared as polygons, padding the shorter one by repeating its last
    /// vertex so the shapes always line up.
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        if let (
            Self::Inset {
                top: t0,
                right: r0,
                bottom: b0,
                left: l0,
            },
            Self::Inset {
                top: t1,
                right: r1,
                bottom: b1,
                left: l1,
            },
        ) = (a, b)
        {
            let l = |x: f64, y: f64| x + (y - x) * t;
            return Self::Inset {
                top: l(*t0, *t1),
                right: l(*r0, *r1),
                bottom: l(*b0, *b1),
                left: l(*l0, *l1),
            };
        }

        let pa = a.to_polygon();
        let pb = b.to_polygon();
        let n = pa.len().max(pb.len());
        let at = |p: &Vertices, i: usize| p.get(i).or(p.last()).copied().unwrap_or(Point::ZERO);
        let points = (0..n).map(|i| at(&pa, i).lerp(at(&pb, i), t)).collect();
        Self::Polygon { points }
    }

    /// Fraction of the element box left visible, in `[0, 1]`.
    pub fn coverage(&self) -> f64 {
        let clipped = clip_to_box(&self.to_polygon());
        (shoelace(&clipped).abs() / 10_000.0).clamp(0.0, 1.0)
    }

    pub fn to_css(&self) -> String {
        match self {
            Self::Inset {
                top,
                right,
                bottom,
                left,
            } => format!("inset({top}% {right}% {bottom}% {left}%)"),
            Self::Polygon { points } => {
                let mut out = String::from("polygon(");
                for (i, p) in points.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{}% {}%", p.x, p.y);
                }
                out.push(')');
                out
            }
        }
    }

    /// Parse `inset(...)` (1 to 4 values, CSS shorthand) or `polygon(...)`.
    pub fn parse(css: &str) -> HeroResult<Self> {
        let css = css.trim();
        let (func, body) = css
            .split_once('(')
            .and_then(|(f, rest)| rest.strip_suffix(')').map(|b| (f.trim(), b)))
            .ok_or_else(|| HeroError::validation(format!("invalid clip-path '{css}'")))?;

        match func.to_ascii_lowercase().as_str() {
            "inset" => {
                let vals = body
                    .split_whitespace()
                    .map(|v| parse_percent(v, css))
                    .collect::<HeroResult<Vec<_>>>()?;
                let (top, right, bottom, left) = match vals.as_slice() {
                    [a] => (*a, *a, *a, *a),
                    [a, b] => (*a, *b, *a, *b),
                    [a, b, c] => (*a, *b, *c, *b),
                    [a, b, c, d] => (*a, *b, *c, *d),
                    _ => {
                        return Err(HeroError::validation(format!(
                            "inset() takes 1 to 4 values in '{css}'"
                        )));
                    }
                };
                Ok(Self::Inset {
                    top,
                    right,
                    bottom,
                    left,
                })
            }
            "polygon" => {
                let points = body
                    .split(',')
                    .map(|pair| {
                        let mut it = pair.split_whitespace();
                        match (it.next(), it.next(), it.next()) {
                            (Some(x), Some(y), None) => {
                                Ok(Point::new(parse_percent(x, css)?, parse_percent(y, css)?))
                            }
                            _ => Err(HeroError::validation(format!(
                                "polygon vertex '{}' must have two coordinates",
                                pair.trim()
                            ))),
                        }
                    })
                    .collect::<HeroResult<Vertices>>()?;
                if points.len() < 3 {
                    return Err(HeroError::validation(format!(
                        "polygon needs at least 3 vertices in '{css}'"
                    )));
                }
                Ok(Self::Polygon { points })
            }
            other => Err(HeroError::validation(format!(
                "unsupported clip-path function '{other}'"
            ))),
        }
    }
}

fn parse_percent(v: &str, css: &str) -> HeroResult<f64> {
    let n = v.trim().strip_suffix('%').unwrap_or(v.trim());
    let parsed: f64 = n
        .parse()
        .map_err(|_| HeroError::validation(format!("invalid coordinate '{v}' in '{css}'")))?;
    if !parsed.is_finite() {
        return Err(HeroError::validation(format!(
            "coordinate '{v}' must be finite in '{css}'"
        )));
    }
    Ok(parsed)
}

fn shoelace(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        acc += a.x * b.y - b.x * a.y;
    }
    acc / 2.0
}

// Sutherland-Hodgman against the 0..100 box.
fn clip_to_box(subject: &[Point]) -> Vec<Point> {
    #[derive(Clone, Copy)]
    enum Edge {
        Left,
        Right,
        Top,
        Bottom,
    }

    fn inside(p: Point, e: Edge) -> bool {
        match e {
            Edge::Left => p.x >= 0.0,
            Edge::Right => p.x <= 100.0,
            Edge::Top => p.y >= 0.0,
            Edge::Bottom => p.y <= 100.0,
        }
    }

    fn intersect(a: Point, b: Point, e: Edge) -> Point {
        let t = match e {
            Edge::Left => (0.0 - a.x) / (b.x - a.x),
            Edge::Right => (100.0 - a.x) / (b.x - a.x),
            Edge::Top => (0.0 - a.y) / (b.y - a.y),
            Edge::Bottom => (100.0 - a.y) / (b.y - a.y),
        };
        let p = a.lerp(b, t);
        // Snap onto the edge to avoid drift.
        match e {
            Edge::Left => Point::new(0.0, p.y),
            Edge::Right => Point::new(100.0, p.y),
            Edge::Top => Point::new(p.x, 0.0),
            Edge::Bottom => Point::new(p.x, 100.0),
        }
    }

    let mut out: Vec<Point> = subject.to_vec();
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        if out.is_empty() {
            break;
        }
        let input = std::mem::take(&mut out);
        let mut prev = input[input.len() - 1];
        for &cur in &input {
            let cur_in = inside(cur, edge);
            let prev_in = inside(prev, edge);
            if cur_in {
                if !prev_in {
                    out.push(intersect(prev, cur, edge));
                }
                out.push(cur);
            } else if prev_in {
                out.push(intersect(prev, cur, edge));
            }
            prev = cur;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/clip.rs"]
mod tests;
