use std::{collections::VecDeque, path::Path};

use anyhow::Context;
use image::{Rgba, RgbaImage};

use crate::{
    foundation::core::{Point, Rgba8, palette},
    foundation::error::HeroResult,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrailParams {
    /// Most points retained at once.
    pub capacity: usize,
    /// Seconds until a point has faded out completely.
    pub max_age: f64,
    /// Stamp radius in pixels.
    pub radius: f64,
    pub color: Rgba8,
}

impl Default for TrailParams {
    fn default() -> Self {
        Self {
            capacity: 48,
            max_age: 0.6,
            radius: 6.0,
            color: palette::GOLD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TrailPoint {
    pub at: Point,
    pub time: f64,
}

/// Decorative raster of the vehicle's recent positions.
pub struct TrailCanvas {
    params: TrailParams,
    image: RgbaImage,
    points: VecDeque<TrailPoint>,
    now: f64,
}

impl TrailCanvas {
    pub fn new(width: u32, height: u32, params: TrailParams) -> Self {
        Self {
            params,
            image: RgbaImage::new(width.max(1), height.max(1)),
            points: VecDeque::with_capacity(params.capacity),
            now: 0.0,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    /// Reallocate the surface, then redraw every retained point.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (w, h) = (width.max(1), height.max(1));
        if (w, h) != self.size() {
            tracing::debug!(w, h, "resize trail canvas");
            self.image = RgbaImage::new(w, h);
        }
        self.redraw(self.now);
    }

    /// Wipe the pixels; retained points survive for the next redraw.
    pub fn clear(&mut self) {
        self.image.pixels_mut().for_each(|p| *p = Rgba([0, 0, 0, 0]));
    }

    /// Forget every point and wipe the surface.
    pub fn reset(&mut self) {
        self.points.clear();
        self.clear();
    }

    pub fn push(&mut self, at: Point, now: f64) {
        if !at.x.is_finite() || !at.y.is_finite() || !now.is_finite() {
            return;
        }
        self.now = self.now.max(now);
        self.points.push_back(TrailPoint { at, time: now });
        while self.points.len() > self.params.capacity {
            self.points.pop_front();
        }
        self.expire();
        self.stamp(at, 1.0);
    }

    /// Clear and stamp all retained points with alpha faded by age.
    pub fn redraw(&mut self, now: f64) {
        if now.is_finite() {
            self.now = self.now.max(now);
        }
        self.expire();
        self.clear();
        let points: Vec<TrailPoint> = self.points.iter().copied().collect();
        for p in points {
            let age = (self.now - p.time).max(0.0);
            let alpha = 1.0 - age / self.params.max_age;
            self.stamp(p.at, alpha);
        }
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> HeroResult<()> {
        let path = path.as_ref();
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write trail png '{}'", path.display()))?;
        Ok(())
    }

    /// Pixels with any coverage.
    pub fn lit_pixels(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] > 0).count()
    }

    fn expire(&mut self) {
        let max_age = self.params.max_age;
        let now = self.now;
        self.points.retain(|p| now - p.time < max_age);
    }

    fn stamp(&mut self, at: Point, alpha: f64) {
        if alpha <= 0.0 {
            return;
        }
        let r = self.params.radius.max(0.5);
        let (w, h) = self.size();
        let x0 = (at.x - r).floor().max(0.0);
        let y0 = (at.y - r).floor().max(0.0);
        let x1 = (at.x + r).ceil().min(f64::from(w) - 1.0);
        let y1 = (at.y + r).ceil().min(f64::from(h) - 1.0);
        if x0 > x1 || y0 > y1 {
            return;
        }

        let c = self.params.color;
        let src_a = (f64::from(c.a) / 255.0) * alpha.min(1.0);
        for y in (y0 as u32)..=(y1 as u32) {
            for x in (x0 as u32)..=(x1 as u32) {
                let d = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5).distance(at);
                if d > r {
                    continue;
                }
                let px = self.image.get_pixel_mut(x, y);
                *px = over(*px, c, src_a);
            }
        }
    }
}

/// Source-over with a straight-alpha source.
fn over(dst: Rgba<u8>, src: Rgba8, src_a: f64) -> Rgba<u8> {
    let dst_a = f64::from(dst.0[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let ch = |s: u8, d: u8| -> u8 {
        let v = (f64::from(s) * src_a + f64::from(d) * dst_a * (1.0 - src_a)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        ch(src.r, dst.0[0]),
        ch(src.g, dst.0[1]),
        ch(src.b, dst.0[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/effects/trail.rs"]
mod tests;
