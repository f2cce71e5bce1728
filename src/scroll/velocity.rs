use std::collections::VecDeque;

/// Trailing window used when the host does not configure one.
pub const DEFAULT_WINDOW_SECS: f64 = 0.1;

/// Scroll speed estimate over a short trailing window, in px/s.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    window: f64,
    samples: VecDeque<(f64, f64)>,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SECS)
    }
}

impl VelocityTracker {
    pub fn new(window: f64) -> Self {
        let window = if window.is_finite() && window > 0.0 {
            window
        } else {
            DEFAULT_WINDOW_SECS
        };
        Self {
            window,
            samples: VecDeque::new(),
        }
    }

    pub fn window(&self) -> f64 {
        self.window
    }

    pub fn push(&mut self, now: f64, offset: f64) {
        if !now.is_finite() || !offset.is_finite() {
            return;
        }
        // Clock went backwards: start over rather than report garbage.
        if self.samples.back().is_some_and(|(t, _)| *t > now) {
            self.samples.clear();
        }
        self.samples.push_back((now, offset));
        self.prune(now);
    }

    /// Velocity as of `now`. Signed: positive when scrolling down.
    pub fn velocity(&mut self, now: f64) -> f64 {
        self.prune(now);
        let (Some(&(t0, o0)), Some(&(t1, o1))) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        let dt = t1 - t0;
        if dt <= f64::EPSILON {
            return 0.0;
        }
        (o1 - o0) / dt
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    fn prune(&mut self, now: f64) {
        let cutoff = now - self.window;
        while self.samples.front().is_some_and(|(t, _)| *t < cutoff) {
            self.samples.pop_front();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/velocity.rs"]
mod tests;
