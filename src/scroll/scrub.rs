use crate::animation::ease::Ease;

/// Smoothed playhead that chases scroll progress.
///
/// Every new target restarts a catch-up tween of `lag` seconds from the
/// current position, so fast scrolling never lets the playhead jump. With a
/// zero lag the playhead follows the target exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct Scrub {
    lag: f64,
    ease: Ease,
    from: f64,
    target: f64,
    started_at: f64,
    current: f64,
}

impl Scrub {
    pub fn new(lag: f64) -> Self {
        Self {
            lag: if lag.is_finite() { lag.max(0.0) } else { 0.0 },
            // power3.out, the catch-up curve used for numeric scrub values
            ease: Ease::OutQuart,
            from: 0.0,
            target: 0.0,
            started_at: 0.0,
            current: 0.0,
        }
    }

    pub fn lag(&self) -> f64 {
        self.lag
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    pub fn set_target(&mut self, target: f64, now: f64) {
        if !target.is_finite() || target == self.target {
            return;
        }
        self.advance(now);
        self.from = self.current;
        self.target = target;
        self.started_at = now;
        if self.lag == 0.0 {
            self.current = target;
        }
    }

    /// Snap to `target` without easing (mount, resize).
    pub fn jump(&mut self, target: f64) {
        if target.is_finite() {
            self.from = target;
            self.target = target;
            self.current = target;
        }
    }

    /// Position as of `now`.
    pub fn advance(&mut self, now: f64) -> f64 {
        if self.is_settled() {
            return self.current;
        }
        let elapsed = (now - self.started_at).max(0.0);
        if self.lag == 0.0 || elapsed >= self.lag {
            self.current = self.target;
        } else {
            let t = self.ease.apply(elapsed / self.lag);
            self.current = self.from + (self.target - self.from) * t;
        }
        self.current
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/scrub.rs"]
mod tests;
