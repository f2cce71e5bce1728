/// Keys that move the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollKey {
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Space,
    Home,
    End,
}

impl ScrollKey {
    /// Map a DOM `KeyboardEvent.key` value; anything else is not ours.
    pub fn from_dom(key: &str) -> Option<Self> {
        Some(match key {
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            " " | "Space" | "Spacebar" => Self::Space,
            "Home" => Self::Home,
            "End" => Self::End,
            _ => return None,
        })
    }
}

/// A scroll the host should perform on the next frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "px", rename_all = "snake_case")]
pub enum ScrollRequest {
    By(f64),
    To(f64),
}

impl ScrollRequest {
    pub fn target(self, current: f64, max: f64) -> f64 {
        let t = match self {
            Self::By(d) => current + d,
            Self::To(t) => t,
        };
        t.clamp(0.0, max.max(0.0))
    }
}

/// Collects key presses and hands out at most one scroll request per frame.
#[derive(Clone, Debug)]
pub struct KeyboardScroller {
    arrow_step: f64,
    page_step: f64,
    end_offset: f64,
    pending: Option<ScrollRequest>,
}

impl KeyboardScroller {
    pub fn new(arrow_step: f64, page_step: f64, end_offset: f64) -> Self {
        Self {
            arrow_step,
            page_step,
            end_offset,
            pending: None,
        }
    }

    /// Update the page-sized step and end offset after a resize.
    pub fn set_extent(&mut self, page_step: f64, end_offset: f64) {
        self.page_step = page_step;
        self.end_offset = end_offset;
    }

    pub fn press(&mut self, key: ScrollKey) {
        let next = match key {
            ScrollKey::ArrowDown => ScrollRequest::By(self.arrow_step),
            ScrollKey::ArrowUp => ScrollRequest::By(-self.arrow_step),
            ScrollKey::PageDown | ScrollKey::Space => ScrollRequest::By(self.page_step),
            ScrollKey::PageUp => ScrollRequest::By(-self.page_step),
            ScrollKey::Home => ScrollRequest::To(0.0),
            ScrollKey::End => ScrollRequest::To(self.end_offset),
        };
        self.pending = Some(match (self.pending, next) {
            (Some(ScrollRequest::By(a)), ScrollRequest::By(b)) => ScrollRequest::By(a + b),
            (Some(ScrollRequest::To(t)), ScrollRequest::By(b)) => ScrollRequest::To(t + b),
            (_, next) => next,
        });
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the batched request for this frame.
    pub fn flush_frame(&mut self) -> Option<ScrollRequest> {
        self.pending.take()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interact/keyboard.rs"]
mod tests;
