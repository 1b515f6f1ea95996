//! Single-shot "read to the end" detection.
//!
//! Scroll events arrive at whatever rate the browser fires them. The latch
//! turns that stream into exactly one completion: it starts `Armed`, flips to
//! `Triggered` the first time the viewport gets close enough to the bottom, and
//! ignores every observation after that.

/// Scroll position of the document at one instant, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    /// `window.scrollY`
    pub scroll_top: f64,
    /// `window.innerHeight`
    pub viewport_height: f64,
    /// `document.documentElement.scrollHeight`
    pub document_height: f64,
}

impl ScrollMetrics {
    /// Pixels between the viewport's bottom edge and the end of the document.
    pub fn distance_to_bottom(&self) -> f64 {
        self.document_height - (self.scroll_top + self.viewport_height)
    }

    pub fn near_bottom(&self, threshold: f64) -> bool {
        self.distance_to_bottom() <= threshold
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatchState {
    Armed,
    Triggered,
}

#[derive(Clone, Debug)]
pub struct CompletionLatch {
    state: LatchState,
    threshold: f64,
}

impl CompletionLatch {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: LatchState::Armed,
            threshold,
        }
    }

    pub fn state(&self) -> LatchState {
        self.state
    }

    pub fn is_triggered(&self) -> bool {
        self.state == LatchState::Triggered
    }

    /// Feed one scroll observation. Returns `true` exactly once: on the
    /// observation that trips the latch.
    pub fn observe(&mut self, metrics: &ScrollMetrics) -> bool {
        match self.state {
            LatchState::Triggered => false,
            LatchState::Armed if metrics.near_bottom(self.threshold) => {
                self.state = LatchState::Triggered;
                true
            }
            LatchState::Armed => false,
        }
    }
}
