//! Viewport - The visible window into the document.
//!
//! Holds the window size used to normalize raw pointer pixels and to decide
//! how much of a tracked region is on screen. A zero-size viewport is the
//! "not measured yet" state: pointers normalize to center and nothing is in
//! view.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::Pointer;

/// Size of the visible window, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True once both dimensions are positive and finite.
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Convert a raw pixel position to a normalized pointer.
    ///
    /// Returns [`Pointer::CENTER`] when the viewport is not measured.
    pub fn normalize_pointer(&self, px: f64, py: f64) -> Pointer {
        if !self.is_measured() {
            return Pointer::CENTER;
        }
        Pointer::new(px / self.width, py / self.height)
    }

    /// Document-space span `[top, bottom)` visible at `scroll_y`, shrunk (or
    /// grown) by `margin` pixels on both edges.
    pub fn visible_span(&self, scroll_y: f64, margin: f64) -> (f64, f64) {
        let top = scroll_y - margin;
        let bottom = scroll_y + self.height + margin;
        (top, bottom.max(top))
    }
}
