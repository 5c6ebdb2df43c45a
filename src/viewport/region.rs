//! Tracked regions - one per page section.
//!
//! A region knows its document-space geometry, its visibility threshold and
//! whether it latches. [`TrackedRegion::observe`] applies the transition rule
//! to one visible-fraction sample; it never smooths or debounces.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{check_unit, MotionError, Result};
use crate::state::Viewport;
use crate::types::Rect;

// =============================================================================
// IDENTITY
// =============================================================================

/// Identity of a tracked region. Never reused within one tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionId(pub(crate) u32);

impl RegionId {
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region#{}", self.0)
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Extra fraction a re-triggerable section needs to enter view on top of
/// its threshold.
pub const DEFAULT_HYSTERESIS: f64 = 0.25;

/// How a region decides it is in view.
///
/// A region enters view once its visible fraction reaches
/// `threshold + hysteresis` and stays in view while the fraction is at least
/// `threshold`. A fraction hovering around one value can't toggle `in_view`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionOptions {
    /// Fraction of the region (or of the viewport, for regions taller than
    /// it) that must stay visible. `0.0` means "any visible pixel".
    pub threshold: f64,
    /// Added to `threshold` for entering (capped at 1)
    pub hysteresis: f64,
    /// Latch `in_view = true` forever after the first entry
    pub trigger_once: bool,
    /// Pixels added to both edges of the viewport box; negative shrinks it
    pub root_margin: f64,
}

impl RegionOptions {
    /// Re-triggerable section at the given threshold.
    pub fn section(threshold: f64) -> Self {
        Self {
            threshold,
            hysteresis: DEFAULT_HYSTERESIS,
            trigger_once: false,
            root_margin: 0.0,
        }
    }

    /// Reveal-once block: any visible pixel inside a viewport shrunk by `margin`.
    pub fn once(margin: f64) -> Self {
        Self {
            threshold: 0.0,
            hysteresis: 0.0,
            trigger_once: true,
            root_margin: -margin.abs(),
        }
    }

    pub fn with_trigger_once(mut self, trigger_once: bool) -> Self {
        self.trigger_once = trigger_once;
        self
    }

    pub fn with_root_margin(mut self, root_margin: f64) -> Self {
        self.root_margin = root_margin;
        self
    }

    /// `0.0` enters and exits at the same fraction.
    pub fn with_hysteresis(mut self, hysteresis: f64) -> Self {
        self.hysteresis = hysteresis;
        self
    }

    /// Validate options.
    pub fn validate(&self) -> Result<()> {
        check_unit("threshold", self.threshold)?;
        check_unit("hysteresis", self.hysteresis)?;
        if !self.root_margin.is_finite() {
            return Err(MotionError::NonFinite { field: "root_margin" });
        }
        Ok(())
    }

    /// Fraction needed to stay in view, forced into `[0, 1]` (NaN becomes 0).
    pub fn exit_threshold(&self) -> f64 {
        unit_or_zero(self.threshold)
    }

    /// Fraction needed to enter view.
    pub fn enter_threshold(&self) -> f64 {
        (self.exit_threshold() + unit_or_zero(self.hysteresis)).min(1.0)
    }
}

fn unit_or_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

impl Default for RegionOptions {
    fn default() -> Self {
        Self::section(0.25)
    }
}

// =============================================================================
// TRANSITIONS
// =============================================================================

/// Change in a region's `in_view` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Entered,
    Exited,
}

// =============================================================================
// VISIBLE FRACTION
// =============================================================================

/// Visible fraction of `rect` at `scroll_y`.
///
/// Overlap with the (margin-adjusted) viewport divided by the smaller of the
/// region height and the viewport height, so a region taller than the
/// viewport that fills the screen reports 1.0. Missing geometry, an
/// unmeasured viewport and zero-height regions all report 0.
pub fn visible_fraction(
    rect: Option<Rect>,
    scroll_y: f64,
    viewport: &Viewport,
    root_margin: f64,
) -> f64 {
    let Some(rect) = rect else {
        return 0.0;
    };
    if !rect.is_laid_out() || rect.height <= 0.0 || !viewport.is_measured() || !scroll_y.is_finite()
    {
        return 0.0;
    }

    let margin = if root_margin.is_finite() { root_margin } else { 0.0 };
    let (top, bottom) = viewport.visible_span(scroll_y, margin);
    let basis = rect.height.min(bottom - top);
    if basis <= 0.0 {
        return 0.0;
    }
    (rect.vertical_overlap(top, bottom) / basis).clamp(0.0, 1.0)
}

// =============================================================================
// TRACKED REGION
// =============================================================================

/// One tracked page section.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedRegion {
    id: RegionId,
    options: RegionOptions,
    geometry: Option<Rect>,
    fraction: f64,
    in_view: bool,
    entries: u32,
}

impl TrackedRegion {
    pub(crate) fn new(id: RegionId, options: RegionOptions) -> Self {
        Self {
            id,
            options,
            geometry: None,
            fraction: 0.0,
            in_view: false,
            entries: 0,
        }
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn options(&self) -> &RegionOptions {
        &self.options
    }

    pub fn geometry(&self) -> Option<Rect> {
        self.geometry
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }

    /// Last observed visible fraction.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// How many times the region has entered view.
    pub fn entries(&self) -> u32 {
        self.entries
    }

    pub(crate) fn set_geometry(&mut self, geometry: Option<Rect>) {
        self.geometry = geometry.filter(Rect::is_laid_out);
    }

    /// Whether `fraction` keeps (or puts) the region in view.
    ///
    /// Entering uses the enter threshold, staying uses the exit threshold.
    /// A zero threshold still needs at least some overlap.
    fn satisfies(&self, fraction: f64) -> bool {
        let threshold = if self.in_view {
            self.options.exit_threshold()
        } else {
            self.options.enter_threshold()
        };
        fraction > 0.0 && fraction >= threshold
    }

    /// Apply one visible-fraction sample. Returns the transition, if any.
    pub(crate) fn observe(&mut self, fraction: f64) -> Option<Transition> {
        let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
        self.fraction = fraction;

        let visible = self.satisfies(fraction);
        match (self.in_view, visible) {
            (false, true) => {
                self.in_view = true;
                self.entries += 1;
                Some(Transition::Entered)
            }
            (true, false) if !self.options.trigger_once => {
                self.in_view = false;
                Some(Transition::Exited)
            }
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
