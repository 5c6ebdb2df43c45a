//! Intersection Tracker - `in_view` state for every mounted region.
//!
//! The tracker owns its regions exclusively. Geometry comes in from the
//! render surface via [`IntersectionTracker::set_geometry`]; each
//! [`IntersectionTracker::update`] recomputes every region's visible
//! fraction for the current scroll offset and reports the transitions in
//! mount order.
//!
//! # Example
//!
//! ```ignore
//! use reveal_motion::viewport::{IntersectionTracker, RegionOptions};
//!
//! let mut tracker = IntersectionTracker::new();
//! let features = tracker.mount(RegionOptions::section(0.25));
//! tracker.set_geometry(features, Some(Rect::new(0.0, 900.0, 1280.0, 700.0)));
//!
//! for (id, transition) in tracker.update(scroll_y, &viewport) {
//!     // hand the transition to the region's sequencer
//! }
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use super::region::{visible_fraction, RegionId, RegionOptions, TrackedRegion, Transition};
use crate::state::Viewport;
use crate::types::Rect;

/// Owner of every tracked region.
#[derive(Debug, Default)]
pub struct IntersectionTracker {
    regions: BTreeMap<RegionId, TrackedRegion>,
    next_id: u32,
}

impl IntersectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Start tracking a region. It begins out of view with no geometry.
    pub fn mount(&mut self, options: RegionOptions) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        self.regions.insert(id, TrackedRegion::new(id, options));
        debug!(region = %id, threshold = options.threshold, hysteresis = options.hysteresis, once = options.trigger_once, "region mounted");
        id
    }

    /// Stop tracking a region. Returns false if it was not mounted.
    pub fn unmount(&mut self, id: RegionId) -> bool {
        let removed = self.regions.remove(&id).is_some();
        if removed {
            debug!(region = %id, "region unmounted");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    // -------------------------------------------------------------------------
    // Inbound geometry
    // -------------------------------------------------------------------------

    /// Set a region's document-space bounds. `None` means "not laid out".
    pub fn set_geometry(&mut self, id: RegionId, geometry: Option<Rect>) {
        if let Some(region) = self.regions.get_mut(&id) {
            region.set_geometry(geometry);
        }
    }

    /// Feed a visible fraction measured by the render surface directly.
    pub fn observe(&mut self, id: RegionId, fraction: f64) -> Option<Transition> {
        let region = self.regions.get_mut(&id)?;
        let transition = region.observe(fraction);
        if let Some(transition) = transition {
            log_transition(id, transition, fraction);
        }
        transition
    }

    /// Recompute every region from its geometry at `scroll_y`.
    ///
    /// Returns transitions in mount order. Regions without geometry read as
    /// fraction 0 and therefore stay (or fall) out of view unless latched.
    pub fn update(&mut self, scroll_y: f64, viewport: &Viewport) -> Vec<(RegionId, Transition)> {
        let mut transitions = Vec::new();
        for (&id, region) in self.regions.iter_mut() {
            let fraction = visible_fraction(
                region.geometry(),
                scroll_y,
                viewport,
                region.options().root_margin,
            );
            if let Some(transition) = region.observe(fraction) {
                log_transition(id, transition, fraction);
                transitions.push((id, transition));
            }
        }
        transitions
    }

    // -------------------------------------------------------------------------
    // Outbound state
    // -------------------------------------------------------------------------

    pub fn region(&self, id: RegionId) -> Option<&TrackedRegion> {
        self.regions.get(&id)
    }

    /// Current `in_view` state. Unknown regions are out of view.
    pub fn is_in_view(&self, id: RegionId) -> bool {
        self.regions.get(&id).is_some_and(TrackedRegion::in_view)
    }

    pub fn visible_fraction(&self, id: RegionId) -> f64 {
        self.regions.get(&id).map_or(0.0, TrackedRegion::fraction)
    }

    /// `(id, in_view)` for every region, in mount order.
    pub fn states(&self) -> impl Iterator<Item = (RegionId, bool)> + '_ {
        self.regions.values().map(|r| (r.id(), r.in_view()))
    }
}

fn log_transition(id: RegionId, transition: Transition, fraction: f64) {
    debug!(region = %id, ?transition, fraction, "region visibility changed");
}

// =============================================================================
// TESTS
// =============================================================================
