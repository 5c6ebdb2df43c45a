//! Viewport Intersection Tracking
//!
//! - **Region** - Per-section options, identity, visible-fraction math
//! - **Tracker** - Owns every region and reports `in_view` transitions

pub mod region;
pub mod tracker;

pub use region::{
    visible_fraction, RegionId, RegionOptions, TrackedRegion, Transition, DEFAULT_HYSTERESIS,
};
pub use tracker::IntersectionTracker;
