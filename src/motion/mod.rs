//! Motion Module - Pure interpolation building blocks
//!
//! - **Easing** - Linear, quadratic and cubic-bezier timing curves
//! - **Mapper** - Signal-to-style functions (parallax, pointer drift, scroll progress)
//! - **Keyframes** - Evenly spaced keyframe tracks and looping clocks
//!
//! Nothing in here holds state. Every function is a function of its inputs.

pub mod easing;
pub mod keyframes;
pub mod mapper;

pub use easing::Easing;
pub use keyframes::{Keyframes, LoopClock, LoopTrack};
pub use mapper::{
    map, map_stops, parallax_offset, pointer_offset, progress_to, scroll_progress, scroll_scale,
    section_parallax, ScrollOffsets,
};
