//! # reveal-motion
//!
//! Viewport-reactive animation core for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for the
//! environment signals (scroll, pointer, clock).
//!
//! ## Architecture
//!
//! Every style the core produces is a pure function of a handful of signals
//! sampled once per frame. Nothing is scheduled: reveal sequences store a
//! trigger timestamp, particle fields store their parameters, and both derive
//! their current state from the clock on demand.
//!
//! ```text
//! events → SignalBus → IntersectionTracker → RevealSequencer ┐
//!                    → ParallaxLayer ────────────────────────┼→ FrameOutput → render surface
//!                    → ParticleField ────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`] - Signal bus and viewport
//! - [`motion`] - Easing, signal-to-style mappers, keyframes
//! - [`viewport`] - Region intersection tracking
//! - [`reveal`] - Staggered reveal timelines and their sequencer
//! - [`particles`] - Ambient particle fields
//! - [`pipeline`] - The per-frame [`Stage`]
//! - [`theme`] - Section color palettes

pub mod error;
pub mod motion;
pub mod particles;
pub mod pipeline;
pub mod reveal;
pub mod state;
pub mod theme;
pub mod types;
pub mod viewport;

// Re-export commonly used items
pub use types::*;

pub use error::{MotionError, Result};

pub use motion::{
    map, map_stops, parallax_offset, pointer_offset, progress_to, scroll_progress, scroll_scale,
    section_parallax, Easing, Keyframes, LoopClock, LoopTrack, ScrollOffsets,
};

pub use state::{SignalBus, SignalReader, SignalSnapshot, Viewport};

pub use viewport::{IntersectionTracker, RegionId, RegionOptions, Transition};

pub use reveal::{ChildSpec, RevealSequencer, SequenceState, Timeline};

pub use particles::{
    FieldState, ParticleField, ParticleFieldConfig, ParticleVisual, RandomSource, SeededRandom,
};

pub use pipeline::{
    FieldFrame, FieldId, FrameOutput, LayerDrive, LayerFrame, LayerId, ParallaxLayer,
    RegionFrame, SectionSpec, Stage,
};

pub use theme::SectionTheme;
