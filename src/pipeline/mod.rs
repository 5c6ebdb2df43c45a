//! Frame Pipeline
//!
//! Connects the signal bus, the intersection tracker, the reveal sequencers,
//! the parallax layers and the particle fields into one per-frame pass.
//!
//! # Pipeline Architecture
//!
//! ```text
//! environment events → SignalBus ─┬→ IntersectionTracker → RevealSequencer ─┐
//!                                 ├→ ParallaxLayer ─────────────────────────┼→ FrameOutput
//!                                 └→ ParticleField (clock) ─────────────────┘
//! ```
//!
//! ## Key Design Principles
//!
//! - **Single writer**: only [`Stage::tick`] samples the bus
//! - **Same-frame ordering**: transitions reach the sequencers before any style is produced
//! - **Whole-unit teardown**: unmounting a section cancels its reveal and drops its field and layers

pub mod layer;
pub mod stage;

// Re-exports
pub use layer::{LayerDrive, ParallaxLayer};
pub use stage::{
    FieldFrame, FieldId, FrameOutput, LayerFrame, LayerId, RegionFrame, SectionSpec, Stage,
};
