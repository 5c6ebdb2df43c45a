//! Stagger/Reveal Sequencing
//!
//! - **Timeline** - Child specs (base style, target style, delay, duration, easing)
//! - **Sequencer** - Per-region state machine that plays a timeline on entry

pub mod sequencer;
pub mod timeline;

pub use sequencer::{RevealSequencer, SequenceState};
pub use timeline::{ChildSpec, Timeline, DEFAULT_DURATION, DEFAULT_STAGGER};
