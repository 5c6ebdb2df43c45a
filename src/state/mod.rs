//! State Module - Environment signals
//!
//! This module owns everything the core reads from the environment:
//!
//! - **Signals** - Scroll offset, pointer position and clock, behind a single-writer bus
//! - **Viewport** - Window size, pointer normalization, visible document span

pub mod signals;
pub mod viewport;

pub use signals::{DerivedValue, SignalBus, SignalReader, SignalSnapshot};
pub use viewport::Viewport;
