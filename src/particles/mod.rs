//! Particle Field Generation
//!
//! - **Random** - Pluggable `[0, 1)` random sources (thread, seeded, scripted)
//! - **Particle** - One particle's parameters and its motion as a function of time
//! - **Field** - Fixed population with a `Created -> Running -> Disposed` lifecycle

pub mod field;
pub mod particle;
pub mod random;

pub use field::{FieldState, ParticleField, ParticleFieldConfig};
pub use particle::{Particle, ParticleMotion, ParticleVisual};
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
