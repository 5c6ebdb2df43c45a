//! Section themes.
//!
//! One section, many palettes: a [`SectionTheme`] carries the colors a
//! section's ambient layers need (particles, sweeping lines, glow accent) so
//! the same section definition can be mounted in any color scheme.
//!
//! # Example
//!
//! ```rust
//! use reveal_motion::theme::get_preset;
//!
//! let amber = get_preset("amber").unwrap();
//! let config = amber.particles(100, false);
//! assert_eq!(config.quantity, 100);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};
use crate::particles::ParticleFieldConfig;
use crate::types::Rgba;

pub mod presets;

pub use presets::*;

/// Palette for one themed section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SectionTheme {
    pub name: String,
    /// Particle fill
    pub particle: Rgba,
    /// Glow and highlight color
    pub accent: Rgba,
    /// Faint background sweep lines
    pub line: Rgba,
}

impl SectionTheme {
    /// Build a palette from CSS hex strings.
    ///
    /// `line` usually carries its own alpha, e.g. `"#d977061a"` for 10%.
    pub fn from_hex(
        name: impl Into<String>,
        particle: &str,
        accent: &str,
        line: &str,
    ) -> Result<Self> {
        let parse = |field: &'static str, value: &str| {
            Rgba::from_hex(value).ok_or_else(|| MotionError::InvalidColor {
                field,
                value: value.to_string(),
            })
        };
        Ok(Self {
            name: name.into(),
            particle: parse("particle", particle)?,
            accent: parse("accent", accent)?,
            line: parse("line", line)?,
        })
    }

    /// Particle field config in this theme's particle color.
    pub fn particles(&self, quantity: usize, stationary: bool) -> ParticleFieldConfig {
        if stationary {
            ParticleFieldConfig::stationary(quantity, self.particle)
        } else {
            ParticleFieldConfig::drifting(quantity, self.particle)
        }
    }
}

impl Default for SectionTheme {
    fn default() -> Self {
        amber()
    }
}
