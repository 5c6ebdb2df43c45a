//! Parallax Layers - Continuously driven decorative elements.
//!
//! A layer has no lifecycle of its own beyond mount/unmount. Each frame it
//! folds its drives over [`Transform::IDENTITY`]: translations add, opacity
//! and scale multiply. A layer mounted with a section reads that section's
//! geometry for section-relative drives.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::motion::{
    map_stops, parallax_offset, pointer_offset, scroll_progress, scroll_scale, section_parallax,
    Easing, LoopTrack, ScrollOffsets,
};
use crate::state::SignalSnapshot;
use crate::types::{Rect, StyleChannels, Transform};
use crate::viewport::RegionId;

/// One signal-to-style mapping contributing to a layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LayerDrive {
    /// Vertical drift of `scroll * factor`
    Scroll { factor: f64 },
    /// Vertical drift relative to the owning section's top
    SectionScroll { bias: f64, factor: f64 },
    /// Drift toward (or away from) the pointer, zero at the viewport center
    Pointer { strength: f64 },
    /// Zoom of `1 + scroll * rate`
    ScrollScale { rate: f64 },
    /// Fade and slide as the owning section scrolls through the viewport.
    ///
    /// `domain` holds progress stops; `opacity` and `translate_y` hold the
    /// matching values. An empty value list leaves that channel alone.
    ScrollFade {
        offsets: ScrollOffsets,
        domain: Vec<f64>,
        opacity: Vec<f64>,
        translate_y: Vec<f64>,
    },
    /// Horizontal looping sweep
    Sweep { track: LoopTrack },
}

impl LayerDrive {
    /// Channels this drive writes.
    pub fn channels(&self) -> StyleChannels {
        match self {
            LayerDrive::Scroll { .. } | LayerDrive::SectionScroll { .. } => {
                StyleChannels::TRANSLATE_Y
            }
            LayerDrive::Pointer { .. } => StyleChannels::TRANSLATE,
            LayerDrive::ScrollScale { .. } => StyleChannels::SCALE,
            LayerDrive::ScrollFade {
                opacity,
                translate_y,
                ..
            } => {
                let mut channels = StyleChannels::NONE;
                if !opacity.is_empty() {
                    channels |= StyleChannels::OPACITY;
                }
                if !translate_y.is_empty() {
                    channels |= StyleChannels::TRANSLATE_Y;
                }
                channels
            }
            LayerDrive::Sweep { .. } => StyleChannels::TRANSLATE_X,
        }
    }

    /// Fold this drive into `acc`.
    ///
    /// Section-relative drives leave `acc` untouched while the section has
    /// no geometry.
    pub fn apply(&self, acc: Transform, signals: &SignalSnapshot, section: Option<Rect>) -> Transform {
        let scroll = signals.scroll_y;
        match self {
            LayerDrive::Scroll { factor } => Transform {
                translate_y: acc.translate_y + parallax_offset(scroll, *factor),
                ..acc
            },
            LayerDrive::SectionScroll { bias, factor } => match section {
                Some(rect) => Transform {
                    translate_y: acc.translate_y
                        + section_parallax(scroll, rect.top(), *bias, *factor),
                    ..acc
                },
                None => acc,
            },
            LayerDrive::Pointer { strength } => {
                let offset = pointer_offset(signals.pointer, *strength);
                Transform {
                    translate_x: acc.translate_x + offset.x,
                    translate_y: acc.translate_y + offset.y,
                    ..acc
                }
            }
            LayerDrive::ScrollScale { rate } => Transform {
                scale: acc.scale * scroll_scale(scroll, *rate),
                ..acc
            },
            LayerDrive::ScrollFade {
                offsets,
                domain,
                opacity,
                translate_y,
            } => {
                let Some(rect) = section else {
                    return acc;
                };
                let progress = scroll_progress(scroll, signals.viewport.height, rect, *offsets);
                let mut out = acc;
                if !opacity.is_empty() {
                    out.opacity *= map_stops(progress, domain, opacity, Easing::Linear);
                }
                if !translate_y.is_empty() {
                    out.translate_y += map_stops(progress, domain, translate_y, Easing::Linear);
                }
                out
            }
            LayerDrive::Sweep { track } => Transform {
                translate_x: acc.translate_x + track.value_at(signals.clock),
                ..acc
            },
        }
    }
}

/// A decorative element driven by one or more [`LayerDrive`]s.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParallaxLayer {
    drives: Vec<LayerDrive>,
    #[cfg_attr(feature = "serde", serde(skip))]
    section: Option<RegionId>,
}

impl ParallaxLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a drive.
    pub fn drive(mut self, drive: LayerDrive) -> Self {
        self.drives.push(drive);
        self
    }

    pub fn drives(&self) -> &[LayerDrive] {
        &self.drives
    }

    /// Section whose geometry section-relative drives read.
    pub fn section(&self) -> Option<RegionId> {
        self.section
    }

    pub(crate) fn attach(&mut self, section: RegionId) {
        self.section = Some(section);
    }

    /// Union of every drive's channels.
    pub fn channels(&self) -> StyleChannels {
        self.drives
            .iter()
            .fold(StyleChannels::NONE, |acc, d| acc | d.channels())
    }

    /// Layer style for this frame.
    pub fn transform(&self, signals: &SignalSnapshot, section: Option<Rect>) -> Transform {
        self.drives
            .iter()
            .fold(Transform::IDENTITY, |acc, d| d.apply(acc, signals, section))
    }
}

// =============================================================================
// TESTS
// =============================================================================
