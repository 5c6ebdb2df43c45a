//! Reveal timelines - what each child animates, and when.
//!
//! A [`Timeline`] is plain data: an ordered list of [`ChildSpec`]s and a
//! stagger interval. Child `i` starts at `i * stagger + delay` seconds after
//! the trigger and runs for `duration` seconds.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, Result};
use crate::motion::Easing;
use crate::types::{StyleChannels, Transform};

/// Windows closer than this to their end count as finished.
pub const SETTLE_EPSILON: f64 = 1e-9;

/// Default reveal duration in seconds.
pub const DEFAULT_DURATION: f64 = 0.8;

/// Default stagger between siblings in seconds.
pub const DEFAULT_STAGGER: f64 = 0.2;

// =============================================================================
// CHILD SPEC
// =============================================================================

/// One child of a reveal: base and target styles plus timing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChildSpec {
    /// Style before the child's window opens (the hidden state)
    pub base: Transform,
    /// Style after the window closes
    pub target: Transform,
    /// Extra delay on top of the stagger offset, in seconds
    pub delay: f64,
    /// Window length in seconds
    pub duration: f64,
    pub easing: Easing,
}

impl ChildSpec {
    pub fn new(base: Transform, target: Transform) -> Self {
        Self {
            base,
            target,
            delay: 0.0,
            duration: DEFAULT_DURATION,
            easing: Easing::EXPO_OUT,
        }
    }

    /// Fade in while rising `distance` pixels into place.
    pub fn fade_in_up(distance: f64) -> Self {
        Self::new(Transform::HIDDEN.with_translate(0.0, distance), Transform::IDENTITY)
    }

    /// Fade in while sliding `distance` pixels in from the left.
    pub fn fade_in_left(distance: f64) -> Self {
        Self::new(Transform::HIDDEN.with_translate(-distance, 0.0), Transform::IDENTITY)
    }

    /// Opacity-only fade.
    pub fn fade_in() -> Self {
        Self::new(Transform::HIDDEN, Transform::IDENTITY)
    }

    /// Fade in while growing from `from_scale` to natural size.
    pub fn zoom_in(from_scale: f64) -> Self {
        Self::new(Transform::HIDDEN.with_scale(from_scale), Transform::IDENTITY)
    }

    /// Channels that differ between the base and target styles.
    pub fn channels(&self) -> StyleChannels {
        self.base.changed_channels(&self.target)
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Style at `local` seconds after this child's window opened.
    pub fn transform_at(&self, local: f64) -> Transform {
        if !(local >= 0.0) {
            return self.base;
        }
        if self.duration <= 0.0 || local >= self.duration - SETTLE_EPSILON {
            return self.target;
        }
        let eased = self.easing.apply(local / self.duration);
        Transform::lerp(self.base, self.target, eased)
    }
}

// =============================================================================
// TIMELINE
// =============================================================================

/// Ordered children sharing one trigger timestamp.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timeline {
    stagger: f64,
    children: Vec<ChildSpec>,
}

impl Timeline {
    pub fn new(stagger: f64) -> Self {
        Self {
            stagger,
            children: Vec::new(),
        }
    }

    /// Append a child.
    pub fn child(mut self, spec: ChildSpec) -> Self {
        self.children.push(spec);
        self
    }

    /// Append `count` copies of `spec`.
    pub fn children(mut self, spec: ChildSpec, count: usize) -> Self {
        self.children.extend(std::iter::repeat_n(spec, count));
        self
    }

    pub fn stagger(&self) -> f64 {
        self.stagger
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn spec(&self, index: usize) -> Option<&ChildSpec> {
        self.children.get(index)
    }

    pub fn specs(&self) -> &[ChildSpec] {
        &self.children
    }

    /// `(start, end)` of child `index`, in seconds after the trigger.
    pub fn child_window(&self, index: usize) -> Option<(f64, f64)> {
        let spec = self.children.get(index)?;
        let start = index as f64 * self.stagger.max(0.0) + spec.delay.max(0.0);
        Some((start, start + spec.duration.max(0.0)))
    }

    /// Time from trigger until the last child finishes.
    pub fn total_duration(&self) -> f64 {
        (0..self.children.len())
            .filter_map(|i| self.child_window(i))
            .map(|(_, end)| end)
            .fold(0.0, f64::max)
    }

    /// Union of the channels any child animates.
    pub fn channels(&self) -> StyleChannels {
        self.children
            .iter()
            .fold(StyleChannels::NONE, |acc, spec| acc | spec.channels())
    }

    /// Validate timing values.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("stagger", self.stagger)?;
        for spec in &self.children {
            check_non_negative("delay", spec.delay)?;
            check_non_negative("duration", spec.duration)?;
        }
        Ok(())
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(DEFAULT_STAGGER)
    }
}

// =============================================================================
// TESTS
// =============================================================================
