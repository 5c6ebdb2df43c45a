//! Reveal Sequencer - `Idle -> Playing -> Settled` per region.
//!
//! The sequencer never schedules anything. It stores the trigger timestamp
//! and derives every child's style from elapsed time on demand, so
//! cancelling is just forgetting the timestamp.
//!
//! # Example
//!
//! ```ignore
//! use reveal_motion::reveal::{ChildSpec, RevealSequencer, SequenceState, Timeline};
//!
//! let timeline = Timeline::new(0.2).children(ChildSpec::fade_in_left(50.0), 4);
//! let mut sequencer = RevealSequencer::new(timeline);
//!
//! // Region entered view at t = 3.0
//! sequencer.on_transition(Transition::Entered, 3.0);
//!
//! // Every frame
//! sequencer.advance(now);
//! let styles = sequencer.transforms(now);
//! ```

use tracing::debug;

use super::timeline::{Timeline, SETTLE_EPSILON};
use crate::types::Transform;
use crate::viewport::Transition;

/// Lifecycle of one reveal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceState {
    /// Not triggered; every child shows its base style
    #[default]
    Idle,
    /// Triggered; children are inside or waiting for their windows
    Playing,
    /// Every child has reached its target style
    Settled,
}

/// Plays a [`Timeline`] once per trigger.
#[derive(Debug, Clone)]
pub struct RevealSequencer {
    timeline: Timeline,
    state: SequenceState,
    trigger_time: Option<f64>,
    instance: u64,
    reached: Vec<bool>,
    completions: u64,
}

impl RevealSequencer {
    pub fn new(timeline: Timeline) -> Self {
        let len = timeline.len();
        Self {
            timeline,
            state: SequenceState::Idle,
            trigger_time: None,
            instance: 0,
            reached: vec![false; len],
            completions: 0,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// Trigger timestamp of the current instance.
    pub fn trigger_time(&self) -> Option<f64> {
        self.trigger_time
    }

    /// Number of instances started so far.
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// Total child completions across all instances.
    pub fn completions(&self) -> u64 {
        self.completions
    }

    // -------------------------------------------------------------------------
    // Control
    // -------------------------------------------------------------------------

    /// Start a fresh instance at `now`, replacing any instance in flight.
    pub fn trigger(&mut self, now: f64) {
        if self.state == SequenceState::Playing {
            debug!(instance = self.instance, "reveal interrupted by re-trigger");
        }
        self.instance += 1;
        self.trigger_time = Some(now);
        self.reached.iter_mut().for_each(|r| *r = false);
        self.state = SequenceState::Playing;
        debug!(instance = self.instance, at = now, children = self.timeline.len(), "reveal started");
        self.advance(now);
    }

    /// Drop the current instance and return to `Idle`.
    pub fn cancel(&mut self) {
        if self.state != SequenceState::Idle {
            debug!(instance = self.instance, state = ?self.state, "reveal cancelled");
        }
        self.state = SequenceState::Idle;
        self.trigger_time = None;
        self.reached.iter_mut().for_each(|r| *r = false);
    }

    /// React to the region's `in_view` transition.
    ///
    /// `Entered` starts a fresh instance; `Exited` snaps back to `Idle` so the
    /// next entry replays from the hidden state.
    pub fn on_transition(&mut self, transition: Transition, now: f64) {
        match transition {
            Transition::Entered => self.trigger(now),
            Transition::Exited => self.cancel(),
        }
    }

    /// Advance bookkeeping to `now` and return the resulting state.
    pub fn advance(&mut self, now: f64) -> SequenceState {
        if self.state != SequenceState::Playing {
            return self.state;
        }
        let Some(trigger) = self.trigger_time else {
            return self.state;
        };
        let elapsed = now - trigger;

        for index in 0..self.timeline.len() {
            if self.reached[index] {
                continue;
            }
            if let Some((_, end)) = self.timeline.child_window(index) {
                if elapsed >= end - SETTLE_EPSILON {
                    self.reached[index] = true;
                    self.completions += 1;
                }
            }
        }

        if self.reached.iter().all(|&r| r) {
            self.state = SequenceState::Settled;
            debug!(instance = self.instance, at = now, "reveal settled");
        }
        self.state
    }

    // -------------------------------------------------------------------------
    // Outbound styles
    // -------------------------------------------------------------------------

    /// Style of child `index` at `now`. Out-of-range indices yield identity.
    pub fn child_transform(&self, index: usize, now: f64) -> Transform {
        let Some(spec) = self.timeline.spec(index) else {
            return Transform::IDENTITY;
        };
        match (self.state, self.trigger_time) {
            (SequenceState::Settled, _) => spec.target,
            (SequenceState::Playing, Some(trigger)) => {
                if self.reached[index] {
                    return spec.target;
                }
                let (start, _) = self.timeline.child_window(index).unwrap_or((0.0, 0.0));
                spec.transform_at(now - trigger - start)
            }
            _ => spec.base,
        }
    }

    /// Style of every child at `now`, in timeline order.
    pub fn transforms(&self, now: f64) -> Vec<Transform> {
        (0..self.timeline.len())
            .map(|i| self.child_transform(i, now))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
