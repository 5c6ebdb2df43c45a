//! Keyframe tracks and looping clocks.
//!
//! A [`Keyframes`] track spaces its values evenly over `[0, 1]` progress and
//! eases each segment independently, so `[0, 1, 0]` with [`Easing::EaseInOut`]
//! rises and falls smoothly with zero slope at both ends. A [`LoopClock`]
//! turns clock time into repeating progress; together they describe any
//! `repeat: infinite` animation as a pure function of time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::easing::Easing;

// =============================================================================
// KEYFRAMES
// =============================================================================

/// Evenly spaced keyframe values with a per-segment easing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keyframes {
    values: Vec<f64>,
    easing: Easing,
}

impl Keyframes {
    pub fn new(values: Vec<f64>, easing: Easing) -> Self {
        Self { values, easing }
    }

    /// `[0, 1, 0]`, eased in and out: the rise-and-return shape.
    pub fn pulse() -> Self {
        Self::new(vec![0.0, 1.0, 0.0], Easing::EaseInOut)
    }

    /// Straight line from `from` to `to`.
    pub fn sweep(from: f64, to: f64) -> Self {
        Self::new(vec![from, to], Easing::Linear)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sample the track at `progress` (clamped to `[0, 1]`).
    ///
    /// An empty track samples as 0, a single keyframe as that value.
    pub fn sample(&self, progress: f64) -> f64 {
        match self.values.len() {
            0 => 0.0,
            1 => self.values[0],
            len => {
                let segments = (len - 1) as f64;
                let p = if progress.is_finite() { progress.clamp(0.0, 1.0) } else { 0.0 };
                let scaled = p * segments;
                let index = (scaled.floor() as usize).min(len - 2);
                let local = scaled - index as f64;

                let from = self.values[index];
                let to = self.values[index + 1];
                from + (to - from) * self.easing.apply(local)
            }
        }
    }
}

// =============================================================================
// LOOP CLOCK
// =============================================================================

/// Converts clock time into repeating `[0, 1)` progress.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoopClock {
    /// Seconds per cycle (always > 0)
    pub period: f64,
    /// Phase shift in seconds, added to the clock before wrapping
    pub phase: f64,
    /// Seconds before the loop starts moving; progress holds at 0 until then
    pub delay: f64,
}

impl LoopClock {
    /// Shortest period accepted; anything smaller is raised to this.
    pub const MIN_PERIOD: f64 = 1e-3;

    /// Loop with a phase shift: `progress(t) = frac((t + phase) / period)`.
    pub fn with_phase(period: f64, phase: f64) -> Self {
        Self {
            period: sanitize_period(period),
            phase: if phase.is_finite() { phase } else { 0.0 },
            delay: 0.0,
        }
    }

    /// Loop that waits `delay` seconds before starting.
    pub fn delayed(period: f64, delay: f64) -> Self {
        Self {
            period: sanitize_period(period),
            phase: 0.0,
            delay: if delay.is_finite() { delay.max(0.0) } else { 0.0 },
        }
    }

    /// Progress within the current cycle, in `[0, 1)`.
    pub fn progress(&self, t: f64) -> f64 {
        if !t.is_finite() || t < self.delay {
            return 0.0;
        }
        let cycle = (t - self.delay + self.phase) / self.period;
        let p = cycle.rem_euclid(1.0);
        // rem_euclid can round up to exactly 1.0 for tiny negative inputs
        if p >= 1.0 { 0.0 } else { p }
    }
}

fn sanitize_period(period: f64) -> f64 {
    if period.is_finite() {
        period.max(LoopClock::MIN_PERIOD)
    } else {
        LoopClock::MIN_PERIOD
    }
}

// =============================================================================
// TRACK
// =============================================================================

/// A keyframe track driven by a loop clock: an infinitely repeating animation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoopTrack {
    pub keyframes: Keyframes,
    pub clock: LoopClock,
}

impl LoopTrack {
    pub fn new(keyframes: Keyframes, clock: LoopClock) -> Self {
        Self { keyframes, clock }
    }

    /// Value at clock time `t`.
    pub fn value_at(&self, t: f64) -> f64 {
        self.keyframes.sample(self.clock.progress(t))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_shape() {
        let pulse = Keyframes::pulse();
        assert_eq!(pulse.sample(0.0), 0.0);
        assert_eq!(pulse.sample(0.5), 1.0);
        assert_eq!(pulse.sample(1.0), 0.0);
        assert_eq!(pulse.sample(0.25), 0.5);
        assert_eq!(pulse.sample(0.75), 0.5);
    }

    #[test]
    fn test_sweep_linear() {
        let sweep = Keyframes::sweep(-100.0, 100.0);
        assert_eq!(sweep.sample(0.0), -100.0);
        assert_eq!(sweep.sample(0.5), 0.0);
        assert_eq!(sweep.sample(1.0), 100.0);
    }

    #[test]
    fn test_degenerate_tracks() {
        assert_eq!(Keyframes::new(vec![], Easing::Linear).sample(0.3), 0.0);
        assert_eq!(Keyframes::new(vec![7.0], Easing::Linear).sample(0.3), 7.0);
    }

    #[test]
    fn test_loop_clock_wraps() {
        let clock = LoopClock::with_phase(10.0, 2.5);
        assert_eq!(clock.progress(0.0), 0.25);
        assert_eq!(clock.progress(7.5), 0.0);
        assert_eq!(clock.progress(10.0), 0.25);
        assert!(clock.progress(1.0e6) < 1.0);
    }

    #[test]
    fn test_loop_clock_delay_holds_start() {
        let clock = LoopClock::delayed(4.0, 2.0);
        assert_eq!(clock.progress(1.0), 0.0);
        assert_eq!(clock.progress(3.0), 0.25);
        assert_eq!(clock.progress(6.0), 0.0);
    }

    #[test]
    fn test_invalid_period_sanitized() {
        assert_eq!(LoopClock::with_phase(0.0, 0.0).period, LoopClock::MIN_PERIOD);
        assert_eq!(LoopClock::delayed(f64::NAN, -1.0).delay, 0.0);
    }

    #[test]
    fn test_track_is_periodic() {
        let track = LoopTrack::new(Keyframes::pulse(), LoopClock::with_phase(12.0, 3.0));
        for i in 0..50 {
            let t = i as f64 * 0.7;
            assert!((track.value_at(t) - track.value_at(t + 12.0)).abs() < 1e-9);
        }
    }
}
