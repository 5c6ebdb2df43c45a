//! A single ambient particle and its motion as a pure function of time.
//!
//! A particle never stores its phase. Its state at clock time `t` is:
//!
//! ```text
//! p          = frac((t + phase_offset) / period)
//! offset(t)  = (drift_x * waveform(p), -rise * waveform(p))
//! opacity(t) = low + (high - low) * envelope(p)
//! ```
//!
//! With `waveform = envelope = [0, 1, 0]` the particle floats up, sways,
//! brightens, then settles back to where it started every period.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::motion::{Keyframes, LoopClock};
use crate::types::{Rgba, Vec2};

/// Immutable particle parameters, fixed at generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Particle {
    /// Diameter in pixels
    pub size: f64,
    /// Resting position in percent of the field, each axis in `[0, 100)`
    pub origin: Vec2,
    /// Peak displacement in pixels: `x` sways sideways, `y` rises
    pub amplitude: Vec2,
    /// Seconds per motion cycle
    pub period: f64,
    /// Seconds added to the clock so particles are out of sync
    pub phase_offset: f64,
    pub color: Rgba,
}

/// Shared shape of every particle's cycle in one field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParticleMotion {
    pub waveform: Keyframes,
    pub envelope: Keyframes,
    pub opacity_low: f64,
    pub opacity_high: f64,
    /// Opacity-only pulsing; no displacement
    pub stationary: bool,
}

impl ParticleMotion {
    pub fn new(opacity_low: f64, opacity_high: f64, stationary: bool) -> Self {
        Self {
            waveform: Keyframes::pulse(),
            envelope: Keyframes::pulse(),
            opacity_low,
            opacity_high,
            stationary,
        }
    }
}

/// What the render surface paints for one particle in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParticleVisual {
    /// Resting position in percent of the field
    pub origin: Vec2,
    /// Displacement from the origin in pixels
    pub offset: Vec2,
    pub size: f64,
    pub opacity: f64,
    pub color: Rgba,
}

impl Particle {
    /// Loop clock for this particle's cycle.
    #[inline]
    pub fn clock(&self) -> LoopClock {
        LoopClock::with_phase(self.period, self.phase_offset)
    }

    /// Cycle progress at `t`, in `[0, 1)`.
    #[inline]
    pub fn progress(&self, t: f64) -> f64 {
        self.clock().progress(t)
    }

    /// Pixel displacement from the origin at `t`.
    pub fn displacement(&self, t: f64, motion: &ParticleMotion) -> Vec2 {
        if motion.stationary {
            return Vec2::ZERO;
        }
        let w = motion.waveform.sample(self.progress(t));
        Vec2::new(self.amplitude.x * w, -self.amplitude.y * w)
    }

    /// Opacity at `t`, always within `[opacity_low, opacity_high]`.
    pub fn opacity(&self, t: f64, motion: &ParticleMotion) -> f64 {
        let (low, high) = ordered(motion.opacity_low, motion.opacity_high);
        let e = motion.envelope.sample(self.progress(t));
        (low + (high - low) * e).clamp(low, high)
    }

    pub fn visual(&self, t: f64, motion: &ParticleMotion) -> ParticleVisual {
        ParticleVisual {
            origin: self.origin,
            offset: self.displacement(t, motion),
            size: self.size,
            opacity: self.opacity(t, motion),
            color: self.color,
        }
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle() -> Particle {
        Particle {
            size: 2.0,
            origin: Vec2::new(40.0, 60.0),
            amplitude: Vec2::new(6.0, 30.0),
            period: 12.0,
            phase_offset: 1.5,
            color: Rgba::WHITE,
        }
    }

    #[test]
    fn test_displacement_is_periodic() {
        let p = particle();
        let motion = ParticleMotion::new(0.1, 0.5, false);
        for i in 0..100 {
            let t = i as f64 * 0.37;
            let a = p.displacement(t, &motion);
            let b = p.displacement(t + p.period, &motion);
            assert!((a.x - b.x).abs() < 1e-9);
            assert!((a.y - b.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_drifts_up_then_returns() {
        let p = Particle { phase_offset: 0.0, ..particle() };
        let motion = ParticleMotion::new(0.1, 0.5, false);
        assert_eq!(p.displacement(0.0, &motion), Vec2::ZERO);
        let peak = p.displacement(6.0, &motion);
        assert_eq!(peak, Vec2::new(6.0, -30.0));
        assert_eq!(p.opacity(0.0, &motion), 0.1);
        assert_eq!(p.opacity(6.0, &motion), 0.5);
    }

    #[test]
    fn test_opacity_bounded() {
        let p = particle();
        let motion = ParticleMotion::new(0.1, 0.5, false);
        for i in 0..500 {
            let o = p.opacity(i as f64 * 0.113, &motion);
            assert!((0.1..=0.5).contains(&o), "opacity {} out of range", o);
        }
    }

    #[test]
    fn test_stationary_never_moves() {
        let p = particle();
        let motion = ParticleMotion::new(0.1, 0.5, true);
        for i in 0..50 {
            let v = p.visual(i as f64, &motion);
            assert_eq!(v.offset, Vec2::ZERO);
            assert_eq!(v.origin, p.origin);
        }
    }

    #[test]
    fn test_inverted_opacity_range_is_ordered() {
        let p = particle();
        let motion = ParticleMotion::new(0.5, 0.1, false);
        let o = p.opacity(3.0, &motion);
        assert!((0.1..=0.5).contains(&o));
    }
}
