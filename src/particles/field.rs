//! Particle Field - `Created -> Running -> Disposed`.
//!
//! A field synthesizes its whole population once, at creation, from a
//! [`RandomSource`]. Particles are never added or removed individually;
//! disposal drops them all together and the field stops producing frames.
//!
//! # Example
//!
//! ```ignore
//! use reveal_motion::particles::{ParticleField, ParticleFieldConfig, SeededRandom};
//!
//! let config = ParticleFieldConfig { quantity: 100, ..Default::default() };
//! let mut field = ParticleField::new(config, &mut SeededRandom::new(7))?;
//! field.start(clock);
//!
//! // Every frame
//! if let Some(visuals) = field.frame(clock) {
//!     // paint
//! }
//!
//! field.dispose();
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::particle::{Particle, ParticleMotion, ParticleVisual};
use super::random::{RandomSource, SeededRandom, ThreadRandom};
use crate::error::{check_non_negative, check_range, check_unit, MotionError, Result};
use crate::types::{Rgba, Vec2};

// =============================================================================
// CONFIG
// =============================================================================

/// Field configuration. Ranges are half-open `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParticleFieldConfig {
    /// Number of particles
    pub quantity: usize,
    pub color: Rgba,
    /// Opacity-only pulsing instead of drifting
    pub stationary: bool,
    /// Particle diameter in pixels
    pub size_range: (f64, f64),
    /// Motion cycle length in seconds (stationary fields pulse at half this)
    pub period_range: (f64, f64),
    /// Phase offset in seconds
    pub phase_range: (f64, f64),
    /// How far particles float up, in pixels
    pub rise: f64,
    /// Sideways sway amplitude in pixels
    pub lateral_range: (f64, f64),
    pub opacity_low: f64,
    pub opacity_high: f64,
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            quantity: 50,
            color: Rgba::WHITE,
            stationary: false,
            size_range: (1.0, 4.0),
            period_range: (10.0, 30.0),
            phase_range: (0.0, 5.0),
            rise: 30.0,
            lateral_range: (-10.0, 10.0),
            opacity_low: 0.1,
            opacity_high: 0.5,
        }
    }
}

impl ParticleFieldConfig {
    /// Drifting field of `quantity` particles in `color`.
    pub fn drifting(quantity: usize, color: Rgba) -> Self {
        Self {
            quantity,
            color,
            ..Self::default()
        }
    }

    /// Opacity-only field of `quantity` particles in `color`.
    pub fn stationary(quantity: usize, color: Rgba) -> Self {
        Self {
            quantity,
            color,
            stationary: true,
            ..Self::default()
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.quantity == 0 {
            return Err(MotionError::EmptyField);
        }
        check_range("size_range", self.size_range)?;
        check_non_negative("size_range", self.size_range.0)?;
        check_range("period_range", self.period_range)?;
        if self.period_range.0 <= 0.0 {
            return Err(MotionError::Negative {
                field: "period_range",
                value: self.period_range.0,
            });
        }
        check_range("phase_range", self.phase_range)?;
        check_non_negative("rise", self.rise)?;
        check_range("lateral_range", self.lateral_range)?;
        check_unit("opacity_low", self.opacity_low)?;
        check_unit("opacity_high", self.opacity_high)?;
        if self.opacity_low > self.opacity_high {
            return Err(MotionError::InvertedRange {
                field: "opacity",
                min: self.opacity_low,
                max: self.opacity_high,
            });
        }
        Ok(())
    }

    /// Draw one particle. Consumes exactly six values from `rng`.
    fn generate(&self, rng: &mut dyn RandomSource) -> Particle {
        let size = rng.range(self.size_range.0, self.size_range.1);
        let origin = Vec2::new(rng.range(0.0, 100.0), rng.range(0.0, 100.0));
        let duration = rng.range(self.period_range.0, self.period_range.1);
        let phase_offset = rng.range(self.phase_range.0, self.phase_range.1);
        let lateral = rng.range(self.lateral_range.0, self.lateral_range.1);

        let (amplitude, period) = if self.stationary {
            (Vec2::ZERO, duration / 2.0)
        } else {
            (Vec2::new(lateral, self.rise), duration)
        };

        Particle {
            size,
            origin,
            amplitude,
            period,
            phase_offset,
            color: self.color,
        }
    }
}

// =============================================================================
// FIELD
// =============================================================================

/// Lifecycle of a particle field. There is no pause state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Created,
    Running,
    Disposed,
}

/// A fixed population of particles animated as one unit.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: ParticleFieldConfig,
    particles: Vec<Particle>,
    motion: ParticleMotion,
    state: FieldState,
    started_at: f64,
    updates: u64,
}

impl ParticleField {
    /// Generate a field from `rng`.
    pub fn new(config: ParticleFieldConfig, rng: &mut dyn RandomSource) -> Result<Self> {
        config.validate()?;

        let particles: Vec<Particle> = (0..config.quantity).map(|_| config.generate(rng)).collect();
        let motion = ParticleMotion::new(config.opacity_low, config.opacity_high, config.stationary);

        debug!(
            quantity = particles.len(),
            stationary = config.stationary,
            "particle field created"
        );

        Ok(Self {
            config,
            particles,
            motion,
            state: FieldState::Created,
            started_at: 0.0,
            updates: 0,
        })
    }

    /// Generate an unseeded field; every call differs.
    pub fn random(config: ParticleFieldConfig) -> Result<Self> {
        Self::new(config, &mut ThreadRandom::new())
    }

    /// Generate a deterministic field from `seed`.
    pub fn with_seed(config: ParticleFieldConfig, seed: u64) -> Result<Self> {
        Self::new(config, &mut SeededRandom::new(seed))
    }

    pub fn config(&self) -> &ParticleFieldConfig {
        &self.config
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn motion(&self) -> &ParticleMotion {
        &self.motion
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Frames produced so far.
    pub fn updates_issued(&self) -> u64 {
        self.updates
    }

    /// `Created -> Running`. Particle time starts at `now`.
    ///
    /// Starting a running or disposed field does nothing.
    pub fn start(&mut self, now: f64) {
        if self.state != FieldState::Created {
            return;
        }
        self.started_at = if now.is_finite() { now } else { 0.0 };
        self.state = FieldState::Running;
        debug!(at = self.started_at, "particle field running");
    }

    /// Visual state of every particle at `now`.
    ///
    /// `None` unless the field is running.
    pub fn frame(&mut self, now: f64) -> Option<Vec<ParticleVisual>> {
        if self.state != FieldState::Running {
            return None;
        }
        let t = now - self.started_at;
        self.updates += 1;
        Some(self.particles.iter().map(|p| p.visual(t, &self.motion)).collect())
    }

    /// Stop every particle loop and release the population. Idempotent.
    pub fn dispose(&mut self) {
        if self.state == FieldState::Disposed {
            return;
        }
        let released = self.particles.len();
        self.particles.clear();
        self.particles.shrink_to_fit();
        self.state = FieldState::Disposed;
        debug!(released, updates = self.updates, "particle field disposed");
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::ScriptedRandom;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_population_matches_quantity() {
        let field = ParticleField::with_seed(ParticleFieldConfig::default(), 1).unwrap();
        assert_eq!(field.len(), 50);
        assert_eq!(field.state(), FieldState::Created);
    }

    #[test]
    fn test_particles_within_ranges() {
        let config = ParticleFieldConfig::drifting(200, Rgba::WHITE);
        let field = ParticleField::with_seed(config, 99).unwrap();
        for p in field.particles() {
            assert!((1.0..4.0).contains(&p.size));
            assert!((0.0..100.0).contains(&p.origin.x));
            assert!((0.0..100.0).contains(&p.origin.y));
            assert!((10.0..30.0).contains(&p.period));
            assert!((0.0..5.0).contains(&p.phase_offset));
            assert!((-10.0..10.0).contains(&p.amplitude.x));
            assert_eq!(p.amplitude.y, 30.0);
        }
    }

    #[test]
    fn test_scripted_generation() {
        let config = ParticleFieldConfig::drifting(1, Rgba::WHITE);
        // size, x, y, duration, phase, lateral
        let mut rng = ScriptedRandom::new(vec![0.5, 0.25, 0.75, 0.5, 0.2, 0.0]);
        let field = ParticleField::new(config, &mut rng).unwrap();
        let p = field.particles()[0];
        assert_eq!(p.size, 2.5);
        assert_eq!(p.origin, Vec2::new(25.0, 75.0));
        assert_eq!(p.period, 20.0);
        assert_eq!(p.phase_offset, 1.0);
        assert_eq!(p.amplitude, Vec2::new(-10.0, 30.0));
    }

    #[test]
    fn test_stationary_halves_period() {
        let config = ParticleFieldConfig::stationary(1, Rgba::WHITE);
        let mut rng = ScriptedRandom::new(vec![0.5, 0.25, 0.75, 0.5, 0.2, 0.0]);
        let field = ParticleField::new(config, &mut rng).unwrap();
        let p = field.particles()[0];
        assert_eq!(p.period, 10.0);
        assert_eq!(p.amplitude, Vec2::ZERO);
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = ParticleField::with_seed(ParticleFieldConfig::default(), 5).unwrap();
        let b = ParticleField::with_seed(ParticleFieldConfig::default(), 5).unwrap();
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_unseeded_fields_differ() {
        let a = ParticleField::random(ParticleFieldConfig::default()).unwrap();
        let b = ParticleField::random(ParticleFieldConfig::default()).unwrap();
        assert_ne!(a.particles(), b.particles());
    }

    #[test]
    fn test_lifecycle() {
        let mut field = ParticleField::with_seed(ParticleFieldConfig::default(), 3).unwrap();
        assert!(field.frame(0.0).is_none());

        field.start(2.0);
        assert_eq!(field.state(), FieldState::Running);
        assert_eq!(field.frame(2.5).map(|v| v.len()), Some(50));
        assert_eq!(field.updates_issued(), 1);

        field.dispose();
        assert_eq!(field.state(), FieldState::Disposed);
        assert!(field.is_empty());
        assert!(field.frame(3.0).is_none());
        assert_eq!(field.updates_issued(), 1);

        // No resurrection
        field.start(4.0);
        assert_eq!(field.state(), FieldState::Disposed);
        field.dispose();
    }

    #[test]
    fn test_frames_periodic_and_bounded() {
        let mut field = ParticleField::with_seed(ParticleFieldConfig::default(), 11).unwrap();
        field.start(0.0);
        let periods: Vec<f64> = field.particles().iter().map(|p| p.period).collect();
        let motion = field.motion().clone();

        for (p, period) in field.particles().iter().zip(&periods) {
            for i in 0..40 {
                let t = i as f64 * 0.9;
                let a = p.visual(t, &motion);
                let b = p.visual(t + period, &motion);
                assert!(close(a.offset.x, b.offset.x));
                assert!(close(a.offset.y, b.offset.y));
                assert!(close(a.opacity, b.opacity));
                assert!((0.1..=0.5).contains(&a.opacity));
            }
        }
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let empty = ParticleFieldConfig { quantity: 0, ..Default::default() };
        assert_eq!(empty.validate(), Err(MotionError::EmptyField));

        let zero_period = ParticleFieldConfig { period_range: (0.0, 10.0), ..Default::default() };
        assert!(zero_period.validate().is_err());

        let inverted = ParticleFieldConfig { opacity_low: 0.8, opacity_high: 0.2, ..Default::default() };
        assert!(matches!(inverted.validate(), Err(MotionError::InvertedRange { .. })));

        assert!(ParticleField::with_seed(empty, 1).is_err());
    }
}
