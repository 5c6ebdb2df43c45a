//! Easing curves.
//!
//! Every curve has `apply(0) == 0` and `apply(1) == 1`, and inputs outside
//! `[0, 1]` are clamped first. The built-in curves stay within `[0, 1]`; a
//! [`Easing::CubicBezier`] with control points outside that band overshoots
//! in between (a "back" ease). The mappers clamp their output to the target
//! range, so overshoot never leaks out of them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timing curve for an interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic acceleration: `t²`
    EaseIn,
    /// Quadratic deceleration: `1 - (1 - t)²`
    EaseOut,
    /// Quadratic in, quadratic out
    EaseInOut,
    /// CSS-style cubic bezier with control points `(x1, y1)` and `(x2, y2)`
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// The fast-start, long-settle curve used for section reveals.
    pub const EXPO_OUT: Self = Self::CubicBezier(0.22, 1.0, 0.36, 1.0);

    /// Evaluate the curve at `t`.
    pub fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

// =============================================================================
// Cubic bezier
// =============================================================================

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_EPSILON: f64 = 1e-7;
const BISECTION_ITERATIONS: usize = 40;

/// One coordinate of a bezier through (0,0), (p1), (p2), (1,1).
#[inline]
fn bezier_axis(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

#[inline]
fn bezier_axis_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Solve `x(s) = t` for the curve parameter, then return `y(s)`.
///
/// Newton's method first; falls back to bisection when the slope flattens.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);

    let mut s = t;
    for _ in 0..NEWTON_ITERATIONS {
        let err = bezier_axis(x1, x2, s) - t;
        if err.abs() < NEWTON_EPSILON {
            return bezier_axis(y1, y2, s);
        }
        let slope = bezier_axis_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = t;
    for _ in 0..BISECTION_ITERATIONS {
        let x = bezier_axis(x1, x2, s);
        if (x - t).abs() < NEWTON_EPSILON {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    bezier_axis(y1, y2, s)
}
