//! Transform Mapper - Pure signal-to-style functions.
//!
//! Every function here is a function of its explicit arguments only.
//! Calling one twice with the same inputs gives the same output.
//!
//! - `map` - clamped, eased remap from a domain to a range
//! - `map_stops` - the same across several domain/range stops
//! - `parallax_offset` / `section_parallax` - scroll-driven drift
//! - `pointer_offset` - pointer-driven drift, zero at the viewport center
//! - `progress_to` / `scroll_progress` / `scroll_scale` - scroll progress effects

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::easing::Easing;
use crate::types::{Pointer, Rect, Vec2};

// =============================================================================
// GENERIC MAP
// =============================================================================

/// Remap `value` from `domain` to `range` through `easing`.
///
/// Values outside the domain clamp to the range ends. A degenerate domain
/// (`lo == hi`) acts as a step at `lo`. Non-finite values map to the range
/// start. The result never leaves the range, even for an overshooting curve.
pub fn map(value: f64, domain: (f64, f64), range: (f64, f64), easing: Easing) -> f64 {
    let (lo, hi) = domain;
    let (out_start, out_end) = range;

    let t = if !value.is_finite() {
        0.0
    } else if lo == hi {
        if value < lo { 0.0 } else { 1.0 }
    } else {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    };

    let eased = easing.apply(t);
    if eased == 0.0 {
        return out_start;
    }
    if eased == 1.0 {
        return out_end;
    }
    let mapped = out_start + (out_end - out_start) * eased;
    mapped
        .max(out_start.min(out_end))
        .min(out_start.max(out_end))
}

/// Piecewise [`map`] across matching `domain` and `range` stops.
///
/// `domain` must be non-decreasing. `map_stops(p, &[0.0, 0.2, 0.9, 1.0],
/// &[0.0, 1.0, 1.0, 0.0], ..)` fades in, holds, then fades out. Values before
/// the first stop or after the last clamp to the end values. Extra stops on
/// the longer slice are ignored; no stops at all yields 0.
pub fn map_stops(value: f64, domain: &[f64], range: &[f64], easing: Easing) -> f64 {
    let len = domain.len().min(range.len());
    if len == 0 {
        return 0.0;
    }
    if len == 1 || !value.is_finite() || value <= domain[0] {
        return range[0];
    }
    if value >= domain[len - 1] {
        return range[len - 1];
    }
    let i = domain[..len]
        .windows(2)
        .position(|w| value < w[1])
        .unwrap_or(len - 2);
    map(value, (domain[i], domain[i + 1]), (range[i], range[i + 1]), easing)
}

/// Map a `[0, 1]` progress value onto `range`. Progress outside `[0, 1]` clamps.
pub fn progress_to(progress: f64, range: (f64, f64), easing: Easing) -> f64 {
    map(progress, (0.0, 1.0), range, easing)
}

// =============================================================================
// PARALLAX
// =============================================================================

/// Scroll parallax: `scroll * factor`.
///
/// Linear for every finite offset, including negative overscroll; a negative
/// factor drifts the opposite way. Non-finite scroll yields 0.
#[inline]
pub fn parallax_offset(scroll: f64, factor: f64) -> f64 {
    if !scroll.is_finite() {
        return 0.0;
    }
    scroll * factor
}

/// Parallax measured from a section's own top edge.
///
/// `(scroll - section_top - bias) * factor`: zero when the page has scrolled
/// to `section_top + bias`. Sections use `bias` to stagger the neutral point
/// of nested layers.
#[inline]
pub fn section_parallax(scroll: f64, section_top: f64, bias: f64, factor: f64) -> f64 {
    parallax_offset(scroll - section_top - bias, factor)
}

/// Pointer parallax centered at 0.
///
/// Each axis is remapped from `[0, 1]` to `[-0.5, 0.5]` before multiplying
/// by `strength`, so the viewport center yields exactly `(0, 0)`.
pub fn pointer_offset(pointer: Pointer, strength: f64) -> Vec2 {
    let pointer = Pointer::new(pointer.x, pointer.y);
    Vec2::new((pointer.x - 0.5) * strength, (pointer.y - 0.5) * strength)
}

// =============================================================================
// SCROLL PROGRESS
// =============================================================================

/// Which edges define the start and end of an element's scroll progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScrollOffsets {
    /// 0 when the element top meets the viewport top,
    /// 1 when the element bottom meets the viewport top.
    #[default]
    StartStartEndStart,
    /// 0 when the element top meets the viewport bottom,
    /// 1 when the element bottom meets the viewport top.
    StartEndEndStart,
}

/// Scroll progress of `rect` (document space) through the viewport, in `[0, 1]`.
///
/// Missing or zero-length tracks report 0 before the start and 1 after.
pub fn scroll_progress(
    scroll: f64,
    viewport_height: f64,
    rect: Rect,
    offsets: ScrollOffsets,
) -> f64 {
    if !scroll.is_finite() || !rect.is_laid_out() {
        return 0.0;
    }
    let viewport_height = if viewport_height.is_finite() {
        viewport_height.max(0.0)
    } else {
        0.0
    };

    let (start, end) = match offsets {
        ScrollOffsets::StartStartEndStart => (rect.top(), rect.bottom()),
        ScrollOffsets::StartEndEndStart => (rect.top() - viewport_height, rect.bottom()),
    };
    map(scroll, (start, end), (0.0, 1.0), Easing::Linear)
}

/// Zoom driven by scroll: `1 + scroll * rate`, with overscroll clamped to 0.
#[inline]
pub fn scroll_scale(scroll: f64, rate: f64) -> f64 {
    let scroll = if scroll.is_finite() { scroll.max(0.0) } else { 0.0 };
    1.0 + scroll * rate
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallax_is_linear() {
        assert_eq!(parallax_offset(0.0, 0.1), 0.0);
        assert_eq!(parallax_offset(400.0, 0.05), 400.0 * 0.05);
        assert_eq!(parallax_offset(-30.0, 0.2), -30.0 * 0.2);
        assert_eq!(parallax_offset(f64::NAN, 0.2), 0.0);
    }

    #[test]
    fn test_parallax_monotone_for_positive_factor() {
        let mut prev = parallax_offset(-1000.0, 0.15);
        for s in -999..=5000 {
            let v = parallax_offset(s as f64, 0.15);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_parallax_sign_flip_reverses_drift() {
        let down = parallax_offset(300.0, 0.1);
        let up = parallax_offset(300.0, -0.1);
        assert_eq!(down, -up);
    }

    #[test]
    fn test_section_parallax_neutral_point() {
        assert_eq!(section_parallax(1500.0, 1200.0, 300.0, -0.05), 0.0);
        assert_eq!(section_parallax(1200.0, 1000.0, 0.0, 0.1), 200.0 * 0.1);
    }

    #[test]
    fn test_pointer_offset_center_is_zero() {
        assert_eq!(pointer_offset(Pointer::CENTER, 20.0), Vec2::ZERO);
        assert_eq!(pointer_offset(Pointer::CENTER, -30.0), Vec2::ZERO);
    }

    #[test]
    fn test_pointer_offset_edges() {
        assert_eq!(pointer_offset(Pointer::new(0.0, 1.0), 20.0), Vec2::new(-10.0, 10.0));
        // Out-of-range components clamp
        let wild = Pointer { x: 4.0, y: -2.0 };
        assert_eq!(pointer_offset(wild, 20.0), Vec2::new(10.0, -10.0));
    }

    #[test]
    fn test_map_clamps_instead_of_extrapolating() {
        assert_eq!(map(-0.5, (0.0, 1.0), (0.0, 100.0), Easing::Linear), 0.0);
        assert_eq!(map(1.5, (0.0, 1.0), (0.0, 100.0), Easing::Linear), 100.0);
        assert_eq!(map(0.4, (0.0, 0.8), (1.0, 0.0), Easing::Linear), 0.5);
        assert_eq!(map(5.0, (2.0, 2.0), (10.0, 20.0), Easing::Linear), 20.0);
        assert_eq!(map(1.0, (2.0, 2.0), (10.0, 20.0), Easing::Linear), 10.0);
    }

    #[test]
    fn test_map_clamps_overshooting_curve() {
        let back_out = Easing::CubicBezier(0.34, 1.56, 0.64, 1.0);
        assert!(back_out.apply(0.6) > 1.0);
        for i in 0..=100 {
            let t = i as f64 / 100.0;
            let v = map(t, (0.0, 1.0), (0.0, 100.0), back_out);
            assert!((0.0..=100.0).contains(&v), "map({}) = {}", t, v);
            let p = progress_to(t, (0.8, 1.2), back_out);
            assert!((0.8..=1.2).contains(&p), "progress_to({}) = {}", t, p);
            let r = map(t, (0.0, 1.0), (1.0, 0.0), back_out);
            assert!((0.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn test_map_stops_fade_in_hold_out() {
        let domain = [0.0, 0.2, 0.9, 1.0];
        let opacity = [0.0, 1.0, 1.0, 0.0];
        let at = |p: f64| map_stops(p, &domain, &opacity, Easing::Linear);
        assert_eq!(at(-0.5), 0.0);
        assert_eq!(at(0.0), 0.0);
        assert_eq!(at(0.1), 0.5);
        assert_eq!(at(0.2), 1.0);
        assert_eq!(at(0.5), 1.0);
        assert!((at(0.95) - 0.5).abs() < 1e-9);
        assert_eq!(at(1.0), 0.0);
        assert_eq!(at(3.0), 0.0);
        assert_eq!(at(f64::NAN), 0.0);
    }

    #[test]
    fn test_map_stops_degenerate_inputs() {
        assert_eq!(map_stops(0.5, &[], &[], Easing::Linear), 0.0);
        assert_eq!(map_stops(0.5, &[0.0], &[7.0], Easing::Linear), 7.0);
        // Two stops behave like map
        assert_eq!(
            map_stops(0.4, &[0.0, 0.8], &[1.0, 0.0], Easing::Linear),
            map(0.4, (0.0, 0.8), (1.0, 0.0), Easing::Linear)
        );
        // Mismatched lengths use the common prefix
        assert_eq!(map_stops(2.0, &[0.0, 1.0, 2.0], &[0.0, 10.0], Easing::Linear), 10.0);
    }

    #[test]
    fn test_map_is_idempotent() {
        for easing in [Easing::Linear, Easing::EaseInOut, Easing::EXPO_OUT] {
            let a = map(0.37, (0.0, 1.0), (-40.0, 90.0), easing);
            let b = map(0.37, (0.0, 1.0), (-40.0, 90.0), easing);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_progress_to_opacity_and_scale() {
        assert_eq!(progress_to(0.5, (0.0, 1.0), Easing::Linear), 0.5);
        assert_eq!(progress_to(2.0, (0.8, 1.2), Easing::Linear), 1.2);
        assert_eq!(progress_to(-1.0, (0.8, 1.2), Easing::Linear), 0.8);
    }

    #[test]
    fn test_scroll_progress_start_start() {
        let hero = Rect::new(0.0, 0.0, 1280.0, 800.0);
        let offsets = ScrollOffsets::StartStartEndStart;
        assert_eq!(scroll_progress(0.0, 720.0, hero, offsets), 0.0);
        assert_eq!(scroll_progress(400.0, 720.0, hero, offsets), 0.5);
        assert_eq!(scroll_progress(2000.0, 720.0, hero, offsets), 1.0);
        assert_eq!(scroll_progress(-50.0, 720.0, hero, offsets), 0.0);
    }

    #[test]
    fn test_scroll_progress_start_end() {
        let section = Rect::new(0.0, 2000.0, 1280.0, 600.0);
        let offsets = ScrollOffsets::StartEndEndStart;
        // Top meets viewport bottom at scroll 1400, bottom meets top at 2600
        assert_eq!(scroll_progress(1400.0, 600.0, section, offsets), 0.0);
        assert_eq!(scroll_progress(2000.0, 600.0, section, offsets), 0.5);
        assert_eq!(scroll_progress(2600.0, 600.0, section, offsets), 1.0);
    }

    #[test]
    fn test_scroll_scale_clamps_overscroll() {
        assert_eq!(scroll_scale(0.0, 0.0005), 1.0);
        assert_eq!(scroll_scale(-200.0, 0.0005), 1.0);
        assert_eq!(scroll_scale(1000.0, 0.0005), 1.5);
    }
}
