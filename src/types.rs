//! Core types for reveal-motion.
//!
//! These types define the foundation that everything builds on.
//! They flow from the signal bus through the mappers and sequencers and
//! define what the render surface receives every frame.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Alpha 255 = fully opaque, 0 = fully transparent. Particle opacity is
/// carried separately in [`ParticleVisual`](crate::particles::ParticleVisual)
/// so the field color stays a plain palette value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create an opaque color from a packed `0xRRGGBB` integer.
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation between two colors.
    #[inline]
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;
        let mix = |x: u8, y: u8| ((x as f32 * inv_t) + (y as f32 * t)).round() as u8;

        Self {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
            a: mix(a.a, b.a),
        }
    }

    /// Parse a CSS hex color: `#RGB`, `#RRGGBB` or `#RRGGBBAA`, `#` optional.
    ///
    /// ```
    /// use reveal_motion::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#d97706"), Some(Rgba::from_rgb_int(0xd97706)));
    /// assert_eq!(Rgba::from_hex("fff"), Some(Rgba::WHITE));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            3 => {
                let v = u16::from_str_radix(digits, 16).ok()?;
                // 0xf -> 0xff
                let nibble = |shift: u16| ((v >> shift) & 0xf) as u8 * 0x11;
                Some(Self::rgb(nibble(8), nibble(4), nibble(0)))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// A 2D vector in pixels (or percent, for particle origins).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in document space (pixels, y grows downward).
///
/// Regions report their bounds relative to the top of the document, not the
/// viewport, so the same rect stays valid while the page scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when the rect has a usable, finite, non-negative size.
    pub fn is_laid_out(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Vertical overlap (in pixels) between this rect and the span `[top, bottom)`.
    pub fn vertical_overlap(&self, top: f64, bottom: f64) -> f64 {
        (self.bottom().min(bottom) - self.top().max(top)).max(0.0)
    }
}

// =============================================================================
// Pointer
// =============================================================================

/// Normalized pointer position, each axis in `[0, 1]`.
///
/// `(0.5, 0.5)` is the center of the viewport and the default when the
/// environment has not reported a position yet.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    /// Create a pointer, clamping both axes into `[0, 1]`.
    ///
    /// Non-finite axes fall back to the center.
    pub fn new(x: f64, y: f64) -> Self {
        let axis = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.5 };
        Self { x: axis(x), y: axis(y) }
    }

    /// Pointer position relative to an element, centered at 0.
    ///
    /// `raw_x`/`raw_y` are viewport pixels, `rect` is the element's
    /// viewport-space box. The element center maps to `(0, 0)`, its edges to
    /// `±0.5`. A zero-size element yields `(0, 0)`.
    pub fn relative_to(raw_x: f64, raw_y: f64, rect: Rect) -> Vec2 {
        if rect.width <= 0.0 || rect.height <= 0.0 || !rect.is_laid_out() {
            return Vec2::ZERO;
        }
        Vec2::new(
            (raw_x - rect.x) / rect.width - 0.5,
            (raw_y - rect.y) / rect.height - 0.5,
        )
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Self::CENTER
    }
}

// =============================================================================
// Style Channels (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Style channels an animated element drives.
    ///
    /// Combine with bitwise OR: `StyleChannels::OPACITY | StyleChannels::TRANSLATE_Y`.
    /// The render surface only needs to write the channels that are set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct StyleChannels: u8 {
        const NONE = 0;
        const TRANSLATE_X = 1 << 0;
        const TRANSLATE_Y = 1 << 1;
        const OPACITY = 1 << 2;
        const SCALE = 1 << 3;
        const TRANSLATE = Self::TRANSLATE_X.bits() | Self::TRANSLATE_Y.bits();
    }
}

// =============================================================================
// Transform - The outbound style value
// =============================================================================

/// Per-element style values for one frame.
///
/// This is what the render surface deals with. Nothing more complex.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl Transform {
    /// No displacement, fully visible, natural size.
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        opacity: 1.0,
        scale: 1.0,
    };

    /// Hidden, in place.
    pub const HIDDEN: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        opacity: 0.0,
        scale: 1.0,
    };

    pub const fn with_translate(self, x: f64, y: f64) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            ..self
        }
    }

    pub const fn with_opacity(self, opacity: f64) -> Self {
        Self { opacity, ..self }
    }

    pub const fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    /// Component-wise linear interpolation. `t` is clamped to `[0, 1]`.
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: f64, y: f64| x + (y - x) * t;
        Self {
            translate_x: mix(a.translate_x, b.translate_x),
            translate_y: mix(a.translate_y, b.translate_y),
            opacity: mix(a.opacity, b.opacity),
            scale: mix(a.scale, b.scale),
        }
    }

    /// Channels whose values differ between `self` and `other`.
    pub fn changed_channels(&self, other: &Self) -> StyleChannels {
        let mut channels = StyleChannels::NONE;
        if self.translate_x != other.translate_x {
            channels |= StyleChannels::TRANSLATE_X;
        }
        if self.translate_y != other.translate_y {
            channels |= StyleChannels::TRANSLATE_Y;
        }
        if self.opacity != other.opacity {
            channels |= StyleChannels::OPACITY;
        }
        if self.scale != other.scale {
            channels |= StyleChannels::SCALE;
        }
        channels
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_formats() {
        assert_eq!(Rgba::from_hex("#d97706"), Some(Rgba::rgb(0xd9, 0x77, 0x06)));
        assert_eq!(Rgba::from_hex("#ffffff"), Some(Rgba::WHITE));
        assert_eq!(Rgba::from_hex("000"), Some(Rgba::BLACK));
        assert_eq!(Rgba::from_hex("#ff000080"), Some(Rgba::new(255, 0, 0, 128)));
        assert!(Rgba::from_hex("#12345").is_none());
        assert!(Rgba::from_hex("zzz").is_none());
        assert!(Rgba::from_hex("+ff").is_none());
        assert!(Rgba::from_hex("").is_none());
    }

    #[test]
    fn test_from_rgb_int() {
        assert_eq!(Rgba::from_rgb_int(0xd97706), Rgba::rgb(0xd9, 0x77, 0x06));
    }

    #[test]
    fn test_rgba_lerp_endpoints() {
        assert_eq!(Rgba::lerp(Rgba::BLACK, Rgba::WHITE, 0.0), Rgba::BLACK);
        assert_eq!(Rgba::lerp(Rgba::BLACK, Rgba::WHITE, 1.0), Rgba::WHITE);
        assert_eq!(Rgba::lerp(Rgba::BLACK, Rgba::WHITE, 2.0), Rgba::WHITE);
    }

    #[test]
    fn test_pointer_clamps_and_defaults() {
        assert_eq!(Pointer::new(-1.0, 2.0), Pointer { x: 0.0, y: 1.0 });
        assert_eq!(Pointer::new(f64::NAN, 0.25), Pointer { x: 0.5, y: 0.25 });
        assert_eq!(Pointer::default(), Pointer::CENTER);
    }

    #[test]
    fn test_pointer_relative_to_element() {
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(Pointer::relative_to(200.0, 150.0, rect), Vec2::ZERO);
        assert_eq!(Pointer::relative_to(100.0, 100.0, rect), Vec2::new(-0.5, -0.5));
        assert_eq!(
            Pointer::relative_to(10.0, 10.0, Rect::new(0.0, 0.0, 0.0, 0.0)),
            Vec2::ZERO
        );
    }

    #[test]
    fn test_rect_overlap() {
        let rect = Rect::new(0.0, 100.0, 50.0, 200.0);
        assert_eq!(rect.vertical_overlap(0.0, 150.0), 50.0);
        assert_eq!(rect.vertical_overlap(400.0, 500.0), 0.0);
        assert_eq!(rect.vertical_overlap(0.0, 1000.0), 200.0);
    }

    #[test]
    fn test_transform_lerp_and_channels() {
        let from = Transform::HIDDEN.with_translate(0.0, 50.0);
        let to = Transform::IDENTITY;
        let mid = Transform::lerp(from, to, 0.5);
        assert_eq!(mid.translate_y, 25.0);
        assert_eq!(mid.opacity, 0.5);
        assert_eq!(Transform::lerp(from, to, 1.5), to);

        let channels = from.changed_channels(&to);
        assert!(channels.contains(StyleChannels::TRANSLATE_Y | StyleChannels::OPACITY));
        assert!(!channels.contains(StyleChannels::SCALE));
    }
}
