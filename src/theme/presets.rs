//! Built-in section themes: amber (the default) and burgundy.

use super::SectionTheme;
use crate::types::Rgba;

// =============================================================================
// Amber Theme (Default)
// =============================================================================

/// Amber on black.
pub fn amber() -> SectionTheme {
    SectionTheme {
        name: "amber".to_string(),
        particle: Rgba::from_rgb_int(0xd97706),
        accent: Rgba::from_rgb_int(0xf59e0b),
        line: Rgba::from_rgb_int(0xd97706).with_alpha(26), // 10%
    }
}

// =============================================================================
// Burgundy Theme
// =============================================================================

/// Burgundy with gold highlights.
pub fn burgundy() -> SectionTheme {
    SectionTheme {
        name: "burgundy".to_string(),
        particle: Rgba::rgb(237, 168, 185),
        accent: Rgba::rgb(229, 197, 90),
        line: Rgba::from_rgb_int(0x9f1239).with_alpha(26),
    }
}

// =============================================================================
// Preset Lookup
// =============================================================================

/// Get a preset theme by name (case-insensitive).
pub fn get_preset(name: &str) -> Option<SectionTheme> {
    match name.to_lowercase().as_str() {
        "amber" => Some(amber()),
        "burgundy" => Some(burgundy()),
        _ => None,
    }
}

/// List all available preset names.
pub fn preset_names() -> &'static [&'static str] {
    &["amber", "burgundy"]
}

// =============================================================================
// Tests
// =============================================================================
