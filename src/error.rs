//! Error type for configuration validation.
//!
//! The frame path never fails: missing geometry, out-of-range signals and
//! re-trigger races all degrade to "no visible animation". Errors only come
//! out of the `validate()` methods on configuration values.

use std::fmt;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MotionError>;

/// Configuration errors reported by `validate()`.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// A numeric setting was NaN or infinite
    NonFinite { field: &'static str },
    /// A numeric setting was below its minimum
    Negative { field: &'static str, value: f64 },
    /// A `[min, max)` range had `min > max`
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    /// A fraction fell outside `[0, 1]`
    OutOfUnitRange { field: &'static str, value: f64 },
    /// A particle field was configured with no particles
    EmptyField,
    /// A palette color was not a hex color string
    InvalidColor { field: &'static str, value: String },
}

impl std::error::Error for MotionError {}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::NonFinite { field } => write!(f, "{} must be finite", field),
            MotionError::Negative { field, value } => {
                write!(f, "{} must be >= 0 (got {})", field, value)
            }
            MotionError::InvertedRange { field, min, max } => {
                write!(f, "{} range is inverted ({} > {})", field, min, max)
            }
            MotionError::OutOfUnitRange { field, value } => {
                write!(f, "{} must be within [0, 1] (got {})", field, value)
            }
            MotionError::EmptyField => write!(f, "particle field quantity must be > 0"),
            MotionError::InvalidColor { field, value } => {
                write!(f, "{} is not a hex color (got {:?})", field, value)
            }
        }
    }
}

/// Check that `value` is finite and non-negative.
pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(MotionError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(MotionError::Negative { field, value });
    }
    Ok(())
}

/// Check that `(min, max)` is a finite, ordered range.
pub(crate) fn check_range(field: &'static str, range: (f64, f64)) -> Result<()> {
    let (min, max) = range;
    if !min.is_finite() || !max.is_finite() {
        return Err(MotionError::NonFinite { field });
    }
    if min > max {
        return Err(MotionError::InvertedRange { field, min, max });
    }
    Ok(())
}

/// Check that `value` is a finite fraction in `[0, 1]`.
pub(crate) fn check_unit(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(MotionError::NonFinite { field });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(MotionError::OutOfUnitRange { field, value });
    }
    Ok(())
}
