//! Core types and error definitions for scalar coercion.

use std::fmt::Display;

use crate::error::ErrorReason;
use crate::reflect::Scalar;
use crate::schema::field_def::ScalarKind;

/// Errors that can occur during scalar coercion
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    /// Text could not be parsed as the target kind
    #[error("cannot parse {value:?} as {target}: {message}")]
    Parse {
        value: String,
        target: ScalarKind,
        message: String,
    },

    /// Value does not fit the target kind
    #[error("{value} is out of range for {target}")]
    OutOfRange { value: String, target: ScalarKind },

    /// Value would lose precision in the target kind
    #[error("{value} cannot be represented exactly as {target}")]
    Inexact { value: String, target: ScalarKind },

    /// A value could not be rendered with the configured format
    #[error("cannot format {value} with {format:?}")]
    Format { value: String, format: String },

    /// No conversion exists between the two kinds
    #[error("no coercion from {from} to {to}")]
    Unsupported { from: ScalarKind, to: ScalarKind },

    /// A slot received a value of the wrong family
    #[error("{expected} field cannot hold a {found} value")]
    Mismatch {
        expected: ScalarKind,
        found: &'static str,
    },
}

impl CoercionError {
    pub fn out_of_range(value: impl Display, target: ScalarKind) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            target,
        }
    }

    pub fn inexact(value: impl Display, target: ScalarKind) -> Self {
        Self::Inexact {
            value: value.to_string(),
            target,
        }
    }

    pub fn parse(value: &str, target: ScalarKind, message: impl Display) -> Self {
        Self::Parse {
            value: value.to_string(),
            target,
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn mismatch(expected: ScalarKind, found: &Scalar<'_>) -> Self {
        Self::Mismatch {
            expected,
            found: found.family(),
        }
    }

    /// Reason code reported in a [`MappingError`](crate::MappingError)
    #[must_use]
    pub const fn reason(&self) -> ErrorReason {
        match self {
            Self::Parse { .. }
            | Self::Format { .. }
            | Self::OutOfRange { .. }
            | Self::Inexact { .. } => ErrorReason::ConversionFailed,
            Self::Unsupported { .. } | Self::Mismatch { .. } => ErrorReason::NoCoercionAvailable,
        }
    }
}

/// Alias for Result with `CoercionError`
pub type Result<T> = std::result::Result<T, CoercionError>;

/// Types of scalar kind compatibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCompatibility {
    /// Kinds match exactly
    Exact,
    /// Kinds can be converted, possibly failing on particular values
    Compatible,
    /// Kinds are incompatible
    Incompatible,
}

/// Available strategies for scalar coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionStrategy {
    /// Same kind, copy as-is
    Identity,
    /// Between integer and float kinds, range checked
    NumericConversion,
    /// Parse text into a number or bool
    TextParsing,
    /// Render a number or bool as text
    TextFormatting,
    /// Parse text into a date
    DateParsing,
    /// Render a date as text
    DateFormatting,
    /// Bool to number (1 or 0)
    BooleanConversion,
}

/// Configuration for date format handling
#[derive(Debug, Clone)]
pub struct DateFormatConfig {
    /// List of date format strings to try when parsing dates
    pub date_formats: Vec<String>,
    /// Date format to use when converting dates to strings
    pub default_format: String,
    /// Enable heuristic format detection
    pub enable_format_detection: bool,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%Y-%m-%d".to_string(), // ISO format: 2023-01-15
                "%d-%m-%Y".to_string(), // European: 15-01-2023
                "%m/%d/%Y".to_string(), // US: 01/15/2023
                "%d.%m.%Y".to_string(), // German/Danish: 15.01.2023
                "%Y%m%d".to_string(),   // Compact: 20230115
                "%d %b %Y".to_string(), // 15 Jan 2023
                "%d %B %Y".to_string(), // 15 January 2023
            ],
            default_format: "%Y-%m-%d".to_string(),
            enable_format_detection: true,
        }
    }
}
