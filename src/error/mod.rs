//! Error handling for the mapping engine.
//!
//! Every failure the engine can produce is a [`MappingError`]: a reason code,
//! the dot-delimited path of the field being mapped, and the names of the
//! source and destination record types being walked when it happened.

use std::fmt;

use serde::Serialize;

use crate::schema::adapt::CoercionError;

/// Why a mapping call (or a schema resolution) failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorReason {
    /// Strict mode: a destination field received no value in this call
    UnmappedField,
    /// Recursion went deeper than the configured budget
    MaxDepthExceeded,
    /// A coercion between supported kinds failed on this particular value
    ConversionFailed,
    /// There is no coercion between the two kinds or shapes
    NoCoercionAvailable,
    /// Two fields of one record resolve to the same alias name
    DuplicateAlias,
}

impl ErrorReason {
    /// Whether this reason comes from schema resolution rather than mapping
    #[must_use]
    pub const fn is_schema_defect(self) -> bool {
        matches!(self, Self::DuplicateAlias)
    }
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmappedField => write!(f, "unmapped field"),
            Self::MaxDepthExceeded => write!(f, "max depth exceeded"),
            Self::ConversionFailed => write!(f, "conversion failed"),
            Self::NoCoercionAvailable => write!(f, "no coercion available"),
            Self::DuplicateAlias => write!(f, "duplicate alias"),
        }
    }
}

/// Structured mapping failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{reason} at `{field_path}` ({src_type} -> {dst_type}){}", detail_suffix(.detail))]
pub struct MappingError {
    /// Reason code
    pub reason: ErrorReason,
    /// Dot-delimited path of the offending field, empty for the root record
    pub field_path: String,
    /// Name of the source record type
    pub src_type: String,
    /// Name of the destination record type
    pub dst_type: String,
    /// Extra diagnostic text, such as the value that failed to parse
    pub detail: Option<String>,
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_ref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

impl MappingError {
    /// Create a new mapping error without detail text
    pub fn new(
        reason: ErrorReason,
        field_path: impl Into<String>,
        src_type: impl Into<String>,
        dst_type: impl Into<String>,
    ) -> Self {
        Self {
            reason,
            field_path: field_path.into(),
            src_type: src_type.into(),
            dst_type: dst_type.into(),
            detail: None,
        }
    }

    /// Attach detail text
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Build a mapping error from a failed coercion
    pub fn from_coercion(
        err: &CoercionError,
        field_path: impl Into<String>,
        src_type: impl Into<String>,
        dst_type: impl Into<String>,
    ) -> Self {
        Self::new(err.reason(), field_path, src_type, dst_type).with_detail(err.to_string())
    }

    /// Build the report handed to transport layers
    #[must_use]
    pub fn report(&self, message: impl Into<String>) -> ErrorReport {
        ErrorReport {
            error: message.into(),
            reason: self.reason,
            field: (!self.field_path.is_empty()).then(|| self.field_path.clone()),
            src_type: Some(self.src_type.clone()),
            dst_type: Some(self.dst_type.clone()),
        }
    }
}

/// Serializable error body for handler responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub error: String,
    pub reason: ErrorReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_type: Option<String>,
}

/// Result type for mapping operations
pub type Result<T> = std::result::Result<T, MappingError>;
