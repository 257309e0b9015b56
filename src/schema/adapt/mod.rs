//! Module for coercing scalar values between mismatched field kinds.

pub mod compatibility;
pub mod conversions;
pub mod date_utils;
pub mod types;

// Re-export the main types and functions for easier access
pub use compatibility::{
    check_directed_compatibility, check_kind_compatibility, determine_coercion_strategy,
};
pub use conversions::{coerce, convert_scalar};
pub use date_utils::{detect_date_format, parse_date_string};
pub use types::{CoercionError, CoercionStrategy, DateFormatConfig, TypeCompatibility};
