//! Module for scalar kind compatibility checks.

use crate::schema::adapt::types::{CoercionStrategy, TypeCompatibility};
use crate::schema::field_def::ScalarKind;

/// Check if two scalar kinds are compatible for conversion
#[must_use]
pub const fn check_kind_compatibility(from: ScalarKind, to: ScalarKind) -> TypeCompatibility {
    if from as u8 == to as u8 {
        return TypeCompatibility::Exact;
    }
    match determine_coercion_strategy(from, to) {
        Some(_) => TypeCompatibility::Compatible,
        None => TypeCompatibility::Incompatible,
    }
}

/// Check a conversion that may pass through a directive kind first
#[must_use]
pub fn check_directed_compatibility(
    from: ScalarKind,
    to: ScalarKind,
    directive: Option<ScalarKind>,
) -> TypeCompatibility {
    if from == to {
        return TypeCompatibility::Exact;
    }
    let Some(via) = directive else {
        return check_kind_compatibility(from, to);
    };
    let first = check_kind_compatibility(from, via);
    let second = check_kind_compatibility(via, to);
    if first == TypeCompatibility::Incompatible || second == TypeCompatibility::Incompatible {
        TypeCompatibility::Incompatible
    } else {
        TypeCompatibility::Compatible
    }
}

/// Determine the strategy for converting `source` into `target`
///
/// Returns `None` when no coercion exists.
#[must_use]
pub const fn determine_coercion_strategy(
    source: ScalarKind,
    target: ScalarKind,
) -> Option<CoercionStrategy> {
    use ScalarKind::{Bool, Date, String};

    if source as u8 == target as u8 {
        return Some(CoercionStrategy::Identity);
    }

    match (source, target) {
        // Numeric conversions
        (s, t) if s.is_numeric() && t.is_numeric() => Some(CoercionStrategy::NumericConversion),

        // Text to number or bool
        (String, t) if t.is_numeric() => Some(CoercionStrategy::TextParsing),
        (String, Bool) => Some(CoercionStrategy::TextParsing),

        // Number or bool to text
        (s, String) if s.is_numeric() => Some(CoercionStrategy::TextFormatting),
        (Bool, String) => Some(CoercionStrategy::TextFormatting),

        // Dates only travel through text
        (String, Date) => Some(CoercionStrategy::DateParsing),
        (Date, String) => Some(CoercionStrategy::DateFormatting),

        // Boolean to number
        (Bool, t) if t.is_numeric() => Some(CoercionStrategy::BooleanConversion),

        _ => None,
    }
}
