//! Module for converting scalar values between kinds.

use std::borrow::Cow;
use std::fmt::Write;

use chrono::NaiveDate;

use crate::reflect::Scalar;
use crate::schema::adapt::compatibility::determine_coercion_strategy;
use crate::schema::adapt::date_utils::parse_date_string;
use crate::schema::adapt::types::{CoercionError, CoercionStrategy, DateFormatConfig, Result};
use crate::schema::field_def::ScalarKind;

/// Convert a scalar of kind `source` into kind `target`
///
/// A `directive` names the kind the source value is interpreted as first; if
/// it differs from `target` the intermediate value is converted once more.
/// Matching kinds are an identity copy.
pub fn coerce<'a>(
    value: Scalar<'a>,
    source: ScalarKind,
    target: ScalarKind,
    directive: Option<ScalarKind>,
    date_config: &DateFormatConfig,
) -> Result<Scalar<'a>> {
    if source == target {
        return Ok(value);
    }

    match directive {
        Some(via) if via != source && via != target => {
            let intermediate = convert_scalar(value, source, via, date_config)?;
            convert_scalar(intermediate, via, target, date_config)
        }
        _ => convert_scalar(value, source, target, date_config),
    }
}

/// Convert a scalar with no directive
pub fn convert_scalar<'a>(
    value: Scalar<'a>,
    source: ScalarKind,
    target: ScalarKind,
    date_config: &DateFormatConfig,
) -> Result<Scalar<'a>> {
    let Some(strategy) = determine_coercion_strategy(source, target) else {
        return Err(CoercionError::Unsupported {
            from: source,
            to: target,
        });
    };

    match strategy {
        CoercionStrategy::Identity => Ok(value),
        CoercionStrategy::NumericConversion | CoercionStrategy::BooleanConversion => {
            convert_numeric(&value, target)
        }
        CoercionStrategy::TextParsing => match value {
            Scalar::Text(text) => parse_text(&text, target),
            other => Err(CoercionError::mismatch(source, &other)),
        },
        CoercionStrategy::TextFormatting => Ok(Scalar::Text(Cow::Owned(format_scalar(
            &value, source,
        )))),
        CoercionStrategy::DateParsing => match value {
            Scalar::Text(text) => parse_date_string(&text, date_config)
                .map(Scalar::Date)
                .ok_or_else(|| {
                    CoercionError::parse(&text, target, "no configured date format matches")
                }),
            other => Err(CoercionError::mismatch(source, &other)),
        },
        CoercionStrategy::DateFormatting => match value {
            Scalar::Date(date) => format_date(date, &date_config.default_format)
                .map(|text| Scalar::Text(Cow::Owned(text))),
            other => Err(CoercionError::mismatch(source, &other)),
        },
    }
}

/// Inclusive integer range of an integer kind
const fn integer_bounds(kind: ScalarKind) -> Option<(i128, i128)> {
    let bounds = match kind {
        ScalarKind::Int8 => (i8::MIN as i128, i8::MAX as i128),
        ScalarKind::Int16 => (i16::MIN as i128, i16::MAX as i128),
        ScalarKind::Int32 => (i32::MIN as i128, i32::MAX as i128),
        ScalarKind::Int64 => (i64::MIN as i128, i64::MAX as i128),
        ScalarKind::UInt8 => (0, u8::MAX as i128),
        ScalarKind::UInt16 => (0, u16::MAX as i128),
        ScalarKind::UInt32 => (0, u32::MAX as i128),
        ScalarKind::UInt64 => (0, u64::MAX as i128),
        _ => return None,
    };
    Some(bounds)
}

fn integer_result(wide: i128, target: ScalarKind) -> Result<Scalar<'static>> {
    let Some((min, max)) = integer_bounds(target) else {
        return Err(CoercionError::Unsupported {
            from: ScalarKind::Int64,
            to: target,
        });
    };
    if wide < min || wide > max {
        return Err(CoercionError::out_of_range(wide, target));
    }
    if target.is_signed() {
        i64::try_from(wide)
            .map(Scalar::Int)
            .map_err(|_| CoercionError::out_of_range(wide, target))
    } else {
        u64::try_from(wide)
            .map(Scalar::UInt)
            .map_err(|_| CoercionError::out_of_range(wide, target))
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn float_result(wide: i128, target: ScalarKind) -> Result<Scalar<'static>> {
    let exact = match target {
        ScalarKind::Float32 => {
            let f = wide as f32;
            (f as i128 == wide).then_some(f64::from(f))
        }
        _ => {
            let f = wide as f64;
            (f as i128 == wide).then_some(f)
        }
    };
    exact
        .map(Scalar::Float)
        .ok_or_else(|| CoercionError::inexact(wide, target))
}

#[allow(clippy::cast_possible_truncation)]
fn narrow_float(f: f64, target: ScalarKind) -> Result<Scalar<'static>> {
    if target == ScalarKind::Float32 && f.is_finite() && (f as f32).is_infinite() {
        return Err(CoercionError::out_of_range(f, target));
    }
    Ok(Scalar::Float(f))
}

/// Numeric and bool sources into a numeric target
#[allow(clippy::cast_possible_truncation)]
fn convert_numeric(value: &Scalar<'_>, target: ScalarKind) -> Result<Scalar<'static>> {
    let wide = match value {
        Scalar::Int(i) => i128::from(*i),
        Scalar::UInt(u) => i128::from(*u),
        Scalar::Bool(b) => i128::from(*b),
        Scalar::Float(f) => {
            if target.is_float() {
                return narrow_float(*f, target);
            }
            if !f.is_finite() || f.fract() != 0.0 {
                return Err(CoercionError::inexact(f, target));
            }
            // Saturates far outside every integer kind, so the range check still fails
            *f as i128
        }
        other => return Err(CoercionError::mismatch(target, other)),
    };

    if target.is_float() {
        float_result(wide, target)
    } else {
        integer_result(wide, target)
    }
}

/// Parse text into a number or bool
fn parse_text(text: &str, target: ScalarKind) -> Result<Scalar<'static>> {
    if target == ScalarKind::Bool {
        return text
            .parse::<bool>()
            .map(Scalar::Bool)
            .map_err(|e| CoercionError::parse(text, target, e));
    }

    if target.is_float() {
        let f = text
            .parse::<f64>()
            .map_err(|e| CoercionError::parse(text, target, e))?;
        return narrow_float(f, target);
    }

    let wide = text
        .parse::<i128>()
        .map_err(|e| CoercionError::parse(text, target, e))?;
    integer_result(wide, target)
}

/// Render a date with a strftime pattern; bad patterns are an error, not a panic
fn format_date(date: NaiveDate, format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).map_err(|_| CoercionError::Format {
        value: date.to_string(),
        format: format.to_string(),
    })?;
    Ok(out)
}

/// Render a number or bool as text
#[allow(clippy::cast_possible_truncation)]
fn format_scalar(value: &Scalar<'_>, source: ScalarKind) -> String {
    match value {
        // Widened f32 values print with f32 precision
        Scalar::Float(f) if source == ScalarKind::Float32 => (*f as f32).to_string(),
        Scalar::Text(s) => s.to_string(),
        other => other.to_string(),
    }
}
