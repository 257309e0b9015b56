use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;

/// A scalar value as seen by the coercion engine
///
/// Integers are widened to 64 bits and floats to `f64`; the precise width is
/// carried separately as a [`ScalarKind`](crate::schema::field_def::ScalarKind).
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(Cow<'a, str>),
    Date(NaiveDate),
}

impl Scalar<'_> {
    /// Whether this is the zero value of its kind
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::UInt(u) => *u == 0,
            // -0.0 is not the zero value
            Self::Float(f) => f.to_bits() == 0,
            Self::Text(s) => s.is_empty(),
            Self::Date(d) => *d == NaiveDate::default(),
        }
    }

    /// Name of the value family for diagnostics
    #[must_use]
    pub const fn family(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "signed integer",
            Self::UInt(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Text(_) => "string",
            Self::Date(_) => "date",
        }
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Date(d) => write!(f, "{d}"),
        }
    }
}
