//! Field definitions for record schemas
//!
//! A [`FieldDefinition`] is what a record type says about one of its fields:
//! the declared name, the alias used to match it against the other side of a
//! mapping, an optional conversion directive, and the field's shape.

use std::any::TypeId;
use std::fmt;
use std::str::FromStr;

/// Semantic scalar kind of a field
///
/// Kinds are what the coercion engine reasons about. Several Rust types can
/// share a kind (`i64` and `isize` are both `Int64`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Date,
}

impl ScalarKind {
    /// Directive spelling of this kind
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Date => "date",
        }
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    #[must_use]
    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::UInt8 | Self::UInt16 | Self::UInt32 | Self::UInt64
        )
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown conversion directive
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown conversion directive `{0}`")]
pub struct UnknownDirective(pub String);

impl FromStr for ScalarKind {
    type Err = UnknownDirective;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "bool" => Self::Bool,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int" | "int64" => Self::Int64,
            "uint8" => Self::UInt8,
            "uint16" => Self::UInt16,
            "uint32" => Self::UInt32,
            "uint" | "uint64" => Self::UInt64,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "string" => Self::String,
            "date" => Self::Date,
            other => return Err(UnknownDirective(other.to_string())),
        };
        Ok(kind)
    }
}

/// Identity and description hook of a record type
///
/// Produced by the derive macro; two record types are the same if and only if
/// their `TypeId`s are equal.
#[derive(Clone, Copy)]
pub struct RecordType {
    id: TypeId,
    name: &'static str,
    describe: fn() -> Vec<FieldDefinition>,
}

impl RecordType {
    /// Create the record type handle for `T`
    #[must_use]
    pub fn of<T: 'static>(name: &'static str, describe: fn() -> Vec<FieldDefinition>) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
            describe,
        }
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Short type name as written in the record definition
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Raw field list in declaration order
    #[must_use]
    pub fn fields(&self) -> Vec<FieldDefinition> {
        (self.describe)()
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RecordType {}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordType").field(&self.name).finish()
    }
}

/// Shape of a collection element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementShape {
    Scalar(ScalarKind),
    Record(RecordType),
}

/// Shape of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// Copied or converted as a single value
    Scalar(ScalarKind),
    /// Mapped recursively
    Record(RecordType),
    /// Homogeneous collection, mapped elementwise
    List(ElementShape),
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Record(record) => write!(f, "{}", record.name()),
            Self::List(ElementShape::Scalar(kind)) => write!(f, "[{kind}]"),
            Self::List(ElementShape::Record(record)) => write!(f, "[{}]", record.name()),
        }
    }
}

/// Mapping metadata of one record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Accessor index of the field in its record
    pub index: usize,
    /// Declared field name
    pub name: &'static str,
    /// Name to match against the other side, when it differs from `name`
    pub alias: Option<&'static str>,
    /// Kind the value is converted to when kinds differ
    pub directive: Option<ScalarKind>,
    /// Value shape
    pub shape: FieldShape,
}

impl FieldDefinition {
    /// Create a new field definition
    #[must_use]
    pub const fn new(index: usize, name: &'static str, shape: FieldShape) -> Self {
        Self {
            index,
            name,
            alias: None,
            directive: None,
            shape,
        }
    }

    /// Match this field under a different name
    #[must_use]
    pub fn with_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Convert values of this field through `kind`
    #[must_use]
    pub fn with_directive(mut self, kind: ScalarKind) -> Self {
        self.directive = Some(kind);
        self
    }

    /// The name this field is matched by
    #[must_use]
    pub fn alias_name(&self) -> &'static str {
        self.alias.unwrap_or(self.name)
    }

    /// Check if the given name matches this field's alias
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.alias_name() == name
    }
}
