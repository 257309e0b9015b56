//! Reflection layer
//!
//! Records expose their fields through indexed accessors instead of runtime
//! introspection. `#[derive(Mappable)]` implements [`Record`], [`Mappable`],
//! [`MapField`] and [`ElementField`] for a struct; scalars, `Vec<T>` and
//! `Box<T>` are covered here.

mod list;
mod scalar;
mod value;

pub use list::{ListAccess, ListAccessMut};
pub use scalar::{ScalarField, ScalarSlot};
pub use value::Scalar;

use crate::schema::field_def::{ElementShape, FieldDefinition, FieldShape, RecordType};

/// Object-safe view of a record, used by the mapping core
pub trait Mappable {
    /// Identity and description of the concrete record type
    fn record_type(&self) -> RecordType;

    /// Read access to the field at `index`
    fn field(&self, index: usize) -> Option<FieldRef<'_>>;

    /// Write access to the field at `index`
    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;

    /// Whether every mapped field holds its zero value
    fn is_zero(&self) -> bool;
}

/// Static description of a record type
pub trait Record: Mappable + Sized + 'static {
    /// Record type handle
    fn descriptor() -> RecordType;

    /// Field definitions in declaration order
    fn describe() -> Vec<FieldDefinition>;
}

/// A type that can appear as a record field
pub trait MapField {
    fn shape() -> FieldShape
    where
        Self: Sized;

    fn as_field(&self) -> FieldRef<'_>;

    fn as_field_mut(&mut self) -> FieldMut<'_>;

    fn is_zero(&self) -> bool;
}

/// A field type that can also be a collection element
pub trait ElementField: MapField {
    fn element_shape() -> ElementShape
    where
        Self: Sized;
}

/// Borrowed field value
pub enum FieldRef<'a> {
    Scalar(Scalar<'a>),
    Record(&'a dyn Mappable),
    List(&'a dyn ListAccess),
}

impl FieldRef<'_> {
    /// Whether the value equals its type's zero value
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Scalar(value) => value.is_zero(),
            Self::Record(record) => record.is_zero(),
            Self::List(list) => list.len() == 0,
        }
    }

    /// Short description of the value's shape for diagnostics
    #[must_use]
    pub const fn shape_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Record(_) => "record",
            Self::List(_) => "list",
        }
    }
}

/// Mutable field slot
pub enum FieldMut<'a> {
    Scalar(&'a mut dyn ScalarSlot),
    Record(&'a mut dyn Mappable),
    List(&'a mut dyn ListAccessMut),
}

impl FieldMut<'_> {
    #[must_use]
    pub const fn shape_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Record(_) => "record",
            Self::List(_) => "list",
        }
    }
}

impl<T: MapField> MapField for Box<T> {
    fn shape() -> FieldShape {
        T::shape()
    }

    fn as_field(&self) -> FieldRef<'_> {
        (**self).as_field()
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        (**self).as_field_mut()
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

impl<T: ElementField> ElementField for Box<T> {
    fn element_shape() -> ElementShape {
        T::element_shape()
    }
}
