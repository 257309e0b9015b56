//! Homogeneous collections

use super::{ElementField, FieldMut, FieldRef, MapField};
use crate::schema::field_def::FieldShape;

/// Read access to a collection field
pub trait ListAccess {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn element(&self, index: usize) -> Option<FieldRef<'_>>;
}

/// Write access to a collection field
pub trait ListAccessMut {
    /// Resize to `len` elements, filling with default values
    fn resize(&mut self, len: usize);

    fn element_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;
}

impl<T: ElementField> ListAccess for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn element(&self, index: usize) -> Option<FieldRef<'_>> {
        self.get(index).map(|value| value.as_field())
    }
}

impl<T: ElementField + Default> ListAccessMut for Vec<T> {
    fn resize(&mut self, len: usize) {
        self.resize_with(len, T::default);
    }

    fn element_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        self.get_mut(index).map(|value| value.as_field_mut())
    }
}

impl<T: ElementField + Default> MapField for Vec<T> {
    fn shape() -> FieldShape {
        FieldShape::List(T::element_shape())
    }

    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::List(self)
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::List(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}
