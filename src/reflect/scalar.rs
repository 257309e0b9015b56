//! Scalar field types

use std::borrow::Cow;

use chrono::NaiveDate;

use super::{ElementField, FieldMut, FieldRef, MapField, Scalar};
use crate::schema::adapt::CoercionError;
use crate::schema::field_def::{ElementShape, FieldShape, ScalarKind};

/// A Rust type that maps to one scalar kind
pub trait ScalarField: Sized {
    const KIND: ScalarKind;

    fn to_scalar(&self) -> Scalar<'_>;

    /// Build a value from a scalar of the matching family
    ///
    /// Range is checked; no cross-family conversion happens here.
    fn from_scalar(value: Scalar<'_>) -> Result<Self, CoercionError>;
}

/// Write side of a scalar field
pub trait ScalarSlot {
    fn kind(&self) -> ScalarKind;

    fn assign(&mut self, value: Scalar<'_>) -> Result<(), CoercionError>;
}

impl<T: ScalarField> ScalarSlot for T {
    fn kind(&self) -> ScalarKind {
        T::KIND
    }

    fn assign(&mut self, value: Scalar<'_>) -> Result<(), CoercionError> {
        *self = T::from_scalar(value)?;
        Ok(())
    }
}

macro_rules! scalar_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MapField for $ty {
                fn shape() -> FieldShape {
                    FieldShape::Scalar(<$ty as ScalarField>::KIND)
                }

                fn as_field(&self) -> FieldRef<'_> {
                    FieldRef::Scalar(self.to_scalar())
                }

                fn as_field_mut(&mut self) -> FieldMut<'_> {
                    FieldMut::Scalar(self)
                }

                fn is_zero(&self) -> bool {
                    self.to_scalar().is_zero()
                }
            }

            impl ElementField for $ty {
                fn element_shape() -> ElementShape {
                    ElementShape::Scalar(<$ty as ScalarField>::KIND)
                }
            }
        )*
    };
}

macro_rules! signed_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl ScalarField for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                fn to_scalar(&self) -> Scalar<'_> {
                    Scalar::Int(i64::try_from(*self).unwrap_or(i64::MAX))
                }

                fn from_scalar(value: Scalar<'_>) -> Result<Self, CoercionError> {
                    match value {
                        Scalar::Int(i) => <$ty>::try_from(i)
                            .map_err(|_| CoercionError::out_of_range(i, Self::KIND)),
                        Scalar::UInt(u) => <$ty>::try_from(u)
                            .map_err(|_| CoercionError::out_of_range(u, Self::KIND)),
                        other => Err(CoercionError::mismatch(Self::KIND, &other)),
                    }
                }
            }
        )*
        scalar_field!($($ty),*);
    };
}

macro_rules! unsigned_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl ScalarField for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                fn to_scalar(&self) -> Scalar<'_> {
                    Scalar::UInt(u64::try_from(*self).unwrap_or(u64::MAX))
                }

                fn from_scalar(value: Scalar<'_>) -> Result<Self, CoercionError> {
                    match value {
                        Scalar::UInt(u) => <$ty>::try_from(u)
                            .map_err(|_| CoercionError::out_of_range(u, Self::KIND)),
                        Scalar::Int(i) => <$ty>::try_from(i)
                            .map_err(|_| CoercionError::out_of_range(i, Self::KIND)),
                        other => Err(CoercionError::mismatch(Self::KIND, &other)),
                    }
                }
            }
        )*
        scalar_field!($($ty),*);
    };
}

signed_scalar!(i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64, isize => Int64);
unsigned_scalar!(u8 => UInt8, u16 => UInt16, u32 => UInt32, u64 => UInt64, usize => UInt64);

impl ScalarField for f32 {
    const KIND: ScalarKind = ScalarKind::Float32;

    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Float(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_scalar(value: Scalar<'_>) -> Result<Self, CoercionError> {
        match value {
            Scalar::Float(f) => {
                let narrowed = f as f32;
                if f.is_finite() && narrowed.is_infinite() {
                    Err(CoercionError::out_of_range(f, Self::KIND))
                } else {
                    Ok(narrowed)
                }
            }
            other => Err(CoercionError::mismatch(Self::KIND, &other)),
        }
    }
}

impl ScalarField for f64 {
    const KIND: ScalarKind = ScalarKind::Float64;

    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Float(*self)
    }

    fn from_scalar(value: Scalar<'_>) -> Result<Self, CoercionError> {
        match value {
            Scalar::Float(f) => Ok(f),
            other => Err(CoercionError::mismatch(Self::KIND, &other)),
        }
    }
}

impl ScalarField for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Bool(*self)
    }

    fn from_scalar(value: Scalar<'_>) -> Result<Self, CoercionError> {
        match value {
            Scalar::Bool(b) => Ok(b),
            other => Err(CoercionError::mismatch(Self::KIND, &other)),
        }
    }
}

impl ScalarField for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Text(Cow::Borrowed(self.as_str()))
    }

    fn from_scalar(value: Scalar<'_>) -> Result<Self, CoercionError> {
        match value {
            Scalar::Text(s) => Ok(s.into_owned()),
            other => Err(CoercionError::mismatch(Self::KIND, &other)),
        }
    }
}

impl ScalarField for NaiveDate {
    const KIND: ScalarKind = ScalarKind::Date;

    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Date(*self)
    }

    fn from_scalar(value: Scalar<'_>) -> Result<Self, CoercionError> {
        match value {
            Scalar::Date(d) => Ok(d),
            other => Err(CoercionError::mismatch(Self::KIND, &other)),
        }
    }
}

scalar_field!(f32, f64, bool, String, NaiveDate);
