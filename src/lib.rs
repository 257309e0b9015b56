//! A Rust library for mapping values between independently defined record
//! types, with field aliasing, scalar coercion, strict-mode checking and a
//! shared schema cache.

// Lets generated code refer to `::record_mapper` from inside this crate too
extern crate self as record_mapper;

pub mod config;
pub mod error;
pub mod mapper;
pub mod reflect;
pub mod schema;

// Re-export the most common types for easier use
// Core types
pub use config::{DEFAULT_MAX_DEPTH, HARD_DEPTH_LIMIT, MapOption, MapOptions, MapperConfig};
pub use error::{ErrorReason, ErrorReport, MappingError, Result};
pub use mapper::{Mapper, map, map_with_options};

// Reflection
pub use reflect::{
    ElementField, FieldMut, FieldRef, ListAccess, ListAccessMut, MapField, Mappable, Record,
    Scalar, ScalarField, ScalarSlot,
};
pub use record_mapper_macros::Mappable;

// Schema types
pub use schema::{
    AlignmentPlan, CacheStats, DateFormatConfig, ElementShape, FieldDefinition, FieldShape,
    RecordSchema, RecordType, ScalarKind, SchemaCache,
};
