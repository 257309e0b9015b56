//! Module for record schemas, field alignment and scalar coercion.

pub mod adapt;
pub mod alignment;
pub mod cache;
pub mod field_def;

// Re-export the main types for easier access
pub use adapt::{CoercionError, CoercionStrategy, DateFormatConfig, TypeCompatibility};
pub use alignment::{AlignmentPlan, ElementAction, PairAction, PlanEntry, ScalarPlan};
pub use cache::{CacheStats, SchemaCache};
pub use field_def::{
    ElementShape, FieldDefinition, FieldShape, RecordSchema, RecordType, ScalarKind,
};
