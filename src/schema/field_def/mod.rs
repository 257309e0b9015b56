//! Module for record field definitions
//!
//! This module describes record fields (names, aliases, conversion directives
//! and shapes) and resolves them into validated per-type schemas.

pub mod field;
mod record_schema;

pub use field::{
    ElementShape, FieldDefinition, FieldShape, RecordType, ScalarKind, UnknownDirective,
};
pub use record_schema::RecordSchema;
