//! Record schema resolution
//!
//! A [`RecordSchema`] is the validated, immutable field list of one record
//! type, indexed by alias name.

use rustc_hash::FxHashMap;

use super::field::{FieldDefinition, RecordType};
use crate::error::{ErrorReason, MappingError, Result};

/// Resolved schema of one record type
#[derive(Debug, Clone)]
pub struct RecordSchema {
    /// The record type this schema describes
    pub record: RecordType,
    /// Field definitions in declaration order
    pub fields: Vec<FieldDefinition>,
    /// Alias name to position in `fields`
    by_alias: FxHashMap<&'static str, usize>,
}

impl RecordSchema {
    /// Resolve the schema of a record type
    ///
    /// Fails with [`ErrorReason::DuplicateAlias`] when two fields resolve to
    /// the same alias name.
    pub fn resolve(record: RecordType) -> Result<Self> {
        let fields = record.fields();
        let mut by_alias = FxHashMap::with_capacity_and_hasher(fields.len(), Default::default());

        for (position, field) in fields.iter().enumerate() {
            let alias = field.alias_name();
            if let Some(previous) = by_alias.insert(alias, position) {
                let first = &fields[previous];
                return Err(MappingError::new(
                    ErrorReason::DuplicateAlias,
                    field.name,
                    record.name(),
                    record.name(),
                )
                .with_detail(format!(
                    "fields `{}` and `{}` both resolve to alias `{alias}`",
                    first.name, field.name
                )));
            }
        }

        Ok(Self {
            record,
            fields,
            by_alias,
        })
    }

    /// Get a field definition by alias name
    #[must_use]
    pub fn get_field(&self, alias: &str) -> Option<&FieldDefinition> {
        self.by_alias.get(alias).map(|&position| &self.fields[position])
    }

    /// Check if this schema contains a field with the given alias
    #[must_use]
    pub fn has_field(&self, alias: &str) -> bool {
        self.by_alias.contains_key(alias)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
