//! Recursive record walk
//!
//! One [`Walker`] lives for one mapping call. It follows the alignment plan of
//! each record pair, recursing into nested records and collections, and stops
//! at the first failure.

use crate::config::MapOptions;
use crate::error::{ErrorReason, MappingError, Result};
use crate::mapper::path::FieldPath;
use crate::reflect::{FieldMut, FieldRef, ListAccess, ListAccessMut, Mappable, Scalar, ScalarSlot};
use crate::schema::adapt::{DateFormatConfig, TypeCompatibility, coerce};
use crate::schema::alignment::{ElementAction, PairAction, PlanEntry, ScalarPlan};
use crate::schema::cache::SchemaCache;
use crate::schema::field_def::FieldDefinition;

/// Source and destination type names of the record pair being walked
#[derive(Debug, Clone, Copy)]
struct Scope {
    src: &'static str,
    dst: &'static str,
}

pub(crate) struct Walker<'a> {
    cache: &'a SchemaCache,
    options: &'a MapOptions,
    dates: &'a DateFormatConfig,
    path: FieldPath,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(
        cache: &'a SchemaCache,
        options: &'a MapOptions,
        dates: &'a DateFormatConfig,
    ) -> Self {
        Self {
            cache,
            options,
            dates,
            path: FieldPath::new(),
        }
    }

    /// Map `src` into `dst`, where `dst` sits `depth` records below the root
    pub(crate) fn map_record(
        &mut self,
        dst: &mut dyn Mappable,
        src: &dyn Mappable,
        depth: usize,
    ) -> Result<()> {
        let (src_type, dst_type) = (src.record_type(), dst.record_type());
        let scope = Scope {
            src: src_type.name(),
            dst: dst_type.name(),
        };

        let limit = self.options.max_depth();
        if depth > limit {
            return Err(self
                .error(ErrorReason::MaxDepthExceeded, scope)
                .with_detail(format!("depth {depth} exceeds limit {limit}")));
        }

        let plan = self
            .cache
            .resolve(src_type, dst_type)
            .map_err(|err| MappingError {
                field_path: self.path.join(&err.field_path),
                ..err
            })?;

        let mut unassigned: Option<(&FieldDefinition, &'static str)> = None;
        for entry in plan.entries() {
            let Some(source) = &entry.source else {
                unassigned.get_or_insert((&entry.destination, "no source field"));
                continue;
            };
            let Some(from) = src.field(source.index) else {
                return Err(self.missing_accessor(entry, scope));
            };
            if self.options.ignore_zero_source() && from.is_zero() {
                unassigned.get_or_insert((&entry.destination, "source value is zero"));
                continue;
            }
            let Some(to) = dst.field_mut(entry.destination.index) else {
                return Err(self.missing_accessor(entry, scope));
            };

            self.path.push_field(entry.destination.name);
            let result = self.map_pair(entry, from, to, depth, scope);
            self.path.pop();
            result?;
        }

        match unassigned {
            Some((field, cause)) if self.options.strict_mode() => {
                self.path.push_field(field.name);
                let mut detail = format!("{cause} for `{}`", field.alias_name());
                if !plan.unmatched_source().is_empty() {
                    detail.push_str("; unused source fields: ");
                    detail.push_str(&plan.unmatched_source_names());
                }
                let err = self
                    .error(ErrorReason::UnmappedField, scope)
                    .with_detail(detail);
                self.path.pop();
                Err(err)
            }
            _ => Ok(()),
        }
    }

    fn map_pair(
        &mut self,
        entry: &PlanEntry,
        from: FieldRef<'_>,
        to: FieldMut<'_>,
        depth: usize,
        scope: Scope,
    ) -> Result<()> {
        match (entry.action, from, to) {
            (PairAction::Record, FieldRef::Record(src), FieldMut::Record(dst)) => {
                self.map_record(dst, src, depth + 1)
            }
            (PairAction::List(element), FieldRef::List(src), FieldMut::List(dst)) => {
                self.map_list(element, src, dst, depth, scope)
            }
            (PairAction::Scalar(plan), FieldRef::Scalar(value), FieldMut::Scalar(slot)) => {
                self.assign(plan, value, slot, scope)
            }
            (PairAction::Mismatch, _, _) => {
                let source = entry
                    .source
                    .as_ref()
                    .map_or_else(|| "nothing".to_string(), |src| src.shape.to_string());
                Err(self
                    .error(ErrorReason::NoCoercionAvailable, scope)
                    .with_detail(format!(
                        "cannot map {source} into {}",
                        entry.destination.shape
                    )))
            }
            (_, from, to) => Err(self
                .error(ErrorReason::NoCoercionAvailable, scope)
                .with_detail(format!(
                    "cannot map {} value into {} slot",
                    from.shape_name(),
                    to.shape_name()
                ))),
        }
    }

    /// Resize `dst` to the length of `src`, then map elementwise
    fn map_list(
        &mut self,
        element: ElementAction,
        src: &dyn ListAccess,
        dst: &mut dyn ListAccessMut,
        depth: usize,
        scope: Scope,
    ) -> Result<()> {
        let len = src.len();
        dst.resize(len);

        for index in 0..len {
            self.path.push_index(index);
            let result = match (element, src.element(index), dst.element_mut(index)) {
                (ElementAction::Record, Some(FieldRef::Record(from)), Some(FieldMut::Record(to))) => {
                    self.map_record(to, from, depth + 1)
                }
                (
                    ElementAction::Scalar(plan),
                    Some(FieldRef::Scalar(value)),
                    Some(FieldMut::Scalar(slot)),
                ) => self.assign(plan, value, slot, scope),
                _ => Err(self
                    .error(ErrorReason::NoCoercionAvailable, scope)
                    .with_detail("collection elements do not match their declared shape")),
            };
            self.path.pop();
            result?;
        }
        Ok(())
    }

    fn assign(
        &self,
        plan: ScalarPlan,
        value: Scalar<'_>,
        slot: &mut dyn ScalarSlot,
        scope: Scope,
    ) -> Result<()> {
        if slot.kind() != plan.target {
            return Err(self
                .error(ErrorReason::NoCoercionAvailable, scope)
                .with_detail(format!(
                    "cannot map {} value into {} slot",
                    plan.target,
                    slot.kind()
                )));
        }

        let value = match plan.compatibility {
            TypeCompatibility::Exact => value,
            TypeCompatibility::Incompatible => {
                return Err(self
                    .error(ErrorReason::NoCoercionAvailable, scope)
                    .with_detail(match plan.directive {
                        Some(via) => format!(
                            "no coercion from {} to {} via {via}",
                            plan.source, plan.target
                        ),
                        None => format!("no coercion from {} to {}", plan.source, plan.target),
                    }));
            }
            TypeCompatibility::Compatible => {
                coerce(value, plan.source, plan.target, plan.directive, self.dates).map_err(
                    |err| MappingError::from_coercion(&err, self.path.to_string(), scope.src, scope.dst),
                )?
            }
        };

        slot.assign(value).map_err(|err| {
            MappingError::from_coercion(&err, self.path.to_string(), scope.src, scope.dst)
        })
    }

    fn missing_accessor(&self, entry: &PlanEntry, scope: Scope) -> MappingError {
        let mut err = self.error(ErrorReason::NoCoercionAvailable, scope);
        err.field_path = self.path.join(entry.destination.name);
        err.with_detail("record accessor does not expose the described field")
    }

    fn error(&self, reason: ErrorReason, scope: Scope) -> MappingError {
        MappingError::new(reason, self.path.to_string(), scope.src, scope.dst)
    }
}
