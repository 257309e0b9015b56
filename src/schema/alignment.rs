//! Field alignment between a source and a destination record type
//!
//! An [`AlignmentPlan`] pairs every destination field with at most one source
//! field (exact, case-sensitive alias match) and decides ahead of time how
//! each pair is copied.

use itertools::Itertools;

use crate::schema::adapt::{
    CoercionStrategy, TypeCompatibility, check_directed_compatibility,
    determine_coercion_strategy,
};
use crate::schema::field_def::{
    ElementShape, FieldDefinition, FieldShape, RecordSchema, RecordType, ScalarKind,
};

/// How a matched scalar pair is converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarPlan {
    pub source: ScalarKind,
    pub target: ScalarKind,
    /// Directive from the source field, else from the destination field
    pub directive: Option<ScalarKind>,
    pub compatibility: TypeCompatibility,
    /// Strategy of the first conversion hop
    pub strategy: Option<CoercionStrategy>,
}

impl ScalarPlan {
    fn new(source: ScalarKind, target: ScalarKind, directive: Option<ScalarKind>) -> Self {
        let first_hop = match directive {
            Some(via) if source != target => via,
            _ => target,
        };
        Self {
            source,
            target,
            directive,
            compatibility: check_directed_compatibility(source, target, directive),
            strategy: determine_coercion_strategy(source, first_hop),
        }
    }

    /// Whether the value can be assigned without coercion
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.compatibility == TypeCompatibility::Exact
    }
}

/// How a collection element pair is copied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementAction {
    Scalar(ScalarPlan),
    Record,
}

/// How a matched field pair is copied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairAction {
    Scalar(ScalarPlan),
    Record,
    List(ElementAction),
    /// Shapes cannot be reconciled; fails when the pair is actually mapped
    Mismatch,
}

impl PairAction {
    fn between(source: &FieldDefinition, dest: &FieldDefinition) -> Self {
        let directive = source.directive.or(dest.directive);
        match (source.shape, dest.shape) {
            (FieldShape::Scalar(from), FieldShape::Scalar(to)) => {
                Self::Scalar(ScalarPlan::new(from, to, directive))
            }
            (FieldShape::Record(_), FieldShape::Record(_)) => Self::Record,
            (FieldShape::List(from), FieldShape::List(to)) => match (from, to) {
                (ElementShape::Scalar(from), ElementShape::Scalar(to)) => {
                    Self::List(ElementAction::Scalar(ScalarPlan::new(from, to, directive)))
                }
                (ElementShape::Record(_), ElementShape::Record(_)) => {
                    Self::List(ElementAction::Record)
                }
                _ => Self::Mismatch,
            },
            _ => Self::Mismatch,
        }
    }
}

/// A destination field and its matched source field, if any
#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub destination: FieldDefinition,
    pub source: Option<FieldDefinition>,
    pub action: PairAction,
}

impl PlanEntry {
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        self.source.is_some()
    }
}

/// Precomputed field alignment for one (source, destination) type pair
#[derive(Debug, Clone)]
pub struct AlignmentPlan {
    pub source: RecordType,
    pub destination: RecordType,
    /// One entry per destination field, in declaration order
    entries: Vec<PlanEntry>,
    /// Source fields no destination field asked for
    unmatched_source: Vec<FieldDefinition>,
}

impl AlignmentPlan {
    /// Align two resolved schemas
    #[must_use]
    pub fn build(source: &RecordSchema, destination: &RecordSchema) -> Self {
        let entries = destination
            .fields
            .iter()
            .map(|dest| {
                let matched = source.get_field(dest.alias_name()).cloned();
                let action = matched
                    .as_ref()
                    .map_or(PairAction::Mismatch, |src| PairAction::between(src, dest));
                PlanEntry {
                    destination: dest.clone(),
                    source: matched,
                    action,
                }
            })
            .collect();

        let unmatched_source = source
            .fields
            .iter()
            .filter(|src| !destination.has_field(src.alias_name()))
            .cloned()
            .collect();

        Self {
            source: source.record,
            destination: destination.record,
            entries,
            unmatched_source,
        }
    }

    /// All destination entries in declaration order
    #[must_use]
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Matched pairs in destination declaration order
    pub fn matched(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|entry| entry.is_matched())
    }

    /// Destination fields with no source counterpart
    pub fn unmatched_destination(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.entries
            .iter()
            .filter(|entry| !entry.is_matched())
            .map(|entry| &entry.destination)
    }

    /// Source fields with no destination counterpart
    #[must_use]
    pub fn unmatched_source(&self) -> &[FieldDefinition] {
        &self.unmatched_source
    }

    /// Comma-separated alias names of the unmatched source fields
    #[must_use]
    pub fn unmatched_source_names(&self) -> String {
        self.unmatched_source
            .iter()
            .map(FieldDefinition::alias_name)
            .join(", ")
    }
}
