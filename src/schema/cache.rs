//! Schema cache
//!
//! Memoizes record schemas per type and alignment plans per (source,
//! destination) type pair. Each key owns a `OnceLock`, so concurrent first
//! requests for the same key run the resolver exactly once and every caller
//! sees the same `Arc`. Failures are cached as well; resolution is
//! deterministic.

use std::any::TypeId;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{MappingError, Result};
use crate::reflect::Record;
use crate::schema::alignment::AlignmentPlan;
use crate::schema::field_def::{RecordSchema, RecordType};

type Slot<T> = Arc<OnceLock<Result<Arc<T>>>>;

/// Resolution counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Record schemas computed
    pub schema_resolutions: usize,
    /// Alignment plans computed
    pub plan_resolutions: usize,
    /// Plan lookups answered from the cache
    pub plan_hits: usize,
}

/// Shared cache of record schemas and alignment plans
#[derive(Debug, Default)]
pub struct SchemaCache {
    schemas: RwLock<FxHashMap<TypeId, Slot<RecordSchema>>>,
    plans: RwLock<FxHashMap<(TypeId, TypeId), Slot<AlignmentPlan>>>,
    schema_resolutions: AtomicUsize,
    plan_resolutions: AtomicUsize,
    plan_hits: AtomicUsize,
}

/// Fetch the slot for `key`, creating an empty one on first use
fn slot<K: Eq + Hash + Copy, T>(map: &RwLock<FxHashMap<K, Slot<T>>>, key: K) -> Slot<T> {
    if let Some(slot) = map
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return Arc::clone(slot);
    }

    let mut map = map.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(map.entry(key).or_default())
}

impl SchemaCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache backing the free-function entry points
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<SchemaCache>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    /// Resolved schema of a record type
    pub fn schema(&self, record: RecordType) -> Result<Arc<RecordSchema>> {
        let slot = slot(&self.schemas, record.id());
        slot.get_or_init(|| {
            self.schema_resolutions.fetch_add(1, Ordering::Relaxed);
            debug!("Resolving schema for {}", record.name());
            RecordSchema::resolve(record).map(Arc::new)
        })
        .clone()
    }

    /// Resolved schema of `T`
    pub fn schema_of<T: Record>(&self) -> Result<Arc<RecordSchema>> {
        self.schema(T::descriptor())
    }

    /// Resolve the schema of `T` eagerly, surfacing definition defects
    pub fn validate<T: Record>(&self) -> Result<()> {
        self.schema_of::<T>().map(|_| ())
    }

    /// Alignment plan for mapping `source` into `destination`
    pub fn resolve(&self, source: RecordType, destination: RecordType) -> Result<Arc<AlignmentPlan>> {
        let slot = slot(&self.plans, (source.id(), destination.id()));
        if let Some(plan) = slot.get() {
            self.plan_hits.fetch_add(1, Ordering::Relaxed);
            return plan.clone();
        }

        slot.get_or_init(|| {
            self.plan_resolutions.fetch_add(1, Ordering::Relaxed);
            let plan = self.build_plan(source, destination);
            if let Ok(plan) = &plan {
                debug!(
                    "Resolved alignment {} -> {}: {} matched, {} unmatched",
                    source.name(),
                    destination.name(),
                    plan.matched().count(),
                    plan.unmatched_destination().count()
                );
            }
            plan
        })
        .clone()
    }

    fn build_plan(&self, source: RecordType, destination: RecordType) -> Result<Arc<AlignmentPlan>> {
        let with_pair = |err: MappingError| MappingError {
            src_type: source.name().to_string(),
            dst_type: destination.name().to_string(),
            ..err
        };
        let src = self.schema(source).map_err(with_pair)?;
        let dst = self.schema(destination).map_err(with_pair)?;
        Ok(Arc::new(AlignmentPlan::build(&src, &dst)))
    }

    /// Current resolution counters
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            schema_resolutions: self.schema_resolutions.load(Ordering::Relaxed),
            plan_resolutions: self.plan_resolutions.load(Ordering::Relaxed),
            plan_hits: self.plan_hits.load(Ordering::Relaxed),
        }
    }
}
