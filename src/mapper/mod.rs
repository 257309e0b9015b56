//! Mapping core
//!
//! Copies field values from a source record into a destination record of an
//! independently defined type. Fields pair up by alias name; nested records
//! and collections are walked recursively; scalar kinds that differ are
//! coerced. The destination is mutated in place, so fields without a source
//! counterpart keep their prior values.
//!
//! ```ignore
//! use record_mapper::{MapOptions, Mappable, map_with_options};
//!
//! #[derive(Debug, Default, Mappable)]
//! struct GeoDto {
//!     #[map(name = "Latitude", conv = "float64")]
//!     lat: String,
//! }
//!
//! #[derive(Debug, Default, Mappable)]
//! struct Geo {
//!     #[map(name = "Latitude")]
//!     latitude: f64,
//! }
//!
//! let mut geo = Geo::default();
//! let dto = GeoDto { lat: "40.7".into() };
//! map_with_options(&mut geo, &dto, &MapOptions::new().with_strict_mode())?;
//! assert_eq!(geo.latitude, 40.7);
//! ```

mod path;
mod walk;

use std::sync::{Arc, OnceLock};

pub use path::FieldPath;

use crate::config::{MapOptions, MapperConfig};
use crate::error::Result;
use crate::reflect::Record;
use crate::schema::cache::SchemaCache;
use walk::Walker;

/// Mapping entry point bound to a schema cache and configuration
#[derive(Debug, Clone)]
pub struct Mapper {
    cache: Arc<SchemaCache>,
    config: MapperConfig,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new(Arc::new(SchemaCache::new()), MapperConfig::default())
    }
}

impl Mapper {
    /// Create a mapper over an injected cache
    #[must_use]
    pub const fn new(cache: Arc<SchemaCache>, config: MapperConfig) -> Self {
        Self { cache, config }
    }

    /// Process-wide mapper backed by [`SchemaCache::global`]
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<Mapper> = OnceLock::new();
        GLOBAL.get_or_init(|| Self::new(SchemaCache::global(), MapperConfig::default()))
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<SchemaCache> {
        &self.cache
    }

    #[must_use]
    pub const fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Map `src` into `dst` with no toggles and unlimited depth
    pub fn map<D: Record, S: Record>(&self, dst: &mut D, src: &S) -> Result<()> {
        self.map_with_options(dst, src, &MapOptions::unbounded())
    }

    /// Map `src` into `dst` under the given options
    ///
    /// On failure the destination may be partially updated: fields processed
    /// before the failing one keep their new values.
    pub fn map_with_options<D: Record, S: Record>(
        &self,
        dst: &mut D,
        src: &S,
        options: &MapOptions,
    ) -> Result<()> {
        Walker::new(&self.cache, options, &self.config.date_format_config).map_record(dst, src, 0)
    }
}

/// Map `src` into `dst` through the global mapper with default behavior
pub fn map<D: Record, S: Record>(dst: &mut D, src: &S) -> Result<()> {
    Mapper::global().map(dst, src)
}

/// Map `src` into `dst` through the global mapper under the given options
pub fn map_with_options<D: Record, S: Record>(
    dst: &mut D,
    src: &S,
    options: &MapOptions,
) -> Result<()> {
    Mapper::global().map_with_options(dst, src, options)
}
