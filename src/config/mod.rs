//! Configuration for the mapper.

use crate::schema::adapt::DateFormatConfig;

/// Hard recursion ceiling; no option can raise the depth budget above it
pub const HARD_DEPTH_LIMIT: usize = 64;

/// Depth budget of [`MapOptions::default`]
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// A single mapping toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapOption {
    /// Every destination field must be assigned during the call
    StrictMode,
    /// Zero-valued source fields are treated as absent
    IgnoreZeroSource,
    /// Recursion budget for nested records
    MaxDepth(usize),
}

/// Per-call mapping options
///
/// Immutable; every builder method returns a new value. No combination of
/// toggles is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapOptions {
    strict_mode: bool,
    ignore_zero_source: bool,
    /// `None` means unlimited, bounded only by [`HARD_DEPTH_LIMIT`]
    max_depth: Option<usize>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            strict_mode: false,
            ignore_zero_source: false,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl MapOptions {
    /// Options with the default depth budget
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options of the basic entry point: no toggles, unlimited depth
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            strict_mode: false,
            ignore_zero_source: false,
            max_depth: None,
        }
    }

    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.strict_mode = true;
        self
    }

    #[must_use]
    pub const fn with_ignore_zero_source(mut self) -> Self {
        self.ignore_zero_source = true;
        self
    }

    #[must_use]
    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Merge one toggle into these options
    #[must_use]
    pub const fn with(self, option: MapOption) -> Self {
        match option {
            MapOption::StrictMode => self.with_strict_mode(),
            MapOption::IgnoreZeroSource => self.with_ignore_zero_source(),
            MapOption::MaxDepth(depth) => self.with_max_depth(depth),
        }
    }

    #[must_use]
    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    #[must_use]
    pub const fn ignore_zero_source(&self) -> bool {
        self.ignore_zero_source
    }

    /// Effective depth budget, clamped to [`HARD_DEPTH_LIMIT`]
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        match self.max_depth {
            Some(depth) if depth < HARD_DEPTH_LIMIT => depth,
            _ => HARD_DEPTH_LIMIT,
        }
    }
}

impl From<MapOption> for MapOptions {
    fn from(option: MapOption) -> Self {
        Self::default().with(option)
    }
}

impl FromIterator<MapOption> for MapOptions {
    fn from_iter<I: IntoIterator<Item = MapOption>>(iter: I) -> Self {
        let mut options = Self::default();
        options.extend(iter);
        options
    }
}

impl Extend<MapOption> for MapOptions {
    fn extend<I: IntoIterator<Item = MapOption>>(&mut self, iter: I) {
        for option in iter {
            *self = self.with(option);
        }
    }
}

/// Mapper-wide configuration
#[derive(Debug, Clone, Default)]
pub struct MapperConfig {
    /// Date format configuration for text/date coercions
    pub date_format_config: DateFormatConfig,
}
