//! Field paths for diagnostics

use std::fmt;

use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Field(&'static str),
    Index(usize),
}

/// Path of the field currently being mapped, rendered as `address.geo.Latitude`
/// or `tags[2]`
#[derive(Debug, Clone, Default)]
pub struct FieldPath {
    segments: SmallVec<[Segment; 8]>,
}

impl FieldPath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_field(&mut self, name: &'static str) {
        self.segments.push(Segment::Field(name));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Render this path followed by a path relative to it
    #[must_use]
    pub fn join(&self, relative: &str) -> String {
        match (self.is_root(), relative.is_empty()) {
            (true, _) => relative.to_string(),
            (false, true) => self.to_string(),
            (false, false) if relative.starts_with('[') => format!("{self}{relative}"),
            (false, false) => format!("{self}.{relative}"),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if position == 0 => write!(f, "{name}")?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
