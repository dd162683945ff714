//! Tree paths used to address a location in a configuration tree.
//!
//! Paths are for diagnostics only: they are rendered into error messages as
//! `a.b[2].c[key]` and never used to look anything up.

use std::fmt;

/// One step in a [`TreePath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A record field, by its resolved key.
    Key(String),
    /// A sequence element.
    Index(usize),
    /// A map entry, by its key.
    MapKey(String),
}

/// Location of a value inside a configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreePath {
    segments: Vec<Segment>,
}

impl TreePath {
    /// The empty path, addressing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend with a record field key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.push(Segment::Key(key.into()))
    }

    /// Extend with a sequence index.
    pub fn index(&self, index: usize) -> Self {
        self.push(Segment::Index(index))
    }

    /// Extend with a map key.
    pub fn map_key(&self, key: impl Into<String>) -> Self {
        self.push(Segment::MapKey(key.into()))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    fn push(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) => {
                    if position > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                Segment::Index(index) => write!(f, "[{}]", index)?,
                Segment::MapKey(key) => write!(f, "[{}]", key)?,
            }
        }
        Ok(())
    }
}
