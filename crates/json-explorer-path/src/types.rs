//! Type definitions for node paths.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{decode, encode_segment, PathError, ROOT};

/// A single step of a [`Path`].
///
/// Object keys and array indices are distinct variants, so an index segment
/// can never be confused with a numeric-looking object key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// An object key (stored unescaped).
    Key(String),
    /// A zero-based array index.
    Index(usize),
}

impl Segment {
    /// The decoded display name of the segment: the raw key, or the index
    /// rendered as a decimal string.
    pub fn name(&self) -> String {
        match self {
            Segment::Key(key) => key.clone(),
            Segment::Index(idx) => idx.to_string(),
        }
    }
}

impl From<usize> for Segment {
    fn from(idx: usize) -> Self {
        Segment::Index(idx)
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

/// A parsed node path, rooted at `root`.
///
/// Paths are built by [`decode`](crate::decode) (or `str::parse`) and by the
/// typed builders on this type; there is no way to assemble one from an
/// unchecked string.
///
/// # Example
///
/// ```
/// use json_explorer_path::{Path, Segment};
///
/// let path = Path::root().key("list").index(2);
/// assert_eq!(path.to_string(), "root.list[2]");
/// assert_eq!(path.last(), Some(&Segment::Index(2)));
/// assert_eq!("root.list[2]".parse::<Path>().unwrap(), path);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The root path (`root`).
    pub fn root() -> Self {
        Self { segments: Vec::new() }
    }

    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment.into());
        Self { segments }
    }

    /// Builder form of [`child`](Self::child) for an object key.
    pub fn key(self, key: &str) -> Self {
        self.push(Segment::Key(key.to_string()))
    }

    /// Builder form of [`child`](Self::child) for an array index.
    pub fn index(self, idx: usize) -> Self {
        self.push(Segment::Index(idx))
    }

    fn push(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// The parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Decoded name of the last segment; `"root"` for the root path.
    pub fn name(&self) -> String {
        match self.segments.last() {
            Some(segment) => segment.name(),
            None => ROOT.to_string(),
        }
    }

    /// `true` if `prefix` is equal to this path or one of its ancestors.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// `true` if this path is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        other.segments.len() > self.segments.len() && other.starts_with(self)
    }

    /// `true` if this path is a direct child of `parent`.
    pub fn is_child_of(&self, parent: &Path) -> bool {
        self.segments.len() == parent.segments.len() + 1 && self.starts_with(parent)
    }

    /// Replaces the segment at `pos`; returns `None` if `pos` is out of range.
    pub fn with_segment_at(&self, pos: usize, segment: Segment) -> Option<Path> {
        if pos >= self.segments.len() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments[pos] = segment;
        Some(Self { segments })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT)?;
        for segment in &self.segments {
            f.write_str(&encode_segment(segment))?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        decode(&raw).map_err(de::Error::custom)
    }
}
