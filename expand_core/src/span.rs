//! Offset spans over a text snapshot

use core::fmt;
use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, start + length)` over one text snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub length: usize,
}

impl Span {
    /// The empty span at offset 0. A value, not a "not found" marker.
    pub const EMPTY: Span = Span {
        start: 0,
        length: 0,
    };

    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Build a span from its bounds. `end` before `start` collapses to an
    /// empty span at `start`.
    pub const fn from_bounds(start: usize, end: usize) -> Self {
        let length = if end > start { end - start } else { 0 };
        Self { start, length }
    }

    /// Empty span positioned at `offset`
    pub const fn at(offset: usize) -> Self {
        Self {
            start: offset,
            length: 0,
        }
    }

    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// `start <= offset < end`; an empty span contains nothing
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }

    /// Shift the span right by `delta` bytes, `None` if either bound
    /// would overflow
    pub fn checked_offset_by(&self, delta: usize) -> Option<Self> {
        let start = self.start.checked_add(delta)?;
        start.checked_add(self.length)?;
        Some(Self {
            start,
            length: self.length,
        })
    }

    /// Slice `text` by this span, `None` if out of range or off a char boundary
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end())
    }
}
