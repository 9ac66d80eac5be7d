//! Immutable text snapshots
//!
//! Every offset computed by the expansion pipeline is relative to exactly one
//! snapshot. A mutation produces a new snapshot with a bumped version, so
//! stale offsets can be detected by comparing versions.

use std::sync::Arc;

use crate::span::Span;

/// Buffer content at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSnapshot {
    text: Arc<str>,
    version: u64,
}

impl TextSnapshot {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self {
            text: text.into(),
            version: 0,
        }
    }

    pub fn with_version(text: impl Into<Arc<str>>, version: u64) -> Self {
        Self {
            text: text.into(),
            version,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text covered by `span`, `None` if it does not fit this snapshot
    pub fn text_of(&self, span: Span) -> Option<&str> {
        span.slice(&self.text)
    }

    /// Extent of the line containing `offset`, line break excluded.
    ///
    /// Offsets past the end are clamped to the end of the text, so the last
    /// line is reported for them.
    pub fn line_extent_at(&self, offset: usize) -> Span {
        let bytes = self.text.as_bytes();
        let offset = offset.min(bytes.len());

        let start = bytes[..offset]
            .iter()
            .rposition(|&b| b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let mut end = bytes[offset..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|i| offset + i)
            .unwrap_or(bytes.len());

        // CRLF line endings
        if end > start && bytes[end - 1] == b'\r' && end < bytes.len() {
            end -= 1;
        }

        Span::from_bounds(start, end)
    }
}

impl Default for TextSnapshot {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for TextSnapshot {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextSnapshot {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
