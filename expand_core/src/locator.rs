//! Abbreviation span location
//!
//! The abbreviation is the text between the end of the last classified
//! span on the caret line (or the line start) and the caret, with
//! surrounding whitespace trimmed.

use tracing::trace;

use crate::host::Classifier;
use crate::snapshot::TextSnapshot;
use crate::span::Span;

/// Abbreviation found immediately before the caret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbreviationSpan {
    pub span: Span,
    pub text: String,
}

/// Finds the abbreviation to expand
pub struct SpanLocator<'c, C: ?Sized> {
    classifier: &'c C,
}

impl<'c, C: Classifier + ?Sized> SpanLocator<'c, C> {
    pub fn new(classifier: &'c C) -> Self {
        Self { classifier }
    }

    /// Locate the abbreviation ending at `caret`, `None` if there is none
    pub fn locate(&self, snapshot: &TextSnapshot, caret: usize) -> Option<AbbreviationSpan> {
        if caret == 0 || caret > snapshot.len() {
            return None;
        }

        let line = snapshot.line_extent_at(caret);
        let boundary = self
            .classifier
            .classification_spans(snapshot, line)
            .last()
            .map(|span| span.end())
            .unwrap_or(line.start);

        if boundary > caret {
            trace!(boundary, caret, "classification ends past the caret");
            return None;
        }

        let raw = snapshot.text_of(Span::from_bounds(boundary, caret))?;
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        let leading = raw.len() - raw.trim_start().len();
        let start = boundary + leading;
        let span = Span::new(start, text.len());

        Some(AbbreviationSpan {
            span,
            text: text.to_string(),
        })
    }
}
