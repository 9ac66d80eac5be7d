//! Tab stop discovery
//!
//! A tab stop is an empty place in freshly expanded markup where editing
//! continues: the content between an element's opening and closing tags, or
//! an empty attribute value. Stops are found by scanning the whole document
//! text, or taken from insertion points the grammar engine reported.

use core::fmt;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ExpandResult;
use crate::span::Span;

/// Element content: `<name attrs>content</name>`, names compared ignoring case
const BRACKET_PATTERN: &str = r"(?i)<([a-z0-9]*)\b[^>]*>([^<]*)</([a-z0-9]*)>";

/// Empty attribute value: `=""`
const QUOTE_PATTERN: &str = r#"(="()")"#;

/// Scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

/// Which pattern produced a tab stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TabStopKind {
    /// Element content between matching tags
    Bracket,
    /// Attribute value between quotes
    Quote,
}

impl TabStopKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabStopKind::Bracket => "bracket",
            TabStopKind::Quote => "quote",
        }
    }
}

impl fmt::Display for TabStopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A located insertion point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabStopCandidate {
    pub span: Span,
    pub kind: TabStopKind,
}

impl TabStopCandidate {
    pub const fn new(span: Span, kind: TabStopKind) -> Self {
        Self { span, kind }
    }

    pub const fn bracket(span: Span) -> Self {
        Self::new(span, TabStopKind::Bracket)
    }

    pub const fn quote(span: Span) -> Self {
        Self::new(span, TabStopKind::Quote)
    }
}

/// Pick the nearest candidate relative to `reference`.
///
/// `candidates` must be in document order. Forward takes the first one
/// starting at or after `reference.start`; backward takes the last one
/// starting before `reference.end()`.
pub fn nearest<I>(candidates: I, reference: Span, direction: Direction) -> Option<Span>
where
    I: IntoIterator<Item = Span>,
    I::IntoIter: DoubleEndedIterator,
{
    let mut candidates = candidates.into_iter();
    match direction {
        Direction::Forward => candidates.find(|span| span.start >= reference.start),
        Direction::Backward => candidates.rfind(|span| span.start < reference.end()),
    }
}

/// Whether a closing tag name closes an opening one.
///
/// Names compare under Unicode lowercasing, matching how `(?i)` lets the
/// name class accept letters such as U+212A KELVIN SIGN. An empty closing
/// name closes any opening name: a backtracking engine shrinks the opening
/// capture to the empty string before the word boundary and lets the
/// attribute run swallow the name.
fn names_pair(open: &str, close: &str) -> bool {
    close.is_empty()
        || open
            .chars()
            .flat_map(char::to_lowercase)
            .eq(close.chars().flat_map(char::to_lowercase))
}

/// Finds tab stops of both kinds in arbitrary text
#[derive(Debug, Clone)]
pub struct TabStopFinder {
    bracket: Regex,
    quote: Regex,
}

impl TabStopFinder {
    pub fn new() -> ExpandResult<Self> {
        Ok(Self {
            bracket: Regex::new(BRACKET_PATTERN)?,
            quote: Regex::new(QUOTE_PATTERN)?,
        })
    }

    /// Every stop of `kind` in `text`, in document order
    pub fn candidates(&self, text: &str, kind: TabStopKind) -> Vec<Span> {
        match kind {
            TabStopKind::Bracket => self.bracket_candidates(text),
            TabStopKind::Quote => self.quote_candidates(text),
        }
    }

    /// Nearest stop of `kind` in `text` relative to `reference`
    pub fn find(
        &self,
        reference: Span,
        direction: Direction,
        text: &str,
        kind: TabStopKind,
    ) -> Option<Span> {
        let found = nearest(self.candidates(text, kind), reference, direction);
        trace!(%kind, ?direction, %reference, ?found, "scanned for tab stop");
        found
    }

    /// Nearest engine-supplied stop of `kind` relative to `reference`
    pub fn find_in_points(
        &self,
        reference: Span,
        direction: Direction,
        points: &[TabStopCandidate],
        kind: TabStopKind,
    ) -> Option<Span> {
        let mut spans: Vec<Span> = points
            .iter()
            .filter(|point| point.kind == kind)
            .map(|point| point.span)
            .collect();
        spans.sort_by_key(|span| span.start);
        nearest(spans, reference, direction)
    }

    fn bracket_candidates(&self, text: &str) -> Vec<Span> {
        let mut found = Vec::new();
        let mut at = 0;

        while at <= text.len() {
            let Some(caps) = self.bracket.captures_at(text, at) else {
                break;
            };
            let (Some(whole), Some(open), Some(content), Some(close)) =
                (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
            else {
                break;
            };

            if names_pair(open.as_str(), close.as_str()) {
                found.push(Span::new(content.start(), content.len()));
                at = whole.end();
            } else {
                // Mismatched closing tag: a later opening tag inside this
                // match may still pair up, so resume just past the '<'
                at = whole.start() + 1;
            }
        }

        found
    }

    fn quote_candidates(&self, text: &str) -> Vec<Span> {
        self.quote
            .captures_iter(text)
            .filter_map(|caps| caps.get(2))
            .map(|value| Span::new(value.start(), value.len()))
            .collect()
    }
}
