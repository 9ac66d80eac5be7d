//! Markup classifier
//!
//! Classifies complete tags (`<...>`) on a line. The abbreviation locator
//! uses the end of the last tag as the left edge of the abbreviation.

use expand_core::{Classifier, Span, TextSnapshot};
use regex::Regex;

/// Classifies markup tags
#[derive(Debug, Clone)]
pub struct MarkupClassifier {
    tag: Regex,
}

impl MarkupClassifier {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            tag: Regex::new(r"<[^<>]*>")?,
        })
    }
}

impl Classifier for MarkupClassifier {
    fn classification_spans(&self, snapshot: &TextSnapshot, line: Span) -> Vec<Span> {
        let Some(text) = snapshot.text_of(line) else {
            return Vec::new();
        };

        self.tag
            .find_iter(text)
            .map(|m| Span::new(line.start + m.start(), m.len()))
            .collect()
    }
}

/// Classifies nothing, so the abbreviation extends to the line start
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainClassifier;

impl Classifier for PlainClassifier {
    fn classification_spans(&self, _snapshot: &TextSnapshot, _line: Span) -> Vec<Span> {
        Vec::new()
    }
}
