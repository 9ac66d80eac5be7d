//! Fixed projection graph for context veto tests

use expand_core::{ProjectionGraph, Span};

/// Buffer made of embedded regions with known content types
#[derive(Debug, Clone, Default)]
pub struct StaticProjection {
    regions: Vec<(Span, String)>,
}

impl StaticProjection {
    /// A buffer that is not projected at all
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, span: Span, content_type: &str) -> Self {
        self.regions.push((span, content_type.to_string()));
        self
    }
}

impl ProjectionGraph for StaticProjection {
    fn source_content_types_at(&self, offset: usize) -> Vec<String> {
        // Carets map with predecessor affinity: the end of a region still
        // belongs to it
        self.regions
            .iter()
            .filter(|(span, _)| span.contains(offset) || (offset > span.start && offset == span.end()))
            .map(|(_, content_type)| content_type.clone())
            .collect()
    }
}
