//! Host context veto
//!
//! A host composed of several embedded languages can refuse expansion at a
//! caret that sits inside a foreign region, such as server-side code inside
//! markup. A vetoed context is treated exactly like "no abbreviation".

use tracing::trace;

use crate::settings::ExpandSettings;

/// Decides whether expansion may run at a caret offset
pub trait ContextPredicate {
    fn is_valid_context(&self, caret: usize) -> bool;
}

impl<F> ContextPredicate for F
where
    F: Fn(usize) -> bool,
{
    fn is_valid_context(&self, caret: usize) -> bool {
        self(caret)
    }
}

/// Accepts every caret position
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl ContextPredicate for AlwaysValid {
    fn is_valid_context(&self, _caret: usize) -> bool {
        true
    }
}

/// Buffer composed of embedded source buffers
pub trait ProjectionGraph {
    /// Content types of every source buffer that maps `offset`.
    /// A plain, non-projected buffer returns an empty list.
    fn source_content_types_at(&self, offset: usize) -> Vec<String>;
}

/// Vetoes carets that map into a source buffer whose content type is not
/// on the allow list
#[derive(Debug, Clone)]
pub struct ProjectionVeto<G> {
    graph: G,
    allowed: Vec<String>,
}

impl<G: ProjectionGraph> ProjectionVeto<G> {
    pub fn new(graph: G, allowed: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            graph,
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Veto allowing the content types listed in `settings`
    pub fn from_settings(graph: G, settings: &ExpandSettings) -> Self {
        Self::new(graph, settings.allowed_content_types.iter().cloned())
    }

    fn is_allowed(&self, content_type: &str) -> bool {
        self.allowed
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
    }
}

impl<G: ProjectionGraph> ContextPredicate for ProjectionVeto<G> {
    fn is_valid_context(&self, caret: usize) -> bool {
        let foreign = self
            .graph
            .source_content_types_at(caret)
            .into_iter()
            .find(|content_type| !self.is_allowed(content_type));

        match foreign {
            Some(content_type) => {
                trace!(caret, content_type = %content_type, "caret inside foreign region");
                false
            }
            None => true,
        }
    }
}
