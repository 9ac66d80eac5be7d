//! Grammar engine boundary
//!
//! The abbreviation grammar lives outside this crate. The core only decides
//! whether an engine result is usable.

use core::fmt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ExpandResult;
use crate::tab_stop::TabStopCandidate;

/// Markup dialect requested from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dialect {
    #[default]
    Html,
    Css,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Html => "html",
            Dialect::Css => "css",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Expanded markup
    pub text: String,
    /// Insertion points produced while generating `text`, offsets relative
    /// to the start of `text`, in document order. `None` when the engine
    /// does not track them.
    pub tab_stops: Option<Vec<TabStopCandidate>>,
}

impl Expansion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tab_stops: None,
        }
    }

    pub fn with_tab_stops(text: impl Into<String>, tab_stops: Vec<TabStopCandidate>) -> Self {
        Self {
            text: text.into(),
            tab_stops: Some(tab_stops),
        }
    }
}

impl From<&str> for Expansion {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Expansion {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Abbreviation grammar
pub trait GrammarEngine {
    /// Expand `abbreviation`. `Ok(None)` means "not an abbreviation".
    fn parse(&self, abbreviation: &str, dialect: Dialect) -> ExpandResult<Option<Expansion>>;
}

/// Pass-through to a [`GrammarEngine`] that filters unusable results
pub struct ExpansionEngine<'g, G: ?Sized> {
    grammar: &'g G,
}

impl<'g, G: GrammarEngine + ?Sized> ExpansionEngine<'g, G> {
    pub fn new(grammar: &'g G) -> Self {
        Self { grammar }
    }

    /// Expand `abbreviation`, `None` when no expansion is possible.
    /// Engine faults other than "no result" propagate.
    pub fn expand(&self, abbreviation: &str, dialect: Dialect) -> ExpandResult<Option<Expansion>> {
        let expansion = self
            .grammar
            .parse(abbreviation, dialect)?
            .filter(|expansion| !expansion.text.is_empty());

        if expansion.is_none() {
            debug!(abbreviation, %dialect, "grammar engine produced no expansion");
        }
        Ok(expansion)
    }
}
