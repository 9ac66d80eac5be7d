//! Table-driven grammar engine
//!
//! Stands in for a real abbreviation grammar: every abbreviation it knows
//! maps to a fixed expansion. Tables can be built in code or loaded from a
//! JSON object of `"abbreviation": "markup"` pairs.

use std::collections::BTreeMap;

use expand_core::{Dialect, ExpandError, ExpandResult, Expansion, GrammarEngine};

/// Abbreviation lookup table
#[derive(Debug, Clone, Default)]
pub struct TableGrammar {
    dialect: Dialect,
    rules: BTreeMap<String, Expansion>,
    failing: Vec<String>,
}

impl TableGrammar {
    /// Empty table answering for the HTML dialect
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of abbreviation -> markup
    pub fn from_json(json: &str) -> ExpandResult<Self> {
        let rules: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|e| ExpandError::Grammar(e.to_string()))?;

        Ok(Self {
            rules: rules
                .into_iter()
                .map(|(abbreviation, markup)| (abbreviation, Expansion::new(markup)))
                .collect(),
            ..Self::default()
        })
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_rule(mut self, abbreviation: &str, markup: &str) -> Self {
        self.rules
            .insert(abbreviation.to_string(), Expansion::new(markup));
        self
    }

    /// Rule whose expansion carries engine-tracked tab stops
    pub fn with_expansion(mut self, abbreviation: &str, expansion: Expansion) -> Self {
        self.rules.insert(abbreviation.to_string(), expansion);
        self
    }

    /// Make the engine fault on `abbreviation`
    pub fn failing_on(mut self, abbreviation: &str) -> Self {
        self.failing.push(abbreviation.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl GrammarEngine for TableGrammar {
    fn parse(&self, abbreviation: &str, dialect: Dialect) -> ExpandResult<Option<Expansion>> {
        if self.failing.iter().any(|a| a == abbreviation) {
            return Err(ExpandError::Grammar(format!(
                "cannot parse abbreviation '{}'",
                abbreviation
            )));
        }
        if dialect != self.dialect {
            return Ok(None);
        }
        Ok(self.rules.get(abbreviation).cloned())
    }
}
