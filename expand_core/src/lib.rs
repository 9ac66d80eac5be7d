//! # Expand Core
//!
//! Abbreviation expansion and tab stop navigation for markup editors.
//!
//! ## Philosophy
//!
//! - **Host agnostic**: The buffer, classifier, grammar and formatter are traits
//! - **Deterministic**: Same snapshot and caret => same edit and caret target
//! - **Atomic**: An expansion is one undo unit or nothing at all
//! - **Explicit absence**: "No tab stop" is `None`, never a zero-length span at 0
//!
//! ## Design
//!
//! One keypress runs a short pipeline:
//! - SpanLocator: finds the abbreviation before the caret
//! - ExpansionEngine: asks the grammar engine for markup
//! - BufferMutator: replaces the abbreviation inside an EditTransaction
//! - TabStopFinder: scans for element content and empty attribute values
//! - CaretPlacer: picks the nearest stop, with a forward fallback
//!
//! Any stage may decline; the key then goes back to the host untouched.

pub mod caret;
pub mod command;
pub mod context;
pub mod engine;
pub mod error;
pub mod host;
pub mod key;
pub mod locator;
pub mod mutator;
pub mod settings;
pub mod snapshot;
pub mod span;
pub mod tab_stop;

pub use caret::CaretPlacer;
pub use command::{AbortReason, ExpandCommand, ExpandOutcome};
pub use context::{AlwaysValid, ContextPredicate, ProjectionGraph, ProjectionVeto};
pub use engine::{Dialect, Expansion, ExpansionEngine, GrammarEngine};
pub use error::{ExpandError, ExpandResult, HostError};
pub use host::{Classifier, EditTransaction, NoReformat, Reformatter, TextHost};
pub use key::Key;
pub use locator::{AbbreviationSpan, SpanLocator};
pub use mutator::BufferMutator;
pub use settings::{ExpandSettings, SettingsError};
pub use snapshot::TextSnapshot;
pub use span::Span;
pub use tab_stop::{Direction, TabStopCandidate, TabStopFinder, TabStopKind};
