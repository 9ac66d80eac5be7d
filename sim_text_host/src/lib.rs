//! # Simulated Text Host
//!
//! An in-memory implementation of every collaborator the expansion core
//! talks to, so the whole pipeline runs under `cargo test`.
//!
//! ## Purpose
//!
//! - Deterministic: no real editor, no UI thread, no timing
//! - Inspectable: text, caret, selection and undo history are all visible
//! - Faithful: undo transactions commit or roll back like a real editor's
//!
//! ## Pieces
//!
//! - [`SimTextHost`]: buffer, caret, selection and named undo history
//! - [`MarkupClassifier`]: classifies tags so abbreviations start after them
//! - [`TableGrammar`]: abbreviation lookup table standing in for a grammar
//! - [`RecordingReformatter`] / [`TagPerLineReformatter`]: reformatters
//! - [`StaticProjection`]: embedded-language regions for veto tests

pub mod classifier;
pub mod grammar;
pub mod host;
pub mod projection;
pub mod reformat;
pub mod snapshot;

pub use classifier::{MarkupClassifier, PlainClassifier};
pub use grammar::TableGrammar;
pub use host::{SimTextHost, TransactionId, UndoEntry};
pub use projection::StaticProjection;
pub use reformat::{RecordingReformatter, TagPerLineReformatter};
pub use snapshot::HostSnapshot;
