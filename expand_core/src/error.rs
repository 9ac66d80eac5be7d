//! Error types
//!
//! Only genuine faults live here. The ordinary ways an expansion declines to
//! run (no abbreviation, non-empty selection, rejected expansion, ...) are
//! reported through [`crate::ExpandOutcome`] instead.

use thiserror::Error;

use crate::settings::SettingsError;
use crate::span::Span;

/// Faults raised by a [`crate::TextHost`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("Span {span} is outside the buffer (length {len})")]
    OffsetOutOfRange { span: Span, len: usize },

    #[error("Offset {0} is not on a character boundary")]
    NotCharBoundary(usize),

    #[error("Snapshot version {expected} is stale (buffer is at version {actual})")]
    StaleSnapshot { expected: u64, actual: u64 },

    #[error("No edit transaction is open")]
    NoActiveEdit,

    #[error("Edit transaction '{0}' is already open")]
    EditAlreadyOpen(String),
}

/// Expansion pipeline error
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("Invalid tab stop pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Grammar engine failed: {0}")]
    Grammar(String),

    #[error("Reformat failed: {0}")]
    Reformat(String),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Expansion result
pub type ExpandResult<T> = Result<T, ExpandError>;
