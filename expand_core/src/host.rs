//! Host collaborator interfaces
//!
//! The core never owns a buffer. It talks to the editing surface through
//! [`TextHost`], asks a [`Classifier`] where syntax ends on the caret line,
//! and hands the freshly inserted text to a [`Reformatter`].

use core::ops::{Deref, DerefMut};

use tracing::debug;

use crate::error::{ExpandResult, HostError};
use crate::snapshot::TextSnapshot;
use crate::span::Span;

/// Editing surface the pipeline mutates
pub trait TextHost {
    /// Snapshot of the buffer as it is right now
    fn current_snapshot(&self) -> TextSnapshot;

    /// Caret offset in the current snapshot
    fn caret(&self) -> usize;

    /// Current selection; empty when nothing is selected
    fn selection(&self) -> Span;

    /// Replace `span` with `text` as a single edit
    fn replace(&mut self, span: Span, text: &str) -> Result<(), HostError>;

    fn select(&mut self, span: Span) -> Result<(), HostError>;

    fn clear_selection(&mut self);

    fn move_caret_to(&mut self, offset: usize) -> Result<(), HostError>;

    /// Open a named undo transaction
    fn begin_edit(&mut self, name: &str) -> Result<(), HostError>;

    /// Close the open transaction, keeping its edits as one undo unit
    fn commit_edit(&mut self) -> Result<(), HostError>;

    /// Discard the open transaction and every edit made inside it
    fn rollback_edit(&mut self);

    /// Whether a completion list is showing
    fn is_completion_active(&self) -> bool {
        false
    }
}

/// Syntax classification of a line
pub trait Classifier {
    /// Classified ranges inside `line`, in document order
    fn classification_spans(&self, snapshot: &TextSnapshot, line: Span) -> Vec<Span>;
}

/// Reformats the current selection after an expansion
pub trait Reformatter {
    fn format_selection(&mut self, host: &mut dyn TextHost) -> ExpandResult<()>;
}

/// Leaves the inserted text as the engine produced it
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReformat;

impl Reformatter for NoReformat {
    fn format_selection(&mut self, _host: &mut dyn TextHost) -> ExpandResult<()> {
        Ok(())
    }
}

/// Scoped undo transaction.
///
/// Dereferences to the host so edits go through the guard. Dropping the
/// guard without [`EditTransaction::commit`] rolls every edit back.
pub struct EditTransaction<'a, H: TextHost + ?Sized> {
    host: &'a mut H,
    name: String,
    completed: bool,
}

impl<'a, H: TextHost + ?Sized> EditTransaction<'a, H> {
    pub fn begin(host: &'a mut H, name: &str) -> Result<Self, HostError> {
        host.begin_edit(name)?;
        Ok(Self {
            host,
            name: name.to_string(),
            completed: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commit(mut self) -> Result<(), HostError> {
        let result = self.host.commit_edit();
        self.completed = result.is_ok();
        result
    }
}

impl<H: TextHost + ?Sized> Deref for EditTransaction<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: TextHost + ?Sized> DerefMut for EditTransaction<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: TextHost + ?Sized> Drop for EditTransaction<'_, H> {
    fn drop(&mut self) {
        if !self.completed {
            debug!(transaction = %self.name, "rolling back edit transaction");
            self.host.rollback_edit();
        }
    }
}
