//! In-memory text host with a named-transaction undo history

use core::fmt;
use expand_core::{HostError, Span, TextHost, TextSnapshot};
use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

use crate::snapshot::HostSnapshot;

/// Undo history is capped at this many entries
const MAX_UNDO_STACK: usize = 100;

/// Unique identifier for an edit transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transaction({})", self.0)
    }
}

/// Text, caret and selection at one moment
#[derive(Debug, Clone, PartialEq, Eq)]
struct BufferState {
    text: String,
    caret: usize,
    selection: Span,
}

/// One undoable unit
#[derive(Debug, Clone)]
pub struct UndoEntry {
    pub id: TransactionId,
    pub name: String,
    before: BufferState,
}

/// Transaction currently collecting edits
#[derive(Debug, Clone)]
struct OpenEdit {
    id: TransactionId,
    name: String,
    before: BufferState,
}

/// Simulated editor view over a single buffer
#[derive(Debug, Clone)]
pub struct SimTextHost {
    text: String,
    version: u64,
    caret: usize,
    selection: Span,
    completion_active: bool,
    open_edit: Option<OpenEdit>,
    undo_stack: Vec<UndoEntry>,
    redo_stack: Vec<UndoEntry>,
}

impl SimTextHost {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            version: 0,
            caret: 0,
            selection: Span::EMPTY,
            completion_active: false,
            open_edit: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Host whose caret sits right after `text`, as if it was just typed
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut host = Self::new();
        host.text = text.into();
        host.caret = host.text.len();
        host.selection = Span::at(host.caret);
        host
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn set_caret(&mut self, offset: usize) -> Result<(), HostError> {
        self.move_caret_to(offset)
    }

    pub fn set_completion_active(&mut self, active: bool) {
        self.completion_active = active;
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Name of the most recent undoable unit
    pub fn last_undo_name(&self) -> Option<&str> {
        self.undo_stack.last().map(|entry| entry.name.as_str())
    }

    pub fn is_edit_open(&self) -> bool {
        self.open_edit.is_some()
    }

    /// Complete state for parity checks
    pub fn snapshot(&self) -> HostSnapshot {
        HostSnapshot {
            text: self.text.clone(),
            caret: self.caret,
            selection: self.selection,
            undo_depth: self.undo_stack.len(),
            redo_depth: self.redo_stack.len(),
        }
    }

    /// Undo the last unit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.undo_stack.pop() else {
            return false;
        };

        let current = self.state();
        self.restore(entry.before.clone());
        self.redo_stack.push(UndoEntry {
            before: current,
            ..entry
        });
        true
    }

    /// Redo the last undone unit
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            return false;
        };

        let current = self.state();
        self.restore(entry.before.clone());
        self.undo_stack.push(UndoEntry {
            before: current,
            ..entry
        });
        true
    }

    fn state(&self) -> BufferState {
        BufferState {
            text: self.text.clone(),
            caret: self.caret,
            selection: self.selection,
        }
    }

    fn restore(&mut self, state: BufferState) {
        if state.text != self.text {
            self.version += 1;
        }
        self.text = state.text;
        self.caret = state.caret;
        self.selection = state.selection;
    }

    fn push_undo(&mut self, entry: UndoEntry) {
        self.undo_stack.push(entry);
        self.redo_stack.clear();

        if self.undo_stack.len() > MAX_UNDO_STACK {
            self.undo_stack.remove(0);
        }
    }

    fn check_span(&self, span: Span) -> Result<(), HostError> {
        if span.end() > self.text.len() {
            return Err(HostError::OffsetOutOfRange {
                span,
                len: self.text.len(),
            });
        }
        self.check_offset(span.start)?;
        self.check_offset(span.end())
    }

    fn check_offset(&self, offset: usize) -> Result<(), HostError> {
        if offset > self.text.len() {
            return Err(HostError::OffsetOutOfRange {
                span: Span::at(offset),
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(HostError::NotCharBoundary(offset));
        }
        Ok(())
    }
}

impl Default for SimTextHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TextHost for SimTextHost {
    fn current_snapshot(&self) -> TextSnapshot {
        TextSnapshot::with_version(self.text.as_str(), self.version)
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn selection(&self) -> Span {
        self.selection
    }

    fn replace(&mut self, span: Span, text: &str) -> Result<(), HostError> {
        self.check_span(span)?;

        // Edits outside a transaction are their own undo unit
        let before = self.open_edit.is_none().then(|| self.state());

        self.text.replace_range(span.start..span.end(), text);
        self.version += 1;
        self.caret = span.start + text.len();
        self.selection = Span::at(self.caret);
        trace!(%span, inserted = text.len(), version = self.version, "buffer replaced");

        if let Some(before) = before {
            self.push_undo(UndoEntry {
                id: TransactionId::new(),
                name: "Replace".to_string(),
                before,
            });
        }
        Ok(())
    }

    fn select(&mut self, span: Span) -> Result<(), HostError> {
        self.check_span(span)?;
        self.selection = span;
        self.caret = span.end();
        Ok(())
    }

    fn clear_selection(&mut self) {
        self.selection = Span::at(self.caret);
    }

    fn move_caret_to(&mut self, offset: usize) -> Result<(), HostError> {
        self.check_offset(offset)?;
        self.caret = offset;
        self.selection = Span::at(offset);
        Ok(())
    }

    fn begin_edit(&mut self, name: &str) -> Result<(), HostError> {
        if let Some(open) = &self.open_edit {
            return Err(HostError::EditAlreadyOpen(open.name.clone()));
        }

        let id = TransactionId::new();
        trace!(%id, name, "edit transaction opened");
        self.open_edit = Some(OpenEdit {
            id,
            name: name.to_string(),
            before: self.state(),
        });
        Ok(())
    }

    fn commit_edit(&mut self) -> Result<(), HostError> {
        let open = self.open_edit.take().ok_or(HostError::NoActiveEdit)?;
        trace!(id = %open.id, name = %open.name, "edit transaction committed");

        if open.before.text != self.text {
            self.push_undo(UndoEntry {
                id: open.id,
                name: open.name,
                before: open.before,
            });
        }
        Ok(())
    }

    fn rollback_edit(&mut self) {
        if let Some(open) = self.open_edit.take() {
            trace!(id = %open.id, name = %open.name, "edit transaction rolled back");
            self.restore(open.before);
        }
    }

    fn is_completion_active(&self) -> bool {
        self.completion_active
    }
}
