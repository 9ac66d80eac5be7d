//! Host snapshot for deterministic parity testing

use expand_core::Span;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Complete host state snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub text: String,
    pub caret: usize,
    pub selection: Span,
    pub undo_depth: usize,
    pub redo_depth: usize,
}

impl HostSnapshot {
    /// Deterministic hash of the snapshot, for fast "nothing changed" checks
    pub fn hash(&self) -> u64 {
        let mut hasher = Sha256::new();

        hasher.update(self.text.as_bytes());
        hasher.update(b"\0");
        hasher.update(self.caret.to_le_bytes());
        hasher.update(self.selection.start.to_le_bytes());
        hasher.update(self.selection.length.to_le_bytes());
        hasher.update(self.undo_depth.to_le_bytes());
        hasher.update(self.redo_depth.to_le_bytes());

        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        u64::from_le_bytes(bytes)
    }
}
