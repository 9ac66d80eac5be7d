//! Replacing the abbreviation with its expansion

use tracing::trace;

use crate::error::HostError;
use crate::host::TextHost;
use crate::snapshot::TextSnapshot;
use crate::span::Span;

/// Performs the single replace-and-select edit of an expansion
pub struct BufferMutator;

impl BufferMutator {
    /// Replace `span` (taken from `snapshot`) with `text` and select exactly
    /// the inserted range. Returns the host's selection afterwards.
    pub fn replace<H: TextHost + ?Sized>(
        host: &mut H,
        snapshot: &TextSnapshot,
        span: Span,
        text: &str,
    ) -> Result<Span, HostError> {
        let actual = host.current_snapshot().version();
        if actual != snapshot.version() {
            return Err(HostError::StaleSnapshot {
                expected: snapshot.version(),
                actual,
            });
        }
        if snapshot.text_of(span).is_none() {
            return Err(HostError::OffsetOutOfRange {
                span,
                len: snapshot.len(),
            });
        }

        host.replace(span, text)?;
        host.select(Span::new(span.start, text.len()))?;

        let selection = host.selection();
        trace!(%span, %selection, "replaced abbreviation");
        Ok(selection)
    }
}
