//! Reformatters for the simulated host

use expand_core::{ExpandError, ExpandResult, Reformatter, Span, TextHost};

/// Counts invocations and can be told to fail
#[derive(Debug, Clone, Default)]
pub struct RecordingReformatter {
    calls: usize,
    seen: Vec<Span>,
    fail: bool,
}

impl RecordingReformatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Selections the reformatter was asked to format
    pub fn seen(&self) -> &[Span] {
        &self.seen
    }
}

impl Reformatter for RecordingReformatter {
    fn format_selection(&mut self, host: &mut dyn TextHost) -> ExpandResult<()> {
        self.calls += 1;
        self.seen.push(host.selection());
        if self.fail {
            return Err(ExpandError::Reformat("formatter unavailable".to_string()));
        }
        Ok(())
    }
}

/// Breaks the selection so every tag pair starts on its own line
#[derive(Debug, Clone, Copy, Default)]
pub struct TagPerLineReformatter;

impl Reformatter for TagPerLineReformatter {
    fn format_selection(&mut self, host: &mut dyn TextHost) -> ExpandResult<()> {
        let selection = host.selection();
        let snapshot = host.current_snapshot();
        let Some(text) = snapshot.text_of(selection) else {
            return Ok(());
        };

        let formatted = text.replace("><", ">\n<");
        if formatted == text {
            return Ok(());
        }

        host.replace(selection, &formatted)?;
        host.select(Span::new(selection.start, formatted.len()))?;
        Ok(())
    }
}
