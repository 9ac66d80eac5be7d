//! Expansion command
//!
//! Ties the pipeline together: locate the abbreviation, expand it, replace
//! it inside one undo transaction, then move the caret to the first tab
//! stop. Each stage may decline, in which case the key goes back to the
//! host untouched.

use core::fmt;
use tracing::debug;

use crate::caret::CaretPlacer;
use crate::context::{AlwaysValid, ContextPredicate};
use crate::engine::{ExpansionEngine, GrammarEngine};
use crate::error::ExpandResult;
use crate::host::{Classifier, EditTransaction, NoReformat, Reformatter, TextHost};
use crate::key::Key;
use crate::locator::SpanLocator;
use crate::mutator::BufferMutator;
use crate::settings::ExpandSettings;
use crate::span::Span;
use crate::tab_stop::{Direction, TabStopCandidate, TabStopFinder};

/// Why the command left a key to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbortReason {
    /// A completion list is showing
    CompletionActive,
    /// Nothing to expand before the caret
    NoAbbreviationFound,
    /// Text is selected
    SelectionNotEmpty,
    /// The host vetoed the caret position
    InvalidContext,
    /// The grammar engine produced nothing
    ExpansionRejected,
    /// Backward navigation found no earlier stop
    NoTabStopFound,
    /// The key is not one the command consumes
    UnhandledKey,
}

impl AbortReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbortReason::CompletionActive => "completion active",
            AbortReason::NoAbbreviationFound => "no abbreviation found",
            AbortReason::SelectionNotEmpty => "selection not empty",
            AbortReason::InvalidContext => "invalid context",
            AbortReason::ExpansionRejected => "expansion rejected",
            AbortReason::NoTabStopFound => "no tab stop found",
            AbortReason::UnhandledKey => "unhandled key",
        }
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of routing one key through the command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// The key was consumed
    Handled,
    /// The host should process the key itself
    NotHandled(AbortReason),
}

impl ExpandOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, ExpandOutcome::Handled)
    }

    pub fn abort_reason(&self) -> Option<AbortReason> {
        match self {
            ExpandOutcome::Handled => None,
            ExpandOutcome::NotHandled(reason) => Some(*reason),
        }
    }
}

fn not_handled(reason: AbortReason) -> ExpandResult<ExpandOutcome> {
    debug!(%reason, "expansion not handled");
    Ok(ExpandOutcome::NotHandled(reason))
}

/// Abbreviation expansion command bound to one view
pub struct ExpandCommand<C, G, R = NoReformat, P = AlwaysValid> {
    settings: ExpandSettings,
    finder: TabStopFinder,
    classifier: C,
    grammar: G,
    reformatter: R,
    context: P,
}

impl<C, G> ExpandCommand<C, G>
where
    C: Classifier,
    G: GrammarEngine,
{
    /// Command with default settings, no reformatting and no context veto
    pub fn new(classifier: C, grammar: G) -> ExpandResult<Self> {
        Ok(Self {
            settings: ExpandSettings::default(),
            finder: TabStopFinder::new()?,
            classifier,
            grammar,
            reformatter: NoReformat,
            context: AlwaysValid,
        })
    }
}

impl<C, G, R, P> ExpandCommand<C, G, R, P>
where
    C: Classifier,
    G: GrammarEngine,
    R: Reformatter,
    P: ContextPredicate,
{
    pub fn with_settings(mut self, settings: ExpandSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_reformatter<R2: Reformatter>(self, reformatter: R2) -> ExpandCommand<C, G, R2, P> {
        ExpandCommand {
            settings: self.settings,
            finder: self.finder,
            classifier: self.classifier,
            grammar: self.grammar,
            reformatter,
            context: self.context,
        }
    }

    pub fn with_context<P2: ContextPredicate>(self, context: P2) -> ExpandCommand<C, G, R, P2> {
        ExpandCommand {
            settings: self.settings,
            finder: self.finder,
            classifier: self.classifier,
            grammar: self.grammar,
            reformatter: self.reformatter,
            context,
        }
    }

    pub fn settings(&self) -> &ExpandSettings {
        &self.settings
    }

    pub fn reformatter(&self) -> &R {
        &self.reformatter
    }

    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    /// Route a key. Tab expands, back-tab jumps to the previous stop,
    /// anything else passes through.
    pub fn exec<H: TextHost>(&mut self, key: Key, host: &mut H) -> ExpandResult<ExpandOutcome> {
        if !key.is_tab_stop_key() {
            return Ok(ExpandOutcome::NotHandled(AbortReason::UnhandledKey));
        }

        if key == Key::BackTab {
            return self.previous_tab_stop(host);
        }
        if host.is_completion_active() {
            return not_handled(AbortReason::CompletionActive);
        }
        self.expand(host)
    }

    /// Expand the abbreviation before the caret and move to its first stop
    pub fn expand<H: TextHost>(&mut self, host: &mut H) -> ExpandResult<ExpandOutcome> {
        let snapshot = host.current_snapshot();
        let caret = host.caret();

        let Some(abbreviation) = SpanLocator::new(&self.classifier).locate(&snapshot, caret) else {
            return not_handled(AbortReason::NoAbbreviationFound);
        };
        if !host.selection().is_empty() {
            return not_handled(AbortReason::SelectionNotEmpty);
        }
        if !self.context.is_valid_context(caret) {
            return not_handled(AbortReason::InvalidContext);
        }

        let Some(expansion) =
            ExpansionEngine::new(&self.grammar).expand(&abbreviation.text, self.settings.dialect)?
        else {
            return not_handled(AbortReason::ExpansionRejected);
        };

        debug!(
            abbreviation = %abbreviation.text,
            span = %abbreviation.span,
            "expanding abbreviation"
        );

        let mut tx = EditTransaction::begin(host, &self.settings.transaction_name)?;

        let selection =
            BufferMutator::replace(&mut *tx, &snapshot, abbreviation.span, &expansion.text)?;
        let inserted = Span::new(abbreviation.span.start, selection.length);

        if self.settings.format_after_expand {
            self.reformatter.format_selection(&mut *tx)?;
        }

        let current = tx.current_snapshot();
        let placer = CaretPlacer::new(&self.finder);
        match expansion.tab_stops.as_deref() {
            // Engine offsets stay valid only while the inserted text is untouched
            Some(points) if current.text_of(inserted) == Some(expansion.text.as_str()) => {
                // Points that cannot be shifted into the document are dropped
                let shifted: Vec<TabStopCandidate> = points
                    .iter()
                    .filter_map(|point| {
                        let span = point.span.checked_offset_by(inserted.start)?;
                        Some(TabStopCandidate::new(span, point.kind))
                    })
                    .collect();
                placer.place_at_points(&mut *tx, inserted, Direction::Forward, &shifted)?;
            }
            _ => {
                placer.place(&mut *tx, inserted, Direction::Forward, current.as_str())?;
            }
        }

        tx.clear_selection();
        tx.commit()?;
        Ok(ExpandOutcome::Handled)
    }

    /// Move the caret back to the nearest stop before it. Never edits.
    pub fn previous_tab_stop<H: TextHost>(&mut self, host: &mut H) -> ExpandResult<ExpandOutcome> {
        let snapshot = host.current_snapshot();
        let reference = Span::from_bounds(0, host.caret());

        let moved = CaretPlacer::new(&self.finder).place(
            host,
            reference,
            Direction::Backward,
            snapshot.as_str(),
        )?;

        if moved {
            Ok(ExpandOutcome::Handled)
        } else {
            not_handled(AbortReason::NoTabStopFound)
        }
    }
}
