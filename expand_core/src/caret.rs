//! Caret placement after an expansion

use tracing::{debug, trace};

use crate::error::HostError;
use crate::host::TextHost;
use crate::span::Span;
use crate::tab_stop::{Direction, TabStopCandidate, TabStopFinder, TabStopKind};

/// Choose between the nearest quote and bracket stops.
///
/// The bracket stop wins when it exists and either no quote stop exists or
/// it lies strictly closer in the scan direction.
pub fn tie_break(direction: Direction, quote: Option<Span>, bracket: Option<Span>) -> Option<Span> {
    match (quote, bracket) {
        (quote, None) => quote,
        (None, Some(bracket)) => Some(bracket),
        (Some(quote), Some(bracket)) => {
            let prefer_bracket = match direction {
                Direction::Forward => bracket.start < quote.start,
                Direction::Backward => bracket.start > quote.start,
            };
            if prefer_bracket {
                Some(bracket)
            } else {
                Some(quote)
            }
        }
    }
}

/// Where the caret lands for a chosen stop.
///
/// A stop inside `reference` is used as is. Otherwise forward scans fall
/// back to the end of `reference`; backward scans give up.
pub fn landing(reference: Span, direction: Direction, chosen: Option<Span>) -> Option<Span> {
    match chosen {
        Some(stop) if reference.contains(stop.start) => Some(stop),
        _ => match direction {
            Direction::Forward => Some(Span::at(reference.end())),
            Direction::Backward => None,
        },
    }
}

/// Moves the caret to the most useful tab stop
pub struct CaretPlacer<'f> {
    finder: &'f TabStopFinder,
}

impl<'f> CaretPlacer<'f> {
    pub fn new(finder: &'f TabStopFinder) -> Self {
        Self { finder }
    }

    /// Landing span found by scanning `text`
    pub fn target(&self, reference: Span, direction: Direction, text: &str) -> Option<Span> {
        let quote = self
            .finder
            .find(reference, direction, text, TabStopKind::Quote);
        let bracket = self
            .finder
            .find(reference, direction, text, TabStopKind::Bracket);
        landing(reference, direction, tie_break(direction, quote, bracket))
    }

    /// Landing span chosen among engine-supplied insertion points
    pub fn target_from_points(
        &self,
        reference: Span,
        direction: Direction,
        points: &[TabStopCandidate],
    ) -> Option<Span> {
        let quote = self
            .finder
            .find_in_points(reference, direction, points, TabStopKind::Quote);
        let bracket = self
            .finder
            .find_in_points(reference, direction, points, TabStopKind::Bracket);
        landing(reference, direction, tie_break(direction, quote, bracket))
    }

    /// Scan `text` and move the host caret. Returns whether the caret moved.
    pub fn place<H: TextHost + ?Sized>(
        &self,
        host: &mut H,
        reference: Span,
        direction: Direction,
        text: &str,
    ) -> Result<bool, HostError> {
        let target = self.target(reference, direction, text);
        Self::move_to(host, reference, direction, target)
    }

    /// Like [`CaretPlacer::place`] but with engine-supplied insertion points
    pub fn place_at_points<H: TextHost + ?Sized>(
        &self,
        host: &mut H,
        reference: Span,
        direction: Direction,
        points: &[TabStopCandidate],
    ) -> Result<bool, HostError> {
        let target = self.target_from_points(reference, direction, points);
        Self::move_to(host, reference, direction, target)
    }

    fn move_to<H: TextHost + ?Sized>(
        host: &mut H,
        reference: Span,
        direction: Direction,
        target: Option<Span>,
    ) -> Result<bool, HostError> {
        match target {
            Some(stop) => {
                trace!(%reference, ?direction, caret = stop.start, "placing caret");
                host.move_caret_to(stop.start)?;
                Ok(true)
            }
            None => {
                debug!(%reference, ?direction, "no tab stop in range");
                Ok(false)
            }
        }
    }
}
