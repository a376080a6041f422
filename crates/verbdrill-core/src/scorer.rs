//! Session-wide scoring.
//!
//! A full check re-validates every editable field, forces fields that are
//! still empty into `incorrect` (with the accepted answer as hint), and
//! tallies the results. Revealed rows are counted separately and never earn
//! credit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matcher::{FieldState, MatchOutcome};
use crate::session::DisplaySession;

/// Counts produced by a full check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Fields matching the accepted answer exactly.
    pub correct: usize,
    /// Fields holding one of several accepted alternatives.
    pub partial: usize,
    /// Fields in revealed rows.
    pub revealed: usize,
    /// Fields with user-supplied, non-empty text (revealed rows excluded).
    pub answered: usize,
    /// All editable fields.
    pub total: usize,
}

impl Tally {
    /// Correct plus partial.
    pub fn credited(&self) -> usize {
        self.correct + self.partial
    }

    /// Fraction of all editable fields that earned credit.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.credited() as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Final check: {} of {} answers correct ({} answered, {} revealed).",
            self.credited(),
            self.total,
            self.answered,
            self.revealed
        )
    }
}

/// Run a full check over the session, updating every field's outcome.
pub fn score_session(session: &mut DisplaySession) -> Tally {
    let mut tally = Tally::default();
    let (matcher, rows) = session.parts_mut();

    for row in rows.iter_mut() {
        for field in row.fields.iter_mut() {
            tally.total += 1;
            if row.revealed {
                tally.revealed += 1;
                continue;
            }

            let accepted = row.record.cell(field.column);
            let outcome = matcher.classify(&field.text, accepted);
            match outcome.state {
                FieldState::Empty => {
                    field.outcome = MatchOutcome::incorrect(accepted);
                    continue;
                }
                FieldState::Correct => tally.correct += 1,
                FieldState::Partial => tally.partial += 1,
                FieldState::Incorrect | FieldState::Revealed => {}
            }
            tally.answered += 1;
            field.outcome = outcome;
        }
    }

    tracing::info!(
        "session {} checked: {}/{} credited, {} answered, {} revealed",
        session.id,
        tally.credited(),
        tally.total,
        tally.answered,
        tally.revealed
    );
    tally
}

/// Tally the session as it currently stands, without forcing empty fields.
///
/// A field counts as answered when its text holds at least one option, so
/// fields forced incorrect by a full check stay unanswered.
pub fn current_tally(session: &DisplaySession) -> Tally {
    let matcher = session.matcher();
    let mut tally = Tally::default();
    for row in session.rows() {
        for field in &row.fields {
            tally.total += 1;
            if row.revealed {
                tally.revealed += 1;
                continue;
            }
            match field.outcome.state {
                FieldState::Correct => tally.correct += 1,
                FieldState::Partial => tally.partial += 1,
                _ => {}
            }
            if !matcher.options(&field.text).is_empty() {
                tally.answered += 1;
            }
        }
    }
    tally
}
