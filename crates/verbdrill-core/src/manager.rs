//! The quiz session manager: the event interface a front end drives.
//!
//! A front end reports three kinds of events (a field was committed, a row
//! reveal was requested, a full check was requested) and starts a new
//! session whenever the user picks a mode. Each event runs to completion;
//! starting a session replaces the previous one outright.

use std::fmt;

use rand::Rng;

use crate::error::DrillError;
use crate::matcher::MatchOutcome;
use crate::model::{QuizMode, VerbRecord};
use crate::scorer::{score_session, Tally};
use crate::session::{build_session, DisplaySession, FieldId, RowKey, SessionOptions};

/// Status line shown next to the table.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// Nothing has been started yet.
    Idle,
    /// A session is running.
    Started { mode: QuizMode, fields: usize },
    /// The last requested mode was unknown, or a check was requested
    /// without a session.
    NoActiveSession,
    /// The session has no editable fields.
    NothingToCheck,
    /// A full check ran.
    Checked(Tally),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "Select a mode to start."),
            Status::Started { mode, fields } => write!(
                f,
                "Mode {mode}: fill in the {fields} blank cells. Each answer is checked as you leave it."
            ),
            Status::NoActiveSession => write!(f, "No active session. Select a mode to start."),
            Status::NothingToCheck => write!(f, "Nothing to check: this session has no blank cells."),
            Status::Checked(tally) => write!(f, "{tally}"),
        }
    }
}

/// Owns the verb list, the random source, and the current session.
pub struct QuizManager<R: Rng> {
    verbs: Vec<VerbRecord>,
    options: SessionOptions,
    rng: R,
    session: Option<DisplaySession>,
    status: Status,
}

impl<R: Rng> QuizManager<R> {
    pub fn new(verbs: Vec<VerbRecord>, options: SessionOptions, rng: R) -> Self {
        Self {
            verbs,
            options,
            rng,
            session: None,
            status: Status::Idle,
        }
    }

    pub fn session(&self) -> Option<&DisplaySession> {
        self.session.as_ref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn verbs(&self) -> &[VerbRecord] {
        &self.verbs
    }

    /// Start a session for a mode given by name.
    ///
    /// An unknown name drops the current session and leaves the manager with
    /// no active session.
    pub fn start(&mut self, mode: &str) -> Result<&DisplaySession, DrillError> {
        match mode.parse::<QuizMode>() {
            Ok(mode) => Ok(self.start_mode(mode)),
            Err(_) => {
                tracing::warn!("unknown mode requested: {mode}");
                self.session = None;
                self.status = Status::NoActiveSession;
                Err(DrillError::UnknownMode(mode.to_string()))
            }
        }
    }

    /// Start a session for an already-parsed mode.
    pub fn start_mode(&mut self, mode: QuizMode) -> &DisplaySession {
        let session = build_session(mode, &self.verbs, &self.options, &mut self.rng);
        self.status = Status::Started {
            mode,
            fields: session.field_count(),
        };
        self.session.insert(session)
    }

    /// A field lost focus with `text` in it.
    ///
    /// Lookup failures never propagate: the field is reported as incorrect
    /// and the miss is logged.
    pub fn on_field_committed(&mut self, field: &FieldId, text: &str) -> MatchOutcome {
        let Some(session) = self.session.as_mut() else {
            tracing::error!("field {field} committed with no active session");
            return MatchOutcome::unresolved();
        };
        match session.commit(field, text) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("cannot check field {field}: {e}");
                MatchOutcome::unresolved()
            }
        }
    }

    /// The reveal action of a row was used. Returns `true` if the row was
    /// revealed by this call.
    pub fn on_reveal_requested(&mut self, row: &RowKey) -> bool {
        let Some(session) = self.session.as_mut() else {
            tracing::error!("reveal of {row} requested with no active session");
            return false;
        };
        match session.reveal_row(row) {
            Ok(changed) => changed,
            Err(e) => {
                tracing::error!("cannot reveal row: {e}");
                false
            }
        }
    }

    /// Check every field of the session. Returns `None` when there is no
    /// session or nothing to check.
    pub fn on_check_all_requested(&mut self) -> Option<Tally> {
        let Some(session) = self.session.as_mut() else {
            self.status = Status::NoActiveSession;
            return None;
        };
        if session.field_count() == 0 {
            self.status = Status::NothingToCheck;
            return None;
        }
        let tally = score_session(session);
        self.status = Status::Checked(tally);
        Some(tally)
    }
}
