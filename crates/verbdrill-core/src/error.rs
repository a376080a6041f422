//! Drill error types.
//!
//! These cover the few ways a drill event can fail to find what it refers
//! to. File and parse failures use `anyhow` instead.

use thiserror::Error;

use crate::model::Column;

/// Errors raised by the session manager, builder, and configuration.
#[derive(Debug, Error)]
pub enum DrillError {
    /// The requested quiz mode is not one of the known modes.
    #[error("unknown mode: {0}")]
    UnknownMode(String),

    /// No row in the current session has this key.
    #[error("no row with key {0} in the current session")]
    RowNotFound(String),

    /// The row exists but the column is not editable in it.
    #[error("row {row} has no editable {column} field")]
    FieldNotFound { row: String, column: Column },

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DrillError {
    /// Returns `true` for errors caused by a stale or malformed field/row
    /// reference rather than by user choices.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            DrillError::RowNotFound(_) | DrillError::FieldNotFound { .. }
        )
    }
}
