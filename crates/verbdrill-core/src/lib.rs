//! verbdrill-core — answer matching, session building, and scoring.
//!
//! This crate defines the verb data model, the answer matcher, display
//! sessions with their reveal action, the session scorer, and the session
//! manager that front ends drive through explicit events.

pub mod config;
pub mod error;
pub mod manager;
pub mod matcher;
pub mod model;
pub mod parser;
pub mod report;
pub mod scorer;
pub mod session;
pub mod verbs;

pub use error::DrillError;
pub use manager::{QuizManager, Status};
pub use matcher::{FieldState, MatchOutcome, Matcher};
