//! Answer matching.
//!
//! Classifies a user's text against a delimiter-encoded accepted answer
//! such as `"was/were"`. Both sides are normalized the same way: lowercased,
//! split on the delimiters, trimmed, empty parts dropped, and rejoined with
//! `/`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Delimiters recognized when no configuration overrides them.
pub const DEFAULT_DELIMITERS: [char; 2] = ['/', ','];

/// Separator used when rejoining normalized options.
pub const CANONICAL_SEPARATOR: &str = "/";

/// Validation state of one editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    /// Nothing entered yet. Not scored until a full check.
    Empty,
    Correct,
    /// One of several accepted alternatives was given.
    Partial,
    Incorrect,
    /// The row was revealed; never credited.
    Revealed,
}

impl FieldState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldState::Empty => "empty",
            FieldState::Correct => "correct",
            FieldState::Partial => "partial",
            FieldState::Incorrect => "incorrect",
            FieldState::Revealed => "revealed",
        }
    }

    /// Whether this state earns credit in the session tally.
    pub fn is_credited(&self) -> bool {
        matches!(self, FieldState::Correct | FieldState::Partial)
    }
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub state: FieldState,
    /// For `Incorrect`, the accepted answer as stored. For `Partial`, the
    /// alternatives the user did not give.
    #[serde(default)]
    pub hint: Option<String>,
}

impl MatchOutcome {
    pub fn empty() -> Self {
        Self {
            state: FieldState::Empty,
            hint: None,
        }
    }

    /// An incorrect outcome whose hint is the raw accepted answer.
    pub fn incorrect(accepted: &str) -> Self {
        let hint = if accepted.trim().is_empty() {
            None
        } else {
            Some(accepted.to_string())
        };
        Self {
            state: FieldState::Incorrect,
            hint,
        }
    }

    /// An incorrect outcome with nothing to show, used when the accepted
    /// answer itself could not be found.
    pub fn unresolved() -> Self {
        Self {
            state: FieldState::Incorrect,
            hint: None,
        }
    }
}

/// Normalizes and compares answers using a fixed set of delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    delimiters: Vec<char>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            delimiters: DEFAULT_DELIMITERS.to_vec(),
        }
    }
}

impl Matcher {
    /// Build a matcher for the given delimiters. An empty slice falls back
    /// to `/` alone.
    pub fn new(delimiters: &[char]) -> Self {
        let mut unique: Vec<char> = Vec::with_capacity(delimiters.len());
        for &d in delimiters {
            if !unique.contains(&d) {
                unique.push(d);
            }
        }
        if unique.is_empty() {
            unique.push('/');
        }
        Self { delimiters: unique }
    }

    pub fn delimiters(&self) -> &[char] {
        &self.delimiters
    }

    /// Split `text` into its normalized options, in order. Repeated options
    /// are kept.
    pub fn options(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| self.delimiters.contains(&c))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Canonical form of `text`: its options joined with `/`.
    pub fn normalize(&self, text: &str) -> String {
        self.options(text).join(CANONICAL_SEPARATOR)
    }

    /// Classify `input` against `accepted`.
    ///
    /// - same canonical form → `Correct`
    /// - a single option out of several → `Partial`, hint = the rest
    /// - nothing usable in `input` → `Empty`
    /// - anything else → `Incorrect`, hint = `accepted` verbatim
    pub fn classify(&self, input: &str, accepted: &str) -> MatchOutcome {
        let given = self.options(input);
        if given.is_empty() {
            return MatchOutcome::empty();
        }

        let expected = self.options(accepted);
        if given == expected {
            return MatchOutcome {
                state: FieldState::Correct,
                hint: None,
            };
        }

        if expected.len() > 1 && given.len() == 1 {
            if let Some(pos) = expected.iter().position(|o| *o == given[0]) {
                let remaining: Vec<&str> = expected
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != pos)
                    .map(|(_, o)| o.as_str())
                    .collect();
                return MatchOutcome {
                    state: FieldState::Partial,
                    hint: Some(remaining.join(CANONICAL_SEPARATOR)),
                };
            }
        }

        MatchOutcome::incorrect(accepted)
    }
}
