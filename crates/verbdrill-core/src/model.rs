//! Core data model types for verbdrill.
//!
//! These are the reference types the whole drill works from: verb records,
//! the columns of the verb table, and the quiz modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single reference entry of the verb table.
///
/// Each of the four answer cells may encode several accepted answers
/// separated by a delimiter (e.g. `"was/were"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerbRecord {
    /// Base form, e.g. "go".
    pub infinitive: String,
    /// Past simple form(s), e.g. "went".
    pub past_simple: String,
    /// Past participle form(s), e.g. "gone".
    pub past_participle: String,
    /// Translation(s) into the learner's language.
    pub translation: String,
    /// Whether the verb is regular or irregular.
    #[serde(rename = "type")]
    pub kind: VerbKind,
}

impl VerbRecord {
    pub fn new(
        infinitive: impl Into<String>,
        past_simple: impl Into<String>,
        past_participle: impl Into<String>,
        translation: impl Into<String>,
        kind: VerbKind,
    ) -> Self {
        Self {
            infinitive: infinitive.into(),
            past_simple: past_simple.into(),
            past_participle: past_participle.into(),
            translation: translation.into(),
            kind,
        }
    }

    /// The raw text of a cell, exactly as stored.
    pub fn cell(&self, column: Column) -> &str {
        match column {
            Column::Infinitive => &self.infinitive,
            Column::PastSimple => &self.past_simple,
            Column::PastParticiple => &self.past_participle,
            Column::Translation => &self.translation,
            Column::Type => self.kind.as_str(),
        }
    }
}

/// Regular or irregular conjugation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbKind {
    Regular,
    Irregular,
}

impl VerbKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerbKind::Regular => "regular",
            VerbKind::Irregular => "irregular",
        }
    }
}

impl fmt::Display for VerbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerbKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(VerbKind::Regular),
            "irregular" => Ok(VerbKind::Irregular),
            other => Err(format!("unknown verb type: {other}")),
        }
    }
}

/// A column of the verb table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Infinitive,
    PastSimple,
    PastParticiple,
    Translation,
    Type,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 5] = [
        Column::Infinitive,
        Column::PastSimple,
        Column::PastParticiple,
        Column::Translation,
        Column::Type,
    ];

    /// Columns that can be blanked out and answered. `Type` never is.
    pub const ANSWERABLE: [Column; 4] = [
        Column::Infinitive,
        Column::PastSimple,
        Column::PastParticiple,
        Column::Translation,
    ];

    /// Zero-based position in the table.
    pub fn index(&self) -> usize {
        match self {
            Column::Infinitive => 0,
            Column::PastSimple => 1,
            Column::PastParticiple => 2,
            Column::Translation => 3,
            Column::Type => 4,
        }
    }

    /// Human-readable header, used for labels and prompts.
    pub fn header_name(&self) -> &'static str {
        match self {
            Column::Infinitive => "Infinitive",
            Column::PastSimple => "Past Simple",
            Column::PastParticiple => "Past Participle",
            Column::Translation => "Translation",
            Column::Type => "Type",
        }
    }

    pub fn is_answerable(&self) -> bool {
        !matches!(self, Column::Type)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Infinitive => write!(f, "infinitive"),
            Column::PastSimple => write!(f, "past_simple"),
            Column::PastParticiple => write!(f, "past_participle"),
            Column::Translation => write!(f, "translation"),
            Column::Type => write!(f, "type"),
        }
    }
}

/// Which cells of each row get blanked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    /// Each answerable column is blanked independently at random.
    Random,
    Infinitive,
    PastSimple,
    PastParticiple,
    Translation,
}

impl QuizMode {
    pub const ALL: [QuizMode; 5] = [
        QuizMode::Random,
        QuizMode::Infinitive,
        QuizMode::PastSimple,
        QuizMode::PastParticiple,
        QuizMode::Translation,
    ];

    /// The single column a targeted mode blanks out; `None` for `Random`.
    pub fn target_column(&self) -> Option<Column> {
        match self {
            QuizMode::Random => None,
            QuizMode::Infinitive => Some(Column::Infinitive),
            QuizMode::PastSimple => Some(Column::PastSimple),
            QuizMode::PastParticiple => Some(Column::PastParticiple),
            QuizMode::Translation => Some(Column::Translation),
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::Random => write!(f, "random"),
            QuizMode::Infinitive => write!(f, "infinitive"),
            QuizMode::PastSimple => write!(f, "past_simple"),
            QuizMode::PastParticiple => write!(f, "past_participle"),
            QuizMode::Translation => write!(f, "translation"),
        }
    }
}

impl FromStr for QuizMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "random" => Ok(QuizMode::Random),
            "infinitive" => Ok(QuizMode::Infinitive),
            "past_simple" => Ok(QuizMode::PastSimple),
            "past_participle" => Ok(QuizMode::PastParticiple),
            "translation" => Ok(QuizMode::Translation),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// A named collection of verb records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerbList {
    /// Unique identifier for this list.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this list.
    #[serde(default)]
    pub description: String,
    /// The verbs, in source order.
    #[serde(default)]
    pub verbs: Vec<VerbRecord>,
}
