//! Session report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matcher::FieldState;
use crate::model::{Column, QuizMode};
use crate::scorer::{current_tally, Tally};
use crate::session::{DisplaySession, RowKey};

/// A snapshot of one session, suitable for saving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Id of the session this report describes.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub mode: QuizMode,
    /// Number of rows displayed.
    pub row_count: usize,
    pub tally: Tally,
    /// Every editable field, row by row.
    pub fields: Vec<FieldReport>,
}

/// Outcome of one editable field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldReport {
    pub row: RowKey,
    pub infinitive: String,
    pub column: Column,
    pub text: String,
    pub state: FieldState,
    #[serde(default)]
    pub hint: Option<String>,
}

impl SessionReport {
    /// Snapshot `session`. `tally` should come from the last full check;
    /// without one the live tally is used.
    pub fn from_session(session: &DisplaySession, tally: Option<Tally>) -> Self {
        let fields = session
            .rows()
            .iter()
            .flat_map(|row| {
                row.fields.iter().map(move |field| FieldReport {
                    row: row.key.clone(),
                    infinitive: row.record.infinitive.clone(),
                    column: field.column,
                    text: field.text.clone(),
                    state: row.field_state(field),
                    hint: field.outcome.hint.clone(),
                })
            })
            .collect();

        Self {
            id: session.id,
            created_at: Utc::now(),
            mode: session.mode,
            row_count: session.len(),
            tally: tally.unwrap_or_else(|| current_tally(session)),
            fields,
        }
    }

    /// Fields that ended incorrect, for a "review these" list.
    pub fn misses(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields
            .iter()
            .filter(|f| f.state == FieldState::Incorrect)
    }

    /// File name used when saving into a directory.
    pub fn file_name(&self) -> String {
        format!(
            "session-{}-{}.json",
            self.created_at.format("%Y%m%dT%H%M%S"),
            self.mode
        )
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{VerbKind, VerbRecord};
    use crate::scorer::score_session;
    use crate::session::{build_session, SessionOptions};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn checked_session() -> (DisplaySession, Tally) {
        let verbs = vec![
            VerbRecord::new("go", "went", "gone", "ir", VerbKind::Irregular),
            VerbRecord::new("see", "saw", "seen", "ver", VerbKind::Irregular),
        ];
        let mut session = build_session(
            QuizMode::PastParticiple,
            &verbs,
            &SessionOptions::default(),
            &mut StdRng::seed_from_u64(3),
        );
        let go = session
            .field_ids()
            .find(|id| id.row.as_str().starts_with("go-"))
            .unwrap();
        session.commit(&go, "gone").unwrap();
        let tally = score_session(&mut session);
        (session, tally)
    }

    #[test]
    fn report_snapshot() {
        let (session, tally) = checked_session();
        let report = SessionReport::from_session(&session, Some(tally));
        assert_eq!(report.id, session.id);
        assert_eq!(report.mode, QuizMode::PastParticiple);
        assert_eq!(report.row_count, 2);
        assert_eq!(report.fields.len(), 2);
        assert_eq!(report.tally.credited(), 1);

        let misses: Vec<_> = report.misses().collect();
        assert_eq!(misses.len(), 1);
        assert_eq!(misses[0].infinitive, "see");
        assert_eq!(misses[0].hint.as_deref(), Some("seen"));
        assert!(report.file_name().ends_with("-past_participle.json"));
    }

    #[test]
    fn snapshot_without_tally_counts_only_typed_answers() {
        let (session, tally) = checked_session();
        let report = SessionReport::from_session(&session, None);
        assert_eq!(report.tally.answered, 1);
        assert_eq!(report.tally, tally);
    }

    #[test]
    fn save_and_load_json() {
        let (session, tally) = checked_session();
        let report = SessionReport::from_session(&session, Some(tally));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(report.file_name());
        report.save_json(&path).unwrap();

        let loaded = SessionReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.tally, report.tally);
        assert_eq!(loaded.fields[0].column, Column::PastParticiple);
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(SessionReport::load_json(Path::new("/no/such/report.json")).is_err());
    }
}
