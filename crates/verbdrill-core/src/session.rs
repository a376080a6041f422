//! Display sessions: shuffling, the per-cell render plan, field commits,
//! and the reveal action.

use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::DrillConfig;
use crate::error::DrillError;
use crate::matcher::{FieldState, MatchOutcome, Matcher};
use crate::model::{Column, QuizMode, VerbRecord};

/// Probability of blanking a column in random mode when nothing else is
/// configured.
pub const DEFAULT_EDIT_PROBABILITY: f64 = 0.4;

/// Key of a displayed row: `<infinitive>-<display index>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(String);

impl RowKey {
    pub fn new(infinitive: &str, display_index: usize) -> Self {
        Self(format!("{infinitive}-{display_index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RowKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Address of one editable cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldId {
    pub row: RowKey,
    pub column: Column,
}

impl FieldId {
    pub fn new(row: RowKey, column: Column) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// An editable cell and its latest validation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub column: Column,
    /// Text as the user last entered it.
    pub text: String,
    pub outcome: MatchOutcome,
}

impl Field {
    fn blank(column: Column) -> Self {
        Self {
            column,
            text: String::new(),
            outcome: MatchOutcome::empty(),
        }
    }
}

/// How one cell of a row is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// Plain text from the verb record.
    Text(&'a str),
    /// An input box.
    Input { field: &'a Field, state: FieldState },
    /// The type column: shows the verb type and carries the reveal action.
    Reveal { label: &'a str, revealed: bool },
}

/// One row of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayRow {
    pub key: RowKey,
    pub record: VerbRecord,
    /// Editable cells, in column order.
    pub fields: Vec<Field>,
    /// Set once the row has been revealed; the row is frozen afterwards.
    pub revealed: bool,
}

impl DisplayRow {
    pub fn is_editable(&self, column: Column) -> bool {
        self.fields.iter().any(|f| f.column == column)
    }

    pub fn field(&self, column: Column) -> Option<&Field> {
        self.fields.iter().find(|f| f.column == column)
    }

    /// State shown for a field: `Revealed` once the row is frozen,
    /// otherwise the matcher's last verdict.
    pub fn field_state(&self, field: &Field) -> FieldState {
        if self.revealed {
            FieldState::Revealed
        } else {
            field.outcome.state
        }
    }

    /// Render plan for one column.
    pub fn cell(&self, column: Column) -> Cell<'_> {
        if column == Column::Type {
            return Cell::Reveal {
                label: self.record.kind.as_str(),
                revealed: self.revealed,
            };
        }
        match self.field(column) {
            Some(field) => Cell::Input {
                field,
                state: self.field_state(field),
            },
            None => Cell::Text(self.record.cell(column)),
        }
    }

    /// Render plan for the whole row, in display order.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'_>> + '_ {
        Column::ALL.into_iter().map(move |c| self.cell(c))
    }
}

/// Knobs for building a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Per-column blanking probability in random mode.
    pub edit_probability: f64,
    /// Keep only the first N rows after shuffling.
    pub limit: Option<usize>,
    pub matcher: Matcher,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            edit_probability: DEFAULT_EDIT_PROBABILITY,
            limit: None,
            matcher: Matcher::default(),
        }
    }
}

impl SessionOptions {
    pub fn from_config(config: &DrillConfig) -> Self {
        Self {
            edit_probability: config.random_edit_probability,
            limit: None,
            matcher: config.matcher(),
        }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// One shuffled rendering of the verb list for a quiz mode.
#[derive(Debug, Clone)]
pub struct DisplaySession {
    pub id: Uuid,
    pub mode: QuizMode,
    rows: Vec<DisplayRow>,
    index: HashMap<RowKey, usize>,
    matcher: Matcher,
}

impl DisplaySession {
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn row(&self, key: &RowKey) -> Option<&DisplayRow> {
        self.index.get(key).map(|&i| &self.rows[i])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Number of editable fields across all rows.
    pub fn field_count(&self) -> usize {
        self.rows.iter().map(|r| r.fields.len()).sum()
    }

    /// Every editable field, row by row.
    pub fn field_ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.rows.iter().flat_map(|row| {
            row.fields
                .iter()
                .map(move |f| FieldId::new(row.key.clone(), f.column))
        })
    }

    /// Matcher and rows together, for passes that re-validate every field.
    pub(crate) fn parts_mut(&mut self) -> (&Matcher, &mut [DisplayRow]) {
        (&self.matcher, &mut self.rows)
    }

    /// Store `text` in a field and re-validate it.
    ///
    /// Commits to a revealed row are ignored and return the frozen outcome.
    pub fn commit(&mut self, id: &FieldId, text: &str) -> Result<MatchOutcome, DrillError> {
        let &idx = self
            .index
            .get(&id.row)
            .ok_or_else(|| DrillError::RowNotFound(id.row.to_string()))?;
        let DisplayRow {
            record,
            fields,
            revealed,
            ..
        } = &mut self.rows[idx];

        let field = fields
            .iter_mut()
            .find(|f| f.column == id.column)
            .ok_or_else(|| DrillError::FieldNotFound {
                row: id.row.to_string(),
                column: id.column,
            })?;

        if *revealed {
            tracing::debug!("ignoring commit to revealed field {id}");
            return Ok(field.outcome.clone());
        }

        field.text = text.to_string();
        field.outcome = self.matcher.classify(text, record.cell(id.column));
        Ok(field.outcome.clone())
    }

    /// Fill every editable cell of a row with the canonical form of its
    /// accepted answer, validate each, and freeze the row.
    ///
    /// Returns `Ok(false)` if the row was already revealed.
    pub fn reveal_row(&mut self, key: &RowKey) -> Result<bool, DrillError> {
        let &idx = self
            .index
            .get(key)
            .ok_or_else(|| DrillError::RowNotFound(key.to_string()))?;
        let row = &mut self.rows[idx];
        if row.revealed {
            return Ok(false);
        }

        for field in &mut row.fields {
            let accepted = row.record.cell(field.column);
            field.text = self.matcher.normalize(accepted);
            field.outcome = self.matcher.classify(&field.text, accepted);
        }
        row.revealed = true;
        tracing::debug!("revealed row {key} ({} fields)", row.fields.len());
        Ok(true)
    }
}

/// Unbiased in-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Choose which answerable columns of one row become input fields.
fn editable_columns<R: Rng + ?Sized>(mode: QuizMode, probability: f64, rng: &mut R) -> Vec<Column> {
    if let Some(column) = mode.target_column() {
        return vec![column];
    }

    let mut columns: Vec<Column> = Column::ANSWERABLE
        .into_iter()
        .filter(|_| rng.random_bool(probability))
        .collect();
    if columns.is_empty() {
        let forced = Column::ANSWERABLE[rng.random_range(0..Column::ANSWERABLE.len())];
        columns.push(forced);
    }
    columns
}

/// Build a fresh session: shuffle the verbs, truncate to the limit, and
/// decide the editable cells of each row.
pub fn build_session<R: Rng + ?Sized>(
    mode: QuizMode,
    verbs: &[VerbRecord],
    options: &SessionOptions,
    rng: &mut R,
) -> DisplaySession {
    let probability = if (0.0..=1.0).contains(&options.edit_probability) {
        options.edit_probability
    } else {
        tracing::warn!(
            "edit probability {} out of range, using {DEFAULT_EDIT_PROBABILITY}",
            options.edit_probability
        );
        DEFAULT_EDIT_PROBABILITY
    };

    let mut shuffled: Vec<VerbRecord> = verbs.to_vec();
    shuffle(&mut shuffled, rng);
    if let Some(limit) = options.limit {
        shuffled.truncate(limit);
    }

    let mut rows = Vec::with_capacity(shuffled.len());
    let mut index = HashMap::with_capacity(shuffled.len());
    for (display_index, record) in shuffled.into_iter().enumerate() {
        let key = RowKey::new(&record.infinitive, display_index);
        let fields = editable_columns(mode, probability, rng)
            .into_iter()
            .map(Field::blank)
            .collect();
        index.insert(key.clone(), display_index);
        rows.push(DisplayRow {
            key,
            record,
            fields,
            revealed: false,
        });
    }

    let session = DisplaySession {
        id: Uuid::new_v4(),
        mode,
        rows,
        index,
        matcher: options.matcher.clone(),
    };
    tracing::info!(
        "session {} started in {mode} mode: {} rows, {} fields",
        session.id,
        session.len(),
        session.field_count()
    );
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VerbKind;
    use crate::verbs::builtin_verb_list;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn verbs() -> Vec<VerbRecord> {
        builtin_verb_list().verbs
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(1);
        let original = verbs();
        let mut shuffled = original.clone();
        shuffle(&mut shuffled, &mut rng);
        assert_eq!(shuffled.len(), original.len());

        let mut a: Vec<_> = original.iter().map(|v| v.infinitive.clone()).collect();
        let mut b: Vec<_> = shuffled.iter().map(|v| v.infinitive.clone()).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_handles_tiny_slices() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut empty: Vec<u8> = vec![];
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());
        let mut one = vec![7];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![7]);
    }

    #[test]
    fn shuffle_spreads_permutations_evenly() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<Vec<u8>, u32> = HashMap::new();
        for _ in 0..6000 {
            let mut items = vec![0u8, 1, 2];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (perm, count) in counts {
            assert!((800..1200).contains(&count), "{perm:?} seen {count} times");
        }
    }

    #[test]
    fn same_seed_same_session() {
        let opts = SessionOptions::default();
        let a = build_session(QuizMode::Random, &verbs(), &opts, &mut StdRng::seed_from_u64(9));
        let b = build_session(QuizMode::Random, &verbs(), &opts, &mut StdRng::seed_from_u64(9));
        let keys_a: Vec<_> = a.field_ids().collect();
        let keys_b: Vec<_> = b.field_ids().collect();
        assert_eq!(keys_a, keys_b);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn targeted_mode_blanks_exactly_one_column() {
        let mut rng = StdRng::seed_from_u64(3);
        let session = build_session(
            QuizMode::PastParticiple,
            &verbs(),
            &SessionOptions::default(),
            &mut rng,
        );
        assert_eq!(session.len(), verbs().len());
        for row in session.rows() {
            assert_eq!(row.fields.len(), 1);
            assert_eq!(row.fields[0].column, Column::PastParticiple);
            assert!(matches!(row.cell(Column::Infinitive), Cell::Text(_)));
        }
    }

    #[test]
    fn random_mode_keeps_at_least_one_field_per_row() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let session = build_session(
                QuizMode::Random,
                &verbs(),
                &SessionOptions::default(),
                &mut rng,
            );
            for row in session.rows() {
                assert!(!row.fields.is_empty());
                assert!(row.fields.len() <= 4);
                assert!(!row.is_editable(Column::Type));
            }
        }
    }

    #[test]
    fn random_mode_with_zero_probability_forces_one_field() {
        let opts = SessionOptions {
            edit_probability: 0.0,
            ..SessionOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(4);
        let session = build_session(QuizMode::Random, &verbs(), &opts, &mut rng);
        for row in session.rows() {
            assert_eq!(row.fields.len(), 1);
        }
        let columns: HashSet<Column> = session
            .rows()
            .iter()
            .map(|r| r.fields[0].column)
            .collect();
        assert!(columns.len() > 1, "forced column should vary between rows");
    }

    #[test]
    fn random_mode_with_full_probability_blanks_every_answer() {
        let opts = SessionOptions {
            edit_probability: 1.0,
            ..SessionOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let session = build_session(QuizMode::Random, &verbs(), &opts, &mut rng);
        for row in session.rows() {
            assert_eq!(row.fields.len(), 4);
        }
    }

    #[test]
    fn out_of_range_probability_falls_back() {
        let opts = SessionOptions {
            edit_probability: 7.5,
            ..SessionOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(6);
        let session = build_session(QuizMode::Random, &verbs(), &opts, &mut rng);
        assert_eq!(session.len(), verbs().len());
    }

    #[test]
    fn duplicate_infinitives_get_distinct_keys() {
        let dupes = vec![
            VerbRecord::new("lie", "lay", "lain", "yacer", VerbKind::Irregular),
            VerbRecord::new("lie", "lied", "lied", "mentir", VerbKind::Regular),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let session = build_session(
            QuizMode::PastSimple,
            &dupes,
            &SessionOptions::default(),
            &mut rng,
        );
        let keys: Vec<&str> = session.rows().iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["lie-0", "lie-1"]);
        for row in session.rows() {
            assert_eq!(session.row(&row.key).unwrap().record, row.record);
        }
    }

    #[test]
    fn limit_truncates_after_shuffle() {
        let opts = SessionOptions::default().with_limit(Some(5));
        let mut rng = StdRng::seed_from_u64(8);
        let session = build_session(QuizMode::Translation, &verbs(), &opts, &mut rng);
        assert_eq!(session.len(), 5);
        assert_eq!(session.field_count(), 5);
    }

    #[test]
    fn empty_verb_list_gives_empty_session() {
        let mut rng = StdRng::seed_from_u64(0);
        let session = build_session(QuizMode::Random, &[], &SessionOptions::default(), &mut rng);
        assert!(session.is_empty());
        assert_eq!(session.field_count(), 0);
    }

    fn single_verb_session() -> DisplaySession {
        let verbs = vec![VerbRecord::new(
            "be",
            "was/were",
            "been",
            "ser/estar",
            VerbKind::Irregular,
        )];
        let opts = SessionOptions {
            edit_probability: 1.0,
            ..SessionOptions::default()
        };
        build_session(QuizMode::Random, &verbs, &opts, &mut StdRng::seed_from_u64(0))
    }

    #[test]
    fn commit_validates_the_field() {
        let mut session = single_verb_session();
        let id = FieldId::new(RowKey::from("be-0"), Column::PastSimple);

        let out = session.commit(&id, "was").unwrap();
        assert_eq!(out.state, FieldState::Partial);
        assert_eq!(out.hint.as_deref(), Some("were"));

        let out = session.commit(&id, "Was/Were").unwrap();
        assert_eq!(out.state, FieldState::Correct);
        assert_eq!(session.row(&id.row).unwrap().field(Column::PastSimple).unwrap().text, "Was/Were");

        let out = session.commit(&id, "").unwrap();
        assert_eq!(out.state, FieldState::Empty);
    }

    #[test]
    fn commit_to_unknown_row_or_column_fails() {
        let mut session = single_verb_session();
        let stale = FieldId::new(RowKey::from("go-3"), Column::PastSimple);
        let err = session.commit(&stale, "went").unwrap_err();
        assert!(matches!(err, DrillError::RowNotFound(_)));
        assert!(err.is_lookup_miss());

        let type_cell = FieldId::new(RowKey::from("be-0"), Column::Type);
        let err = session.commit(&type_cell, "irregular").unwrap_err();
        assert!(matches!(err, DrillError::FieldNotFound { .. }));
    }

    #[test]
    fn reveal_fills_and_freezes_row() {
        let mut session = single_verb_session();
        let key = RowKey::from("be-0");
        assert!(session.reveal_row(&key).unwrap());

        let row = session.row(&key).unwrap();
        assert!(row.revealed);
        for field in &row.fields {
            assert_eq!(field.text, session.matcher().normalize(row.record.cell(field.column)));
            assert_eq!(field.outcome.state, FieldState::Correct);
            assert_eq!(row.field_state(field), FieldState::Revealed);
        }
        assert!(matches!(
            row.cell(Column::Type),
            Cell::Reveal { revealed: true, .. }
        ));

        // Second reveal is inert, commits are ignored.
        assert!(!session.reveal_row(&key).unwrap());
        let id = FieldId::new(key.clone(), Column::Infinitive);
        let out = session.commit(&id, "wrong").unwrap();
        assert_eq!(out.state, FieldState::Correct);
        assert_eq!(session.row(&key).unwrap().field(Column::Infinitive).unwrap().text, "be");
    }

    #[test]
    fn reveal_writes_canonical_answers() {
        let verbs = vec![VerbRecord::new(
            "burn",
            "Burned, burnt",
            "burned ,burnt",
            "quemar",
            VerbKind::Irregular,
        )];
        let opts = SessionOptions {
            edit_probability: 1.0,
            ..SessionOptions::default()
        };
        let mut session =
            build_session(QuizMode::Random, &verbs, &opts, &mut StdRng::seed_from_u64(0));
        let key = RowKey::from("burn-0");
        assert!(session.reveal_row(&key).unwrap());

        let row = session.row(&key).unwrap();
        let past = row.field(Column::PastSimple).unwrap();
        assert_eq!(past.text, "burned/burnt");
        assert_eq!(past.outcome.state, FieldState::Correct);
        let participle = row.field(Column::PastParticiple).unwrap();
        assert_eq!(participle.text, "burned/burnt");
        assert_eq!(row.field(Column::Translation).unwrap().text, "quemar");
    }

    #[test]
    fn reveal_unknown_row_fails() {
        let mut session = single_verb_session();
        assert!(session.reveal_row(&RowKey::from("nope-0")).is_err());
    }

    #[test]
    fn render_plan_covers_all_columns() {
        let mut rng = StdRng::seed_from_u64(11);
        let session = build_session(
            QuizMode::Infinitive,
            &verbs(),
            &SessionOptions::default(),
            &mut rng,
        );
        let row = &session.rows()[0];
        let cells: Vec<Cell<'_>> = row.cells().collect();
        assert_eq!(cells.len(), 5);
        assert!(matches!(cells[0], Cell::Input { state: FieldState::Empty, .. }));
        assert_eq!(cells[1], Cell::Text(row.record.past_simple.as_str()));
        assert!(matches!(cells[4], Cell::Reveal { revealed: false, .. }));
    }
}
