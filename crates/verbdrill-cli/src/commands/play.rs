//! The `verbdrill play` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use verbdrill_core::config::load_config_from;
use verbdrill_core::manager::QuizManager;
use verbdrill_core::matcher::{FieldState, MatchOutcome};
use verbdrill_core::report::SessionReport;
use verbdrill_core::scorer::Tally;
use verbdrill_core::session::{Cell, DisplayRow, FieldId, RowKey, SessionOptions};
use verbdrill_report::html::write_html_report;

/// Typed at a prompt to reveal the current row.
const REVEAL_COMMAND: &str = "?";

pub struct PlayArgs {
    pub mode: Option<String>,
    pub verbs: Option<PathBuf>,
    pub seed: Option<u64>,
    pub limit: Option<usize>,
    pub output: Option<PathBuf>,
    pub html: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    if let Some(limit) = args.limit {
        anyhow::ensure!(limit >= 1, "limit must be at least 1");
    }

    let config = load_config_from(args.config.as_deref())?;
    let list = super::load_verbs(args.verbs.as_deref().or(config.verbs_file.as_deref()))?;

    let rng = match args.seed.or(config.seed) {
        Some(seed) => {
            tracing::debug!("using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };
    let options = SessionOptions::from_config(&config).with_limit(args.limit);
    let mode = args
        .mode
        .unwrap_or_else(|| config.default_mode.to_string());

    let mut manager = QuizManager::new(list.verbs, options, rng);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let tally = drill(&mut manager, &mode, stdin.lock(), stdout.lock())?;

    let session = manager
        .session()
        .context("no session to save after the drill")?;

    if let Some(dir) = &args.output {
        let report = SessionReport::from_session(session, tally);
        let path = dir.join(report.file_name());
        report.save_json(&path)?;
        println!("Report written to {}", path.display());
    }

    if let Some(path) = &args.html {
        write_html_report(session, tally.as_ref(), path)?;
        println!("HTML written to {}", path.display());
    }

    Ok(())
}

/// Run one session against line-based input: every editable field is
/// prompted in turn, then the whole session is checked.
///
/// An empty line leaves the field empty, `?` reveals the row, and end of
/// input stops prompting.
pub fn drill<R: Rng, I: BufRead, O: Write>(
    manager: &mut QuizManager<R>,
    mode: &str,
    input: I,
    mut out: O,
) -> Result<Option<Tally>> {
    if let Err(e) = manager.start(mode) {
        writeln!(out, "{}", manager.status())?;
        return Err(e.into());
    }
    writeln!(out, "{}", manager.status())?;
    writeln!(
        out,
        "Type the missing word and press Enter. Leave it empty to skip, '{REVEAL_COMMAND}' reveals the row."
    )?;

    let ids: Vec<FieldId> = manager
        .session()
        .map(|s| s.field_ids().collect())
        .unwrap_or_default();

    let mut lines = input.lines();
    let mut current_row: Option<RowKey> = None;

    for id in ids {
        let Some(row) = manager.session().and_then(|s| s.row(&id.row)) else {
            continue;
        };
        if row.revealed {
            continue;
        }
        if current_row.as_ref() != Some(&id.row) {
            writeln!(out, "\n{}", row_line(row))?;
            current_row = Some(id.row.clone());
        }

        write!(out, "  {}? ", id.column.header_name())?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line.context("failed to read answer")?;
        let answer = line.trim();

        if answer == REVEAL_COMMAND {
            manager.on_reveal_requested(&id.row);
            if let Some(row) = manager.session().and_then(|s| s.row(&id.row)) {
                let answers: Vec<String> = row
                    .fields
                    .iter()
                    .map(|f| format!("{} = {}", f.column.header_name(), f.text))
                    .collect();
                writeln!(out, "    revealed: {}", answers.join(", "))?;
            }
            continue;
        }

        let outcome = manager.on_field_committed(&id, answer);
        writeln!(out, "    {}", describe(&outcome))?;
    }

    let tally = manager.on_check_all_requested();

    if let Some(session) = manager.session() {
        let misses: Vec<String> = session
            .rows()
            .iter()
            .flat_map(|row| {
                row.fields
                    .iter()
                    .filter(move |f| row.field_state(f) == FieldState::Incorrect)
                    .map(move |f| {
                        format!(
                            "  {} ({}): {}",
                            row.record.infinitive,
                            f.column.header_name(),
                            f.outcome.hint.as_deref().unwrap_or("?")
                        )
                    })
            })
            .collect();
        if !misses.is_empty() {
            writeln!(out, "\nTo review:")?;
            for miss in misses {
                writeln!(out, "{miss}")?;
            }
        }
    }

    writeln!(out, "\n{}", manager.status())?;
    Ok(tally)
}

/// One row of the table as text, with blanks for unanswered fields.
fn row_line(row: &DisplayRow) -> String {
    row.cells()
        .map(|cell| match cell {
            Cell::Text(text) => text.to_string(),
            Cell::Input { field, .. } if field.text.is_empty() => "____".to_string(),
            Cell::Input { field, .. } => field.text.clone(),
            Cell::Reveal { label, .. } => format!("[{label}]"),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn describe(outcome: &MatchOutcome) -> String {
    match (outcome.state, outcome.hint.as_deref()) {
        (FieldState::Empty, _) => "skipped".to_string(),
        (FieldState::Correct, _) => "correct".to_string(),
        (FieldState::Partial, Some(rest)) => format!("partial (also accepted: {rest})"),
        (FieldState::Partial, None) => "partial".to_string(),
        (FieldState::Incorrect, Some(answer)) => format!("incorrect (answer: {answer})"),
        (FieldState::Incorrect, None) => "incorrect".to_string(),
        (FieldState::Revealed, _) => "revealed".to_string(),
    }
}
