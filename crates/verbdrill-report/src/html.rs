//! HTML session renderer.
//!
//! Produces a self-contained HTML file with all CSS inlined: the verb table
//! with its input fields styled by state, the reveal buttons, and the tally.

use anyhow::Result;
use std::path::Path;

use verbdrill_core::matcher::FieldState;
use verbdrill_core::model::Column;
use verbdrill_core::report::SessionReport;
use verbdrill_core::scorer::Tally;
use verbdrill_core::session::{Cell, DisplayRow, DisplaySession};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page for a session. Pass the tally of the last full
/// check, if there was one.
pub fn generate_html(session: &DisplaySession, tally: Option<&Tally>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>verbdrill — {} mode</title>\n", session.mode));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>verbdrill</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Mode: <strong>{}</strong> | {} verbs | {} blank cells | {}</p>\n",
        session.mode,
        session.len(),
        session.field_count(),
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Verb table
    html.push_str("<section class=\"drill\">\n");
    html.push_str("<table id=\"verb-table\">\n<thead><tr>");
    for column in Column::ALL {
        html.push_str(&format!("<th>{}</th>", column.header_name()));
    }
    html.push_str("</tr></thead>\n<tbody id=\"verb-table-body\">\n");
    for row in session.rows() {
        html.push_str(&render_row(row));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Feedback
    html.push_str("<section class=\"feedback\" id=\"feedback\">\n");
    match tally {
        Some(t) => {
            html.push_str(&format!("<p>{}</p>\n", html_escape(&t.to_string())));
            html.push_str(&generate_tally_bar(t));
        }
        None => html.push_str("<p>Fill in the blank cells. Each answer is checked as you leave it.</p>\n"),
    }
    html.push_str("</section>\n");

    // Raw JSON
    let report = SessionReport::from_session(session, tally.copied());
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(&report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

fn render_row(row: &DisplayRow) -> String {
    let mut tr = format!(
        "<tr data-verb-key=\"{}\"{}>",
        html_escape(row.key.as_str()),
        if row.revealed { " class=\"revealed\"" } else { "" }
    );

    for column in Column::ALL {
        match row.cell(column) {
            Cell::Text(text) => {
                tr.push_str(&format!("<td>{}</td>", html_escape(text)));
            }
            Cell::Input { field, state } => {
                let prefix = if state == FieldState::Partial {
                    "Also"
                } else {
                    "Correct"
                };
                let placeholder = field
                    .outcome
                    .hint
                    .as_deref()
                    .map(|h| format!(" placeholder=\"{prefix}: {}\"", html_escape(h)))
                    .unwrap_or_default();
                tr.push_str(&format!(
                    "<td><input type=\"text\" class=\"{}\" data-col-index=\"{}\" value=\"{}\"{}{} aria-label=\"Answer for {} of verb {}\"></td>",
                    state.as_str(),
                    column.index(),
                    html_escape(&field.text),
                    placeholder,
                    if row.revealed { " disabled" } else { "" },
                    column.header_name(),
                    html_escape(&row.record.infinitive),
                ));
            }
            Cell::Reveal { label, revealed } => {
                tr.push_str(&format!(
                    "<td>{} <button type=\"button\" class=\"reveal\"{}>Reveal</button></td>",
                    html_escape(label),
                    if revealed { " disabled" } else { "" }
                ));
            }
        }
    }

    tr.push_str("</tr>\n");
    tr
}

/// A single stacked bar: credited, revealed, and missed fields.
fn generate_tally_bar(tally: &Tally) -> String {
    let width = 400.0;
    let height = 24;
    if tally.total == 0 {
        return String::new();
    }

    let segments = [
        (tally.credited(), "#22c55e", "credited"),
        (tally.revealed, "#eab308", "revealed"),
        (
            tally.total - tally.credited() - tally.revealed,
            "#ef4444",
            "missed",
        ),
    ];

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        width as usize + 80,
        height
    );

    let mut x = 0.0;
    for (count, color, label) in segments {
        if count == 0 {
            continue;
        }
        let w = count as f64 / tally.total as f64 * width;
        svg.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"0\" width=\"{:.1}\" height=\"{}\" fill=\"{}\"><title>{} {}</title></rect>\n",
            x, w, height, color, count, label
        ));
        x += w;
    }
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
        width as usize + 8,
        height / 2,
        tally.accuracy() * 100.0
    ));

    svg.push_str("</svg>\n");
    svg
}

/// Write an HTML page for a session to a file.
pub fn write_html_report(session: &DisplaySession, tally: Option<&Tally>, path: &Path) -> Result<()> {
    let html = generate_html(session, tally);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --correct: #dcfce7; --partial: #fef9c3; --incorrect: #fde2e2; --revealed: #e0e7ff; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --correct: #064e3b; --partial: #713f12; --incorrect: #7f1d1d; --revealed: #312e81; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1 { margin-top: 1rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
input { font: inherit; padding: 0.2rem 0.4rem; border: 1px solid var(--border); background: transparent; color: inherit; }
input.correct { background: var(--correct); }
input.partial { background: var(--partial); }
input.incorrect { background: var(--incorrect); }
input.revealed { background: var(--revealed); }
button.reveal { margin-left: 0.5rem; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use verbdrill_core::model::{QuizMode, VerbKind, VerbRecord};
    use verbdrill_core::scorer::score_session;
    use verbdrill_core::session::{build_session, FieldId, RowKey, SessionOptions};

    fn make_session() -> DisplaySession {
        let verbs = vec![
            VerbRecord::new("be", "was/were", "been", "ser/estar", VerbKind::Irregular),
            VerbRecord::new("play", "played", "played", "jugar", VerbKind::Regular),
        ];
        build_session(
            QuizMode::PastSimple,
            &verbs,
            &SessionOptions::default(),
            &mut StdRng::seed_from_u64(5),
        )
    }

    fn key_for(session: &DisplaySession, infinitive: &str) -> RowKey {
        session
            .rows()
            .iter()
            .find(|r| r.record.infinitive == infinitive)
            .map(|r| r.key.clone())
            .unwrap()
    }

    #[test]
    fn html_contains_table_and_inputs() {
        let session = make_session();
        let html = generate_html(&session, None);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("past_simple mode"));
        assert!(html.contains("data-verb-key=\"be-"));
        assert!(html.contains("aria-label=\"Answer for Past Simple of verb be\""));
        assert!(html.contains("class=\"empty\""));
        assert!(html.contains("<td>been</td>"));
        assert!(html.contains("Reveal</button>"));
    }

    #[test]
    fn html_shows_states_hints_and_tally() {
        let mut session = make_session();
        let be = key_for(&session, "be");
        let play = key_for(&session, "play");
        session
            .commit(&FieldId::new(be, Column::PastSimple), "was")
            .unwrap();
        session.reveal_row(&play).unwrap();
        let tally = score_session(&mut session);

        let html = generate_html(&session, Some(&tally));
        assert!(html.contains("class=\"partial\""));
        assert!(html.contains("placeholder=\"Also: were\""));
        assert!(html.contains("class=\"revealed\""));
        assert!(html.contains("disabled>Reveal</button>"));
        assert!(html.contains("Final check: 1 of 2 answers correct"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn html_escapes_user_text() {
        let mut session = make_session();
        let be = key_for(&session, "be");
        session
            .commit(&FieldId::new(be, Column::PastSimple), "<script>")
            .unwrap();
        let html = generate_html(&session, None);
        assert!(!html.contains("value=\"<script>\""));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn html_report_write_to_file() {
        let session = make_session();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("session.html");

        write_html_report(&session, None, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
