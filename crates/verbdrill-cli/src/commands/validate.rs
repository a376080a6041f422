//! The `verbdrill validate` command.

use std::path::PathBuf;

use anyhow::Result;

use verbdrill_core::config::load_config_from;
use verbdrill_core::parser;

pub fn execute(verbs_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let matcher = config.matcher();

    let lists = if verbs_path.is_dir() {
        parser::load_verb_directory(&verbs_path)?
    } else {
        vec![parser::parse_verb_list(&verbs_path)?]
    };

    let mut total_warnings = 0;

    for list in &lists {
        println!("Verb list: {} ({} verbs)", list.name, list.verbs.len());

        let warnings = parser::validate_verb_list(list, &matcher);
        for w in &warnings {
            let prefix = w
                .verb
                .as_ref()
                .map(|v| format!("  [{v}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All verb lists valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
