//! The `verbdrill list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use verbdrill_core::config::load_config_from;
use verbdrill_core::model::Column;

pub fn execute(
    verbs_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let list = super::load_verbs(verbs_path.as_deref().or(config.verbs_file.as_deref()))?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        "text" => {
            println!("Verb list: {} ({} verbs)", list.name, list.verbs.len());

            let mut table = Table::new();
            table.set_header(Column::ALL.iter().map(|c| c.header_name()));
            for verb in &list.verbs {
                table.add_row(Column::ALL.iter().map(|&c| verb.cell(c)));
            }
            println!("{table}");
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
