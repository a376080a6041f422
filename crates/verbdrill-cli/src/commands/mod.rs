pub mod init;
pub mod list;
pub mod play;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use verbdrill_core::model::VerbList;
use verbdrill_core::parser;
use verbdrill_core::verbs::builtin_verb_list;

/// Load the verb list to work with: a file, every list in a directory
/// merged together, or the built-in list.
pub fn load_verbs(path: Option<&Path>) -> Result<VerbList> {
    let Some(path) = path else {
        return Ok(builtin_verb_list());
    };

    if !path.is_dir() {
        tracing::debug!("loading verb list from {}", path.display());
        return parser::parse_verb_list(path);
    }

    let lists = parser::load_verb_directory(path)?;
    anyhow::ensure!(
        !lists.is_empty(),
        "no verb lists found in {}",
        path.display()
    );
    tracing::debug!("merging {} verb lists from {}", lists.len(), path.display());
    let name = lists
        .iter()
        .map(|l| l.name.as_str())
        .collect::<Vec<_>>()
        .join(" + ");
    Ok(VerbList {
        id: path.display().to_string(),
        name,
        description: String::new(),
        verbs: lists.into_iter().flat_map(|l| l.verbs).collect(),
    })
}
