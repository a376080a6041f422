//! TOML verb list parser.
//!
//! Loads verb lists from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::matcher::Matcher;
use crate::model::{Column, VerbKind, VerbList, VerbRecord};

/// Intermediate TOML structure for parsing verb list files.
#[derive(Debug, Deserialize)]
struct TomlVerbFile {
    verb_list: TomlVerbListHeader,
    #[serde(default)]
    verbs: Vec<TomlVerb>,
}

#[derive(Debug, Deserialize)]
struct TomlVerbListHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlVerb {
    infinitive: String,
    past_simple: String,
    past_participle: String,
    translation: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Parse a single TOML file into a `VerbList`.
pub fn parse_verb_list(path: &Path) -> Result<VerbList> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read verb list file: {}", path.display()))?;

    parse_verb_list_str(&content, path)
}

/// Parse a TOML string into a `VerbList` (useful for testing).
pub fn parse_verb_list_str(content: &str, source_path: &Path) -> Result<VerbList> {
    let parsed: TomlVerbFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let verbs = parsed
        .verbs
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let kind: VerbKind = v
                .kind
                .parse()
                .map_err(|e: String| anyhow::anyhow!("verb #{} ({}): {}", i + 1, v.infinitive, e))?;
            Ok(VerbRecord {
                infinitive: v.infinitive,
                past_simple: v.past_simple,
                past_participle: v.past_participle,
                translation: v.translation,
                kind,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(VerbList {
        id: parsed.verb_list.id,
        name: parsed.verb_list.name,
        description: parsed.verb_list.description,
        verbs,
    })
}

/// Recursively load all `.toml` verb list files from a directory.
pub fn load_verb_directory(dir: &Path) -> Result<Vec<VerbList>> {
    let mut lists = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            lists.extend(load_verb_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_verb_list(&path) {
                Ok(list) => lists.push(list),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(lists)
}

/// A warning from verb list validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The infinitive of the offending verb (if applicable).
    pub verb: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a verb list for common issues.
pub fn validate_verb_list(list: &VerbList, matcher: &Matcher) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if list.verbs.is_empty() {
        warnings.push(ValidationWarning {
            verb: None,
            message: "verb list is empty".into(),
        });
    }

    // Duplicates are legal (row keys disambiguate them) but usually a typo.
    let mut seen = HashSet::new();
    for verb in &list.verbs {
        let key = matcher.normalize(&verb.infinitive);
        if !seen.insert(key) {
            warnings.push(ValidationWarning {
                verb: Some(verb.infinitive.clone()),
                message: format!("duplicate infinitive: {}", verb.infinitive),
            });
        }
    }

    for verb in &list.verbs {
        for column in Column::ANSWERABLE {
            let cell = verb.cell(column);
            let options = matcher.options(cell);
            let mut distinct = HashSet::new();
            if options.iter().any(|o| !distinct.insert(o)) {
                warnings.push(ValidationWarning {
                    verb: Some(verb.infinitive.clone()),
                    message: format!(
                        "{} \"{}\" repeats an alternative",
                        column.header_name(),
                        cell
                    ),
                });
            }
            if options.is_empty() {
                warnings.push(ValidationWarning {
                    verb: Some(verb.infinitive.clone()),
                    message: format!("{} has no usable answer", column.header_name()),
                });
            } else if cell.contains(',') && !matcher.delimiters().contains(&',') {
                warnings.push(ValidationWarning {
                    verb: Some(verb.infinitive.clone()),
                    message: format!(
                        "{} \"{}\" uses ',' but only {:?} separate alternatives",
                        column.header_name(),
                        cell,
                        matcher.delimiters()
                    ),
                });
            }
        }
    }

    warnings
}
