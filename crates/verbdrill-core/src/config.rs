//! Drill configuration and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::matcher::{Matcher, DEFAULT_DELIMITERS};
use crate::model::QuizMode;
use crate::session::DEFAULT_EDIT_PROBABILITY;

/// Top-level verbdrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Chance that each answerable column is blanked in random mode.
    #[serde(default = "default_probability")]
    pub random_edit_probability: f64,
    /// Characters separating alternative answers in a cell.
    #[serde(default = "default_delimiters")]
    pub delimiters: Vec<char>,
    /// Mode used when none is given on the command line.
    #[serde(default = "default_mode")]
    pub default_mode: QuizMode,
    /// Verb list to drill instead of the built-in one.
    #[serde(default)]
    pub verbs_file: Option<PathBuf>,
    /// Where session reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Fixed RNG seed for reproducible sessions.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_probability() -> f64 {
    DEFAULT_EDIT_PROBABILITY
}
fn default_delimiters() -> Vec<char> {
    DEFAULT_DELIMITERS.to_vec()
}
fn default_mode() -> QuizMode {
    QuizMode::Random
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./verbdrill-results")
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            random_edit_probability: default_probability(),
            delimiters: default_delimiters(),
            default_mode: default_mode(),
            verbs_file: None,
            output_dir: default_output_dir(),
            seed: None,
        }
    }
}

impl DrillConfig {
    /// Matcher using the configured delimiters.
    pub fn matcher(&self) -> Matcher {
        Matcher::new(&self.delimiters)
    }

    /// Reject values the drill cannot work with.
    pub fn validate(&self) -> Result<(), DrillError> {
        if !(0.0..=1.0).contains(&self.random_edit_probability) {
            return Err(DrillError::InvalidConfig(format!(
                "random_edit_probability must be between 0.0 and 1.0, got {}",
                self.random_edit_probability
            )));
        }
        if self.delimiters.is_empty() {
            return Err(DrillError::InvalidConfig(
                "delimiters must not be empty".into(),
            ));
        }
        if let Some(bad) = self
            .delimiters
            .iter()
            .find(|c| c.is_alphanumeric() || c.is_whitespace())
        {
            return Err(DrillError::InvalidConfig(format!(
                "delimiter {bad:?} would split inside answers"
            )));
        }
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `verbdrill.toml` in the current directory
/// 2. `~/.config/verbdrill/config.toml`
///
/// Environment variable overrides: `VERBDRILL_VERBS`, `VERBDRILL_SEED`.
pub fn load_config() -> Result<DrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<DrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("verbdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => DrillConfig::default(),
    };

    if let Ok(verbs) = std::env::var("VERBDRILL_VERBS") {
        if !verbs.trim().is_empty() {
            config.verbs_file = Some(PathBuf::from(verbs));
        }
    }

    if let Ok(seed) = std::env::var("VERBDRILL_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("VERBDRILL_SEED is not a number: {seed}"))?;
        config.seed = Some(seed);
    }

    config.validate()?;
    Ok(config)
}

/// Parse a TOML string into a `DrillConfig`.
pub fn parse_config_str(content: &str) -> Result<DrillConfig> {
    let config: DrillConfig = toml::from_str(content)?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("verbdrill"))
}
