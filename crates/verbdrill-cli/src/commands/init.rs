//! The `verbdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create verbdrill.toml
    if std::path::Path::new("verbdrill.toml").exists() {
        println!("verbdrill.toml already exists, skipping.");
    } else {
        std::fs::write("verbdrill.toml", SAMPLE_CONFIG)?;
        println!("Created verbdrill.toml");
    }

    // Create example verb list
    std::fs::create_dir_all("verbs")?;
    let example_path = std::path::Path::new("verbs/example.toml");
    if example_path.exists() {
        println!("verbs/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_VERB_LIST)?;
        println!("Created verbs/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your own verbs to verbs/example.toml");
    println!("  2. Run: verbdrill validate --verbs verbs/example.toml");
    println!("  3. Run: verbdrill play --verbs verbs/example.toml --mode past_simple");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# verbdrill configuration

# Chance that each column is blanked in random mode.
random_edit_probability = 0.4

# Characters separating alternative answers, e.g. "was/were" or "burned, burnt".
delimiters = ["/", ","]

default_mode = "random"
output_dir = "./verbdrill-results"
"#;

const EXAMPLE_VERB_LIST: &str = r#"[verb_list]
id = "example"
name = "Example Verbs"
description = "A few verbs to get started"

[[verbs]]
infinitive = "be"
past_simple = "was/were"
past_participle = "been"
translation = "ser/estar"
type = "irregular"

[[verbs]]
infinitive = "go"
past_simple = "went"
past_participle = "gone"
translation = "ir"
type = "irregular"

[[verbs]]
infinitive = "play"
past_simple = "played"
past_participle = "played"
translation = "jugar"
type = "regular"

[[verbs]]
infinitive = "get"
past_simple = "got"
past_participle = "got/gotten"
translation = "conseguir/obtener"
type = "irregular"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use verbdrill_core::config::parse_config_str;
    use verbdrill_core::matcher::Matcher;
    use verbdrill_core::parser::{parse_verb_list_str, validate_verb_list};

    #[test]
    fn sample_files_parse_cleanly() {
        let config = parse_config_str(SAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());

        let list = parse_verb_list_str(EXAMPLE_VERB_LIST, std::path::Path::new("example.toml")).unwrap();
        assert_eq!(list.verbs.len(), 4);
        assert!(validate_verb_list(&list, &Matcher::default()).is_empty());
    }
}
