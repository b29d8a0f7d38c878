//! Application configuration.
//!
//! Handles loading configuration from environment variables, .env files and
//! an optional JSON layout-rules file.

use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constants::source;
use crate::error::{Error, Result};
use crate::layout::LayoutRules;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// ESV API key; the live verse source is only available when set
    pub esv_api_key: Option<String>,
    /// Directory export files are written to
    pub output_dir: PathBuf,
    /// Timeout for a single verse-source request
    pub request_timeout_secs: u64,
    /// Retries for transient verse-source failures
    pub max_retries: u32,
    /// Layout rules handed to the slide engine
    pub rules: LayoutRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            esv_api_key: None,
            output_dir: default_output_dir(),
            request_timeout_secs: source::DEFAULT_TIMEOUT_SECS,
            max_retries: source::DEFAULT_MAX_RETRIES,
            rules: LayoutRules::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();
        let lookup = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        config.esv_api_key = lookup("ESV_API_KEY");

        if let Some(dir) = lookup("CCC_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(shellexpand::tilde(&dir).to_string());
        }

        apply_override(&lookup, "CCC_REQUEST_TIMEOUT_SECS", &mut config.request_timeout_secs)?;
        apply_override(&lookup, "CCC_MAX_RETRIES", &mut config.max_retries)?;

        if let Some(path) = lookup("CCC_RULES_FILE") {
            let path = PathBuf::from(shellexpand::tilde(&path).to_string());
            config.rules = load_rules_file(&path)?;
        }

        apply_rule_overrides(&mut config.rules, lookup)?;
        config.rules.validate()?;

        Ok(config)
    }

    /// Check if the live ESV source can be used
    pub fn has_esv_credentials(&self) -> bool {
        self.esv_api_key.is_some()
    }
}

/// Read a JSON file of layout rules; missing fields keep their defaults.
pub fn load_rules_file(path: &Path) -> Result<LayoutRules> {
    let content = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::parse(format!("Invalid layout rules: {e}"), path.to_path_buf()))
}

/// Apply `CCC_*` per-rule overrides found through `lookup`.
pub fn apply_rule_overrides(
    rules: &mut LayoutRules,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    apply_override(&lookup, "CCC_FONT_SIZE_TARGET", &mut rules.font_size_target)?;
    apply_override(&lookup, "CCC_FONT_SIZE_MIN", &mut rules.font_size_min)?;
    apply_override(&lookup, "CCC_FONT_SIZE_MAX", &mut rules.font_size_max)?;
    apply_override(&lookup, "CCC_MIN_VERSES_PER_SLIDE", &mut rules.min_verses_per_slide)?;
    apply_override(&lookup, "CCC_MAX_CONTENT_PER_SLIDE", &mut rules.max_content_per_slide)?;
    apply_override(&lookup, "CCC_VERY_LONG_VERSE", &mut rules.very_long_verse_threshold)?;
    apply_override(&lookup, "CCC_EXTREMELY_LONG_VERSE", &mut rules.extremely_long_verse_threshold)?;
    apply_override(&lookup, "CCC_VERY_SHORT_VERSE", &mut rules.very_short_verse_threshold)?;
    Ok(())
}

fn apply_override<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    target: &mut T,
) -> Result<()> {
    if let Some(value) = lookup(name) {
        *target = value.trim().parse().map_err(|_| {
            Error::config(format!("{name}={value} is not a valid number"), "Use a whole, non-negative number")
        })?;
    }
    Ok(())
}

/// Documents/CCC Slides when a documents folder exists, else the working directory
fn default_output_dir() -> PathBuf {
    dirs::document_dir().map_or_else(|| PathBuf::from("."), |d| d.join("CCC Slides"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn overrides_replace_individual_rules() {
        let mut rules = LayoutRules::default();
        let lookup = lookup_from(&[("CCC_FONT_SIZE_TARGET", "44"), ("CCC_MAX_CONTENT_PER_SLIDE", " 650 ")]);
        apply_rule_overrides(&mut rules, lookup).unwrap();
        assert_eq!(rules.font_size_target, 44);
        assert_eq!(rules.max_content_per_slide, 650);
        assert_eq!(rules.font_size_min, 39);
    }

    #[test]
    fn unparseable_override_is_a_config_error() {
        let mut rules = LayoutRules::default();
        let lookup = lookup_from(&[("CCC_FONT_SIZE_MIN", "small")]);
        let err = apply_rule_overrides(&mut rules, lookup).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("CCC_FONT_SIZE_MIN"));
    }

    #[test]
    fn rules_file_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, r#"{"veryLongVerseThreshold": 250}"#).unwrap();
        let rules = load_rules_file(&path).unwrap();
        assert_eq!(rules.very_long_verse_threshold, 250);
        assert_eq!(rules.font_size_target, 46);
    }

    #[test]
    fn malformed_rules_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, "{ not json").unwrap();
        match load_rules_file(&path) {
            Err(Error::Parse { file: Some(file), .. }) => assert_eq!(file, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn default_config_has_no_key() {
        let config = Config::default();
        assert!(!config.has_esv_credentials());
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.max_retries, 2);
    }
}
