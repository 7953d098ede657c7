//! Operator-maintained override and ignore tables.
//!
//! Both tables are line-oriented text: `#` starts a comment, blank lines are
//! skipped. Overrides map `original|override`, ignores list one name per
//! line. A [`Settings`] snapshot is loaded once per run and never mutated.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use thiserror::Error;
use tracing::warn;

/// Errors reading the settings files.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed override line (expected 'original|override'): {line}")]
    MalformedOverride { line: String },
}

/// Immutable per-run snapshot of the override map and ignore set.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    overrides: HashMap<String, String>,
    ignores: HashSet<String>,
}

impl Settings {
    /// Load both tables from their files.
    pub fn from_files(
        overridden_books_path: &Path,
        ignored_books_path: &Path,
    ) -> Result<Self, SettingsError> {
        let overrides_text = read(overridden_books_path)?;
        let ignores_text = read(ignored_books_path)?;
        Self::from_strs(&overrides_text, &ignores_text)
    }

    /// Parse both tables from raw text.
    pub fn from_strs(overrides: &str, ignores: &str) -> Result<Self, SettingsError> {
        Ok(Self {
            overrides: parse_overrides(overrides)?,
            ignores: parse_ignores(ignores),
        })
    }

    pub fn override_for(&self, name: &str) -> Option<&str> {
        self.overrides.get(name).map(String::as_str)
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignores.contains(name)
    }

    /// Entries that were never matched during a run, for operator hygiene.
    pub fn unused_report(&self, usage: &SettingsUsage) -> UnusedSettings {
        let mut overrides: Vec<String> = self
            .overrides
            .keys()
            .filter(|name| !usage.overrides_used.contains(*name))
            .cloned()
            .collect();
        let mut ignores: Vec<String> = self
            .ignores
            .iter()
            .filter(|name| !usage.ignores_used.contains(*name))
            .cloned()
            .collect();
        overrides.sort();
        ignores.sort();
        UnusedSettings { overrides, ignores }
    }
}

/// Which settings entries were actually matched against catalog records.
#[derive(Debug, Default)]
pub struct SettingsUsage {
    overrides_used: HashSet<String>,
    ignores_used: HashSet<String>,
}

impl SettingsUsage {
    pub fn mark_override_used(&mut self, name: &str) {
        self.overrides_used.insert(name.to_string());
    }

    pub fn mark_ignore_used(&mut self, name: &str) {
        self.ignores_used.insert(name.to_string());
    }
}

/// Stale settings entries reported after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedSettings {
    pub overrides: Vec<String>,
    pub ignores: Vec<String>,
}

impl UnusedSettings {
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty() && self.ignores.is_empty()
    }
}

fn read(path: &Path) -> Result<String, SettingsError> {
    std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse_overrides(text: &str) -> Result<HashMap<String, String>, SettingsError> {
    let mut overrides = HashMap::new();
    for line in data_lines(text) {
        let Some((original, replacement)) = line.split_once('|') else {
            return Err(SettingsError::MalformedOverride {
                line: line.to_string(),
            });
        };
        let original = original.trim();
        let replacement = replacement.trim();
        if overrides
            .insert(original.to_string(), replacement.to_string())
            .is_some()
        {
            warn!(name = original, "duplicate entry in overridden books settings");
        }
    }
    Ok(overrides)
}

fn parse_ignores(text: &str) -> HashSet<String> {
    data_lines(text).map(str::to_string).collect()
}

fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_overrides_skips_comments_and_blanks() {
        let settings = Settings::from_strs(
            "# a comment\n\ncoopmaths|coopmaths_fr\n  old_name | new_name  \n",
            "",
        )
        .unwrap();
        assert_eq!(settings.override_for("coopmaths"), Some("coopmaths_fr"));
        assert_eq!(settings.override_for("old_name"), Some("new_name"));
        assert_eq!(settings.override_for("missing"), None);
    }

    #[test]
    fn test_parse_overrides_duplicate_last_wins() {
        let settings = Settings::from_strs("a|first\na|second\n", "").unwrap();
        assert_eq!(settings.override_for("a"), Some("second"));
    }

    #[test]
    fn test_parse_overrides_malformed_line() {
        let result = Settings::from_strs("no-pipe-here\n", "");
        assert!(matches!(
            result,
            Err(SettingsError::MalformedOverride { .. })
        ));
    }

    #[test]
    fn test_parse_ignores() {
        let settings =
            Settings::from_strs("", "# header\nbad_book\n\nother_book\n").unwrap();
        assert!(settings.is_ignored("bad_book"));
        assert!(settings.is_ignored("other_book"));
        assert!(!settings.is_ignored("good_book"));
    }

    #[test]
    fn test_unused_report() {
        let settings =
            Settings::from_strs("a|b\nc|d\n", "x\ny\n").unwrap();
        let mut usage = SettingsUsage::default();
        usage.mark_override_used("a");
        usage.mark_ignore_used("y");

        let report = settings.unused_report(&usage);
        assert_eq!(report.overrides, vec!["c".to_string()]);
        assert_eq!(report.ignores, vec!["x".to_string()]);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_unused_report_empty_when_all_used() {
        let settings = Settings::from_strs("a|b\n", "x\n").unwrap();
        let mut usage = SettingsUsage::default();
        usage.mark_override_used("a");
        usage.mark_ignore_used("x");
        assert!(settings.unused_report(&usage).is_empty());
    }

    #[test]
    fn test_from_files() {
        let mut overrides = NamedTempFile::new().unwrap();
        writeln!(overrides, "coopmaths|coopmaths_fr").unwrap();
        let mut ignores = NamedTempFile::new().unwrap();
        writeln!(ignores, "broken_book").unwrap();

        let settings = Settings::from_files(overrides.path(), ignores.path()).unwrap();
        assert_eq!(settings.override_for("coopmaths"), Some("coopmaths_fr"));
        assert!(settings.is_ignored("broken_book"));
    }

    #[test]
    fn test_from_files_missing_file() {
        let ignores = NamedTempFile::new().unwrap();
        let result = Settings::from_files(Path::new("/nonexistent/overrides.txt"), ignores.path());
        assert!(matches!(result, Err(SettingsError::Io { .. })));
    }
}
