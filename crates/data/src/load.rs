use crate::schema::{Settings, DEFAULT_SETTINGS_FILE};
use anyhow::Context;
use onehand_core::OutcomeRecord;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    load_json(path)
}

/// Reads the explicit settings file, or the default one when it exists.
///
/// A missing explicit file is an error; a missing default file yields defaults.
pub fn resolve_settings(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    if let Some(path) = explicit {
        return load_settings(path);
    }
    let fallback = Path::new(DEFAULT_SETTINGS_FILE);
    if fallback.exists() {
        load_settings(fallback)
    } else {
        tracing::debug!(path = %fallback.display(), "no settings file, using defaults");
        Ok(Settings::default())
    }
}

/// Loads every outcome from a JSON-lines store. Blank lines are skipped.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<OutcomeRecord>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut records = Vec::new();
    for (line_no, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(line)
            .with_context(|| format!("parse {}:{}", path.display(), line_no + 1))?;
        records.push(record);
    }
    Ok(records)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn partial_settings_fill_defaults() {
        let file = unique_temp_file("settings");
        fs::write(&file, r#"{ "general": { "games": 500 }, "rules": { "same_deck": true } }"#)
            .expect("write");
        let settings = load_settings(&file).expect("load");
        assert_eq!(settings.general.games, Some(500));
        assert!(!settings.general.debug);
        assert!(settings.rules.same_deck);
        assert!(settings.store.enabled);
        assert_eq!(settings.store.path, PathBuf::from("results.jsonl"));
        let _ = fs::remove_file(file);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let file = unique_temp_file("missing");
        let err = resolve_settings(Some(file.as_path())).expect_err("missing");
        assert!(err.to_string().starts_with("read "));
    }

    #[test]
    fn bad_record_line_names_its_position() {
        let file = unique_temp_file("records");
        fs::write(&file, "\n{\"rule_set\":\"Normal\"}\n").expect("write");
        let err = load_records(&file).expect_err("truncated record");
        assert!(err.to_string().ends_with(":2"));
        let _ = fs::remove_file(file);
    }

    fn unique_temp_file(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "onehand_load_test_{tag}_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }
}
