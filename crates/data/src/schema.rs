use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SETTINGS_FILE: &str = "onehand.json";
pub const DEFAULT_STORE_FILE: &str = "results.jsonl";

/// Contents of the settings file. Every field is optional on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub rules: RuleSettings,
    pub store: StoreSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralSettings {
    pub games: Option<usize>,
    pub debug: bool,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuleSettings {
    pub same_deck: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreSettings {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from(DEFAULT_STORE_FILE),
        }
    }
}
