use crate::config::Labels;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub widget: WidgetSettings,
    #[serde(default)]
    pub labels: Labels,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct WidgetSettings {
    pub default_depth: Option<u32>, // Clamped to 1..=10 when used
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Read settings from `path`. Missing or malformed files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "ignoring malformed settings");
                Self::default()
            }),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "could not read settings");
                Self::default()
            }
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("treeodds")
            .join("config.toml")
    }
}
