use std::{fs, path::Path};

use anyhow::Context;
use menu_model::FavoriteRule;
use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "engine.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Title of the top-level menu added to the menu bar.
    pub menu_title: String,
    pub menu_favourites: Vec<FavoriteRule>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            menu_title: "Shotgun".into(),
            menu_favourites: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("failed to parse engine settings")
    }

    /// Overlays environment-style overrides; `APP__*` wins over the short name.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("MENU_TITLE") {
            self.menu_title = v;
        }
        if let Some(v) = lookup("APP__MENU_TITLE") {
            self.menu_title = v;
        }
    }
}

/// Settings from `engine.toml` in the working directory, if readable, plus
/// environment overrides. A broken file falls back to defaults.
pub fn load_settings() -> Settings {
    let mut settings = match fs::read_to_string(SETTINGS_FILE) {
        Ok(raw) => Settings::from_toml_str(&raw).unwrap_or_else(|err| {
            warn!(error = %err, file = SETTINGS_FILE, "ignoring unreadable settings file");
            Settings::default()
        }),
        Err(_) => Settings::default(),
    };
    settings.apply_overrides(|key| std::env::var(key).ok());
    settings
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let mut settings = Settings::from_toml_str(&raw)
        .with_context(|| format!("invalid settings file '{}'", path.display()))?;
    settings.apply_overrides(|key| std::env::var(key).ok());
    Ok(settings)
}
