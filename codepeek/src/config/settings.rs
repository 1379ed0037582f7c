//! User-facing settings persisted outside the core.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::Result;

/// Highlighter theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light stylesheet.
    #[default]
    Light,
    /// Dark stylesheet.
    Dark,
}

impl Theme {
    /// Stylesheet asset the renderer should load.
    #[must_use]
    pub fn stylesheet(self) -> &'static str {
        match self {
            Self::Light => "lib/prism.css",
            Self::Dark => "lib/prism-dark.css",
        }
    }
}

/// Persisted toggle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Whether previews are produced at all.
    #[serde(default = "default_enabled", alias = "extensionEnabled")]
    pub enabled: bool,
    /// Highlighter theme.
    #[serde(default)]
    pub theme: Theme,
}

fn default_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            theme: Theme::default(),
        }
    }
}

impl Settings {
    /// Loads settings, falling back to defaults when the file is missing or unreadable.
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::debug!(path = %path.display(), error = %e, "Malformed settings, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Writes settings as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}
