//! This module defines read-only access to the framework settings the
//! protocol handler consults before deferring work.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Framework-level settings relevant to deep linking.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameworkSettings {
    /// Path to the tunnel binary. When set, gated actions wait for the
    /// tunnel to report that it is connected.
    #[serde(alias = "ngrokPath")]
    pub tunnel_path: Option<String>,
}

impl FrameworkSettings {
    /// Returns `true` when a non-empty tunnel binary path is configured.
    pub fn tunnel_configured(&self) -> bool {
        self.tunnel_path
            .as_deref()
            .is_some_and(|path| !path.trim().is_empty())
    }
}

/// The settings document as stored on disk.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub framework: FrameworkSettings,
}

impl Settings {
    /// Loads settings from a JSON file, or returns the defaults if the file
    /// doesn't exist.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file exists but cannot be
    /// read or parsed.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file '{}'", path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Settings file '{}' is not valid JSON", path))
    }
}

/// Read-only access to the current settings.
pub trait SettingsProvider: Send + Sync {
    /// Returns a snapshot of the framework settings.
    fn framework(&self) -> FrameworkSettings;
}

impl SettingsProvider for Settings {
    fn framework(&self) -> FrameworkSettings {
        self.framework.clone()
    }
}
