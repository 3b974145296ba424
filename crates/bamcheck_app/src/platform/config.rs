use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bamcheck_core::RoleExtensions;
use bamcheck_engine::EngineConfig;
use chrono::Local;
use serde::{Deserialize, Serialize};

use super::logging::LogSettings;

pub const CONFIG_FILENAME: &str = "bamcheck.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowSettings,
    pub log: LogSettings,
    /// Uploads are copied under `{staging_dir}/session-<timestamp>/`. Unset means in place.
    pub staging_dir: Option<PathBuf>,
    pub chunk_size: usize,
    pub extensions: ExtensionSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            log: LogSettings::default(),
            staging_dir: None,
            chunk_size: EngineConfig::default().chunk_size,
            extensions: ExtensionSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "BAM file processing tool".to_string(),
            width: 640.0,
            height: 720.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionSettings {
    pub data: Vec<String>,
    pub index: Vec<String>,
    pub reference: Vec<String>,
    pub reference_index: Vec<String>,
    pub region: Vec<String>,
}

impl Default for ExtensionSettings {
    fn default() -> Self {
        let defaults = RoleExtensions::default();
        Self {
            data: defaults.data,
            index: defaults.index,
            reference: defaults.reference,
            reference_index: defaults.reference_index,
            region: defaults.region,
        }
    }
}

impl From<ExtensionSettings> for RoleExtensions {
    fn from(settings: ExtensionSettings) -> Self {
        Self {
            data: settings.data,
            index: settings.index,
            reference: settings.reference,
            reference_index: settings.reference_index,
            region: settings.region,
        }
    }
}

impl AppConfig {
    /// Engine settings for this run; each run stages into its own session directory.
    pub fn engine_config(&self) -> EngineConfig {
        let session = format!("session-{}", Local::now().format("%Y%m%dT%H%M%S"));
        EngineConfig {
            staging_dir: self.staging_dir.as_ref().map(|dir| dir.join(session)),
            chunk_size: self.chunk_size.max(1),
        }
    }
}

/// Reads a config file. A missing file yields `Ok(None)`.
pub fn load(path: &Path) -> anyhow::Result<Option<AppConfig>> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };
    let config = ron::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(Some(config))
}

/// Like [`load`], but falls back to defaults. The error is handed back so it
/// can be logged once the logger exists.
pub fn load_or_default(path: &Path) -> (AppConfig, Option<anyhow::Error>) {
    match load(path) {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(err) => (AppConfig::default(), Some(err)),
    }
}
