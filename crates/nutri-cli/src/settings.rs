//! User settings, persisted as TOML.
//!
//! The default file lives in the platform configuration folder:
//! - macOS: ~/Library/Application Support/org.nutri.Nutri/
//! - Windows: %APPDATA%/nutri/Nutri/config/
//! - Linux: ~/.config/nutri/

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use nutri_ingest::IngestOptions;
use nutri_model::SectionId;
use nutri_report::RenderOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "nutri";
const APP_NAME: &str = "Nutri";
const CONFIG_FILENAME: &str = "settings.toml";

/// Source table used when neither the settings nor `--data` name one.
pub const DEFAULT_DATA_PATH: &str = "assets/foods.csv";

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub display: RenderOptions,
    pub report: ReportSettings,
}

/// Where the nutrient table lives and which columns identify a food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub path: PathBuf,
    #[serde(flatten)]
    pub columns: IngestOptions,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
            columns: IngestOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Sections enabled when a session starts.
    pub default_sections: Vec<SectionId>,
}

// ============================================================================
// Persistence
// ============================================================================

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine the settings directory")]
    NoConfigDir,
    #[error("failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Path of the default settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// The settings file to use: `explicit` when given, else the default one.
pub fn resolve_settings_path(explicit: Option<&Path>) -> Result<PathBuf, SettingsError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => settings_path().ok_or(SettingsError::NoConfigDir),
    }
}

/// Loads settings from `explicit`, or from the default location.
///
/// Never fails: a missing file, an unreadable file and a file that does not
/// parse all fall back to defaults, the latter two with a warning.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    match resolve_settings_path(explicit) {
        Ok(path) => load_settings_from(&path),
        Err(e) => {
            tracing::warn!("{e}, using defaults");
            Settings::default()
        }
    }
}

/// Loads settings from `path`, falling back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to parse settings file: {e}, using defaults");
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "failed to read settings file: {e}, using defaults");
            Settings::default()
        }
    }
}

/// Saves settings to `path`, creating the parent directory if needed.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let content = toml::to_string_pretty(settings)?;
    fs::write(path, content).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "saved settings");
    Ok(())
}
