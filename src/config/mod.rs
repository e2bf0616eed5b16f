//! Per-install settings for the research drive tooling.
//!
//! Stored in a TOML file located at:
//!   `$RESEARCHDRIVE_HOME/config.toml` when the variable is set
//!   `<OS config dir>/researchdrive/config.toml` otherwise
//!
//! The file is optional; every field falls back to the defaults below. The
//! per-run study description lives in [`study`].

mod study;

pub use study::{load_study_config, load_study_record, SensitivityLevel, StudyConfig, StudyRecord};
pub(crate) use study::{parse_document, read_document};

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Standard file name of the settings file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the config directory.
pub const HOME_ENV: &str = "RESEARCHDRIVE_HOME";

/// Root settings persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolConfig {
    /// Folder layout defaults (investigation nesting, default structure).
    #[serde(default)]
    pub layout: LayoutSettings,
    /// Values rendered into FOLDER_POLICY.md and notification text.
    #[serde(default)]
    pub policy: PolicySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Whether study folders are nested inside `i_<WP>_<LABEL1>`.
    #[serde(default = "default_create_investigation_folder")]
    pub create_investigation_folder: bool,
    /// First-level folders used when a study declares no structure.
    #[serde(default = "default_structure")]
    pub default_structure: Vec<String>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            create_investigation_folder: default_create_investigation_folder(),
            default_structure: default_structure(),
        }
    }
}

const fn default_create_investigation_folder() -> bool {
    true
}

fn default_structure() -> Vec<String> {
    vec!["raw".into(), "processed".into(), "metadata".into()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Organisation named in the sensitivity definitions.
    #[serde(default = "default_organisation")]
    pub organisation: String,
    /// Support address listed in the contact section.
    #[serde(default = "default_support_contact")]
    pub support_contact: String,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            organisation: default_organisation(),
            support_contact: default_support_contact(),
        }
    }
}

fn default_organisation() -> String {
    "CropXR".into()
}

fn default_support_contact() -> String {
    "dataxr@cropxr.org".into()
}

/// Returns the directory holding the settings file.
///
/// Order of precedence:
/// 1. `RESEARCHDRIVE_HOME` environment variable.
/// 2. OS-specific config directory via `directories::BaseDirs`.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(path) = env::var(HOME_ENV) {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS config directory")?;
    Ok(base_dirs.config_dir().join("researchdrive"))
}

/// Path to the settings file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the settings from disk or returns defaults.
pub fn load_or_default() -> Result<ToolConfig> {
    let path = config_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: ToolConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(ToolConfig::default())
    }
}
