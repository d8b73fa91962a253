//! Settings loader for onu-rewrite.
//!
//! Loads an optional YAML file and layers command-line overrides on top:
//! - Explicit file (`--config <path>`): must exist and parse.
//! - Implicit file (`onu-rewrite.yaml` in the working directory): used when
//!   present; unreadable or malformed files are warned about and ignored.
//!
//! Merge precedence is CLI over file over built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::batch::BatchConfig;
use crate::error::RewriteError;
use crate::types::{RewriteConfig, Tr069Profile};

/// Settings file looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "onu-rewrite.yaml";

/// Default location of the outcome log.
pub const DEFAULT_LOG_PATH: &str = "data_log.csv";

/// Every field is optional; unset fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RewriteSettings {
    /// Directory of input scripts.
    pub input_dir: Option<PathBuf>,
    /// Directory for rewritten scripts.
    pub output_dir: Option<PathBuf>,
    /// CSV outcome log path.
    pub log_path: Option<PathBuf>,
    /// Input file name glob.
    pub file_pattern: Option<String>,
    /// Worker threads (0 = auto).
    pub workers: Option<usize>,
    /// Canonical name length bound.
    pub max_name_len: Option<usize>,
    /// Input size limit in bytes.
    pub max_file_size: Option<u64>,
    /// Write `.bak` copies of inputs.
    pub backup: Option<bool>,
    /// Injected management stanza overrides.
    #[serde(default)]
    pub tr069: Tr069Settings,
}

/// `tr069:` section of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Tr069Settings {
    /// ACS endpoint for the `tr069-mgmt ... acs` line.
    pub acs_url: Option<String>,
    /// Management VLAN for the service and tag lines.
    pub vlan: Option<u16>,
}

impl RewriteSettings {
    /// Parse settings from YAML text.
    ///
    /// # Errors
    /// `Settings` when the YAML does not match the settings shape.
    pub fn from_yaml_str(raw: &str) -> Result<Self, RewriteError> {
        serde_yaml::from_str(raw).map_err(|e| RewriteError::Settings(e.to_string()))
    }

    /// Layer `overlay` on top of `self`; set fields in `overlay` win.
    #[must_use]
    pub fn merge(self, overlay: Self) -> Self {
        Self {
            input_dir: overlay.input_dir.or(self.input_dir),
            output_dir: overlay.output_dir.or(self.output_dir),
            log_path: overlay.log_path.or(self.log_path),
            file_pattern: overlay.file_pattern.or(self.file_pattern),
            workers: overlay.workers.or(self.workers),
            max_name_len: overlay.max_name_len.or(self.max_name_len),
            max_file_size: overlay.max_file_size.or(self.max_file_size),
            backup: overlay.backup.or(self.backup),
            tr069: self.tr069.merge(overlay.tr069),
        }
    }

    /// Resolved outcome log path.
    #[must_use]
    pub fn resolved_log_path(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH))
    }

    /// Resolved document rewrite configuration.
    #[must_use]
    pub fn rewrite_config(&self) -> RewriteConfig {
        let defaults = RewriteConfig::default();
        let profile = Tr069Profile::default();
        RewriteConfig {
            max_name_len: self.max_name_len.unwrap_or(defaults.max_name_len),
            tr069: Tr069Profile {
                acs_url: self.tr069.acs_url.clone().unwrap_or(profile.acs_url),
                vlan: self.tr069.vlan.unwrap_or(profile.vlan),
            },
        }
    }

    /// Resolved batch configuration; `dry_run` is left off.
    #[must_use]
    pub fn batch_config(&self) -> BatchConfig {
        let defaults = BatchConfig::default();
        BatchConfig {
            input_dir: self.input_dir.clone().unwrap_or(defaults.input_dir),
            output_dir: self.output_dir.clone().unwrap_or(defaults.output_dir),
            file_pattern: self.file_pattern.clone().unwrap_or(defaults.file_pattern),
            workers: self.workers.unwrap_or(defaults.workers),
            dry_run: false,
            backup: self.backup.unwrap_or(defaults.backup),
            max_file_size: self.max_file_size.unwrap_or(defaults.max_file_size),
            rewrite: self.rewrite_config(),
        }
    }
}

impl Tr069Settings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            acs_url: overlay.acs_url.or(self.acs_url),
            vlan: overlay.vlan.or(self.vlan),
        }
    }
}

/// Load settings from `explicit`, or from [`DEFAULT_SETTINGS_FILE`] if present.
///
/// # Errors
/// `Settings` when an explicit file cannot be read or parsed.
pub fn load_settings(explicit: Option<&Path>) -> Result<RewriteSettings, RewriteError> {
    match explicit {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| RewriteError::Settings(format!("{}: {e}", path.display())))?;
            RewriteSettings::from_yaml_str(&raw)
                .map_err(|e| RewriteError::Settings(format!("{}: {e}", path.display())))
        }
        None => Ok(load_implicit(Path::new(DEFAULT_SETTINGS_FILE))),
    }
}

fn load_implicit(path: &Path) -> RewriteSettings {
    if !path.exists() {
        return RewriteSettings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return RewriteSettings::default();
        }
    };
    match RewriteSettings::from_yaml_str(&raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            RewriteSettings::default()
        }
    }
}
