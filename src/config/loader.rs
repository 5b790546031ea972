use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use crate::config::types::Settings;

/// Errors that can occur when loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write settings file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Settings {
    /// Default on-disk location of the settings file.
    ///
    /// Uses `~/.config/pockettube/settings.toml` on Unix/macOS, or the
    /// platform equivalent via `dirs::config_dir()`. Falls back to the
    /// current directory if no config dir is available.
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("pockettube").join("settings.toml")
    }

    /// Load settings from `path`.
    ///
    /// - A missing file yields `Settings::default()`.
    /// - Out-of-range values are clamped via [`Settings::validate`].
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut settings: Settings = toml::from_str(&content).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        settings.validate();
        Ok(settings)
    }

    /// Persist settings to `path` as TOML, creating parent directories and
    /// holding an exclusive file lock for the duration of the write.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let body = toml::to_string_pretty(self)?;

        let write_err = |e: std::io::Error| SettingsError::Write {
            path: path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(write_err)?;
        file.lock_exclusive().map_err(write_err)?;
        let result = file.write_all(body.as_bytes()).map_err(write_err);
        let _ = file.unlock();
        result
    }
}
