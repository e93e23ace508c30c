//! TOML settings file loader.
//!
//! Reads [`EditorSettings`] from disk at startup.  Every key is optional and
//! falls back to the defaults in `domain::settings`, so a partial file, or no
//! file at all, is valid.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::domain::EditorSettings;

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A file system I/O error occurred.
    #[error("I/O error reading settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads settings from `path`, or returns the defaults when `path` is `None`
/// or names a file that does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for read failures other than "not found",
/// and [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings(path: Option<&Path>) -> Result<EditorSettings, SettingsError> {
    let Some(path) = path else {
        return Ok(EditorSettings::default());
    };

    match std::fs::read_to_string(path) {
        Ok(content) => {
            let settings: EditorSettings = toml::from_str(&content)?;
            info!(path = %path.display(), "settings file loaded");
            Ok(settings)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "settings file not found; using defaults");
            Ok(EditorSettings::default())
        }
        Err(source) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
