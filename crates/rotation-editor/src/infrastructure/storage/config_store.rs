//! JSON sidecar persistence for the page config.
//!
//! [`JsonConfigStore`] always reads the file fresh and always writes it whole.
//! There is no caching and no locking here; the lifecycle coordinator decides
//! how concurrent writers interact.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rotation_core::{decode_config, encode_config, PageConfig};
use tokio::fs;
use tracing::debug;

use crate::application::{ConfigRepository, PageError};

/// Sidecar store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigRepository for JsonConfigStore {
    /// Loads the sidecar, returning an empty config if the file does not exist.
    ///
    /// # Errors
    ///
    /// [`PageError::Decode`] if the file is present but malformed, and
    /// [`PageError::Io`] for any other read failure.
    async fn load(&self) -> Result<PageConfig, PageError> {
        match fs::read(&self.path).await {
            Ok(bytes) => decode_config(&bytes).map_err(|source| PageError::Decode {
                path: self.path.clone(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no page config yet; using empty config");
                Ok(PageConfig::default())
            }
            Err(e) => Err(PageError::io(self.path.clone(), e)),
        }
    }

    /// Replaces the sidecar with `config`, creating its directory if needed.
    async fn save(&self, config: &PageConfig) -> Result<(), PageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| PageError::io(dir, e))?;
        }

        let bytes = encode_config(config).map_err(PageError::Encode)?;
        fs::write(&self.path, bytes)
            .await
            .map_err(|e| PageError::io(self.path.clone(), e))?;

        debug!(path = %self.path.display(), entries = config.len(), "page config saved");
        Ok(())
    }
}
