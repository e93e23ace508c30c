//! Storage seams used by the lifecycle coordinator.
//!
//! The production implementations live in `infrastructure` and use
//! `tokio::fs`; unit tests substitute in-memory doubles.

use std::path::PathBuf;

use async_trait::async_trait;
use rotation_core::PageConfig;

use super::error::PageError;

/// Loads and saves the whole sidecar.
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Returns the stored config, or an empty one if none has been saved yet.
    async fn load(&self) -> Result<PageConfig, PageError>;

    /// Replaces the stored config with `config`.
    async fn save(&self, config: &PageConfig) -> Result<(), PageError>;
}

/// The directory of page files.
///
/// Implementations validate every filename themselves; callers may pass
/// untrusted input straight through.
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Page filenames, excluding the rotation output page, sorted.
    async fn list(&self) -> Result<Vec<String>, PageError>;

    /// Current on-disk content of a page.
    async fn read(&self, name: &str) -> Result<Vec<u8>, PageError>;

    /// Creates or overwrites a page.
    async fn write(&self, name: &str, content: &[u8]) -> Result<(), PageError>;

    /// Moves a page into the rubbish bin and returns its new path.
    async fn soft_delete(&self, name: &str) -> Result<PathBuf, PageError>;
}
