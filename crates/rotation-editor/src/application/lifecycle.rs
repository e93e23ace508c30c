//! PageLifecycle: keeps the page directory and the rotation config in step.
//!
//! This is the only component that couples the sidecar store and the page
//! directory.  The rules it maintains:
//!
//! - Listings come from the directory.  The config only decorates them, so a
//!   config entry for a missing file is never surfaced and a file without an
//!   entry is shown with the status the [`MissingEntryPolicy`] implies.
//! - Saving a page never touches the config.  A new page gets an entry the
//!   first time it is toggled.
//! - Deleting moves the file first and prunes the config second.  If pruning
//!   fails the move stands: the page is already out of the rotation, and the
//!   orphaned entry is invisible because listings come from the directory.
//!
//! # Concurrency
//!
//! The config is always written whole.  An async mutex serializes this
//! coordinator's own read-modify-write sections (`toggle`, the prune step of
//! `delete`, and snapshot writes), but a snapshot sent by a client replaces
//! whatever is stored: two editors toggling at once overwrite each other, and
//! the last write wins.

use std::path::PathBuf;
use std::sync::Arc;

use rotation_core::{MissingEntryPolicy, PageConfig, PageName, PageStatus};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::error::PageError;
use super::repository::{ConfigRepository, PageRepository};

/// One row of [`PageLifecycle::list_with_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageListing {
    pub filename: String,
    #[serde(flatten)]
    pub status: PageStatus,
    /// `false` when `status` was synthesized from the missing-entry policy.
    pub configured: bool,
}

/// Result of a successful soft delete.
#[derive(Debug)]
pub struct DeleteOutcome {
    /// Where the page now lives inside the rubbish bin.
    pub rubbish_path: PathBuf,
    /// Set when the file moved but the config entry could not be removed.
    pub prune_error: Option<PageError>,
}

impl DeleteOutcome {
    pub fn config_pruned(&self) -> bool {
        self.prune_error.is_none()
    }
}

/// Coordinates page files and their rotation config.
pub struct PageLifecycle {
    configs: Arc<dyn ConfigRepository>,
    pages: Arc<dyn PageRepository>,
    policy: MissingEntryPolicy,
    config_guard: Mutex<()>,
}

impl PageLifecycle {
    pub fn new(
        configs: Arc<dyn ConfigRepository>,
        pages: Arc<dyn PageRepository>,
        policy: MissingEntryPolicy,
    ) -> Self {
        Self {
            configs,
            pages,
            policy,
            config_guard: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> MissingEntryPolicy {
        self.policy
    }

    /// Page filenames on disk, without the rotation output page.
    pub async fn list_pages(&self) -> Result<Vec<String>, PageError> {
        self.pages.list().await
    }

    /// The stored config, as-is.  May contain entries for missing pages.
    pub async fn get_config(&self) -> Result<PageConfig, PageError> {
        self.configs.load().await
    }

    /// Every page on disk paired with its status.
    ///
    /// Read-only: pages without an entry are reported with the policy default
    /// and `configured: false`, but no entry is written.
    pub async fn list_with_status(&self) -> Result<Vec<PageListing>, PageError> {
        let files = self.pages.list().await?;
        let config = self.configs.load().await?;

        let listing = files
            .into_iter()
            .map(|filename| {
                let configured = config.get(&filename).is_some();
                let status = config.status_or_default(&filename, self.policy);
                PageListing {
                    filename,
                    status,
                    configured,
                }
            })
            .collect::<Vec<_>>();

        debug!(pages = listing.len(), "listed pages with status");
        Ok(listing)
    }

    /// Flips `active` for `name` on the server side and persists the config.
    ///
    /// A missing entry is first synthesized with the policy default and
    /// `order = entry count + 1`.  Returns the new status.
    pub async fn toggle(&self, name: &str) -> Result<PageStatus, PageError> {
        let page = PageName::editable(name)?;

        let _guard = self.config_guard.lock().await;
        let mut config = self.configs.load().await?;
        let status = config.toggle(page.as_str(), self.policy);
        self.configs.save(&config).await?;

        info!(page = %page, active = status.active, order = status.order, "page toggled");
        Ok(status)
    }

    /// Persists a config snapshot the client built after flipping `name`.
    ///
    /// The snapshot replaces the stored config verbatim; concurrent snapshots
    /// are not merged.
    pub async fn apply_snapshot(&self, name: &str, snapshot: PageConfig) -> Result<(), PageError> {
        let page = PageName::editable(name)?;

        let _guard = self.config_guard.lock().await;
        self.configs.save(&snapshot).await?;

        info!(
            page = %page,
            active = ?snapshot.get(page.as_str()).map(|s| s.active),
            entries = snapshot.len(),
            "config snapshot saved"
        );
        Ok(())
    }

    /// Current on-disk content of `name`.  The rotation output page is readable.
    pub async fn read_page(&self, name: &str) -> Result<Vec<u8>, PageError> {
        self.pages.read(name).await
    }

    /// Creates or overwrites a page.  The config is not touched.
    pub async fn save(&self, name: &str, content: &[u8]) -> Result<(), PageError> {
        self.pages.write(name, content).await?;
        info!(page = name, bytes = content.len(), "page saved");
        Ok(())
    }

    /// Moves `name` to the rubbish bin, then drops its config entry.
    ///
    /// # Errors
    ///
    /// Fails only if the move fails.  A config failure after the move is
    /// reported through [`DeleteOutcome::prune_error`].
    pub async fn delete(&self, name: &str) -> Result<DeleteOutcome, PageError> {
        let rubbish_path = self.pages.soft_delete(name).await?;
        info!(page = name, rubbish = %rubbish_path.display(), "page moved to rubbish");

        let prune_error = self.prune_entry(name).await.err();
        if let Some(err) = &prune_error {
            warn!(page = name, error = %err, "page moved but its config entry was not removed");
        }

        Ok(DeleteOutcome {
            rubbish_path,
            prune_error,
        })
    }

    async fn prune_entry(&self, name: &str) -> Result<(), PageError> {
        let _guard = self.config_guard.lock().await;
        let mut config = self.configs.load().await?;
        if config.remove(name).is_some() {
            self.configs.save(&config).await?;
        }
        Ok(())
    }
}
