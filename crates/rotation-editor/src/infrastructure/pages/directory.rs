//! The page directory on disk.
//!
//! Pages are `.html` files directly inside the root directory.  The scan is
//! not recursive, so the `rubbish` bin and any other subdirectory are never
//! listed, and the rotation output page is filtered out.
//!
//! Every operation validates its filename through [`PageName`] before the
//! path is joined onto the root, so no caller input can address a file
//! outside the directory.
//!
//! Writes go straight to the target file (no temp file, no fsync).  A crash
//! mid-write can leave a truncated page.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use rotation_core::{rubbish_entry_name, PageName, HTML_SUFFIX, ROTATOR_PAGE, RUBBISH_DIR};
use tokio::fs;
use tracing::debug;

use crate::application::{PageError, PageRepository};

/// Page directory backed by `tokio::fs`.
#[derive(Debug, Clone)]
pub struct FsPageDirectory {
    root: PathBuf,
}

impl FsPageDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where soft-deleted pages are moved to.
    pub fn rubbish_dir(&self) -> PathBuf {
        self.root.join(RUBBISH_DIR)
    }

    /// Soft delete with an explicit deletion time.
    ///
    /// The rubbish directory is created if missing (safe to race).  If the
    /// timestamped name is taken, a counter is appended until a free name is
    /// found, so an existing rubbish entry is never replaced.
    async fn soft_delete_at(
        &self,
        name: &str,
        deleted_at: NaiveDateTime,
    ) -> Result<PathBuf, PageError> {
        let page = PageName::editable(name)?;
        let source = self.root.join(page.as_str());

        match fs::metadata(&source).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(PageError::NotFound(page.into_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PageError::NotFound(page.into_string()))
            }
            Err(e) => return Err(PageError::io(source, e)),
        }

        let rubbish = self.rubbish_dir();
        fs::create_dir_all(&rubbish)
            .await
            .map_err(|e| PageError::io(rubbish.clone(), e))?;

        let mut attempt = 0;
        let target = loop {
            let candidate = rubbish.join(rubbish_entry_name(page.as_str(), deleted_at, attempt));
            let taken = fs::try_exists(&candidate)
                .await
                .map_err(|e| PageError::io(candidate.clone(), e))?;
            if !taken {
                break candidate;
            }
            attempt += 1;
        };

        fs::rename(&source, &target).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                // Lost a race with another delete of the same page.
                PageError::NotFound(page.to_string())
            } else {
                PageError::io(source.clone(), e)
            }
        })?;

        Ok(target)
    }
}

/// Returns `true` for a directory entry that is a page listing candidate.
fn is_listed_page(name: &str) -> bool {
    name.ends_with(HTML_SUFFIX) && name != ROTATOR_PAGE
}

#[async_trait]
impl PageRepository for FsPageDirectory {
    async fn list(&self) -> Result<Vec<String>, PageError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PageError::io(self.root.clone(), e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| PageError::io(self.root.clone(), e))?
        {
            // Non-UTF-8 names can never be valid page names.
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if !is_listed_page(&name) {
                continue;
            }
            // Follows symlinks, so a linked page is listed like a plain one.
            let is_file = fs::metadata(entry.path())
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            if is_file {
                names.push(name);
            }
        }

        names.sort();
        debug!(root = %self.root.display(), pages = names.len(), "page directory scanned");
        Ok(names)
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, PageError> {
        let page = PageName::parse(name)?;
        let path = self.root.join(page.as_str());

        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PageError::NotFound(page.into_string()))
            }
            Err(e) => Err(PageError::io(path, e)),
        }
    }

    async fn write(&self, name: &str, content: &[u8]) -> Result<(), PageError> {
        let page = PageName::editable(name)?;
        let path = self.root.join(page.as_str());

        fs::write(&path, content)
            .await
            .map_err(|e| PageError::io(path, e))
    }

    async fn soft_delete(&self, name: &str) -> Result<PathBuf, PageError> {
        self.soft_delete_at(name, Local::now().naive_local()).await
    }
}
