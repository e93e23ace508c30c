//! The rotation config model.
//!
//! [`PageConfig`] maps page filenames to a [`PageStatus`].  The mapping is
//! allowed to lag behind the page directory: it may hold entries for pages
//! that were removed by hand, and it may lack entries for pages that were
//! saved but never toggled.  Readers always start from the directory listing
//! and use the config only to decorate it.
//!
//! # The `order` field
//!
//! `order` is a sort hint assigned once, as `entry count + 1`, when a page
//! first receives a status.  It is never renumbered, so gaps and duplicates
//! occur (e.g. after a delete followed by a new toggle).  Consumers must sort
//! by it without assuming it is contiguous or unique.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Rotation status of a single page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageStatus {
    /// Whether the page takes part in the rotation.
    pub active: bool,
    /// Rotation sequence hint.  See the module docs.
    pub order: i64,
}

/// What a page without a config entry is taken to be.
///
/// Deployments of the editor disagreed on this, so it is an explicit operator
/// choice rather than a hard-coded rule.  The same policy is used when listing
/// pages and when a toggle has to synthesize a missing entry, so toggling an
/// unlisted page always yields the opposite of what the listing showed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingEntryPolicy {
    /// Unlisted pages are shown, and rotate, as active.
    #[default]
    Active,
    /// Unlisted pages are inactive until explicitly switched on.
    Inactive,
}

impl MissingEntryPolicy {
    /// The `active` value given to a page that has no entry.
    pub fn default_active(self) -> bool {
        matches!(self, MissingEntryPolicy::Active)
    }
}

/// Error returned when parsing a [`MissingEntryPolicy`] from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown missing-entry policy {0:?} (expected \"active\" or \"inactive\")")]
pub struct PolicyParseError(pub String);

impl FromStr for MissingEntryPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(MissingEntryPolicy::Active),
            "inactive" => Ok(MissingEntryPolicy::Inactive),
            _ => Err(PolicyParseError(s.to_string())),
        }
    }
}

impl fmt::Display for MissingEntryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingEntryPolicy::Active => f.write_str("active"),
            MissingEntryPolicy::Inactive => f.write_str("inactive"),
        }
    }
}

/// The sidecar document: `{ "pages": { "<file>": { "active": .., "order": .. } } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pages: BTreeMap<String, PageStatus>,
}

impl PageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, including entries for pages no longer on disk.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PageStatus> {
        self.pages.get(name)
    }

    /// The `order` a page would receive if it were given an entry now.
    pub fn next_order(&self) -> i64 {
        self.pages.len() as i64 + 1
    }

    /// Returns the stored status, or the status the policy would synthesize.
    ///
    /// Does not insert anything.
    pub fn status_or_default(&self, name: &str, policy: MissingEntryPolicy) -> PageStatus {
        self.pages.get(name).copied().unwrap_or(PageStatus {
            active: policy.default_active(),
            order: self.next_order(),
        })
    }

    /// Flips `active` for `name`, first synthesizing an entry if none exists.
    ///
    /// Returns the status after the flip.
    pub fn toggle(&mut self, name: &str, policy: MissingEntryPolicy) -> PageStatus {
        let order = self.next_order();
        let status = self.pages.entry(name.to_string()).or_insert(PageStatus {
            active: policy.default_active(),
            order,
        });
        status.active = !status.active;
        *status
    }

    /// Drops the entry for `name`, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<PageStatus> {
        self.pages.remove(name)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, PageStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, PageStatus>>::deserialize(deserializer)?.unwrap_or_default())
}
