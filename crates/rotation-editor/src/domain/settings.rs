//! Editor runtime settings.
//!
//! [`EditorSettings`] is the single source of truth for where pages and the
//! sidecar live, where the HTTP API listens, and how pages without a sidecar
//! entry are treated.  It is built once at startup (defaults, then an optional
//! settings file, then CLI/env overrides) and handed to the components that
//! need it.  Nothing reads paths from globals.
//!
//! Settings file layout (every key optional):
//!
//! ```toml
//! [server]
//! bind_addr = "0.0.0.0:8081"
//!
//! [pages]
//! dir = "../pages"
//! config_file = "../config/pages-config.json"
//! missing_entry_policy = "active"
//! ```

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

use rotation_core::{MissingEntryPolicy, RUBBISH_DIR};
use serde::{Deserialize, Serialize};

/// All runtime settings for the editor service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EditorSettings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub pages: PageSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSettings {
    /// Address the HTTP API binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

/// Page directory and sidecar settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageSettings {
    /// Directory holding the `.html` pages and the `rubbish` bin.
    #[serde(default = "default_pages_dir")]
    pub dir: PathBuf,
    /// Path of the JSON sidecar.
    #[serde(default = "default_config_file")]
    pub config_file: PathBuf,
    /// How pages without a sidecar entry are treated.
    #[serde(default)]
    pub missing_entry_policy: MissingEntryPolicy,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8081))
}
fn default_pages_dir() -> PathBuf {
    PathBuf::from("..").join("pages")
}
fn default_config_file() -> PathBuf {
    PathBuf::from("..").join("config").join("pages-config.json")
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            dir: default_pages_dir(),
            config_file: default_config_file(),
            missing_entry_policy: MissingEntryPolicy::default(),
        }
    }
}

impl EditorSettings {
    /// Directory soft-deleted pages are moved into.
    pub fn rubbish_dir(&self) -> PathBuf {
        self.pages.dir.join(RUBBISH_DIR)
    }
}
