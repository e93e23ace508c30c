//! Infrastructure layer for rotation-editor.
//!
//! Handles all I/O: the JSON sidecar, the page directory, the optional TOML
//! settings file, and the HTTP listener.
//!
//! # Responsibilities
//!
//! - Implementing `ConfigRepository` and `PageRepository` on top of `tokio::fs`
//! - Enforcing the page filename rules at the file system boundary
//! - Serving the coordinator's operations over HTTP
//!
//! # What does NOT belong here?
//!
//! - Deciding what a toggle or a delete means (that is the application layer)
//! - Command-line parsing (that is done in `main.rs`)

pub mod http;
pub mod pages;
pub mod storage;

pub use http::{spawn_api_server, ApiServer};
pub use pages::directory::FsPageDirectory;
pub use storage::config_store::JsonConfigStore;
