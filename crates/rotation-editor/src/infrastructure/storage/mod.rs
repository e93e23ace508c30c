//! Storage infrastructure: sidecar and settings file persistence.
//!
//! - **`config_store`** reads and writes the JSON page config sidecar.
//! - **`settings`** reads the optional TOML settings file at startup.
//!
//! A missing file is the normal first-run state for both and yields defaults.

pub mod config_store;
pub mod settings;
