//! # rotation-core
//!
//! Shared library for the display rotation editor containing the page naming
//! rules, the rotation config model, and the codec for the JSON sidecar file.
//!
//! This crate has zero dependencies on the file system, sockets, or an async
//! runtime.  Everything here is a pure function of its inputs, which keeps the
//! rules that guard the page directory easy to test in isolation.
//!
//! # Architecture overview
//!
//! A kiosk display cycles through a directory of `.html` pages.  A JSON
//! sidecar (`pages-config.json`) records which pages take part in the rotation
//! and in what order.  The editor service keeps the two consistent.
//!
//! - **`domain`** – Page names (`PageName`), the sidecar model (`PageConfig`,
//!   `PageStatus`), the policy for pages that have no sidecar entry yet, and
//!   the naming scheme for soft-deleted pages in the rubbish bin.
//!
//! - **`codec`** – How a `PageConfig` is laid out on disk.  Encoding is
//!   deterministic (sorted keys, four-space indent) so the sidecar diffs
//!   cleanly between saves.

pub mod codec;
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `rotation_core::PageConfig` instead of `rotation_core::domain::config::PageConfig`.
pub use codec::{decode_config, encode_config, CodecError};
pub use domain::config::{MissingEntryPolicy, PageConfig, PageStatus, PolicyParseError};
pub use domain::page::{NameError, PageName, HTML_SUFFIX, ROTATOR_PAGE};
pub use domain::rubbish::{rubbish_entry_name, RUBBISH_DIR, TIMESTAMP_FORMAT};
