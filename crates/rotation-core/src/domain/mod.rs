//! Domain types shared by every part of the editor.
//!
//! # Sub-modules
//!
//! - **`page`**    – Validated page filenames and the reserved rotation output.
//! - **`config`**  – The sidecar model: which pages are active, and their order.
//! - **`rubbish`** – Naming of soft-deleted pages inside the rubbish bin.

pub mod config;
pub mod page;
pub mod rubbish;
