//! Application layer for rotation-editor.
//!
//! The application layer knows *what* has to happen when the operator lists,
//! toggles, saves or deletes a page, and delegates *how* to the storage
//! adapters behind the traits in [`repository`].
//!
//! # Sub-modules
//!
//! - **`error`**      – `PageError`, the failure taxonomy reported to callers.
//! - **`repository`** – `ConfigRepository` / `PageRepository` seams.
//! - **`lifecycle`**  – `PageLifecycle`, the only component that touches both
//!   the sidecar and the page directory.

pub mod error;
pub mod lifecycle;
pub mod repository;

pub use error::{ErrorKind, PageError};
pub use lifecycle::{DeleteOutcome, PageLifecycle, PageListing};
pub use repository::{ConfigRepository, PageRepository};
