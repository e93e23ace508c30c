//! rotation-editor library crate.
//!
//! Manages the `.html` pages shown on a rotating kiosk display and the JSON
//! sidecar that records which pages are active and in what order.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Browser editor (HTTP/JSON)
//!         ↕
//! [rotation-editor]
//!   ├── domain/           EditorSettings
//!   ├── application/      PageLifecycle coordinator, repository traits, PageError
//!   └── infrastructure/
//!         ├── storage/    JSON sidecar store, TOML settings file
//!         ├── pages/      Page directory on disk (list, read, write, soft delete)
//!         └── http/       axum routes exposing the coordinator
//! ```
//!
//! # Layer rules
//!
//! - `domain` does no I/O.
//! - `application` talks to storage only through the traits in
//!   `application::repository`, so it can be tested with in-memory doubles.
//! - `infrastructure` implements those traits with `tokio::fs` and serves HTTP.

/// Domain layer: runtime settings (no I/O).
pub mod domain;

/// Application layer: the page lifecycle coordinator.
pub mod application;

/// Infrastructure layer: file system adapters and the HTTP server.
pub mod infrastructure;
