//! Domain layer for rotation-editor.
//!
//! Holds plain configuration types with no I/O.  The page and config model
//! itself lives in `rotation-core` and is shared with anything else that
//! reads the sidecar.

pub mod settings;

pub use settings::EditorSettings;
