//! Page directory infrastructure.
//!
//! The `directory` sub-module owns every file system operation on page
//! files: listing, reading, writing, and moving pages into the rubbish bin.

pub mod directory;
