//! Naming of soft-deleted pages.
//!
//! Deleting a page moves it into the `rubbish` subdirectory of the page
//! directory instead of erasing it.  The moved file is named
//! `<original>_<YYYY-MM-DD_HH-MM-SS>`, so entries for the same page sort by
//! deletion time.  The name no longer ends in `.html`, and the rubbish
//! directory is not scanned, so a deleted page can never reappear in a listing.
//!
//! Two deletes of the same page within one second would produce the same
//! name.  The caller then asks for the next `attempt`, which appends `_<n>`.

use chrono::NaiveDateTime;

/// Subdirectory of the page directory holding soft-deleted pages.
pub const RUBBISH_DIR: &str = "rubbish";

/// Second-granularity timestamp that sorts lexically by time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Builds the rubbish entry name for `page` deleted at `deleted_at`.
///
/// `attempt` 0 gives the plain `<page>_<timestamp>` name; later attempts
/// append a counter to step around an existing entry.
pub fn rubbish_entry_name(page: &str, deleted_at: NaiveDateTime, attempt: u32) -> String {
    let stamp = deleted_at.format(TIMESTAMP_FORMAT);
    if attempt == 0 {
        format!("{page}_{stamp}")
    } else {
        format!("{page}_{stamp}_{attempt}")
    }
}
