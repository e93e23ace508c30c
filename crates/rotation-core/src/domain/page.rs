//! Page filename rules.
//!
//! Every page lives directly inside the page directory and is addressed by its
//! bare filename.  A [`PageName`] can only be constructed from a string that
//! passes these rules, so code holding one never has to re-check them:
//!
//! - the name ends with `.html`;
//! - the name contains no path separator (`/` or `\`), which keeps every
//!   read, write and rename inside the page directory;
//! - for edits, the name is not [`ROTATOR_PAGE`].
//!
//! The rotator page is the rendered rotation output.  It may be read for
//! preview but is never listed, written or deleted by the editor.

use std::fmt;

use thiserror::Error;

/// Suffix every page filename must carry.
pub const HTML_SUFFIX: &str = ".html";

/// Filename of the rotation output page.  Shared with the display side.
pub const ROTATOR_PAGE: &str = "rotator.html";

/// Reasons a string is not an acceptable page filename.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    /// The filename was empty.
    #[error("page filename is empty")]
    Empty,

    /// The filename does not end in `.html`.
    #[error("page filename must end with .html: {0:?}")]
    MissingHtmlSuffix(String),

    /// The filename contains `/` or `\` and could escape the page directory.
    #[error("page filename must not contain a path separator: {0:?}")]
    PathSeparator(String),

    /// The filename is the reserved rotation output page.
    #[error("{0} is reserved for the rotation output and cannot be modified")]
    Reserved(String),
}

impl NameError {
    /// Returns `true` when the name was rejected only because it is reserved.
    ///
    /// Callers report this case as "forbidden" rather than "invalid".
    pub fn is_reserved(&self) -> bool {
        matches!(self, NameError::Reserved(_))
    }
}

/// A page filename that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageName(String);

impl PageName {
    /// Validates `name` for reading.  The rotator page is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`NameError::Empty`], [`NameError::MissingHtmlSuffix`] or
    /// [`NameError::PathSeparator`].
    pub fn parse(name: &str) -> Result<Self, NameError> {
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if name.contains(['/', '\\']) {
            return Err(NameError::PathSeparator(name.to_string()));
        }
        if !name.ends_with(HTML_SUFFIX) {
            return Err(NameError::MissingHtmlSuffix(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    /// Validates `name` for writing, toggling or deleting.
    ///
    /// # Errors
    ///
    /// Everything [`PageName::parse`] rejects, plus [`NameError::Reserved`]
    /// for [`ROTATOR_PAGE`].
    pub fn editable(name: &str) -> Result<Self, NameError> {
        let parsed = Self::parse(name)?;
        if parsed.is_reserved() {
            return Err(NameError::Reserved(parsed.0));
        }
        Ok(parsed)
    }

    /// Returns `true` if this is the rotation output page.
    pub fn is_reserved(&self) -> bool {
        self.0 == ROTATOR_PAGE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for PageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for PageName {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
