//! Filename convention for navigable pages.
//!
//! A page takes part in navigation when its filename carries a fixed prefix
//! and a fixed suffix. The display label is whatever sits between them:
//!
//! - `p_Download.html` → "Download"
//! - `p_Printer_Models.html` → "Printer_Models"
//! - `index.html` → not a nav page (wrong prefix)
//! - `p_.html` → not a nav page (empty label)
//!
//! The label is not otherwise transformed.

use crate::types::PageEntry;

pub const DEFAULT_PREFIX: &str = "p_";
pub const DEFAULT_SUFFIX: &str = ".html";

/// The prefix/suffix pair a filename must carry to be a nav page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePattern {
    prefix: String,
    suffix: String,
}

impl Default for PagePattern {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_SUFFIX)
    }
}

impl PagePattern {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Derive the display label, or `None` if the filename does not match.
    ///
    /// The suffix is stripped from what remains after the prefix, so a
    /// prefix and suffix can never overlap inside a short filename.
    pub fn label<'a>(&self, filename: &'a str) -> Option<&'a str> {
        filename
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_suffix(self.suffix.as_str()))
            .filter(|label| !label.is_empty())
    }

    pub fn matches(&self, filename: &str) -> bool {
        self.label(filename).is_some()
    }

    /// Build a [`PageEntry`] for a matching filename.
    pub fn entry(&self, filename: &str) -> Option<PageEntry> {
        self.label(filename)
            .map(|label| PageEntry::new(filename, label))
    }
}
