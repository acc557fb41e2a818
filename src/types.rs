//! Shared types used by the config layer, the navigation renderer and the
//! site generator.

use serde::{Deserialize, Serialize};

/// One navigable page.
///
/// The filename is the identity: it is both the fragment read from the
/// content directory and the link target in the navigation bar. The label
/// is what the nav bar shows.
///
/// Entries come either from a directory scan (label derived from the
/// filename, see [`crate::naming::PagePattern`]) or from `[[nav.pages]]`
/// in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageEntry {
    /// Filename relative to the content directory, e.g. `p_Download.html`
    pub file: String,
    /// Display label in nav, e.g. `Download`
    pub label: String,
}

impl PageEntry {
    pub fn new(file: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            label: label.into(),
        }
    }

    /// Whether this entry is the page being served for `request_path`.
    ///
    /// Only the last path segment is compared, so `/p_FAQ.html`,
    /// `docs/p_FAQ.html` and `p_FAQ.html` all select `p_FAQ.html`.
    pub fn is_current(&self, request_path: &str) -> bool {
        let last = request_path.rsplit('/').next().unwrap_or(request_path);
        !last.is_empty() && last == self.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_matches_bare_filename() {
        let entry = PageEntry::new("p_FAQ.html", "FAQ");
        assert!(entry.is_current("p_FAQ.html"));
    }

    #[test]
    fn current_matches_last_segment_of_request_path() {
        let entry = PageEntry::new("p_FAQ.html", "FAQ");
        assert!(entry.is_current("/p_FAQ.html"));
        assert!(entry.is_current("/driver/p_FAQ.html"));
    }

    #[test]
    fn current_rejects_other_pages() {
        let entry = PageEntry::new("p_FAQ.html", "FAQ");
        assert!(!entry.is_current("p_Download.html"));
        assert!(!entry.is_current("/p_FAQ.html/"));
        assert!(!entry.is_current(""));
    }

    #[test]
    fn current_is_not_a_substring_match() {
        let entry = PageEntry::new("index.html", "Home");
        assert!(!entry.is_current("old-index.html"));
    }
}
