//! Shared test utilities for the printsite test suite.
//!
//! Fixtures are written into a fresh [`TempDir`] instead of being copied from
//! a checked-in tree, so each test states exactly which files exist.
//!
//! # Usage
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let tmp = setup_site();
//! let site = Site::load(tmp.path()).unwrap();
//! assert_labels(&site.pages().unwrap(), &["Home", "Download", "FAQ"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::types::PageEntry;

// =========================================================================
// File writers
// =========================================================================

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) {
    write_bytes(path, contents.as_bytes());
}

pub fn write_bytes(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
}

/// Write a real PNG of the given size, whatever the file extension says.
pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    image::RgbImage::new(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

// =========================================================================
// Fixture setup
// =========================================================================

/// A small driver site: home page, two nav pages, one stray file, one image.
///
/// ```text
/// index.html           <!--#image name="logo" alt="Logo" -->
/// p_Download.html      links to a missing image
/// p_FAQ.html
/// notes.txt            not a nav page
/// images/logo.png      16x8
/// assets/style.css
/// ```
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_file(
        &root.join("index.html"),
        "<h1>Printer Driver</h1>\n<!--#image name=\"logo\" alt=\"Logo\" -->\n<p>Welcome.</p>\n",
    );
    write_file(
        &root.join("p_Download.html"),
        "<h1>Download</h1>\n<!--#image name=\"tarball-icon\" -->\n",
    );
    write_file(&root.join("p_FAQ.html"), "<h1>FAQ</h1>\n<p>Ask away.</p>\n");
    write_file(&root.join("notes.txt"), "scratch");
    write_png(&root.join("images/logo.png"), 16, 8);
    write_file(&root.join("assets/style.css"), "body { margin: 0 }\n");
    tmp
}

// =========================================================================
// Assertions
// =========================================================================

/// Labels of a list of entries, in order.
pub fn labels(entries: &[PageEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.label.as_str()).collect()
}

/// Assert that entries carry exactly these labels, in any order.
///
/// Directory scans follow directory-listing order, which tests must not
/// depend on.
pub fn assert_labels(entries: &[PageEntry], expected: &[&str]) {
    let mut actual = labels(entries);
    actual.sort_unstable();
    let mut expected = expected.to_vec();
    expected.sort_unstable();
    assert_eq!(actual, expected, "page labels mismatch");
}

/// Number of non-overlapping occurrences of `needle` in `haystack`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
