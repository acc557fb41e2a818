//! Navigation bar.
//!
//! Every page carries the same horizontal bar of links, once above the
//! content and once below it:
//!
//! ```text
//! Home | Download | FAQ | Printers | Last updated 2024-01-01
//! ```
//!
//! The home page always comes first. The remaining entries come from a
//! [`NavSource`]:
//!
//! - [`NavSource::Scan`] lists the content directory on every render and
//!   keeps the regular files matching the page pattern (`p_*.html`). Entries
//!   appear in directory-listing order, which is whatever the filesystem
//!   yields; it is not sorted. Adding a page file makes it show up on the
//!   next render, no restart or cache flush involved.
//! - [`NavSource::Declared`] is a fixed list from `[[nav.pages]]` in
//!   `config.toml`, rendered in the declared order.
//!
//! The entry for the page being rendered is shown as plain emphasized text
//! instead of a link. An optional caption closes the bar.

use crate::config::NavConfig;
use crate::naming::PagePattern;
use crate::types::PageEntry;
use maud::{Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("cannot list pages in {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the nav entries after the home page come from.
#[derive(Debug, Clone)]
pub enum NavSource {
    /// List `dir` on every call, keep files matching `pattern`.
    Scan { dir: PathBuf, pattern: PagePattern },
    /// Fixed, ordered list.
    Declared(Vec<PageEntry>),
}

impl NavSource {
    /// Declared pages when the config lists any, otherwise a scan of
    /// `content_dir`.
    pub fn from_config(config: &NavConfig, content_dir: &Path) -> Self {
        if config.pages.is_empty() {
            NavSource::Scan {
                dir: content_dir.to_path_buf(),
                pattern: config.pattern(),
            }
        } else {
            NavSource::Declared(config.pages.clone())
        }
    }

    /// Current entries. A scan hits the filesystem every time.
    pub fn entries(&self) -> Result<Vec<PageEntry>, NavError> {
        match self {
            NavSource::Scan { dir, pattern } => scan_pages(dir, pattern),
            NavSource::Declared(pages) => Ok(pages.clone()),
        }
    }
}

/// List the regular files of `dir` whose names match `pattern`.
///
/// Order is directory-listing order. Entries whose names are not valid
/// UTF-8 cannot match a pattern and are skipped.
pub fn scan_pages(dir: &Path, pattern: &PagePattern) -> Result<Vec<PageEntry>, NavError> {
    let io_err = |source| NavError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut pages = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(page) = pattern.entry(name) else {
            continue;
        };
        // Symlinks count as files when they point at one.
        let is_file = fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false);
        if is_file {
            pages.push(page);
        }
    }
    debug!(dir = %dir.display(), count = pages.len(), "scanned nav pages");
    Ok(pages)
}

/// Render the bar for the page at `current`.
///
/// Entries equal to the home file are skipped so home is listed once.
pub fn render_nav(
    home: &PageEntry,
    entries: &[PageEntry],
    current: &str,
    caption: Option<&str>,
) -> Markup {
    html! {
        nav.site-nav {
            ul {
                (nav_item(home, current))
                @for entry in entries.iter().filter(|e| e.file != home.file) {
                    (nav_item(entry, current))
                }
                @if let Some(caption) = caption {
                    li.nav-caption { (caption) }
                }
            }
        }
    }
}

/// Re-read the source and render the bar.
pub fn build_nav(
    source: &NavSource,
    home: &PageEntry,
    current: &str,
    caption: Option<&str>,
) -> Result<Markup, NavError> {
    let entries = source.entries()?;
    Ok(render_nav(home, &entries, current, caption))
}

fn nav_item(entry: &PageEntry, current: &str) -> Markup {
    html! {
        li {
            @if entry.is_current(current) {
                strong.current { (entry.label) }
            } @else {
                a href=(entry.file) { (entry.label) }
            }
        }
    }
}
