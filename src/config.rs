//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content directory next to the page fragments and is entirely
//! optional: stock defaults describe the usual layout (`index.html` home
//! page, `p_*.html` nav pages, images under `images/`).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Printer Driver"
//! lang = "en"
//! # footer = "Released under the GPL"
//! assets_dir = "assets"     # Copied verbatim to the output root
//!
//! [nav]
//! home = "index.html"       # Always the first nav entry
//! home_label = "Home"
//! prefix = "p_"             # Nav pages are files named <prefix><label><suffix>
//! suffix = ".html"
//! # caption = "Last updated 2024-01-01"   # Trailing text of the bottom nav bar
//!
//! # Optional explicit page list. When present it replaces the directory
//! # scan and fixes the nav order.
//! # [[nav.pages]]
//! # file = "p_Download.html"
//! # label = "Download"
//!
//! [images]
//! dir = "images"
//! extensions = ["png", "gif", "jpg", "jpeg"]   # Probed in this order
//! border = "0"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [nav]
//! caption = "Driver 0.9 released"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::images::{DEFAULT_EXTENSIONS, DEFAULT_IMAGE_DIR};
use crate::naming::{DEFAULT_PREFIX, DEFAULT_SUFFIX, PagePattern};
use crate::types::PageEntry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Document-level settings (title, language, footer).
    pub site: SiteMeta,
    /// Navigation bar settings.
    pub nav: NavConfig,
    /// Image lookup settings.
    pub images: ImagesConfig,
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_relative_path("nav.home", &self.nav.home)?;
        if self.nav.prefix.is_empty() || self.nav.suffix.is_empty() {
            return Err(ConfigError::Validation(
                "nav.prefix and nav.suffix must not be empty".into(),
            ));
        }
        for page in &self.nav.pages {
            if page.file.is_empty() || page.label.is_empty() {
                return Err(ConfigError::Validation(
                    "nav.pages entries need both file and label".into(),
                ));
            }
            check_relative_path("nav.pages.file", &page.file)?;
        }
        if self.images.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "images.extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self
            .images
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "images.extensions entries are bare extensions, got {ext:?}"
            )));
        }
        check_relative_path("images.dir", &self.images.dir)?;
        check_relative_path("site.assets_dir", &self.site.assets_dir)?;
        Ok(())
    }
}

/// Paths from the config must name something strictly inside the content
/// directory: relative, no `..`, and not the directory itself.
fn check_relative_path(key: &str, dir: &str) -> Result<(), ConfigError> {
    if dir.is_empty() {
        return Err(ConfigError::Validation(format!("{key} must not be empty")));
    }
    let path = Path::new(dir);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    let names_something = path
        .components()
        .any(|c| matches!(c, Component::Normal(_)));
    if escapes || !names_something {
        return Err(ConfigError::Validation(format!(
            "{key} must be a relative path inside the content directory, got {dir:?}"
        )));
    }
    Ok(())
}

/// Document-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Appended to every page title: `<label> - <title>`.
    pub title: String,
    /// `lang` attribute of the `<html>` element.
    pub lang: String,
    /// Optional footer line under the bottom nav bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    /// Directory whose contents are copied to the output root.
    pub assets_dir: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Printer Driver".to_string(),
            lang: "en".to_string(),
            footer: None,
            assets_dir: "assets".to_string(),
        }
    }
}

/// Navigation bar settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Home page file, always the first nav entry.
    pub home: String,
    /// Label of the home entry.
    pub home_label: String,
    /// Filename prefix of nav pages.
    pub prefix: String,
    /// Filename suffix of nav pages.
    pub suffix: String,
    /// Trailing free text of the bottom nav bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Explicit page list. Empty means "scan the content directory".
    pub pages: Vec<PageEntry>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            home: "index.html".to_string(),
            home_label: "Home".to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            caption: None,
            pages: Vec::new(),
        }
    }
}

impl NavConfig {
    pub fn pattern(&self) -> PagePattern {
        PagePattern::new(&self.prefix, &self.suffix)
    }

    pub fn home_entry(&self) -> PageEntry {
        PageEntry::new(&self.home, &self.home_label)
    }
}

/// Image lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Directory holding images, relative to the content directory.
    pub dir: String,
    /// Extensions appended to a requested name, tried in order after the
    /// bare name.
    pub extensions: Vec<String>,
    /// Default `border` attribute for image directives that set none.
    pub border: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_IMAGE_DIR.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            border: "0".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// [`SiteConfig::default`] as a TOML table, the starting point that a
/// site's `config.toml` is laid over.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Lay a site's `config.toml` over the stock defaults.
///
/// `[site]`, `[nav]` and `[images]` merge key by key, so a file that only
/// sets `nav.caption` keeps every other default. Arrays are values, not
/// tables: a site's `[[nav.pages]]` or `images.extensions` replaces the
/// default list outright.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse `<content_dir>/config.toml` without interpreting it.
///
/// A site without the file is a site on stock defaults: `Ok(None)`.
pub fn load_raw_config(content_dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = content_dir.join(CONFIG_FILE);
    if !config_path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Turn defaults plus the site's (optional) file into a checked [`SiteConfig`].
///
/// Typos surface here as [`ConfigError::Toml`] from `deny_unknown_fields`,
/// unusable values as [`ConfigError::Validation`].
pub fn resolve_config(
    defaults: toml::Value,
    site_file: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match site_file {
        Some(file) => merge_toml(defaults, file),
        None => defaults,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// The configuration of the site in `content_dir`.
pub fn load_config(content_dir: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value()?, load_raw_config(content_dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# printsite configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Document
# ---------------------------------------------------------------------------
[site]
# Appended to every page title as "<nav label> - <title>".
title = "Printer Driver"
lang = "en"

# Optional line of text under the bottom navigation bar.
# footer = "Released under the GPL"

# Directory whose contents are copied to the output root (stylesheets,
# favicon, downloads). Missing directory is fine.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Navigation bar
# ---------------------------------------------------------------------------
[nav]
# Home page, always the first entry of the bar.
home = "index.html"
home_label = "Home"

# Nav pages are the files of the content directory named
# <prefix><label><suffix>, e.g. p_Download.html -> "Download".
# They appear in directory-listing order, which depends on the filesystem.
prefix = "p_"
suffix = ".html"

# Trailing text of the bottom navigation bar.
# caption = "Last updated 2024-01-01"

# Explicit page list. When present it replaces the directory scan and the
# bar follows the order given here.
# [[nav.pages]]
# file = "p_Download.html"
# label = "Download"

# ---------------------------------------------------------------------------
# Images
# ---------------------------------------------------------------------------
[images]
# Directory holding images, relative to the content directory.
dir = "images"

# <!--#image name="logo" --> tries images/logo, then images/logo.png,
# images/logo.gif, ... in this order. First existing file wins.
extensions = ["png", "gif", "jpg", "jpeg"]

# Border attribute used when an image directive sets none.
border = "0"
"##
}
