//! HTML site generation.
//!
//! Turns a content directory of page fragments into a finished static site.
//!
//! ## Input
//!
//! ```text
//! content/
//! ├── config.toml          # Optional, see [`crate::config`]
//! ├── index.html           # Home page fragment
//! ├── p_Download.html      # Nav page "Download"
//! ├── p_FAQ.html           # Nav page "FAQ"
//! ├── images/              # Looked up by <!--#image --> directives
//! │   └── logo.png
//! └── assets/              # Copied verbatim to the output root
//!     └── style.css
//! ```
//!
//! ## Output
//!
//! Each fragment is expanded (see [`crate::directives`]) and wrapped in the
//! shared layout: document head, navigation bar, content, navigation bar
//! again with the configured caption, optional footer line.
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── p_Download.html
//! ├── p_FAQ.html
//! ├── images/logo.png
//! └── style.css
//! ```
//!
//! Every page renders its own navigation bar from a fresh look at the
//! content directory; nothing is cached between pages.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for the layout. Fragment text is
//! trusted HTML and inserted as-is; everything generated around it is
//! escaped by maud.

use crate::config::{self, ConfigError, SiteConfig};
use crate::directives::{self, Directive, DirectiveError, Segment};
use crate::images::{ImageRequest, ImageResolver};
use crate::nav::{NavError, NavSource, render_nav};
use crate::types::PageEntry;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Navigation error: {0}")]
    Nav(#[from] NavError),
    #[error("cannot read page {file}: {source}")]
    Page {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{file}: {source}")]
    Directive {
        file: String,
        #[source]
        source: DirectiveError,
    },
    #[error("Copy error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS: &str = include_str!("../static/style.css");

/// A content directory together with its resolved configuration.
#[derive(Debug, Clone)]
pub struct Site {
    content_dir: PathBuf,
    config: SiteConfig,
    resolver: ImageResolver,
    nav: NavSource,
}

/// One page, rendered but not yet written.
#[derive(Debug)]
pub struct RenderedPage {
    pub page: PageEntry,
    pub html: Markup,
    /// Image names that fell back to the placeholder
    pub missing_images: Vec<String>,
}

/// What a build (or check) did.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Pages rendered, home first
    pub pages: Vec<PageEntry>,
    /// `(page file, image name)` for every placeholder rendered
    pub missing_images: Vec<(String, String)>,
    /// Files copied from the image and asset directories
    pub copied_files: usize,
    /// `None` for a check, which writes nothing
    pub output_dir: Option<PathBuf>,
}

impl Site {
    /// Load `config.toml` from `content_dir` and set up the helpers.
    pub fn load(content_dir: &Path) -> Result<Self, GenerateError> {
        let config = config::load_config(content_dir)?;
        Ok(Self::new(content_dir, config))
    }

    pub fn new(content_dir: &Path, config: SiteConfig) -> Self {
        let resolver = ImageResolver::from_config(&config.images, content_dir);
        let nav = NavSource::from_config(&config.nav, content_dir);
        Self {
            content_dir: content_dir.to_path_buf(),
            config,
            resolver,
            nav,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn home(&self) -> PageEntry {
        self.config.nav.home_entry()
    }

    /// Every page of the site: home, then the nav entries.
    pub fn pages(&self) -> Result<Vec<PageEntry>, GenerateError> {
        let home = self.home();
        let mut pages = vec![home.clone()];
        pages.extend(self.nav.entries()?.into_iter().filter(|p| p.file != home.file));
        Ok(pages)
    }

    /// Navigation bar for the page at `current`, from a fresh listing.
    pub fn nav(&self, current: &str, caption: Option<&str>) -> Result<Markup, GenerateError> {
        let entries = self.nav.entries()?;
        Ok(render_nav(&self.home(), &entries, current, caption))
    }

    /// Read, expand and lay out one page.
    pub fn render_page(&self, page: &PageEntry) -> Result<RenderedPage, GenerateError> {
        let path = self.content_dir.join(&page.file);
        let source = fs::read_to_string(&path).map_err(|source| GenerateError::Page {
            file: page.file.clone(),
            source,
        })?;
        let segments = directives::parse(&source).map_err(|source| GenerateError::Directive {
            file: page.file.clone(),
            source,
        })?;

        let mut missing_images = Vec::new();
        let mut body = String::with_capacity(source.len());
        for segment in segments {
            match segment {
                Segment::Text(text) => body.push_str(text),
                Segment::Directive(Directive::Image(request)) => {
                    let request = self.with_default_border(request);
                    let (markup, missing) = self.resolver.render_checked(&request);
                    if missing {
                        missing_images.push(request.name);
                    }
                    body.push_str(&markup.into_string());
                }
                Segment::Directive(Directive::Nav { caption }) => {
                    let markup = self.nav(&page.file, caption.as_deref())?;
                    body.push_str(&markup.into_string());
                }
            }
        }

        let top_nav = self.nav(&page.file, None)?;
        let bottom_nav = self.nav(&page.file, self.config.nav.caption.as_deref())?;
        let title = format!("{} - {}", page.label, self.config.site.title);
        let html = base_document(
            &self.config.site.lang,
            &title,
            top_nav,
            PreEscaped(body),
            bottom_nav,
            self.config.site.footer.as_deref(),
        );

        info!(page = %page.file, "rendered page");
        Ok(RenderedPage {
            page: page.clone(),
            html,
            missing_images,
        })
    }

    /// Render every page; stops at the first failure.
    pub fn render_all(&self) -> Result<Vec<RenderedPage>, GenerateError> {
        self.pages()?
            .iter()
            .map(|page| self.render_page(page))
            .collect()
    }

    fn with_default_border(&self, mut request: ImageRequest) -> ImageRequest {
        if request.border.is_none() && !self.config.images.border.is_empty() {
            request.border = Some(self.config.images.border.clone());
        }
        request
    }
}

/// Render every page of `content_dir` into `output_dir` and copy the image
/// and asset trees next to them.
///
/// All pages are rendered before anything is written, so a broken fragment
/// leaves the output directory untouched. Static files never take the place
/// of a rendered page: colliding files are skipped and pages are written last.
pub fn build(content_dir: &Path, output_dir: &Path) -> Result<BuildReport, GenerateError> {
    let site = Site::load(content_dir)?;
    let rendered = site.render_all()?;
    let page_targets: HashSet<PathBuf> = rendered
        .iter()
        .map(|page| output_dir.join(&page.page.file))
        .collect();

    fs::create_dir_all(output_dir)?;
    let config = site.config();
    let mut copied_files = copy_tree(
        &content_dir.join(&config.images.dir),
        &output_dir.join(&config.images.dir),
        &page_targets,
    )?;
    copied_files += copy_tree(
        &content_dir.join(&config.site.assets_dir),
        output_dir,
        &page_targets,
    )?;

    for page in &rendered {
        let target = output_dir.join(&page.page.file);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &page.html.0)?;
    }

    let mut report = report_for(rendered);
    report.copied_files = copied_files;
    report.output_dir = Some(output_dir.to_path_buf());
    Ok(report)
}

/// Render every page without writing anything.
pub fn check(content_dir: &Path) -> Result<BuildReport, GenerateError> {
    let site = Site::load(content_dir)?;
    Ok(report_for(site.render_all()?))
}

fn report_for(rendered: Vec<RenderedPage>) -> BuildReport {
    let mut report = BuildReport::default();
    for page in rendered {
        report.missing_images.extend(
            page.missing_images
                .into_iter()
                .map(|image| (page.page.file.clone(), image)),
        );
        report.pages.push(page.page);
    }
    report
}

/// Copy the files under `src` into `dst`, keeping relative paths.
///
/// A missing `src` copies nothing. Files that would land on one of `reserved`
/// are skipped with a warning.
fn copy_tree(
    src: &Path,
    dst: &Path,
    reserved: &HashSet<PathBuf>,
) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if reserved.contains(&target) {
            warn!(file = %entry.path().display(), "skipping static file that collides with a page");
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// Layout
// ============================================================================

/// The shared page layout.
fn base_document(
    lang: &str,
    title: &str,
    top_nav: Markup,
    content: Markup,
    bottom_nav: Markup,
    footer: Option<&str>,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                header.site-header { (top_nav) }
                main { (content) }
                footer.site-footer {
                    (bottom_nav)
                    @if let Some(footer) = footer {
                        p.footer-note { (footer) }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
