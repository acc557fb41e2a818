//! Image lookup and `<img>` rendering.
//!
//! Pages refer to images by a logical name without committing to a format:
//! `<!--#image name="printer-front" -->`. The resolver turns that into a
//! concrete file by probing an ordered list of candidates under the image
//! directory:
//!
//! ```text
//! images/printer-front
//! images/printer-front.png
//! images/printer-front.gif
//! images/printer-front.jpg
//! images/printer-front.jpeg
//! ```
//!
//! The first candidate that exists as a regular file wins, even if later
//! candidates exist too. The rendered tag carries the natural dimensions of
//! the file (when it decodes as an image) and an alt text with the file size
//! in kilobytes, e.g. `alt="Front panel (12.35 KB)"`.
//!
//! ## Missing Images
//!
//! When no candidate exists the resolver renders a visible placeholder,
//! `[image printer-front not available]`, and logs a warning. The page is
//! still produced: a missing picture is an authoring problem to spot in the
//! output, not a reason to abort the build.

use crate::config::ImagesConfig;
use maud::{Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_IMAGE_DIR: &str = "images";
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "gif", "jpg", "jpeg"];

/// What a page asks for when it embeds an image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRequest {
    /// Logical name, with or without extension.
    pub name: String,
    /// Alt text; the file size is appended to it.
    pub alt: String,
    /// `border` attribute value.
    pub border: Option<String>,
    /// Additional attributes copied onto the tag in order.
    pub extra: Vec<(String, String)>,
}

impl ImageRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = alt.into();
        self
    }

    pub fn border(mut self, border: impl Into<String>) -> Self {
        self.border = Some(border.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((name.into(), value.into()));
        self
    }
}

/// The candidate that was found on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage {
    /// Path as referenced from the page, e.g. `images/logo.png`
    pub src: String,
    /// Path on disk
    pub path: PathBuf,
    /// File size in bytes
    pub bytes: u64,
    /// Natural `(width, height)`, if the file decodes as an image
    pub dimensions: Option<(u32, u32)>,
}

impl ResolvedImage {
    pub fn kilobytes(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }

    /// Alt text with the size appended: `"Logo (1.50 KB)"`.
    pub fn caption(&self, alt: &str) -> String {
        let size = format!("({:.2} KB)", self.kilobytes());
        if alt.is_empty() {
            size
        } else {
            format!("{alt} {size}")
        }
    }
}

/// Resolves logical image names against a directory on disk.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    /// Directory pages are rendered from; `src` paths are relative to it
    root: PathBuf,
    /// Image directory relative to `root`, empty for `root` itself
    dir: String,
    extensions: Vec<String>,
}

impl ImageResolver {
    /// Resolver with the stock extension order.
    pub fn new(root: impl Into<PathBuf>, dir: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            dir: dir.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn from_config(config: &ImagesConfig, root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            dir: config.dir.clone(),
            extensions: config.extensions.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the images, on disk.
    pub fn image_dir(&self) -> PathBuf {
        self.root.join(&self.dir)
    }

    /// Candidate `src` paths for a name, in probe order.
    pub fn candidates(&self, name: &str) -> Vec<String> {
        let base = if self.dir.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.dir.trim_end_matches('/'), name)
        };
        std::iter::once(base.clone())
            .chain(self.extensions.iter().map(|ext| format!("{base}.{ext}")))
            .collect()
    }

    /// Find the first candidate that exists as a regular file.
    pub fn resolve(&self, name: &str) -> Option<ResolvedImage> {
        if name.is_empty() {
            return None;
        }
        self.candidates(name).into_iter().find_map(|src| {
            let path = self.root.join(&src);
            let meta = fs::metadata(&path).ok().filter(|m| m.is_file())?;
            let dimensions = match image::image_dimensions(&path) {
                Ok(dims) => Some(dims),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "no dimensions for image");
                    None
                }
            };
            Some(ResolvedImage {
                src,
                path,
                bytes: meta.len(),
                dimensions,
            })
        })
    }

    /// Resolve and render in one step.
    pub fn render(&self, request: &ImageRequest) -> Markup {
        self.render_checked(request).0
    }

    /// Like [`render`](Self::render), also telling whether the placeholder
    /// was used.
    pub fn render_checked(&self, request: &ImageRequest) -> (Markup, bool) {
        match self.resolve(&request.name) {
            Some(image) => (render_image(&image, request), false),
            None => {
                warn!(image = %request.name, dir = %self.image_dir().display(), "image not found");
                (render_missing(&request.name), true)
            }
        }
    }
}

/// Render the `<img>` tag for a resolved image.
///
/// Assembled by hand because maud fixes attribute names at compile time and
/// the extra attributes come from page content. Every value goes through
/// maud's escaping.
pub fn render_image(image: &ResolvedImage, request: &ImageRequest) -> Markup {
    let mut tag = String::from("<img");
    push_attr(&mut tag, "src", &image.src);
    if let Some((width, height)) = image.dimensions {
        push_attr(&mut tag, "width", &width.to_string());
        push_attr(&mut tag, "height", &height.to_string());
    }
    push_attr(&mut tag, "alt", &image.caption(&request.alt));
    if let Some(border) = &request.border {
        push_attr(&mut tag, "border", border);
    }
    for (name, value) in &request.extra {
        if is_attr_name(name) {
            push_attr(&mut tag, name, value);
        } else {
            warn!(image = %request.name, attribute = %name, "dropping invalid attribute name");
        }
    }
    tag.push('>');
    PreEscaped(tag)
}

/// Placeholder shown in place of an image that could not be found.
pub fn render_missing(name: &str) -> Markup {
    html! {
        span.missing-image { "[image " (name) " not available]" }
    }
}

fn push_attr(tag: &mut String, name: &str, value: &str) {
    let escaped = html! { (value) }.into_string();
    tag.push(' ');
    tag.push_str(name);
    tag.push_str("=\"");
    tag.push_str(&escaped);
    tag.push('"');
}

fn is_attr_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}
