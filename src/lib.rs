//! # printsite
//!
//! Static site builder for a printer-driver project website. The site is a
//! handful of hand-written HTML page fragments sharing one layout; printsite
//! supplies the two pieces of generated markup they need and writes the
//! finished pages out.
//!
//! ```text
//! content/index.html  ─┐
//! content/p_*.html    ─┼─ expand directives ─ wrap in layout ─→ dist/*.html
//! content/images/     ─┘                                       dist/images/
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`images`] | Image resolver: probes `name`, `name.png`, `name.gif`, `name.jpg`, `name.jpeg` and renders `<img>` |
//! | [`nav`] | Navigation bar: home link plus every `p_*.html` page, active page unlinked |
//! | [`naming`] | `p_<label>.html` filename convention |
//! | [`directives`] | `<!--#image -->` / `<!--#nav -->` comments inside page fragments |
//! | [`generate`] | Page layout, `build` and `check` |
//! | [`config`] | `config.toml` loading, validation, and the documented stock file |
//! | [`types`] | [`PageEntry`](types::PageEntry), shared by config, nav and generate |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Directory Is the Route Table
//!
//! By default the navigation bar lists whatever `p_*.html` files sit in the
//! content directory, re-reading the directory for every page. Dropping a
//! new fragment in place is all it takes to publish a page. The order is the
//! directory-listing order and therefore depends on the filesystem; sites
//! that care list their pages in `[[nav.pages]]` instead, which fixes the
//! order and skips the scan.
//!
//! ## Missing Images Fail Open
//!
//! An image directive that matches no file renders a visible
//! `[image NAME not available]` marker and the build carries on. The build
//! report lists every such marker. A fragment that cannot be read or a
//! content directory that cannot be listed stops the build.
//!
//! ## Maud Over Template Engines
//!
//! The layout and the navigation bar are [Maud](https://maud.lambda.xyz/)
//! templates: checked at compile time, escaped by default, no template files
//! to ship. Page fragments themselves are trusted HTML and pass through
//! untouched.

pub mod config;
pub mod directives;
pub mod generate;
pub mod images;
pub mod nav;
pub mod naming;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
