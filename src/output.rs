//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Build / Check
//!
//! ```text
//! Pages
//! 001 Home → index.html
//! 002 Download → p_Download.html
//! 003 FAQ → p_FAQ.html
//!
//! Missing images
//!     p_Download.html: tarball-icon
//!
//! Built 3 pages, copied 2 files → dist
//! ```
//!
//! A check prints the same page and image sections and closes with
//! `Checked 3 pages`.
//!
//! ## Nav
//!
//! ```text
//! 001 Home (index.html)
//! 002 Download (p_Download.html)
//! ```

use crate::generate::BuildReport;
use crate::types::PageEntry;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format the result of a build or a check.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            page.label,
            page.file
        ));
    }

    if !report.missing_images.is_empty() {
        lines.push(String::new());
        lines.push("Missing images".to_string());
        for (page, image) in &report.missing_images {
            lines.push(format!("    {page}: {image}"));
        }
    }

    lines.push(String::new());
    match &report.output_dir {
        Some(dir) => lines.push(format!(
            "Built {}, copied {} \u{2192} {}",
            plural(report.pages.len(), "page"),
            plural(report.copied_files, "file"),
            dir.display()
        )),
        None => lines.push(format!("Checked {}", plural(report.pages.len(), "page"))),
    }
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

/// Format the pages of a navigation bar, home first.
pub fn format_nav_listing(pages: &[PageEntry]) -> Vec<String> {
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| format!("{} {} ({})", format_index(i + 1), page.label, page.file))
        .collect()
}

pub fn print_nav_listing(pages: &[PageEntry]) {
    for line in format_nav_listing(pages) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report() -> BuildReport {
        BuildReport {
            pages: vec![
                PageEntry::new("index.html", "Home"),
                PageEntry::new("p_Download.html", "Download"),
            ],
            missing_images: vec![],
            copied_files: 1,
            output_dir: Some(PathBuf::from("dist")),
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn build_output_lists_pages_in_order() {
        let lines = format_build_output(&report());
        assert_eq!(lines[0], "Pages");
        assert_eq!(lines[1], "001 Home \u{2192} index.html");
        assert_eq!(lines[2], "002 Download \u{2192} p_Download.html");
    }

    #[test]
    fn build_output_summary() {
        let lines = format_build_output(&report());
        assert_eq!(
            lines.last().unwrap(),
            "Built 2 pages, copied 1 file \u{2192} dist"
        );
        assert!(!lines.iter().any(|l| l == "Missing images"));
    }

    #[test]
    fn build_output_missing_images_section() {
        let mut report = report();
        report
            .missing_images
            .push(("p_Download.html".to_string(), "tarball-icon".to_string()));
        let lines = format_build_output(&report);
        let at = lines.iter().position(|l| l == "Missing images").unwrap();
        assert_eq!(lines[at + 1], "    p_Download.html: tarball-icon");
    }

    #[test]
    fn check_output_summary() {
        let mut report = report();
        report.output_dir = None;
        let lines = format_build_output(&report);
        assert_eq!(lines.last().unwrap(), "Checked 2 pages");
    }

    #[test]
    fn nav_listing() {
        let pages = vec![
            PageEntry::new("index.html", "Home"),
            PageEntry::new("p_FAQ.html", "FAQ"),
        ];
        assert_eq!(
            format_nav_listing(&pages),
            vec!["001 Home (index.html)", "002 FAQ (p_FAQ.html)"]
        );
    }
}
