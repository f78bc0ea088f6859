//! CLI output formatting.
//!
//! Every entity is shown by its identity first (positional index + title),
//! with filesystem paths as indented context lines underneath.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Gallery
//! Items
//! 001 Cat (2 images)
//!     Source: cat/
//!     Thumbnail: a.jpg
//!     001 a.jpg
//!     002 b.png
//!
//! Skipped
//!     dog: Thumbnail image 'missing.jpg' does not exist. Check metadata.
//! ```
//!
//! ## Build
//!
//! ```text
//! Skipped dog: Thumbnail image 'missing.jpg' does not exist. Check metadata.
//! Processing Index..
//! Processing Cat..
//!     a.jpg: 800x600, thumbnail 280x210
//! Built Gallery: 1 item, 2 images → html
//! ```
//!
//! # Architecture
//!
//! Each `format_*` function is pure and returns `Vec<String>`; the `print_*`
//! wrappers write to stdout.

use crate::generate::{BuildEvent, BuildReport, PAGE_FILE};
use crate::imaging::Dimensions;
use crate::metadata::{LoadOutcome, SkippedItem};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn format_dims(d: Dimensions) -> String {
    format!("{}x{}", d.width, d.height)
}

fn skipped_lines(skipped: &[SkippedItem]) -> Vec<String> {
    skipped
        .iter()
        .map(|s| format!("{}{}: {}", indent(1), s.name, s.error))
        .collect()
}

// ============================================================================
// Check: content inventory
// ============================================================================

/// Format the result of loading the content directory.
pub fn format_load_output(outcome: &LoadOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    let site = &outcome.site;

    lines.push(site.title().unwrap_or("(untitled site)").to_string());
    lines.push("Items".to_string());
    if site.items.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, item) in site.items.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            item.title,
            plural(item.images.len(), "image")
        ));
        lines.push(format!("{}Source: {}/", indent(1), item.name));
        lines.push(format!("{}Thumbnail: {}", indent(1), item.thumb));
        for (j, image) in item.images.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(j + 1), image));
        }
    }

    if !outcome.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        lines.extend(skipped_lines(&outcome.skipped));
    }

    lines
}

/// Print the content inventory to stdout.
pub fn print_load_output(outcome: &LoadOutcome) {
    for line in format_load_output(outcome) {
        println!("{}", line);
    }
}

// ============================================================================
// Build: progress events
// ============================================================================

/// Format a single build progress event as display lines.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::OutputReset { path } => {
            vec![format!("Output: {}/ (reset)", path.display())]
        }
        BuildEvent::ItemSkipped { name, reason } => {
            vec![format!("Skipped {}: {}", name, reason)]
        }
        BuildEvent::PageRendered { page } => {
            if page.as_path() == Path::new(PAGE_FILE) {
                vec!["Processing Index..".to_string()]
            } else {
                vec![format!("{}Page: {}", indent(1), page.display())]
            }
        }
        BuildEvent::PageFailed { page, reason } => {
            vec![format!(
                "{}Page {} not written: {}",
                indent(1),
                page.display(),
                reason
            )]
        }
        BuildEvent::ItemStarted { title, .. } => vec![format!("Processing {}..", title)],
        BuildEvent::ImageMaterialized {
            filename,
            full,
            thumbnail,
            ..
        } => vec![format!(
            "{}{}: {}, thumbnail {}",
            indent(1),
            filename,
            format_dims(*full),
            format_dims(*thumbnail)
        )],
    }
}

// ============================================================================
// Build: summary
// ============================================================================

/// Format the end-of-build summary.
pub fn format_build_summary(report: &BuildReport, output_dir: &Path) -> Vec<String> {
    let site = match &report.site_title {
        Some(title) => format!("{title}: "),
        None => String::new(),
    };
    let mut lines = vec![format!(
        "Built {}{}, {} \u{2192} {}",
        site,
        plural(report.items_built, "item"),
        plural(report.images_written, "image"),
        output_dir.display()
    )];

    if !report.skipped.is_empty() {
        lines.push(format!("Skipped {}:", plural(report.skipped.len(), "item")));
        lines.extend(skipped_lines(&report.skipped));
    }

    if !report.page_failures.is_empty() {
        lines.push(format!(
            "{} not written:",
            plural(report.page_failures.len(), "page")
        ));
        for failure in &report.page_failures {
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                failure.page.display(),
                failure.error
            ));
        }
    }

    lines
}

/// Print the end-of-build summary to stdout.
pub fn print_build_summary(report: &BuildReport, output_dir: &Path) {
    for line in format_build_summary(report, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::PageFailure;
    use crate::metadata::ItemError;
    use crate::render::RenderError;
    use crate::types::{ItemRecord, SiteRecord};
    use serde_json::{Map, json};
    use std::path::PathBuf;

    fn site(items: Vec<ItemRecord>) -> SiteRecord {
        let mut fields = Map::new();
        fields.insert("title".into(), json!("Gallery"));
        SiteRecord { fields, items }
    }

    fn cat() -> ItemRecord {
        ItemRecord {
            name: "cat".into(),
            title: "Cat".into(),
            thumb: "a.jpg".into(),
            images: vec!["a.jpg".into(), "b.png".into()],
            fullimage_path: "cat/img".into(),
            thumbnail_path: "cat/img/thumbs".into(),
            extra: Map::new(),
        }
    }

    fn skipped_dog() -> SkippedItem {
        SkippedItem {
            name: "dog".into(),
            error: ItemError::ThumbnailNotFound("missing.jpg".into()),
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn plural_handles_one() {
        assert_eq!(plural(1, "item"), "1 item");
        assert_eq!(plural(0, "item"), "0 items");
        assert_eq!(plural(3, "image"), "3 images");
    }

    #[test]
    fn load_output_lists_items_and_skips() {
        let outcome = LoadOutcome {
            site: site(vec![cat()]),
            skipped: vec![skipped_dog()],
        };

        let lines = format_load_output(&outcome);
        assert_eq!(
            lines,
            vec![
                "Gallery",
                "Items",
                "001 Cat (2 images)",
                "    Source: cat/",
                "    Thumbnail: a.jpg",
                "    001 a.jpg",
                "    002 b.png",
                "",
                "Skipped",
                "    dog: Thumbnail image 'missing.jpg' does not exist. Check metadata.",
            ]
        );
    }

    #[test]
    fn load_output_empty_site() {
        let outcome = LoadOutcome {
            site: SiteRecord {
                fields: Map::new(),
                items: vec![],
            },
            skipped: vec![],
        };
        assert_eq!(
            format_load_output(&outcome),
            vec!["(untitled site)", "Items", "    (none)"]
        );
    }

    #[test]
    fn build_events_format() {
        assert_eq!(
            format_build_event(&BuildEvent::ItemStarted {
                title: "Cat".into(),
            }),
            vec!["Processing Cat.."]
        );
        assert_eq!(
            format_build_event(&BuildEvent::PageRendered {
                page: PathBuf::from("index.html")
            }),
            vec!["Processing Index.."]
        );
        assert_eq!(
            format_build_event(&BuildEvent::PageRendered {
                page: PathBuf::from("cat").join("index.html")
            }),
            vec![format!("    Page: {}", PathBuf::from("cat").join("index.html").display())]
        );
        assert_eq!(
            format_build_event(&BuildEvent::ImageMaterialized {
                filename: "a.jpg".into(),
                full: Dimensions {
                    width: 800,
                    height: 600
                },
                thumbnail: Dimensions {
                    width: 280,
                    height: 210
                },
            }),
            vec!["    a.jpg: 800x600, thumbnail 280x210"]
        );
        assert_eq!(
            format_build_event(&BuildEvent::ItemSkipped {
                name: "dog".into(),
                reason: "bad".into()
            }),
            vec!["Skipped dog: bad"]
        );
    }

    #[test]
    fn summary_reports_counts() {
        let report = BuildReport {
            site_title: Some("Gallery".into()),
            items_built: 1,
            images_written: 2,
            skipped: vec![],
            page_failures: vec![],
        };
        assert_eq!(
            format_build_summary(&report, Path::new("html")),
            vec!["Built Gallery: 1 item, 2 images \u{2192} html"]
        );
    }

    #[test]
    fn summary_lists_skips_and_failures() {
        let report = BuildReport {
            site_title: None,
            items_built: 0,
            images_written: 0,
            skipped: vec![skipped_dog()],
            page_failures: vec![PageFailure {
                page: PathBuf::from("index.html"),
                error: RenderError::Write {
                    path: PathBuf::from("html/index.html"),
                    source: std::io::Error::other("disk full"),
                },
            }],
        };

        let lines = format_build_summary(&report, Path::new("html"));
        assert_eq!(lines[0], "Built 0 items, 0 images \u{2192} html");
        assert_eq!(lines[1], "Skipped 1 item:");
        assert!(lines[2].starts_with("    dog: Thumbnail image"));
        assert_eq!(lines[3], "1 page not written:");
        assert!(lines[4].starts_with("    index.html: Cannot write"));
        assert!(lines[4].ends_with("disk full"));
    }
}
