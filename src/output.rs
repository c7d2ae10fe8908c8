//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every post leads with
//! its positional index and title; the source file, series and generated
//! images follow as indented context lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Posts
//! 001 Home
//!     Source: index.md
//! 002 A Practical Guide to the Web Cryptography API
//!     Source: blog/a-practical-guide-to-the-web-cryptography-api.md
//!     Series: web-crypto
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Build
//!
//! ```text
//! 002 A Practical Guide to the Web Cryptography API
//!     Source: blog/a-practical-guide-to-the-web-cryptography-api.md
//!     Series: Web Crypto
//!     title: a-practical-guide-to-the-web-cryptography-api.png (generated)
//!     series: web-crypto.png (exists)
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::og::{OgImage, OgImageKind, OgStatus};
use crate::pipeline::{BuildResult, PipelineEvent};
use crate::subscribe::SubscribeOutcome;
use crate::types::ContentFile;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn entity_header(index: usize, title: &str) -> String {
    format!("{} {}", format_index(index), title)
}

fn image_line(image: &OgImage) -> String {
    let kind = match image.kind {
        OgImageKind::Title => "title",
        OgImageKind::Series => "series",
    };
    let status = match image.status {
        OgStatus::Generated => "generated",
        OgStatus::Exists => "exists",
    };
    let name = image
        .path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| image.path.display().to_string());
    format!("    {}: {} ({})", kind, name, status)
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the scanned posts plus the config file, if present.
pub fn format_scan_output(files: &[ContentFile], source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];

    for (i, file) in files.iter().enumerate() {
        lines.push(entity_header(i + 1, &file.title));
        lines.push(format!("    Source: {}", file.source));
        if let Some(series) = &file.series {
            lines.push(format!("    Series: {}", series.slug()));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    } else {
        lines.push("    (stock defaults)".to_string());
    }

    lines
}

pub fn print_scan_output(files: &[ContentFile], source_root: &Path) {
    for line in format_scan_output(files, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format a single enrichment progress event as display lines.
pub fn format_pipeline_event(event: &PipelineEvent) -> Vec<String> {
    match event {
        PipelineEvent::FileEnriched {
            index,
            title,
            source,
            series,
            images,
        } => {
            let mut lines = vec![
                entity_header(*index, title),
                format!("    Source: {}", source),
            ];
            if let Some(series) = series {
                lines.push(format!("    Series: {}", series));
            }
            lines.extend(images.iter().map(image_line));
            lines
        }
    }
}

/// Totals after a build.
pub fn format_build_summary(result: &BuildResult) -> Vec<String> {
    let images = result.files.iter().flat_map(|e| &e.images);
    let (generated, existing) = images.fold((0, 0), |(g, e), image| match image.status {
        OgStatus::Generated => (g + 1, e),
        OgStatus::Exists => (g, e + 1),
    });
    vec![
        format!(
            "Enriched {} files: {} images generated, {} already present",
            result.files.len(),
            generated,
            existing
        ),
        format!("Manifest \u{2192} {}", result.manifest_path.display()),
        format_sitemap_line(&result.sitemap_path, result.sitemap_entries),
    ]
}

pub fn print_build_summary(result: &BuildResult) {
    for line in format_build_summary(result) {
        println!("{}", line);
    }
}

// ============================================================================
// Sitemap, check and subscribe
// ============================================================================

pub fn format_sitemap_line(path: &Path, entries: usize) -> String {
    format!("Sitemap ({} urls) \u{2192} {}", entries, path.display())
}

/// One warning per post whose series slug matches no configured series.
pub fn format_unresolved_series(unresolved: &[(&ContentFile, &str)]) -> Vec<String> {
    unresolved
        .iter()
        .map(|(file, slug)| format!("warning: {}: unknown series '{}'", file.source, slug))
        .collect()
}

/// Warnings go to stderr.
pub fn print_unresolved_series(unresolved: &[(&ContentFile, &str)]) {
    for line in format_unresolved_series(unresolved) {
        eprintln!("{}", line);
    }
}

pub fn format_subscribe_output(email: &str, outcome: &SubscribeOutcome) -> Vec<String> {
    if outcome.success {
        vec![format!("Subscribed {}", email.trim())]
    } else {
        let reason = outcome.error.as_deref().unwrap_or("unknown error");
        vec![format!("Could not subscribe {}: {}", email.trim(), reason)]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Enriched;
    use crate::test_helpers::{post, resolved};
    use crate::types::Series;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn image(kind: OgImageKind, name: &str, status: OgStatus) -> OgImage {
        OgImage {
            kind,
            path: PathBuf::from("/public/og/content").join(name),
            status,
        }
    }

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn image_line_shows_kind_name_and_status() {
        assert_eq!(
            image_line(&image(OgImageKind::Title, "aes.png", OgStatus::Generated)),
            "    title: aes.png (generated)"
        );
        assert_eq!(
            image_line(&image(OgImageKind::Series, "web-crypto.png", OgStatus::Exists)),
            "    series: web-crypto.png (exists)"
        );
    }

    #[test]
    fn scan_output_lists_posts_and_config() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "").unwrap();
        let files = vec![
            post("aes", "AES", Some(Series::Slug("web-crypto".into()))),
            post("zsh", "Zsh", None),
        ];

        let lines = format_scan_output(&files, tmp.path());

        assert_eq!(
            lines,
            vec![
                "Posts",
                "001 AES",
                "    Source: blog/aes.md",
                "    Series: web-crypto",
                "002 Zsh",
                "    Source: blog/zsh.md",
                "",
                "Config",
                "    config.toml",
            ]
        );
    }

    #[test]
    fn scan_output_without_config_mentions_defaults() {
        let tmp = TempDir::new().unwrap();
        let lines = format_scan_output(&[], tmp.path());
        assert_eq!(lines.last().unwrap(), "    (stock defaults)");
    }

    #[test]
    fn pipeline_event_lines() {
        let event = PipelineEvent::FileEnriched {
            index: 2,
            title: "AES".into(),
            source: "blog/aes.md".into(),
            series: Some("Web Crypto".into()),
            images: vec![
                image(OgImageKind::Title, "aes.png", OgStatus::Generated),
                image(OgImageKind::Series, "web-crypto.png", OgStatus::Exists),
            ],
        };
        assert_eq!(
            format_pipeline_event(&event),
            vec![
                "002 AES",
                "    Source: blog/aes.md",
                "    Series: Web Crypto",
                "    title: aes.png (generated)",
                "    series: web-crypto.png (exists)",
            ]
        );
    }

    #[test]
    fn pipeline_event_without_series_or_images() {
        let event = PipelineEvent::FileEnriched {
            index: 1,
            title: "Home".into(),
            source: "index.md".into(),
            series: None,
            images: vec![],
        };
        assert_eq!(
            format_pipeline_event(&event),
            vec!["001 Home", "    Source: index.md"]
        );
    }

    #[test]
    fn build_summary_counts_statuses() {
        let result = BuildResult {
            files: vec![
                Enriched {
                    file: post("a", "A", Some(resolved("web-crypto", "Web Crypto"))),
                    images: vec![
                        image(OgImageKind::Title, "a.png", OgStatus::Generated),
                        image(OgImageKind::Series, "web-crypto.png", OgStatus::Generated),
                    ],
                },
                Enriched {
                    file: post("b", "B", None),
                    images: vec![image(OgImageKind::Title, "b.png", OgStatus::Exists)],
                },
            ],
            manifest_path: PathBuf::from(".voracious-temp/manifest.json"),
            sitemap_path: PathBuf::from("public/sitemap.xml"),
            sitemap_entries: 7,
        };

        assert_eq!(
            format_build_summary(&result),
            vec![
                "Enriched 2 files: 2 images generated, 1 already present",
                "Manifest \u{2192} .voracious-temp/manifest.json",
                "Sitemap (7 urls) \u{2192} public/sitemap.xml",
            ]
        );
    }

    #[test]
    fn unresolved_series_warnings() {
        let file = post("old", "Old", Some(Series::Slug("retired".into())));
        let lines = format_unresolved_series(&[(&file, "retired")]);
        assert_eq!(lines, vec!["warning: blog/old.md: unknown series 'retired'"]);
    }

    #[test]
    fn subscribe_output() {
        let ok = SubscribeOutcome {
            success: true,
            error: None,
        };
        assert_eq!(
            format_subscribe_output(" a@b.c ", &ok),
            vec!["Subscribed a@b.c"]
        );
        let failed = SubscribeOutcome {
            success: false,
            error: Some("rejected".into()),
        };
        assert_eq!(
            format_subscribe_output("a@b.c", &failed),
            vec!["Could not subscribe a@b.c: rejected"]
        );
    }
}
