//! Content scanning.
//!
//! Stage 1 of the build. Walks the content root and turns every markdown file
//! into a [`ContentFile`] record for the enrich stage.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                  # Site configuration (optional)
//! ├── index.md                     # → /
//! ├── blog/
//! │   ├── index.md                 # → /blog
//! │   ├── web-crypto-basics.md     # → /blog/web-crypto-basics
//! │   └── ...
//! └── sheets/
//!     └── flexbox.md               # → /sheets/flexbox
//! ```
//!
//! Hidden files and directories (leading `.`) are skipped.
//!
//! ## Front Matter
//!
//! Optional TOML between `+++` fences at the very top of the file:
//!
//! ```text
//! +++
//! title = "A Practical Guide to the Web Cryptography API"
//! series = "web-crypto"
//! updated = 2023-02-01
//! +++
//!
//! # Body heading
//! ```
//!
//! Title resolution (first available wins): front matter `title` → first
//! level-1 heading in the body → file stem with dashes turned into spaces.
//!
//! `updated` feeds the sitemap's `<lastmod>`, so it must be a date
//! (`2023-02-01`) or a datetime with an offset (`2023-02-01T10:30:00Z`).
//! Local times and offset-less datetimes are errors.

use crate::naming;
use crate::types::{ContentFile, Series};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

const FENCE: &str = "+++";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Front matter is missing its closing +++ in {0}")]
    UnterminatedFrontMatter(PathBuf),
    #[error("Invalid updated = {value} in {path}: expected a date or a datetime with an offset")]
    InvalidUpdated { path: PathBuf, value: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FrontMatter {
    title: Option<String>,
    series: Option<String>,
    updated: Option<toml::value::Datetime>,
}

/// Scan the content root for markdown files, sorted by path.
pub fn scan(root: &Path) -> Result<Vec<ContentFile>, ContentError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let content = fs::read_to_string(entry.path())?;
        files.push(parse_content_file(rel, &content)?);
    }
    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// Build a record from a file's relative path and its raw contents.
pub fn parse_content_file(rel: &Path, content: &str) -> Result<ContentFile, ContentError> {
    let (front, body) = split_front_matter(content)
        .ok_or_else(|| ContentError::UnterminatedFrontMatter(rel.to_path_buf()))?;
    let front: FrontMatter = match front {
        Some(raw) => toml::from_str(raw).map_err(|source| ContentError::FrontMatter {
            path: rel.to_path_buf(),
            source,
        })?,
        None => FrontMatter::default(),
    };

    let stem = rel
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let title = front
        .title
        .filter(|t| !t.trim().is_empty())
        .or_else(|| first_heading(body))
        .unwrap_or_else(|| naming::display_title(&stem));

    Ok(ContentFile {
        id: naming::content_id(rel),
        path: naming::url_path(rel),
        source: rel.to_string_lossy().replace('\\', "/"),
        title,
        series: front
            .series
            .filter(|s| !s.trim().is_empty())
            .map(Series::Slug),
        updated: front.updated.map(|d| lastmod(rel, d)).transpose()?,
    })
}

/// Render `updated` as a W3C datetime, rejecting forms that have none.
fn lastmod(rel: &Path, updated: toml::value::Datetime) -> Result<String, ContentError> {
    let valid = updated.date.is_some() && (updated.time.is_none() || updated.offset.is_some());
    if !valid {
        return Err(ContentError::InvalidUpdated {
            path: rel.to_path_buf(),
            value: updated.to_string(),
        });
    }
    Ok(updated.to_string())
}

/// Split `+++` fenced front matter from the body.
///
/// Returns `Some((None, content))` when the file has no front matter, and
/// `None` when an opening fence is never closed.
fn split_front_matter(content: &str) -> Option<(Option<&str>, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(rest) = content.strip_prefix(FENCE) else {
        return Some((None, content));
    };
    let rest = match rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) {
        Some(rest) => rest,
        None => return Some((None, content)),
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((Some(front), body));
        }
        offset += line.len();
    }
    None
}

/// Text of the first level-1 heading, if any.
fn first_heading(markdown: &str) -> Option<String> {
    let mut in_heading = false;
    let mut text = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_heading = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) if in_heading => {
                let title = text.trim().to_string();
                return (!title.is_empty()).then_some(title);
            }
            Event::Text(t) | Event::Code(t) if in_heading => text.push_str(&t),
            _ => {}
        }
    }
    None
}
