//! Shared types used across all pipeline stages.
//!
//! These types are serialized into the content manifest after enrichment and
//! must stay stable for whatever renders the site downstream.

use serde::{Deserialize, Serialize};

/// One markdown post discovered by the scan stage.
///
/// Created by [`crate::content::scan`], then passed by value through the
/// enrichers: [`crate::series::resolve_series`] returns a new record with the
/// series resolved, and the OG generator only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentFile {
    /// Stable identifier: `content:` + relative path with `/` → `:`.
    /// `blog/my-post.md` → `content:blog:my-post.md`
    pub id: String,
    /// Site URL path (`/blog/my-post`).
    pub path: String,
    /// Source path relative to the content root.
    pub source: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<Series>,
    /// Last-updated date from front matter, as written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
}

/// A post's series reference: the slug as authored, or the resolved entry.
///
/// Untagged so the manifest shows either `"series": "rust-basics"` or
/// `"series": { "name": ..., "path": ..., "slug": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Series {
    Resolved(SeriesRef),
    Slug(String),
}

impl Series {
    pub fn resolved(&self) -> Option<&SeriesRef> {
        match self {
            Series::Resolved(series) => Some(series),
            Series::Slug(_) => None,
        }
    }

    /// The slug, whichever form the reference is in.
    pub fn slug(&self) -> &str {
        match self {
            Series::Resolved(series) => &series.slug,
            Series::Slug(slug) => slug,
        }
    }
}

/// A resolved series: display name, listing page path, slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRef {
    pub name: String,
    pub path: String,
    pub slug: String,
}
