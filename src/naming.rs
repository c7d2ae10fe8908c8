//! Centralized naming for content files.
//!
//! Every post has three names derived from its path relative to the content
//! root, and this module is the only place that derives them:
//!
//! | Name | `blog/my-post.md` | Used for |
//! |---|---|---|
//! | identifier | `content:blog:my-post.md` | [`ContentFile::id`](crate::types::ContentFile) |
//! | URL path | `/blog/my-post` | sitemap, manifest |
//! | output name | `my-post` | `og/content/my-post.png` |
//!
//! The output name is taken from the identifier, not the source path, so the
//! OG image name stays stable for anything that only has the identifier.

use std::path::{Component, Path};

const ID_PREFIX: &str = "content";

/// Path components of a relative source path, as strings.
fn components(rel: &Path) -> Vec<String> {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect()
}

/// Build the identifier for a source file relative to the content root.
///
/// - `"blog/my-post.md"` → `"content:blog:my-post.md"`
/// - `"about.md"` → `"content:about.md"`
pub fn content_id(rel: &Path) -> String {
    let mut parts = vec![ID_PREFIX.to_string()];
    parts.extend(components(rel));
    parts.join(":")
}

/// Build the site URL path for a source file relative to the content root.
///
/// The extension is dropped and `index` files map to their directory:
/// - `"blog/my-post.md"` → `"/blog/my-post"`
/// - `"blog/index.md"` → `"/blog"`
/// - `"index.md"` → `"/"`
pub fn url_path(rel: &Path) -> String {
    let mut parts = components(rel);
    if let Some(last) = parts.pop() {
        let stem = strip_extension(&last);
        if stem != "index" {
            parts.push(stem.to_string());
        }
    }
    format!("/{}", parts.join("/"))
}

/// Derive the image file stem from an identifier.
///
/// Everything up to the last `/` or `:` is dropped, then a trailing
/// extension:
/// - `"content:blog:my-post.md"` → `"my-post"`
/// - `"posts/hello.world.md"` → `"hello.world"`
/// - `"plain"` → `"plain"`
pub fn output_name(id: &str) -> &str {
    let base = match id.rfind(['/', ':']) {
        Some(pos) => &id[pos + 1..],
        None => id,
    };
    strip_extension(base)
}

/// Drop the last `.ext` from a file name. Dotfiles keep their name.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) if pos > 0 => &name[..pos],
        _ => name,
    }
}

/// Fallback display title from a file stem: dashes become spaces.
///
/// - `"my-first-post"` → `"my first post"`
pub fn display_title(stem: &str) -> String {
    stem.replace('-', " ")
}
