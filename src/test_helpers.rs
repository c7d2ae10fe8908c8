//! Shared test utilities for the voracious test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let files = scan(tmp.path()).unwrap();
//!
//! let post = find_file(&files, "/blog/encrypting-data-in-the-browser");
//! assert_eq!(post.title, "Encrypting Data in the Browser");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{ContentFile, Series, SeriesRef};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Copy `fixtures/public/` (the bundled font) into a public directory.
///
/// The fixture config names the font as `fonts/Tuffy.ttf`, relative to the
/// public directory.
pub fn install_fixture_fonts(public: &Path) {
    std::fs::create_dir_all(public).unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/public");
    copy_dir_recursive(&fixtures, public).unwrap();
}

/// Write a solid-color square PNG, creating parent directories.
pub fn write_logo(path: &Path, size: u32, color: [u8; 3]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    image::RgbImage::from_pixel(size, size, image::Rgb(color))
        .save(path)
        .unwrap();
}

// =========================================================================
// Record builders and lookups
// =========================================================================

/// A minimal post at `blog/<name>.md`.
pub fn post(name: &str, title: &str, series: Option<Series>) -> ContentFile {
    ContentFile {
        id: format!("content:blog:{name}.md"),
        path: format!("/blog/{name}"),
        source: format!("blog/{name}.md"),
        title: title.to_string(),
        series,
        updated: None,
    }
}

pub fn resolved(slug: &str, name: &str) -> Series {
    Series::Resolved(SeriesRef {
        name: name.to_string(),
        path: format!("/series/{slug}"),
        slug: slug.to_string(),
    })
}

/// Find a scanned file by URL path. Panics if not found.
pub fn find_file<'a>(files: &'a [ContentFile], path: &str) -> &'a ContentFile {
    files.iter().find(|f| f.path == path).unwrap_or_else(|| {
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        panic!("file '{path}' not found. Available: {paths:?}")
    })
}
