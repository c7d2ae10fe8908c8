//! Parameter types for OG image rendering.
//!
//! These structs describe *what* to draw, not *how*. The
//! [`operations`](super::operations) module decides which images a post needs
//! and where they go; the [`backend`](super::backend) does the pixel work.
//! This split is what lets tests swap in a recording mock.

use std::path::PathBuf;

/// One image to render: the centred title lines and the PNG destination.
///
/// Everything else on the image (background, logo, site label) is fixed per
/// backend instance.
#[derive(Debug, Clone, PartialEq)]
pub struct OgImageParams {
    pub lines: Vec<String>,
    pub output: PathBuf,
}

/// Font settings for one SVG text layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    pub family: &'a str,
    pub size: f32,
    pub weight: u16,
    /// CSS color, e.g. `#dddddd`.
    pub fill: &'a str,
}
