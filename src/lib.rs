//! # Voracious
//!
//! Content enrichment for a markdown blog. Posts are plain `.md` files with
//! TOML front matter; the build resolves each post's series reference against
//! the configured series, renders Open Graph preview images, and publishes an
//! enriched manifest plus `sitemap.xml` for whatever renders the site.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan     content/  →  Vec<ContentFile>               (front matter → records)
//! 2. Enrich   records   →  resolved series + og/*.png     (parallel, per file)
//! 3. Publish  records   →  manifest.json + sitemap.xml
//! ```
//!
//! Within one file, series resolution always runs before image generation so
//! the series image can use the resolved display name.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Stage 1: walks the content directory and parses front matter |
//! | [`series`] | Stage 2: replaces a series slug with the configured series entry |
//! | [`og`] | Stage 2: renders 1920×960 preview images (resvg + image) |
//! | [`pipeline`] | Composes the stages, runs enrichment on rayon, writes the manifest |
//! | [`sitemap`] | Stage 3: sitemaps.org XML rendered with Maud |
//! | [`subscribe`] | Adds an address to the mailing list over HTTP |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Records serialized into the manifest (`ContentFile`, `Series`) |
//! | [`naming`] | Content ids, URL paths and image names derived from file paths |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Filesystem Is The Image Cache
//!
//! A preview image is rendered only when its destination PNG does not exist.
//! Builds are cheap to repeat, and a stale image is fixed by deleting it or
//! building with `--force`.
//!
//! ## SVG Text, Raster Composition
//!
//! Text is laid out as small SVG documents built with Maud (escaping for free)
//! and rasterized by `resvg`; the `image` crate composes the layers and
//! encodes PNG. Everything is pure Rust with no system libraries.

pub mod config;
pub mod content;
pub mod naming;
pub mod og;
pub mod output;
pub mod pipeline;
pub mod series;
pub mod sitemap;
pub mod subscribe;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
