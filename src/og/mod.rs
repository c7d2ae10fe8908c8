//! Open Graph preview images, rendered in pure Rust with no system dependencies.
//!
//! | Step | Crate / function |
//! |---|---|
//! | **Line split + offsets** | [`layout`] (pure math) |
//! | **Text layers** | maud-built SVG, rasterized by `resvg` |
//! | **Compose + encode** | `image` (`imageops::overlay`, PNG) |
//!
//! The module is split into:
//! - **Layout**: Pure functions and constants for the fixed 1920×960 layout
//! - **Parameters**: What to draw and where to write it
//! - **SVG**: Text layer markup
//! - **Backend**: [`OgBackend`] trait + [`RustBackend`]
//! - **Operations**: Destination paths, existence checks, per-run series claims

pub mod backend;
pub mod layout;
pub mod operations;
mod params;
pub mod rust_backend;
mod svg;

pub use backend::{BackendError, OgBackend};
pub use layout::{line_offset, split_title};
pub use operations::{
    OgGenerator, OgImage, OgImageKind, OgStatus, generate_og_images, series_image_path,
    title_image_path,
};
pub use params::OgImageParams;
pub use rust_backend::RustBackend;
