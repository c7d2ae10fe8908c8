//! Pure Rust OG image backend.
//!
//! ## Crate mapping
//!
//! | Step | Crate / function |
//! |---|---|
//! | Font discovery | `fontdb` (via `resvg::usvg`): configured files + optional system fonts; the configured family must match a loaded face |
//! | Text layers | SVG from [`svg`](super::svg), rasterized by `resvg` into a `tiny_skia::Pixmap` |
//! | Logo | `image::open` + `DynamicImage::resize_to_fill` (Lanczos3, centre crop) |
//! | Composition | `image::imageops::overlay` onto a solid RGBA canvas |
//! | Encode | `image` PNG encoder, RGB8 (no alpha channel) |
//!
//! The logo and the site label never change between images, so both are
//! prepared once in [`RustBackend::new`].

use super::backend::{BackendError, OgBackend};
use super::layout::{
    CANVAS_HEIGHT, CANVAS_WIDTH, LABEL_FONT_SIZE, LABEL_HEIGHT, LABEL_TOP, LOGO_LEFT, LOGO_TOP,
    TITLE_FONT_SIZE, TITLE_FONT_WEIGHT, TITLE_HEIGHT, title_top,
};
use super::params::{OgImageParams, TextStyle};
use super::svg;
use crate::config::OgConfig;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};
use std::path::Path;
use std::sync::Arc;

const LABEL_FONT_WEIGHT: u16 = 400;

/// Pure Rust backend built on `resvg` and the `image` crate.
///
/// See the [module docs](self) for the crate-to-step mapping.
pub struct RustBackend {
    fontdb: Arc<fontdb::Database>,
    font_family: String,
    title_color: String,
    background: [u8; 3],
    logo: RgbaImage,
    label: RgbaImage,
}

impl RustBackend {
    /// Load fonts and the logo, and pre-render the site label.
    ///
    /// Asset paths in `config` are resolved against `public_dir`. Fails with
    /// [`BackendError::NoFonts`] when no loaded face belongs to
    /// `config.font_family`, since resvg would otherwise skip the text.
    pub fn new(config: &OgConfig, site_label: &str, public_dir: &Path) -> Result<Self, BackendError> {
        let mut db = fontdb::Database::new();
        if config.system_fonts {
            db.load_system_fonts();
        }
        for path in config.font_paths(public_dir) {
            db.load_font_file(&path)
                .map_err(|source| BackendError::Font { path, source })?;
        }
        let families = [fontdb::Family::Name(&config.font_family)];
        let query = fontdb::Query {
            families: &families,
            ..fontdb::Query::default()
        };
        if db.query(&query).is_none() {
            return Err(BackendError::NoFonts {
                family: config.font_family.clone(),
            });
        }
        let fontdb = Arc::new(db);

        let logo_path = config.logo_path(public_dir);
        let logo = image::open(&logo_path).map_err(|source| BackendError::Logo {
            path: logo_path.clone(),
            source,
        })?;
        // cover: scale to fill the square, crop the overflow around the centre
        let logo = logo
            .resize_to_fill(config.logo_size, config.logo_size, FilterType::Lanczos3)
            .to_rgba8();

        let label_style = TextStyle {
            family: &config.font_family,
            size: LABEL_FONT_SIZE,
            weight: LABEL_FONT_WEIGHT,
            fill: &config.label_color,
        };
        let label = rasterize(
            &svg::label_layer(site_label, &label_style),
            CANVAS_WIDTH,
            LABEL_HEIGHT,
            &fontdb,
            &config.font_family,
        )?;

        Ok(Self {
            fontdb,
            font_family: config.font_family.clone(),
            title_color: config.title_color.clone(),
            background: config.background,
            logo,
            label,
        })
    }

    /// Number of font faces available to the text layers.
    pub fn font_faces(&self) -> usize {
        self.fontdb.len()
    }

    fn title_style(&self) -> TextStyle<'_> {
        TextStyle {
            family: &self.font_family,
            size: TITLE_FONT_SIZE,
            weight: TITLE_FONT_WEIGHT,
            fill: &self.title_color,
        }
    }
}

/// Rasterize an SVG document into a straight-alpha RGBA image.
fn rasterize(
    svg: &str,
    width: u32,
    height: u32,
    fontdb: &Arc<fontdb::Database>,
    font_family: &str,
) -> Result<RgbaImage, BackendError> {
    let options = usvg::Options {
        font_family: font_family.to_string(),
        fontdb: Arc::clone(fontdb),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| BackendError::Svg(e.to_string()))?;
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        BackendError::ProcessingFailed(format!("Cannot allocate {width}x{height} layer"))
    })?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha; image expects straight alpha
    let mut layer = RgbaImage::new(width, height);
    for (src, dst) in pixmap.pixels().iter().zip(layer.pixels_mut()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(layer)
}

impl OgBackend for RustBackend {
    fn render(&self, params: &OgImageParams) -> Result<(), BackendError> {
        let [r, g, b] = self.background;
        let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, Rgba([r, g, b, 255]));

        imageops::overlay(&mut canvas, &self.label, 0, LABEL_TOP as i64);
        imageops::overlay(&mut canvas, &self.logo, LOGO_LEFT as i64, LOGO_TOP as i64);

        let title = rasterize(
            &svg::title_layer(&params.lines, &self.title_style()),
            CANVAS_WIDTH,
            TITLE_HEIGHT,
            &self.fontdb,
            &self.font_family,
        )?;
        imageops::overlay(&mut canvas, &title, 0, title_top() as i64);

        if let Some(parent) = params.output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        DynamicImage::ImageRgba8(canvas)
            .to_rgb8()
            .save_with_format(&params.output, ImageFormat::Png)
            .map_err(|source| BackendError::Encode {
                path: params.output.clone(),
                source,
            })
    }
}
