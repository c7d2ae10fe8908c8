//! High-level OG image operations.
//!
//! These functions decide which images a post needs and where they go, check
//! whether each one already exists, and hand the rest to the backend.
//!
//! ## Idempotence
//!
//! The image cache is the filesystem: if the destination PNG exists the image
//! is not rendered again. There is no content hash, so editing a title without
//! renaming the file keeps the old image until it is deleted or the build runs
//! with `--force`.
//!
//! ## Shared destinations
//!
//! Every post in a series maps to the same `<series-slug>.png`, and files with
//! the same name in different directories (`index.md`, `blog/index.md`) map to
//! the same title image. An [`OgGenerator`] claims each destination the first
//! time it sees it during a run; later files skip it, so parallel workers never
//! race on one path.

use super::backend::{BackendError, OgBackend};
use super::layout::{series_lines, title_lines};
use super::params::OgImageParams;
use crate::naming;
use crate::types::{ContentFile, SeriesRef};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Which image of a post this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OgImageKind {
    Title,
    Series,
}

/// What happened to one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OgStatus {
    Generated,
    /// The file was already on disk; nothing was rendered.
    Exists,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OgImage {
    pub kind: OgImageKind,
    pub path: PathBuf,
    pub status: OgStatus,
}

/// Destination of a post's title image: `<output_dir>/<output-name>.png`.
pub fn title_image_path(output_dir: &Path, file: &ContentFile) -> PathBuf {
    output_dir.join(format!("{}.png", naming::output_name(&file.id)))
}

/// Destination of a series image: `<output_dir>/<slug>.png`.
pub fn series_image_path(output_dir: &Path, series: &SeriesRef) -> PathBuf {
    output_dir.join(format!("{}.png", series.slug))
}

/// Render `lines` to `output` unless the file already exists (or `force`).
pub fn render_if_missing(
    backend: &impl OgBackend,
    lines: Vec<String>,
    output: PathBuf,
    force: bool,
) -> Result<OgStatus> {
    if !force && output.exists() {
        return Ok(OgStatus::Exists);
    }
    backend.render(&OgImageParams { lines, output })?;
    Ok(OgStatus::Generated)
}

/// Generates the images for posts, one run at a time.
pub struct OgGenerator<'a, B: OgBackend> {
    backend: &'a B,
    output_dir: PathBuf,
    force: bool,
    claimed: Mutex<HashSet<PathBuf>>,
}

impl<'a, B: OgBackend> OgGenerator<'a, B> {
    pub fn new(backend: &'a B, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            output_dir: output_dir.into(),
            force: false,
            claimed: Mutex::new(HashSet::new()),
        }
    }

    /// Re-render images even when the destination exists.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Claim a destination for this run. Only the first caller gets `true`.
    fn claim(&self, path: &Path) -> bool {
        self.claimed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf())
    }

    fn produce(
        &self,
        kind: OgImageKind,
        lines: Vec<String>,
        path: PathBuf,
        images: &mut Vec<OgImage>,
    ) -> Result<()> {
        if !self.claim(&path) {
            return Ok(());
        }
        let status = render_if_missing(self.backend, lines, path.clone(), self.force)?;
        images.push(OgImage { kind, path, status });
        Ok(())
    }

    /// Produce the title image and, for a resolved series, the series image.
    /// Destinations already claimed in this run are left out of the result.
    pub fn generate(&self, file: &ContentFile) -> Result<Vec<OgImage>> {
        let mut images = Vec::with_capacity(2);

        self.produce(
            OgImageKind::Title,
            title_lines(&file.title),
            title_image_path(&self.output_dir, file),
            &mut images,
        )?;

        if let Some(series) = file.series.as_ref().and_then(|s| s.resolved()) {
            self.produce(
                OgImageKind::Series,
                series_lines(&series.name),
                series_image_path(&self.output_dir, series),
                &mut images,
            )?;
        }

        Ok(images)
    }
}

/// Generate a single post's images outside of a pipeline run.
pub fn generate_og_images(
    backend: &impl OgBackend,
    file: &ContentFile,
    output_dir: &Path,
) -> Result<Vec<OgImage>> {
    OgGenerator::new(backend, output_dir).generate(file)
}
