//! The build pipeline: scan → enrich → publish.
//!
//! ## Stages
//!
//! ```text
//! 1. Scan     content/  →  Vec<ContentFile>          (front matter → records)
//! 2. Enrich   per file: resolve_series → og images   (parallel across files)
//! 3. Publish  records   →  manifest.json + sitemap.xml
//! ```
//!
//! Enrichment is an explicit composition in [`enrich_file`]: a file's series
//! is resolved before its images are generated, so the series image sees the
//! resolved name. Files are independent of each other and run on the rayon
//! pool; results come back in scan order.
//!
//! Progress is reported as [`PipelineEvent`]s over an optional mpsc channel so
//! the CLI can print while workers are still running.
//!
//! The caller runs stage 1 and loads the config; [`build`] takes both so a
//! single scan serves the warnings printed beforehand and the build itself.

use crate::config::{SeriesDefinition, SiteConfig};
use crate::og::{BackendError, OgBackend, OgGenerator, OgImage, RustBackend};
use crate::series::resolve_series;
use crate::sitemap::{self, SitemapError};
use crate::types::ContentFile;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("OG image failed for {source_path}: {error}")]
    Og {
        source_path: String,
        error: BackendError,
    },
    #[error("OG backend setup failed: {0}")]
    Backend(#[from] BackendError),
    #[error("Sitemap error: {0}")]
    Sitemap(#[from] SitemapError),
}

/// Progress event emitted once per enriched file.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    FileEnriched {
        /// 1-based position in scan order.
        index: usize,
        title: String,
        source: String,
        /// Resolved series name, or the authored slug if it matched nothing.
        series: Option<String>,
        images: Vec<OgImage>,
    },
}

/// One file after enrichment, with the images produced for it.
#[derive(Debug, Clone)]
pub struct Enriched {
    pub file: ContentFile,
    pub images: Vec<OgImage>,
}

/// Enriched records, written to `<temp-dir>/manifest.json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub files: Vec<ContentFile>,
    pub config: SiteConfig,
}

/// Everything a build produced, for reporting.
#[derive(Debug)]
pub struct BuildResult {
    pub files: Vec<Enriched>,
    pub manifest_path: PathBuf,
    pub sitemap_path: PathBuf,
    pub sitemap_entries: usize,
}

/// Resolve the file's series, then generate its images.
pub fn enrich_file<B: OgBackend>(
    file: ContentFile,
    definitions: &[SeriesDefinition],
    generator: &OgGenerator<B>,
) -> Result<Enriched, PipelineError> {
    let file = resolve_series(file, definitions);
    let images = generator
        .generate(&file)
        .map_err(|error| PipelineError::Og {
            source_path: file.source.clone(),
            error,
        })?;
    Ok(Enriched { file, images })
}

/// Series resolution alone, for stages that need no images.
pub fn resolve_all(files: Vec<ContentFile>, definitions: &[SeriesDefinition]) -> Vec<ContentFile> {
    files
        .into_iter()
        .map(|f| resolve_series(f, definitions))
        .collect()
}

/// Enrich every file in parallel. Output order matches input order; the first
/// error aborts the run.
pub fn enrich<B: OgBackend>(
    files: Vec<ContentFile>,
    definitions: &[SeriesDefinition],
    generator: &OgGenerator<B>,
    events: Option<Sender<PipelineEvent>>,
) -> Result<Vec<Enriched>, PipelineError> {
    files
        .into_par_iter()
        .enumerate()
        .map_with(events, |events, (i, file)| -> Result<Enriched, PipelineError> {
            let enriched = enrich_file(file, definitions, generator)?;
            if let Some(tx) = events {
                tx.send(PipelineEvent::FileEnriched {
                    index: i + 1,
                    title: enriched.file.title.clone(),
                    source: enriched.file.source.clone(),
                    series: enriched.file.series.as_ref().map(|s| match s.resolved() {
                        Some(series) => series.name.clone(),
                        None => s.slug().to_string(),
                    }),
                    images: enriched.images.clone(),
                })
                .ok();
            }
            Ok(enriched)
        })
        .collect()
}

/// Write the manifest as pretty JSON into `temp_dir`.
pub fn write_manifest(temp_dir: &Path, manifest: &Manifest) -> Result<PathBuf, PipelineError> {
    std::fs::create_dir_all(temp_dir)?;
    let path = temp_dir.join("manifest.json");
    std::fs::write(&path, serde_json::to_string_pretty(manifest)?)?;
    Ok(path)
}

/// Enrich and publish scanned files with the given backend (allows testing
/// with mock).
pub fn build_with_backend(
    backend: &impl OgBackend,
    files: Vec<ContentFile>,
    public_dir: &Path,
    temp_dir: &Path,
    config: &SiteConfig,
    force: bool,
    events: Option<Sender<PipelineEvent>>,
) -> Result<BuildResult, PipelineError> {
    let generator = OgGenerator::new(backend, config.og.output_path(public_dir)).force(force);
    let enriched = enrich(files, &config.series, &generator, events)?;

    let records: Vec<ContentFile> = enriched.iter().map(|e| e.file.clone()).collect();
    let (sitemap_path, sitemap_entries) = sitemap::write_sitemap(public_dir, config, &records)?;
    let manifest_path = write_manifest(
        temp_dir,
        &Manifest {
            files: records,
            config: config.clone(),
        },
    )?;

    Ok(BuildResult {
        files: enriched,
        manifest_path,
        sitemap_path,
        sitemap_entries,
    })
}

/// Set up the production backend from `config` and build `files`.
pub fn build(
    files: Vec<ContentFile>,
    public_dir: &Path,
    temp_dir: &Path,
    config: &SiteConfig,
    force: bool,
    events: Option<Sender<PipelineEvent>>,
) -> Result<BuildResult, PipelineError> {
    let backend = RustBackend::new(&config.og, &config.site.label, public_dir)?;
    build_with_backend(&backend, files, public_dir, temp_dir, config, force, events)
}
