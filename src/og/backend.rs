//! OG image backend trait and shared error type.
//!
//! The [`OgBackend`] trait has a single operation: draw one image described by
//! [`OgImageParams`] and write it as PNG. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use the recording
//! mock below.

use super::params::OgImageParams;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to load logo {path}: {source}")]
    Logo {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to load font {path}: {source}")]
    Font {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("No loaded font matches family \"{family}\"; add a font file to [og] fonts or enable system_fonts")]
    NoFonts { family: String },
    #[error("Invalid SVG text layer: {0}")]
    Svg(String),
    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for OG image backends.
///
/// `Sync` because the enrich stage renders from rayon worker threads.
pub trait OgBackend: Sync {
    /// Render `params.lines` onto the fixed layout and write a PNG to
    /// `params.output`, creating parent directories.
    fn render(&self, params: &OgImageParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock backend that records renders without drawing anything.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockBackend {
        pub renders: Mutex<Vec<OgImageParams>>,
        /// When set, each render touches its output file so later existence
        /// checks see it.
        pub touch_outputs: bool,
        /// When set, every render fails.
        pub fail: bool,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn touching() -> Self {
            Self {
                touch_outputs: true,
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn get_renders(&self) -> Vec<OgImageParams> {
            self.renders.lock().unwrap().clone()
        }

        pub fn rendered_outputs(&self) -> Vec<String> {
            self.get_renders()
                .iter()
                .map(|p| {
                    p.output
                        .file_name()
                        .unwrap()
                        .to_string_lossy()
                        .to_string()
                })
                .collect()
        }
    }

    impl OgBackend for MockBackend {
        fn render(&self, params: &OgImageParams) -> Result<(), BackendError> {
            self.renders.lock().unwrap().push(params.clone());
            if self.fail {
                return Err(BackendError::ProcessingFailed("mock failure".into()));
            }
            if self.touch_outputs {
                if let Some(parent) = params.output.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&params.output, b"png")?;
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_render() {
        let backend = MockBackend::new();
        backend
            .render(&OgImageParams {
                lines: vec!["A".into(), "B".into()],
                output: "/out/a.png".into(),
            })
            .unwrap();

        let renders = backend.get_renders();
        assert_eq!(renders.len(), 1);
        assert_eq!(renders[0].lines, vec!["A", "B"]);
        assert_eq!(backend.rendered_outputs(), vec!["a.png"]);
    }

    #[test]
    fn touching_mock_creates_output() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("og/content/a.png");
        MockBackend::touching()
            .render(&OgImageParams {
                lines: vec![],
                output: output.clone(),
            })
            .unwrap();
        assert!(output.exists());
    }

    #[test]
    fn failing_mock_still_records() {
        let backend = MockBackend::failing();
        let result = backend.render(&OgImageParams {
            lines: vec![],
            output: "/out/a.png".into(),
        });
        assert!(result.is_err());
        assert_eq!(backend.get_renders().len(), 1);
    }
}
