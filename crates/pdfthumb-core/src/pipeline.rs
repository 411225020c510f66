//! Single-file thumbnail pipeline: load, parse, render, encode.

use std::sync::Arc;

use pdfthumb_surface::SurfaceProvider;
use tracing::debug;

use crate::error::{Result, ThumbError};
use crate::model::{FileDescriptor, Thumbnail};
use crate::options::ThumbnailOptions;
use crate::pdf::DocumentEngine;
use crate::{batch, loader, render};

/// Thumbnail generator over a document engine and a surface provider.
///
/// The surface provider is resolved once per process; the engine is shared
/// across every file the generator touches.
pub struct Thumbnailer {
    engine: Arc<dyn DocumentEngine>,
    surfaces: &'static dyn SurfaceProvider,
}

impl Thumbnailer {
    /// Build a generator backed by the bundled pdfium engine.
    #[cfg(feature = "pdfium")]
    pub fn new() -> Result<Self> {
        let engine = crate::pdf::pdfium::PdfiumEngine::new()?;
        Ok(Self::with_engine(Arc::new(engine)))
    }

    /// Build a generator over a caller-supplied engine.
    pub fn with_engine(engine: Arc<dyn DocumentEngine>) -> Self {
        Self {
            engine,
            surfaces: pdfthumb_surface::provider(),
        }
    }

    /// Generate a thumbnail for a single file identifier.
    ///
    /// Returns `None` when the attempt was aborted through the options'
    /// cancellation token; abort is never reported as an error, even when
    /// a stage happened to fail after cancellation was requested. All other
    /// failures come back as [`Thumbnail::Error`] so one bad file cannot
    /// take down a batch.
    pub async fn create_thumbnail(
        &self,
        source: &str,
        options: &ThumbnailOptions,
    ) -> Option<Thumbnail> {
        if options.cancel.is_cancelled() {
            return None;
        }
        match self.generate(source, options).await {
            Ok(outcome) => outcome,
            Err(_) if options.cancel.is_cancelled() => None,
            Err(e) => {
                debug!("thumbnail for {} failed: {}", source, e);
                Some(Thumbnail::Error(e.to_string()))
            }
        }
    }

    async fn generate(
        &self,
        source: &str,
        options: &ThumbnailOptions,
    ) -> Result<Option<Thumbnail>> {
        let bytes = loader::load_bytes(source, &options.cancel).await?;
        if options.cancel.is_cancelled() {
            return Ok(None);
        }

        let session = self.engine.open(&bytes)?;
        let count = session.page_count();
        if count == 0 {
            return Err(ThumbError::NoPages);
        }
        let page = options.page.clamp(1, count);

        if options.cancel.is_cancelled() {
            return Ok(None);
        }
        let thumbnail = render::render_page(
            session.as_ref(),
            self.surfaces,
            page,
            options.scale,
            options.output,
        )?;
        Ok(Some(thumbnail))
    }

    /// Generate thumbnails for a list of file descriptors.
    ///
    /// See [`batch::BatchOptions`] for concurrency, naming and callback
    /// controls. Output order matches input order regardless of completion
    /// order; aborted items are omitted.
    pub async fn create_thumbnails(
        &self,
        files: &[FileDescriptor],
        options: &batch::BatchOptions,
    ) -> Vec<crate::model::BatchEntry> {
        batch::run(self, files, options).await
    }
}

/// A stand-in engine used when pdfium cannot be bound; every open fails
/// with the binding error so batches still produce per-item errors.
#[cfg(feature = "pdfium")]
struct UnavailableEngine(String);

#[cfg(feature = "pdfium")]
impl DocumentEngine for UnavailableEngine {
    fn open<'a>(&'a self, _bytes: &'a [u8]) -> Result<Box<dyn crate::pdf::DocumentSession + 'a>> {
        Err(ThumbError::Engine(self.0.clone()))
    }
}

#[cfg(feature = "pdfium")]
fn default_thumbnailer() -> Thumbnailer {
    Thumbnailer::new()
        .unwrap_or_else(|e| Thumbnailer::with_engine(Arc::new(UnavailableEngine(e.to_string()))))
}

/// One-shot convenience wrapper over [`Thumbnailer::create_thumbnail`]
/// using the bundled pdfium engine.
#[cfg(feature = "pdfium")]
pub async fn create_thumbnail(source: &str, options: &ThumbnailOptions) -> Option<Thumbnail> {
    default_thumbnailer().create_thumbnail(source, options).await
}

/// One-shot convenience wrapper over [`Thumbnailer::create_thumbnails`]
/// using the bundled pdfium engine.
#[cfg(feature = "pdfium")]
pub async fn create_thumbnails(
    files: &[FileDescriptor],
    options: &batch::BatchOptions,
) -> Vec<crate::model::BatchEntry> {
    default_thumbnailer().create_thumbnails(files, options).await
}
