//! Configuration for single thumbnail attempts.

use tokio_util::sync::CancellationToken;

/// Requested output representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    /// Base64 PNG data URL.
    #[default]
    DataUrl,
    /// Raw PNG bytes.
    Buffer,
}

/// Options for a single thumbnail attempt.
#[derive(Debug, Clone)]
pub struct ThumbnailOptions {
    /// Output representation (default: data URL).
    pub output: OutputKind,

    /// Render scale; multiplies the page's intrinsic point size. Must be
    /// positive; non-positive values fall back to the default of 1.0.
    pub scale: f32,

    /// 1-based page index, clamped to the document's page range (default 1).
    /// Zero clamps to the first page.
    pub page: u32,

    /// Cooperative cancellation token, polled at pipeline checkpoints.
    pub cancel: CancellationToken,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            output: OutputKind::DataUrl,
            scale: 1.0,
            page: 1,
            cancel: CancellationToken::new(),
        }
    }
}

impl ThumbnailOptions {
    /// Options with all defaults: first page, scale 1.0, data URL output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the output representation.
    pub fn with_output(mut self, output: OutputKind) -> Self {
        self.output = output;
        self
    }

    /// Set the render scale.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the 1-based page index.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}
