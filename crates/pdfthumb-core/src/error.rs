//! Error types for the pdfthumb-core library.

use thiserror::Error;

/// Main error type for the thumbnail pipeline.
///
/// All of these are converted to [`crate::Thumbnail::Error`] results at the
/// pipeline boundary; none escape a per-item invocation.
#[derive(Error, Debug)]
pub enum ThumbError {
    /// I/O error while reading a local file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An HTTP fetch returned a non-success status.
    #[error("request failed: {status} {reason}")]
    Http { status: u16, reason: String },

    /// An HTTP fetch failed before producing a response.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The identifier uses a URL scheme this runtime cannot load.
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// A `data:` URL could not be decoded.
    #[error("invalid data URL: {0}")]
    DataUrl(String),

    /// The bytes did not parse as a valid PDF document.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The document parsed but contains no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Page rasterization failed.
    #[error("failed to render page: {0}")]
    Render(String),

    /// Surface allocation or encoding failed.
    #[error("surface error: {0}")]
    Surface(#[from] pdfthumb_surface::SurfaceError),

    /// No PDF engine could be bound in this environment.
    #[error("PDF engine unavailable: {0}")]
    Engine(String),

    /// The operation was cancelled through its token.
    #[error("operation cancelled")]
    Cancelled,
}

/// Result type for the pdfthumb-core library.
pub type Result<T> = std::result::Result<T, ThumbError>;
