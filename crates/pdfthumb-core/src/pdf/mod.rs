//! Document engine seam: parsing and page rasterization.
//!
//! The PDF format itself is a black box behind [`DocumentEngine`]: given
//! document bytes and a page index, an engine produces pixel data for that
//! page. The production implementation binds pdfium; tests drive the
//! pipeline through stub engines.

#[cfg(feature = "pdfium")]
pub mod pdfium;

use crate::error::Result;

/// Intrinsic page dimensions in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// One rendered frame of RGBA8 pixels.
#[derive(Debug, Clone)]
pub struct Pixels {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 samples, `width * height * 4` bytes.
    pub data: Vec<u8>,
}

/// Trait for PDF engines.
pub trait DocumentEngine: Send + Sync {
    /// Parse `bytes` into an open document session.
    ///
    /// Invalid documents are an error here, never a degenerate session;
    /// a document that parses but has zero pages is reported through
    /// [`DocumentSession::page_count`] instead.
    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn DocumentSession + 'a>>;
}

/// An opened, parsed document.
///
/// Parser resources are released when the session is dropped, which happens
/// on every exit path of the pipeline. Sessions are never shared across
/// files.
pub trait DocumentSession {
    /// Total number of pages; zero for degenerate documents.
    fn page_count(&self) -> u32;

    /// Intrinsic size of a page. `page` is 1-based and must already be
    /// clamped to `[1, page_count]` by the caller.
    fn page_size(&self, page: u32) -> Result<PageSize>;

    /// Rasterize a page to an RGBA frame of exactly `width` x `height`.
    fn render_page(&self, page: u32, width: u32, height: u32) -> Result<Pixels>;
}
