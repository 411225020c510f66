//! Core library for PDF thumbnail generation.
//!
//! This crate provides:
//! - Byte acquisition from local paths, http(s) URLs and data URLs
//! - A document engine seam with a pdfium-backed implementation
//! - Page rendering onto a platform pixel surface
//! - Single-file and batch thumbnail pipelines with cooperative cancellation

pub mod batch;
pub mod error;
pub mod loader;
pub mod model;
pub mod options;
pub mod pdf;
pub mod pipeline;
mod render;

pub use batch::{BatchOptions, ErrorFn, ProgressFn};
pub use error::{Result, ThumbError};
pub use model::{BatchEntry, FileDescriptor, Thumbnail};
pub use options::{OutputKind, ThumbnailOptions};
pub use pdf::{DocumentEngine, DocumentSession, PageSize, Pixels};
pub use pipeline::Thumbnailer;

#[cfg(feature = "pdfium")]
pub use pdf::pdfium::PdfiumEngine;
#[cfg(feature = "pdfium")]
pub use pipeline::{create_thumbnail, create_thumbnails};

/// Re-exported cancellation token passed through [`ThumbnailOptions`].
pub use tokio_util::sync::CancellationToken;
