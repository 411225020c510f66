//! Error types for the surface layer.

use thiserror::Error;

/// Errors that can occur when allocating or encoding a surface.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// Surface allocation failed.
    #[error("failed to allocate {width}x{height} surface: {reason}")]
    Allocate {
        width: u32,
        height: u32,
        reason: String,
    },

    /// A pixel buffer did not match the surface dimensions.
    #[error("pixel buffer of {actual} bytes does not fill a {width}x{height} surface")]
    PixelLength {
        width: u32,
        height: u32,
        actual: usize,
    },

    /// PNG encoding failed.
    #[error("failed to encode PNG: {0}")]
    Encode(String),

    /// The browser canvas capability is unavailable or misbehaved.
    #[error("canvas unavailable: {0}")]
    Canvas(String),
}
