//! Pixel-surface abstraction layer for pdfthumb.
//!
//! This crate provides a unified interface for allocating pixel surfaces and
//! encoding their contents to PNG across different environments:
//! - a software raster surface built on the `image` crate for server-side
//!   runtimes
//! - a browser canvas surface built on `web-sys` for WASM builds
//!
//! The backend is selected once per process and cached; the decision never
//! changes at runtime.

mod backend;
mod error;

pub use backend::{Surface, SurfaceProvider};
pub use error::SurfaceError;

#[cfg(feature = "native")]
pub use backend::raster::RasterProvider;

#[cfg(feature = "wasm")]
pub use backend::canvas::CanvasProvider;

/// Result type for surface operations.
pub type Result<T> = std::result::Result<T, SurfaceError>;

#[cfg(not(any(feature = "native", feature = "wasm")))]
compile_error!("at least one surface backend feature (`native` or `wasm`) must be enabled");

use once_cell::sync::Lazy;

static PROVIDER: Lazy<Box<dyn SurfaceProvider>> = Lazy::new(detect);

/// The surface provider for the current environment.
///
/// The first call decides between the backends and the decision is cached
/// for the process lifetime.
pub fn provider() -> &'static dyn SurfaceProvider {
    PROVIDER.as_ref()
}

fn detect() -> Box<dyn SurfaceProvider> {
    #[cfg(feature = "wasm")]
    if backend::canvas::has_window() {
        tracing::debug!("selected canvas surface backend");
        return Box::new(CanvasProvider);
    }
    fallback()
}

#[cfg(feature = "native")]
fn fallback() -> Box<dyn SurfaceProvider> {
    tracing::debug!("selected software raster surface backend");
    Box::new(RasterProvider)
}

// WASM-only build without a DOM; allocation will fail at use.
#[cfg(all(feature = "wasm", not(feature = "native")))]
fn fallback() -> Box<dyn SurfaceProvider> {
    Box::new(CanvasProvider)
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;

    #[test]
    fn detection_is_cached() {
        let first = provider().name();
        let second = provider().name();
        assert_eq!(first, second);
        assert_eq!(first, "raster");
    }
}
