//! Surface backend implementations.

#[cfg(feature = "native")]
pub mod raster;

#[cfg(feature = "wasm")]
pub mod canvas;

use crate::Result;

/// An in-memory pixel buffer that can be painted into and encoded to PNG.
///
/// Implementations guarantee that `to_data_url` wraps exactly the bytes
/// `to_png` produces for the same surface state, so the two encodings are
/// losslessly interchangeable.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Blit a full frame of RGBA8 pixels into the surface.
    ///
    /// The buffer must hold exactly `width * height * 4` bytes.
    fn write_pixels(&mut self, rgba: &[u8]) -> Result<()>;

    /// Encode the surface contents as PNG bytes.
    fn to_png(&self) -> Result<Vec<u8>>;

    /// Encode the surface contents as a base64 PNG data URL.
    fn to_data_url(&self) -> Result<String>;
}

/// Trait for surface allocation backends.
///
/// Exactly two implementations exist: the software raster backend used on
/// server-side runtimes and the canvas backend used in browsers. Dimensions
/// are expected to be positive; passing zero is a defect in the caller.
pub trait SurfaceProvider: Send + Sync {
    /// Allocate a blank surface of the given pixel dimensions.
    fn allocate(&self, width: u32, height: u32) -> Result<Box<dyn Surface>>;

    /// Short backend name for diagnostics.
    fn name(&self) -> &'static str;
}
