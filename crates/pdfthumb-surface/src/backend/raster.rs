//! Software raster backend for server-side runtimes.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{ImageBuffer, RgbaImage};
use tracing::trace;

use crate::backend::{Surface, SurfaceProvider};
use crate::{Result, SurfaceError};

/// Backend allocating software-rendered surfaces.
pub struct RasterProvider;

impl SurfaceProvider for RasterProvider {
    fn allocate(&self, width: u32, height: u32) -> Result<Box<dyn Surface>> {
        trace!("allocating {}x{} raster surface", width, height);
        Ok(Box::new(RasterSurface {
            pixels: ImageBuffer::new(width, height),
        }))
    }

    fn name(&self) -> &'static str {
        "raster"
    }
}

/// An RGBA pixel buffer encoded through the `image` PNG encoder.
struct RasterSurface {
    pixels: RgbaImage,
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn write_pixels(&mut self, rgba: &[u8]) -> Result<()> {
        let (width, height) = self.pixels.dimensions();
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(SurfaceError::PixelLength {
                width,
                height,
                actual: rgba.len(),
            });
        }
        self.pixels = ImageBuffer::from_raw(width, height, rgba.to_vec()).ok_or(
            SurfaceError::PixelLength {
                width,
                height,
                actual: rgba.len(),
            },
        )?;
        Ok(())
    }

    fn to_png(&self) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
        Ok(png)
    }

    fn to_data_url(&self) -> Result<String> {
        // Same compressed pixel data as `to_png`, base64-wrapped.
        Ok(format!(
            "data:image/png;base64,{}",
            BASE64.encode(self.to_png()?)
        ))
    }
}
