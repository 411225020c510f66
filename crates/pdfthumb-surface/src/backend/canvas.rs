//! Browser canvas backend.
//!
//! Paints through a detached `<canvas>` element and delegates PNG encoding
//! to the browser via `toDataURL`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::backend::{Surface, SurfaceProvider};
use crate::{Result, SurfaceError};

/// True when a DOM window is present, i.e. we are running in a browser.
pub(crate) fn has_window() -> bool {
    web_sys::window().is_some()
}

/// Backend allocating native browser canvas surfaces.
pub struct CanvasProvider;

impl SurfaceProvider for CanvasProvider {
    fn allocate(&self, width: u32, height: u32) -> Result<Box<dyn Surface>> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SurfaceError::Canvas("no window/document".to_string()))?;
        let canvas = document
            .create_element("canvas")
            .map_err(|e| SurfaceError::Allocate {
                width,
                height,
                reason: format!("{e:?}"),
            })?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::Canvas("element is not a canvas".to_string()))?;
        canvas.set_width(width);
        canvas.set_height(height);
        Ok(Box::new(CanvasSurface { canvas }))
    }

    fn name(&self) -> &'static str {
        "canvas"
    }
}

struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    fn context(&self) -> Result<CanvasRenderingContext2d> {
        self.canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::Canvas(format!("{e:?}")))?
            .ok_or_else(|| SurfaceError::Canvas("no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::Canvas("unexpected context type".to_string()))
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn write_pixels(&mut self, rgba: &[u8]) -> Result<()> {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(SurfaceError::PixelLength {
                width,
                height,
                actual: rgba.len(),
            });
        }
        let data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(rgba), width, height)
            .map_err(|e| SurfaceError::Canvas(format!("{e:?}")))?;
        self.context()?
            .put_image_data(&data, 0.0, 0.0)
            .map_err(|e| SurfaceError::Canvas(format!("{e:?}")))?;
        Ok(())
    }

    fn to_png(&self) -> Result<Vec<u8>> {
        let url = self.to_data_url()?;
        let payload = url
            .split_once(',')
            .map(|(_, payload)| payload)
            .ok_or_else(|| SurfaceError::Encode("malformed data URL from canvas".to_string()))?;
        BASE64
            .decode(payload)
            .map_err(|e| SurfaceError::Encode(e.to_string()))
    }

    fn to_data_url(&self) -> Result<String> {
        self.canvas
            .to_data_url_with_type("image/png")
            .map_err(|e| SurfaceError::Encode(format!("{e:?}")))
    }
}
