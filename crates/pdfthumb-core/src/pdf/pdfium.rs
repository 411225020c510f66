//! pdfium-backed document engine.

use pdfium_render::prelude::*;
use tracing::debug;

use super::{DocumentEngine, DocumentSession, PageSize, Pixels};
use crate::error::{Result, ThumbError};

/// Document engine backed by the PDFium library.
pub struct PdfiumEngine {
    pdfium: Pdfium,
}

impl PdfiumEngine {
    /// Bind the PDFium dynamic library.
    ///
    /// Search order: the current directory, `./lib/`, the directory next to
    /// the executable, then the system library.
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./lib/"))
            })
            .or_else(|_| {
                let exe_dir = std::env::current_exe()
                    .ok()
                    .and_then(|p| p.parent().map(|d| format!("{}/", d.display())))
                    .unwrap_or_else(|| "./".to_string());
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&exe_dir))
            })
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| ThumbError::Engine(format!("failed to bind pdfium: {e:?}")))?;
        debug!("pdfium library bound");
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl DocumentEngine for PdfiumEngine {
    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn DocumentSession + 'a>> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| ThumbError::Parse(format!("{e:?}")))?;
        debug!("opened document with {} pages", document.pages().len());
        Ok(Box::new(PdfiumSession { document }))
    }
}

struct PdfiumSession<'a> {
    document: PdfDocument<'a>,
}

impl DocumentSession for PdfiumSession<'_> {
    fn page_count(&self) -> u32 {
        self.document.pages().len() as u32
    }

    fn page_size(&self, page: u32) -> Result<PageSize> {
        let pages = self.document.pages();
        let page = pages
            .get((page - 1) as u16)
            .map_err(|e| ThumbError::Render(format!("failed to load page {page}: {e:?}")))?;
        Ok(PageSize {
            width: page.width().value,
            height: page.height().value,
        })
    }

    fn render_page(&self, page: u32, width: u32, height: u32) -> Result<Pixels> {
        let pages = self.document.pages();
        let page = pages
            .get((page - 1) as u16)
            .map_err(|e| ThumbError::Render(format!("failed to load page {page}: {e:?}")))?;
        let bitmap = page
            .render(width as i32, height as i32, None)
            .map_err(|e| ThumbError::Render(format!("{e:?}")))?;
        let image = bitmap.as_image().into_rgba8();
        Ok(Pixels {
            width: image.width(),
            height: image.height(),
            data: image.into_raw(),
        })
    }
}
