//! Shared test harness: a scriptable document engine driven by fixture
//! file contents, so the full pipeline runs without a real PDF library.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pdfthumb_core::{
    DocumentEngine, DocumentSession, PageSize, Pixels, Result, ThumbError, Thumbnailer,
};

/// Engine that treats document bytes as a tiny script of the form
/// `pages=N;w=W;h=H`. Anything else fails to parse, which stands in for a
/// corrupt document.
pub struct StubEngine;

struct StubSession {
    pages: u32,
    width: f32,
    height: f32,
}

impl DocumentEngine for StubEngine {
    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn DocumentSession + 'a>> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| ThumbError::Parse("not a document".to_string()))?;

        let mut pages = None;
        let mut width = None;
        let mut height = None;
        for field in text.trim().split(';') {
            match field.split_once('=') {
                Some(("pages", v)) => pages = v.parse().ok(),
                Some(("w", v)) => width = v.parse().ok(),
                Some(("h", v)) => height = v.parse().ok(),
                _ => return Err(ThumbError::Parse(format!("bad field {field:?}"))),
            }
        }
        match (pages, width, height) {
            (Some(pages), Some(width), Some(height)) => Ok(Box::new(StubSession {
                pages,
                width,
                height,
            })),
            _ => Err(ThumbError::Parse("incomplete header".to_string())),
        }
    }
}

impl DocumentSession for StubSession {
    fn page_count(&self) -> u32 {
        self.pages
    }

    fn page_size(&self, _page: u32) -> Result<PageSize> {
        Ok(PageSize {
            width: self.width,
            height: self.height,
        })
    }

    fn render_page(&self, page: u32, width: u32, height: u32) -> Result<Pixels> {
        // Solid fill keyed on the page index so tests can tell pages apart.
        let pixel = [page as u8, 0, 0, 255];
        Ok(Pixels {
            width,
            height,
            data: pixel.repeat((width * height) as usize),
        })
    }
}

/// A thumbnailer wired to the stub engine.
pub fn thumbnailer() -> Thumbnailer {
    Thumbnailer::with_engine(Arc::new(StubEngine))
}

/// Write a fixture document under `dir` and return its path as a string.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> String {
    let path: PathBuf = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}
