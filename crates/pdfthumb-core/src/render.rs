//! Page rendering: viewport computation, paint, encode.

use pdfthumb_surface::SurfaceProvider;
use tracing::trace;

use crate::error::Result;
use crate::model::Thumbnail;
use crate::options::OutputKind;
use crate::pdf::{DocumentSession, PageSize};

/// Pixel dimensions for a page at the requested scale, at least 1x1.
pub(crate) fn viewport(size: PageSize, scale: f32) -> (u32, u32) {
    let scale = if scale > 0.0 { scale } else { 1.0 };
    let width = (size.width * scale).round().max(1.0) as u32;
    let height = (size.height * scale).round().max(1.0) as u32;
    (width, height)
}

/// Render one page into a freshly allocated surface and encode it.
///
/// The surface is allocated at exactly the viewport size before paint
/// begins; this stage is not cancellable mid-paint.
pub(crate) fn render_page(
    session: &dyn DocumentSession,
    surfaces: &dyn SurfaceProvider,
    page: u32,
    scale: f32,
    output: OutputKind,
) -> Result<Thumbnail> {
    let size = session.page_size(page)?;
    let (width, height) = viewport(size, scale);
    trace!("rendering page {} at {}x{}", page, width, height);

    let mut surface = surfaces.allocate(width, height)?;
    let frame = session.render_page(page, width, height)?;
    surface.write_pixels(&frame.data)?;

    Ok(match output {
        OutputKind::DataUrl => Thumbnail::DataUrl(surface.to_data_url()?),
        OutputKind::Buffer => Thumbnail::Buffer(surface.to_png()?),
    })
}
