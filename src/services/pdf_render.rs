use gtk::{gdk, glib};
use pdfium_render::prelude::*;

/// Configuration for rendering a PDF page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRenderConfig {
    pub width: i32,
    pub height: i32,
    pub stride: usize,
}

/// Pixel width of a page rendered at `render_scale` pixels per point
pub fn render_width(page_width_pts: f64, render_scale: f64) -> i32 {
    (page_width_pts * render_scale).round().max(1.0) as i32
}

pub fn create_render_config(page_width_pts: f64, render_scale: f64) -> PdfRenderConfig {
    PdfRenderConfig::new()
        .set_target_width(render_width(page_width_pts, render_scale))
        .set_format(PdfBitmapFormat::BGRA)
}

pub fn calculate_page_dimensions(bitmap: &PdfBitmap) -> PageRenderConfig {
    let width = bitmap.width();
    let height = bitmap.height();
    PageRenderConfig {
        width,
        height,
        stride: (width * 4) as usize,
    }
}

/// Rasterize `page` at a fixed scale, independent of on-screen zoom
pub fn render_page_texture(
    page: &PdfPage,
    render_scale: f64,
) -> Result<gdk::MemoryTexture, PdfiumError> {
    let config = create_render_config(page.width().value as f64, render_scale);
    let bitmap = page.render_with_config(&config)?;
    let dimensions = calculate_page_dimensions(&bitmap);

    let bytes = bitmap.as_raw_bytes();
    let bytes_glib = glib::Bytes::from(&bytes);

    Ok(gdk::MemoryTexture::new(
        dimensions.width,
        dimensions.height,
        gdk::MemoryFormat::B8g8r8a8,
        &bytes_glib,
        dimensions.stride,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_width() {
        assert_eq!(render_width(612.0, 4.0), 2448);
        assert_eq!(render_width(595.3, 1.0), 595);
        assert_eq!(render_width(0.0, 4.0), 1);
    }
}
