use gtk::gdk;
use log::{info, warn};
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};

use crate::error::{ReaderError, Result};
use crate::services::pdf_render::render_page_texture;
use crate::text_map::{PageTextMap, PdfiumWordSource};

/// Bind PDFium once for the lifetime of the process
///
/// Looks in the configured directory first, then next to the executable's
/// working directory, then falls back to the system library.
pub fn bind_pdfium(library_dir: Option<&Path>) -> Result<&'static Pdfium> {
    let bindings = match library_dir {
        Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
        None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(ReaderError::PdfiumUnavailable)?;

    let pdfium: &'static Pdfium = Box::leak(Box::new(Pdfium::new(bindings)));
    Ok(pdfium)
}

/// An open PDF file. Dropping it closes the underlying document.
pub struct OpenDocument {
    document: PdfDocument<'static>,
    path: PathBuf,
}

impl OpenDocument {
    pub fn open(pdfium: &'static Pdfium, path: &Path) -> Result<Self> {
        let document =
            pdfium
                .load_pdf_from_file(path, None)
                .map_err(|source| ReaderError::Open {
                    path: path.to_path_buf(),
                    source,
                })?;

        info!(
            "Opened {} ({} pages)",
            path.display(),
            document.pages().len()
        );

        Ok(Self {
            document,
            path: path.to_path_buf(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page(&self, index: usize) -> Result<PdfPage<'_>> {
        self.document
            .pages()
            .get(index as u16)
            .map_err(|source| ReaderError::Page { index, source })
    }

    /// Page width and height in points
    pub fn page_size(&self, index: usize) -> Result<(f64, f64)> {
        let page = self.page(index)?;
        Ok((page.width().value as f64, page.height().value as f64))
    }

    pub fn render_page(&self, index: usize, render_scale: f64) -> Result<gdk::MemoryTexture> {
        let page = self.page(index)?;
        render_page_texture(&page, render_scale)
            .map_err(|source| ReaderError::Render { index, source })
    }

    /// Words of `index` grouped into sentences
    pub fn page_text(&self, index: usize) -> Result<PageTextMap> {
        let (width, height) = self.page_size(index)?;
        let source = PdfiumWordSource::new(&self.document);

        match PageTextMap::build(&source, index, width, height) {
            Ok(map) => Ok(map),
            Err(source) => {
                warn!("No text for page {index}: {source}");
                Err(ReaderError::Page { index, source })
            }
        }
    }
}

impl Drop for OpenDocument {
    fn drop(&mut self) {
        info!("Closed {}", self.path.display());
    }
}
