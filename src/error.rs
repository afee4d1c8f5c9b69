use std::path::PathBuf;

use pdfium_render::prelude::PdfiumError;

pub type Result<T> = std::result::Result<T, ReaderError>;

#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("Could not bind to the PDFium library: {0}")]
    PdfiumUnavailable(#[source] PdfiumError),

    #[error("PDFium is not initialized")]
    NoPdfium,

    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: PdfiumError,
    },

    #[error("Page {index} is not available: {source}")]
    Page {
        index: usize,
        #[source]
        source: PdfiumError,
    },

    #[error("Failed to render page {index}: {source}")]
    Render {
        index: usize,
        #[source]
        source: PdfiumError,
    },

    #[error("Failed to read settings at {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed settings at {}: {source}", path.display())]
    SettingsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
