mod highlight_overlay;
mod page_canvas;
mod pdf_view;
mod reader_header_bar;
mod reader_window;
pub mod style;

pub use highlight_overlay::HighlightOverlay;
pub use page_canvas::PageCanvas;
pub use pdf_view::PdfView;
pub use reader_header_bar::ReaderHeaderBar;
pub use reader_window::ReaderWindow;
