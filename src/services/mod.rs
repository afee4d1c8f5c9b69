pub mod document;
pub mod pdf_render;
pub mod settings;
