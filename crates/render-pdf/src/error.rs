use briefpress_layout::LayoutError;
use briefpress_traits::FontError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
