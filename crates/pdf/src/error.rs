use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("No records to export")]
    EmptyDataset,

    #[error("Failed to lay out PDF: {0}")]
    Layout(String),

    #[error("Failed to write PDF: {0}")]
    Write(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PdfError>;
