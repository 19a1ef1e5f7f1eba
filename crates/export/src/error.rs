use kwitansi_pdf::PdfError;
use kwitansi_sheet::SheetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Data kwitansi tidak ditemukan")]
    EmptyDataset,

    #[error("Failed to render PDF: {0}")]
    Pdf(PdfError),

    #[error("Failed to build workbook: {0}")]
    Sheet(SheetError),
}

impl From<PdfError> for ExportError {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::EmptyDataset => ExportError::EmptyDataset,
            other => ExportError::Pdf(other),
        }
    }
}

impl From<SheetError> for ExportError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::EmptyDataset => ExportError::EmptyDataset,
            other => ExportError::Sheet(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
