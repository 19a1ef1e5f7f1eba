use thiserror::Error;

/// Errors that can occur while loading or building spreadsheets
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("No records to export")]
    EmptyDataset,

    #[error("Spreadsheet has no data rows")]
    EmptySheet,

    #[error("Spreadsheet contains no worksheets")]
    NoWorksheet,

    #[error("Failed to read spreadsheet: {0}")]
    Read(#[from] calamine::Error),

    #[error("Failed to build workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("Row index overflow: {0}")]
    RowOverflow(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SheetError>;
