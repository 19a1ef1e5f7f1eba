//! Receipt export.
//!
//! [`export`] turns an [`ExportRequest`] into a [`RenderedDocument`] by
//! handing the records to the PDF renderer or the workbook builder. It does no
//! filtering or sorting of its own.

mod error;

pub use error::{ExportError, Result};

use chrono::NaiveDate;
use kwitansi_core::{ExportRequest, OutputKind, RenderedDocument};
use kwitansi_formatting::{generate_file_name_on, today, EXPORT_FILE_PREFIX};
use kwitansi_pdf::{PdfOptions, PdfRenderer};
use kwitansi_sheet::{WorkbookBuilder, WorkbookOptions};
use std::path::PathBuf;

/// Settings for both output kinds.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub file_prefix: String,
    pub pdf: PdfOptions,
    pub workbook: WorkbookOptions,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            file_prefix: EXPORT_FILE_PREFIX.to_string(),
            pdf: PdfOptions::default(),
            workbook: WorkbookOptions::default(),
        }
    }
}

impl ExportOptions {
    #[must_use]
    pub fn with_logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.pdf.logo_path = Some(path.into());
        self
    }

    /// Pin the generation date used in document headers and file names.
    #[must_use]
    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.pdf.generated_on = date;
        self.workbook.generated_on = date;
        self
    }

    /// Refresh the generation date to the current local day.
    #[must_use]
    pub fn for_today(self) -> Self {
        self.generated_on(today())
    }
}

/// Render the request's records in its output kind.
///
/// # Errors
///
/// Returns [`ExportError::EmptyDataset`] when there are no records, or the
/// renderer's error if drawing or serialization fails.
pub fn export(request: &ExportRequest, options: &ExportOptions) -> Result<RenderedDocument> {
    if request.records.is_empty() {
        return Err(ExportError::EmptyDataset);
    }

    let kind = request.output_kind;
    let period = request.period();
    tracing::info!(kind = kind.extension(), records = request.records.len(), "export started");

    let bytes = match kind {
        OutputKind::Pdf => {
            let rendered = PdfRenderer::new(options.pdf.clone()).render(&request.records, period)?;
            tracing::debug!(pages = rendered.page_count, "pdf rendered");
            rendered.bytes
        }
        OutputKind::Workbook => {
            WorkbookBuilder::new(options.workbook.clone()).build(&request.records, period)?
        }
    };

    let generated_on = match kind {
        OutputKind::Pdf => options.pdf.generated_on,
        OutputKind::Workbook => options.workbook.generated_on,
    };
    let file_name = generate_file_name_on(
        &options.file_prefix,
        request.range_start,
        request.range_end,
        kind.extension(),
        generated_on,
    );

    tracing::info!(file = %file_name, bytes = bytes.len(), "export finished");
    Ok(RenderedDocument {
        bytes,
        file_name,
        kind,
    })
}
