use crate::error::{ImportError, Result};
use crate::guard::UploadGuard;
use crate::header::HeaderMap;
use crate::store::StudentStore;
use crate::validate::{RowValidator, Validation};
use kwitansi_core::{ImportMode, ImportOutcome};
use kwitansi_sheet::{CellValue, RawSheet};
use std::path::Path;

/// Import the first worksheet of an uploaded file, then delete the file.
///
/// The workbook is read on the blocking pool. The file is removed on every
/// exit path, including errors.
///
/// # Errors
///
/// Returns [`ImportError::EmptySheet`] when the sheet has no data rows, a
/// sheet error if the file cannot be read, or the store's error if the
/// insert fails.
pub async fn import_spreadsheet<S>(path: &Path, mode: ImportMode, store: &S) -> Result<ImportOutcome>
where
    S: StudentStore + ?Sized,
{
    let guard = UploadGuard::new(path);
    let file = guard.path().to_path_buf();
    let sheet = tokio::task::spawn_blocking(move || RawSheet::from_path(file)).await??;
    import_rows(&sheet, mode, store).await
}

/// Validate and persist rows that are already loaded.
///
/// Rows whose cells are all blank are skipped. The first remaining row is the
/// header.
///
/// # Errors
///
/// See [`import_spreadsheet`].
pub async fn import_rows<S>(sheet: &RawSheet, mode: ImportMode, store: &S) -> Result<ImportOutcome>
where
    S: StudentStore + ?Sized,
{
    let rows: Vec<(usize, &[CellValue])> = sheet
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| !row.iter().all(CellValue::is_blank))
        .map(|(index, row)| (index, row.as_slice()))
        .collect();

    let Some(((_, header_row), data)) = rows.split_first() else {
        return Err(ImportError::EmptySheet);
    };
    if data.is_empty() {
        return Err(ImportError::EmptySheet);
    }

    tracing::info!(sheet = sheet.name(), rows = data.len(), %mode, "importing students");

    let header = HeaderMap::from_row(header_row);
    if !header.is_complete() {
        tracing::debug!(?header, "header row is missing required columns");
    }

    let mut validator = RowValidator::new(header, mode);
    for (index, row) in data {
        if validator.is_halted() {
            break;
        }
        validator.feed(sheet.row_number(*index), row);
    }
    let Validation { valid, errors } = validator.finish();

    if mode == ImportMode::Strict && !errors.is_empty() {
        tracing::info!(errors = errors.len(), "strict import aborted");
        return Ok(ImportOutcome {
            inserted_rows: Vec::new(),
            row_errors: errors,
            mode,
        });
    }

    let inserted_rows = if valid.is_empty() {
        Vec::new()
    } else {
        store.bulk_insert(valid).await?
    };

    tracing::info!(
        inserted = inserted_rows.len(),
        errors = errors.len(),
        %mode,
        "import finished"
    );
    Ok(ImportOutcome {
        inserted_rows,
        row_errors: errors,
        mode,
    })
}
