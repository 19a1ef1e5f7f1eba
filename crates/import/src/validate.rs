//! Row validation under the strict and partial policies.

use crate::header::{CanonicalField, HeaderMap};
use kwitansi_core::{ImportMode, ValidatedImportRow};
use kwitansi_sheet::CellValue;

/// Why a row was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowProblem {
    MissingField,
    NonNumericId,
}

impl RowProblem {
    /// User-facing message for spreadsheet row `row_number`.
    #[must_use]
    pub fn message(self, row_number: usize) -> String {
        match self {
            RowProblem::MissingField => format!("Row {row_number}: nim, nama, angkatan wajib diisi"),
            RowProblem::NonNumericId => format!("Row {row_number}: NIM harus berupa angka"),
        }
    }
}

fn present<'a>(header: &HeaderMap, row: &'a [CellValue], field: CanonicalField) -> Option<&'a CellValue> {
    header.cell(row, field).filter(|cell| !cell.is_blank())
}

/// Check a single data row against the header map.
///
/// # Errors
///
/// Returns the first problem found: missing fields are reported before a
/// non-numeric NIM.
pub fn validate_row(
    header: &HeaderMap,
    row: &[CellValue],
) -> std::result::Result<ValidatedImportRow, RowProblem> {
    let student_id = present(header, row, CanonicalField::StudentId);
    let student_name = present(header, row, CanonicalField::StudentName);
    let cohort = present(header, row, CanonicalField::Cohort);

    let (Some(student_id), Some(student_name), Some(cohort)) = (student_id, student_name, cohort)
    else {
        return Err(RowProblem::MissingField);
    };
    let student_id = student_id.as_digits().ok_or(RowProblem::NonNumericId)?;

    Ok(ValidatedImportRow {
        student_id,
        student_name: student_name.as_trimmed(),
        cohort: cohort.as_trimmed(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    /// Strict mode hit an error; later rows are never looked at.
    Halted,
}

/// What happened to a row fed to the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowVerdict {
    Accepted,
    Rejected,
    /// The validator had already halted.
    NotEvaluated,
}

/// Accumulated results once every row has been fed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub valid: Vec<ValidatedImportRow>,
    pub errors: Vec<String>,
}

/// Feeds data rows through [`validate_row`], applying the import mode.
#[derive(Debug, Clone)]
pub struct RowValidator {
    header: HeaderMap,
    mode: ImportMode,
    state: State,
    result: Validation,
}

impl RowValidator {
    #[must_use]
    pub fn new(header: HeaderMap, mode: ImportMode) -> Self {
        Self {
            header,
            mode,
            state: State::Running,
            result: Validation::default(),
        }
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.state == State::Halted
    }

    pub fn feed(&mut self, row_number: usize, row: &[CellValue]) -> RowVerdict {
        if self.is_halted() {
            return RowVerdict::NotEvaluated;
        }

        match validate_row(&self.header, row) {
            Ok(valid) => {
                self.result.valid.push(valid);
                RowVerdict::Accepted
            }
            Err(problem) => {
                self.result.errors.push(problem.message(row_number));
                if self.mode == ImportMode::Strict {
                    self.state = State::Halted;
                }
                RowVerdict::Rejected
            }
        }
    }

    #[must_use]
    pub fn finish(self) -> Validation {
        self.result
    }
}
