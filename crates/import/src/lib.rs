//! Student import from uploaded spreadsheets.
//!
//! The first worksheet's first non-blank row is the header. Its cells are
//! matched against known spellings of `nim`, `nama` and `angkatan`; every
//! later row is validated against that map.
//!
//! In [`ImportMode::Partial`](kwitansi_core::ImportMode) bad rows are skipped
//! and reported. In strict mode the first bad row stops validation and
//! nothing is stored.
//!
//! ```no_run
//! # async fn run() -> kwitansi_import::Result<()> {
//! use kwitansi_core::ImportMode;
//! use kwitansi_import::{import_spreadsheet, MemoryStudentStore};
//! use std::path::Path;
//!
//! let store = MemoryStudentStore::new();
//! let outcome = import_spreadsheet(Path::new("uploads/EXCEL-1.xlsx"), ImportMode::Strict, &store).await?;
//! println!("{} inserted, {} errors", outcome.inserted_count(), outcome.row_errors.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod guard;
pub mod header;
mod parser;
mod store;
pub mod validate;

pub use error::{ImportError, PersistenceError, Result};
pub use guard::UploadGuard;
pub use header::{CanonicalField, HeaderMap};
pub use parser::{import_rows, import_spreadsheet};
pub use store::{MemoryStudentStore, StudentStore};
pub use validate::{validate_row, RowProblem, RowValidator, RowVerdict, Validation};
