//! Spreadsheet module for kwitansi
//!
//! Loads uploaded spreadsheets into positional rows for the import parser and
//! builds styled receipt workbooks for export.
//!
//! # Examples
//!
//! ## Reading rows
//!
//! ```
//! use kwitansi_sheet::{CellValue, RawSheet};
//!
//! let sheet = RawSheet::from_rows("Data", vec![
//!     vec!["NIM", "Nama", "Angkatan"],
//!     vec!["123", "Ana", "2021"],
//! ]);
//!
//! assert_eq!(sheet.row_count(), 2);
//! assert_eq!(sheet.rows()[1][0], CellValue::from("123"));
//! ```
//!
//! ## Building a workbook
//!
//! ```no_run
//! use kwitansi_core::ReceiptRecord;
//! use kwitansi_sheet::{WorkbookBuilder, WorkbookOptions};
//!
//! let records = vec![ReceiptRecord::default()];
//! let bytes = WorkbookBuilder::new(WorkbookOptions::default())
//!     .build(&records, None)
//!     .unwrap();
//! std::fs::write("kwitansi.xlsx", bytes).unwrap();
//! ```

mod cell;
mod error;
pub mod workbook;
mod xlsx;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export workbook builder types.
pub use workbook::{MergeRange, SheetPlan, WorkbookBuilder, WorkbookOptions};
/// Re-export the raw worksheet loader.
pub use xlsx::RawSheet;
