//! # kwitansi-formatting
//!
//! Locale-aware formatting used by both exporters.
//!
//! All formatters fail soft: a bad date renders as an empty string and a bad
//! amount renders as zero, so a single malformed record never aborts a
//! document.
//!
//! ```
//! use kwitansi_formatting::{format_currency, format_date};
//! use kwitansi_core::Nominal;
//!
//! assert_eq!(format_date("2024-03-05"), "05-03-2024");
//! assert_eq!(format_currency(&Nominal::from("12000")), "Rp 12.000");
//! assert_eq!(format_currency(None), "Rp 0");
//! ```

mod currency;
mod date;
mod filename;
pub mod table;

pub use currency::{format_currency, format_rupiah};
pub use date::{format_date, generated_label, period_label, today, DateInput};
pub use filename::{generate_file_name, generate_file_name_on, EXPORT_FILE_PREFIX};
pub use table::{receipt_cells, RECEIPT_COLUMN_COUNT, RECEIPT_HEADERS};
