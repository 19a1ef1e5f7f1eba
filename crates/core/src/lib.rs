//! # kwitansi-core
//!
//! Data model for the kwitansi document pipeline.
//!
//! This crate provides:
//! - Receipt records consumed by the PDF and workbook exporters
//! - Export requests and rendered documents
//! - Import modes, validated rows and import outcomes

/// Stored date parsing.
pub mod date;
/// Export request and output types.
pub mod export;
/// Import row and outcome types.
pub mod import;
/// Receipt record types.
pub mod record;

pub use date::parse_date;
pub use export::{ExportRequest, OutputKind, RenderedDocument};
pub use import::{ImportMode, ImportOutcome, ValidatedImportRow};
pub use record::{Nominal, ReceiptRecord};
