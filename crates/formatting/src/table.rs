//! The column set shared by the PDF and workbook exports.

use crate::currency::format_currency;
use crate::date::format_date;
use kwitansi_core::ReceiptRecord;

/// Number of columns in a receipt table.
pub const RECEIPT_COLUMN_COUNT: usize = 8;

/// Header labels, in column order.
pub const RECEIPT_HEADERS: [&str; RECEIPT_COLUMN_COUNT] = [
    "No",
    "Tanggal",
    "NIM",
    "Nama",
    "Angkatan",
    "Jenis Bayar",
    "Cara Bayar",
    "Nominal",
];

/// Display text for one record at its 0-based position in the full result set.
#[must_use]
pub fn receipt_cells(index: usize, record: &ReceiptRecord) -> [String; RECEIPT_COLUMN_COUNT] {
    [
        (index + 1).to_string(),
        format_date(&record.payment_date),
        record.student_id.clone(),
        record.student_name.clone(),
        record.cohort.clone(),
        record.payment_type.clone(),
        record.payment_method.clone(),
        format_currency(&record.nominal_amount),
    ]
}
