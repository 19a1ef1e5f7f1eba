use crate::date::{format_date, today};
use chrono::NaiveDate;

/// Prefix shared by every exported receipt document.
pub const EXPORT_FILE_PREFIX: &str = "Data_Kwitansi";

/// Build an export file name using today's local date when no range is given.
#[must_use]
pub fn generate_file_name(
    prefix: &str,
    range_start: Option<NaiveDate>,
    range_end: Option<NaiveDate>,
    extension: &str,
) -> String {
    generate_file_name_on(prefix, range_start, range_end, extension, today())
}

/// Build an export file name against an explicit "today".
///
/// With both bounds: `{prefix}_{start}_sampai_{end}.{ext}`; otherwise
/// `{prefix}_{today}.{ext}`. Dates are `DD-MM-YYYY`.
#[must_use]
pub fn generate_file_name_on(
    prefix: &str,
    range_start: Option<NaiveDate>,
    range_end: Option<NaiveDate>,
    extension: &str,
    today: NaiveDate,
) -> String {
    let stamp = match (range_start, range_end) {
        (Some(start), Some(end)) => {
            format!("{}_sampai_{}", format_date(&start), format_date(&end))
        }
        _ => format_date(&today),
    };
    let extension = extension.trim_start_matches('.');
    format!("{prefix}_{stamp}.{extension}")
}
