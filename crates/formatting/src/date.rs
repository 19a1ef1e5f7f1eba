use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use kwitansi_core::parse_date;

/// Anything that may carry a calendar date.
pub trait DateInput {
    /// The calendar date, or `None` when absent or unparseable.
    fn to_date(&self) -> Option<NaiveDate>;
}

impl DateInput for NaiveDate {
    fn to_date(&self) -> Option<NaiveDate> {
        Some(*self)
    }
}

impl DateInput for NaiveDateTime {
    fn to_date(&self) -> Option<NaiveDate> {
        Some(self.date())
    }
}

impl<Tz: TimeZone> DateInput for DateTime<Tz> {
    fn to_date(&self) -> Option<NaiveDate> {
        Some(self.date_naive())
    }
}

impl DateInput for str {
    fn to_date(&self) -> Option<NaiveDate> {
        parse_date(self)
    }
}

impl DateInput for String {
    fn to_date(&self) -> Option<NaiveDate> {
        parse_date(self)
    }
}

impl<T: DateInput + ?Sized> DateInput for &T {
    fn to_date(&self) -> Option<NaiveDate> {
        (**self).to_date()
    }
}

impl<T: DateInput> DateInput for Option<T> {
    fn to_date(&self) -> Option<NaiveDate> {
        self.as_ref().and_then(DateInput::to_date)
    }
}

/// Format a date as `DD-MM-YYYY`; invalid or absent dates give `""`.
pub fn format_date<D: DateInput + ?Sized>(value: &D) -> String {
    value
        .to_date()
        .map(|d| d.format("%d-%m-%Y").to_string())
        .unwrap_or_default()
}

/// Today's date on the local wall clock.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `Tanggal Export: DD-MM-YYYY`
#[must_use]
pub fn generated_label(generated_on: NaiveDate) -> String {
    format!("Tanggal Export: {}", format_date(&generated_on))
}

/// `Periode: DD-MM-YYYY s/d DD-MM-YYYY`
#[must_use]
pub fn period_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("Periode: {} s/d {}", format_date(&start), format_date(&end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_iso_date_string() {
        assert_eq!(format_date("2024-03-05"), "05-03-2024");
        assert_eq!(format_date(" 2024-12-31 "), "31-12-2024");
    }

    #[test]
    fn test_format_datetime_strings() {
        assert_eq!(format_date("2024-03-05T10:20:30"), "05-03-2024");
        assert_eq!(format_date("2024-03-05 10:20:30.123"), "05-03-2024");
    }

    #[test]
    fn test_invalid_dates_are_empty() {
        assert_eq!(format_date("not a date"), "");
        assert_eq!(format_date("2024-02-30"), "");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date(&None::<NaiveDate>), "");
    }

    #[test]
    fn test_typed_dates() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 9).unwrap();
        assert_eq!(format_date(&date), "09-01-2021");
        assert_eq!(format_date(&Some(date)), "09-01-2021");

        let dt = date.and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(format_date(&dt), "09-01-2021");
    }

    #[test]
    fn test_labels() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(generated_label(end), "Tanggal Export: 31-01-2024");
        assert_eq!(period_label(start, end), "Periode: 01-01-2024 s/d 31-01-2024");
    }
}
