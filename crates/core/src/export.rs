use crate::record::ReceiptRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which document an export produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Pdf,
    #[default]
    Workbook,
}

impl OutputKind {
    /// Map the `type` selector of an export request to an output kind.
    ///
    /// Only `"pdf"` selects the PDF renderer; anything else, including an
    /// absent selector, falls back to the workbook.
    #[must_use]
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some(s) if s.trim().eq_ignore_ascii_case("pdf") => OutputKind::Pdf,
            _ => OutputKind::Workbook,
        }
    }

    /// File extension without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            OutputKind::Pdf => "pdf",
            OutputKind::Workbook => "xlsx",
        }
    }

    /// MIME type the caller attaches to the response.
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            OutputKind::Pdf => "application/pdf",
            OutputKind::Workbook => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// A filtered, sorted record set plus the options that shape its document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub records: Vec<ReceiptRecord>,
    #[serde(default)]
    pub range_start: Option<NaiveDate>,
    #[serde(default)]
    pub range_end: Option<NaiveDate>,
    #[serde(default)]
    pub output_kind: OutputKind,
}

impl ExportRequest {
    #[must_use]
    pub fn new(records: Vec<ReceiptRecord>, output_kind: OutputKind) -> Self {
        Self {
            records,
            range_start: None,
            range_end: None,
            output_kind,
        }
    }

    /// Set the reporting period.
    #[must_use]
    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.range_start = start;
        self.range_end = end;
        self
    }

    /// The reporting period, only when both bounds are present.
    #[must_use]
    pub fn period(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.range_start.zip(self.range_end)
    }
}

/// Bytes of a finished export and the name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub kind: OutputKind,
}

impl RenderedDocument {
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }

    /// Value for a `Content-Disposition` header.
    #[must_use]
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_kind_selector() {
        assert_eq!(OutputKind::from_selector(Some("pdf")), OutputKind::Pdf);
        assert_eq!(OutputKind::from_selector(Some("PDF")), OutputKind::Pdf);
        assert_eq!(OutputKind::from_selector(Some("excel")), OutputKind::Workbook);
        assert_eq!(OutputKind::from_selector(Some("csv")), OutputKind::Workbook);
        assert_eq!(OutputKind::from_selector(None), OutputKind::Workbook);
    }

    #[test]
    fn test_period_requires_both_bounds() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1);
        let end = NaiveDate::from_ymd_opt(2024, 1, 31);

        let request = ExportRequest::new(Vec::new(), OutputKind::Pdf);
        assert_eq!(request.clone().with_range(start, None).period(), None);
        assert_eq!(request.clone().with_range(None, end).period(), None);
        assert_eq!(
            request.with_range(start, end).period(),
            Some((start.unwrap(), end.unwrap()))
        );
    }

    #[test]
    fn test_rendered_document_headers() {
        let doc = RenderedDocument {
            bytes: vec![1, 2, 3],
            file_name: "Data_Kwitansi_05-03-2024.pdf".to_string(),
            kind: OutputKind::Pdf,
        };
        assert_eq!(doc.content_type(), "application/pdf");
        assert_eq!(
            doc.content_disposition(),
            "attachment; filename=\"Data_Kwitansi_05-03-2024.pdf\""
        );
    }
}
