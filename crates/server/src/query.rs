//! Receipt filtering, sorting and paging for the list and export routes.
//!
//! This stands in for the database query the records would normally come
//! from; the export pipeline itself only sees the resulting list.

use chrono::NaiveDate;
use kwitansi_core::ReceiptRecord;
use kwitansi_formatting::DateInput;
use serde::Deserialize;
use std::cmp::Ordering;

const DEFAULT_PAGE_SIZE: usize = 5;

/// Query string shared by `GET /api/kwitansi` and `GET /api/kwitansi/export`.
///
/// Everything arrives as text and is parsed leniently: unparsable values fall
/// back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ReceiptQuery {
    #[must_use]
    pub fn start(&self) -> Option<NaiveDate> {
        self.start_date.as_deref().and_then(|s| s.to_date())
    }

    #[must_use]
    pub fn end(&self) -> Option<NaiveDate> {
        self.end_date.as_deref().and_then(|s| s.to_date())
    }

    #[must_use]
    pub fn filter(&self) -> ReceiptFilter {
        ReceiptFilter {
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase),
            range: self.start().zip(self.end()),
            sort: SortField::parse(self.sort.as_deref()),
            descending: self.order.as_deref() == Some("desc"),
        }
    }

    #[must_use]
    pub fn page(&self) -> Page {
        let parse = |value: &Option<String>, default: usize| {
            value
                .as_deref()
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(default)
        };
        Page {
            number: parse(&self.page, 1),
            size: parse(&self.limit, DEFAULT_PAGE_SIZE),
        }
    }
}

/// Column to sort receipts by. Defaults to the payment date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    PaymentDate,
    StudentId,
    StudentName,
    Cohort,
    PaymentType,
    PaymentMethod,
    Nominal,
}

impl SortField {
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("nim") => SortField::StudentId,
            Some("nama") => SortField::StudentName,
            Some("angkatan") => SortField::Cohort,
            Some("jenis_bayar") => SortField::PaymentType,
            Some("cara_bayar") => SortField::PaymentMethod,
            Some("nominal") => SortField::Nominal,
            _ => SortField::PaymentDate,
        }
    }

    fn compare(self, a: &ReceiptRecord, b: &ReceiptRecord) -> Ordering {
        match self {
            SortField::PaymentDate => a.payment_date.cmp(&b.payment_date),
            SortField::StudentId => a.student_id.cmp(&b.student_id),
            SortField::StudentName => a.student_name.cmp(&b.student_name),
            SortField::Cohort => a.cohort.cmp(&b.cohort),
            SortField::PaymentType => a.payment_type.cmp(&b.payment_type),
            SortField::PaymentMethod => a.payment_method.cmp(&b.payment_method),
            SortField::Nominal => {
                let amount = |r: &ReceiptRecord| r.nominal_amount.amount().unwrap_or(0.0);
                amount(a).total_cmp(&amount(b))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFilter {
    /// Lowercased substring matched against NIM and name.
    pub search: Option<String>,
    /// Inclusive on both ends; the end date covers its whole day.
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub sort: SortField,
    pub descending: bool,
}

impl ReceiptFilter {
    #[must_use]
    pub fn matches(&self, record: &ReceiptRecord) -> bool {
        if let Some(needle) = &self.search {
            let hit = record.student_id.to_lowercase().contains(needle)
                || record.student_name.to_lowercase().contains(needle);
            if !hit {
                return false;
            }
        }
        match self.range {
            Some((start, end)) => record
                .payment_date
                .is_some_and(|date| start <= date && date <= end),
            None => true,
        }
    }

    /// Matching records in sort order.
    #[must_use]
    pub fn apply(&self, records: &[ReceiptRecord]) -> Vec<ReceiptRecord> {
        let mut selected: Vec<ReceiptRecord> =
            records.iter().filter(|r| self.matches(r)).cloned().collect();
        selected.sort_by(|a, b| {
            let ordering = self.sort.compare(a, b);
            if self.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        selected
    }
}

/// 1-based page of a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl Page {
    #[must_use]
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.size)
    }

    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.number - 1).saturating_mul(self.size).min(items.len());
        let end = start.saturating_add(self.size).min(items.len());
        &items[start..end]
    }
}
