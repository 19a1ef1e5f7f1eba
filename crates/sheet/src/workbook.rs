//! Styled receipt workbooks.
//!
//! Sheet layout, top to bottom:
//!
//! | row | content |
//! |-----|---------|
//! | 0 | title, merged across all columns |
//! | 1 | generation date, merged |
//! | 2 | period line, merged (only when both range bounds are given) |
//! | next | blank separator |
//! | header | column headers, frozen below |
//! | header + 1.. | one row per record |

use crate::error::{Result, SheetError};
use chrono::NaiveDate;
use kwitansi_core::ReceiptRecord;
use kwitansi_formatting::{
    generated_label, period_label, receipt_cells, today, RECEIPT_COLUMN_COUNT, RECEIPT_HEADERS,
};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

/// Column widths in characters, in column order.
pub const COLUMN_WIDTHS: [f64; RECEIPT_COLUMN_COUNT] = [5.0, 12.0, 15.0, 25.0, 10.0, 15.0, 15.0, 15.0];

const ACCENT: u32 = 0x004F_81BD;
const GRID: u32 = 0x00BF_BFBF;
const STRIPE: u32 = 0x00DC_E6F1;

/// Background of the data row at `index`: even record indices are striped.
#[must_use]
pub fn stripe_color(index: usize) -> Option<Color> {
    (index % 2 == 0).then_some(Color::RGB(STRIPE))
}

/// Options for building a receipt workbook
#[derive(Debug, Clone)]
pub struct WorkbookOptions {
    pub title: String,
    pub sheet_name: String,
    pub generated_on: NaiveDate,
}

impl Default for WorkbookOptions {
    fn default() -> Self {
        Self {
            title: "Data Kwitansi".to_string(),
            sheet_name: "Kwitansi".to_string(),
            generated_on: today(),
        }
    }
}

/// Inclusive cell range to merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl MergeRange {
    fn full_row(row: u32) -> Self {
        Self {
            first_row: row,
            first_col: 0,
            last_row: row,
            last_col: (RECEIPT_COLUMN_COUNT - 1) as u16,
        }
    }
}

/// Row positions and merges for one workbook, computed before any writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetPlan {
    pub title_row: u32,
    pub generated_row: u32,
    pub period_row: Option<u32>,
    pub header_row: u32,
    pub first_data_row: u32,
    pub data_rows: u32,
    pub merges: Vec<MergeRange>,
}

impl SheetPlan {
    /// Lay out a sheet for `record_count` records.
    ///
    /// The header sits at `2 + (1 if period) + 1`.
    pub fn new(record_count: usize, has_period: bool) -> Result<Self> {
        let data_rows =
            u32::try_from(record_count).map_err(|_| SheetError::RowOverflow(record_count))?;
        let title_row = 0;
        let generated_row = 1;
        let period_row = has_period.then_some(2);
        let header_row = 2 + u32::from(has_period) + 1;

        let mut merges = vec![
            MergeRange::full_row(title_row),
            MergeRange::full_row(generated_row),
        ];
        merges.extend(period_row.map(MergeRange::full_row));

        Ok(Self {
            title_row,
            generated_row,
            period_row,
            header_row,
            first_data_row: header_row + 1,
            data_rows,
            merges,
        })
    }

    /// Rows above this one stay visible while scrolling.
    #[must_use]
    pub fn freeze_row(&self) -> u32 {
        self.header_row + 1
    }
}

struct SheetFormats {
    title: Format,
    meta: Format,
    header: Format,
    data_center: Format,
    data_left: Format,
    striped_center: Format,
    striped_left: Format,
}

impl SheetFormats {
    fn new() -> Self {
        let data = Format::new()
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(GRID))
            .set_align(FormatAlign::VerticalCenter);

        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(14.0)
                .set_align(FormatAlign::Center),
            meta: Format::new().set_italic().set_align(FormatAlign::Center),
            header: Format::new()
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Color::RGB(ACCENT))
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            data_center: data.clone().set_align(FormatAlign::Center),
            data_left: data.clone().set_align(FormatAlign::Left),
            striped_center: data
                .clone()
                .set_background_color(Color::RGB(STRIPE))
                .set_align(FormatAlign::Center),
            striped_left: data
                .set_background_color(Color::RGB(STRIPE))
                .set_align(FormatAlign::Left),
        }
    }

    /// Number-column and text-column formats for the record at `index`.
    fn data_row(&self, index: usize) -> (&Format, &Format) {
        if stripe_color(index).is_some() {
            (&self.striped_center, &self.striped_left)
        } else {
            (&self.data_center, &self.data_left)
        }
    }
}

/// Builds styled `.xlsx` workbooks from receipt records.
#[derive(Debug, Clone, Default)]
pub struct WorkbookBuilder {
    options: WorkbookOptions,
}

impl WorkbookBuilder {
    #[must_use]
    pub fn new(options: WorkbookOptions) -> Self {
        Self { options }
    }

    /// Build the workbook and return its bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::EmptyDataset`] before any construction when
    /// `records` is empty.
    pub fn build(
        &self,
        records: &[ReceiptRecord],
        period: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<u8>> {
        if records.is_empty() {
            return Err(SheetError::EmptyDataset);
        }

        let plan = SheetPlan::new(records.len(), period.is_some())?;
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.options.sheet_name)?;

        self.write_sheet(worksheet, &plan, records, period)?;

        let bytes = workbook.save_to_buffer()?;
        tracing::debug!(
            records = records.len(),
            header_row = plan.header_row,
            bytes = bytes.len(),
            "built receipt workbook"
        );
        Ok(bytes)
    }

    fn write_sheet(
        &self,
        worksheet: &mut Worksheet,
        plan: &SheetPlan,
        records: &[ReceiptRecord],
        period: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<()> {
        let formats = SheetFormats::new();

        let mut texts = vec![
            (self.options.title.clone(), &formats.title),
            (generated_label(self.options.generated_on), &formats.meta),
        ];
        if let Some((start, end)) = period {
            texts.push((period_label(start, end), &formats.meta));
        }
        for (merge, (text, format)) in plan.merges.iter().zip(&texts) {
            worksheet.merge_range(
                merge.first_row,
                merge.first_col,
                merge.last_row,
                merge.last_col,
                text,
                format,
            )?;
        }

        for (col, header) in RECEIPT_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(plan.header_row, col as u16, *header, &formats.header)?;
        }
        worksheet.set_row_height(plan.header_row, 20.0)?;

        for (index, record) in records.iter().enumerate() {
            let row = plan.first_data_row + index as u32;
            let cells = receipt_cells(index, record);
            let (number, text_format) = formats.data_row(index);
            worksheet.write_number_with_format(row, 0, (index + 1) as f64, number)?;
            for (col, text) in cells.iter().enumerate().skip(1) {
                worksheet.write_string_with_format(row, col as u16, text, text_format)?;
            }
        }

        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }
        worksheet.set_freeze_panes(plan.freeze_row(), 0)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_without_period() {
        let plan = SheetPlan::new(3, false).unwrap();
        assert_eq!(plan.period_row, None);
        assert_eq!(plan.header_row, 3);
        assert_eq!(plan.first_data_row, 4);
        assert_eq!(plan.freeze_row(), 4);
        assert_eq!(plan.merges.len(), 2);
        assert_eq!(plan.merges[0], MergeRange::full_row(0));
    }

    #[test]
    fn test_plan_with_period() {
        let plan = SheetPlan::new(10, true).unwrap();
        assert_eq!(plan.period_row, Some(2));
        assert_eq!(plan.header_row, 4);
        assert_eq!(plan.freeze_row(), 5);
        assert_eq!(plan.data_rows, 10);
        assert_eq!(
            plan.merges.last(),
            Some(&MergeRange {
                first_row: 2,
                first_col: 0,
                last_row: 2,
                last_col: 7,
            })
        );
    }

    #[test]
    fn test_even_rows_are_striped() {
        assert_eq!(stripe_color(0), Some(Color::RGB(STRIPE)));
        assert_eq!(stripe_color(1), None);
        assert_eq!(stripe_color(4), Some(Color::RGB(STRIPE)));

        let formats = SheetFormats::new();
        assert_eq!(formats.data_row(0), formats.data_row(2));
        assert_ne!(formats.data_row(0), formats.data_row(1));
        assert_eq!(formats.data_row(1).1, &formats.data_left);
        assert_eq!(formats.data_row(2).1, &formats.striped_left);
    }

    #[test]
    fn test_empty_records_rejected() {
        let result = WorkbookBuilder::default().build(&[], None);
        assert!(matches!(result, Err(SheetError::EmptyDataset)));
    }
}
