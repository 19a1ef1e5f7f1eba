use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Positional rows of a worksheet, as loaded from disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    name: String,
    first_row: u32,
    rows: Vec<Vec<CellValue>>,
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel stores dates as days since 1899-12-30
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

impl RawSheet {
    /// Build a sheet from in-memory rows starting at spreadsheet row 1.
    pub fn from_rows<R, C>(name: &str, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<CellValue>,
    {
        Self {
            name: name.to_string(),
            first_row: 0,
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Load the first worksheet of an `.xlsx`, `.xlsm`, `.xls` or `.ods` file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or has no worksheets.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut workbook = open_workbook_auto(path.as_ref())?;

        let sheet_names = workbook.sheet_names();
        let first = sheet_names.first().ok_or(SheetError::NoWorksheet)?;
        let range = workbook.worksheet_range(first)?;

        tracing::debug!(
            path = %path.as_ref().display(),
            sheet = %first,
            rows = range.height(),
            "loaded worksheet"
        );

        Ok(Self::from_range(first, &range))
    }

    /// Build a sheet from a calamine range, keeping its start row.
    pub fn from_range(name: &str, range: &Range<Data>) -> Self {
        let first_row = range.start().map_or(0, |(row, _)| row);
        let rows = range
            .rows()
            .map(|row| row.iter().map(data_to_cell_value).collect())
            .collect();

        Self {
            name: name.to_string(),
            first_row,
            rows,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 1-based spreadsheet row number of the row at `index`.
    #[must_use]
    pub fn row_number(&self, index: usize) -> usize {
        self.first_row as usize + index + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::tempdir;

    #[test]
    fn test_from_rows() {
        let sheet = RawSheet::from_rows("Data", vec![vec!["NIM", "Nama"], vec!["1", "Ana"]]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.row_number(1), 2);
        assert_eq!(sheet.rows()[1][1], CellValue::from("Ana"));
    }

    #[test]
    fn test_xlsx_read_first_sheet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("students.xlsx");

        let mut workbook = Workbook::new();
        let first = workbook.add_worksheet();
        first.set_name("Mahasiswa").unwrap();
        first.write_string(0, 0, "NIM").unwrap();
        first.write_string(0, 1, "Nama").unwrap();
        first.write_number(1, 0, 2_101_001).unwrap();
        first.write_string(1, 1, "Ana").unwrap();
        let second = workbook.add_worksheet();
        second.write_string(0, 0, "ignored").unwrap();
        workbook.save(&path).unwrap();

        let sheet = RawSheet::from_path(&path).unwrap();
        assert_eq!(sheet.name(), "Mahasiswa");
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.rows()[0][0], CellValue::from("NIM"));
        assert_eq!(sheet.rows()[1][0].as_digits().as_deref(), Some("2101001"));
    }

    #[test]
    fn test_row_numbers_follow_range_start() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(2, 0, "NIM").unwrap();
        sheet.write_string(3, 0, "7").unwrap();
        workbook.save(&path).unwrap();

        let sheet = RawSheet::from_path(&path).unwrap();
        assert_eq!(sheet.rows()[0][0], CellValue::from("NIM"));
        assert_eq!(sheet.row_number(1), 4);
    }

    #[test]
    fn test_missing_file() {
        let result = RawSheet::from_path("/non/existent/file.xlsx");
        assert!(result.is_err());
    }
}
