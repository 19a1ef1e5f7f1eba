//! Header-row resolution.

use kwitansi_sheet::CellValue;

/// The fields an import row is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    StudentId,
    StudentName,
    Cohort,
}

/// Accepted header spellings after normalization.
const HEADER_ALIASES: &[(&str, CanonicalField)] = &[
    ("nim", CanonicalField::StudentId),
    ("nama", CanonicalField::StudentName),
    ("nama mahasiswa", CanonicalField::StudentName),
    ("angkatan", CanonicalField::Cohort),
];

/// Trimmed, lowercased header text.
#[must_use]
pub fn normalize_header(cell: &CellValue) -> String {
    cell.as_trimmed().to_lowercase()
}

impl CanonicalField {
    /// The field a header names, if any.
    #[must_use]
    pub fn from_header(cell: &CellValue) -> Option<Self> {
        let normalized = normalize_header(cell);
        HEADER_ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, field)| *field)
    }
}

/// Column index of each canonical field, built once per import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderMap {
    student_id: Option<usize>,
    student_name: Option<usize>,
    cohort: Option<usize>,
}

impl HeaderMap {
    /// Map a header row. When two headers resolve to the same field the
    /// right-most one is used.
    #[must_use]
    pub fn from_row(row: &[CellValue]) -> Self {
        let mut map = Self::default();
        for (index, cell) in row.iter().enumerate() {
            if let Some(field) = CanonicalField::from_header(cell) {
                *map.slot(field) = Some(index);
            }
        }
        map
    }

    fn slot(&mut self, field: CanonicalField) -> &mut Option<usize> {
        match field {
            CanonicalField::StudentId => &mut self.student_id,
            CanonicalField::StudentName => &mut self.student_name,
            CanonicalField::Cohort => &mut self.cohort,
        }
    }

    #[must_use]
    pub fn column(&self, field: CanonicalField) -> Option<usize> {
        match field {
            CanonicalField::StudentId => self.student_id,
            CanonicalField::StudentName => self.student_name,
            CanonicalField::Cohort => self.cohort,
        }
    }

    /// The cell holding `field` in `row`, if the column is mapped and present.
    #[must_use]
    pub fn cell<'a>(&self, row: &'a [CellValue], field: CanonicalField) -> Option<&'a CellValue> {
        self.column(field).and_then(|index| row.get(index))
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.student_id.is_some() && self.student_name.is_some() && self.cohort.is_some()
    }
}
