use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Failure policy for a spreadsheet import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// All rows must validate or nothing is persisted.
    Strict,
    /// Valid rows are persisted; invalid rows are skipped and reported.
    #[default]
    Partial,
}

impl ImportMode {
    /// Map a `mode` query value. Only `"strict"` selects strict mode.
    #[must_use]
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("strict") => ImportMode::Strict,
            _ => ImportMode::Partial,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ImportMode::Strict => "strict",
            ImportMode::Partial => "partial",
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A student row that passed validation. `student_id` holds digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedImportRow {
    #[serde(alias = "nim")]
    pub student_id: String,
    #[serde(alias = "nama")]
    pub student_name: String,
    #[serde(alias = "angkatan")]
    pub cohort: String,
}

/// Result of one import call.
///
/// In strict mode `inserted_rows` is empty whenever `row_errors` is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub inserted_rows: Vec<ValidatedImportRow>,
    pub row_errors: Vec<String>,
    pub mode: ImportMode,
}

impl ImportOutcome {
    #[must_use]
    pub fn inserted_count(&self) -> usize {
        self.inserted_rows.len()
    }

    /// True when a strict import was rejected because of row errors.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.mode == ImportMode::Strict && !self.row_errors.is_empty()
    }
}

impl Serialize for ImportOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ImportOutcome", 4)?;
        state.serialize_field("insertedCount", &self.inserted_count())?;
        state.serialize_field("insertedRows", &self.inserted_rows)?;
        state.serialize_field("errors", &self.row_errors)?;
        state.serialize_field("mode", &self.mode)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selector() {
        assert_eq!(ImportMode::from_selector(Some("strict")), ImportMode::Strict);
        assert_eq!(ImportMode::from_selector(Some("partial")), ImportMode::Partial);
        assert_eq!(ImportMode::from_selector(Some("STRICT")), ImportMode::Partial);
        assert_eq!(ImportMode::from_selector(Some("whatever")), ImportMode::Partial);
        assert_eq!(ImportMode::from_selector(None), ImportMode::Partial);
    }

    #[test]
    fn test_outcome_serialization_shape() {
        let outcome = ImportOutcome {
            inserted_rows: vec![ValidatedImportRow {
                student_id: "123".to_string(),
                student_name: "Ana".to_string(),
                cohort: "2021".to_string(),
            }],
            row_errors: vec!["Row 3: nim, nama, angkatan wajib diisi".to_string()],
            mode: ImportMode::Partial,
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["insertedCount"], 1);
        assert_eq!(json["insertedRows"][0]["studentId"], "123");
        assert_eq!(json["errors"][0], "Row 3: nim, nama, angkatan wajib diisi");
        assert_eq!(json["mode"], "partial");
    }

    #[test]
    fn test_aborted_only_for_strict_with_errors() {
        let mut outcome = ImportOutcome {
            inserted_rows: Vec::new(),
            row_errors: vec!["Row 2: NIM harus berupa angka".to_string()],
            mode: ImportMode::Strict,
        };
        assert!(outcome.is_aborted());

        outcome.mode = ImportMode::Partial;
        assert!(!outcome.is_aborted());
    }
}
