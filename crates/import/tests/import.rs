use kwitansi_core::{ImportMode, ValidatedImportRow};
use kwitansi_import::{
    import_rows, import_spreadsheet, ImportError, MemoryStudentStore, PersistenceError,
    StudentStore,
};
use kwitansi_sheet::{CellValue, RawSheet};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Write rows to an xlsx file; empty strings leave the cell unwritten.
fn write_upload(dir: &TempDir, name: &str, rows: &[&[&str]]) -> PathBuf {
    let path = dir.path().join(name);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
    }
    workbook.save(&path).unwrap();
    path
}

fn student(id: &str, name: &str, cohort: &str) -> ValidatedImportRow {
    ValidatedImportRow {
        student_id: id.to_string(),
        student_name: name.to_string(),
        cohort: cohort.to_string(),
    }
}

const SAMPLE: &[&[&str]] = &[
    &["NIM", "Nama", "Angkatan"],
    &["123", "Ana", "2021"],
    &["", "Budi", "2021"],
];

#[tokio::test]
async fn test_partial_import_skips_bad_rows() {
    let dir = tempdir().unwrap();
    let path = write_upload(&dir, "EXCEL-partial.xlsx", SAMPLE);
    let store = MemoryStudentStore::new();

    let outcome = import_spreadsheet(&path, ImportMode::Partial, &store)
        .await
        .unwrap();

    assert_eq!(outcome.inserted_rows, vec![student("123", "Ana", "2021")]);
    assert_eq!(
        outcome.row_errors,
        vec!["Row 3: nim, nama, angkatan wajib diisi"]
    );
    assert_eq!(outcome.mode, ImportMode::Partial);
    assert!(!outcome.is_aborted());
    assert_eq!(store.all().await, outcome.inserted_rows);
    assert!(!path.exists(), "upload must be removed");
}

#[tokio::test]
async fn test_strict_import_inserts_nothing_on_error() {
    let dir = tempdir().unwrap();
    let path = write_upload(&dir, "EXCEL-strict.xlsx", SAMPLE);
    let store = MemoryStudentStore::new();

    let outcome = import_spreadsheet(&path, ImportMode::Strict, &store)
        .await
        .unwrap();

    assert!(outcome.inserted_rows.is_empty());
    assert_eq!(
        outcome.row_errors,
        vec!["Row 3: nim, nama, angkatan wajib diisi"]
    );
    assert!(outcome.is_aborted());
    assert!(store.is_empty().await);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_strict_import_stops_at_first_error() {
    let dir = tempdir().unwrap();
    let path = write_upload(
        &dir,
        "EXCEL-halt.xlsx",
        &[
            &["nim", "nama mahasiswa", "angkatan"],
            &["12x", "Ana", "2021"],
            &["", "Budi", "2021"],
            &["99", "Cici", "2022"],
        ],
    );
    let store = MemoryStudentStore::new();

    let outcome = import_spreadsheet(&path, ImportMode::Strict, &store)
        .await
        .unwrap();
    assert_eq!(outcome.row_errors, vec!["Row 2: NIM harus berupa angka"]);
    assert!(outcome.inserted_rows.is_empty());
}

#[tokio::test]
async fn test_strict_import_without_errors_persists_everything() {
    let dir = tempdir().unwrap();
    let path = write_upload(
        &dir,
        "EXCEL-ok.xlsx",
        &[
            &["NIM", "NAMA", "ANGKATAN"],
            &["1", "Ana", "2021"],
            &["2", "Budi", "2022"],
        ],
    );
    let store = MemoryStudentStore::new();

    let outcome = import_spreadsheet(&path, ImportMode::Strict, &store)
        .await
        .unwrap();
    assert_eq!(outcome.inserted_count(), 2);
    assert!(outcome.row_errors.is_empty());
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_partial_rows_are_inserted_or_reported() {
    let dir = tempdir().unwrap();
    let rows: &[&[&str]] = &[
        &["Angkatan", "Nama", "NIM"],
        &["2021", "Ana", "1"],
        &["2021", "Budi", "B2"],
        &["2021", "", "3"],
        &["2022", "Dedi", "4"],
        &["2022", "Eka", "5"],
    ];
    let path = write_upload(&dir, "EXCEL-mix.xlsx", rows);
    let store = MemoryStudentStore::new();

    let outcome = import_spreadsheet(&path, ImportMode::Partial, &store)
        .await
        .unwrap();
    assert_eq!(
        outcome.inserted_count() + outcome.row_errors.len(),
        rows.len() - 1
    );
    assert_eq!(
        outcome.row_errors,
        vec![
            "Row 3: NIM harus berupa angka",
            "Row 4: nim, nama, angkatan wajib diisi",
        ]
    );
    let ids: Vec<_> = outcome
        .inserted_rows
        .iter()
        .map(|r| r.student_id.as_str())
        .collect();
    assert_eq!(ids, vec!["1", "4", "5"]);
}

#[tokio::test]
async fn test_header_only_sheet_is_empty() {
    let dir = tempdir().unwrap();
    let path = write_upload(&dir, "EXCEL-empty.xlsx", &[&["NIM", "Nama", "Angkatan"]]);
    let store = MemoryStudentStore::new();

    let result = import_spreadsheet(&path, ImportMode::Partial, &store).await;
    assert!(matches!(result, Err(ImportError::EmptySheet)));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_unreadable_upload_is_removed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("EXCEL-broken.xlsx");
    std::fs::write(&path, b"not a workbook").unwrap();
    let store = MemoryStudentStore::new();

    let result = import_spreadsheet(&path, ImportMode::Partial, &store).await;
    assert!(matches!(result, Err(ImportError::Sheet(_))));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_duplicate_nim_surfaces_persistence_error() {
    let dir = tempdir().unwrap();
    let path = write_upload(&dir, "EXCEL-dup.xlsx", SAMPLE);
    let store = MemoryStudentStore::new();
    store
        .bulk_insert(vec![student("123", "Ana", "2020")])
        .await
        .unwrap();

    let result = import_spreadsheet(&path, ImportMode::Partial, &store).await;
    match result {
        Err(ImportError::Persistence(PersistenceError::Duplicate { student_id })) => {
            assert_eq!(student_id, "123");
        }
        other => panic!("expected duplicate error, got {other:?}"),
    }
    assert_eq!(store.len().await, 1);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_blank_rows_are_skipped_but_keep_row_numbers() {
    let sheet = RawSheet::from_rows(
        "Mahasiswa",
        vec![
            vec![CellValue::from("NIM"), CellValue::from("Nama"), CellValue::from("Angkatan")],
            vec![CellValue::Null, CellValue::from("  "), CellValue::Null],
            vec![CellValue::from("7"), CellValue::from("Ana"), CellValue::Int(2021)],
            vec![CellValue::from("x"), CellValue::from("Budi"), CellValue::Int(2021)],
        ],
    );
    let store = MemoryStudentStore::new();

    let outcome = import_rows(&sheet, ImportMode::Partial, &store).await.unwrap();
    assert_eq!(outcome.inserted_rows, vec![student("7", "Ana", "2021")]);
    assert_eq!(outcome.row_errors, vec!["Row 4: NIM harus berupa angka"]);
}

#[tokio::test]
async fn test_only_blank_data_rows_is_empty() {
    let sheet = RawSheet::from_rows(
        "Mahasiswa",
        vec![vec!["NIM", "Nama", "Angkatan"], vec!["", " ", ""]],
    );
    let store = MemoryStudentStore::new();
    let result = import_rows(&sheet, ImportMode::Strict, &store).await;
    assert!(matches!(result, Err(ImportError::EmptySheet)));
}

#[tokio::test]
async fn test_outcome_json_shape() {
    let dir = tempdir().unwrap();
    let path = write_upload(&dir, "EXCEL-json.xlsx", SAMPLE);
    let store = MemoryStudentStore::new();
    let outcome = import_spreadsheet(Path::new(&path), ImportMode::Partial, &store)
        .await
        .unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["insertedCount"], 1);
    assert_eq!(json["insertedRows"][0]["studentId"], "123");
    assert_eq!(json["insertedRows"][0]["studentName"], "Ana");
    assert_eq!(json["errors"].as_array().unwrap().len(), 1);
    assert_eq!(json["mode"], "partial");
}

#[tokio::test(flavor = "current_thread")]
async fn test_concurrent_imports_on_single_thread_runtime() {
    let dir = tempdir().unwrap();
    let first = write_upload(&dir, "EXCEL-a.xlsx", SAMPLE);
    let second = write_upload(
        &dir,
        "EXCEL-b.xlsx",
        &[&["NIM", "Nama", "Angkatan"], &["456", "Cici", "2022"]],
    );
    let store = MemoryStudentStore::new();

    let (a, b) = tokio::join!(
        import_spreadsheet(&first, ImportMode::Partial, &store),
        import_spreadsheet(&second, ImportMode::Partial, &store),
    );

    assert_eq!(a.unwrap().inserted_count(), 1);
    assert_eq!(b.unwrap().inserted_count(), 1);
    assert_eq!(store.len().await, 2);
    assert!(!first.exists() && !second.exists());
}
