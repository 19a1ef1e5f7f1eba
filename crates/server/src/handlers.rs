//! Route handlers.

use crate::error::ApiError;
use crate::query::ReceiptQuery;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use kwitansi_core::{ExportRequest, ImportMode, ImportOutcome, Nominal, OutputKind, ReceiptRecord, ValidatedImportRow};
use kwitansi_export::export;
use kwitansi_formatting::DateInput;
use kwitansi_import::{import_spreadsheet, PersistenceError, StudentStore};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Multipart field carrying the spreadsheet.
const UPLOAD_FIELD: &str = "file";
const UPLOAD_PREFIX: &str = "EXCEL";
const ALLOWED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

type AppResult<T> = Result<T, ApiError>;

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
}

/// Health check endpoint handler.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/kwitansi/export`: filtered receipts as a PDF or workbook attachment.
pub async fn export_receipts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReceiptQuery>,
) -> AppResult<Response> {
    let records = state.receipts.query(&query.filter()).await;
    let request = ExportRequest::new(records, OutputKind::from_selector(query.kind.as_deref()))
        .with_range(query.start(), query.end());
    let options = state.export_options.clone().for_today();

    let document = tokio::task::spawn_blocking(move || export(&request, &options))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    let headers = [
        (header::CONTENT_TYPE, document.content_type().to_string()),
        (header::CONTENT_DISPOSITION, document.content_disposition()),
    ];
    Ok((headers, document.bytes).into_response())
}

/// `GET /api/kwitansi`: one page of filtered receipts.
pub async fn list_receipts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReceiptQuery>,
) -> AppResult<Response> {
    let records = state.receipts.query(&query.filter()).await;
    let page = query.page();
    let rows = page.slice(&records);

    if rows.is_empty() {
        return Err(ApiError::NotFound("Data kwitansi tidak ditemukan".to_string()));
    }

    Ok(Json(json!({
        "status": true,
        "msg": "Data kwitansi berhasil diambil",
        "page": page.number,
        "totalPages": page.total_pages(records.len()),
        "totalData": records.len(),
        "data": rows,
    }))
    .into_response())
}

/// Body of `POST /api/kwitansi/cetak`. Every field is required.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceipt {
    pub nim: Option<String>,
    pub nama: Option<String>,
    pub angkatan: Option<String>,
    pub jenis_bayar: Option<String>,
    pub cara_bayar: Option<String>,
    pub tanggal_bayar: Option<String>,
    pub nominal: Option<Nominal>,
    pub keterangan_bayar: Option<String>,
    pub terbilang: Option<String>,
}

fn filled(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl CreateReceipt {
    /// The receipt, or `None` when any field is missing or blank.
    fn into_record(self) -> Option<ReceiptRecord> {
        let nominal = self.nominal.filter(|n| !n.to_string().trim().is_empty())?;
        Some(ReceiptRecord {
            payment_date: Some(filled(self.tanggal_bayar)?.to_date()?),
            student_id: filled(self.nim)?,
            student_name: filled(self.nama)?,
            cohort: filled(self.angkatan)?,
            payment_type: filled(self.jenis_bayar)?,
            payment_method: filled(self.cara_bayar)?,
            nominal_amount: nominal,
            note: filled(self.keterangan_bayar)?,
            amount_in_words: filled(self.terbilang)?,
        })
    }
}

/// `POST /api/kwitansi/cetak`: store a receipt.
pub async fn create_receipt(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateReceipt>,
) -> AppResult<Response> {
    let record = body
        .into_record()
        .ok_or_else(|| ApiError::BadRequest("Semua field wajib diisi".to_string()))?;

    state.receipts.insert(record.clone()).await;
    tracing::info!(nim = %record.student_id, "receipt created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": true,
            "msg": "Kwitansi berhasil dibuat",
            "data": record,
        })),
    )
        .into_response())
}

#[derive(Debug, Default, Deserialize)]
pub struct StudentQuery {
    pub nim: Option<String>,
}

/// `GET /api/mahasiswa`: every student, or the one matching `?nim=`.
pub async fn list_students(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StudentQuery>,
) -> AppResult<Response> {
    let nim = query.nim.filter(|n| !n.is_empty());
    let students = match &nim {
        Some(nim) => state.students.find(nim).await.into_iter().collect(),
        None => state.students.all().await,
    };

    if students.is_empty() {
        let msg = match &nim {
            Some(nim) => format!("Mahasiswa dengan NIM {nim} tidak ditemukan"),
            None => "Tidak ada data mahasiswa".to_string(),
        };
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({
                "status": false,
                "msg": msg,
                "data": Vec::<ValidatedImportRow>::new(),
            })),
        )
            .into_response());
    }

    let msg = if nim.is_some() {
        "Mahasiswa berhasil ditemukan"
    } else {
        "Semua data mahasiswa berhasil ditampilkan"
    };
    Ok(Json(json!({ "status": true, "msg": msg, "data": students })).into_response())
}

#[derive(Debug, Default, Deserialize)]
pub struct AddStudent {
    pub nim: Option<String>,
    pub nama: Option<String>,
    pub angkatan: Option<String>,
}

/// `POST /api/mahasiswa/add`: store a single student.
pub async fn add_student(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddStudent>,
) -> AppResult<Response> {
    let (Some(nim), Some(nama), Some(angkatan)) =
        (filled(body.nim), filled(body.nama), filled(body.angkatan))
    else {
        return Err(ApiError::BadRequest("All fields required".to_string()));
    };
    if !nim.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::BadRequest("NIM harus berupa angka".to_string()));
    }

    let student = ValidatedImportRow {
        student_id: nim,
        student_name: nama,
        cohort: angkatan,
    };
    let stored = state
        .students
        .bulk_insert(vec![student])
        .await
        .map_err(|e| match e {
            PersistenceError::Duplicate { .. } => ApiError::BadRequest(e.to_string()),
            PersistenceError::Backend(msg) => ApiError::Internal(msg),
        })?;

    Ok(Json(json!({
        "status": true,
        "msg": "Mahasiswa berhasil ditambahkan",
        "data": stored.first(),
    }))
    .into_response())
}

#[derive(Debug, Default, Deserialize)]
pub struct ImportQuery {
    pub mode: Option<String>,
}

/// Successful import body.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub status: bool,
    pub msg: String,
    #[serde(flatten)]
    pub outcome: ImportOutcome,
}

/// Lowercased extension of `file_name` when it is an accepted spreadsheet type.
fn allowed_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// `POST /api/mahasiswa/upload-excel?mode=strict|partial`
pub async fn upload_excel(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ImportQuery>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut saved = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let original = field.file_name().unwrap_or_default().to_string();
        let ext = allowed_extension(&original)
            .ok_or_else(|| ApiError::BadRequest("Your file extension is not allowed".to_string()))?;
        let bytes = field.bytes().await?;

        let path = state
            .upload_dir
            .join(format!("{UPLOAD_PREFIX}-{}.{ext}", Uuid::new_v4()));
        tokio::fs::write(&path, &bytes).await?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "upload stored");
        saved = Some(path);
        break;
    }

    let path = saved.ok_or_else(|| ApiError::BadRequest("File Excel diperlukan".to_string()))?;
    let mode = ImportMode::from_selector(params.mode.as_deref());
    let outcome = import_spreadsheet(&path, mode, &state.students).await?;

    if outcome.is_aborted() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "status": false,
                "msg": "Import dibatalkan karena ada error",
                "errors": outcome.row_errors,
            })),
        )
            .into_response());
    }

    Ok(Json(ImportResponse {
        status: true,
        msg: format!("{} mahasiswa berhasil ditambahkan", outcome.inserted_count()),
        outcome,
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extension() {
        assert_eq!(allowed_extension("data.xlsx").as_deref(), Some("xlsx"));
        assert_eq!(allowed_extension("DATA.XLS").as_deref(), Some("xls"));
        assert_eq!(allowed_extension("data.csv"), None);
        assert_eq!(allowed_extension("xlsx"), None);
        assert_eq!(allowed_extension(""), None);
    }

    #[test]
    fn test_create_receipt_requires_every_field() {
        let complete = CreateReceipt {
            nim: Some("2101001".into()),
            nama: Some("Ana".into()),
            angkatan: Some("2021".into()),
            jenis_bayar: Some("SPP".into()),
            cara_bayar: Some("Transfer".into()),
            tanggal_bayar: Some("2024-03-05".into()),
            nominal: Some(Nominal::from(1_500_000_i64)),
            keterangan_bayar: Some("Lunas".into()),
            terbilang: Some("satu juta lima ratus ribu rupiah".into()),
        };
        let record = complete.into_record().unwrap();
        assert_eq!(record.payment_date, chrono::NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(record.nominal_amount.amount(), Some(1_500_000.0));

        let missing = CreateReceipt {
            nim: Some("2101001".into()),
            nama: Some("  ".into()),
            ..Default::default()
        };
        assert!(missing.into_record().is_none());
    }
}
