//! Error responses for the HTTP API.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kwitansi_export::ExportError;
use kwitansi_import::ImportError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("upload rejected: {0}")]
    Upload(#[from] MultipartError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("{0}")]
    Internal(String),
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorBody {
    status: bool,
    msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg, error) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            ApiError::Upload(err) => (err.status(), err.body_text(), None),
            ApiError::Export(ExportError::EmptyDataset) => (
                StatusCode::NOT_FOUND,
                "Data kwitansi tidak ditemukan".to_string(),
                None,
            ),
            ApiError::Export(err) => {
                tracing::error!(error = %err, "export failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            ApiError::Import(ImportError::EmptySheet) => {
                (StatusCode::BAD_REQUEST, "File Excel kosong".to_string(), None)
            }
            ApiError::Import(err) => {
                tracing::error!(error = %err, "import failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Gagal import Excel".to_string(),
                    Some(err.to_string()),
                )
            }
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            status: false,
            msg,
            error,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Export(ExportError::EmptyDataset), StatusCode::NOT_FOUND),
            (ApiError::Import(ImportError::EmptySheet), StatusCode::BAD_REQUEST),
            (ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
