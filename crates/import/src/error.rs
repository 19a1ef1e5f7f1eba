use kwitansi_sheet::SheetError;
use thiserror::Error;

/// Failure reported by a [`crate::StudentStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("NIM {student_id} sudah terdaftar")]
    Duplicate { student_id: String },

    #[error("Storage error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File Excel kosong")]
    EmptySheet,

    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Sheet loading task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ImportError>;
