use crate::config::ServerConfig;
use crate::query::ReceiptFilter;
use kwitansi_core::ReceiptRecord;
use kwitansi_export::ExportOptions;
use kwitansi_import::MemoryStudentStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Receipts kept in memory.
#[derive(Debug, Clone, Default)]
pub struct ReceiptStore {
    records: Arc<RwLock<Vec<ReceiptRecord>>>,
}

impl ReceiptStore {
    pub async fn insert(&self, record: ReceiptRecord) {
        self.records.write().await.push(record);
    }

    pub async fn query(&self, filter: &ReceiptFilter) -> Vec<ReceiptRecord> {
        filter.apply(&self.records.read().await)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub receipts: ReceiptStore,
    pub students: MemoryStudentStore,
    pub upload_dir: PathBuf,
    pub export_options: ExportOptions,
    pub max_upload_bytes: usize,
}

impl AppState {
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            receipts: ReceiptStore::default(),
            students: MemoryStudentStore::new(),
            upload_dir: config.upload_dir.clone(),
            export_options: ExportOptions::default().with_logo(&config.logo),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}
