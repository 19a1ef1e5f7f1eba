//! Persistence seam for imported students.

use crate::error::PersistenceError;
use async_trait::async_trait;
use kwitansi_core::ValidatedImportRow;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Where validated students are written.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert every row or none of them. Returns the rows as stored.
    async fn bulk_insert(
        &self,
        rows: Vec<ValidatedImportRow>,
    ) -> Result<Vec<ValidatedImportRow>, PersistenceError>;
}

/// Students kept in memory, unique by NIM.
#[derive(Debug, Clone, Default)]
pub struct MemoryStudentStore {
    students: Arc<RwLock<Vec<ValidatedImportRow>>>,
}

impl MemoryStudentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored student, in insertion order.
    pub async fn all(&self) -> Vec<ValidatedImportRow> {
        self.students.read().await.clone()
    }

    pub async fn find(&self, student_id: &str) -> Option<ValidatedImportRow> {
        self.students
            .read()
            .await
            .iter()
            .find(|s| s.student_id == student_id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.students.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.students.read().await.is_empty()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn bulk_insert(
        &self,
        rows: Vec<ValidatedImportRow>,
    ) -> Result<Vec<ValidatedImportRow>, PersistenceError> {
        let mut students = self.students.write().await;

        let mut seen: HashSet<&str> = students.iter().map(|s| s.student_id.as_str()).collect();
        for row in &rows {
            if !seen.insert(row.student_id.as_str()) {
                return Err(PersistenceError::Duplicate {
                    student_id: row.student_id.clone(),
                });
            }
        }

        students.extend(rows.iter().cloned());
        tracing::debug!(inserted = rows.len(), total = students.len(), "stored students");
        Ok(rows)
    }
}
