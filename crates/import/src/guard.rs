use std::path::{Path, PathBuf};

/// Deletes an uploaded file when dropped, whatever path the import took.
#[derive(Debug)]
pub struct UploadGuard {
    path: PathBuf,
}

impl UploadGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove upload"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_removed_on_drop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("EXCEL-1.xlsx");
        std::fs::write(&path, b"data").unwrap();

        {
            let guard = UploadGuard::new(&path);
            assert_eq!(guard.path(), path.as_path());
            assert!(path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file_is_ignored() {
        let dir = tempdir().unwrap();
        drop(UploadGuard::new(dir.path().join("gone.xlsx")));
    }
}
