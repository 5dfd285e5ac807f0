//! Staged upload files.
//!
//! One upload → one temp file under the scratch directory, named with a
//! microsecond timestamp, a UUID fragment, and the sanitized original
//! filename. The file is removed when the guard drops, on every exit path.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use firlens_core::FirlensError;

/// Replace anything outside alphanumerics and `.-_` with `_`.
///
/// Matches Unicode alphanumerics so Urdu filenames survive, while path
/// separators and traversal sequences do not.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// A staged upload on scratch storage, deleted on drop.
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    /// Write `content` under `dir` (created if absent) and verify it landed.
    pub async fn write(
        dir: &Path,
        original_name: &str,
        content: &[u8],
    ) -> Result<Self, FirlensError> {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            FirlensError::Internal(format!(
                "failed to create upload directory {}: {e}",
                dir.display()
            ))
        })?;

        let stamp = Utc::now().format("%Y%m%d_%H%M%S_%6f");
        let token = Uuid::new_v4().simple().to_string();
        let safe_name = sanitize_filename(original_name);
        let path = dir.join(format!("{stamp}_{}_{safe_name}", &token[..8]));

        // Construct the guard before writing so a partial write is still
        // cleaned up when this function errors out.
        let staged = Self { path };
        tokio::fs::write(&staged.path, content)
            .await
            .map_err(|e| FirlensError::Internal(format!("failed to save uploaded file: {e}")))?;

        match tokio::fs::try_exists(&staged.path).await {
            Ok(true) => Ok(staged),
            _ => Err(FirlensError::Internal(
                "Failed to save uploaded file locally".to_string(),
            )),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path handed to the extraction client.
    pub async fn absolute_path(&self) -> Result<PathBuf, FirlensError> {
        tokio::fs::canonicalize(&self.path).await.map_err(|e| {
            FirlensError::Internal(format!("failed to resolve staged upload path: {e}"))
        })
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to remove staged upload"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("firlens-temp-{tag}-{}", Uuid::new_v4().simple()))
    }

    #[test]
    fn sanitizes_traversal_sequences() {
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("fir report.png"), "fir_report.png");
        assert_eq!(sanitize_filename("رپورٹ-01.jpg"), "رپورٹ-01.jpg");
    }

    #[tokio::test]
    async fn stays_inside_scratch_dir() {
        let dir = scratch_dir("inside");
        let tmp = TempUpload::write(&dir, "../../etc/passwd", b"data")
            .await
            .unwrap();
        assert_eq!(tmp.path().parent(), Some(dir.as_path()));

        let abs = tmp.absolute_path().await.unwrap();
        let canonical_dir = tokio::fs::canonicalize(&dir).await.unwrap();
        assert!(abs.starts_with(&canonical_dir));

        drop(tmp);
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn drop_removes_the_file() {
        let dir = scratch_dir("drop");
        let tmp = TempUpload::write(&dir, "report.png", b"data").await.unwrap();
        let path = tmp.path().to_path_buf();
        assert!(path.exists());

        drop(tmp);
        assert!(!path.exists());
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_same_name_uploads_never_collide() {
        let dir = scratch_dir("collide");
        let a = TempUpload::write(&dir, "fir.png", b"a").await.unwrap();
        let b = TempUpload::write(&dir, "fir.png", b"b").await.unwrap();
        assert_ne!(a.path(), b.path());

        drop((a, b));
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
