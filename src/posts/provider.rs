//! Snapshot provider for the post collection
//!
//! Stands in for the persistence collaborator: the search component operates
//! on whatever full collection the provider hands it. Each fetch re-reads the
//! snapshot so every search ranks against the current state; nothing is
//! cached between calls.

use std::path::PathBuf;

use tracing::debug;

use crate::error::AppError;
use crate::posts::records::Post;

/// Supplies the full current post collection from a JSON snapshot file.
pub struct SnapshotProvider {
    path: PathBuf,
}

impl SnapshotProvider {
    /// Create a provider over a snapshot file (a JSON array of posts)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Fetch the complete post collection.
    ///
    /// Undecodable snapshots and records violating the creation-time rules
    /// surface as `MalformedInput` rather than being skipped, so upstream
    /// data-quality problems are visible instead of masked by partial
    /// results.
    pub async fn fetch_all(&self) -> Result<Vec<Post>, AppError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            AppError::Internal(format!(
                "failed to read snapshot {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let posts: Vec<Post> = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::MalformedInput(format!("undecodable post snapshot: {}", e))
        })?;

        for post in &posts {
            post.validate()?;
        }

        debug!("Loaded {} posts from {}", posts.len(), self.path.display());
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn snapshot_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_fetch_all_reads_snapshot() {
        let file = snapshot_file(
            r#"[
                { "_id": "1", "title": "Chill Beats", "tags": ["lofi"] },
                { "_id": "2", "title": "Rock Anthem", "tags": ["rock", "guitar"] }
            ]"#,
        );

        let provider = SnapshotProvider::new(file.path());
        let posts = provider.fetch_all().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "Chill Beats");
        assert_eq!(posts[1].tags, vec!["rock", "guitar"]);
    }

    #[tokio::test]
    async fn test_fetch_all_reports_undecodable_snapshot() {
        let file = snapshot_file("{ not json");

        let provider = SnapshotProvider::new(file.path());
        let err = provider.fetch_all().await.unwrap_err();
        assert!(matches!(err, AppError::MalformedInput(_)));
    }

    #[tokio::test]
    async fn test_fetch_all_reports_invalid_record() {
        // Title below the minimum length must fail loudly, not be skipped
        let file = snapshot_file(r#"[ { "_id": "1", "title": "x" } ]"#);

        let provider = SnapshotProvider::new(file.path());
        let err = provider.fetch_all().await.unwrap_err();
        assert!(matches!(err, AppError::MalformedInput(_)));
    }

    #[tokio::test]
    async fn test_fetch_all_missing_file_is_internal() {
        let provider = SnapshotProvider::new("/nonexistent/posts.json");
        let err = provider.fetch_all().await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_fetch_all_empty_collection() {
        let file = snapshot_file("[]");

        let provider = SnapshotProvider::new(file.path());
        let posts = provider.fetch_all().await.unwrap();
        assert!(posts.is_empty());
    }
}
