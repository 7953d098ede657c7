//! Mock library source for testing.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::library::{FetchOutcome, LibraryError, LibrarySource};

/// Mock implementation of the LibrarySource trait.
///
/// Serves a configurable XML body under a configurable etag and honors the
/// conditional-fetch contract: when the caller's previous etag matches the
/// current one, nothing is written and `changed` is false.
pub struct MockLibrarySource {
    body: Arc<RwLock<String>>,
    etag: Arc<RwLock<String>>,
    fetches: Arc<RwLock<usize>>,
    downloads: Arc<RwLock<usize>>,
    next_error: Arc<RwLock<Option<LibraryError>>>,
}

impl std::fmt::Debug for MockLibrarySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLibrarySource")
            .field("body", &"<body>")
            .field("etag", &"<etag>")
            .finish()
    }
}

impl MockLibrarySource {
    /// Create a mock serving the given XML body under the given etag.
    pub fn new(body: impl Into<String>, etag: impl Into<String>) -> Self {
        Self {
            body: Arc::new(RwLock::new(body.into())),
            etag: Arc::new(RwLock::new(etag.into())),
            fetches: Arc::new(RwLock::new(0)),
            downloads: Arc::new(RwLock::new(0)),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Replace the served body and etag, simulating an upstream change.
    pub async fn set_library(&self, body: impl Into<String>, etag: impl Into<String>) {
        *self.body.write().await = body.into();
        *self.etag.write().await = etag.into();
    }

    /// How many times fetch was called.
    pub async fn fetch_count(&self) -> usize {
        *self.fetches.read().await
    }

    /// How many fetches actually downloaded the body.
    pub async fn download_count(&self) -> usize {
        *self.downloads.read().await
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: LibraryError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl LibrarySource for MockLibrarySource {
    async fn fetch(
        &self,
        dest: &Path,
        previous_etag: Option<&str>,
    ) -> Result<FetchOutcome, LibraryError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        *self.fetches.write().await += 1;
        let etag = self.etag.read().await.clone();

        if previous_etag == Some(etag.as_str()) {
            return Ok(FetchOutcome {
                changed: false,
                etag,
            });
        }

        tokio::fs::write(dest, self.body.read().await.as_bytes()).await?;
        *self.downloads.write().await += 1;
        Ok(FetchOutcome {
            changed: true,
            etag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fetch_writes_body() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("library.xml");
        let source = MockLibrarySource::new("<library/>", "v1");

        let outcome = source.fetch(&dest, None).await.unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.etag, "v1");
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "<library/>");
        assert_eq!(source.download_count().await, 1);
    }

    #[tokio::test]
    async fn test_fetch_skips_on_matching_etag() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("library.xml");
        let source = MockLibrarySource::new("<library/>", "v1");

        source.fetch(&dest, None).await.unwrap();
        let outcome = source.fetch(&dest, Some("v1")).await.unwrap();
        assert!(!outcome.changed);
        assert_eq!(source.fetch_count().await, 2);
        assert_eq!(source.download_count().await, 1);
    }

    #[tokio::test]
    async fn test_fetch_downloads_again_after_change() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("library.xml");
        let source = MockLibrarySource::new("<library/>", "v1");

        source.fetch(&dest, None).await.unwrap();
        source.set_library("<library></library>", "v2").await;

        let outcome = source.fetch(&dest, Some("v1")).await.unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.etag, "v2");
    }

    #[tokio::test]
    async fn test_error_injection() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("library.xml");
        let source = MockLibrarySource::new("<library/>", "v1");
        source.set_next_error(LibraryError::MissingEtag).await;

        assert!(source.fetch(&dest, None).await.is_err());
        assert!(source.fetch(&dest, None).await.is_ok());
    }
}
