//! Seam trait for the remote library source.

use std::path::Path;

use async_trait::async_trait;

use super::error::LibraryError;
use super::types::FetchOutcome;

/// A remote library that can be fetched conditionally.
#[async_trait]
pub trait LibrarySource: Send + Sync {
    /// Fetch the library XML into `dest` unless its fingerprint still equals
    /// `previous_etag`, in which case nothing is downloaded.
    async fn fetch(
        &self,
        dest: &Path,
        previous_etag: Option<&str>,
    ) -> Result<FetchOutcome, LibraryError>;
}
