//! Seam trait for the remote search engine.

use async_trait::async_trait;

use super::error::IndexError;
use super::types::{BookDocument, SearchRequest};

/// The remote search engine, treated as an opaque service.
///
/// Only status-code semantics are relied on: 2xx success, 404 not-found,
/// anything else is an [`IndexError::Engine`].
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Whether an index with this name exists.
    async fn index_exists(&self, index: &str) -> Result<bool, IndexError>;

    /// Create an index with the given primary key.
    async fn create_index(&self, index: &str, primary_key: &str) -> Result<(), IndexError>;

    /// Delete an index by name.
    async fn delete_index(&self, index: &str) -> Result<(), IndexError>;

    /// Replace the index's filterable-attributes configuration.
    async fn set_filterable_attributes(
        &self,
        index: &str,
        attributes: &[&str],
    ) -> Result<(), IndexError>;

    /// Upsert one document keyed by its primary key.
    async fn add_document(&self, index: &str, document: &BookDocument) -> Result<(), IndexError>;

    /// Atomically exchange two index names.
    async fn swap_indexes(&self, first: &str, second: &str) -> Result<(), IndexError>;

    /// Full-text search; the engine's response is passed through verbatim.
    async fn search(
        &self,
        index: &str,
        request: &SearchRequest,
    ) -> Result<serde_json::Value, IndexError>;
}
