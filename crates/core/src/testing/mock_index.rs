//! Mock search engine for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::index::{BookDocument, IndexError, SearchIndex, SearchRequest};

#[derive(Debug, Clone, Default)]
struct IndexState {
    primary_key: String,
    documents: Vec<BookDocument>,
    filterable: Option<Vec<String>>,
}

/// A recorded search for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    /// The index that was searched.
    pub index: String,
    /// The forwarded request.
    pub request: SearchRequest,
}

/// Mock implementation of the SearchIndex trait.
///
/// Provides controllable behavior for testing:
/// - Keeps per-index documents and settings in memory
/// - Counts swaps and records search requests for assertions
/// - Simulates engine failures
pub struct MockSearchIndex {
    /// Per-index state, keyed by index name.
    indexes: Arc<RwLock<HashMap<String, IndexState>>>,
    /// Number of swap operations performed.
    swaps: Arc<RwLock<usize>>,
    /// Recorded search requests.
    searches: Arc<RwLock<Vec<RecordedSearch>>>,
    /// Canned response returned by search, when set.
    search_response: Arc<RwLock<Option<serde_json::Value>>>,
    /// If set, the next trait call will fail with this error.
    next_error: Arc<RwLock<Option<IndexError>>>,
}

impl std::fmt::Debug for MockSearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSearchIndex")
            .field("indexes", &"<indexes>")
            .field("swaps", &"<swaps>")
            .field("searches", &"<searches>")
            .finish()
    }
}

impl Default for MockSearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSearchIndex {
    /// Create a new mock engine with no indexes.
    pub fn new() -> Self {
        Self {
            indexes: Arc::new(RwLock::new(HashMap::new())),
            swaps: Arc::new(RwLock::new(0)),
            searches: Arc::new(RwLock::new(Vec::new())),
            search_response: Arc::new(RwLock::new(None)),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Documents currently held by an index (empty if the index is absent).
    pub async fn documents(&self, index: &str) -> Vec<BookDocument> {
        self.indexes
            .read()
            .await
            .get(index)
            .map(|state| state.documents.clone())
            .unwrap_or_default()
    }

    /// The index's filterable-attributes configuration, if set.
    pub async fn filterable_attributes(&self, index: &str) -> Option<Vec<String>> {
        self.indexes
            .read()
            .await
            .get(index)
            .and_then(|state| state.filterable.clone())
    }

    /// The primary key an index was created with.
    pub async fn primary_key(&self, index: &str) -> Option<String> {
        self.indexes
            .read()
            .await
            .get(index)
            .map(|state| state.primary_key.clone())
    }

    /// Number of swap operations performed.
    pub async fn swap_count(&self) -> usize {
        *self.swaps.read().await
    }

    /// Get recorded search requests.
    pub async fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.read().await.clone()
    }

    /// Set the response returned by subsequent searches.
    pub async fn set_search_response(&self, response: serde_json::Value) {
        *self.search_response.write().await = Some(response);
    }

    /// Configure the next trait call to fail with the given error.
    pub async fn set_next_error(&self, error: IndexError) {
        *self.next_error.write().await = Some(error);
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<IndexError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl SearchIndex for MockSearchIndex {
    async fn index_exists(&self, index: &str) -> Result<bool, IndexError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        Ok(self.indexes.read().await.contains_key(index))
    }

    async fn create_index(&self, index: &str, primary_key: &str) -> Result<(), IndexError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.indexes.write().await.insert(
            index.to_string(),
            IndexState {
                primary_key: primary_key.to_string(),
                ..Default::default()
            },
        );
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<(), IndexError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.indexes.write().await.remove(index);
        Ok(())
    }

    async fn set_filterable_attributes(
        &self,
        index: &str,
        attributes: &[&str],
    ) -> Result<(), IndexError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        let mut indexes = self.indexes.write().await;
        let state = indexes.entry(index.to_string()).or_default();
        state.filterable = Some(attributes.iter().map(|s| s.to_string()).collect());
        Ok(())
    }

    async fn add_document(&self, index: &str, document: &BookDocument) -> Result<(), IndexError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        let mut indexes = self.indexes.write().await;
        let state = indexes.entry(index.to_string()).or_default();
        // Upsert on the primary key
        if let Some(existing) = state
            .documents
            .iter_mut()
            .find(|d| d.book_id == document.book_id)
        {
            *existing = document.clone();
        } else {
            state.documents.push(document.clone());
        }
        Ok(())
    }

    async fn swap_indexes(&self, first: &str, second: &str) -> Result<(), IndexError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        let mut indexes = self.indexes.write().await;
        let first_state = indexes.remove(first).unwrap_or_default();
        let second_state = indexes.remove(second).unwrap_or_default();
        indexes.insert(first.to_string(), second_state);
        indexes.insert(second.to_string(), first_state);
        *self.swaps.write().await += 1;
        Ok(())
    }

    async fn search(
        &self,
        index: &str,
        request: &SearchRequest,
    ) -> Result<serde_json::Value, IndexError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.searches.write().await.push(RecordedSearch {
            index: index.to_string(),
            request: request.clone(),
        });
        if let Some(response) = self.search_response.read().await.clone() {
            return Ok(response);
        }
        let hits = self.documents(index).await;
        let total = hits.len();
        Ok(serde_json::json!({
            "hits": hits,
            "estimatedTotalHits": total,
            "query": request.q.clone().unwrap_or_default(),
        }))
    }
}
