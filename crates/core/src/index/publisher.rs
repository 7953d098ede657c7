//! Dual-index publisher: build in staging, swap into production atomically.

use std::sync::Arc;

use tracing::{debug, info};

use super::error::IndexError;
use super::traits::SearchIndex;
use super::types::{BookDocument, FILTERABLE_ATTRIBUTES, PRIMARY_KEY};

/// Publishes book documents to a write target that readers never see until
/// it is swapped into production.
///
/// Exactly one of {production, staging} is the prepare target for a run:
/// production on the first-ever run (nothing to protect yet), staging on
/// every subsequent one. Queries therefore never observe a half-populated
/// index, and never a window with no index at all.
pub struct IndexPublisher {
    engine: Arc<dyn SearchIndex>,
    prod_index: String,
    staging_index: String,
}

impl IndexPublisher {
    pub fn new(
        engine: Arc<dyn SearchIndex>,
        prod_index: impl Into<String>,
        staging_index: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            prod_index: prod_index.into(),
            staging_index: staging_index.into(),
        }
    }

    /// Select, create and configure the write target; returns its name.
    pub async fn prepare(&self) -> Result<String, IndexError> {
        // A staging index left behind by an interrupted run is stale
        if self.engine.index_exists(&self.staging_index).await? {
            debug!(index = %self.staging_index, "deleting leftover staging index");
            self.engine.delete_index(&self.staging_index).await?;
        }

        let target = if self.engine.index_exists(&self.prod_index).await? {
            self.staging_index.clone()
        } else {
            // Bootstrap: no production index yet, populate it directly
            self.prod_index.clone()
        };

        self.engine.create_index(&target, PRIMARY_KEY).await?;
        self.engine
            .set_filterable_attributes(&target, FILTERABLE_ATTRIBUTES)
            .await?;
        debug!(index = %target, "prepared write target");
        Ok(target)
    }

    /// Upsert one document into the write target.
    pub async fn publish_one(
        &self,
        target: &str,
        document: &BookDocument,
    ) -> Result<(), IndexError> {
        self.engine.add_document(target, document).await
    }

    /// Make the write target live. A no-op when it already is production;
    /// otherwise one atomic swap, then the old production (now sitting under
    /// the staging name) is deleted.
    pub async fn finish(&self, target: &str) -> Result<(), IndexError> {
        if target == self.prod_index {
            return Ok(());
        }
        self.engine
            .swap_indexes(&self.prod_index, &self.staging_index)
            .await?;
        self.engine.delete_index(&self.staging_index).await?;
        info!(index = %self.prod_index, "swapped staging index into production");
        Ok(())
    }

    pub fn prod_index(&self) -> &str {
        &self.prod_index
    }
}
