//! Error types for the search index.

use thiserror::Error;

/// Errors talking to the remote search engine.
///
/// Any engine error during prepare/publish/finish is fatal for the run:
/// production is only mutated by the atomic swap, so aborting mid-run leaves
/// at most an orphaned staging index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// HTTP transport failure.
    #[error("search engine request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the engine. The body is captured for logs.
    #[error("search engine returned HTTP {status}: {body}")]
    Engine { status: u16, body: String },

    /// Failed to serialize a payload for the engine.
    #[error("failed to serialize engine payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IndexError {
    /// HTTP status to surface to API callers, when the engine produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            IndexError::Engine { status, .. } => Some(*status),
            _ => None,
        }
    }
}
