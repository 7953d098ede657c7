//! Remote search index: engine client and dual-index publisher.

mod error;
mod meilisearch;
mod publisher;
mod traits;
mod types;

pub use error::IndexError;
pub use meilisearch::MeilisearchClient;
pub use publisher::IndexPublisher;
pub use traits::SearchIndex;
pub use types::{BookDocument, SearchRequest, FILTERABLE_ATTRIBUTES, PRIMARY_KEY};
