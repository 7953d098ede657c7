//! Wire types for the search index.

use serde::{Deserialize, Serialize};

/// Primary key of the book index.
pub const PRIMARY_KEY: &str = "bookId";

/// Attributes the index allows filtering on. The same list is requested as
/// facets on every search.
pub const FILTERABLE_ATTRIBUTES: &[&str] = &[
    "project",
    "language",
    "selection",
    "flavour",
    "category",
    "size",
    "mediaCount",
    "articleCount",
    "creator",
    "publisher",
    "tags",
];

/// One book as published to the search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDocument {
    pub book_id: String,
    pub project: String,
    pub language: String,
    pub selection: String,
    pub flavour: Option<String>,
    /// `None` when the book carries no `_category:` tag.
    pub category: Option<String>,
    pub url: String,
    pub size: Option<u64>,
    pub media_count: Option<u64>,
    pub article_count: Option<u64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub publisher: Option<String>,
    /// Public tags only, the `_`-prefixed ones are internal.
    pub tags: Vec<String>,
    /// Content hash of the book's icon in the icon store.
    pub favicon: String,
}

/// A search request forwarded to the engine.
///
/// Mirrors the engine's own search parameters; everything is optional and
/// omitted from the payload when unset. The facet list is appended by the
/// API layer, not chosen by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits_per_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_retrieve: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_crop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_highlight: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_pre_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_post_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_matches_position: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_ranking_score: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_search_on: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<String>>,
}

impl SearchRequest {
    /// Request the fixed facet distribution alongside the hits.
    pub fn with_default_facets(mut self) -> Self {
        self.facets = Some(
            FILTERABLE_ATTRIBUTES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        self
    }
}
