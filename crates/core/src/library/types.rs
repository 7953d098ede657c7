//! Types for the XML library.

/// One `<book>` entry from the library XML.
///
/// Records are ephemeral: the streaming reader hands one to the handler and
/// drops it immediately, so the full library is never materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    /// Stable unique identifier.
    pub id: String,
    /// Raw name slug the resolver infers metadata from.
    pub name: String,
    pub url: String,
    /// Semicolon-delimited tag list.
    pub tags: String,
    /// Base64-encoded icon bytes.
    pub favicon: String,
    pub favicon_mime_type: String,
    pub size: Option<u64>,
    pub media_count: Option<u64>,
    pub article_count: Option<u64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub publisher: Option<String>,
    pub flavour: Option<String>,
}

impl BookRecord {
    /// Tags published to the search index: everything not starting with `_`.
    pub fn public_tags(&self) -> Vec<String> {
        self.tags
            .split(';')
            .filter(|tag| !tag.is_empty() && !tag.starts_with('_'))
            .map(str::to_string)
            .collect()
    }
}

/// Result of a conditional library fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Whether the library content changed since the previous fingerprint.
    pub changed: bool,
    /// Validator to persist for the next run.
    pub etag: String,
}
