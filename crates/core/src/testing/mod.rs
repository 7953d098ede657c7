//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides mock implementations of the external service traits
//! (search engine, library source), allowing full update-run testing without
//! real infrastructure.

mod mock_index;
mod mock_library;

pub use mock_index::{MockSearchIndex, RecordedSearch};
pub use mock_library::MockLibrarySource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::index::BookDocument;

    /// A valid base64-encoded 1x1 transparent PNG.
    pub const PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

    /// Create a test book document with reasonable defaults.
    pub fn book_document(id: &str) -> BookDocument {
        BookDocument {
            book_id: id.to_string(),
            project: "wikipedia".to_string(),
            language: "fr".to_string(),
            selection: "all".to_string(),
            flavour: None,
            category: Some("wikipedia".to_string()),
            url: format!("https://mirror/{id}.zim"),
            size: Some(1024),
            media_count: None,
            article_count: None,
            title: None,
            description: None,
            creator: None,
            publisher: None,
            tags: vec!["wikipedia".to_string()],
            favicon: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
        }
    }

    /// Render one `<book>` element with a valid PNG favicon.
    pub fn book_xml(id: &str, name: &str, tags: &str) -> String {
        format!(
            r#"<book id="{id}" name="{name}" url="https://mirror/{name}.zim" tags="{tags}" favicon="{PNG_B64}" faviconMimeType="image/png"/>"#
        )
    }

    /// Wrap book elements into a complete library document.
    pub fn library_xml(books: &[String]) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<library version=\"20110515\">\n{}\n</library>\n",
            books.join("\n")
        )
    }
}
