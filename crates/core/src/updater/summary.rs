//! Per-category JSON summary of the published library.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::json;

use crate::resolver::ResolvedBook;

/// JSON object key for books carrying no category tag.
const UNCATEGORIZED_KEY: &str = "--";

#[derive(Debug, Clone, Serialize)]
struct SummaryEntry {
    selection: String,
    language: String,
    project: String,
    flavour: Option<String>,
}

/// Accumulates resolved books per category and writes a nested JSON file
/// with item counts at every level.
#[derive(Debug, Default)]
pub struct LibrarySummary {
    categories: BTreeMap<String, BTreeMap<String, SummaryEntry>>,
}

impl LibrarySummary {
    pub fn add(&mut self, book_id: &str, book: &ResolvedBook) {
        let category = book
            .category
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED_KEY.to_string());
        self.categories.entry(category).or_default().insert(
            book_id.to_string(),
            SummaryEntry {
                selection: book.selection.clone(),
                language: book.language.clone(),
                project: book.project.clone(),
                flavour: book.flavour.clone(),
            },
        );
    }

    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        let categories: serde_json::Map<String, serde_json::Value> = self
            .categories
            .iter()
            .map(|(category, books)| {
                (
                    category.clone(),
                    json!({ "count": books.len(), "items": books }),
                )
            })
            .collect();
        let root = json!({ "count": self.categories.len(), "items": categories });
        let text = serde_json::to_string_pretty(&root).map_err(std::io::Error::other)?;
        std::fs::write(path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn resolved(category: Option<&str>, project: &str) -> ResolvedBook {
        ResolvedBook {
            category: category.map(str::to_string),
            project: project.to_string(),
            language: "en".to_string(),
            selection: "all".to_string(),
            flavour: None,
        }
    }

    #[test]
    fn test_summary_counts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");

        let mut summary = LibrarySummary::default();
        summary.add("id-1", &resolved(Some("wikipedia"), "wikipedia"));
        summary.add("id-2", &resolved(Some("wikipedia"), "wikipedia"));
        summary.add("id-3", &resolved(None, "avanti"));
        summary.write(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["items"]["wikipedia"]["count"], 2);
        assert_eq!(value["items"]["--"]["count"], 1);
        assert_eq!(
            value["items"]["--"]["items"]["id-3"]["project"],
            "avanti"
        );
    }

    #[test]
    fn test_summary_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        LibrarySummary::default().write(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["count"], 0);
    }
}
