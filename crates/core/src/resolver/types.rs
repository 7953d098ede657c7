//! Types for the book name resolver.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Metadata derived from a book's name and category tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBook {
    /// Category from the `_category:` tag, `None` when uncategorized.
    pub category: Option<String>,
    pub project: String,
    /// ISO-like language code, at most 3 characters.
    pub language: String,
    /// Sub-topic portion of the name, `"all"` when absent.
    pub selection: String,
    /// Optional edition variant, copied verbatim from the catalog.
    pub flavour: Option<String>,
}

/// Project/language/selection triple extracted from a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub project: String,
    pub language: String,
    pub selection: String,
}

/// Outcome of resolving one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedBook),
    Skipped(SkipReason),
}

/// Why a book was skipped instead of resolved.
///
/// Skips are record-level: the pipeline reports them and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Name is listed in the ignore settings.
    Ignored,
    /// More than one `_category:` tag on the record.
    AmbiguousCategory,
    /// First name segment does not match the category's expected project.
    UnexpectedProject,
    /// Language segment longer than 3 characters.
    LanguageTooLong,
    /// Name does not split into the expected number of segments.
    UnexpectedSegmentCount,
    /// Old-style 2-segment phet name, pending upstream cleanup.
    LegacyName,
}

impl SkipReason {
    /// Legacy skips are expected data and logged quieter than malformed names.
    pub fn is_legacy(&self) -> bool {
        matches!(self, SkipReason::Ignored | SkipReason::LegacyName)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::Ignored => "ignored",
            SkipReason::AmbiguousCategory => "ambiguous-category",
            SkipReason::UnexpectedProject => "unexpected-project",
            SkipReason::LanguageTooLong => "language-too-long",
            SkipReason::UnexpectedSegmentCount => "unexpected-segment-count",
            SkipReason::LegacyName => "legacy-name",
        };
        f.write_str(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::Ignored.to_string(), "ignored");
        assert_eq!(
            SkipReason::AmbiguousCategory.to_string(),
            "ambiguous-category"
        );
        assert_eq!(
            SkipReason::UnexpectedSegmentCount.to_string(),
            "unexpected-segment-count"
        );
    }

    #[test]
    fn test_skip_reason_legacy() {
        assert!(SkipReason::LegacyName.is_legacy());
        assert!(SkipReason::Ignored.is_legacy());
        assert!(!SkipReason::AmbiguousCategory.is_legacy());
        assert!(!SkipReason::LanguageTooLong.is_legacy());
    }
}
