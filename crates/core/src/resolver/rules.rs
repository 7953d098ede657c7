//! Per-category name parsing rules.
//!
//! The category string selects one rule; the rule turns a name slug into a
//! project/language/selection triple or a skip reason.

use super::types::{NameParts, SkipReason};

/// Maximum length of a language code segment.
const MAX_LANGUAGE_LEN: usize = 3;

/// Categories whose names follow the plain `project_lang[_selection]` scheme.
const STANDARD_CATEGORIES: &[&str] = &[
    "other",
    "stack_exchange",
    "gutenberg",
    "ted",
    "wikihow",
    "wikibooks",
    "wikinews",
    "wikipedia",
    "wikiquote",
    "wikisource",
    "wikiversity",
    "wikivoyage",
    "wiktionary",
];

/// Expected first segment of phet book names.
const PHET_PROJECT: &str = "phets";

/// Placeholder for categories with no name convention.
const NOT_APPLICABLE: &str = "na";

/// How to parse a name, selected once per record from its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRule {
    Phet,
    Standard,
    Uncategorized,
    NotApplicable,
}

impl CategoryRule {
    /// Select the rule for a category (`None` means no `_category:` tag).
    pub fn for_category(category: Option<&str>) -> Self {
        match category {
            None => CategoryRule::Uncategorized,
            Some("phet") => CategoryRule::Phet,
            Some(c) if STANDARD_CATEGORIES.contains(&c) => CategoryRule::Standard,
            Some(_) => CategoryRule::NotApplicable,
        }
    }

    /// Extract project/language/selection from a (possibly overridden) name.
    pub fn apply(&self, name: &str) -> Result<NameParts, SkipReason> {
        match self {
            CategoryRule::Phet => parse_phet(name),
            CategoryRule::Standard => parse_standard(name),
            CategoryRule::Uncategorized => parse_uncategorized(name),
            CategoryRule::NotApplicable => Ok(NameParts {
                project: NOT_APPLICABLE.to_string(),
                language: NOT_APPLICABLE.to_string(),
                selection: NOT_APPLICABLE.to_string(),
            }),
        }
    }
}

fn parse_phet(name: &str) -> Result<NameParts, SkipReason> {
    let parts: Vec<&str> = name.split('_').collect();
    if parts[0] != PHET_PROJECT {
        return Err(SkipReason::UnexpectedProject);
    }
    match parts.len() {
        // Old naming scheme still present upstream, dropped without a warning
        2 => Err(SkipReason::LegacyName),
        3 => Ok(NameParts {
            project: parts[0].to_string(),
            language: parts[1].to_string(),
            selection: parts[2].to_string(),
        }),
        _ => Err(SkipReason::UnexpectedSegmentCount),
    }
}

fn parse_standard(name: &str) -> Result<NameParts, SkipReason> {
    let parts: Vec<&str> = name.split('_').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(SkipReason::UnexpectedSegmentCount);
    }
    let language = parts[1];
    if language.len() > MAX_LANGUAGE_LEN {
        return Err(SkipReason::LanguageTooLong);
    }
    Ok(NameParts {
        project: parts[0].to_string(),
        language: language.to_string(),
        selection: parts.get(2).unwrap_or(&"all").to_string(),
    })
}

/// Uncategorized books: a few known publishers with ad-hoc slugs take
/// priority, everything else falls back to the standard scheme.
fn parse_uncategorized(name: &str) -> Result<NameParts, SkipReason> {
    if let Some(rest) = name.strip_prefix("avanti-") {
        return Ok(NameParts {
            project: "avanti".to_string(),
            language: "hi".to_string(),
            selection: rest.to_string(),
        });
    }
    if let Some(rest) = name.strip_prefix("maitre_lucas_") {
        return strip_lang_suffix(rest).map(|selection| NameParts {
            project: "maitre-lucas".to_string(),
            language: "fr".to_string(),
            selection,
        });
    }
    if let Some(rest) = name.strip_prefix("canadian_prepper_") {
        return strip_lang_suffix(rest).map(|selection| NameParts {
            project: "canadian-prepper".to_string(),
            language: "en".to_string(),
            selection,
        });
    }
    parse_standard(name)
}

/// These slugs carry a trailing `_xx` language marker; drop the last 3
/// characters. Names come straight from the upstream catalog, so the cut must
/// land on a char boundary rather than a byte offset.
fn strip_lang_suffix(rest: &str) -> Result<String, SkipReason> {
    match rest.char_indices().rev().nth(2) {
        Some((cut, _)) if cut > 0 => Ok(rest[..cut].to_string()),
        _ => Err(SkipReason::UnexpectedSegmentCount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_selection() {
        assert_eq!(CategoryRule::for_category(None), CategoryRule::Uncategorized);
        assert_eq!(CategoryRule::for_category(Some("phet")), CategoryRule::Phet);
        assert_eq!(
            CategoryRule::for_category(Some("wikipedia")),
            CategoryRule::Standard
        );
        assert_eq!(
            CategoryRule::for_category(Some("gutenberg")),
            CategoryRule::Standard
        );
        assert_eq!(
            CategoryRule::for_category(Some("vikidia")),
            CategoryRule::NotApplicable
        );
    }

    #[test]
    fn test_standard_three_segments() {
        let parts = CategoryRule::Standard
            .apply("wikipedia_fr_climate-change")
            .unwrap();
        assert_eq!(parts.project, "wikipedia");
        assert_eq!(parts.language, "fr");
        assert_eq!(parts.selection, "climate-change");
    }

    #[test]
    fn test_standard_two_segments_defaults_selection() {
        let parts = CategoryRule::Standard.apply("coopmaths_fr").unwrap();
        assert_eq!(parts.project, "coopmaths");
        assert_eq!(parts.language, "fr");
        assert_eq!(parts.selection, "all");
    }

    #[test]
    fn test_standard_rejects_long_language() {
        let err = CategoryRule::Standard
            .apply("wikipedia_french_all")
            .unwrap_err();
        assert_eq!(err, SkipReason::LanguageTooLong);
    }

    #[test]
    fn test_standard_rejects_wrong_segment_count() {
        assert_eq!(
            CategoryRule::Standard.apply("wikipedia").unwrap_err(),
            SkipReason::UnexpectedSegmentCount
        );
        assert_eq!(
            CategoryRule::Standard
                .apply("wikipedia_fr_all_maxi")
                .unwrap_err(),
            SkipReason::UnexpectedSegmentCount
        );
    }

    #[test]
    fn test_phet_three_segments() {
        let parts = CategoryRule::Phet.apply("phets_mul_all").unwrap();
        assert_eq!(parts.project, "phets");
        assert_eq!(parts.language, "mul");
        assert_eq!(parts.selection, "all");
    }

    #[test]
    fn test_phet_wrong_project() {
        assert_eq!(
            CategoryRule::Phet.apply("phet_mul_all").unwrap_err(),
            SkipReason::UnexpectedProject
        );
    }

    #[test]
    fn test_phet_legacy_two_segments() {
        assert_eq!(
            CategoryRule::Phet.apply("phets_mul").unwrap_err(),
            SkipReason::LegacyName
        );
    }

    #[test]
    fn test_phet_too_many_segments() {
        assert_eq!(
            CategoryRule::Phet.apply("phets_mul_all_extra").unwrap_err(),
            SkipReason::UnexpectedSegmentCount
        );
    }

    #[test]
    fn test_uncategorized_avanti_prefix() {
        let parts = CategoryRule::Uncategorized.apply("avanti-physics").unwrap();
        assert_eq!(parts.project, "avanti");
        assert_eq!(parts.language, "hi");
        assert_eq!(parts.selection, "physics");
    }

    #[test]
    fn test_uncategorized_maitre_lucas_prefix() {
        let parts = CategoryRule::Uncategorized
            .apply("maitre_lucas_lessons_fr")
            .unwrap();
        assert_eq!(parts.project, "maitre-lucas");
        assert_eq!(parts.language, "fr");
        assert_eq!(parts.selection, "lessons");
    }

    #[test]
    fn test_uncategorized_canadian_prepper_prefix() {
        let parts = CategoryRule::Uncategorized
            .apply("canadian_prepper_survival_en")
            .unwrap();
        assert_eq!(parts.project, "canadian-prepper");
        assert_eq!(parts.language, "en");
        assert_eq!(parts.selection, "survival");
    }

    #[test]
    fn test_uncategorized_suffix_strip_is_char_boundary_safe() {
        // "éé" is 4 bytes but 2 of the 3 suffix characters
        let parts = CategoryRule::Uncategorized
            .apply("maitre_lucas_voyelles_éé")
            .unwrap();
        assert_eq!(parts.selection, "voyelles");

        assert_eq!(
            CategoryRule::Uncategorized
                .apply("maitre_lucas_éé")
                .unwrap_err(),
            SkipReason::UnexpectedSegmentCount
        );
    }

    #[test]
    fn test_uncategorized_suffix_strip_rejects_short_rest() {
        assert_eq!(
            CategoryRule::Uncategorized
                .apply("canadian_prepper__en")
                .unwrap_err(),
            SkipReason::UnexpectedSegmentCount
        );
    }

    #[test]
    fn test_uncategorized_fallback_to_standard() {
        let parts = CategoryRule::Uncategorized.apply("mindtouch_es").unwrap();
        assert_eq!(parts.project, "mindtouch");
        assert_eq!(parts.language, "es");
        assert_eq!(parts.selection, "all");
    }

    #[test]
    fn test_uncategorized_fallback_rejects_long_language() {
        assert_eq!(
            CategoryRule::Uncategorized
                .apply("mindtouch_spanish")
                .unwrap_err(),
            SkipReason::LanguageTooLong
        );
    }

    #[test]
    fn test_not_applicable_placeholder() {
        let parts = CategoryRule::NotApplicable.apply("whatever").unwrap();
        assert_eq!(parts.project, "na");
        assert_eq!(parts.language, "na");
        assert_eq!(parts.selection, "na");
    }
}
