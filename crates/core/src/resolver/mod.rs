//! Book name resolver.
//!
//! Pure metadata inference: a book's raw name slug plus its tag list are
//! turned into `{project, language, selection, flavour, category}` using a
//! per-category rule table and the operator override/ignore settings. No I/O
//! happens here; skips are returned to the caller for reporting.

mod rules;
mod settings;
mod types;

pub use rules::CategoryRule;
pub use settings::{Settings, SettingsError, SettingsUsage, UnusedSettings};
pub use types::{NameParts, ResolvedBook, Resolution, SkipReason};

/// Tag prefix carrying the book category.
const CATEGORY_TAG_PREFIX: &str = "_category:";

/// Resolve one book's metadata from its name and semicolon-delimited tags.
///
/// The ignore set is consulted first, then the category is extracted from the
/// tags, then the override map is applied exactly once before the category
/// rule parses the name.
pub fn resolve(
    name: &str,
    tags: &str,
    flavour: Option<&str>,
    settings: &Settings,
    usage: &mut SettingsUsage,
) -> Resolution {
    if settings.is_ignored(name) {
        usage.mark_ignore_used(name);
        return Resolution::Skipped(SkipReason::Ignored);
    }

    let category = match extract_category(tags) {
        Ok(category) => category,
        Err(reason) => return Resolution::Skipped(reason),
    };

    let name = match settings.override_for(name) {
        Some(replacement) => {
            usage.mark_override_used(name);
            replacement
        }
        None => name,
    };

    let rule = CategoryRule::for_category(category.as_deref());
    match rule.apply(name) {
        Ok(parts) => Resolution::Resolved(ResolvedBook {
            category,
            project: parts.project,
            language: parts.language,
            selection: parts.selection,
            flavour: flavour.map(str::to_string),
        }),
        Err(reason) => Resolution::Skipped(reason),
    }
}

/// Pull the category out of the tag list: zero `_category:` tags means
/// uncategorized, more than one is a skip.
fn extract_category(tags: &str) -> Result<Option<String>, SkipReason> {
    let mut categories = tags
        .split(';')
        .filter_map(|tag| tag.strip_prefix(CATEGORY_TAG_PREFIX));
    match (categories.next(), categories.next()) {
        (None, _) => Ok(None),
        (Some(category), None) => Ok(Some(category.to_string())),
        (Some(_), Some(_)) => Err(SkipReason::AmbiguousCategory),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn test_resolve_standard_category() {
        let settings = empty_settings();
        let mut usage = SettingsUsage::default();
        let resolution = resolve(
            "wikipedia_fr_climate-change",
            "_category:wikipedia;_ftindex:yes",
            None,
            &settings,
            &mut usage,
        );
        let Resolution::Resolved(book) = resolution else {
            panic!("expected resolution");
        };
        assert_eq!(book.category.as_deref(), Some("wikipedia"));
        assert_eq!(book.project, "wikipedia");
        assert_eq!(book.language, "fr");
        assert_eq!(book.selection, "climate-change");
        assert_eq!(book.flavour, None);
    }

    #[test]
    fn test_resolve_applies_override_before_parsing() {
        let settings = Settings::from_strs(
            "wikipedia_fr_climate_change|wikipedia_fr_climate-change\n",
            "",
        )
        .unwrap();
        let mut usage = SettingsUsage::default();
        let resolution = resolve(
            "wikipedia_fr_climate_change",
            "_category:wikipedia",
            None,
            &settings,
            &mut usage,
        );
        let Resolution::Resolved(book) = resolution else {
            panic!("expected resolution");
        };
        assert_eq!(book.selection, "climate-change");
        assert!(settings.unused_report(&usage).overrides.is_empty());
    }

    #[test]
    fn test_resolve_override_to_two_segments() {
        let settings = Settings::from_strs("coopmaths|coopmaths_fr\n", "").unwrap();
        let mut usage = SettingsUsage::default();
        let resolution = resolve("coopmaths", "", None, &settings, &mut usage);
        let Resolution::Resolved(book) = resolution else {
            panic!("expected resolution");
        };
        assert_eq!(book.category, None);
        assert_eq!(book.project, "coopmaths");
        assert_eq!(book.language, "fr");
        assert_eq!(book.selection, "all");
    }

    #[test]
    fn test_resolve_ignored_name_skips_before_anything_else() {
        let settings = Settings::from_strs("", "broken_book\n").unwrap();
        let mut usage = SettingsUsage::default();
        // Ambiguous tags, but the ignore wins
        let resolution = resolve(
            "broken_book",
            "_category:ted;_category:phet",
            None,
            &settings,
            &mut usage,
        );
        assert_eq!(resolution, Resolution::Skipped(SkipReason::Ignored));
        assert!(settings.unused_report(&usage).ignores.is_empty());
    }

    #[test]
    fn test_resolve_ambiguous_category() {
        let settings = empty_settings();
        let mut usage = SettingsUsage::default();
        let resolution = resolve(
            "gutenberg_en_all",
            "_category:gutenberg;_category:ted",
            None,
            &settings,
            &mut usage,
        );
        assert_eq!(
            resolution,
            Resolution::Skipped(SkipReason::AmbiguousCategory)
        );
    }

    #[test]
    fn test_resolve_unknown_category_is_not_applicable() {
        let settings = empty_settings();
        let mut usage = SettingsUsage::default();
        let resolution = resolve(
            "some_odd_name_with_many_parts",
            "_category:vikidia",
            Some("maxi"),
            &settings,
            &mut usage,
        );
        let Resolution::Resolved(book) = resolution else {
            panic!("expected resolution");
        };
        assert_eq!(book.category.as_deref(), Some("vikidia"));
        assert_eq!(book.project, "na");
        assert_eq!(book.language, "na");
        assert_eq!(book.selection, "na");
        assert_eq!(book.flavour.as_deref(), Some("maxi"));
    }

    #[test]
    fn test_resolve_malformed_standard_name() {
        let settings = empty_settings();
        let mut usage = SettingsUsage::default();
        let resolution = resolve("wikipedia", "_category:wikipedia", None, &settings, &mut usage);
        assert_eq!(
            resolution,
            Resolution::Skipped(SkipReason::UnexpectedSegmentCount)
        );
    }

    #[test]
    fn test_resolve_flavour_passthrough() {
        let settings = empty_settings();
        let mut usage = SettingsUsage::default();
        let resolution = resolve(
            "wiktionary_es_all",
            "_category:wiktionary",
            Some("nopic"),
            &settings,
            &mut usage,
        );
        let Resolution::Resolved(book) = resolution else {
            panic!("expected resolution");
        };
        assert_eq!(book.flavour.as_deref(), Some("nopic"));
    }

    #[test]
    fn test_extract_category_none() {
        assert_eq!(extract_category("_ftindex:yes;foo").unwrap(), None);
        assert_eq!(extract_category("").unwrap(), None);
    }

    #[test]
    fn test_extract_category_single() {
        assert_eq!(
            extract_category("foo;_category:ted;bar").unwrap(),
            Some("ted".to_string())
        );
    }
}
