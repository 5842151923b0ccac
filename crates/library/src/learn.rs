//! Alias learning.
//!
//! After a book is resolved, its raw author and series names are cleaned up
//! and any difference is remembered in the [`AliasStore`], so the next book
//! carrying the same raw spelling lands in the corrected folder.

use shelve_config::AliasStore;
use shelve_metadata::{BookMetadata, PLACEHOLDER_AUTHOR};
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::instrument;

/// Known author misspellings, matched case-insensitively.
const AUTHOR_CORRECTIONS: &[(&str, &str)] = &[
    ("J.K Rowling", "J.K. Rowling"),
    ("J K Rowling", "J.K. Rowling"),
    ("Stephen King", "Stephen King"),
    ("Agatha Christie", "Agatha Christie"),
];

/// Known series variants, matched case-insensitively.
const SERIES_CORRECTIONS: &[(&str, &str)] = &[
    ("Harry Potter", "Harry Potter"),
    ("Harry Potter (French)", "Harry Potter"),
];

/// An alias recorded by [`learn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Learned {
    Author { raw: String, canonical: String },
    Series { raw: String, canonical: String },
}
impl Display for Learned {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Author { raw, canonical } => write!(f, "author {raw:?} -> {canonical:?}"),
            Self::Series { raw, canonical } => write!(f, "series {raw:?} -> {canonical:?}"),
        }
    }
}

/// Records an alias for every author and the series whose cleaned name
/// differs from the raw one.
///
/// Returns only the entries that actually changed the store; an alias that
/// was already known is not reported again. Persisting is up to the caller.
#[instrument(skip_all, fields(title = %metadata.title))]
pub fn learn(aliases: &mut AliasStore, metadata: &BookMetadata) -> Vec<Learned> {
    let mut learned = Vec::new();
    for raw in &metadata.authors {
        if raw.trim().is_empty() || raw == PLACEHOLDER_AUTHOR {
            continue;
        }
        let canonical = clean_author_name(raw);
        if canonical != *raw && aliases.insert_author_alias(raw.as_str(), canonical.as_str()) {
            learned.push(Learned::Author { raw: raw.clone(), canonical });
        }
    }
    let raw = &metadata.series;
    if !raw.trim().is_empty() {
        let canonical = clean_series_name(raw);
        if canonical != *raw && aliases.insert_series_alias(raw.as_str(), canonical.as_str()) {
            learned.push(Learned::Series { raw: raw.clone(), canonical });
        }
    }
    for entry in &learned {
        tracing::info!(%entry, "Learned alias");
    }
    learned
}

/// Collapses runs of whitespace and applies the known author corrections.
pub fn clean_author_name(name: &str) -> String {
    correct(&collapse_whitespace(name), AUTHOR_CORRECTIONS)
}

/// Collapses runs of whitespace and applies the known series corrections.
pub fn clean_series_name(name: &str) -> String {
    correct(&collapse_whitespace(name), SERIES_CORRECTIONS)
}

fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn correct(name: &str, table: &[(&str, &str)]) -> String {
    table
        .iter()
        .find(|(incorrect, _)| incorrect.eq_ignore_ascii_case(name))
        .map_or_else(|| name.to_string(), |(_, correct)| (*correct).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("J K Rowling", "J.K. Rowling")]
    #[case("j.k rowling", "J.K. Rowling")]
    #[case("  J   K  Rowling ", "J.K. Rowling")]
    #[case("stephen king", "Stephen King")]
    #[case("Agatha  Christie", "Agatha Christie")]
    #[case("Frank  Herbert", "Frank Herbert")]
    #[case("Frank Herbert", "Frank Herbert")]
    fn test_clean_author_name(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(clean_author_name(raw), expected);
    }

    #[rstest]
    #[case("Harry Potter (French)", "Harry Potter")]
    #[case("harry potter", "Harry Potter")]
    #[case("The  Expanse", "The Expanse")]
    fn test_clean_series_name(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(clean_series_name(raw), expected);
    }

    #[test]
    fn test_learns_author_and_series() {
        let mut aliases = AliasStore::default();
        let metadata = BookMetadata::new("La Chambre des Secrets", ["J K Rowling", "Jean-François Ménard"])
            .with_series("Harry Potter (French)", "2");

        let learned = learn(&mut aliases, &metadata);
        assert_eq!(learned, vec![
            Learned::Author { raw: "J K Rowling".into(), canonical: "J.K. Rowling".into() },
            Learned::Series { raw: "Harry Potter (French)".into(), canonical: "Harry Potter".into() },
        ]);
        assert_eq!(aliases.get_author_alias("J K Rowling"), Some("J.K. Rowling"));
        assert_eq!(aliases.get_author_alias("Jean-François Ménard"), None);
        assert_eq!(aliases.get_series_alias("Harry Potter (French)"), Some("Harry Potter"));
    }

    #[test]
    fn test_clean_names_teach_nothing() {
        let mut aliases = AliasStore::default();
        let metadata = BookMetadata::new("The Hobbit", ["J.R.R. Tolkien"]).with_series("Middle-earth", "0");
        assert!(learn(&mut aliases, &metadata).is_empty());
        assert!(aliases.is_empty());
    }

    #[test]
    fn test_known_alias_is_not_reported_again() {
        let mut aliases = AliasStore::default();
        let metadata = BookMetadata::new("It", ["stephen  king"]);
        assert_eq!(learn(&mut aliases, &metadata).len(), 1);
        assert!(learn(&mut aliases, &metadata).is_empty());
        assert_eq!(aliases.get_author_alias("stephen  king"), Some("Stephen King"));
    }

    #[test]
    fn test_placeholder_author_is_skipped() {
        let mut aliases = AliasStore::default();
        let metadata = BookMetadata::new("Le Sorcier", [PLACEHOLDER_AUTHOR, " "]);
        assert!(learn(&mut aliases, &metadata).is_empty());
        assert!(aliases.is_empty());
    }

    #[test]
    fn test_series_without_position_still_learns() {
        let mut aliases = AliasStore::default();
        let metadata = BookMetadata::new("Title", ["Jane Doe"]).with_series("Harry  Potter", "");
        assert_eq!(learn(&mut aliases, &metadata), vec![Learned::Series {
            raw: "Harry  Potter".into(),
            canonical: "Harry Potter".into()
        }]);
    }
}
