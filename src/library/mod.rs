//! Library ordering and profile sectioning.

pub mod sections;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::database::models::LibraryEntry;
use crate::ratings::known_categories;

pub use sections::LibrarySections;

/// How a library listing is ordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "category", rename_all = "snake_case")]
pub enum LibrarySortKey {
    /// Most recently updated first.
    #[default]
    Recency,
    /// Podcast title, A to Z, ignoring case.
    Title,
    /// Highest overall rating first; unrated entries rank as 0.
    OverallRating,
    /// Highest rating under this exact category first; entries without the
    /// category rank as 0.
    CustomCategory(String),
}

impl LibrarySortKey {
    pub fn label(&self) -> String {
        match self {
            Self::Recency => "Recently Updated".to_string(),
            Self::Title => "Name".to_string(),
            Self::OverallRating => "Overall Rating".to_string(),
            Self::CustomCategory(name) => name.clone(),
        }
    }

    fn compare(&self, a: &LibraryEntry, b: &LibraryEntry) -> Ordering {
        match self {
            Self::Recency => b.updated_at.cmp(&a.updated_at),
            Self::Title => locale_compare(a.title(), b.title()),
            Self::OverallRating => rank(b.overall_rating).total_cmp(&rank(a.overall_rating)),
            Self::CustomCategory(name) => {
                rank(b.custom_rating(name)).total_cmp(&rank(a.custom_rating(name)))
            }
        }
    }
}

impl fmt::Display for LibrarySortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recency => write!(f, "recent"),
            Self::Title => write!(f, "title"),
            Self::OverallRating => write!(f, "rating"),
            Self::CustomCategory(name) => write!(f, "category:{}", name),
        }
    }
}

impl FromStr for LibrarySortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix("category:") {
            if name.is_empty() {
                return Err("category sort needs a category name".to_string());
            }
            return Ok(Self::CustomCategory(name.to_string()));
        }
        match s {
            "recent" | "recency" => Ok(Self::Recency),
            "title" | "name" => Ok(Self::Title),
            "rating" => Ok(Self::OverallRating),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

// Ranking only: an absent rating sorts like 0. Averages still skip it.
fn rank(rating: Option<f64>) -> f64 {
    rating.unwrap_or(0.0)
}

/// Title comparison in dictionary order: base letters first, ignoring
/// accents and case. Remaining ties put unaccented before accented, then the
/// lowercase form first.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let (a_lower, b_lower) = (a.to_lowercase(), b.to_lowercase());
    fold_accents(&a_lower)
        .cmp(&fold_accents(&b_lower))
        .then_with(|| decomposed(&a_lower).cmp(&decomposed(&b_lower)))
        .then_with(|| b.cmp(a))
}

fn decomposed(s: &str) -> String {
    s.nfd().collect()
}

fn fold_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Return the entries ordered by `key`. Ties keep their input order and the
/// input slice is left untouched.
pub fn sort_library(entries: &[LibraryEntry], key: &LibrarySortKey) -> Vec<LibraryEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

/// Sort choices for a library: the fixed keys followed by one key per
/// category used in the library, alphabetically.
pub fn sort_options(entries: &[LibraryEntry]) -> Vec<LibrarySortKey> {
    let mut options = vec![
        LibrarySortKey::Recency,
        LibrarySortKey::Title,
        LibrarySortKey::OverallRating,
    ];
    options.extend(
        known_categories(entries)
            .into_iter()
            .map(LibrarySortKey::CustomCategory),
    );
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::fixtures::{at, entry, with_custom};

    fn ids(entries: &[LibraryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_overall_rating_puts_unrated_last() {
        let entries = vec![
            entry("none", None),
            entry("high", Some(4.5)),
            entry("low", Some(2.0)),
        ];
        let sorted = sort_library(&entries, &LibrarySortKey::OverallRating);
        assert_eq!(ids(&sorted), vec!["high", "low", "none"]);
    }

    #[test]
    fn test_title_ignores_case() {
        let entries = vec![
            entry("Banana", None),
            entry("apple", None),
            entry("Cherry", None),
        ];
        let sorted = sort_library(&entries, &LibrarySortKey::Title);
        assert_eq!(ids(&sorted), vec!["apple", "Banana", "Cherry"]);
    }

    #[test]
    fn test_title_sorts_accented_with_base_letter() {
        let entries = vec![
            entry("Zebra Talk", None),
            entry("Écoute", None),
            entry("apple", None),
            entry("Ezra Show", None),
        ];
        let sorted = sort_library(&entries, &LibrarySortKey::Title);
        assert_eq!(ids(&sorted), vec!["apple", "Écoute", "Ezra Show", "Zebra Talk"]);
    }

    #[test]
    fn test_title_missing_podcast_sorts_as_empty() {
        let mut orphan = entry("orphan", None);
        orphan.podcast = None;
        let entries = vec![entry("Alpha", None), orphan];
        let sorted = sort_library(&entries, &LibrarySortKey::Title);
        assert_eq!(ids(&sorted), vec!["orphan", "Alpha"]);
    }

    #[test]
    fn test_recency_newest_first() {
        let mut old = entry("old", None);
        old.updated_at = at(10);
        let mut new = entry("new", None);
        new.updated_at = at(500);
        let mut mid = entry("mid", None);
        mid.updated_at = at(100);

        let sorted = sort_library(&[old, new, mid], &LibrarySortKey::Recency);
        assert_eq!(ids(&sorted), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_custom_category_missing_ranks_as_zero() {
        let entries = vec![
            with_custom(entry("no-humor", Some(5.0)), &[("Audio", 5.0)]),
            with_custom(entry("funny", None), &[("Humor", 4.0)]),
            with_custom(entry("funnier", None), &[("Humor", 4.5)]),
            with_custom(entry("lowercase", None), &[("humor", 5.0)]),
        ];
        let key = LibrarySortKey::CustomCategory("Humor".to_string());
        let sorted = sort_library(&entries, &key);
        assert_eq!(ids(&sorted), vec!["funnier", "funny", "no-humor", "lowercase"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let entries = vec![
            entry("first", Some(3.0)),
            entry("second", None),
            entry("third", Some(3.0)),
            entry("fourth", None),
        ];
        let sorted = sort_library(&entries, &LibrarySortKey::OverallRating);
        assert_eq!(ids(&sorted), vec!["first", "third", "second", "fourth"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let entries = vec![entry("b", Some(1.0)), entry("a", Some(5.0))];
        let before = entries.clone();
        let _ = sort_library(&entries, &LibrarySortKey::OverallRating);
        assert_eq!(entries, before);
    }

    #[test]
    fn test_parse_and_display_round() {
        for key in [
            LibrarySortKey::Recency,
            LibrarySortKey::Title,
            LibrarySortKey::OverallRating,
            LibrarySortKey::CustomCategory("Audio Quality".to_string()),
        ] {
            assert_eq!(key.to_string().parse::<LibrarySortKey>().unwrap(), key);
        }
        assert_eq!("name".parse::<LibrarySortKey>().unwrap(), LibrarySortKey::Title);
        assert!("category:".parse::<LibrarySortKey>().is_err());
        assert!("popularity".parse::<LibrarySortKey>().is_err());
    }

    #[test]
    fn test_sort_options_append_categories_alphabetically() {
        let entries = vec![
            with_custom(entry("e1", None), &[("Humor", 4.0)]),
            with_custom(entry("e2", None), &[("Audio", 3.0), ("Humor", 2.0)]),
        ];
        let options = sort_options(&entries);
        assert_eq!(options.len(), 5);
        assert_eq!(options[3], LibrarySortKey::CustomCategory("Audio".to_string()));
        assert_eq!(options[4], LibrarySortKey::CustomCategory("Humor".to_string()));
    }

    #[test]
    fn test_locale_compare() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("banana", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("Same", "Same"), Ordering::Equal);
        assert_eq!(locale_compare("Über", "uns"), Ordering::Less);
        assert_eq!(locale_compare("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_compare("résumé", "Résumé"), Ordering::Less);
    }
}
