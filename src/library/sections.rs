use serde::Serialize;

use crate::database::models::LibraryEntry;

/// A library split the way the profile page shows it. Every section keeps
/// the order of the input.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LibrarySections {
    pub rated: Vec<LibraryEntry>,
    /// Entries without an overall rating yet.
    pub listening: Vec<LibraryEntry>,
    pub favorites: Vec<LibraryEntry>,
}

impl LibrarySections {
    pub fn split(entries: &[LibraryEntry]) -> Self {
        let mut sections = Self::default();
        for entry in entries {
            if entry.overall_rating.is_some() {
                sections.rated.push(entry.clone());
            } else {
                sections.listening.push(entry.clone());
            }
            if entry.is_favorite {
                sections.favorites.push(entry.clone());
            }
        }
        sections
    }

    pub fn total(&self) -> usize {
        self.rated.len() + self.listening.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::fixtures::entry;

    #[test]
    fn test_split_by_rating_and_favorite() {
        let mut fav_unrated = entry("fav-unrated", None);
        fav_unrated.is_favorite = true;
        let mut fav_rated = entry("fav-rated", Some(5.0));
        fav_rated.is_favorite = true;

        let entries = vec![
            entry("rated", Some(3.0)),
            fav_unrated,
            entry("unrated", None),
            fav_rated,
        ];

        let sections = LibrarySections::split(&entries);
        let ids = |v: &[LibraryEntry]| v.iter().map(|e| e.id.clone()).collect::<Vec<_>>();

        assert_eq!(ids(&sections.rated), vec!["rated", "fav-rated"]);
        assert_eq!(ids(&sections.listening), vec!["fav-unrated", "unrated"]);
        assert_eq!(ids(&sections.favorites), vec!["fav-unrated", "fav-rated"]);
        assert_eq!(sections.total(), 4);
    }

    #[test]
    fn test_empty_library() {
        let sections = LibrarySections::split(&[]);
        assert_eq!(sections.total(), 0);
        assert!(sections.favorites.is_empty());
    }
}
