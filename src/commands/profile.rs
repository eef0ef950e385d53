use serde::Serialize;

use super::require_profile;
use crate::database::{slugify_username, Database, LibraryEntry, Profile};
use crate::error::AppError;
use crate::library::LibrarySections;
use crate::ratings::{category_distributions, CategoryDistribution, RatingDistribution};

#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub profile: Profile,
    pub podcast_count: usize,
    pub rated_count: usize,
    pub favorites: Vec<LibraryEntry>,
    pub rated: Vec<LibraryEntry>,
    pub listening: Vec<LibraryEntry>,
    /// Absent when nothing in the library has an overall rating.
    pub overall_distribution: Option<RatingDistribution>,
    pub category_distributions: Vec<CategoryDistribution>,
}

#[tracing::instrument(skip(db))]
pub fn get_profile_page(db: &Database, username: &str) -> Result<ProfilePage, AppError> {
    let profile = require_profile(db, username)?;
    let entries = db.get_library(&profile.id)?;

    let overall_distribution =
        RatingDistribution::from_ratings(entries.iter().map(|e| e.overall_rating));
    let category_distributions = category_distributions(&entries);
    let sections = LibrarySections::split(&entries);

    log::info!(
        "Profile @{}: {} podcasts, {} rated, {} category charts",
        profile.username,
        entries.len(),
        sections.rated.len(),
        category_distributions.len()
    );

    Ok(ProfilePage {
        profile,
        podcast_count: entries.len(),
        rated_count: sections.rated.len(),
        favorites: sections.favorites,
        rated: sections.rated,
        listening: sections.listening,
        overall_distribution,
        category_distributions,
    })
}

/// Profile for `raw_username`, created on first use.
pub fn get_or_create_profile(db: &Database, raw_username: &str) -> Result<Profile, AppError> {
    let username = slugify_username(raw_username)?;
    if username.is_empty() {
        return Err(AppError::Validation(format!(
            "username '{}' has no letters or digits",
            raw_username
        )));
    }
    match db.get_profile_by_username(&username)? {
        Some(profile) => Ok(profile),
        None => Ok(db.create_profile(raw_username)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::tests::support::{setup_entry, setup_test_db, tick};

    #[test]
    fn test_unknown_profile_not_found() {
        let (db, _temp) = setup_test_db();
        let err = get_profile_page(&db, "nobody").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_get_or_create_profile_reuses_slug() {
        let (db, _temp) = setup_test_db();
        let first = get_or_create_profile(&db, "Alice B").unwrap();
        let again = get_or_create_profile(&db, "aliceb").unwrap();
        assert_eq!(first.id, again.id);
        assert_eq!(again.display_name.as_deref(), Some("Alice B"));
        assert!(matches!(
            get_or_create_profile(&db, "!!").unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn test_empty_library_has_no_charts() {
        let (db, _temp) = setup_test_db();
        db.create_profile("alice").unwrap();

        let page = get_profile_page(&db, "alice").unwrap();
        assert_eq!(page.podcast_count, 0);
        assert!(page.overall_distribution.is_none());
        assert!(page.category_distributions.is_empty());
    }

    #[test]
    fn test_unrated_library_skips_overall_chart() {
        let (db, _temp) = setup_test_db();
        let (_, _, entry) = setup_entry(&db, "alice", "1");
        db.add_custom_rating(&entry, "Humor").unwrap();

        let page = get_profile_page(&db, "alice").unwrap();
        assert!(page.overall_distribution.is_none());
        assert_eq!(page.listening.len(), 1);
        assert_eq!(page.category_distributions.len(), 1);
    }

    #[test]
    fn test_profile_page_charts_and_sections() {
        let (db, _temp) = setup_test_db();
        let (_, _, e1) = setup_entry(&db, "alice", "1");
        tick();
        let (_, _, e2) = setup_entry(&db, "alice", "2");
        tick();
        let (_, _, e3) = setup_entry(&db, "alice", "3");

        db.set_overall_rating(&e1, Some(5.0)).unwrap();
        db.set_overall_rating(&e2, Some(3.0)).unwrap();
        db.toggle_favorite(&e3).unwrap();

        let audio = db.add_custom_rating(&e1, "Audio").unwrap();
        db.set_custom_rating(&audio.id, 4.5).unwrap();
        db.add_custom_rating(&e1, "Humor").unwrap();
        db.add_custom_rating(&e2, "Humor").unwrap();

        let page = get_profile_page(&db, "alice").unwrap();
        assert_eq!(page.podcast_count, 3);
        assert_eq!(page.rated_count, 2);
        assert_eq!(page.favorites.len(), 1);
        assert_eq!(page.favorites[0].id, e3);
        assert_eq!(page.listening.len(), 1);

        let overall = page.overall_distribution.unwrap();
        assert_eq!(overall.total_count, 2);
        assert!((overall.average - 4.0).abs() < 1e-9);

        let names: Vec<&str> = page
            .category_distributions
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Humor", "Audio"]);
    }
}
