use serde::{Deserialize, Serialize};

use super::{require_profile, validate_rating};
use crate::database::{CustomRating, Database, FavoriteEpisode, LibraryEntry, Profile};
use crate::error::AppError;
use crate::library::{sort_library, sort_options, LibrarySortKey};
use crate::ratings::category_suggestions;

#[derive(Debug, Serialize)]
pub struct SortOption {
    pub key: LibrarySortKey,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct LibraryPage {
    pub profile: Profile,
    pub sort: LibrarySortKey,
    pub sort_options: Vec<SortOption>,
    pub entries: Vec<LibraryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct NewFavoriteEpisode {
    pub title: String,
    pub episode_number: Option<String>,
    pub notes: Option<String>,
}

#[tracing::instrument(skip(db))]
pub fn get_library_page(
    db: &Database,
    username: &str,
    sort: &LibrarySortKey,
) -> Result<LibraryPage, AppError> {
    let profile = require_profile(db, username)?;
    let library = db.get_library(&profile.id)?;

    let options = sort_options(&library)
        .into_iter()
        .map(|key| SortOption {
            label: key.label(),
            key,
        })
        .collect();
    let entries = sort_library(&library, sort);

    log::info!("Library @{}: {} entries sorted by {}", profile.username, entries.len(), sort);

    Ok(LibraryPage {
        profile,
        sort: sort.clone(),
        sort_options: options,
        entries,
    })
}

/// Library entry id for the user's copy of a catalog podcast.
pub fn find_entry(db: &Database, username: &str, itunes_id: &str) -> Result<String, AppError> {
    let profile = require_profile(db, username)?;
    db.find_library_entry(&profile.id, itunes_id)?.ok_or_else(|| {
        AppError::NotFound(format!("podcast {} in @{}'s library", itunes_id, username))
    })
}

fn require_entry(db: &Database, entry_id: &str) -> Result<LibraryEntry, AppError> {
    db.get_library_entry(entry_id)?
        .ok_or_else(|| AppError::NotFound(format!("library entry {}", entry_id)))
}

/// Set or clear the overall rating and return the updated entry.
pub fn rate_podcast(
    db: &Database,
    entry_id: &str,
    rating: Option<f64>,
) -> Result<LibraryEntry, AppError> {
    if let Some(r) = rating {
        validate_rating(r)?;
    }
    require_entry(db, entry_id)?;
    db.set_overall_rating(entry_id, rating)?;
    log::info!("Rated entry {}: {:?}", entry_id, rating);
    require_entry(db, entry_id)
}

pub fn update_review(db: &Database, entry_id: &str, review: Option<&str>) -> Result<(), AppError> {
    require_entry(db, entry_id)?;
    db.set_review(entry_id, review)?;
    Ok(())
}

pub fn toggle_favorite(db: &Database, entry_id: &str) -> Result<bool, AppError> {
    require_entry(db, entry_id)?;
    Ok(db.toggle_favorite(entry_id)?)
}

pub fn remove_podcast(db: &Database, entry_id: &str) -> Result<(), AppError> {
    require_entry(db, entry_id)?;
    db.remove_from_library(entry_id)?;
    log::info!("Removed library entry {}", entry_id);
    Ok(())
}

pub fn add_custom_rating(
    db: &Database,
    entry_id: &str,
    category_name: &str,
) -> Result<CustomRating, AppError> {
    if category_name.trim().is_empty() {
        return Err(AppError::Validation("category name is empty".to_string()));
    }
    require_entry(db, entry_id)?;
    Ok(db.add_custom_rating(entry_id, category_name)?)
}

fn require_custom_rating(db: &Database, rating_id: &str) -> Result<CustomRating, AppError> {
    db.get_custom_rating(rating_id)?
        .ok_or_else(|| AppError::NotFound(format!("custom rating {}", rating_id)))
}

pub fn update_custom_rating(db: &Database, rating_id: &str, rating: f64) -> Result<(), AppError> {
    validate_rating(rating)?;
    require_custom_rating(db, rating_id)?;
    db.set_custom_rating(rating_id, rating)?;
    Ok(())
}

pub fn delete_custom_rating(db: &Database, rating_id: &str) -> Result<(), AppError> {
    let removed = require_custom_rating(db, rating_id)?;
    db.delete_custom_rating(rating_id)?;
    log::info!("Removed category '{}' from entry {}", removed.category_name, removed.user_podcast_id);
    Ok(())
}

/// Category names used before that are not on this entry yet, narrowed by
/// what the user has typed so far.
pub fn get_category_suggestions(
    db: &Database,
    entry_id: &str,
    typed: &str,
) -> Result<Vec<String>, AppError> {
    let entry = require_entry(db, entry_id)?;
    let previous = db.get_category_names()?;
    Ok(category_suggestions(&previous, &entry.custom_ratings, typed))
}

pub fn add_favorite_episode(
    db: &Database,
    entry_id: &str,
    episode: &NewFavoriteEpisode,
) -> Result<FavoriteEpisode, AppError> {
    if episode.title.trim().is_empty() {
        return Err(AppError::Validation("episode title is empty".to_string()));
    }
    require_entry(db, entry_id)?;
    Ok(db.add_favorite_episode(
        entry_id,
        &episode.title,
        episode.episode_number.as_deref(),
        episode.notes.as_deref(),
    )?)
}

pub fn delete_favorite_episode(db: &Database, episode_id: &str) -> Result<(), AppError> {
    if db.get_favorite_episode(episode_id)?.is_none() {
        return Err(AppError::NotFound(format!("favorite episode {}", episode_id)));
    }
    db.delete_favorite_episode(episode_id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::tests::support::{setup_entry, setup_test_db, tick};

    #[test]
    fn test_library_page_sorted_with_category_options() {
        let (db, _temp) = setup_test_db();
        let (_, _, e1) = setup_entry(&db, "alice", "1");
        tick();
        let (_, _, e2) = setup_entry(&db, "alice", "2");
        tick();
        let (_, _, e3) = setup_entry(&db, "alice", "3");

        rate_podcast(&db, &e1, Some(2.0)).unwrap();
        rate_podcast(&db, &e2, Some(4.5)).unwrap();
        add_custom_rating(&db, &e3, "Humor").unwrap();

        let page = get_library_page(&db, "alice", &LibrarySortKey::OverallRating).unwrap();
        let ids: Vec<&str> = page.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![e2.as_str(), e1.as_str(), e3.as_str()]);

        assert_eq!(page.sort_options.len(), 4);
        assert_eq!(
            page.sort_options[3].key,
            LibrarySortKey::CustomCategory("Humor".to_string())
        );
        assert_eq!(page.sort_options[3].label, "Humor");

        let page = get_library_page(
            &db,
            "alice",
            &LibrarySortKey::CustomCategory("Humor".to_string()),
        )
        .unwrap();
        assert_eq!(page.entries[0].id, e3);
    }

    #[test]
    fn test_rate_podcast_validation() {
        let (db, _temp) = setup_test_db();
        let (_, _, entry) = setup_entry(&db, "alice", "1");

        let err = rate_podcast(&db, &entry, Some(3.3)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = rate_podcast(&db, "missing", Some(3.0)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let updated = rate_podcast(&db, &entry, Some(3.5)).unwrap();
        assert_eq!(updated.overall_rating, Some(3.5));
    }

    #[test]
    fn test_category_suggestions_exclude_entry_categories() {
        let (db, _temp) = setup_test_db();
        let (_, _, e1) = setup_entry(&db, "alice", "1");
        let (_, _, e2) = setup_entry(&db, "bob", "2");
        add_custom_rating(&db, &e1, "Audio Quality").unwrap();
        add_custom_rating(&db, &e1, "Humor").unwrap();
        add_custom_rating(&db, &e2, "Humor").unwrap();

        let all = get_category_suggestions(&db, &e2, "").unwrap();
        assert_eq!(all, vec!["Audio Quality"]);
        assert!(get_category_suggestions(&db, &e2, "xyz").unwrap().is_empty());
    }

    #[test]
    fn test_custom_rating_and_episode_validation() {
        let (db, _temp) = setup_test_db();
        let (_, _, entry) = setup_entry(&db, "alice", "1");

        assert!(matches!(
            add_custom_rating(&db, &entry, "  ").unwrap_err(),
            AppError::Validation(_)
        ));

        let cr = add_custom_rating(&db, &entry, "Humor").unwrap();
        assert!(matches!(
            update_custom_rating(&db, &cr.id, 6.0).unwrap_err(),
            AppError::Validation(_)
        ));
        update_custom_rating(&db, &cr.id, 1.5).unwrap();

        let episode = NewFavoriteEpisode {
            title: "".to_string(),
            episode_number: None,
            notes: None,
        };
        assert!(matches!(
            add_favorite_episode(&db, &entry, &episode).unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn test_find_entry_by_catalog_id() {
        let (db, _temp) = setup_test_db();
        let (_, _, entry) = setup_entry(&db, "alice", "77");
        db.create_profile("bob").unwrap();

        assert_eq!(find_entry(&db, "alice", "77").unwrap(), entry);
        assert!(matches!(
            find_entry(&db, "bob", "77").unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn test_unknown_child_ids_not_found() {
        let (db, _temp) = setup_test_db();
        let (_, _, entry) = setup_entry(&db, "alice", "1");

        assert!(matches!(
            update_custom_rating(&db, "no-such-rating", 4.0).unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            delete_custom_rating(&db, "no-such-rating").unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            delete_favorite_episode(&db, "no-such-episode").unwrap_err(),
            AppError::NotFound(_)
        ));

        let cr = add_custom_rating(&db, &entry, "Humor").unwrap();
        delete_custom_rating(&db, &cr.id).unwrap();
        assert!(matches!(
            delete_custom_rating(&db, &cr.id).unwrap_err(),
            AppError::NotFound(_)
        ));

        let episode = NewFavoriteEpisode {
            title: "Pilot".to_string(),
            episode_number: None,
            notes: None,
        };
        let fav = add_favorite_episode(&db, &entry, &episode).unwrap();
        delete_favorite_episode(&db, &fav.id).unwrap();
        assert!(db.get_library_entry(&entry).unwrap().unwrap().favorite_episodes.is_empty());
    }

    #[test]
    fn test_toggle_and_remove() {
        let (db, _temp) = setup_test_db();
        let (user_id, _, entry) = setup_entry(&db, "alice", "1");

        assert!(toggle_favorite(&db, &entry).unwrap());
        update_review(&db, &entry, Some("Solid")).unwrap();
        remove_podcast(&db, &entry).unwrap();

        assert!(db.get_library(&user_id).unwrap().is_empty());
        assert!(matches!(
            remove_podcast(&db, &entry).unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
