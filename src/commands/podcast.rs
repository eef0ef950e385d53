use serde::Serialize;

use crate::database::{Database, LibraryEntry, Podcast};
use crate::error::AppError;
use crate::itunes::episode_search_url;
use crate::ratings::{star_fills, PodcastSummary, StarFill};

#[derive(Debug, Serialize)]
pub struct EpisodeLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ReviewView {
    #[serde(flatten)]
    pub entry: LibraryEntry,
    pub stars: [StarFill; 5],
    pub episode_links: Vec<EpisodeLink>,
}

#[derive(Debug, Serialize)]
pub struct PodcastPage {
    pub podcast: Podcast,
    pub summary: PodcastSummary,
    /// Average snapped to the nearest half star.
    pub star_rating: Option<f64>,
    pub stars: [StarFill; 5],
    pub average_label: Option<String>,
    pub reviews: Vec<ReviewView>,
}

#[tracing::instrument(skip(db))]
pub fn get_podcast_page(db: &Database, itunes_id: &str) -> Result<PodcastPage, AppError> {
    let podcast = db
        .get_podcast_by_itunes_id(itunes_id)?
        .ok_or_else(|| AppError::NotFound(format!("podcast {}", itunes_id)))?;
    let entries = db.get_reviews_for_podcast(&podcast.id)?;

    let summary = PodcastSummary::from_reviews(&entries);
    let star_rating = summary.star_rating();

    let reviews = entries
        .into_iter()
        .map(|entry| {
            let episode_links = entry
                .favorite_episodes
                .iter()
                .map(|ep| EpisodeLink {
                    title: ep.episode_title.clone(),
                    url: episode_search_url(Some(&podcast.title), &ep.episode_title),
                })
                .collect();
            ReviewView {
                stars: star_fills(entry.overall_rating),
                episode_links,
                entry,
            }
        })
        .collect();

    log::info!(
        "Podcast {}: {} reviews, {} rated",
        podcast.title,
        summary.review_count,
        summary.rated_count
    );

    Ok(PodcastPage {
        podcast,
        star_rating,
        stars: star_fills(star_rating),
        average_label: summary.average_label(),
        summary,
        reviews,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::tests::support::{setup_entry, setup_test_db};

    #[test]
    fn test_unknown_podcast_not_found() {
        let (db, _temp) = setup_test_db();
        let err = get_podcast_page(&db, "404").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_summary_counts_all_reviews_but_averages_rated() {
        let (db, _temp) = setup_test_db();
        let (_, _, a) = setup_entry(&db, "alice", "42");
        let (_, _, b) = setup_entry(&db, "bob", "42");
        let (_, _, c) = setup_entry(&db, "carol", "42");
        setup_entry(&db, "dave", "42");

        db.set_overall_rating(&a, Some(5.0)).unwrap();
        db.set_overall_rating(&b, Some(3.0)).unwrap();
        db.set_overall_rating(&c, Some(4.5)).unwrap();

        let page = get_podcast_page(&db, "42").unwrap();
        assert_eq!(page.summary.review_count, 4);
        assert_eq!(page.summary.rated_count, 3);
        assert_eq!(page.average_label.as_deref(), Some("4.2"));
        assert_eq!(page.star_rating, Some(4.0));
        assert_eq!(
            page.stars,
            [
                StarFill::Full,
                StarFill::Full,
                StarFill::Full,
                StarFill::Full,
                StarFill::Empty
            ]
        );
        assert_eq!(page.reviews.len(), 4);
    }

    #[test]
    fn test_no_ratings_has_no_average() {
        let (db, _temp) = setup_test_db();
        setup_entry(&db, "alice", "42");

        let page = get_podcast_page(&db, "42").unwrap();
        assert_eq!(page.summary.review_count, 1);
        assert!(page.summary.average.is_none());
        assert!(page.average_label.is_none());
        assert_eq!(page.stars, [StarFill::Empty; 5]);
    }

    #[test]
    fn test_favorite_episodes_link_to_catalog_search() {
        let (db, _temp) = setup_test_db();
        let (_, _, entry) = setup_entry(&db, "alice", "42");
        db.add_favorite_episode(&entry, "Pilot", Some("1"), None).unwrap();

        let page = get_podcast_page(&db, "42").unwrap();
        let links = &page.reviews[0].episode_links;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "Pilot");
        assert!(links[0].url.contains("Pilot"));
    }
}
