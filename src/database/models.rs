use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// Catalog-identity record. One row per distinct catalog id, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Podcast {
    pub id: String,
    pub itunes_id: String,
    pub title: String,
    pub author: String,
    pub artwork_url: String,
    pub feed_url: Option<String>,
    pub itunes_url: Option<String>,
    pub artist_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Catalog fields needed to store a podcast the first time it is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPodcast {
    pub itunes_id: String,
    pub title: String,
    pub author: String,
    pub artwork_url: String,
    pub feed_url: Option<String>,
    pub itunes_url: Option<String>,
    pub artist_url: Option<String>,
}

/// A user's personal record for one podcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub id: String,
    pub user_id: String,
    pub podcast_id: String,
    pub overall_rating: Option<f64>,
    pub review_text: Option<String>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub podcast: Option<Podcast>,
    #[serde(default)]
    pub custom_ratings: Vec<CustomRating>,
    #[serde(default)]
    pub favorite_episodes: Vec<FavoriteEpisode>,
    /// Owner of the entry; the reviewer on the podcast page.
    #[serde(default)]
    pub profile: Option<Profile>,
}

impl LibraryEntry {
    pub fn title(&self) -> &str {
        self.podcast.as_ref().map(|p| p.title.as_str()).unwrap_or("")
    }

    /// This entry's rating under an exact category name.
    pub fn custom_rating(&self, category_name: &str) -> Option<f64> {
        self.custom_ratings
            .iter()
            .find(|cr| cr.category_name == category_name)
            .map(|cr| cr.rating)
    }
}

/// User-named sub-rating on one library entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomRating {
    pub id: String,
    pub user_podcast_id: String,
    pub category_name: String,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEpisode {
    pub id: String,
    pub user_podcast_id: String,
    pub episode_title: String,
    pub episode_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Test fixtures
// ============================================================================
