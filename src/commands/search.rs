use serde::Serialize;

use crate::database::{Database, NewPodcast};
use crate::error::AppError;
use crate::itunes::{CatalogEpisode, CatalogPodcast, ItunesClient};

#[derive(Debug, Serialize)]
pub struct AddResult {
    pub entry_id: String,
    pub podcast_id: String,
    /// False when the podcast was already in the library.
    pub created: bool,
}

pub async fn search_catalog(
    client: &ItunesClient,
    term: &str,
) -> Result<Vec<CatalogPodcast>, AppError> {
    Ok(client.search_podcasts(term).await?.results)
}

/// Store a catalog podcast (once) and add it to the user's library.
pub fn add_catalog_podcast(
    db: &Database,
    user_id: &str,
    podcast: &CatalogPodcast,
) -> Result<AddResult, AppError> {
    let new = NewPodcast::from(podcast);
    if new.title.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "catalog podcast {} has no title",
            new.itunes_id
        )));
    }

    let (stored, podcast_created) = db.get_or_create_podcast(&new)?;
    let (entry_id, created) = db.add_to_library(user_id, &stored.id)?;

    log::info!(
        "Library add '{}' (podcast new: {}, entry new: {})",
        stored.title,
        podcast_created,
        created
    );

    Ok(AddResult {
        entry_id,
        podcast_id: stored.id,
        created,
    })
}

/// Look a podcast up by catalog id and add it to the user's library.
pub async fn add_podcast_by_id(
    db: &Database,
    client: &ItunesClient,
    user_id: &str,
    itunes_id: &str,
) -> Result<AddResult, AppError> {
    let podcast = client
        .lookup_podcast(itunes_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("catalog podcast {}", itunes_id)))?;
    add_catalog_podcast(db, user_id, &podcast)
}

pub async fn search_episodes(
    client: &ItunesClient,
    itunes_id: &str,
    query: Option<&str>,
) -> Result<Vec<CatalogEpisode>, AppError> {
    client.lookup_episodes(itunes_id, query).await
}
