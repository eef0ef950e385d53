//! iTunes catalog client
//!
//! Podcast search and episode lookup against the public iTunes Search API.
//! Nothing here is stored; callers decide what to persist.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AppConfig;
use crate::database::NewPodcast;
use crate::error::AppError;

/// Shorter search terms return no results without calling the catalog.
pub const MIN_QUERY_CHARS: usize = 2;

const EPISODE_SEARCH_BASE_URL: &str = "https://podcasts.apple.com/search";

pub struct ItunesClient {
    client: reqwest::Client,
    base_url: String,
    search_limit: u32,
    episode_lookup_limit: u32,
}

impl ItunesClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .build()
                .unwrap_or_default(),
            base_url: config.itunes_base_url.trim_end_matches('/').to_string(),
            search_limit: config.search_limit,
            episode_lookup_limit: config.episode_lookup_limit,
        }
    }

    /// Search the catalog for podcasts matching `term`.
    pub async fn search_podcasts(&self, term: &str) -> Result<SearchResponse, AppError> {
        let term = term.trim();
        if !is_searchable(term) {
            return Ok(SearchResponse::default());
        }

        let url = format!("{}/search", self.base_url);
        let limit = self.search_limit.to_string();
        log::info!("Searching catalog for '{}'", term);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("term", term),
                ("media", "podcast"),
                ("entity", "podcast"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::Http(format!("catalog search returned {}", status)));
        }

        let body = response.text().await?;
        let parsed = parse_search_response(&body)?;
        log::info!("Catalog search '{}' returned {} podcasts", term, parsed.results.len());
        Ok(parsed)
    }

    /// Look up one podcast by catalog id.
    pub async fn lookup_podcast(&self, itunes_id: &str) -> Result<Option<CatalogPodcast>, AppError> {
        let body = self.lookup(itunes_id, None).await?;
        parse_podcast_lookup(&body)
    }

    /// Recent episodes of a podcast, optionally narrowed to those whose title
    /// or description contains `query`.
    pub async fn lookup_episodes(
        &self,
        itunes_id: &str,
        query: Option<&str>,
    ) -> Result<Vec<CatalogEpisode>, AppError> {
        let body = self.lookup(itunes_id, Some("podcastEpisode")).await?;
        let episodes = parse_episode_lookup(&body)?;
        Ok(filter_episodes(episodes, query))
    }

    async fn lookup(&self, itunes_id: &str, entity: Option<&str>) -> Result<String, AppError> {
        let url = format!("{}/lookup", self.base_url);
        let limit = self.episode_lookup_limit.to_string();

        let mut request = self.client.get(&url).query(&[("id", itunes_id)]);
        if let Some(entity) = entity {
            request = request.query(&[("entity", entity), ("limit", limit.as_str())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::Http(format!(
                "catalog lookup for {} returned {}",
                itunes_id, status
            )));
        }
        Ok(response.text().await?)
    }
}

fn is_searchable(term: &str) -> bool {
    term.chars().count() >= MIN_QUERY_CHARS
}

pub fn parse_search_response(body: &str) -> Result<SearchResponse, AppError> {
    Ok(serde_json::from_str(body)?)
}

/// The podcast record of a lookup response is its first result.
pub fn parse_podcast_lookup(body: &str) -> Result<Option<CatalogPodcast>, AppError> {
    let lookup: LookupResponse = serde_json::from_str(body)?;
    Ok(lookup
        .results
        .into_iter()
        .next()
        .and_then(|v| serde_json::from_value(v).ok()))
}

/// Episodes of a lookup response: every result after the first, which is
/// the podcast itself. Results that do not look like episodes are skipped.
pub fn parse_episode_lookup(body: &str) -> Result<Vec<CatalogEpisode>, AppError> {
    let lookup: LookupResponse = serde_json::from_str(body)?;
    let episodes = lookup
        .results
        .into_iter()
        .skip(1)
        .filter_map(|value| match serde_json::from_value::<CatalogEpisode>(value) {
            Ok(episode) => Some(episode),
            Err(e) => {
                log::debug!("Skipping malformed episode in lookup: {}", e);
                None
            }
        })
        .collect();
    Ok(episodes)
}

/// Keep episodes whose title or description contains `query`, ignoring
/// case. Queries shorter than two characters keep everything.
pub fn filter_episodes(episodes: Vec<CatalogEpisode>, query: Option<&str>) -> Vec<CatalogEpisode> {
    let query = match query.map(str::trim) {
        Some(q) if is_searchable(q) => q.to_lowercase(),
        _ => return episodes,
    };

    episodes
        .into_iter()
        .filter(|ep| {
            ep.title.to_lowercase().contains(&query)
                || ep
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&query))
        })
        .collect()
}

/// Catalog web-search link for a favorite episode, which has no canonical
/// episode id of its own.
pub fn episode_search_url(podcast_name: Option<&str>, episode_title: &str) -> String {
    let term = match podcast_name {
        Some(name) if !name.is_empty() => format!("{} {}", name, episode_title),
        _ => episode_title.to_string(),
    };
    match Url::parse_with_params(EPISODE_SEARCH_BASE_URL, &[("term", term.as_str())]) {
        Ok(url) => url.to_string(),
        Err(_) => EPISODE_SEARCH_BASE_URL.to_string(),
    }
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub result_count: usize,
    #[serde(default)]
    pub results: Vec<CatalogPodcast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPodcast {
    pub collection_id: i64,
    pub collection_name: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub artwork_url600: String,
    pub feed_url: Option<String>,
    pub collection_view_url: Option<String>,
    pub artist_view_url: Option<String>,
}

impl From<&CatalogPodcast> for NewPodcast {
    fn from(p: &CatalogPodcast) -> Self {
        NewPodcast {
            itunes_id: p.collection_id.to_string(),
            title: p.collection_name.clone(),
            author: p.artist_name.clone(),
            artwork_url: p.artwork_url600.clone(),
            feed_url: p.feed_url.clone(),
            itunes_url: p.collection_view_url.clone(),
            artist_url: p.artist_view_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEpisode {
    #[serde(rename = "trackId")]
    pub id: i64,
    #[serde(rename = "trackName")]
    pub title: String,
    #[serde(rename = "trackTimeMillis", default)]
    pub duration_ms: Option<u64>,
    #[serde(rename = "releaseDate", default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "episodeUrl", default)]
    pub audio_url: Option<String>,
    #[serde(rename = "trackViewUrl", default)]
    pub episode_url: Option<String>,
}
