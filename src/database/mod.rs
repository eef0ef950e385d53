pub mod models;


use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::ratings::{is_valid_rating, DEFAULT_CUSTOM_RATING};

pub use models::*;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

// Column order shared by every library-entry query; see `entry_from_row`.
const ENTRY_SELECT: &str = r#"
    SELECT up.id, up.user_id, up.podcast_id, up.overall_rating, up.review_text,
           up.is_favorite, up.created_at, up.updated_at,
           p.id, p.itunes_id, p.title, p.author, p.artwork_url, p.feed_url,
           p.itunes_url, p.artist_url, p.created_at,
           pr.id, pr.username, pr.display_name, pr.avatar_url, pr.created_at
    FROM user_podcasts up
    JOIN podcasts p ON p.id = up.podcast_id
    JOIN profiles pr ON pr.id = up.user_id
"#;

const PODCAST_COLUMNS: &str =
    "id, itunes_id, title, author, artwork_url, feed_url, itunes_url, artist_url, created_at";

const PROFILE_COLUMNS: &str = "id, username, display_name, avatar_url, created_at";

const CUSTOM_RATING_COLUMNS: &str = "id, user_podcast_id, category_name, rating";

const FAVORITE_EPISODE_COLUMNS: &str =
    "id, user_podcast_id, episode_title, episode_number, notes, created_at";

impl Database {
    pub fn new(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA foreign_keys=ON;
            PRAGMA temp_store=MEMORY;
        ",
        )?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.init_schema()?;

        Ok(db)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                display_name TEXT,
                avatar_url TEXT,
                created_at TEXT NOT NULL
            );

            -- One row per catalog podcast; rows are never updated
            CREATE TABLE IF NOT EXISTS podcasts (
                id TEXT PRIMARY KEY,
                itunes_id TEXT NOT NULL UNIQUE,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                artwork_url TEXT NOT NULL,
                feed_url TEXT,
                itunes_url TEXT,
                artist_url TEXT,
                created_at TEXT NOT NULL
            );

            -- Library entries
            CREATE TABLE IF NOT EXISTS user_podcasts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                podcast_id TEXT NOT NULL,
                overall_rating REAL,
                review_text TEXT,
                is_favorite INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES profiles(id) ON DELETE CASCADE,
                FOREIGN KEY (podcast_id) REFERENCES podcasts(id),
                UNIQUE(user_id, podcast_id)
            );

            CREATE INDEX IF NOT EXISTS idx_user_podcasts_user
                ON user_podcasts(user_id, updated_at DESC);
            CREATE INDEX IF NOT EXISTS idx_user_podcasts_podcast
                ON user_podcasts(podcast_id, updated_at DESC);

            CREATE TABLE IF NOT EXISTS custom_ratings (
                id TEXT PRIMARY KEY,
                user_podcast_id TEXT NOT NULL,
                category_name TEXT NOT NULL,
                rating REAL NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (user_podcast_id) REFERENCES user_podcasts(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_custom_ratings_entry ON custom_ratings(user_podcast_id);
            CREATE INDEX IF NOT EXISTS idx_custom_ratings_name ON custom_ratings(category_name);

            CREATE TABLE IF NOT EXISTS favorite_episodes (
                id TEXT PRIMARY KEY,
                user_podcast_id TEXT NOT NULL,
                episode_title TEXT NOT NULL,
                episode_number TEXT,
                notes TEXT,
                created_at TEXT NOT NULL,
                FOREIGN KEY (user_podcast_id) REFERENCES user_podcasts(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_favorite_episodes_entry ON favorite_episodes(user_podcast_id);

            -- App settings (key-value store)
            CREATE TABLE IF NOT EXISTS app_settings (
                key TEXT PRIMARY KEY,
                value TEXT,
                updated_at TEXT
            );
        "#,
        )?;

        log::info!("Database schema initialized");
        Ok(())
    }

    // =========================================================================
    // Profiles
    // =========================================================================

    /// Create a profile. The username is reduced to lowercase ASCII letters
    /// and digits; the raw input is kept as the display name.
    pub fn create_profile(&self, raw_username: &str) -> Result<Profile> {
        let username = slugify_username(raw_username)?;
        if username.is_empty() {
            bail!("username '{}' has no letters or digits", raw_username);
        }

        let profile = Profile {
            id: new_id(),
            username,
            display_name: Some(raw_username.trim().to_string()),
            avatar_url: None,
            created_at: Utc::now(),
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO profiles (id, username, display_name, avatar_url, created_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                profile.id,
                profile.username,
                profile.display_name,
                profile.avatar_url,
                timestamp(&profile.created_at)
            ],
        )?;

        log::info!("Created profile @{}", profile.username);
        Ok(profile)
    }

    pub fn get_profile_by_username(&self, username: &str) -> Result<Option<Profile>> {
        let conn = self.conn()?;
        let sql = format!("SELECT {} FROM profiles WHERE username = ?", PROFILE_COLUMNS);
        let profile = conn
            .query_row(&sql, params![username], |row| profile_from_row(row, 0))
            .optional()?;
        Ok(profile)
    }

    // =========================================================================
    // Podcasts
    // =========================================================================

    /// Return the podcast row for a catalog id, inserting it first if it is
    /// not stored yet. Existing rows are returned as they are.
    pub fn get_or_create_podcast(&self, new: &NewPodcast) -> Result<(Podcast, bool)> {
        let conn = self.conn()?;

        let sql = format!("SELECT {} FROM podcasts WHERE itunes_id = ?", PODCAST_COLUMNS);
        if let Some(existing) = conn
            .query_row(&sql, params![new.itunes_id], |row| podcast_from_row(row, 0))
            .optional()?
        {
            return Ok((existing, false));
        }

        let podcast = Podcast {
            id: new_id(),
            itunes_id: new.itunes_id.clone(),
            title: new.title.clone(),
            author: new.author.clone(),
            artwork_url: new.artwork_url.clone(),
            feed_url: new.feed_url.clone(),
            itunes_url: new.itunes_url.clone(),
            artist_url: new.artist_url.clone(),
            created_at: Utc::now(),
        };

        conn.execute(
            "INSERT INTO podcasts (id, itunes_id, title, author, artwork_url, feed_url, itunes_url, artist_url, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                podcast.id,
                podcast.itunes_id,
                podcast.title,
                podcast.author,
                podcast.artwork_url,
                podcast.feed_url,
                podcast.itunes_url,
                podcast.artist_url,
                timestamp(&podcast.created_at)
            ],
        )?;

        log::info!("Stored podcast '{}' ({})", podcast.title, podcast.itunes_id);
        Ok((podcast, true))
    }

    pub fn get_podcast_by_itunes_id(&self, itunes_id: &str) -> Result<Option<Podcast>> {
        let conn = self.conn()?;
        let sql = format!("SELECT {} FROM podcasts WHERE itunes_id = ?", PODCAST_COLUMNS);
        let podcast = conn
            .query_row(&sql, params![itunes_id], |row| podcast_from_row(row, 0))
            .optional()?;
        Ok(podcast)
    }

    // =========================================================================
    // Library entries
    // =========================================================================

    /// Add a podcast to a user's library. Returns the entry id and whether it
    /// was newly created; a second add of the same pair is a no-op.
    pub fn add_to_library(&self, user_id: &str, podcast_id: &str) -> Result<(String, bool)> {
        let conn = self.conn()?;

        let existing: Option<String> = conn
            .query_row(
                "SELECT id FROM user_podcasts WHERE user_id = ? AND podcast_id = ?",
                params![user_id, podcast_id],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(id) = existing {
            return Ok((id, false));
        }

        let id = new_id();
        let now = timestamp(&Utc::now());
        conn.execute(
            "INSERT INTO user_podcasts (id, user_id, podcast_id, is_favorite, created_at, updated_at)
             VALUES (?, ?, ?, 0, ?, ?)",
            params![id, user_id, podcast_id, now, now],
        )?;
        Ok((id, true))
    }

    pub fn get_library_entry(&self, entry_id: &str) -> Result<Option<LibraryEntry>> {
        let conn = self.conn()?;
        let sql = format!("{} WHERE up.id = ?", ENTRY_SELECT);
        let entry = conn
            .query_row(&sql, params![entry_id], entry_from_row)
            .optional()?;

        match entry {
            Some(mut entry) => {
                attach_children(&conn, std::slice::from_mut(&mut entry))?;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    /// Find a user's entry for a catalog podcast.
    pub fn find_library_entry(&self, user_id: &str, itunes_id: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let id = conn
            .query_row(
                "SELECT up.id FROM user_podcasts up
                 JOIN podcasts p ON p.id = up.podcast_id
                 WHERE up.user_id = ? AND p.itunes_id = ?",
                params![user_id, itunes_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Whole library of one user, most recently updated first, with podcast,
    /// custom ratings and favorite episodes attached.
    pub fn get_library(&self, user_id: &str) -> Result<Vec<LibraryEntry>> {
        let conn = self.conn()?;
        let sql = format!(
            "{} WHERE up.user_id = ? ORDER BY up.updated_at DESC, up.created_at DESC",
            ENTRY_SELECT
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut entries = stmt
            .query_map(params![user_id], entry_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        attach_children(&conn, &mut entries)?;
        Ok(entries)
    }

    /// Every library entry that references one podcast, with reviewer
    /// profiles, most recently updated first.
    pub fn get_reviews_for_podcast(&self, podcast_id: &str) -> Result<Vec<LibraryEntry>> {
        let conn = self.conn()?;
        let sql = format!(
            "{} WHERE up.podcast_id = ? ORDER BY up.updated_at DESC, up.created_at DESC",
            ENTRY_SELECT
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut entries = stmt
            .query_map(params![podcast_id], entry_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        attach_children(&conn, &mut entries)?;
        Ok(entries)
    }

    /// Set or clear the overall rating. Only half-star values in
    /// `[0.5, 5.0]` are accepted.
    pub fn set_overall_rating(&self, entry_id: &str, rating: Option<f64>) -> Result<()> {
        if let Some(r) = rating {
            if !is_valid_rating(r) {
                bail!("rating {} is not a half-star value between 0.5 and 5", r);
            }
        }
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE user_podcasts SET overall_rating = ?, updated_at = ? WHERE id = ?",
            params![rating, timestamp(&Utc::now()), entry_id],
        )?;
        ensure_changed(changed, "library entry", entry_id)
    }

    pub fn set_review(&self, entry_id: &str, review: Option<&str>) -> Result<()> {
        let review = review.map(str::trim).filter(|r| !r.is_empty());
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE user_podcasts SET review_text = ?, updated_at = ? WHERE id = ?",
            params![review, timestamp(&Utc::now()), entry_id],
        )?;
        ensure_changed(changed, "library entry", entry_id)
    }

    /// Flip the favorite flag and return the new value.
    pub fn toggle_favorite(&self, entry_id: &str) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE user_podcasts SET is_favorite = 1 - is_favorite, updated_at = ? WHERE id = ?",
            params![timestamp(&Utc::now()), entry_id],
        )?;
        ensure_changed(changed, "library entry", entry_id)?;

        let value: i32 = conn.query_row(
            "SELECT is_favorite FROM user_podcasts WHERE id = ?",
            params![entry_id],
            |row| row.get(0),
        )?;
        Ok(value == 1)
    }

    /// Remove an entry together with its custom ratings and favorite episodes.
    pub fn remove_from_library(&self, entry_id: &str) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM user_podcasts WHERE id = ?", params![entry_id])?;
        ensure_changed(changed, "library entry", entry_id)
    }

    // =========================================================================
    // Custom ratings
    // =========================================================================

    /// Add a named category to an entry with the default rating. Surrounding
    /// whitespace is trimmed; the name is otherwise stored exactly as given.
    pub fn add_custom_rating(&self, entry_id: &str, category_name: &str) -> Result<CustomRating> {
        let category_name = category_name.trim();
        if category_name.is_empty() {
            bail!("category name is empty");
        }

        let rating = CustomRating {
            id: new_id(),
            user_podcast_id: entry_id.to_string(),
            category_name: category_name.to_string(),
            rating: DEFAULT_CUSTOM_RATING,
        };

        let conn = self.conn()?;
        let now = timestamp(&Utc::now());
        conn.execute(
            "INSERT INTO custom_ratings (id, user_podcast_id, category_name, rating, created_at)
             VALUES (?, ?, ?, ?, ?)",
            params![rating.id, rating.user_podcast_id, rating.category_name, rating.rating, now],
        )?;
        touch_entry(&conn, entry_id, &now)?;
        Ok(rating)
    }

    pub fn set_custom_rating(&self, rating_id: &str, rating: f64) -> Result<()> {
        if !is_valid_rating(rating) {
            bail!("rating {} is not a half-star value between 0.5 and 5", rating);
        }
        let conn = self.conn()?;
        let entry_id = custom_rating_owner(&conn, rating_id)?;
        conn.execute(
            "UPDATE custom_ratings SET rating = ? WHERE id = ?",
            params![rating, rating_id],
        )?;
        touch_entry(&conn, &entry_id, &timestamp(&Utc::now()))
    }

    pub fn get_custom_rating(&self, rating_id: &str) -> Result<Option<CustomRating>> {
        let conn = self.conn()?;
        let sql = format!("SELECT {} FROM custom_ratings WHERE id = ?", CUSTOM_RATING_COLUMNS);
        let rating = conn
            .query_row(&sql, params![rating_id], custom_rating_from_row)
            .optional()?;
        Ok(rating)
    }

    pub fn delete_custom_rating(&self, rating_id: &str) -> Result<()> {
        let conn = self.conn()?;
        let entry_id = custom_rating_owner(&conn, rating_id)?;
        conn.execute("DELETE FROM custom_ratings WHERE id = ?", params![rating_id])?;
        touch_entry(&conn, &entry_id, &timestamp(&Utc::now()))
    }

    /// Distinct category names used across all libraries, by name.
    pub fn get_category_names(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT DISTINCT category_name FROM custom_ratings ORDER BY category_name")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    // =========================================================================
    // Favorite episodes
    // =========================================================================

    pub fn add_favorite_episode(
        &self,
        entry_id: &str,
        episode_title: &str,
        episode_number: Option<&str>,
        notes: Option<&str>,
    ) -> Result<FavoriteEpisode> {
        let episode_title = episode_title.trim();
        if episode_title.is_empty() {
            bail!("episode title is empty");
        }
        let blank_to_none = |s: Option<&str>| {
            s.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let episode = FavoriteEpisode {
            id: new_id(),
            user_podcast_id: entry_id.to_string(),
            episode_title: episode_title.to_string(),
            episode_number: blank_to_none(episode_number),
            notes: blank_to_none(notes),
            created_at: Utc::now(),
        };

        let conn = self.conn()?;
        let now = timestamp(&episode.created_at);
        conn.execute(
            "INSERT INTO favorite_episodes (id, user_podcast_id, episode_title, episode_number, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                episode.id,
                episode.user_podcast_id,
                episode.episode_title,
                episode.episode_number,
                episode.notes,
                now
            ],
        )?;
        touch_entry(&conn, entry_id, &now)?;
        Ok(episode)
    }

    pub fn get_favorite_episode(&self, episode_id: &str) -> Result<Option<FavoriteEpisode>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM favorite_episodes WHERE id = ?",
            FAVORITE_EPISODE_COLUMNS
        );
        let episode = conn
            .query_row(&sql, params![episode_id], favorite_episode_from_row)
            .optional()?;
        Ok(episode)
    }

    pub fn delete_favorite_episode(&self, episode_id: &str) -> Result<()> {
        let conn = self.conn()?;
        let entry_id: Option<String> = conn
            .query_row(
                "SELECT user_podcast_id FROM favorite_episodes WHERE id = ?",
                params![episode_id],
                |row| row.get(0),
            )
            .optional()?;
        let entry_id = entry_id.ok_or_else(|| anyhow!("favorite episode {} not found", episode_id))?;

        conn.execute("DELETE FROM favorite_episodes WHERE id = ?", params![episode_id])?;
        touch_entry(&conn, &entry_id, &timestamp(&Utc::now()))
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM app_settings WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO app_settings (key, value, updated_at) VALUES (?, ?, ?)",
            params![key, value, timestamp(&Utc::now())],
        )?;
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// Fixed-width RFC 3339 so that text ordering in SQL matches time ordering.
fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Lowercase the input and drop everything but ASCII letters and digits.
pub fn slugify_username(raw: &str) -> Result<String> {
    let re = regex::Regex::new(r"[^a-z0-9]")?;
    Ok(re.replace_all(&raw.to_lowercase(), "").into_owned())
}

fn ensure_changed(changed: usize, what: &str, id: &str) -> Result<()> {
    if changed == 0 {
        bail!("{} {} not found", what, id);
    }
    Ok(())
}

fn touch_entry(conn: &Connection, entry_id: &str, now: &str) -> Result<()> {
    let changed = conn.execute(
        "UPDATE user_podcasts SET updated_at = ? WHERE id = ?",
        params![now, entry_id],
    )?;
    ensure_changed(changed, "library entry", entry_id)
}

fn custom_rating_owner(conn: &Connection, rating_id: &str) -> Result<String> {
    let owner: Option<String> = conn
        .query_row(
            "SELECT user_podcast_id FROM custom_ratings WHERE id = ?",
            params![rating_id],
            |row| row.get(0),
        )
        .optional()?;
    owner.ok_or_else(|| anyhow!("custom rating {} not found", rating_id))
}

fn podcast_from_row(row: &Row, base: usize) -> rusqlite::Result<Podcast> {
    Ok(Podcast {
        id: row.get(base)?,
        itunes_id: row.get(base + 1)?,
        title: row.get(base + 2)?,
        author: row.get(base + 3)?,
        artwork_url: row.get(base + 4)?,
        feed_url: row.get(base + 5)?,
        itunes_url: row.get(base + 6)?,
        artist_url: row.get(base + 7)?,
        created_at: parse_timestamp(row, base + 8)?,
    })
}

fn profile_from_row(row: &Row, base: usize) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(base)?,
        username: row.get(base + 1)?,
        display_name: row.get(base + 2)?,
        avatar_url: row.get(base + 3)?,
        created_at: parse_timestamp(row, base + 4)?,
    })
}

fn entry_from_row(row: &Row) -> rusqlite::Result<LibraryEntry> {
    Ok(LibraryEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        podcast_id: row.get(2)?,
        overall_rating: row.get(3)?,
        review_text: row.get(4)?,
        is_favorite: row.get::<_, i32>(5)? == 1,
        created_at: parse_timestamp(row, 6)?,
        updated_at: parse_timestamp(row, 7)?,
        podcast: Some(podcast_from_row(row, 8)?),
        custom_ratings: Vec::new(),
        favorite_episodes: Vec::new(),
        profile: Some(profile_from_row(row, 17)?),
    })
}

/// Load custom ratings and favorite episodes for each entry, in insertion
/// order.
fn attach_children(conn: &Connection, entries: &mut [LibraryEntry]) -> Result<()> {
    let mut ratings_stmt = conn.prepare(&format!(
        "SELECT {} FROM custom_ratings WHERE user_podcast_id = ? ORDER BY rowid",
        CUSTOM_RATING_COLUMNS
    ))?;
    let mut episodes_stmt = conn.prepare(&format!(
        "SELECT {} FROM favorite_episodes WHERE user_podcast_id = ? ORDER BY rowid",
        FAVORITE_EPISODE_COLUMNS
    ))?;

    for entry in entries.iter_mut() {
        entry.custom_ratings = ratings_stmt
            .query_map(params![entry.id], custom_rating_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        entry.favorite_episodes = episodes_stmt
            .query_map(params![entry.id], favorite_episode_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
    }
    Ok(())
}

fn custom_rating_from_row(row: &Row) -> rusqlite::Result<CustomRating> {
    Ok(CustomRating {
        id: row.get(0)?,
        user_podcast_id: row.get(1)?,
        category_name: row.get(2)?,
        rating: row.get(3)?,
    })
}

fn favorite_episode_from_row(row: &Row) -> rusqlite::Result<FavoriteEpisode> {
    Ok(FavoriteEpisode {
        id: row.get(0)?,
        user_podcast_id: row.get(1)?,
        episode_title: row.get(2)?,
        episode_number: row.get(3)?,
        notes: row.get(4)?,
        created_at: parse_timestamp(row, 5)?,
    })
}
