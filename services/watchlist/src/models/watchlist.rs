//! Watchlist models for the watchlist service

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::debug;

/// Identifies a movie either by id or by its exact title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieRef {
    ById(i64),
    ByTitle(String),
}

/// Body of `add` and `remove` requests
///
/// `movieId` is kept as raw JSON so that numeric strings are accepted and
/// unusable values fall through to `movieTitle`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistRequest {
    #[serde(default)]
    pub movie_id: Option<serde_json::Value>,
    #[serde(default)]
    pub movie_title: Option<String>,
}

impl WatchlistRequest {
    /// Parse a request body; empty or malformed bodies become an empty request
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }

        serde_json::from_slice(body).unwrap_or_else(|e| {
            debug!("Ignoring unparseable watchlist body: {}", e);
            Self::default()
        })
    }

    /// Pick the movie reference, preferring the id over the title
    pub fn movie_ref(&self) -> Option<MovieRef> {
        let id = self
            .movie_id
            .as_ref()
            .and_then(|value| match value {
                serde_json::Value::Number(n) => n.as_i64().or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                        .map(|f| f as i64)
                }),
                serde_json::Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .filter(|id| *id != 0);

        if let Some(id) = id {
            return Some(MovieRef::ById(id));
        }

        self.movie_title
            .as_ref()
            .filter(|title| !title.is_empty())
            .map(|title| MovieRef::ByTitle(title.clone()))
    }
}

/// A watchlisted movie joined with its category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct WatchlistMovie {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub average_rating: Option<f64>,
    pub duration: Option<NaiveTime>,
    pub release_year: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub category: Option<String>,
}

/// Movie fields emitted only when detailed items are enabled
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetails {
    pub movie_id: i64,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub duration: String,
    pub release_year: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub category: Option<String>,
}

/// One entry of the `get` response
#[derive(Debug, Clone, Serialize)]
pub struct WatchlistItem {
    pub movie_title: String,
    pub added_at: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub details: Option<MovieDetails>,
}

impl WatchlistItem {
    pub fn from_movie(movie: WatchlistMovie, added_at: &str, include_details: bool) -> Self {
        let details = include_details.then(|| MovieDetails {
            movie_id: movie.id,
            description: movie.description,
            rating: movie.average_rating,
            duration: format_duration(movie.duration),
            release_year: movie.release_year,
            thumbnail_url: movie.thumbnail_url,
            category: movie.category,
        });

        Self {
            movie_title: movie.title,
            added_at: added_at.to_string(),
            details,
        }
    }
}

/// Response of the `get` action
#[derive(Debug, Serialize)]
pub struct WatchlistResponse {
    pub watchlist: Vec<WatchlistItem>,
}

/// Render a stored duration as `"2h 5m"`, `"45m"` or `"N/A"`
pub fn format_duration(duration: Option<NaiveTime>) -> String {
    match duration {
        Some(time) if time.hour() > 0 => format!("{}h {}m", time.hour(), time.minute()),
        Some(time) => format!("{}m", time.minute()),
        None => "N/A".to_string(),
    }
}
