//! Watchlist operations behind the `/watchlist` endpoint

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthContext,
    models::{
        Action, SuccessResponse,
        watchlist::{MovieRef, WatchlistItem, WatchlistRequest, WatchlistResponse},
    },
    repositories::WatchlistStore,
};

const MOVIE_REQUIRED: &str = "Movie ID or title is required";

/// Outcome of a dispatched action
#[derive(Debug)]
pub enum WatchlistReply {
    List(WatchlistResponse),
    Success,
}

impl IntoResponse for WatchlistReply {
    fn into_response(self) -> Response {
        match self {
            WatchlistReply::List(list) => Json(list).into_response(),
            WatchlistReply::Success => Json(SuccessResponse::ok()).into_response(),
        }
    }
}

#[derive(Clone)]
pub struct WatchlistService<S> {
    store: S,
    include_details: bool,
}

impl<S: WatchlistStore> WatchlistService<S> {
    pub fn new(store: S, include_details: bool) -> Self {
        Self {
            store,
            include_details,
        }
    }

    /// Authorize the caller, then run the requested action
    pub async fn dispatch(
        &self,
        auth: &AuthContext,
        action: Option<&str>,
        body: &[u8],
    ) -> ApiResult<WatchlistReply> {
        let user_id = auth.require_user()?;
        let action: Action = action.unwrap_or_default().parse()?;

        match action {
            Action::Get => self.get(user_id).await.map(WatchlistReply::List),
            Action::Add => {
                let movie = Self::movie_ref(body)?;
                self.add(user_id, &movie).await?;
                Ok(WatchlistReply::Success)
            }
            Action::Remove => {
                let movie = Self::movie_ref(body)?;
                self.remove(user_id, &movie).await?;
                Ok(WatchlistReply::Success)
            }
        }
    }

    fn movie_ref(body: &[u8]) -> ApiResult<MovieRef> {
        WatchlistRequest::from_body(body)
            .movie_ref()
            .ok_or_else(|| ApiError::BadRequest(MOVIE_REQUIRED.to_string()))
    }

    pub async fn get(&self, user_id: i64) -> ApiResult<WatchlistResponse> {
        let movies = self.store.list_entries(user_id).await.map_err(|e| {
            error!("Failed to load watchlist for user {}: {}", user_id, e);
            ApiError::Internal("Failed to load watchlist".to_string())
        })?;

        // No insertion time is stored, so every item reports the request time
        let added_at = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let watchlist = movies
            .into_iter()
            .map(|movie| WatchlistItem::from_movie(movie, &added_at, self.include_details))
            .collect();

        Ok(WatchlistResponse { watchlist })
    }

    pub async fn add(&self, user_id: i64, movie: &MovieRef) -> ApiResult<()> {
        let movie_id = self
            .store
            .resolve_movie(movie)
            .await
            .map_err(|e| {
                error!("Failed to resolve movie {:?}: {}", movie, e);
                ApiError::Internal("Failed to add movie to watchlist".to_string())
            })?
            .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;

        self.store
            .insert_entry(user_id, movie_id)
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    ApiError::Conflict("Movie already in watchlist".to_string())
                } else {
                    error!("Failed to add movie {} for user {}: {}", movie_id, user_id, e);
                    ApiError::Internal("Failed to add movie to watchlist".to_string())
                }
            })?;

        info!("User {} added movie {} to watchlist", user_id, movie_id);
        Ok(())
    }

    /// Remove a movie; succeeds whether or not it was on the watchlist
    pub async fn remove(&self, user_id: i64, movie: &MovieRef) -> ApiResult<()> {
        let removed = self
            .store
            .delete_entry(user_id, movie)
            .await
            .map_err(|e| {
                error!("Failed to remove movie {:?} for user {}: {}", movie, user_id, e);
                ApiError::Internal("Failed to remove movie from watchlist".to_string())
            })?;

        info!(
            "User {} removed movie {:?} from watchlist ({} rows)",
            user_id, movie, removed
        );
        Ok(())
    }
}
