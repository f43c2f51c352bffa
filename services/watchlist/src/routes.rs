//! Watchlist service routes

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    middleware,
    response::IntoResponse,
    routing::{any, get},
};
use serde_json::json;

use crate::{
    error::ApiError,
    middleware::{AuthContext, auth_middleware},
    models::ActionQuery,
    repositories::WatchlistStore,
    state::AppState,
};

/// Create the router for the watchlist service
pub fn create_router<S: WatchlistStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/watchlist", any(watchlist::<S>))
        .layer(middleware::from_fn_with_state(
            state.jwt.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "watchlist-service"
    }))
}

/// Watchlist endpoint, the operation is picked by `?action=`
///
/// The query string is taken as raw pairs so that no extractor can reject
/// the request before the caller is authorized.
pub async fn watchlist<S: WatchlistStore>(
    State(state): State<AppState<S>>,
    auth: AuthContext,
    Query(pairs): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let query = ActionQuery::from_pairs(pairs);
    state
        .watchlist
        .dispatch(&auth, query.action.as_deref(), &body)
        .await
}
