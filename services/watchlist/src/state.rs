//! Application state shared across handlers

use std::sync::Arc;

use crate::{middleware::JwtConfig, service::WatchlistService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState<S> {
    pub watchlist: WatchlistService<S>,
    pub jwt: Arc<JwtConfig>,
}
