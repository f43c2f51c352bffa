//! Repositories for database operations

use common::error::DatabaseResult;

use crate::models::watchlist::{MovieRef, WatchlistMovie};

#[cfg(test)]
pub mod memory;
pub mod watchlist;

pub use watchlist::PgWatchlistRepository;

/// Persistence used by the watchlist service
pub trait WatchlistStore: Clone + Send + Sync + 'static {
    /// Movies on the user's watchlist, newest movie id first
    fn list_entries(
        &self,
        user_id: i64,
    ) -> impl Future<Output = DatabaseResult<Vec<WatchlistMovie>>> + Send;

    /// Canonical id of the referenced movie, if it exists
    fn resolve_movie(
        &self,
        movie: &MovieRef,
    ) -> impl Future<Output = DatabaseResult<Option<i64>>> + Send;

    /// Insert a (user, movie) pair; duplicates fail with `UniqueViolation`
    fn insert_entry(
        &self,
        user_id: i64,
        movie_id: i64,
    ) -> impl Future<Output = DatabaseResult<()>> + Send;

    /// Delete the user's entry for the referenced movie, returning rows removed
    fn delete_entry(
        &self,
        user_id: i64,
        movie: &MovieRef,
    ) -> impl Future<Output = DatabaseResult<u64>> + Send;
}
