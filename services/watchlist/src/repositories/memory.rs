//! In-memory watchlist store used by the service and router tests

use common::error::{DatabaseError, DatabaseResult};
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, Mutex, MutexGuard},
};

use super::WatchlistStore;
use crate::models::watchlist::{MovieRef, WatchlistMovie};

#[derive(Default)]
struct Inner {
    movies: BTreeMap<i64, WatchlistMovie>,
    entries: BTreeSet<(i64, i64)>,
    fail_writes: bool,
}

#[derive(Clone, Default)]
pub struct InMemoryWatchlistStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryWatchlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("store mutex poisoned")
    }

    /// Add a movie to the catalog
    pub fn with_movie(self, id: i64, title: &str) -> Self {
        self.lock().movies.insert(
            id,
            WatchlistMovie {
                id,
                title: title.to_string(),
                description: None,
                average_rating: None,
                duration: None,
                release_year: None,
                thumbnail_url: None,
                category: None,
            },
        );
        self
    }

    /// Make every insert and delete fail with a generic query error
    pub fn failing_writes(self) -> Self {
        self.lock().fail_writes = true;
        self
    }

    pub fn entries(&self) -> Vec<(i64, i64)> {
        self.lock().entries.iter().copied().collect()
    }

    fn find(inner: &Inner, movie: &MovieRef) -> Option<i64> {
        match movie {
            MovieRef::ById(id) => inner.movies.contains_key(id).then_some(*id),
            MovieRef::ByTitle(title) => inner
                .movies
                .values()
                .find(|m| &m.title == title)
                .map(|m| m.id),
        }
    }
}

impl WatchlistStore for InMemoryWatchlistStore {
    async fn list_entries(&self, user_id: i64) -> DatabaseResult<Vec<WatchlistMovie>> {
        let inner = self.lock();
        Ok(inner
            .entries
            .iter()
            .rev()
            .filter(|(user, _)| *user == user_id)
            .filter_map(|(_, movie_id)| inner.movies.get(movie_id).cloned())
            .collect())
    }

    async fn resolve_movie(&self, movie: &MovieRef) -> DatabaseResult<Option<i64>> {
        Ok(Self::find(&self.lock(), movie))
    }

    async fn insert_entry(&self, user_id: i64, movie_id: i64) -> DatabaseResult<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(DatabaseError::Query(sqlx::Error::PoolTimedOut));
        }
        if !inner.entries.insert((user_id, movie_id)) {
            return Err(DatabaseError::UniqueViolation(sqlx::Error::Protocol(
                "duplicate key value violates unique constraint".to_string(),
            )));
        }
        Ok(())
    }

    async fn delete_entry(&self, user_id: i64, movie: &MovieRef) -> DatabaseResult<u64> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(DatabaseError::Query(sqlx::Error::PoolTimedOut));
        }
        let movie_ids: Vec<i64> = match movie {
            MovieRef::ById(id) => vec![*id],
            // Every movie carrying the title, like the joined DELETE
            MovieRef::ByTitle(title) => inner
                .movies
                .values()
                .filter(|m| &m.title == title)
                .map(|m| m.id)
                .collect(),
        };

        let removed = movie_ids
            .into_iter()
            .filter(|movie_id| inner.entries.remove(&(user_id, *movie_id)))
            .count();
        Ok(removed as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_by_title_covers_every_matching_movie() {
        let store = InMemoryWatchlistStore::new()
            .with_movie(1, "Solaris")
            .with_movie(2, "Solaris")
            .with_movie(3, "Stalker");

        for movie_id in [1, 2, 3] {
            store.insert_entry(5, movie_id).await.unwrap();
        }
        store.insert_entry(6, 1).await.unwrap();

        let removed = store
            .delete_entry(5, &MovieRef::ByTitle("Solaris".to_string()))
            .await
            .unwrap();

        assert_eq!(removed, 2);
        assert_eq!(store.entries(), vec![(5, 3), (6, 1)]);
    }

    #[tokio::test]
    async fn test_resolve_title_picks_lowest_id() {
        let store = InMemoryWatchlistStore::new()
            .with_movie(8, "Solaris")
            .with_movie(4, "Solaris");

        let id = store
            .resolve_movie(&MovieRef::ByTitle("Solaris".to_string()))
            .await
            .unwrap();
        assert_eq!(id, Some(4));
    }
}
