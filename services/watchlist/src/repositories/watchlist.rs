//! Watchlist repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Postgres};

use super::WatchlistStore;
use crate::models::watchlist::{MovieRef, WatchlistMovie};

/// PostgreSQL-backed watchlist repository
#[derive(Clone)]
pub struct PgWatchlistRepository {
    pool: PgPool,
}

impl PgWatchlistRepository {
    /// Create a new watchlist repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl WatchlistStore for PgWatchlistRepository {
    async fn list_entries(&self, user_id: i64) -> DatabaseResult<Vec<WatchlistMovie>> {
        sqlx::query_as::<_, WatchlistMovie>(
            r#"
            SELECT m.id, m.title, m.description, m.average_rating, m.duration,
                   m.release_year, m.thumbnail_url, c.label AS category
            FROM watchlist w
            JOIN movies m ON w.movie_id = m.id
            LEFT JOIN categories c ON m.category_id = c.id
            WHERE w.user_id = $1
            ORDER BY m.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn resolve_movie(&self, movie: &MovieRef) -> DatabaseResult<Option<i64>> {
        let query = match movie {
            MovieRef::ById(id) => {
                sqlx::query_scalar::<Postgres, i64>("SELECT id FROM movies WHERE id = $1").bind(*id)
            }
            MovieRef::ByTitle(title) => sqlx::query_scalar::<Postgres, i64>(
                "SELECT id FROM movies WHERE title = $1 ORDER BY id LIMIT 1",
            )
            .bind(title.as_str()),
        };

        query
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)
    }

    async fn insert_entry(&self, user_id: i64, movie_id: i64) -> DatabaseResult<()> {
        sqlx::query("INSERT INTO watchlist (user_id, movie_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(movie_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        Ok(())
    }

    async fn delete_entry(&self, user_id: i64, movie: &MovieRef) -> DatabaseResult<u64> {
        let query = match movie {
            MovieRef::ById(id) => sqlx::query::<Postgres>(
                "DELETE FROM watchlist WHERE user_id = $1 AND movie_id = $2",
            )
            .bind(user_id)
            .bind(*id),
            MovieRef::ByTitle(title) => sqlx::query::<Postgres>(
                r#"
                DELETE FROM watchlist w
                USING movies m
                WHERE w.movie_id = m.id AND w.user_id = $1 AND m.title = $2
                "#,
            )
            .bind(user_id)
            .bind(title.as_str()),
        };

        let result = query
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        Ok(result.rows_affected())
    }
}
