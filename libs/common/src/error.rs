//! Custom error types for the common library
//!
//! This module defines the persistence error taxonomy shared by the
//! services. Callers distinguish uniqueness violations from every other
//! query failure so they can map duplicates to a conflict.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// A unique constraint rejected the write
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Classify a failed query, separating unique constraint violations
    pub fn from_query(err: SqlxError) -> Self {
        let unique = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());

        if unique {
            DatabaseError::UniqueViolation(err)
        } else {
            DatabaseError::Query(err)
        }
    }

    /// Whether the error was caused by a duplicate key
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DatabaseError::UniqueViolation(_))
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
