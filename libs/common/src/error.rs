//! Database error types shared by every PostgreSQL-backed store

use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The pool could not open or keep a connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Schema creation failed at start-up
    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Whether the failure means the server could not be reached at all, as
    /// opposed to a statement being rejected
    pub fn is_unreachable(&self) -> bool {
        match self {
            DatabaseError::Connection(_) => true,
            DatabaseError::Query(err) => matches!(
                err,
                SqlxError::Io(_) | SqlxError::PoolTimedOut | SqlxError::PoolClosed
            ),
            DatabaseError::Migration(_) | DatabaseError::Configuration(_) => false,
        }
    }
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
