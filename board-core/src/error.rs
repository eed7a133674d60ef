use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the database layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid stored data: {0}")]
    InvalidData(String),

    #[error("database connection lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Maps SQLite constraint violations to [`StoreError::Conflict`].
    pub(crate) fn from_insert(err: rusqlite::Error, what: impl Into<String>) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Conflict(what.into())
            }
            other => StoreError::Sqlite(other),
        }
    }
}
