use thiserror::Error;

/// Errors raised by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The addressed row does not exist.
    #[error("record not found")]
    NotFound,
    /// A stored value violates a domain constraint.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// No connection could be checked out of the pool.
    #[error("connection error: {0}")]
    ConnectionError(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
