use compliance_core_api::error::ConflictField;
use thiserror::Error;

/// Error surface of every repository trait.
///
/// Unique-constraint violations come back typed: the backend decides which
/// [`ConflictField`] a violated constraint belongs to (for Postgres, by
/// inspecting the constraint name once, at the storage boundary) instead of
/// leaking a generic database error for the service layer to sniff.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("unique constraint violated on {0}")]
    UniqueViolation(ConflictField),

    #[error("backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        RepositoryError::Backend(err.into())
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
