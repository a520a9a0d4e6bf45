use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    /// The id resolved outside the configured root.
    #[error("path traversal detected: {0}")]
    PathTraversal(String),

    #[error("stored file not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
