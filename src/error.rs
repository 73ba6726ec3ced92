use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Storage layer errors, returned to the caller as is.
#[derive(Error, Debug)]
pub enum Error {
    /// Connection string or seed file is missing or can't be parsed.
    #[error("configuration: {0}")]
    Configuration(String),

    /// Store is unreachable, rejected the handle or failed to begin or commit.
    #[error("connection: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("query: {0}")]
    Query(#[from] sqlx::Error),
}
