//! Error types for the natural-query pipeline
//!
//! One variant per pipeline stage, so callers can tell where a query died.
//! No stage recovers from another stage's failure and nothing retries; the
//! first error aborts the whole `natural_query` call.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The database could not be opened, or the session is already closed.
    #[error("connection error: {0}")]
    Connection(String),

    /// Reading table/column metadata from the store failed.
    #[error("schema introspection failed: {0}")]
    Storage(duckdb::Error),

    /// The remote completion service failed: transport error, auth error,
    /// or a response with no usable content.
    #[error("remote service error: {0}")]
    RemoteService(String),

    /// The generated SQL was rejected by the database engine.
    #[error("query execution failed: {0}")]
    QueryExecution(duckdb::Error),
}

impl Error {
    /// The error raised by any operation on a closed session.
    pub(crate) fn closed() -> Self {
        Error::Connection("session is closed".to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
