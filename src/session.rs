//! Session facade: connection lifecycle plus the natural-query pipeline
//!
//! A [`Session`] owns the one DuckDB connection for its whole lifetime and
//! composes the pipeline stages into a single call:
//! introspect schema → build prompt → generate SQL (remote) → execute.
//! Each stage either succeeds and hands off or fails and aborts the chain
//! with its own error kind; there is no retry and no partial result.
//!
//! A session is not safe for concurrent callers: there is one connection
//! and no locking. `natural_query` takes `&mut self` so two in-flight calls
//! on the same session cannot compile, and `duckdb::Connection` keeps the
//! whole type `!Sync`.

use std::path::Path;

use duckdb::Connection;

use crate::catalog::SchemaDescription;
use crate::error::{Error, Result};
use crate::exec::{self, QueryResult};
use crate::llm::{OpenAiGenerator, SqlGenerator};
use crate::prompt::build_prompt;

/// The natural-language query session.
pub struct Session {
    conn: Option<Connection>,
    generator: Box<dyn SqlGenerator>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Open a session on the database at `db_path`, generating SQL through
    /// the OpenAI API with the given key and default model settings.
    pub fn open(api_key: impl Into<String>, db_path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(db_path, Box::new(OpenAiGenerator::new(api_key)))
    }

    /// Open a session with a caller-supplied generator. This is the seam
    /// tests use to substitute a deterministic stub for the network call.
    pub fn open_with(
        db_path: impl AsRef<Path>,
        generator: Box<dyn SqlGenerator>,
    ) -> Result<Self> {
        let path = db_path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            Error::Connection(format!("cannot open database {}: {}", path.display(), e))
        })?;

        Ok(Session {
            conn: Some(conn),
            generator,
        })
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(Error::closed)
    }

    /// Borrow the underlying connection, e.g. to seed tables.
    pub fn connection(&self) -> Result<&Connection> {
        self.conn()
    }

    /// Read a fresh snapshot of the database schema.
    pub fn describe_schema(&self) -> Result<SchemaDescription> {
        SchemaDescription::from_connection(self.conn()?)
    }

    /// Translate `user_query` to SQL via the remote service and execute it.
    ///
    /// The generated SQL runs verbatim: it is not validated, not sanitized,
    /// and not restricted by statement type, so a generated `DROP TABLE`
    /// would execute. An empty generation is rejected before execution with
    /// [`Error::RemoteService`].
    pub async fn natural_query(&mut self, user_query: &str) -> Result<QueryResult> {
        let schema = self.describe_schema()?;
        let prompt = build_prompt(&schema.to_prompt_text(), user_query);

        tracing::debug!(query = user_query, "requesting SQL generation");
        let sql = self.generator.generate_sql(&prompt).await?;
        if sql.is_empty() {
            return Err(Error::RemoteService(
                "service returned an empty SQL string".to_string(),
            ));
        }
        tracing::info!(%sql, "executing generated SQL");

        let result = exec::run_sql(self.conn()?, &sql)?;
        tracing::debug!(rows = result.row_count, "query complete");
        Ok(result)
    }

    /// Release the connection. Idempotent: closing an already-closed
    /// session is a no-op. Every other operation on a closed session fails
    /// with [`Error::Connection`].
    pub fn close(&mut self) {
        if self.conn.take().is_some() {
            tracing::debug!("session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }
}
