//! nlsql - natural language to SQL over DuckDB
//!
//! A minimal bridge from plain-language questions to tabular results: the
//! database schema and the question go to a hosted chat-completion model,
//! the returned SQL string runs verbatim against a local DuckDB file, and
//! the rows come back as a [`QueryResult`].
//!
//! The whole pipeline is one straight line per call, owned by a
//! [`Session`]:
//!
//! ```rust,no_run
//! use nlsql::Session;
//!
//! # async fn demo() -> Result<(), nlsql::Error> {
//! let mut session = Session::open("sk-...", "database.db")?;
//! let result = session.natural_query("users who signed up after Jan 2024").await?;
//! println!("{}", result.to_json());
//! session.close();
//! # Ok(())
//! # }
//! ```
//!
//! The generated SQL is trusted verbatim; see [`Session::natural_query`]
//! for the implications. The remote call is abstracted behind
//! [`SqlGenerator`] so tests can substitute a deterministic stub.

pub mod catalog;
pub mod config;
pub mod error;
pub mod exec;
pub mod llm;
pub mod logging;
pub mod prompt;
pub mod session;

pub use catalog::{ColumnSchema, SchemaDescription, TableSchema};
pub use config::{Config, LlmConfig};
pub use error::{Error, Result};
pub use exec::QueryResult;
pub use llm::{OpenAiGenerator, SqlGenerator};
pub use prompt::build_prompt;
pub use session::Session;
