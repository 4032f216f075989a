//! End-to-end session tests with stubbed SQL generation
//!
//! The remote completion service is replaced by deterministic stubs behind
//! the `SqlGenerator` seam; DuckDB runs for real against scratch files.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use nlsql::{Error, Result, Session, SqlGenerator};

/// Returns the same SQL for every prompt.
struct FixedSql(&'static str);

#[async_trait]
impl SqlGenerator for FixedSql {
    async fn generate_sql(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Records the prompt it was handed, then returns fixed SQL.
struct RecordingSql {
    sql: &'static str,
    seen_prompt: Arc<Mutex<Option<String>>>,
}

#[async_trait]
impl SqlGenerator for RecordingSql {
    async fn generate_sql(&self, prompt: &str) -> Result<String> {
        *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok(self.sql.to_string())
    }
}

/// Always fails, as a dead network would.
struct FailingGenerator;

#[async_trait]
impl SqlGenerator for FailingGenerator {
    async fn generate_sql(&self, _prompt: &str) -> Result<String> {
        Err(Error::RemoteService("connection refused".to_string()))
    }
}

fn users_session(generator: Box<dyn SqlGenerator>) -> (tempfile::TempDir, Session) {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::open_with(dir.path().join("users.db"), generator).unwrap();
    session
        .connection()
        .unwrap()
        .execute_batch(
            "CREATE TABLE users (id INTEGER, signup_date TEXT);
             INSERT INTO users VALUES
               (1, '2023-06-15'),
               (2, '2024-02-01'),
               (3, '2024-07-20');",
        )
        .unwrap();
    (dir, session)
}

#[tokio::test]
async fn round_trip_returns_matching_rows() {
    let (_dir, mut session) = users_session(Box::new(FixedSql(
        "SELECT id FROM users WHERE signup_date > '2024-01-01';",
    )));

    let result = session
        .natural_query("users who signed up after Jan 2024")
        .await
        .unwrap();

    assert_eq!(result.columns, vec!["id"]);
    assert_eq!(result.row_count, 2);
    assert_eq!(result.rows[0][0], serde_json::json!(2));
    assert_eq!(result.rows[1][0], serde_json::json!(3));
}

#[tokio::test]
async fn result_json_maps_column_names_to_values() {
    let (_dir, mut session) = users_session(Box::new(FixedSql(
        "SELECT id, signup_date FROM users ORDER BY id LIMIT 1",
    )));

    let result = session.natural_query("first signup").await.unwrap();
    let json = result.to_json();

    assert_eq!(json["row_count"], 1);
    assert_eq!(json["rows"][0]["id"], 1);
    assert_eq!(json["rows"][0]["signup_date"], "2023-06-15");
}

#[tokio::test]
async fn empty_generation_is_remote_service_error() {
    let (_dir, mut session) = users_session(Box::new(FixedSql("")));

    let err = session.natural_query("anything").await.unwrap_err();
    assert!(matches!(err, Error::RemoteService(_)));
}

#[tokio::test]
async fn invalid_sql_is_query_execution_error() {
    let (_dir, mut session) = users_session(Box::new(FixedSql("SELEC * FROMM users")));

    let err = session.natural_query("all users").await.unwrap_err();
    assert!(matches!(err, Error::QueryExecution(_)));
}

#[tokio::test]
async fn generator_failure_aborts_before_execution() {
    let (_dir, mut session) = users_session(Box::new(FailingGenerator));

    let err = session.natural_query("all users").await.unwrap_err();
    assert!(matches!(err, Error::RemoteService(_)));
}

#[tokio::test]
async fn empty_query_text_is_forwarded_unchanged() {
    let seen_prompt = Arc::new(Mutex::new(None));
    let generator = RecordingSql {
        sql: "SELECT COUNT(*) AS n FROM users",
        seen_prompt: seen_prompt.clone(),
    };
    let (_dir, mut session) = users_session(Box::new(generator));

    let result = session.natural_query("").await.unwrap();
    assert_eq!(result.row_count, 1);

    // No client-side validation: the empty query is embedded as-is.
    let prompt = seen_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("Convert this natural language query to SQL:\n\n"));
    assert!(prompt.contains("Table: users"));
    assert!(prompt.contains("Return only the SQL query without any explanation."));
}

#[test]
fn schema_text_has_one_header_per_table() {
    let (_dir, session) = users_session(Box::new(FixedSql("SELECT 1")));
    session
        .connection()
        .unwrap()
        .execute_batch("CREATE TABLE purchases (id INTEGER, amount DOUBLE, category VARCHAR);")
        .unwrap();

    let schema = session.describe_schema().unwrap();
    let text = schema.to_prompt_text();

    assert_eq!(text.matches("Table: ").count(), 2);
    assert!(text
        .contains("Table: purchases\nColumns: id (INTEGER), amount (DOUBLE), category (VARCHAR)\n"));
    assert!(text.contains("Table: users\nColumns: id (INTEGER), signup_date (VARCHAR)\n"));
}

#[tokio::test]
async fn close_then_query_is_connection_error() {
    let (_dir, mut session) = users_session(Box::new(FixedSql("SELECT 1")));

    session.close();
    session.close(); // second close is a no-op

    let err = session.natural_query("anything").await.unwrap_err();
    assert!(matches!(err, Error::Connection(_)));
    assert!(matches!(
        session.describe_schema().unwrap_err(),
        Error::Connection(_)
    ));
}
