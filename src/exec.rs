//! SQL execution against DuckDB
//!
//! Runs the generated SQL text verbatim and materializes every row into
//! JSON values. There is no sanitization and no statement allow-list: what
//! the generator returned is what the engine sees.

use duckdb::types::ValueRef;
use duckdb::Connection;
use serde_json::json;

use crate::error::{Error, Result};

/// Materialized result of one executed statement.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
    pub row_count: usize,
}

impl QueryResult {
    /// Render as a JSON object with `columns`, `rows` (one object per row,
    /// column name to value), and `row_count`.
    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|row| {
                let mut obj = serde_json::Map::new();
                for (i, col_name) in self.columns.iter().enumerate() {
                    if let Some(value) = row.get(i) {
                        obj.insert(col_name.clone(), value.clone());
                    }
                }
                serde_json::Value::Object(obj)
            })
            .collect();

        json!({
            "columns": self.columns,
            "rows": rows,
            "row_count": self.row_count,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Execute `sql` on `conn` and collect every row.
///
/// Column names come from row metadata, so a statement that yields zero
/// rows reports an empty column list. Any engine error maps to
/// [`Error::QueryExecution`].
pub fn run_sql(conn: &Connection, sql: &str) -> Result<QueryResult> {
    let mut stmt = conn.prepare(sql).map_err(Error::QueryExecution)?;
    let mut rows = stmt.query([]).map_err(Error::QueryExecution)?;

    let mut columns: Vec<String> = Vec::new();
    let mut result_rows = Vec::new();

    while let Some(row) = rows.next().map_err(Error::QueryExecution)? {
        if columns.is_empty() {
            let meta = row.as_ref();
            for i in 0..meta.column_count() {
                let name = meta
                    .column_name(i)
                    .map_err(Error::QueryExecution)?
                    .to_string();
                columns.push(name);
            }
        }

        let mut values = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            let value_ref = row.get_ref(i).map_err(Error::QueryExecution)?;
            values.push(value_to_json(value_ref));
        }
        result_rows.push(values);
    }

    let row_count = result_rows.len();
    Ok(QueryResult {
        columns,
        rows: result_rows,
        row_count,
    })
}

fn value_to_json(value: ValueRef<'_>) -> serde_json::Value {
    match value {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(i) => json!(i),
        ValueRef::SmallInt(i) => json!(i),
        ValueRef::Int(i) => json!(i),
        ValueRef::BigInt(i) => json!(i),
        ValueRef::HugeInt(i) => json!(i),
        ValueRef::UTinyInt(i) => json!(i),
        ValueRef::USmallInt(i) => json!(i),
        ValueRef::UInt(i) => json!(i),
        ValueRef::UBigInt(i) => json!(i),
        ValueRef::Float(f) => json!(f),
        ValueRef::Double(f) => json!(f),
        ValueRef::Text(s) => {
            serde_json::Value::String(String::from_utf8_lossy(s).to_string())
        }
        ValueRef::Blob(b) => serde_json::Value::String(format!("<blob {} bytes>", b.len())),
        _ => serde_json::Value::String("<unsupported>".to_string()),
    }
}
