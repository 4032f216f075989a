//! Database schema introspection
//!
//! Builds a fresh, read-only snapshot of the store's tables and columns on
//! every request. Nothing is cached: the snapshot lives exactly as long as
//! the prompt it feeds.

use duckdb::Connection;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One column of a user table: name plus declared type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
}

/// One user table with its columns in storage (ordinal) order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnSchema>,
}

/// Snapshot of every user table in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDescription {
    pub tables: Vec<TableSchema>,
}

impl SchemaDescription {
    /// Read the current schema from an open connection.
    ///
    /// Tables come from `information_schema.tables` (schema `main`, sorted
    /// by name so the rendered prompt is deterministic); columns keep their
    /// `ordinal_position` order.
    pub fn from_connection(conn: &Connection) -> Result<Self> {
        let mut stmt = conn
            .prepare(
                "SELECT table_name FROM information_schema.tables \
                 WHERE table_schema = 'main' ORDER BY table_name",
            )
            .map_err(Error::Storage)?;

        let table_names: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .map_err(Error::Storage)?
            .collect::<duckdb::Result<Vec<_>>>()
            .map_err(Error::Storage)?;

        let mut tables = Vec::with_capacity(table_names.len());
        for name in table_names {
            tables.push(Self::table_schema(conn, &name)?);
        }

        Ok(SchemaDescription { tables })
    }

    fn table_schema(conn: &Connection, table_name: &str) -> Result<TableSchema> {
        let mut stmt = conn
            .prepare(
                "SELECT column_name, data_type \
                 FROM information_schema.columns \
                 WHERE table_name = ? \
                 ORDER BY ordinal_position",
            )
            .map_err(Error::Storage)?;

        let columns: Vec<ColumnSchema> = stmt
            .query_map([table_name], |row| {
                Ok(ColumnSchema {
                    name: row.get(0)?,
                    data_type: row.get(1)?,
                })
            })
            .map_err(Error::Storage)?
            .collect::<duckdb::Result<Vec<_>>>()
            .map_err(Error::Storage)?;

        Ok(TableSchema {
            name: table_name.to_string(),
            columns,
        })
    }

    /// Render the snapshot as the text block the prompt embeds:
    /// one `Table:` header and one `Columns:` line per table, tables
    /// separated by blank lines.
    pub fn to_prompt_text(&self) -> String {
        let blocks: Vec<String> = self
            .tables
            .iter()
            .map(|table| {
                let columns: Vec<String> = table
                    .columns
                    .iter()
                    .map(|col| format!("{} ({})", col.name, col.data_type))
                    .collect();
                format!("Table: {}\nColumns: {}\n", table.name, columns.join(", "))
            })
            .collect();

        blocks.join("\n")
    }
}
