//! Per-request SQLite connection handling and row serialization.
//!
//! Every operation opens its own connection and releases it before
//! returning; nothing is held across requests. Queries run over a
//! read-only handle so the engine itself rejects writes.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value as JsonValue;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteRow},
    Connection, Row, SqliteConnection, TypeInfo, ValueRef,
};

use crate::StoreError;

/// Seed schema applied by the startup hook. Arbitrary SQL may alter the
/// table afterwards; nothing re-checks it once the service is up.
const NOTE_TABLE_SQL: &str = "create table if not exists Note(AddedWhen text, Body text);";

/// Handle naming the database file.
///
/// Constructed once at startup and shared behind `Arc`; each operation
/// opens and closes its own connection.
#[derive(Debug, Clone)]
pub struct SqlStore {
    path: PathBuf,
}

impl SqlStore {
    /// Create a store for the database file at `path`. No connection is
    /// opened until an operation runs.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The database file this store points at.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the `Note` table if it does not exist yet, creating the
    /// database file as needed.
    ///
    /// Safe to run repeatedly: an existing table and its rows are left
    /// untouched.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the file cannot be created or the DDL
    /// fails.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let mut conn = self.open_read_write().await?;
        let applied = sqlx::Executor::execute(&mut conn, sqlx::raw_sql(NOTE_TABLE_SQL)).await;
        let closed = conn.close().await;
        applied?;
        closed?;
        tracing::debug!(path = %self.path.display(), "schema ensured");
        Ok(())
    }

    /// Run `sql` over a read-only handle and return every resulting row.
    ///
    /// The string reaches the driver verbatim: no binds, no validation.
    /// Writes fail inside the engine because the handle is opened
    /// `SQLITE_OPEN_READONLY`.
    ///
    /// # Errors
    /// Returns [`StoreError`] for any driver failure, including a write
    /// attempted over the read-only handle and a missing database file.
    pub async fn query(&self, sql: &str) -> Result<Vec<Vec<JsonValue>>, StoreError> {
        let mut conn = self.open_read_only().await?;
        let fetched = sqlx::Executor::fetch_all(&mut conn, sqlx::raw_sql(sql)).await;
        // Release the handle before inspecting the result so a failed
        // statement still closes its connection.
        let closed = conn.close().await;
        let rows = fetched?;
        closed?;
        rows.iter().map(row_values).collect()
    }

    /// Run `sql` over a read-write handle without fetching rows.
    ///
    /// Autocommit applies the statement before the connection is released.
    ///
    /// # Errors
    /// Returns [`StoreError`] for any driver failure.
    pub async fn execute(&self, sql: &str) -> Result<(), StoreError> {
        let mut conn = self.open_read_write().await?;
        let applied = sqlx::Executor::execute(&mut conn, sqlx::raw_sql(sql)).await;
        let closed = conn.close().await;
        applied?;
        closed?;
        Ok(())
    }

    async fn open_read_only(&self) -> Result<SqliteConnection, StoreError> {
        let options = self.base_options().read_only(true);
        Ok(SqliteConnection::connect_with(&options).await?)
    }

    async fn open_read_write(&self) -> Result<SqliteConnection, StoreError> {
        let options = self.base_options().create_if_missing(true);
        Ok(SqliteConnection::connect_with(&options).await?)
    }

    fn base_options(&self) -> SqliteConnectOptions {
        // Pin the rollback journal: the database stays a single file, and a
        // journal-mode switch cannot be applied over a read-only handle.
        SqliteConnectOptions::new()
            .filename(&self.path)
            .journal_mode(SqliteJournalMode::Delete)
    }
}

/// Serialize one row into JSON cell values.
///
/// Storage classes map as: NULL to null, INTEGER to number, REAL to
/// number, TEXT to string, BLOB to standard base64.
fn row_values(row: &SqliteRow) -> Result<Vec<JsonValue>, StoreError> {
    let mut cells = Vec::with_capacity(row.len());
    for idx in 0..row.len() {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            cells.push(JsonValue::Null);
            continue;
        }
        let ty = raw.type_info().name().to_owned();
        let cell = match ty.as_str() {
            "INTEGER" => JsonValue::from(row.try_get::<i64, _>(idx)?),
            "REAL" => real_cell(row.try_get::<f64, _>(idx)?),
            "BLOB" => JsonValue::String(BASE64.encode(row.try_get::<Vec<u8>, _>(idx)?)),
            _ => JsonValue::String(row.try_get::<String, _>(idx)?),
        };
        cells.push(cell);
    }
    Ok(cells)
}

/// REAL cells become JSON numbers; JSON has no NaN or Infinity, so
/// non-finite values become null.
fn real_cell(value: f64) -> JsonValue {
    serde_json::Number::from_f64(value).map_or(JsonValue::Null, JsonValue::Number)
}
