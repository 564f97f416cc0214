//! One-off schema evolution scripts
//!
//! Each script is a fixed, ordered sequence of schema statements. Every
//! step checks the live schema before acting so a re-run (or a resume
//! after a mid-sequence failure) skips completed steps, but the sequence
//! as a whole is not atomic: a statement failure propagates immediately
//! and already-applied steps stay applied. Recovery is restore-from-backup.

pub mod cva_descriptive;
pub mod evaluation_system;

use brewlog_common::Result;
use sqlx::SqlitePool;

/// Check whether a column exists on a table
pub(crate) async fn column_exists(pool: &SqlitePool, table: &str, column: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM pragma_table_info('{}') WHERE name = ?",
        table
    ))
    .bind(column)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Fetch the CREATE TABLE text of a table from sqlite_master
pub(crate) async fn table_sql(pool: &SqlitePool, table: &str) -> Result<String> {
    let sql: Option<String> =
        sqlx::query_scalar("SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(table)
            .fetch_optional(pool)
            .await?;
    sql.ok_or_else(|| brewlog_common::Error::NotFound(format!("table {}", table)))
}
