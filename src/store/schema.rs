//! Database schema for the store module
//!
//! Two tables: `tasks` holds the user-tracked follow-up work, and
//! `page_captures` keeps an insert-only record of analyzed pages with their
//! derived insight. Timestamps are unix seconds.

use crate::store::error::DbError;
use libsql::{Connection, params};

/// Initialize the database schema
pub async fn initialize_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            status TEXT NOT NULL,
            priority TEXT NOT NULL,
            page_url TEXT,
            notes TEXT,
            created_at INTEGER NOT NULL
        )",
        params![],
    )
    .await
    .map_err(|e| DbError::Schema(format!("Failed to create tasks table: {}", e)))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS page_captures (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            url TEXT,
            html TEXT NOT NULL,
            insight TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )",
        params![],
    )
    .await
    .map_err(|e| DbError::Schema(format!("Failed to create page_captures table: {}", e)))?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at)",
        params![],
    )
    .await
    .map_err(|e| DbError::Schema(format!("Failed to create index on tasks: {}", e)))?;

    Ok(())
}
