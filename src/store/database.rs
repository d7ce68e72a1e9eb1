//! Database operations for the store module

use crate::store::error::DbError;
use crate::store::schema;
use crate::store::{NewTask, PageCapture, Task, TaskPatch, TaskPriority, TaskStatus};
use libsql::{Connection, Row, params};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, instrument};

/// Database manager for tasks and page captures
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database manager
    #[instrument(skip(conn))]
    pub async fn new(conn: Connection) -> Result<Self, DbError> {
        // Initialize schema
        schema::initialize_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Create a new database manager from a path
    pub async fn new_from_path(path: &str) -> Result<Self, DbError> {
        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DbError::Connection(format!("Failed to open database: {}", e)))?;

        let conn = db
            .connect()
            .map_err(|e| DbError::Connection(format!("Failed to connect to database: {}", e)))?;

        Self::new(conn).await
    }

    /// List all tasks, newest first
    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> Result<Vec<Task>, DbError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, title, status, priority, page_url, notes, created_at
             FROM tasks
             ORDER BY created_at DESC, id DESC",
                params![],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to list tasks: {}", e)))?;

        let mut tasks = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            tasks.push(row_to_task(&row)?);
        }

        Ok(tasks)
    }

    /// Get a task by id
    pub async fn get_task(&self, id: i64) -> Result<Option<Task>, DbError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, title, status, priority, page_url, notes, created_at
             FROM tasks
             WHERE id = ?",
                params![id],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to get task: {}", e)))?;

        match rows.next().await {
            Ok(Some(row)) => Ok(Some(row_to_task(&row)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(DbError::Data(format!("Failed to get task: {}", e))),
        }
    }

    /// Create a task and return the stored row
    #[instrument(skip(self, new_task), fields(title = new_task.title))]
    pub async fn create_task(&self, new_task: NewTask) -> Result<Task, DbError> {
        let status = new_task.status.unwrap_or(TaskStatus::Backlog);
        let priority = new_task.priority.unwrap_or(TaskPriority::Medium);

        self.conn
            .execute(
                "INSERT INTO tasks (title, status, priority, page_url, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
                params![
                    new_task.title,
                    status.as_str(),
                    priority.as_str(),
                    new_task.page_url,
                    new_task.notes,
                    unix_now(),
                ],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to create task: {}", e)))?;

        let id = self.last_insert_id().await?;
        debug!("Created task {}", id);

        self.get_task(id)
            .await?
            .ok_or_else(|| DbError::Data(format!("Created task {} not found", id)))
    }

    /// Apply a partial update to a task and return the updated row
    #[instrument(skip(self, patch), fields(id = patch.id))]
    pub async fn update_task(&self, patch: TaskPatch) -> Result<Task, DbError> {
        let existing = self
            .get_task(patch.id)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("No task with id {}", patch.id)))?;

        let title = patch.title.unwrap_or(existing.title);
        let status = patch.status.unwrap_or(existing.status);
        let priority = patch.priority.unwrap_or(existing.priority);
        let notes = patch.notes.or(existing.notes);

        self.conn
            .execute(
                "UPDATE tasks SET title = ?, status = ?, priority = ?, notes = ? WHERE id = ?",
                params![title, status.as_str(), priority.as_str(), notes, patch.id],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to update task: {}", e)))?;

        self.get_task(patch.id)
            .await?
            .ok_or_else(|| DbError::Data(format!("Updated task {} not found", patch.id)))
    }

    /// Delete a task; returns whether a row was removed
    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: i64) -> Result<bool, DbError> {
        let affected = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?", params![id])
            .await
            .map_err(|e| DbError::Query(format!("Failed to delete task: {}", e)))?;

        Ok(affected > 0)
    }

    /// Record an analyzed page capture and return its id
    #[instrument(skip(self, html, insight), fields(html_len = html.len()))]
    pub async fn record_capture(
        &self,
        url: Option<&str>,
        html: &str,
        insight: &str,
    ) -> Result<i64, DbError> {
        self.conn
            .execute(
                "INSERT INTO page_captures (url, html, insight, created_at)
             VALUES (?, ?, ?, ?)",
                params![url, html, insight, unix_now()],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to record capture: {}", e)))?;

        self.last_insert_id().await
    }

    /// List recent page captures, newest first
    pub async fn list_captures(&self, limit: usize) -> Result<Vec<PageCapture>, DbError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, url, html, insight, created_at
             FROM page_captures
             ORDER BY created_at DESC, id DESC
             LIMIT ?",
                params![limit as i64],
            )
            .await
            .map_err(|e| DbError::Query(format!("Failed to list captures: {}", e)))?;

        let mut captures = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            captures.push(row_to_capture(&row)?);
        }

        Ok(captures)
    }

    /// Get the id assigned by the most recent insert
    async fn last_insert_id(&self) -> Result<i64, DbError> {
        let mut rows = self
            .conn
            .query("SELECT last_insert_rowid()", params![])
            .await
            .map_err(|e| DbError::Query(format!("Failed to get last insert ID: {}", e)))?;

        let row = match rows.next().await {
            Ok(Some(row)) => row,
            Ok(None) => {
                return Err(DbError::Data(
                    "No ID returned from last_insert_rowid()".to_string(),
                ));
            }
            Err(e) => return Err(DbError::Data(format!("Failed to get ID: {}", e))),
        };

        row.get(0)
            .map_err(|e| DbError::Data(format!("Failed to get ID: {}", e)))
    }
}

/// Current time in unix seconds
fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// Convert a database row to a Task
fn row_to_task(row: &Row) -> Result<Task, DbError> {
    let status: String = row
        .get(2)
        .map_err(|e| DbError::Data(format!("Failed to get status: {}", e)))?;
    let priority: String = row
        .get(3)
        .map_err(|e| DbError::Data(format!("Failed to get priority: {}", e)))?;

    Ok(Task {
        id: row
            .get(0)
            .map_err(|e| DbError::Data(format!("Failed to get id: {}", e)))?,
        title: row
            .get(1)
            .map_err(|e| DbError::Data(format!("Failed to get title: {}", e)))?,
        status: TaskStatus::parse(&status)
            .ok_or_else(|| DbError::Data(format!("Unknown task status: {}", status)))?,
        priority: TaskPriority::parse(&priority)
            .ok_or_else(|| DbError::Data(format!("Unknown task priority: {}", priority)))?,
        page_url: row
            .get(4)
            .map_err(|e| DbError::Data(format!("Failed to get page_url: {}", e)))?,
        notes: row
            .get(5)
            .map_err(|e| DbError::Data(format!("Failed to get notes: {}", e)))?,
        created_at: row
            .get(6)
            .map_err(|e| DbError::Data(format!("Failed to get created_at: {}", e)))?,
    })
}

/// Convert a database row to a PageCapture
fn row_to_capture(row: &Row) -> Result<PageCapture, DbError> {
    Ok(PageCapture {
        id: row
            .get(0)
            .map_err(|e| DbError::Data(format!("Failed to get id: {}", e)))?,
        url: row
            .get(1)
            .map_err(|e| DbError::Data(format!("Failed to get url: {}", e)))?,
        html: row
            .get(2)
            .map_err(|e| DbError::Data(format!("Failed to get html: {}", e)))?,
        insight: row
            .get(3)
            .map_err(|e| DbError::Data(format!("Failed to get insight: {}", e)))?,
        created_at: row
            .get(4)
            .map_err(|e| DbError::Data(format!("Failed to get created_at: {}", e)))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    async fn setup_test_db() -> Result<(Database, tempfile::TempDir), DbError> {
        // Create a temporary directory for the database
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();

        // Create a new database
        let db = Database::new_from_path(&db_path).await?;

        Ok((db, temp_dir))
    }

    fn sample_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            status: None,
            priority: None,
            page_url: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_database_initialization() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();

        let mut result = db
            .conn
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('tasks', 'page_captures')",
                params![],
            )
            .await
            .unwrap();

        let mut tables = Vec::new();
        while let Ok(Some(row)) = result.next().await {
            let table_name: String = row.get(0).unwrap();
            tables.push(table_name);
        }

        assert_eq!(tables.len(), 2);
        assert!(tables.contains(&"tasks".to_string()));
        assert!(tables.contains(&"page_captures".to_string()));
    }

    #[tokio::test]
    async fn test_create_task_applies_defaults() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();

        let task = db.create_task(sample_task("Review the launch checklist")).await.unwrap();

        assert!(task.id > 0);
        assert_eq!(task.title, "Review the launch checklist");
        assert_eq!(task.status, TaskStatus::Backlog);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.page_url, None);
        assert!(task.created_at > 0);
    }

    #[tokio::test]
    async fn test_create_task_round_trip() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();

        let created = db
            .create_task(NewTask {
                title: "Migrate the database".to_string(),
                status: Some(TaskStatus::InProgress),
                priority: Some(TaskPriority::High),
                page_url: Some("https://ops.example.com/runbooks/billing".to_string()),
                notes: Some("Take a snapshot first".to_string()),
            })
            .await
            .unwrap();

        let fetched = db.get_task(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.status, TaskStatus::InProgress);
        assert_eq!(fetched.priority, TaskPriority::High);
        assert_eq!(
            fetched.page_url.as_deref(),
            Some("https://ops.example.com/runbooks/billing")
        );
    }

    #[tokio::test]
    async fn test_list_tasks_newest_first() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();

        let first = db.create_task(sample_task("First")).await.unwrap();
        let second = db.create_task(sample_task("Second")).await.unwrap();

        let tasks = db.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, second.id);
        assert_eq!(tasks[1].id, first.id);
    }

    #[tokio::test]
    async fn test_update_task_is_partial() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();

        let created = db.create_task(sample_task("Ship the release notes")).await.unwrap();

        let updated = db
            .update_task(TaskPatch {
                id: created.id,
                title: None,
                status: Some(TaskStatus::Done),
                priority: None,
                notes: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.title, "Ship the release notes");
        assert_eq!(updated.status, TaskStatus::Done);
        assert_eq!(updated.priority, created.priority);
    }

    #[tokio::test]
    async fn test_update_unknown_task_is_not_found() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();

        let result = db
            .update_task(TaskPatch {
                id: 4242,
                title: None,
                status: Some(TaskStatus::Done),
                priority: None,
                notes: None,
            })
            .await;

        assert!(matches!(result, Err(DbError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_task() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();

        let created = db.create_task(sample_task("Temporary")).await.unwrap();

        assert!(db.delete_task(created.id).await.unwrap());
        assert!(!db.delete_task(created.id).await.unwrap());
        assert!(db.get_task(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_and_list_captures() {
        let (db, _temp_dir) = setup_test_db().await.unwrap();

        let id = db
            .record_capture(
                Some("https://example.com/post"),
                "<html><body>hello</body></html>",
                r#"{"summary":"hello"}"#,
            )
            .await
            .unwrap();
        assert!(id > 0);

        let captures = db.list_captures(10).await.unwrap();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].url.as_deref(), Some("https://example.com/post"));
        assert_eq!(captures[0].insight, r#"{"summary":"hello"}"#);

        // Pasted markup has no source URL
        let id = db.record_capture(None, "<p>pasted</p>", "{}").await.unwrap();
        assert!(id > 0);
        assert_eq!(db.list_captures(10).await.unwrap().len(), 2);
    }
}
