//! Task and page-capture persistence
//!
//! This module provides the persisted side of the application: the tracked
//! task list that action items can be promoted into, and the record of
//! analyzed page captures.

mod database;
pub mod error;
mod schema;

pub use database::Database;
pub use error::DbError;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a tracked task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Backlog,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "backlog",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    /// Parse the stored string form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "backlog" => Some(TaskStatus::Backlog),
            "in_progress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

/// Urgency of a tracked task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// Stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    /// Parse the stored string form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

/// A tracked unit of follow-up work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-generated identifier
    pub id: i64,

    /// Short description of the work
    pub title: String,

    /// Lifecycle state
    pub status: TaskStatus,

    /// Urgency
    pub priority: TaskPriority,

    /// Page the task was promoted from, if any
    pub page_url: Option<String>,

    /// Free-form notes
    pub notes: Option<String>,

    /// Creation time in unix seconds
    pub created_at: i64,
}

/// Payload for creating a task; status and priority fall back to
/// `backlog`/`medium` when omitted
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewTask {
    pub title: String,

    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[serde(default)]
    pub priority: Option<TaskPriority>,

    #[serde(default)]
    pub page_url: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update for an existing task; absent fields keep their value
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskPatch {
    pub id: i64,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[serde(default)]
    pub priority: Option<TaskPriority>,

    #[serde(default)]
    pub notes: Option<String>,
}

/// A stored record of one analyzed page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCapture {
    /// Server-generated identifier
    pub id: i64,

    /// Source URL, when the page was fetched rather than pasted
    pub url: Option<String>,

    /// Raw markup that was analyzed
    pub html: String,

    /// Serialized insight derived from the markup
    pub insight: String,

    /// Creation time in unix seconds
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [TaskStatus::Backlog, TaskStatus::InProgress, TaskStatus::Done] {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("archived"), None);
    }

    #[test]
    fn test_priority_round_trip() {
        for priority in [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High] {
            assert_eq!(TaskPriority::parse(priority.as_str()), Some(priority));
        }
        assert_eq!(TaskPriority::parse("urgent"), None);
    }

    #[test]
    fn test_wire_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert!(serde_json::from_str::<TaskStatus>("\"blocked\"").is_err());
    }

    #[test]
    fn test_new_task_rejects_unknown_fields() {
        let payload = r#"{"title": "Follow up", "owner": "someone"}"#;
        assert!(serde_json::from_str::<NewTask>(payload).is_err());

        let payload = r#"{"title": "Follow up", "priority": "high"}"#;
        let new_task = serde_json::from_str::<NewTask>(payload).unwrap();
        assert_eq!(new_task.priority, Some(TaskPriority::High));
        assert_eq!(new_task.status, None);
    }
}
