use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::duedate::{self, DueParts};

/// Closed status vocabulary for a task. There is no transition graph: any
/// state may move to any other (a completed task can be reopened), so the
/// machine's only job is rejecting unknown values at the write boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Outstanding,
    InProgress,
    NeedsApproval,
    NeedsClarification,
    Completed,
}

impl TaskStatus {
    /// Parse a status written by a caller. The legacy `pending` value still
    /// exists in old rows and old clients; it reads as `outstanding`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "outstanding" => Some(TaskStatus::Outstanding),
            "pending" => Some(TaskStatus::Outstanding),
            "in_progress" => Some(TaskStatus::InProgress),
            "needs_approval" => Some(TaskStatus::NeedsApproval),
            "needs_clarification" => Some(TaskStatus::NeedsClarification),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Outstanding => "outstanding",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::NeedsApproval => "needs_approval",
            TaskStatus::NeedsClarification => "needs_clarification",
            TaskStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            "urgent" => Some(TaskPriority::Urgent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub project_id: Option<Uuid>,
    pub organization_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    /// Wall-clock due date; see `duedate` for why this carries no zone.
    pub due_at: Option<NaiveDateTime>,
    #[serde(rename = "googleDriveLink")]
    pub external_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn due_parts(&self) -> Option<DueParts> {
        self.due_at
            .map(|due| duedate::extract(&due.format("%Y-%m-%d %H:%M:%S").to_string()))
            .and_then(Result::ok)
    }
}

/// A task as the admin UI edits it: the stored row plus the due date broken
/// back out into its form fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        let parts = task.due_parts();
        TaskView {
            due_date: parts.map(|p| p.date_string()),
            due_time: parts.map(|p| p.time_string()),
            task,
        }
    }
}
