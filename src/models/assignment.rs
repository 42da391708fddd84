use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::TeamMember;

/// One person's slice of one task. Completion here is independent of the
/// parent task's own status field: several people contribute to a task and
/// each marks their slice done, while the canonical status stays with
/// whoever owns the task.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignment {
    pub id: Uuid,
    pub task_id: Uuid,
    pub team_member_id: Uuid,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub estimated_hours: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentWithMember {
    #[serde(flatten)]
    pub assignment: TaskAssignment,
    pub team_member: TeamMember,
}

#[derive(Debug, Clone, Copy, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSummary {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
}
