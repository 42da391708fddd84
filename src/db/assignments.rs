use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{AssignmentSummary, AssignmentWithMember, TaskAssignment, TeamMember};

/// Insert a new assignment row. The UNIQUE (task_id, team_member_id)
/// constraint is the arbiter for concurrent calls; callers translate the
/// unique violation into `DuplicateAssignment`.
pub async fn create(
    pool: &PgPool,
    task_id: Uuid,
    team_member_id: Uuid,
    estimated_hours: Option<f64>,
    notes: Option<&str>,
) -> Result<TaskAssignment, sqlx::Error> {
    sqlx::query_as::<_, TaskAssignment>(
        "INSERT INTO task_assignments (task_id, team_member_id, estimated_hours, notes)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(task_id)
    .bind(team_member_id)
    .bind(estimated_hours)
    .bind(notes)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<TaskAssignment>, sqlx::Error> {
    sqlx::query_as::<_, TaskAssignment>("SELECT * FROM task_assignments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_task(pool: &PgPool, task_id: Uuid) -> Result<Vec<TaskAssignment>, sqlx::Error> {
    sqlx::query_as::<_, TaskAssignment>(
        "SELECT * FROM task_assignments WHERE task_id = $1 ORDER BY created_at ASC",
    )
    .bind(task_id)
    .fetch_all(pool)
    .await
}

/// Assignments for a task joined with their team members.
pub async fn list_with_members(
    pool: &PgPool,
    task_id: Uuid,
) -> Result<Vec<AssignmentWithMember>, sqlx::Error> {
    let assignments = list_by_task(pool, task_id).await?;
    let member_ids: Vec<Uuid> = assignments.iter().map(|a| a.team_member_id).collect();

    let members: Vec<TeamMember> =
        sqlx::query_as::<_, TeamMember>("SELECT * FROM team_members WHERE id = ANY($1)")
            .bind(&member_ids)
            .fetch_all(pool)
            .await?;
    let by_id: HashMap<Uuid, TeamMember> =
        members.into_iter().map(|m| (m.id, m)).collect();

    Ok(assignments
        .into_iter()
        .filter_map(|assignment| {
            by_id
                .get(&assignment.team_member_id)
                .cloned()
                .map(|team_member| AssignmentWithMember {
                    assignment,
                    team_member,
                })
        })
        .collect())
}

/// Flip the completion flag. `completed_at` is stamped only on a false→true
/// edge and cleared on true→false; re-writing the same value is a no-op, so
/// the original completion timestamp survives redundant writes.
pub async fn set_completion(
    pool: &PgPool,
    id: Uuid,
    is_completed: bool,
) -> Result<TaskAssignment, sqlx::Error> {
    sqlx::query_as::<_, TaskAssignment>(
        "UPDATE task_assignments
         SET completed_at = CASE
                 WHEN $2 AND NOT is_completed THEN now()
                 WHEN NOT $2 THEN NULL
                 ELSE completed_at
             END,
             is_completed = $2
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(is_completed)
    .fetch_one(pool)
    .await
}

pub async fn update_details(
    pool: &PgPool,
    id: Uuid,
    estimated_hours: Option<f64>,
    notes: Option<&str>,
) -> Result<TaskAssignment, sqlx::Error> {
    sqlx::query_as::<_, TaskAssignment>(
        "UPDATE task_assignments
         SET estimated_hours = COALESCE($2, estimated_hours),
             notes = COALESCE($3, notes)
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(estimated_hours)
    .bind(notes)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM task_assignments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Pure aggregate over a task's assignment set.
pub async fn summarize(pool: &PgPool, task_id: Uuid) -> Result<AssignmentSummary, sqlx::Error> {
    sqlx::query_as::<_, AssignmentSummary>(
        "SELECT COUNT(*) AS total,
                COUNT(*) FILTER (WHERE is_completed) AS completed,
                COUNT(*) FILTER (WHERE NOT is_completed) AS pending
         FROM task_assignments WHERE task_id = $1",
    )
    .bind(task_id)
    .fetch_one(pool)
    .await
}
