use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Task;

pub struct NewTask<'a> {
    pub project_id: Option<Uuid>,
    pub organization_id: Option<Uuid>,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub priority: &'a str,
    pub due_at: Option<NaiveDateTime>,
    pub external_link: Option<&'a str>,
}

pub async fn create(pool: &PgPool, task: NewTask<'_>) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (project_id, organization_id, title, description, status, priority, due_at, external_link)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(task.project_id)
    .bind(task.organization_id)
    .bind(task.title)
    .bind(task.description)
    .bind(task.status)
    .bind(task.priority)
    .bind(task.due_at)
    .bind(task.external_link)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "SELECT * FROM tasks WHERE project_id = $1 ORDER BY created_at ASC",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

/// Persist the full edited row and bump `updated_at`. Status writes carry no
/// side effects beyond this.
pub async fn update(pool: &PgPool, task: &Task) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "UPDATE tasks
         SET title = $2, description = $3, status = $4, priority = $5,
             due_at = $6, external_link = $7, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(&task.status)
    .bind(&task.priority)
    .bind(task.due_at)
    .bind(&task.external_link)
    .fetch_one(pool)
    .await
}
