use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::auth::ApiSession;
use crate::db;
use crate::error::AppError;
use crate::models::{Project, Task};
use crate::state::SharedState;

pub async fn get(
    _session: ApiSession,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, AppError> {
    let project = db::projects::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

pub async fn list_tasks(
    _session: ApiSession,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, AppError> {
    db::projects::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    let tasks = db::tasks::list_by_project(&state.pool, id).await?;
    Ok(Json(tasks))
}
