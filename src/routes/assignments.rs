use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::ApiSession;
use crate::db;
use crate::error::AppError;
use crate::events::DomainEvent;
use crate::models::{AssignmentSummary, AssignmentWithMember, TaskAssignment};
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignment {
    pub team_member_id: Uuid,
    pub estimated_hours: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignment {
    pub is_completed: Option<bool>,
    pub estimated_hours: Option<f64>,
    pub notes: Option<String>,
}

pub async fn list_by_task(
    _session: ApiSession,
    State(state): State<SharedState>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<Vec<AssignmentWithMember>>, AppError> {
    db::tasks::find_by_id(&state.pool, task_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    let assignments = db::assignments::list_with_members(&state.pool, task_id).await?;
    Ok(Json(assignments))
}

pub async fn create(
    _session: ApiSession,
    State(state): State<SharedState>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<CreateAssignment>,
) -> Result<Json<TaskAssignment>, AppError> {
    db::tasks::find_by_id(&state.pool, task_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;
    db::team_members::find_by_id(&state.pool, req.team_member_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Team member not found".to_string()))?;

    validate_hours(req.estimated_hours)?;

    // The UI filters already-assigned members, but the unique constraint is
    // what actually decides under concurrency.
    let assignment = db::assignments::create(
        &state.pool,
        task_id,
        req.team_member_id,
        req.estimated_hours,
        req.notes.as_deref(),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::DuplicateAssignment(
                "This team member is already assigned to this task".to_string(),
            )
        }
        _ => AppError::Database(e),
    })?;

    state.events.publish(DomainEvent::AssignmentChanged {
        task_id,
        assignment_id: assignment.id,
    });

    Ok(Json(assignment))
}

/// Update completion and/or details. Completion only touches the assignment
/// row; the parent task's status is never written here.
pub async fn update(
    _session: ApiSession,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAssignment>,
) -> Result<Json<TaskAssignment>, AppError> {
    let existing = db::assignments::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))?;

    validate_hours(req.estimated_hours)?;

    let mut assignment = existing;
    if req.estimated_hours.is_some() || req.notes.is_some() {
        assignment = db::assignments::update_details(
            &state.pool,
            id,
            req.estimated_hours,
            req.notes.as_deref(),
        )
        .await?;
    }
    if let Some(is_completed) = req.is_completed {
        assignment = db::assignments::set_completion(&state.pool, id, is_completed).await?;
    }

    state.events.publish(DomainEvent::AssignmentChanged {
        task_id: assignment.task_id,
        assignment_id: assignment.id,
    });

    Ok(Json(assignment))
}

pub async fn delete(
    _session: ApiSession,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let assignment = db::assignments::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))?;

    db::assignments::delete(&state.pool, id).await?;

    state.events.publish(DomainEvent::AssignmentChanged {
        task_id: assignment.task_id,
        assignment_id: assignment.id,
    });

    Ok(StatusCode::NO_CONTENT)
}

pub async fn summary(
    _session: ApiSession,
    State(state): State<SharedState>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<AssignmentSummary>, AppError> {
    db::tasks::find_by_id(&state.pool, task_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    let summary = db::assignments::summarize(&state.pool, task_id).await?;
    Ok(Json(summary))
}

fn validate_hours(hours: Option<f64>) -> Result<(), AppError> {
    match hours {
        Some(h) if !h.is_finite() || h < 0.0 => Err(AppError::Validation(
            "Estimated hours must be a non-negative number".to_string(),
        )),
        _ => Ok(()),
    }
}
