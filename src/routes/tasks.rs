use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::ApiSession;
use crate::db;
use crate::duedate;
use crate::error::AppError;
use crate::events::DomainEvent;
use crate::models::{TaskPriority, TaskStatus, TaskView};
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub project_id: Option<Uuid>,
    pub organization_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    pub timezone: Option<String>,
    pub google_drive_link: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    /// Empty string clears the due date.
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    /// IANA zone the due date was typed in; defaults to the configured zone.
    pub timezone: Option<String>,
    /// A previously stored due value in any supported wire form.
    pub due_at: Option<String>,
    pub google_drive_link: Option<String>,
}

pub async fn create(
    _session: ApiSession,
    State(state): State<SharedState>,
    Json(req): Json<CreateTask>,
) -> Result<Json<TaskView>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    // Exactly one owner: a project or an organization-level bucket.
    match (req.project_id, req.organization_id) {
        (Some(_), Some(_)) | (None, None) => {
            return Err(AppError::Validation(
                "Task must belong to exactly one project or organization".to_string(),
            ));
        }
        (Some(project_id), None) => {
            db::projects::find_by_id(&state.pool, project_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
        }
        (None, Some(organization_id)) => {
            db::directory::find_organization(&state.pool, organization_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))?;
        }
    }

    let status = parse_status(req.status.as_deref(), TaskStatus::InProgress)?;
    let priority = parse_priority(req.priority.as_deref())?;

    let due_at = match req.due_date.as_deref() {
        None | Some("") => None,
        Some(date_text) => Some(resolve_due_at(
            date_text,
            req.due_time.as_deref().unwrap_or(""),
            req.timezone.as_deref(),
            &state,
        )?),
    };

    let task = db::tasks::create(
        &state.pool,
        db::tasks::NewTask {
            project_id: req.project_id,
            organization_id: req.organization_id,
            title: req.title.trim(),
            description: req.description.as_deref(),
            status: status.as_str(),
            priority: priority.as_str(),
            due_at,
            external_link: req.google_drive_link.as_deref(),
        },
    )
    .await?;

    Ok(Json(TaskView::from(task)))
}

pub async fn get(
    _session: ApiSession,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskView>, AppError> {
    let task = db::tasks::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;
    Ok(Json(TaskView::from(task)))
}

/// Partial update. Only fields present in the body change; a status write is
/// persistence plus an `updated_at` bump, nothing else.
pub async fn update(
    _session: ApiSession,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTask>,
) -> Result<Json<TaskView>, AppError> {
    let mut task = db::tasks::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    if let Some(title) = req.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        task.title = title.trim().to_string();
    }
    if let Some(description) = req.description {
        task.description = if description.is_empty() {
            None
        } else {
            Some(description)
        };
    }
    if let Some(status) = req.status.as_deref() {
        let parsed = TaskStatus::parse(status)
            .ok_or_else(|| AppError::Validation(format!("Unknown task status: {status}")))?;
        task.status = parsed.as_str().to_string();
    }
    if let Some(priority) = req.priority.as_deref() {
        let parsed = TaskPriority::parse(priority)
            .ok_or_else(|| AppError::Validation(format!("Unknown task priority: {priority}")))?;
        task.priority = parsed.as_str().to_string();
    }
    if let Some(link) = req.google_drive_link {
        task.external_link = if link.is_empty() { None } else { Some(link) };
    }

    if let Some(raw) = req.due_at.as_deref() {
        // Re-submitted stored value; normalize it without zone conversion.
        let parts = duedate::extract(raw)?;
        task.due_at = Some(NaiveDateTime::new(parts.date, parts.time));
    } else if let Some(date_text) = req.due_date.as_deref() {
        task.due_at = if date_text.is_empty() {
            None
        } else {
            Some(resolve_due_at(
                date_text,
                req.due_time.as_deref().unwrap_or(""),
                req.timezone.as_deref(),
                &state,
            )?)
        };
    }

    let updated = db::tasks::update(&state.pool, &task).await?;

    state
        .events
        .publish(DomainEvent::TaskUpdated { task_id: updated.id });

    Ok(Json(TaskView::from(updated)))
}

fn parse_status(value: Option<&str>, default: TaskStatus) -> Result<TaskStatus, AppError> {
    match value {
        None | Some("") => Ok(default),
        Some(text) => TaskStatus::parse(text)
            .ok_or_else(|| AppError::Validation(format!("Unknown task status: {text}"))),
    }
}

fn parse_priority(value: Option<&str>) -> Result<TaskPriority, AppError> {
    match value {
        None | Some("") => Ok(TaskPriority::default()),
        Some(text) => TaskPriority::parse(text)
            .ok_or_else(|| AppError::Validation(format!("Unknown task priority: {text}"))),
    }
}

/// Validate the time text, then combine date and time in the caller's zone.
/// What we keep is the wall clock the user typed.
fn resolve_due_at(
    date_text: &str,
    time_text: &str,
    timezone: Option<&str>,
    state: &SharedState,
) -> Result<NaiveDateTime, AppError> {
    if !time_text.trim().is_empty() && !duedate::is_valid_time_format(time_text) {
        return Err(AppError::Validation("Invalid Time Format".to_string()));
    }

    let tz: Tz = match timezone {
        None | Some("") => state.config.default_timezone,
        Some(name) => name
            .parse()
            .map_err(|_| AppError::Validation(format!("Unknown time zone: {name}")))?,
    };

    let date = duedate::parse_date(date_text)?;
    let combined = duedate::combine(date, time_text, tz)?;
    Ok(combined.naive_local())
}
