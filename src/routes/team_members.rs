use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::auth::ApiSession;
use crate::db;
use crate::error::AppError;
use crate::models::{TeamMember, TeamRole};
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamMember {
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
}

pub async fn list(
    _session: ApiSession,
    State(state): State<SharedState>,
) -> Result<Json<Vec<TeamMember>>, AppError> {
    let members = db::team_members::list(&state.pool).await?;
    Ok(Json(members))
}

pub async fn create(
    _session: ApiSession,
    State(state): State<SharedState>,
    Json(req): Json<CreateTeamMember>,
) -> Result<Json<TeamMember>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    let role = TeamRole::parse(&req.role)
        .ok_or_else(|| AppError::Validation(format!("Unknown team role: {}", req.role)))?;

    let member = db::team_members::create(
        &state.pool,
        req.name.trim(),
        req.email.trim(),
        role.as_str(),
        req.phone.as_deref(),
        req.profile_image_url.as_deref(),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A team member with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    Ok(Json(member))
}
