use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::ApiSession;
use crate::db;
use crate::error::AppError;
use crate::models::{Client, Organization};
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganization {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClient {
    pub organization_id: Option<Uuid>,
    pub name: String,
    pub email: Option<String>,
}

pub async fn create_organization(
    _session: ApiSession,
    State(state): State<SharedState>,
    Json(req): Json<CreateOrganization>,
) -> Result<Json<Organization>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    let organization = db::directory::create_organization(&state.pool, req.name.trim()).await?;
    Ok(Json(organization))
}

pub async fn create_client(
    _session: ApiSession,
    State(state): State<SharedState>,
    Json(req): Json<CreateClient>,
) -> Result<Json<Client>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if let Some(organization_id) = req.organization_id {
        db::directory::find_organization(&state.pool, organization_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))?;
    }
    let client = db::directory::create_client(
        &state.pool,
        req.organization_id,
        req.name.trim(),
        req.email.as_deref(),
    )
    .await?;
    Ok(Json(client))
}
