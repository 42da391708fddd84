use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use bigdecimal::BigDecimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::ApiSession;
use crate::conversion;
use crate::db;
use crate::error::AppError;
use crate::events::DomainEvent;
use crate::models::{ProjectWithTasks, ProposalStatus, ProposalWithItems};
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposal {
    pub client_id: Uuid,
    pub organization_id: Option<Uuid>,
    pub title: String,
    pub status: Option<String>,
    pub items: Vec<CreateProposalItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalItem {
    pub title: String,
    pub description: Option<String>,
    pub amount: BigDecimal,
    pub timeline: Option<String>,
    pub phase: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetApprovals {
    pub item_approvals: HashMap<Uuid, bool>,
}

pub async fn create(
    _session: ApiSession,
    State(state): State<SharedState>,
    Json(req): Json<CreateProposal>,
) -> Result<Json<ProposalWithItems>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    db::directory::find_client(&state.pool, req.client_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Client not found".to_string()))?;

    // Converted is reserved for the conversion pipeline.
    let status = match req.status.as_deref() {
        None | Some("") => ProposalStatus::Draft,
        Some(text) => match ProposalStatus::parse(text) {
            Some(ProposalStatus::Converted) | None => {
                return Err(AppError::Validation(format!(
                    "Invalid proposal status: {text}"
                )));
            }
            Some(parsed) => parsed,
        },
    };

    for item in &req.items {
        if item.title.trim().is_empty() {
            return Err(AppError::Validation("Item title is required".to_string()));
        }
    }

    let items: Vec<db::proposals::NewProposalItem<'_>> = req
        .items
        .iter()
        .map(|item| db::proposals::NewProposalItem {
            title: item.title.trim(),
            description: item.description.as_deref(),
            amount: item.amount.clone(),
            timeline: item.timeline.as_deref(),
            phase: item.phase,
        })
        .collect();

    let (proposal, created_items) = db::proposals::create(
        &state.pool,
        req.client_id,
        req.organization_id,
        req.title.trim(),
        status.as_str(),
        &items,
    )
    .await?;

    Ok(Json(ProposalWithItems::new(proposal, created_items)))
}

pub async fn get(
    _session: ApiSession,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProposalWithItems>, AppError> {
    let proposal = db::proposals::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Proposal not found".to_string()))?;
    let items = db::proposals::list_items(&state.pool, id).await?;
    Ok(Json(ProposalWithItems::new(proposal, items)))
}

/// Apply per-item approval flags. A partial map is legal; unmentioned items
/// keep their flags, and un-approving is allowed.
pub async fn approve(
    _session: ApiSession,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetApprovals>,
) -> Result<Json<ProposalWithItems>, AppError> {
    db::proposals::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Proposal not found".to_string()))?;

    if !req.item_approvals.is_empty() {
        // Reject ids outside the proposal up front so the write is all-or-nothing.
        let known: std::collections::HashSet<Uuid> = db::proposals::list_items(&state.pool, id)
            .await?
            .into_iter()
            .map(|item| item.id)
            .collect();
        if let Some(unknown) = req.item_approvals.keys().find(|item_id| !known.contains(*item_id)) {
            return Err(AppError::NotFound(format!(
                "Item {unknown} does not belong to this proposal"
            )));
        }
        db::proposals::set_approvals(&state.pool, id, &req.item_approvals).await?;
    }

    let proposal = db::proposals::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Proposal not found".to_string()))?;
    let items = db::proposals::list_items(&state.pool, id).await?;
    Ok(Json(ProposalWithItems::new(proposal, items)))
}

/// One-shot conversion of an approved proposal into a project plus tasks.
pub async fn convert(
    _session: ApiSession,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectWithTasks>, AppError> {
    let converted = conversion::convert(&state.pool, id).await?;

    state.events.publish(DomainEvent::ProposalConverted {
        proposal_id: id,
        project_id: converted.project.id,
    });

    Ok(Json(converted))
}
