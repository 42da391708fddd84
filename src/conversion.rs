//! Proposal-to-project conversion.
//!
//! An approved proposal materializes into one project plus one task per
//! approved line item, exactly once. Everything runs in a single
//! transaction: the proposal row is locked up front so concurrent converts
//! serialize, and the status flip to `converted` is a conditional update so
//! the loser observes `AlreadyConverted` instead of creating a duplicate
//! project. Any failure partway rolls the whole write back.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Project, ProjectWithTasks, Proposal, ProposalItem, ProposalStatus, Task, TaskPriority, TaskStatus};

pub async fn convert(pool: &PgPool, proposal_id: Uuid) -> Result<ProjectWithTasks, AppError> {
    let mut tx = pool.begin().await?;

    let proposal = sqlx::query_as::<_, Proposal>(
        "SELECT * FROM proposals WHERE id = $1 FOR UPDATE",
    )
    .bind(proposal_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Proposal not found".to_string()))?;

    if proposal.status == ProposalStatus::Converted.as_str() {
        return Err(AppError::AlreadyConverted(
            "Proposal has already been converted".to_string(),
        ));
    }

    let approved_items = sqlx::query_as::<_, ProposalItem>(
        "SELECT * FROM proposal_items
         WHERE proposal_id = $1 AND is_approved ORDER BY position ASC",
    )
    .bind(proposal_id)
    .fetch_all(&mut *tx)
    .await?;

    if approved_items.is_empty() {
        return Err(AppError::NoApprovedItems(
            "Proposal has no approved items to convert".to_string(),
        ));
    }

    let project = sqlx::query_as::<_, Project>(
        "INSERT INTO projects (client_id, organization_id, name, budget)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(proposal.client_id)
    .bind(proposal.organization_id)
    .bind(&proposal.title)
    .bind(&proposal.total_amount)
    .fetch_one(&mut *tx)
    .await?;

    // Unapproved items are intentionally skipped and never carried over;
    // there is no "convert additional items later" path.
    let mut tasks = Vec::with_capacity(approved_items.len());
    for item in &approved_items {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (project_id, title, description, status, priority)
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(project.id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(TaskStatus::InProgress.as_str())
        .bind(TaskPriority::Medium.as_str())
        .fetch_one(&mut *tx)
        .await?;
        tasks.push(task);
    }

    // Conditional flip: the row lock above already serializes converts, but
    // the guard must hold even if the lock strategy ever changes.
    let flipped = sqlx::query(
        "UPDATE proposals
         SET status = 'converted', project_id = $2, updated_at = now()
         WHERE id = $1 AND status <> 'converted'",
    )
    .bind(proposal_id)
    .bind(project.id)
    .execute(&mut *tx)
    .await?;

    if flipped.rows_affected() == 0 {
        return Err(AppError::AlreadyConverted(
            "Proposal has already been converted".to_string(),
        ));
    }

    tx.commit().await?;

    Ok(ProjectWithTasks { project, tasks })
}
