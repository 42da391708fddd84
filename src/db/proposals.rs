use std::collections::HashMap;

use bigdecimal::BigDecimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Proposal, ProposalItem};

pub struct NewProposalItem<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub amount: BigDecimal,
    pub timeline: Option<&'a str>,
    pub phase: Option<i32>,
}

pub async fn create(
    pool: &PgPool,
    client_id: Uuid,
    organization_id: Option<Uuid>,
    title: &str,
    status: &str,
    items: &[NewProposalItem<'_>],
) -> Result<(Proposal, Vec<ProposalItem>), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let total_amount = items
        .iter()
        .fold(BigDecimal::from(0), |acc, item| acc + &item.amount);

    let proposal = sqlx::query_as::<_, Proposal>(
        "INSERT INTO proposals (client_id, organization_id, title, total_amount, status)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(client_id)
    .bind(organization_id)
    .bind(title)
    .bind(&total_amount)
    .bind(status)
    .fetch_one(&mut *tx)
    .await?;

    let mut created = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let row = sqlx::query_as::<_, ProposalItem>(
            "INSERT INTO proposal_items (proposal_id, title, description, amount, timeline, phase, position)
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(proposal.id)
        .bind(item.title)
        .bind(item.description)
        .bind(&item.amount)
        .bind(item.timeline)
        .bind(item.phase)
        .bind(position as i32)
        .fetch_one(&mut *tx)
        .await?;
        created.push(row);
    }

    tx.commit().await?;
    Ok((proposal, created))
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Proposal>, sqlx::Error> {
    sqlx::query_as::<_, Proposal>("SELECT * FROM proposals WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_items(pool: &PgPool, proposal_id: Uuid) -> Result<Vec<ProposalItem>, sqlx::Error> {
    sqlx::query_as::<_, ProposalItem>(
        "SELECT * FROM proposal_items WHERE proposal_id = $1 ORDER BY position ASC",
    )
    .bind(proposal_id)
    .fetch_all(pool)
    .await
}

/// Apply approval flags to the named items only; unmentioned items keep their
/// flags. Un-approving is legal (no ratchet). Returns the number of item rows
/// actually touched; callers verify it against the map size before relying on
/// the result.
pub async fn set_approvals(
    pool: &PgPool,
    proposal_id: Uuid,
    item_approvals: &HashMap<Uuid, bool>,
) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let mut touched = 0;
    for (item_id, approved) in item_approvals {
        let result = sqlx::query(
            "UPDATE proposal_items SET is_approved = $3
             WHERE id = $1 AND proposal_id = $2",
        )
        .bind(item_id)
        .bind(proposal_id)
        .bind(approved)
        .execute(&mut *tx)
        .await?;
        touched += result.rows_affected();
    }

    sqlx::query("UPDATE proposals SET updated_at = now() WHERE id = $1")
        .bind(proposal_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(touched)
}
