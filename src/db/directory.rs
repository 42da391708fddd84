use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Client, Organization};

pub async fn create_organization(pool: &PgPool, name: &str) -> Result<Organization, sqlx::Error> {
    sqlx::query_as::<_, Organization>(
        "INSERT INTO organizations (name) VALUES ($1) RETURNING *",
    )
    .bind(name)
    .fetch_one(pool)
    .await
}

pub async fn find_organization(pool: &PgPool, id: Uuid) -> Result<Option<Organization>, sqlx::Error> {
    sqlx::query_as::<_, Organization>("SELECT * FROM organizations WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_client(
    pool: &PgPool,
    organization_id: Option<Uuid>,
    name: &str,
    email: Option<&str>,
) -> Result<Client, sqlx::Error> {
    sqlx::query_as::<_, Client>(
        "INSERT INTO clients (organization_id, name, email) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(organization_id)
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await
}

pub async fn find_client(pool: &PgPool, id: Uuid) -> Result<Option<Client>, sqlx::Error> {
    sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
