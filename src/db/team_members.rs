use sqlx::PgPool;
use uuid::Uuid;

use crate::models::TeamMember;

pub async fn list(pool: &PgPool) -> Result<Vec<TeamMember>, sqlx::Error> {
    sqlx::query_as::<_, TeamMember>("SELECT * FROM team_members ORDER BY name ASC")
        .fetch_all(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    name: &str,
    email: &str,
    role: &str,
    phone: Option<&str>,
    profile_image_url: Option<&str>,
) -> Result<TeamMember, sqlx::Error> {
    sqlx::query_as::<_, TeamMember>(
        "INSERT INTO team_members (name, email, role, phone, profile_image_url)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(name)
    .bind(email)
    .bind(role)
    .bind(phone)
    .bind(profile_image_url)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<TeamMember>, sqlx::Error> {
    sqlx::query_as::<_, TeamMember>("SELECT * FROM team_members WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
