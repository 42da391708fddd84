use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles a team member can hold inside the agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamRole {
    ProjectManager,
    ContentWriter,
    Photographer,
    Designer,
    GhlLead,
    Strategist,
}

impl TeamRole {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "project_manager" => Some(TeamRole::ProjectManager),
            "content_writer" => Some(TeamRole::ContentWriter),
            "photographer" => Some(TeamRole::Photographer),
            "designer" => Some(TeamRole::Designer),
            "ghl_lead" => Some(TeamRole::GhlLead),
            "strategist" => Some(TeamRole::Strategist),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::ProjectManager => "project_manager",
            TeamRole::ContentWriter => "content_writer",
            TeamRole::Photographer => "photographer",
            TeamRole::Designer => "designer",
            TeamRole::GhlLead => "ghl_lead",
            TeamRole::Strategist => "strategist",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
