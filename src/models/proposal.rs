use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored proposal statuses. The partially/fully-approved readings are
/// derived from the item flags on the way out and never persisted, so the
/// aggregate can't drift from the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalStatus {
    Draft,
    Sent,
    Approved,
    Declined,
    Converted,
}

impl ProposalStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(ProposalStatus::Draft),
            "sent" => Some(ProposalStatus::Sent),
            "approved" => Some(ProposalStatus::Approved),
            "declined" => Some(ProposalStatus::Declined),
            "converted" => Some(ProposalStatus::Converted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Draft => "draft",
            ProposalStatus::Sent => "sent",
            ProposalStatus::Approved => "approved",
            ProposalStatus::Declined => "declined",
            ProposalStatus::Converted => "converted",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: Uuid,
    pub client_id: Uuid,
    pub organization_id: Option<Uuid>,
    pub title: String,
    pub total_amount: BigDecimal,
    pub status: String,
    /// Set exactly once, by conversion. Presence implies status `converted`.
    pub project_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalItem {
    pub id: Uuid,
    pub proposal_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub amount: BigDecimal,
    pub timeline: Option<String>,
    pub phase: Option<i32>,
    pub is_approved: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalWithItems {
    #[serde(flatten)]
    pub proposal: Proposal,
    pub items: Vec<ProposalItem>,
    pub derived_status: String,
}

impl ProposalWithItems {
    pub fn new(proposal: Proposal, items: Vec<ProposalItem>) -> Self {
        let derived_status = derived_status(&proposal.status, &items);
        ProposalWithItems {
            proposal,
            items,
            derived_status,
        }
    }
}

/// Display status from the item approval flags. Zero approvals leave the
/// stored status (draft/sent/...) untouched.
pub fn derived_status(stored: &str, items: &[ProposalItem]) -> String {
    if stored == ProposalStatus::Converted.as_str() {
        return stored.to_string();
    }
    let total = items.len();
    let approved = items.iter().filter(|item| item.is_approved).count();
    if approved == 0 {
        stored.to_string()
    } else if approved == total {
        "fully_approved".to_string()
    } else {
        "partially_approved".to_string()
    }
}
