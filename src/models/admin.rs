//! Hackathon administrator model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Admin-hackathon relation
///
/// A relation without a hackathon grants privileges on every hackathon.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AdminHackathonRel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hackathon_id: Option<Uuid>,
    pub role_type: i32,
    pub status: i32,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AdminHackathonRel {
    pub fn is_global(&self) -> bool {
        self.hackathon_id.is_none()
    }
}

/// Role an administrator holds on a hackathon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRoleType {
    Admin,
    Judge,
}

impl AdminRoleType {
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Admin => 1,
            Self::Judge => 2,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::Admin),
            2 => Some(Self::Judge),
            _ => None,
        }
    }
}

/// Hackathons an admin may manage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermittedHackathons {
    All,
    Only(Vec<Uuid>),
}

impl PermittedHackathons {
    /// Collapse a user's admin relations into the set of permitted hackathons
    pub fn from_rels(rels: &[AdminHackathonRel]) -> Self {
        if rels.iter().any(AdminHackathonRel::is_global) {
            return Self::All;
        }

        let mut ids: Vec<Uuid> = rels.iter().filter_map(|r| r.hackathon_id).collect();
        ids.sort();
        ids.dedup();
        Self::Only(ids)
    }

    pub fn contains(&self, hackathon_id: &Uuid) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(hackathon_id),
        }
    }
}
