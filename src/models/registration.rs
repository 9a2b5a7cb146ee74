//! Registration of a user for a hackathon

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User-hackathon relation
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserHackathonRel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hackathon_id: Uuid,
    pub real_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: i32,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration audit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Unaudited,
    AuditPassed,
    AuditRefused,
    AutoPassed,
}

impl RegistrationStatus {
    /// Statuses that count as an accepted participant
    pub const ACCEPTED: [RegistrationStatus; 2] = [Self::AutoPassed, Self::AuditPassed];

    pub fn as_i32(self) -> i32 {
        match self {
            Self::Unaudited => 0,
            Self::AuditPassed => 1,
            Self::AuditRefused => 2,
            Self::AutoPassed => 3,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Unaudited),
            1 => Some(Self::AuditPassed),
            2 => Some(Self::AuditRefused),
            3 => Some(Self::AutoPassed),
            _ => None,
        }
    }

    /// Initial status for a new registration
    pub fn initial(auto_approve: bool) -> Self {
        if auto_approve {
            Self::AutoPassed
        } else {
            Self::Unaudited
        }
    }

    pub fn is_accepted(self) -> bool {
        Self::ACCEPTED.contains(&self)
    }
}
