//! Hackathon model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::basic_info;

/// Hackathon database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Hackathon {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub status: i32,
    pub basic_info: Value,
    pub extra_info: Value,
    pub event_start_time: Option<DateTime<Utc>>,
    pub event_end_time: Option<DateTime<Utc>>,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hackathon {
    /// Whether registrations are approved without an audit
    pub fn is_auto_approve(&self) -> bool {
        self.basic_info_flag(basic_info::AUTO_APPROVE)
    }

    /// Whether idle resources of this hackathon may be recycled
    pub fn is_recycle_enabled(&self) -> bool {
        self.basic_info_flag(basic_info::RECYCLE_ENABLED)
    }

    /// Reads a `1`/`true` switch from `basic_info`; anything else is off.
    fn basic_info_flag(&self, key: &str) -> bool {
        match self.basic_info.get(key) {
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                tracing::warn!(
                    hackathon_id = %self.id,
                    key,
                    value = %other,
                    "unexpected basic_info value, treating as disabled"
                );
                false
            }
            None => {
                tracing::warn!(
                    hackathon_id = %self.id,
                    key,
                    "cannot load key from basic_info, treating as disabled"
                );
                false
            }
        }
    }
}

/// Hackathon lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HackathonStatus {
    Draft,
    Online,
    Offline,
}

impl HackathonStatus {
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Draft => 0,
            Self::Online => 1,
            Self::Offline => 2,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Draft),
            1 => Some(Self::Online),
            2 => Some(Self::Offline),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hackathon_with(basic_info: Value) -> Hackathon {
        Hackathon {
            id: Uuid::new_v4(),
            name: "spring-hack".to_string(),
            display_name: "Spring Hack".to_string(),
            description: None,
            status: HackathonStatus::Online.as_i32(),
            basic_info,
            extra_info: json!({}),
            event_start_time: None,
            event_end_time: None,
            creator_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_auto_approve_enabled_by_one() {
        let hackathon = hackathon_with(json!({"auto_approve": 1}));
        assert!(hackathon.is_auto_approve());
        assert!(!hackathon.is_recycle_enabled());
    }

    #[test]
    fn test_flags_accept_booleans() {
        let hackathon = hackathon_with(json!({"recycle_enabled": true, "auto_approve": false}));
        assert!(hackathon.is_recycle_enabled());
        assert!(!hackathon.is_auto_approve());
    }

    #[test]
    fn test_flags_off_for_other_values() {
        let hackathon = hackathon_with(json!({"auto_approve": 2, "recycle_enabled": "1"}));
        assert!(!hackathon.is_auto_approve());
        assert!(!hackathon.is_recycle_enabled());

        let not_an_object = hackathon_with(json!("broken"));
        assert!(!not_an_object.is_auto_approve());
    }

    #[test]
    fn test_status_round_trips_through_i32() {
        for status in [
            HackathonStatus::Draft,
            HackathonStatus::Online,
            HackathonStatus::Offline,
        ] {
            assert_eq!(HackathonStatus::from_i32(status.as_i32()), Some(status));
        }
        assert_eq!(HackathonStatus::from_i32(7), None);
    }
}
