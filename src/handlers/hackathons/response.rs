//! Hackathon response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Hackathon, UserHackathonRel};

/// A hackathon with the requesting user's registration, if any
#[derive(Debug, Serialize)]
pub struct HackathonListItem {
    #[serde(flatten)]
    pub hackathon: Hackathon,
    pub registration: Option<UserHackathonRel>,
}

/// Hackathon list response
#[derive(Debug, Serialize)]
pub struct HackathonsListResponse {
    pub hackathons: Vec<HackathonListItem>,
}

/// Accepted participant counts of a hackathon
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HackathonStat {
    pub total: i64,
    pub hid: Uuid,
    pub online: i64,
    pub offline: i64,
}

impl HackathonStat {
    pub fn new(hid: Uuid, total: i64, online: i64) -> Self {
        Self {
            total,
            hid,
            online,
            offline: total - online,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_derives_offline_count() {
        let hid = Uuid::new_v4();
        let stat = HackathonStat::new(hid, 12, 5);
        assert_eq!(stat.offline, 7);

        let json = serde_json::to_value(&stat).unwrap();
        assert_eq!(json["total"], 12);
        assert_eq!(json["online"], 5);
        assert_eq!(json["hid"], hid.to_string());
    }
}
