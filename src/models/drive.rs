//! Drives (OneDrive and document libraries).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A drive owned by a user, group or site.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drive {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// `personal`, `business` or `documentLibrary`.
    pub drive_type: Option<String>,
    pub web_url: Option<String>,
    pub quota: Option<Quota>,
    pub created_date_time: Option<DateTime<Utc>>,
    pub last_modified_date_time: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// Storage quota of a drive, in bytes.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quota {
    pub total: Option<i64>,
    pub used: Option<i64>,
    pub remaining: Option<i64>,
    pub deleted: Option<i64>,
    pub state: Option<String>,
}

impl Quota {
    /// Fraction of the quota in use, when both figures are known.
    pub fn used_ratio(&self) -> Option<f64> {
        match (self.used, self.total) {
            (Some(used), Some(total)) if total > 0 => Some(used as f64 / total as f64),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_drive_quota() {
        let drive: Drive = serde_json::from_value(json!({
            "id": "b!abc",
            "driveType": "documentLibrary",
            "quota": {"total": 1000, "used": 250, "state": "normal"}
        }))
        .unwrap();
        assert_eq!(drive.drive_type.as_deref(), Some("documentLibrary"));
        assert_eq!(drive.quota.unwrap().used_ratio(), Some(0.25));
    }
}
