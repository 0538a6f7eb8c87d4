//! Teams backed by Microsoft 365 groups.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The team of a unified group. Created with `PUT /groups/{id}/team`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub is_archived: Option<bool>,
    pub web_url: Option<String>,
    pub member_settings: Option<TeamMemberSettings>,
    pub messaging_settings: Option<TeamMessagingSettings>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberSettings {
    pub allow_create_update_channels: Option<bool>,
    pub allow_delete_channels: Option<bool>,
    pub allow_add_remove_apps: Option<bool>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMessagingSettings {
    pub allow_user_edit_messages: Option<bool>,
    pub allow_user_delete_messages: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_team_keeps_unmodelled_settings() {
        let team: Team = serde_json::from_value(json!({
            "id": "g1",
            "isArchived": false,
            "memberSettings": {"allowCreateUpdateChannels": true},
            "funSettings": {"allowGiphy": true}
        }))
        .unwrap();

        assert_eq!(
            team.member_settings.as_ref().and_then(|m| m.allow_create_update_channels),
            Some(true)
        );
        assert_eq!(team.additional_data["funSettings"], json!({"allowGiphy": true}));
        let back = serde_json::to_value(&team).unwrap();
        assert!(back.get("displayName").is_none());
        assert_eq!(back["funSettings"]["allowGiphy"], true);
    }
}
