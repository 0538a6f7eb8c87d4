//! Directory objects: groups, users and the polymorphic base type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::models::CollectionResponse;

/// `@odata.type` of a user.
pub const USER_ODATA_TYPE: &str = "#microsoft.graph.user";

/// `@odata.type` of a group.
pub const GROUP_ODATA_TYPE: &str = "#microsoft.graph.group";

/// A Microsoft 365 group or security group.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(rename = "@odata.type")]
    pub odata_type: Option<String>,
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub mail: Option<String>,
    pub mail_nickname: Option<String>,
    pub mail_enabled: Option<bool>,
    pub security_enabled: Option<bool>,
    pub visibility: Option<String>,
    pub group_types: Option<Vec<String>>,
    pub created_date_time: Option<DateTime<Utc>>,
    pub renewed_date_time: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

impl Group {
    /// Whether this is a Microsoft 365 ("Unified") group.
    pub fn is_unified(&self) -> bool {
        self.group_types
            .as_ref()
            .is_some_and(|types| types.iter().any(|t| t == "Unified"))
    }
}

/// A user account.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "@odata.type")]
    pub odata_type: Option<String>,
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    pub user_principal_name: Option<String>,
    pub mail: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub office_location: Option<String>,
    pub mobile_phone: Option<String>,
    pub business_phones: Option<Vec<String>>,
    pub account_enabled: Option<bool>,
    pub created_date_time: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// A directory object of a type this crate does not model.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryObjectBase {
    #[serde(rename = "@odata.type")]
    pub odata_type: Option<String>,
    pub id: Option<String>,
    pub deleted_date_time: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// A member of a directory collection such as `members` or `memberOf`.
///
/// The concrete type is picked from the `@odata.type` discriminator.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryObject {
    User(Box<User>),
    Group(Box<Group>),
    Other(DirectoryObjectBase),
}

impl DirectoryObject {
    /// Build the concrete type named by the payload's `@odata.type`.
    pub fn create_from_discriminator_value(value: Value) -> serde_json::Result<Self> {
        let discriminator = value
            .get("@odata.type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        match discriminator {
            USER_ODATA_TYPE => Ok(Self::User(Box::new(serde_json::from_value(value)?))),
            GROUP_ODATA_TYPE => Ok(Self::Group(Box::new(serde_json::from_value(value)?))),
            _ => Ok(Self::Other(serde_json::from_value(value)?)),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::User(u) => u.id.as_deref(),
            Self::Group(g) => g.id.as_deref(),
            Self::Other(o) => o.id.as_deref(),
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::User(u) => u.display_name.as_deref(),
            Self::Group(g) => g.display_name.as_deref(),
            Self::Other(o) => o.additional_data.get("displayName").and_then(Value::as_str),
        }
    }

    pub fn odata_type(&self) -> Option<&str> {
        match self {
            Self::User(u) => u.odata_type.as_deref(),
            Self::Group(g) => g.odata_type.as_deref(),
            Self::Other(o) => o.odata_type.as_deref(),
        }
    }
}

impl<'de> Deserialize<'de> for DirectoryObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::create_from_discriminator_value(value).map_err(serde::de::Error::custom)
    }
}

impl Serialize for DirectoryObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::User(u) => u.serialize(serializer),
            Self::Group(g) => g.serialize(serializer),
            Self::Other(o) => o.serialize(serializer),
        }
    }
}

impl CollectionResponse<DirectoryObject> {
    /// Factory for a page of polymorphic directory objects.
    pub fn create_from_discriminator_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_keeps_unknown_properties() {
        let group: Group = serde_json::from_value(json!({
            "id": "g1",
            "displayName": "Engineering",
            "groupTypes": ["Unified"],
            "createdDateTime": "2024-01-15T08:30:00Z",
            "classification": "internal"
        }))
        .unwrap();

        assert_eq!(group.display_name.as_deref(), Some("Engineering"));
        assert!(group.is_unified());
        assert_eq!(group.additional_data["classification"], "internal");

        let back = serde_json::to_value(&group).unwrap();
        assert_eq!(back["classification"], "internal");
        assert!(back.get("mail").is_none());
    }

    #[test]
    fn test_discriminator_picks_concrete_type() {
        let user = DirectoryObject::create_from_discriminator_value(json!({
            "@odata.type": "#microsoft.graph.user",
            "id": "u1",
            "userPrincipalName": "ada@contoso.com"
        }))
        .unwrap();
        assert!(matches!(user, DirectoryObject::User(ref u)
            if u.user_principal_name.as_deref() == Some("ada@contoso.com")));

        let group = DirectoryObject::create_from_discriminator_value(json!({
            "@odata.type": "#microsoft.graph.group",
            "id": "g1",
            "displayName": "Ops"
        }))
        .unwrap();
        assert_eq!(group.display_name(), Some("Ops"));

        let device = DirectoryObject::create_from_discriminator_value(json!({
            "@odata.type": "#microsoft.graph.device",
            "id": "d1",
            "displayName": "laptop"
        }))
        .unwrap();
        assert!(matches!(device, DirectoryObject::Other(_)));
        assert_eq!(device.id(), Some("d1"));
        assert_eq!(device.display_name(), Some("laptop"));
    }

    #[test]
    fn test_polymorphic_collection() {
        let page = CollectionResponse::<DirectoryObject>::create_from_discriminator_value(json!({
            "value": [
                {"@odata.type": "#microsoft.graph.user", "id": "u1"},
                {"@odata.type": "#microsoft.graph.group", "id": "g1"}
            ]
        }))
        .unwrap();
        assert!(matches!(page.value[0], DirectoryObject::User(_)));
        assert!(matches!(page.value[1], DirectoryObject::Group(_)));

        let round = serde_json::to_value(&page.value[1]).unwrap();
        assert_eq!(round["@odata.type"], "#microsoft.graph.group");
    }
}
