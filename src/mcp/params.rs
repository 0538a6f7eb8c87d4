//! MCP tool parameter types with JSON Schema support.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::abstractions::{CollectionQueryParameters, CountQueryParameters, ItemQueryParameters};
use crate::entities::{EntityKind, Parent};

/// Page size used by `list` when none is given.
pub const DEFAULT_TOP: i32 = 20;

/// Largest page size `list` will request.
pub const MAX_TOP: i32 = 100;

/// Parameters for the `get` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetParams {
    /// The type of entity to fetch.
    pub entity: EntityKind,
    /// The entity id (users also accept a user principal name).
    pub id: String,
    /// Owning group id (events only).
    #[serde(default)]
    pub group: Option<String>,
    /// Owning user id (events only).
    #[serde(default)]
    pub user: Option<String>,
    /// Properties to return.
    #[serde(default)]
    pub select: Option<Vec<String>>,
}

/// Parameters for the `list` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListParams {
    /// The type of entity to list.
    pub entity: EntityKind,
    /// Owning group id (events only).
    #[serde(default)]
    pub group: Option<String>,
    /// Owning user id (events only).
    #[serde(default)]
    pub user: Option<String>,
    /// Page size (default 20, max 100).
    #[serde(default)]
    pub top: Option<i32>,
    /// Number of items to skip.
    #[serde(default)]
    pub skip: Option<i32>,
    /// OData filter expression, e.g. "startswith(displayName,'Eng')".
    #[serde(default)]
    pub filter: Option<String>,
    /// Properties to return.
    #[serde(default)]
    pub select: Option<Vec<String>>,
    /// Sort order, e.g. ["displayName desc"].
    #[serde(default)]
    pub orderby: Option<Vec<String>>,
    /// Search expression, e.g. "\"displayName:team\"".
    #[serde(default)]
    pub search: Option<String>,
}

/// Parameters for the `count` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CountParams {
    /// The type of entity to count.
    pub entity: EntityKind,
    /// Owning group id (events only).
    #[serde(default)]
    pub group: Option<String>,
    /// Owning user id (events only).
    #[serde(default)]
    pub user: Option<String>,
    /// OData filter expression.
    #[serde(default)]
    pub filter: Option<String>,
    /// Search expression.
    #[serde(default)]
    pub search: Option<String>,
}

/// Parameters for the `delete` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteParams {
    /// The type of entity to delete.
    pub entity: EntityKind,
    /// The entity id.
    pub id: String,
    /// Owning group id (events only).
    #[serde(default)]
    pub group: Option<String>,
    /// Owning user id (events only).
    #[serde(default)]
    pub user: Option<String>,
}

fn parent(group: &Option<String>, user: &Option<String>) -> Parent {
    Parent {
        group: group.clone(),
        user: user.clone(),
    }
}

impl GetParams {
    pub fn parent(&self) -> Parent {
        parent(&self.group, &self.user)
    }

    pub fn query(&self) -> ItemQueryParameters {
        ItemQueryParameters {
            select: self.select.clone(),
            ..Default::default()
        }
    }
}

impl ListParams {
    pub fn parent(&self) -> Parent {
        parent(&self.group, &self.user)
    }

    /// Query options with the page size defaulted and capped.
    pub fn query(&self) -> CollectionQueryParameters {
        CollectionQueryParameters {
            top: Some(self.top.unwrap_or(DEFAULT_TOP).clamp(1, MAX_TOP)),
            skip: self.skip,
            filter: self.filter.clone(),
            select: self.select.clone(),
            orderby: self.orderby.clone(),
            search: self.search.clone(),
            ..Default::default()
        }
    }
}

impl CountParams {
    pub fn parent(&self) -> Parent {
        parent(&self.group, &self.user)
    }

    pub fn query(&self) -> CountQueryParameters {
        CountQueryParameters {
            filter: self.filter.clone(),
            search: self.search.clone(),
        }
    }
}

impl DeleteParams {
    pub fn parent(&self) -> Parent {
        parent(&self.group, &self.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_params_schema_generates() {
        let schema = schemars::schema_for!(GetParams);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("entity"));
        assert!(json.contains("id"));
        assert!(json.contains("select"));
    }

    #[test]
    fn list_params_schema_generates() {
        let schema = schemars::schema_for!(ListParams);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("entity"));
        assert!(json.contains("top"));
        assert!(json.contains("filter"));
        assert!(json.contains("orderby"));
    }

    #[test]
    fn entity_kind_schema_has_variants() {
        let schema = schemars::schema_for!(EntityKind);
        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.contains("group"));
        assert!(json.contains("user"));
        assert!(json.contains("drive"));
        assert!(json.contains("event"));
    }

    #[test]
    fn get_params_deserializes() {
        let json = r#"{"entity": "event", "id": "e1", "group": "g1"}"#;
        let params: GetParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.entity, EntityKind::Event);
        assert_eq!(params.parent(), Parent::group("g1"));
        assert!(params.query().select.is_none());
    }

    #[test]
    fn list_params_default_and_cap_top() {
        let params: ListParams = serde_json::from_str(r#"{"entity": "group"}"#).unwrap();
        assert_eq!(params.query().top, Some(DEFAULT_TOP));
        assert!(params.parent().group.is_none());

        let params: ListParams =
            serde_json::from_str(r#"{"entity": "user", "top": 500, "filter": "accountEnabled eq true"}"#)
                .unwrap();
        let query = params.query();
        assert_eq!(query.top, Some(MAX_TOP));
        assert_eq!(query.filter.as_deref(), Some("accountEnabled eq true"));
    }

    #[test]
    fn count_params_deserializes() {
        let json = r#"{"entity": "event", "user": "u1", "search": "\"subject:sync\""}"#;
        let params: CountParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.parent(), Parent::user("u1"));
        assert_eq!(params.query().search.as_deref(), Some("\"subject:sync\""));
    }

    #[test]
    fn delete_params_require_id() {
        let result: Result<DeleteParams, _> = serde_json::from_str(r#"{"entity": "group"}"#);
        assert!(result.is_err());
    }
}
