//! SharePoint sites, lists, list items and content types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A SharePoint site.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub web_url: Option<String>,
    pub created_date_time: Option<DateTime<Utc>>,
    pub last_modified_date_time: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// A list within a site.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub web_url: Option<String>,
    pub list: Option<ListInfo>,
    pub created_date_time: Option<DateTime<Utc>>,
    pub last_modified_date_time: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// The `list` facet of a [`List`].
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInfo {
    /// Base template, e.g. `genericList` or `documentLibrary`.
    pub template: Option<String>,
    pub hidden: Option<bool>,
    pub content_types_enabled: Option<bool>,
}

/// An item in a list. Column values live under `fields`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: Option<String>,
    pub web_url: Option<String>,
    pub content_type: Option<ContentTypeInfo>,
    pub fields: Option<Map<String, Value>>,
    pub created_date_time: Option<DateTime<Utc>>,
    pub last_modified_date_time: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

impl ListItem {
    /// Build an item carrying only column values, as used for create.
    pub fn with_fields(fields: Map<String, Value>) -> Self {
        Self {
            fields: Some(fields),
            ..Default::default()
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.as_ref().and_then(|f| f.get(name))
    }
}

/// Reference to the content type of a [`ListItem`].
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeInfo {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A content type defined on a site or list.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub group: Option<String>,
    pub hidden: Option<bool>,
    pub read_only: Option<bool>,
    pub sealed: Option<bool>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_item_fields() {
        let item: ListItem = serde_json::from_value(json!({
            "id": "7",
            "contentType": {"id": "0x0100", "name": "Item"},
            "fields": {"Title": "Widget", "Quantity": 4}
        }))
        .unwrap();

        assert_eq!(item.field("Title"), Some(&json!("Widget")));
        assert_eq!(item.content_type.unwrap().name.as_deref(), Some("Item"));
    }

    #[test]
    fn test_list_facet() {
        let list: List = serde_json::from_value(json!({
            "id": "l1",
            "displayName": "Tasks",
            "list": {"template": "genericList", "hidden": false}
        }))
        .unwrap();
        assert_eq!(list.list.unwrap().template.as_deref(), Some("genericList"));
    }
}
