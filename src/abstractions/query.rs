//! OData query parameter schemas.
//!
//! Query structs are plain `Serialize` types whose fields are renamed to
//! their wire names (`%24select`, `%24top`, ...), matching the variable names
//! used in URL templates.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{GraphError, Result};

/// A query parameter value ready for template expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    List(Vec<String>),
}

/// Flatten a query struct into wire-name keyed values.
///
/// `None` fields are skipped; numbers and booleans are rendered with their
/// JSON text form.
pub fn to_query_values<Q: Serialize + ?Sized>(query: &Q) -> Result<BTreeMap<String, QueryValue>> {
    let value = serde_json::to_value(query)?;
    let object = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(BTreeMap::new()),
        other => {
            return Err(GraphError::InvalidRequest(format!(
                "query parameters must serialize to an object, got {other}"
            )))
        }
    };

    let mut values = BTreeMap::new();
    for (name, value) in object {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                let items = items
                    .into_iter()
                    .filter(|v| !v.is_null())
                    .map(scalar_to_string)
                    .collect::<Result<Vec<_>>>()?;
                values.insert(name, QueryValue::List(items));
            }
            scalar => {
                values.insert(name, QueryValue::Single(scalar_to_string(scalar)?));
            }
        }
    }
    Ok(values)
}

fn scalar_to_string(value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(GraphError::InvalidRequest(format!(
            "unsupported query parameter value: {other}"
        ))),
    }
}

/// Query options for endpoints that take none.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoQueryParameters {}

/// Query options accepted when reading a single entity.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemQueryParameters {
    /// Expand related entities
    #[serde(rename = "%24expand")]
    pub expand: Option<Vec<String>>,
    /// Select properties to be returned
    #[serde(rename = "%24select")]
    pub select: Option<Vec<String>>,
}

/// Query options accepted when listing a collection.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectionQueryParameters {
    /// Include count of items
    #[serde(rename = "%24count")]
    pub count: Option<bool>,
    /// Expand related entities
    #[serde(rename = "%24expand")]
    pub expand: Option<Vec<String>>,
    /// Filter items by property values
    #[serde(rename = "%24filter")]
    pub filter: Option<String>,
    /// Order items by property values
    #[serde(rename = "%24orderby")]
    pub orderby: Option<Vec<String>>,
    /// Search items by search phrases
    #[serde(rename = "%24search")]
    pub search: Option<String>,
    /// Select properties to be returned
    #[serde(rename = "%24select")]
    pub select: Option<Vec<String>>,
    /// Skip the first n items
    #[serde(rename = "%24skip")]
    pub skip: Option<i32>,
    /// Show only the first n items
    #[serde(rename = "%24top")]
    pub top: Option<i32>,
}

/// Query options accepted by `$count` endpoints.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct CountQueryParameters {
    /// Filter items by property values
    #[serde(rename = "%24filter")]
    pub filter: Option<String>,
    /// Search items by search phrases
    #[serde(rename = "%24search")]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_query_wire_names() {
        let query = CollectionQueryParameters {
            count: Some(true),
            filter: Some("startswith(displayName,'a')".to_string()),
            select: Some(vec!["id".to_string(), "mail".to_string()]),
            top: Some(10),
            ..Default::default()
        };

        let values = to_query_values(&query).unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values["%24count"], QueryValue::Single("true".to_string()));
        assert_eq!(values["%24top"], QueryValue::Single("10".to_string()));
        assert_eq!(
            values["%24select"],
            QueryValue::List(vec!["id".to_string(), "mail".to_string()])
        );
        assert!(!values.contains_key("%24skip"));
    }

    #[test]
    fn test_empty_query_has_no_values() {
        assert!(to_query_values(&NoQueryParameters {}).unwrap().is_empty());
        assert!(to_query_values(&ItemQueryParameters::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_non_object_query_is_rejected() {
        let result = to_query_values(&vec![1, 2, 3]);
        assert!(matches!(result, Err(GraphError::InvalidRequest(_))));
    }
}
