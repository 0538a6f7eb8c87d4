//! OData system query options and error bodies for the mock server.
//!
//! Supports the subset the client sends: `$top`, `$skip`, `$filter` with `eq`
//! and `startswith`, `$search` on one property, `$orderby` on one property,
//! `$select` and `$count`.

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::state::MockState;

/// Query options extracted from the request URL.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ODataQuery {
    #[serde(rename = "$top")]
    pub top: Option<usize>,
    #[serde(rename = "$skip")]
    pub skip: Option<usize>,
    #[serde(rename = "$filter")]
    pub filter: Option<String>,
    #[serde(rename = "$search")]
    pub search: Option<String>,
    #[serde(rename = "$orderby")]
    pub orderby: Option<String>,
    #[serde(rename = "$select")]
    pub select: Option<String>,
    #[serde(rename = "$count")]
    pub count: Option<bool>,
}

/// Build an OData error response.
pub fn error(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    let body = json!({
        "error": {
            "code": code,
            "message": message.into(),
            "innerError": {
                "request-id": "00000000-0000-0000-0000-000000000000",
                "date": "2024-01-01T00:00:00"
            }
        }
    });
    (status, Json(body)).into_response()
}

pub fn not_found(id: &str) -> Response {
    error(
        StatusCode::NOT_FOUND,
        "Request_ResourceNotFound",
        format!("Resource '{id}' does not exist or one of its queried reference-property objects are not present."),
    )
}

pub fn bad_request(message: impl Into<String>) -> Response {
    error(StatusCode::BAD_REQUEST, "Request_BadRequest", message)
}

/// Reject the request unless it carries the configured bearer token.
pub fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(expected) = &state.required_token else {
        return Ok(());
    };
    let presented = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if presented == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(error(
            StatusCode::UNAUTHORIZED,
            "InvalidAuthenticationToken",
            "Access token is empty.",
        ))
    }
}

/// Advanced queries on directory objects need `ConsistencyLevel: eventual`.
pub fn require_eventual_consistency(headers: &HeaderMap) -> Result<(), Response> {
    let eventual = headers
        .get("consistencylevel")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("eventual"));
    if eventual {
        Ok(())
    } else {
        Err(bad_request("Count is not currently supported."))
    }
}

#[derive(Debug, PartialEq)]
enum Filter {
    Eq(String, String),
    StartsWith(String, String),
}

fn unquote(literal: &str) -> Option<String> {
    let inner = literal.trim().strip_prefix('\'')?.strip_suffix('\'')?;
    Some(inner.replace("''", "'"))
}

fn parse_filter(expr: &str) -> Option<Filter> {
    let expr = expr.trim();
    if let Some(args) = expr
        .strip_prefix("startswith(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let (property, literal) = args.split_once(',')?;
        return Some(Filter::StartsWith(property.trim().to_string(), unquote(literal)?));
    }
    let (property, literal) = expr.split_once(" eq ")?;
    Some(Filter::Eq(property.trim().to_string(), unquote(literal)?))
}

fn property<'a>(item: &'a Value, name: &str) -> Option<&'a str> {
    item.get(name).and_then(Value::as_str)
}

impl Filter {
    fn matches(&self, item: &Value) -> bool {
        match self {
            Filter::Eq(name, expected) => {
                property(item, name).is_some_and(|v| v.eq_ignore_ascii_case(expected))
            }
            Filter::StartsWith(name, prefix) => property(item, name)
                .is_some_and(|v| v.to_lowercase().starts_with(&prefix.to_lowercase())),
        }
    }
}

/// Parse `"displayName:team"` (quotes optional) into a property and term.
fn parse_search(expr: &str) -> Option<(String, String)> {
    let expr = expr.trim().trim_matches('"');
    let (name, term) = expr.split_once(':')?;
    Some((name.to_string(), term.to_lowercase()))
}

impl ODataQuery {
    /// Apply `$filter` and `$search` to a set of entities.
    pub fn matching<T: Serialize>(&self, items: &[&T]) -> Result<Vec<Value>, Response> {
        let filter = match &self.filter {
            Some(expr) => Some(
                parse_filter(expr)
                    .ok_or_else(|| bad_request(format!("Invalid filter clause: {expr}")))?,
            ),
            None => None,
        };
        let search = match &self.search {
            Some(expr) => Some(
                parse_search(expr)
                    .ok_or_else(|| bad_request(format!("Syntax error: invalid $search {expr}")))?,
            ),
            None => None,
        };

        let mut values = Vec::with_capacity(items.len());
        for item in items {
            let value = serde_json::to_value(item)
                .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, "generalException", e.to_string()))?;
            let keep = filter.as_ref().map_or(true, |f| f.matches(&value))
                && search.as_ref().map_or(true, |(name, term)| {
                    property(&value, name).is_some_and(|v| v.to_lowercase().contains(term))
                });
            if keep {
                values.push(value);
            }
        }
        Ok(values)
    }

    /// Apply `$select` to a single entity.
    pub fn project(&self, value: Value) -> Value {
        let Some(select) = &self.select else {
            return value;
        };
        let Value::Object(map) = value else {
            return value;
        };
        let wanted: Vec<&str> = select.split(',').map(str::trim).collect();
        let projected: Map<String, Value> = map
            .into_iter()
            .filter(|(key, _)| key.starts_with("@odata.") || wanted.contains(&key.as_str()))
            .collect();
        Value::Object(projected)
    }

    /// Build a collection response body for `path` under `base_url`.
    pub fn collection<T: Serialize>(
        &self,
        items: &[&T],
        base_url: &str,
        path: &str,
    ) -> Result<Value, Response> {
        let mut values = self.matching(items)?;
        let total = values.len();

        if let Some(orderby) = &self.orderby {
            let first = orderby.split(',').next().unwrap_or_default();
            let mut parts = first.split_whitespace();
            let name = parts.next().unwrap_or_default().to_string();
            let descending = parts.next().is_some_and(|d| d.eq_ignore_ascii_case("desc"));
            values.sort_by(|a, b| {
                let order = property(a, &name)
                    .unwrap_or_default()
                    .cmp(property(b, &name).unwrap_or_default());
                if descending {
                    order.reverse()
                } else {
                    order
                }
            });
        }

        let skip = self.skip.unwrap_or(0);
        let top = self.top.unwrap_or(usize::MAX);
        let page: Vec<Value> = values
            .into_iter()
            .skip(skip)
            .take(top)
            .map(|v| self.project(v))
            .collect();

        let mut body = Map::new();
        body.insert(
            "@odata.context".to_string(),
            Value::String(format!("{base_url}/$metadata#{}", path.trim_start_matches('/'))),
        );
        if self.count == Some(true) {
            body.insert("@odata.count".to_string(), json!(total));
        }
        if !page.is_empty() && skip.saturating_add(page.len()) < total {
            body.insert(
                "@odata.nextLink".to_string(),
                Value::String(self.next_link(base_url, path, skip + page.len())),
            );
        }
        body.insert("value".to_string(), Value::Array(page));
        Ok(Value::Object(body))
    }

    fn next_link(&self, base_url: &str, path: &str, skip: usize) -> String {
        let mut params = vec![format!("%24skip={skip}")];
        if let Some(top) = self.top {
            params.push(format!("%24top={top}"));
        }
        let optional = [
            ("%24filter", &self.filter),
            ("%24search", &self.search),
            ("%24orderby", &self.orderby),
            ("%24select", &self.select),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                params.push(format!("{key}={}", urlencoding::encode(value)));
            }
        }
        format!("{base_url}{path}?{}", params.join("&"))
    }
}
