//! Request builder contract tests.
//!
//! A recording adapter captures every request so URL resolution, headers and
//! path parameter threading can be checked without a network.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use graphapi::abstractions::{
    ErrorMappings, HttpMethod, PathParameters, RequestAdapter, ACCEPT_JSON,
};
use graphapi::groups::GroupEventItemRequestBuilder;
use graphapi::models::{GetMemberGroupsPostRequestBody, Team, TeamMemberSettings};
use graphapi::{
    CollectionQueryParameters, CountQueryParameters, DirectoryObject, GraphError,
    GraphServiceClient, Group, ItemQueryParameters, ODataError, RequestConfiguration,
    RequestInformation,
};
use serde_json::{json, Value};

const BASE: &str = "https://graph.microsoft.com/v1.0";

/// Records requests and answers from canned data.
#[derive(Default)]
struct RecordingAdapter {
    requests: Mutex<Vec<RequestInformation>>,
    body: Option<Value>,
    primitive: Option<Vec<u8>>,
    fail_with: Option<u16>,
}

impl RecordingAdapter {
    fn responding(body: Value) -> Self {
        Self {
            body: Some(body),
            ..Default::default()
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Default::default()
        }
    }

    fn record(&self, request: RequestInformation) -> graphapi::Result<()> {
        // Resolve like a real adapter so template errors surface here
        request.uri()?;
        self.requests.lock().unwrap().push(request);
        match self.fail_with {
            Some(status) => Err(GraphError::OData {
                status,
                error: ODataError::new("Request_ResourceNotFound", "missing"),
                headers: Default::default(),
            }),
            None => Ok(()),
        }
    }

    fn last(&self) -> RequestInformation {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }

    fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl RequestAdapter for RecordingAdapter {
    fn base_url(&self) -> String {
        BASE.to_string()
    }

    async fn send(
        &self,
        request: RequestInformation,
        _error_mappings: &ErrorMappings,
    ) -> graphapi::Result<Option<Value>> {
        self.record(request)?;
        Ok(self.body.clone())
    }

    async fn send_primitive(
        &self,
        request: RequestInformation,
        _error_mappings: &ErrorMappings,
    ) -> graphapi::Result<Option<Vec<u8>>> {
        self.record(request)?;
        Ok(self.primitive.clone())
    }

    async fn send_no_content(
        &self,
        request: RequestInformation,
        _error_mappings: &ErrorMappings,
    ) -> graphapi::Result<()> {
        self.record(request)
    }
}

fn client_with(adapter: RecordingAdapter) -> (GraphServiceClient, Arc<RecordingAdapter>) {
    let adapter = Arc::new(adapter);
    (GraphServiceClient::new(adapter.clone()), adapter)
}

fn accept(info: &RequestInformation) -> &str {
    info.headers
        .get("accept")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

// =============================================================================
// Navigation
// =============================================================================

#[tokio::test]
async fn test_delete_group_event_resolves_full_url() {
    let (client, adapter) = client_with(RecordingAdapter::default());

    let result = client
        .groups()
        .by_group_id("g1")
        .events()
        .by_event_id("e1")
        .delete(None)
        .await;

    assert!(result.is_ok());
    assert_eq!(adapter.count(), 1);
    let info = adapter.last();
    assert_eq!(info.method, HttpMethod::Delete);
    assert_eq!(info.uri().unwrap().as_str(), format!("{BASE}/groups/g1/events/e1"));
    assert_eq!(accept(&info), ACCEPT_JSON);
}

#[test]
fn test_raw_url_matches_navigated_url() {
    let (client, adapter) = client_with(RecordingAdapter::default());

    let navigated = client
        .groups()
        .by_group_id("g1")
        .events()
        .by_event_id("e1")
        .to_get_request_information(None)
        .unwrap();
    let raw = GroupEventItemRequestBuilder::new(format!("{BASE}/groups/g1/events/e1"), adapter)
        .to_get_request_information(None)
        .unwrap();

    assert_eq!(navigated.uri().unwrap(), raw.uri().unwrap());
}

#[test]
fn test_indexed_navigation_adds_exactly_one_parameter() {
    let (client, _) = client_with(RecordingAdapter::default());

    let content_types = client
        .groups()
        .by_group_id("g1")
        .sites()
        .by_site_id("s1")
        .lists()
        .by_list_id("l1")
        .content_types();
    let item = content_types.by_content_type_id("0x0101");

    let before: PathParameters = content_types.path_parameters().clone();
    let after = item.path_parameters();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after.get("contentType%2Did").map(String::as_str), Some("0x0101"));
    for (key, value) in &before {
        assert_eq!(after.get(key), Some(value));
    }
    // The parent keeps its own copy
    assert!(!content_types.path_parameters().contains_key("contentType%2Did"));
}

#[test]
fn test_non_indexed_navigation_copies_parameters() {
    let (client, _) = client_with(RecordingAdapter::default());

    let group = client.groups().by_group_id("g1");
    let events = group.events();

    assert_eq!(group.path_parameters(), events.path_parameters());
}

#[test]
fn test_client_seeds_base_url() {
    let (client, _) = client_with(RecordingAdapter::default());

    assert_eq!(
        client.path_parameters().get("baseurl").map(String::as_str),
        Some(BASE)
    );
    let info = client.me().to_get_request_information(None).unwrap();
    assert_eq!(info.uri().unwrap().as_str(), format!("{BASE}/me"));
}

#[test]
fn test_report_period_is_substituted() {
    let (client, _) = client_with(RecordingAdapter::default());

    let info = client
        .reports()
        .get_email_activity_counts_with_period("D7")
        .to_get_request_information(None)
        .unwrap();

    assert_eq!(
        info.uri().unwrap().as_str(),
        format!("{BASE}/reports/getEmailActivityCounts(period='D7')")
    );
    assert_eq!(accept(&info), "application/octet-stream");
}

#[tokio::test]
async fn test_missing_path_parameter_fails_locally() {
    let adapter = Arc::new(RecordingAdapter::default());
    let mut params = PathParameters::new();
    params.insert("baseurl".to_string(), BASE.to_string());
    params.insert("group%2Did".to_string(), "g1".to_string());

    let builder = GroupEventItemRequestBuilder::from_parts(params, adapter.clone());
    let err = builder.delete(None).await.unwrap_err();

    assert!(matches!(err, GraphError::MissingPathParameter { ref name, .. } if name == "event%2Did"));
    assert_eq!(adapter.count(), 0);
}

// =============================================================================
// Headers and query parameters
// =============================================================================

#[test]
fn test_accept_header_by_response_kind() {
    let (client, _) = client_with(RecordingAdapter::default());

    let collection = client.groups().to_get_request_information(None).unwrap();
    assert_eq!(accept(&collection), "application/json");

    let count = client.groups().count().to_get_request_information(None).unwrap();
    assert_eq!(accept(&count), "text/plain;q=0.9");
    assert_eq!(count.uri().unwrap().as_str(), format!("{BASE}/groups/$count"));

    // A configuration without its own Accept header keeps the default
    let config = RequestConfiguration::with_query(CollectionQueryParameters {
        top: Some(3),
        ..Default::default()
    })
    .header("ConsistencyLevel", "eventual")
    .unwrap();
    let configured = client.groups().to_get_request_information(Some(&config)).unwrap();
    assert_eq!(accept(&configured), "application/json");
    assert_eq!(configured.headers.get_all("accept").iter().count(), 1);

    let config = RequestConfiguration::with_query(CountQueryParameters {
        filter: Some("mailEnabled eq true".to_string()),
        search: None,
    })
    .header("ConsistencyLevel", "eventual")
    .unwrap();
    let configured_count = client
        .groups()
        .count()
        .to_get_request_information(Some(&config))
        .unwrap();
    assert_eq!(accept(&configured_count), "text/plain;q=0.9");
}

#[test]
fn test_configured_accept_header_wins() {
    let (client, _) = client_with(RecordingAdapter::default());

    let config = RequestConfiguration::new().header("Accept", "text/csv").unwrap();
    let info = client
        .reports()
        .get_email_activity_counts_with_period("D30")
        .to_get_request_information(Some(&config))
        .unwrap();

    assert_eq!(accept(&info), "text/csv");
    assert_eq!(info.headers.get_all("accept").iter().count(), 1);
}

#[test]
fn test_query_only_when_configured() {
    let (client, _) = client_with(RecordingAdapter::default());

    let plain = client.groups().to_get_request_information(None).unwrap();
    assert_eq!(plain.uri().unwrap().as_str(), format!("{BASE}/groups"));

    let config = RequestConfiguration::with_query(CollectionQueryParameters {
        select: Some(vec!["id".to_string(), "displayName".to_string()]),
        top: Some(5),
        ..Default::default()
    });
    let queried = client.groups().to_get_request_information(Some(&config)).unwrap();
    assert_eq!(
        queried.uri().unwrap().as_str(),
        format!("{BASE}/groups?%24select=id,displayName&%24top=5")
    );
}

#[test]
fn test_count_query_and_headers() {
    let (client, _) = client_with(RecordingAdapter::default());

    let config = RequestConfiguration::with_query(CountQueryParameters {
        filter: Some("startswith(displayName,'a')".to_string()),
        search: None,
    })
    .header("ConsistencyLevel", "eventual")
    .unwrap();
    let info = client.users().count().to_get_request_information(Some(&config)).unwrap();

    assert!(info.uri().unwrap().as_str().starts_with(&format!("{BASE}/users/$count?%24filter=")));
    assert_eq!(
        info.headers.get("consistencylevel").and_then(|v| v.to_str().ok()),
        Some("eventual")
    );
}

#[test]
fn test_post_carries_json_body() {
    let (client, _) = client_with(RecordingAdapter::default());

    let group = Group {
        display_name: Some("Library Assist".to_string()),
        mail_nickname: Some("library".to_string()),
        ..Default::default()
    };
    let info = client.groups().to_post_request_information(&group, None).unwrap();

    assert_eq!(info.method, HttpMethod::Post);
    assert_eq!(
        info.headers.get("content-type").and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let body: Value = serde_json::from_slice(info.content.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"displayName": "Library Assist", "mailNickname": "library"}));
}

#[test]
fn test_put_team_carries_json_body() {
    let (client, _) = client_with(RecordingAdapter::default());

    let team = Team {
        member_settings: Some(TeamMemberSettings {
            allow_create_update_channels: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    };
    let info = client
        .groups()
        .by_group_id("g1")
        .team()
        .to_put_request_information(&team, None)
        .unwrap();

    assert_eq!(info.method, HttpMethod::Put);
    assert_eq!(info.uri().unwrap().as_str(), format!("{BASE}/groups/g1/team"));
    assert_eq!(accept(&info), ACCEPT_JSON);
    assert_eq!(
        info.headers.get("content-type").and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let body: Value = serde_json::from_slice(info.content.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"memberSettings": {"allowCreateUpdateChannels": true}}));
}

#[tokio::test]
async fn test_put_team_returns_created_team() {
    let (client, adapter) = client_with(RecordingAdapter::responding(json!({
        "id": "g1",
        "isArchived": false,
        "webUrl": "https://teams.microsoft.com/l/team/19%3a1"
    })));

    let team = client
        .groups()
        .by_group_id("g1")
        .team()
        .put(&Team::default(), None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(team.id.as_deref(), Some("g1"));
    assert_eq!(team.is_archived, Some(false));
    assert_eq!(adapter.last().method, HttpMethod::Put);
}

// =============================================================================
// Responses
// =============================================================================

#[tokio::test]
async fn test_get_uses_typed_model() {
    let (client, _) = client_with(RecordingAdapter::responding(json!({
        "id": "g1",
        "displayName": "Engineering",
        "groupTypes": ["Unified"]
    })));

    let config = RequestConfiguration::with_query(ItemQueryParameters {
        select: Some(vec!["id".to_string(), "displayName".to_string()]),
        ..Default::default()
    });
    let group = client
        .groups()
        .by_group_id("g1")
        .get(Some(&config))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(group.display_name.as_deref(), Some("Engineering"));
    assert!(group.is_unified());
}

#[tokio::test]
async fn test_members_are_polymorphic() {
    let (client, _) = client_with(RecordingAdapter::responding(json!({
        "value": [
            {"@odata.type": "#microsoft.graph.user", "id": "u1", "displayName": "Adele"},
            {"@odata.type": "#microsoft.graph.group", "id": "g2", "displayName": "Sales"},
            {"@odata.type": "#microsoft.graph.device", "id": "d1"}
        ]
    })));

    let members = client
        .groups()
        .by_group_id("g1")
        .members()
        .get(None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(members.len(), 3);
    assert!(matches!(members.value[0], DirectoryObject::User(_)));
    assert!(matches!(members.value[1], DirectoryObject::Group(_)));
    assert!(matches!(members.value[2], DirectoryObject::Other(_)));
    assert_eq!(members.value[1].display_name(), Some("Sales"));
}

#[tokio::test]
async fn test_empty_body_is_none() {
    let (client, _) = client_with(RecordingAdapter::default());

    let group = client.groups().by_group_id("g1").get(None).await.unwrap();
    assert!(group.is_none());

    let count = client.groups().count().get(None).await.unwrap();
    assert!(count.is_none());
}

#[tokio::test]
async fn test_count_parses_text() {
    let (client, _) = client_with(RecordingAdapter {
        primitive: Some(b"17\n".to_vec()),
        ..Default::default()
    });

    let count = client.users().count().get(None).await.unwrap();
    assert_eq!(count, Some(17));
}

#[tokio::test]
async fn test_unparseable_count_is_an_error() {
    let (client, _) = client_with(RecordingAdapter {
        primitive: Some(b"many".to_vec()),
        ..Default::default()
    });

    let err = client.users().count().get(None).await.unwrap_err();
    assert!(matches!(err, GraphError::PrimitiveParse(_)));
}

#[tokio::test]
async fn test_adapter_errors_propagate_unchanged() {
    let (client, adapter) = client_with(RecordingAdapter::failing(404));

    let err = client
        .users()
        .by_user_id("missing")
        .events()
        .by_event_id("e1")
        .delete(None)
        .await
        .unwrap_err();

    assert_eq!(adapter.count(), 1);
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.odata_code(), Some("Request_ResourceNotFound"));
}

#[tokio::test]
#[allow(deprecated)]
async fn test_get_member_groups_alias_sends_same_request() {
    let (client, adapter) = client_with(RecordingAdapter::responding(json!({
        "value": ["g2", "g3"]
    })));
    let body = GetMemberGroupsPostRequestBody {
        security_enabled_only: Some(true),
    };
    let action = client.groups().by_group_id("g1").get_member_groups();

    let current = action
        .post_as_get_member_groups_post_response(&body, None)
        .await
        .unwrap()
        .unwrap();
    let first = adapter.last();
    let deprecated = action.post(&body, None).await.unwrap().unwrap();
    let second = adapter.last();

    assert_eq!(current.value, vec!["g2".to_string(), "g3".to_string()]);
    assert_eq!(current, deprecated);
    assert_eq!(first.uri().unwrap(), second.uri().unwrap());
    assert_eq!(first.content, second.content);
    assert_eq!(
        first.uri().unwrap().as_str(),
        format!("{BASE}/groups/g1/getMemberGroups")
    );
}

#[tokio::test]
async fn test_add_favorite_posts_without_body() {
    let (client, adapter) = client_with(RecordingAdapter::default());

    client.groups().by_group_id("g1").add_favorite().post(None).await.unwrap();

    let info = adapter.last();
    assert_eq!(info.method, HttpMethod::Post);
    assert!(info.content.is_none());
    assert_eq!(info.uri().unwrap().as_str(), format!("{BASE}/groups/g1/addFavorite"));
}
