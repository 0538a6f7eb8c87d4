//! E2E tests using the mock Graph server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use graphapi::entities::{self, EntityKind, EntityPage, Parent};
use graphapi::mock_server::{Fixtures, MockServer, MockState};
use graphapi::{
    CollectionQueryParameters, CountQueryParameters, Event, GraphError, Group,
    ItemQueryParameters, RequestConfiguration,
};

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Group Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_group_lifecycle_workflow() {
    let server = MockServer::start_empty().await;
    let client = server.client("test-token");

    // Step 1: Create a group and let the server assign its id
    let mut draft = Fixtures::unified_group("unused", "Research", "research");
    draft.id = None;
    let created = client
        .groups()
        .post(&draft, None)
        .await
        .expect("Failed to create group")
        .expect("Create should return the group");
    let id = created.id.clone().expect("Server should assign an id");

    // Step 2: Patch the description
    let patch = Group {
        description: Some("Applied research".to_string()),
        ..Default::default()
    };
    let patched = client
        .groups()
        .by_group_id(&id)
        .patch(&patch, None)
        .await
        .expect("Failed to patch group");
    assert!(patched.is_none(), "Graph answers PATCH with 204");

    // Step 3: Read it back with $select
    let config = RequestConfiguration::with_query(ItemQueryParameters {
        select: Some(vec!["displayName".to_string(), "description".to_string()]),
        ..Default::default()
    });
    let group = client
        .groups()
        .by_group_id(&id)
        .get(Some(&config))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(group.display_name.as_deref(), Some("Research"));
    assert_eq!(group.description.as_deref(), Some("Applied research"));
    assert!(group.mail.is_none(), "$select should drop unselected properties");

    // Step 4: Delete and confirm it is gone
    client.groups().by_group_id(&id).delete(None).await.unwrap();
    let err = client.groups().by_group_id(&id).get(None).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));

    server.shutdown().await;
}

#[tokio::test]
async fn test_group_not_found() {
    let server = MockServer::start().await;
    let client = server.client("test-token");

    let result = client.groups().by_group_id("no-such-group").get(None).await;

    match result {
        Err(GraphError::OData { status, error, .. }) => {
            assert_eq!(status, 404);
            assert_eq!(error.code(), Some("Request_ResourceNotFound"));
            assert!(error.request_id().is_some());
        }
        other => panic!("Expected OData 404, got {other:?}"),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_filter_and_count_groups() {
    let server = MockServer::start().await;
    let client = server.client("test-token");

    let page = entities::list_entities(
        &client,
        EntityKind::Group,
        &Parent::default(),
        CollectionQueryParameters {
            filter: Some("startswith(displayName,'eng')".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    match page {
        EntityPage::Groups(groups) => {
            assert_eq!(groups.len(), 1);
            assert_eq!(groups.value[0].id.as_deref(), Some("g-engineering"));
        }
        other => panic!("Expected groups, got {other:?}"),
    }

    let count = entities::count_entities(
        &client,
        EntityKind::Group,
        &Parent::default(),
        CountQueryParameters::default(),
    )
    .await
    .unwrap();
    assert_eq!(count, 3);

    server.shutdown().await;
}

#[tokio::test]
async fn test_count_without_consistency_level_is_rejected() {
    let server = MockServer::start().await;
    let client = server.client("test-token");

    let err = client.users().count().get(None).await.unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.odata_code(), Some("Request_BadRequest"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_pagination_follows_next_link() {
    let server = MockServer::start().await;
    let client = server.client("test-token");

    let config = RequestConfiguration::with_query(CollectionQueryParameters {
        top: Some(2),
        orderby: Some(vec!["displayName".to_string()]),
        ..Default::default()
    });
    let groups = client.groups();
    let first = groups.get(Some(&config)).await.unwrap().unwrap();
    assert_eq!(first.len(), 2);
    assert!(first.has_more());

    let next_link = first.next_link.clone().unwrap();
    let second = groups.with_url(next_link).get(None).await.unwrap().unwrap();
    assert_eq!(second.len(), 1);
    assert!(!second.has_more());

    let names: Vec<_> = first
        .into_iter()
        .chain(second)
        .filter_map(|g| g.display_name)
        .collect();
    assert_eq!(names, vec!["Engineering", "Marketing", "Tenant Admins"]);

    server.shutdown().await;
}

// =============================================================================
// Event Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_group_and_user_events() {
    let server = MockServer::start().await;
    let client = server.client("test-token");

    let group_events = client
        .groups()
        .by_group_id("g-engineering")
        .events()
        .get(None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(group_events.len(), 2);

    let review = client
        .users()
        .by_user_id("u-adele")
        .events()
        .by_event_id("e-review")
        .get(None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(review.subject.as_deref(), Some("Design Review"));

    let count = entities::count_entities(
        &client,
        EntityKind::Event,
        &Parent::group("g-engineering"),
        CountQueryParameters::default(),
    )
    .await
    .unwrap();
    assert_eq!(count, 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_event_lifecycle_workflow() {
    let server = MockServer::start().await;
    let client = server.client("test-token");
    let events = client.users().by_user_id("u-alex").events();

    let mut draft = Fixtures::event("unused", "Retro", 16);
    draft.id = None;
    let created: Event = events.post(&draft, None).await.unwrap().unwrap();
    let event_id = created.id.clone().unwrap();

    let patch = Event {
        subject: Some("Sprint Retro".to_string()),
        ..Default::default()
    };
    events.by_event_id(&event_id).patch(&patch, None).await.unwrap();

    let fetched = events.by_event_id(&event_id).get(None).await.unwrap().unwrap();
    assert_eq!(fetched.subject.as_deref(), Some("Sprint Retro"));
    assert_eq!(fetched.start, created.start);

    entities::delete_entity(&client, EntityKind::Event, &event_id, &Parent::user("u-alex"))
        .await
        .unwrap();

    let remaining = events.get(None).await.unwrap().unwrap();
    assert!(remaining.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_events_of_missing_owner() {
    let server = MockServer::start().await;
    let client = server.client("test-token");

    let err = client
        .groups()
        .by_group_id("nobody")
        .events()
        .get(None)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));

    server.shutdown().await;
}

// =============================================================================
// Custom State Tests
// =============================================================================

#[tokio::test]
async fn test_custom_state_with_required_token() {
    let state = MockState::new()
        .with_group(Fixtures::security_group("g-ops", "Operations"))
        .with_required_token("secret");
    let server = MockServer::with_state(state).await;

    let err = server
        .client("wrong")
        .groups()
        .get(None)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(401));

    let groups = server.client("secret").groups().get(None).await.unwrap().unwrap();
    assert_eq!(groups.len(), 1);
    assert!(!groups.value[0].is_unified());

    server.shutdown().await;
}

#[tokio::test]
async fn test_state_changes_are_visible() {
    let server = MockServer::start_empty().await;
    let client = server.client("test-token");

    let empty = client.users().get(None).await.unwrap().unwrap();
    assert!(empty.is_empty());

    server
        .state()
        .write()
        .await
        .insert(Fixtures::user("u-megan", "Megan Bowen", "meganb"));

    let user = client.users().by_user_id("u-megan").get(None).await.unwrap().unwrap();
    assert_eq!(user.mail.as_deref(), Some("meganb@contoso.com"));

    server.shutdown().await;
}
