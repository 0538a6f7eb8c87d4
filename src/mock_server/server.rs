//! Mock Microsoft Graph server.
//!
//! Provides an axum-based HTTP server that simulates a slice of the Graph v1.0 API.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;
use crate::http::HttpRequestAdapter;
use crate::{GraphServiceClient, Group, User};

/// A mock Graph server for testing.
///
/// The server runs in the background and serves `/groups`, `/users` and their
/// calendars from in-memory state.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(mut state: MockState) -> Self {
        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");
        let url = format!("http://{}", addr);

        state.base_url = url.clone();
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url,
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL as the adapter base URL when creating a client.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Build a client that talks to this server with the given bearer token.
    pub fn client(&self, token: &str) -> GraphServiceClient {
        let adapter = HttpRequestAdapter::with_token(token, &self.url, Duration::from_secs(10))
            .expect("Failed to create adapter");
        GraphServiceClient::new(Arc::new(adapter))
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        let scenario = Fixtures::default_scenario();
        Self::state_from_scenario(scenario)
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for group in scenario.groups {
            state.insert(group);
        }

        for user in scenario.users {
            state.insert(user);
        }

        for (group_id, event) in scenario.group_events {
            state.insert_event("groups", &group_id, event);
        }

        for (user_id, event) in scenario.user_events {
            state.insert_event("users", &user_id, event);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Group routes
            .route(
                "/groups",
                get(handlers::list::<Group>).post(handlers::create::<Group>),
            )
            .route(
                "/groups/:id",
                get(handlers::get_one::<Group>)
                    .patch(handlers::update::<Group>)
                    .delete(handlers::delete::<Group>),
            )
            .route(
                "/groups/:id/events",
                get(handlers::list_events::<Group>).post(handlers::create_event::<Group>),
            )
            .route(
                "/groups/:id/events/:event_id",
                get(handlers::get_event::<Group>)
                    .patch(handlers::update_event::<Group>)
                    .delete(handlers::delete_event::<Group>),
            )
            // User routes
            .route(
                "/users",
                get(handlers::list::<User>).post(handlers::create::<User>),
            )
            .route(
                "/users/:id",
                get(handlers::get_one::<User>)
                    .patch(handlers::update::<User>)
                    .delete(handlers::delete::<User>),
            )
            .route(
                "/users/:id/events",
                get(handlers::list_events::<User>).post(handlers::create_event::<User>),
            )
            .route(
                "/users/:id/events/:event_id",
                get(handlers::get_event::<User>)
                    .patch(handlers::update_event::<User>)
                    .delete(handlers::delete_event::<User>),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstractions::{CollectionQueryParameters, RequestConfiguration};
    use crate::GraphError;

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_group_with_client() {
        let server = MockServer::start().await;
        let client = server.client("test-token");

        let group = client
            .groups()
            .by_group_id("g-engineering")
            .get(None)
            .await
            .expect("Failed to get group")
            .expect("Expected a body");

        assert_eq!(group.display_name.as_deref(), Some("Engineering"));
        assert!(group.is_unified());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_groups_with_top() {
        let server = MockServer::start().await;
        let client = server.client("test-token");

        let config = RequestConfiguration::with_query(CollectionQueryParameters {
            top: Some(2),
            ..Default::default()
        });
        let page = client
            .groups()
            .get(Some(&config))
            .await
            .expect("Failed to list groups")
            .unwrap_or_default();

        assert_eq!(page.len(), 2);
        assert!(page.has_more());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_missing_group_is_odata_not_found() {
        let server = MockServer::start_empty().await;
        let client = server.client("test-token");

        let err = client
            .groups()
            .by_group_id("nonexistent")
            .get(None)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.odata_code(), Some("Request_ResourceNotFound"));
        assert!(matches!(err, GraphError::OData { .. }));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_required_token_is_enforced() {
        let state = MockState::new()
            .with_group(Fixtures::minimal_group("g1", "Only"))
            .with_required_token("secret");
        let server = MockServer::with_state(state).await;

        let denied = server.client("wrong").groups().by_group_id("g1").get(None).await;
        assert_eq!(denied.unwrap_err().status_code(), Some(401));

        let allowed = server.client("secret").groups().by_group_id("g1").get(None).await;
        assert!(allowed.unwrap().is_some());

        server.shutdown().await;
    }
}
