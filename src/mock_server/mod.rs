//! Mock Microsoft Graph server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates a slice of the
//! Graph API for integration and end-to-end testing. Unlike wiremock which
//! mocks at the HTTP level per-test, this server maintains state across
//! requests, enabling realistic workflow testing: create a group, patch it,
//! list it back with `$filter`, then delete it.
//!
//! Errors come back as OData error bodies, so the client's error mapping is
//! exercised end to end.
//!
//! # Example
//!
//! ```ignore
//! use graphapi::mock_server::MockServer;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = server.client("test-token");
//!
//!     // Server comes with default fixtures
//!     let group = client.groups().by_group_id("g-engineering").get(None).await.unwrap();
//!     assert_eq!(group.unwrap().display_name.as_deref(), Some("Engineering"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod odata;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use odata::ODataQuery;
pub use server::MockServer;
pub use state::{MockEntity, MockState};
