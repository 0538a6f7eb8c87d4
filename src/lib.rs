//! Microsoft Graph client library.
//!
//! Typed request builders for the Microsoft Graph REST API. Each node of the
//! resource tree (`/groups`, `/groups/{id}/events`, ...) is a builder that
//! knows its URL template; navigation methods derive child builders and verb
//! methods (`get`, `post`, `patch`, `put`, `delete`) send one request through
//! a shared [`RequestAdapter`].
//!
//! # Quick Start
//!
//! ```no_run
//! use graphapi::{CollectionQueryParameters, GraphServiceClient, RequestConfiguration};
//!
//! #[tokio::main]
//! async fn main() -> graphapi::Result<()> {
//!     // Create client from environment variables
//!     let client = GraphServiceClient::from_env()?;
//!
//!     // List the first ten groups
//!     let config = RequestConfiguration::with_query(CollectionQueryParameters {
//!         top: Some(10),
//!         select: Some(vec!["id".into(), "displayName".into()]),
//!         ..Default::default()
//!     });
//!     let groups = client.groups().get(Some(&config)).await?.unwrap_or_default();
//!     println!("Found {} groups", groups.len());
//!
//!     // Delete an event from a group calendar
//!     client
//!         .groups()
//!         .by_group_id("g1")
//!         .events()
//!         .by_event_id("e1")
//!         .delete(None)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`abstractions`] holds the transport-independent core: URI templates,
//!   [`RequestInformation`], [`RequestConfiguration`], error mappings and the
//!   [`RequestAdapter`] trait.
//! - [`request_builder!`] and [`request_operations!`] declare builders and
//!   their verbs from a template and a list of operations.
//! - [`HttpRequestAdapter`] sends requests with reqwest.
//!
//! # Configuration
//!
//! [`GraphServiceClient::from_env`] reads:
//!
//! - `GRAPH_ACCESS_TOKEN` (required) - bearer token for Graph
//! - `GRAPH_BASE_URL` (optional) - service root (defaults to `https://graph.microsoft.com/v1.0`)
//! - `GRAPH_TIMEOUT_SECS` (optional) - request timeout (defaults to 300)

pub mod abstractions;
pub mod cli;
mod client;
pub mod drives;
pub mod entities;
mod error;
pub mod groups;
pub mod http;
pub mod mcp;
#[cfg(feature = "test-server")]
pub mod mock_server;
pub mod models;
pub mod output;
pub mod reports;
pub mod users;

// Re-export core types
pub use abstractions::{
    CollectionQueryParameters, CountQueryParameters, ItemQueryParameters, NoQueryParameters,
    RequestAdapter, RequestConfiguration, RequestInformation, RequestOption,
};
pub use client::GraphServiceClient;
pub use error::{GraphError, Result};
pub use http::{
    AnonymousAuthenticationProvider, AuthenticationProvider, BearerTokenProvider,
    HttpRequestAdapter,
};

// Re-export models
pub use models::{
    CollectionResponse, DirectoryObject, Drive, Event, Group, ODataError, User,
};
