//! HTTP transport for request builders.

mod adapter;
mod auth;

pub use adapter::{HttpRequestAdapter, DEFAULT_BASE_URL};
pub use auth::{
    AnonymousAuthenticationProvider, AuthenticationProvider, BearerTokenProvider, GRAPH_HOSTS,
};
