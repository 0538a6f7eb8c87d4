//! Authentication providers applied by the HTTP adapter.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use url::Url;

use crate::abstractions::RequestInformation;
use crate::error::{GraphError, Result};

/// Adds credentials to a request before it is sent.
#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    /// Authenticate `request` in place. `url` is the resolved target.
    async fn authenticate_request(&self, request: &mut RequestInformation, url: &Url) -> Result<()>;
}

/// Sends requests without credentials. Useful against mock servers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousAuthenticationProvider;

#[async_trait]
impl AuthenticationProvider for AnonymousAuthenticationProvider {
    async fn authenticate_request(&self, _request: &mut RequestInformation, _url: &Url) -> Result<()> {
        Ok(())
    }
}

/// Hosts a bearer token is sent to unless configured otherwise.
pub const GRAPH_HOSTS: &[&str] = &[
    "graph.microsoft.com",
    "graph.microsoft.us",
    "dod-graph.microsoft.us",
    "graph.microsoft.de",
    "microsoftgraph.chinacloudapi.cn",
    "canary.graph.microsoft.com",
];

/// Attaches a static bearer token.
///
/// The token is only sent to allowed hosts; an empty allow-list permits any
/// host. Targets must be https unless they are on the loopback interface.
/// A caller-supplied `Authorization` header is left untouched.
#[derive(Clone)]
pub struct BearerTokenProvider {
    token: String,
    allowed_hosts: Vec<String>,
}

impl std::fmt::Debug for BearerTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenProvider")
            .field("allowed_hosts", &self.allowed_hosts)
            .finish_non_exhaustive()
    }
}

impl BearerTokenProvider {
    /// A provider that sends `token` to the national Graph cloud hosts.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            allowed_hosts: GRAPH_HOSTS.iter().map(|h| h.to_string()).collect(),
        }
    }

    /// Replace the allow-list. Pass an empty list to allow every host.
    pub fn with_allowed_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_hosts = hosts.into_iter().map(|h| h.into().to_ascii_lowercase()).collect();
        self
    }

    fn is_allowed(&self, host: &str) -> bool {
        self.allowed_hosts.is_empty()
            || self
                .allowed_hosts
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(host))
    }
}

fn is_localhost(url: &Url) -> bool {
    match url.host() {
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

#[async_trait]
impl AuthenticationProvider for BearerTokenProvider {
    async fn authenticate_request(&self, request: &mut RequestInformation, url: &Url) -> Result<()> {
        let host = url.host_str().unwrap_or_default();
        if request.headers.contains_key(AUTHORIZATION) || !self.is_allowed(host) {
            return Ok(());
        }
        if url.scheme() != "https" && !is_localhost(url) {
            return Err(GraphError::InvalidRequest(format!(
                "scheme must be https to send a bearer token to {host}"
            )));
        }
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| GraphError::InvalidRequest("access token is not a valid header value".to_string()))?;
        value.set_sensitive(true);
        request.headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}
