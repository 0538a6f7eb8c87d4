//! reqwest-backed request adapter.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::abstractions::{ErrorMappings, RequestAdapter, RequestInformation, BASE_URL_KEY};
use crate::error::{GraphError, Result};
use crate::http::auth::{AuthenticationProvider, BearerTokenProvider, GRAPH_HOSTS};

/// Service root used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
const USER_AGENT: &str = concat!("graphapi/", env!("CARGO_PKG_VERSION"));

/// Sends [`RequestInformation`] over HTTP with reqwest.
///
/// This struct is cheaply cloneable; clones share the same connection pool
/// and authentication provider.
///
/// # Example
///
/// ```no_run
/// use graphapi::{BearerTokenProvider, HttpRequestAdapter};
///
/// # fn example() -> graphapi::Result<()> {
/// // Create from environment variables
/// let adapter = HttpRequestAdapter::from_env()?;
///
/// // Or configure manually
/// let adapter = HttpRequestAdapter::new(
///     BearerTokenProvider::new("token"),
///     "https://graph.microsoft.com/v1.0",
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpRequestAdapter {
    http: Client,
    base_url: Arc<str>,
    auth: Arc<dyn AuthenticationProvider>,
}

impl std::fmt::Debug for HttpRequestAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRequestAdapter")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpRequestAdapter {
    /// Create an adapter from environment variables.
    ///
    /// Uses `GRAPH_ACCESS_TOKEN` as a bearer token, and optionally
    /// `GRAPH_BASE_URL` (defaults to `https://graph.microsoft.com/v1.0`) and
    /// `GRAPH_TIMEOUT_SECS` (defaults to 300).
    ///
    /// # Errors
    ///
    /// Returns an error if `GRAPH_ACCESS_TOKEN` is not set or the other
    /// variables are malformed.
    pub fn from_env() -> Result<Self> {
        let token = env::var("GRAPH_ACCESS_TOKEN").map_err(|_| {
            GraphError::ConfigMissing("GRAPH_ACCESS_TOKEN environment variable not set".to_string())
        })?;

        let base_url = env::var("GRAPH_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = match env::var("GRAPH_TIMEOUT_SECS") {
            Ok(secs) => Duration::from_secs(secs.trim().parse().map_err(|_| {
                GraphError::ConfigMissing(format!(
                    "GRAPH_TIMEOUT_SECS must be a whole number of seconds, got '{secs}'"
                ))
            })?),
            Err(_) => DEFAULT_TIMEOUT,
        };

        Self::with_token(&token, &base_url, timeout)
    }

    /// Create an adapter sending `token` to the Graph hosts and to the host
    /// of `base_url`.
    pub fn with_token(token: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let host = Url::parse(base_url)?
            .host_str()
            .map(str::to_string)
            .unwrap_or_default();
        let hosts = GRAPH_HOSTS
            .iter()
            .map(|h| h.to_string())
            .chain(std::iter::once(host));
        let auth = BearerTokenProvider::new(token).with_allowed_hosts(hosts);
        Self::with_timeout(auth, base_url, timeout)
    }

    /// Create an adapter with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(auth: impl AuthenticationProvider + 'static, base_url: &str) -> Result<Self> {
        Self::with_timeout(auth, base_url, DEFAULT_TIMEOUT)
    }

    /// Create an adapter with a client-wide request timeout.
    pub fn with_timeout(
        auth: impl AuthenticationProvider + 'static,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self> {
        // Templates add the leading '/', so the root is stored without one
        let base_url = base_url.trim_end_matches('/');
        Url::parse(base_url)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(timeout)
            .build()
            .map_err(GraphError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::from(base_url),
            auth: Arc::new(auth),
        })
    }

    /// Resolve, authenticate and send a request.
    #[tracing::instrument(
        skip(self, request),
        fields(method = %request.method, uri_template = %request.url_template)
    )]
    async fn execute(&self, mut request: RequestInformation) -> Result<Response> {
        request
            .path_parameters
            .insert(BASE_URL_KEY.to_string(), self.base_url.to_string());
        let url = request.uri()?;

        self.auth.authenticate_request(&mut request, &url).await?;

        let timeout = request.timeout();
        let mut builder = self
            .http
            .request(request.method.into(), url.clone())
            .headers(request.headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(content) = request.content {
            builder = builder.body(content);
        }

        let response = builder.send().await.map_err(GraphError::HttpError)?;
        debug!(status = response.status().as_u16(), url = %url, "received response");
        Ok(response)
    }

    /// Convert a failed response into the error its mapping produces.
    async fn throw_if_failed(response: Response, error_mappings: &ErrorMappings) -> Result<Response> {
        let status = response.status().as_u16();
        if status < 400 {
            return Ok(response);
        }
        warn!(status, url = %response.url(), "request failed");

        let headers = response.headers().clone();
        let Some(factory) = error_mappings.resolve(status) else {
            return Err(GraphError::ApiError {
                message: format!(
                    "The server returned an unexpected status code and no error factory is registered for this code: {status}"
                ),
                status_code: Some(status),
                headers,
            });
        };

        let body = response.bytes().await.map_err(GraphError::HttpError)?;
        if body.is_empty() {
            return Err(GraphError::ApiError {
                message: format!(
                    "The server returned an unexpected status code with no response body: {status}"
                ),
                status_code: Some(status),
                headers,
            });
        }

        let error = serde_json::from_slice::<Value>(&body)
            .and_then(factory)
            .map_err(|_| GraphError::ApiError {
                message: format!(
                    "The server returned an unexpected status code and the error body could not be parsed: {status}: {}",
                    String::from_utf8_lossy(&body)
                ),
                status_code: Some(status),
                headers: headers.clone(),
            })?;

        Err(GraphError::OData {
            status,
            error,
            headers,
        })
    }

    /// Read the body of a successful response, treating 204 and empty bodies as absent.
    async fn read_body(response: Response) -> Result<Option<Vec<u8>>> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body = response.bytes().await.map_err(GraphError::HttpError)?;
        if body.is_empty() {
            return Ok(None);
        }
        Ok(Some(body.to_vec()))
    }
}

#[async_trait]
impl RequestAdapter for HttpRequestAdapter {
    fn base_url(&self) -> String {
        self.base_url.to_string()
    }

    async fn send(
        &self,
        request: RequestInformation,
        error_mappings: &ErrorMappings,
    ) -> Result<Option<Value>> {
        let response = self.execute(request).await?;
        let response = Self::throw_if_failed(response, error_mappings).await?;
        match Self::read_body(response).await? {
            Some(body) => Ok(Some(serde_json::from_slice(&body)?)),
            None => Ok(None),
        }
    }

    async fn send_primitive(
        &self,
        request: RequestInformation,
        error_mappings: &ErrorMappings,
    ) -> Result<Option<Vec<u8>>> {
        let response = self.execute(request).await?;
        let response = Self::throw_if_failed(response, error_mappings).await?;
        Self::read_body(response).await
    }

    async fn send_no_content(
        &self,
        request: RequestInformation,
        error_mappings: &ErrorMappings,
    ) -> Result<()> {
        let response = self.execute(request).await?;
        Self::throw_if_failed(response, error_mappings).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::auth::AnonymousAuthenticationProvider;

    #[test]
    fn test_adapter_debug() {
        let adapter =
            HttpRequestAdapter::with_token("test-token", DEFAULT_BASE_URL, DEFAULT_TIMEOUT).unwrap();
        let debug = format!("{:?}", adapter);
        assert!(debug.contains("HttpRequestAdapter"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let a = HttpRequestAdapter::new(AnonymousAuthenticationProvider, "https://graph.microsoft.com/v1.0").unwrap();
        let b = HttpRequestAdapter::new(AnonymousAuthenticationProvider, "https://graph.microsoft.com/v1.0/").unwrap();
        assert_eq!(a.base_url(), b.base_url());
        assert_eq!(a.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpRequestAdapter::new(AnonymousAuthenticationProvider, "not a url");
        assert!(matches!(result, Err(GraphError::UrlError(_))));
    }
}
