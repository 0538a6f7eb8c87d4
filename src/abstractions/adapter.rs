//! The seam between request builders and the transport.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::abstractions::request_information::RequestInformation;
use crate::error::Result;
use crate::models::ODataError;

/// Builds a typed model from a parsed JSON response body.
pub type ParsableFactory<T> = fn(Value) -> serde_json::Result<T>;

/// Builds an error model from a parsed JSON error body.
pub type ErrorFactory = fn(Value) -> serde_json::Result<ODataError>;

/// Maps status-code patterns to error factories.
///
/// Keys are either an exact status (`"404"`) or a class wildcard: `"4XX"`,
/// `"5XX"`, or `"XXX"` for any failure.
#[derive(Clone, Default)]
pub struct ErrorMappings {
    mappings: BTreeMap<String, ErrorFactory>,
}

impl ErrorMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mapping every generated operation registers: any 4XX/5XX status
    /// is read as an OData error.
    pub fn odata() -> Self {
        Self::new().with("XXX", ODataError::create_from_discriminator_value)
    }

    pub fn with(mut self, pattern: &str, factory: ErrorFactory) -> Self {
        self.mappings.insert(pattern.to_string(), factory);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Find the factory for a failed status: exact match first, then the
    /// status class, then the catch-all.
    pub fn resolve(&self, status: u16) -> Option<ErrorFactory> {
        if let Some(factory) = self.mappings.get(&status.to_string()) {
            return Some(*factory);
        }
        let class = match status {
            400..=499 => Some("4XX"),
            500..=599 => Some("5XX"),
            _ => None,
        };
        if let Some(factory) = class.and_then(|c| self.mappings.get(c)) {
            return Some(*factory);
        }
        if (400..600).contains(&status) {
            return self.mappings.get("XXX").copied();
        }
        None
    }
}

impl fmt::Debug for ErrorMappings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.mappings.keys()).finish()
    }
}

/// Executes requests described by [`RequestInformation`].
///
/// Implementations own transport, authentication and error mapping.
/// Builders hold an `Arc<dyn RequestAdapter>` and never inspect responses
/// beyond handing the parsed body to a model factory.
#[async_trait]
pub trait RequestAdapter: Send + Sync {
    /// The service root substituted for `{+baseurl}`.
    fn base_url(&self) -> String;

    /// Send the request and return the parsed JSON body, or `None` when the
    /// response has no content.
    async fn send(
        &self,
        request: RequestInformation,
        error_mappings: &ErrorMappings,
    ) -> Result<Option<Value>>;

    /// Send the request and return the raw body, or `None` when empty.
    async fn send_primitive(
        &self,
        request: RequestInformation,
        error_mappings: &ErrorMappings,
    ) -> Result<Option<Vec<u8>>>;

    /// Send the request, discarding any response body.
    async fn send_no_content(
        &self,
        request: RequestInformation,
        error_mappings: &ErrorMappings,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found(_: Value) -> serde_json::Result<ODataError> {
        Ok(ODataError::new("NotFound", "exact"))
    }

    fn client_error(_: Value) -> serde_json::Result<ODataError> {
        Ok(ODataError::new("ClientError", "class"))
    }

    fn resolved_code(mappings: &ErrorMappings, status: u16) -> Option<String> {
        mappings
            .resolve(status)
            .map(|f| f(Value::Null).unwrap().code().unwrap_or_default().to_string())
    }

    #[test]
    fn test_resolution_order() {
        let mappings = ErrorMappings::new()
            .with("404", not_found)
            .with("4XX", client_error)
            .with("XXX", ODataError::create_from_discriminator_value);

        assert_eq!(resolved_code(&mappings, 404).as_deref(), Some("NotFound"));
        assert_eq!(resolved_code(&mappings, 403).as_deref(), Some("ClientError"));
        assert!(mappings.resolve(503).is_some());
        assert!(mappings.resolve(302).is_none());
    }

    #[test]
    fn test_odata_mapping_covers_all_failures() {
        let mappings = ErrorMappings::odata();
        assert!(mappings.resolve(400).is_some());
        assert!(mappings.resolve(599).is_some());
        assert!(mappings.resolve(200).is_none());
    }

    #[test]
    fn test_empty_mappings() {
        let mappings = ErrorMappings::new();
        assert!(mappings.is_empty());
        assert!(mappings.resolve(500).is_none());
    }
}
