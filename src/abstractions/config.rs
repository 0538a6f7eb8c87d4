//! Per-call request configuration.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::abstractions::query::NoQueryParameters;
use crate::error::{GraphError, Result};

/// Options that influence how the adapter dispatches a request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RequestOption {
    /// Deadline for this request, overriding the adapter-wide timeout.
    Timeout(Duration),
}

/// Configuration for the request such as headers, query parameters, and
/// middleware options.
#[derive(Debug, Clone)]
pub struct RequestConfiguration<Q = NoQueryParameters> {
    /// Request headers
    pub headers: HeaderMap,
    /// Request options
    pub options: Vec<RequestOption>,
    /// Request query parameters
    pub query_parameters: Option<Q>,
}

impl<Q> Default for RequestConfiguration<Q> {
    fn default() -> Self {
        Self {
            headers: HeaderMap::new(),
            options: Vec::new(),
            query_parameters: None,
        }
    }
}

impl<Q> RequestConfiguration<Q> {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration carrying the given query parameters.
    pub fn with_query(query: Q) -> Self {
        Self {
            query_parameters: Some(query),
            ..Self::default()
        }
    }

    /// Add a header value.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or value is not a valid HTTP header.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| GraphError::InvalidRequest(format!("invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| GraphError::InvalidRequest(format!("invalid header value: {e}")))?;
        self.headers.append(name, value);
        Ok(self)
    }

    /// Add a request option.
    pub fn option(mut self, option: RequestOption) -> Self {
        self.options.push(option);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstractions::query::CollectionQueryParameters;

    #[test]
    fn test_header_builder() {
        let config = RequestConfiguration::<NoQueryParameters>::new()
            .header("ConsistencyLevel", "eventual")
            .unwrap();
        assert_eq!(config.headers.get("consistencylevel").unwrap(), "eventual");
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let result = RequestConfiguration::<NoQueryParameters>::new().header("bad header", "x");
        assert!(matches!(result, Err(GraphError::InvalidRequest(_))));
    }

    #[test]
    fn test_with_query() {
        let config = RequestConfiguration::with_query(CollectionQueryParameters {
            top: Some(3),
            ..Default::default()
        });
        assert_eq!(config.query_parameters.unwrap().top, Some(3));
        assert!(config.headers.is_empty());
    }
}
