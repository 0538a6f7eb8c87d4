//! Error types for Microsoft Graph operations.

use reqwest::header::HeaderMap;
use thiserror::Error;

use crate::models::ODataError;

/// Errors that can occur while building or sending a Graph request.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Configuration is missing or incomplete.
    #[error("Graph configuration required: {0}")]
    ConfigMissing(String),

    /// A template variable has no matching path parameter.
    #[error("Missing path parameter '{name}' for URL template '{template}'")]
    MissingPathParameter { name: String, template: String },

    /// The URL template could not be parsed.
    #[error("Invalid URL template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// The request could not be constructed locally.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The service answered with an OData error payload.
    #[error("Graph API error ({status}): {error}")]
    OData {
        status: u16,
        error: ODataError,
        headers: HeaderMap,
    },

    /// The service failed and the response could not be mapped to an OData error.
    #[error("Graph API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
        headers: HeaderMap,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// A scalar response body did not match the declared type.
    #[error("Failed to decode primitive response: {0}")]
    PrimitiveParse(String),
}

impl GraphError {
    /// HTTP status of a server-reported failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GraphError::OData { status, .. } => Some(*status),
            GraphError::ApiError { status_code, .. } => *status_code,
            GraphError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Response headers of a server-reported failure, e.g. `Retry-After`.
    pub fn response_headers(&self) -> Option<&HeaderMap> {
        match self {
            GraphError::OData { headers, .. } | GraphError::ApiError { headers, .. } => Some(headers),
            _ => None,
        }
    }

    /// OData error code (e.g. `Request_ResourceNotFound`) of a server-reported failure.
    pub fn odata_code(&self) -> Option<&str> {
        match self {
            GraphError::OData { error, .. } => error.code(),
            _ => None,
        }
    }
}

/// Result type alias for Graph operations.
pub type Result<T> = core::result::Result<T, GraphError>;
