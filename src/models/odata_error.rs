//! OData error payloads returned by Graph for failed requests.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The error envelope Graph returns with any 4XX/5XX response.
///
/// ```json
/// { "error": { "code": "Request_ResourceNotFound", "message": "..." } }
/// ```
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ODataError {
    pub error: Option<MainError>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// The body of an OData error.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetails>,
    pub inner_error: Option<InnerError>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// One entry of `error.details`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    pub target: Option<String>,
}

/// Diagnostic data Graph attaches under `error.innerError`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InnerError {
    #[serde(rename = "request-id")]
    pub request_id: Option<String>,
    #[serde(rename = "client-request-id")]
    pub client_request_id: Option<String>,
    /// Graph sends this without a zone offset, so it is kept as text.
    pub date: Option<String>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

impl ODataError {
    /// Build an error with just a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(MainError {
                code: code.into(),
                message: message.into(),
                ..Default::default()
            }),
            additional_data: Map::new(),
        }
    }

    /// Error factory registered for failed responses.
    pub fn create_from_discriminator_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// The service error code, e.g. `Request_ResourceNotFound`.
    pub fn code(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.code.as_str())
    }

    pub fn message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    /// The `request-id` Graph assigned to the failed call.
    pub fn request_id(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(|e| e.inner_error.as_ref())
            .and_then(|inner| inner.request_id.as_deref())
    }
}

impl fmt::Display for ODataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(e) if e.message.is_empty() => write!(f, "{}", e.code),
            Some(e) => write!(f, "{}: {}", e.code, e.message),
            None => f.write_str("unknown OData error"),
        }
    }
}
