//! Abstract description of a single Graph request.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use url::Url;

use crate::abstractions::config::{RequestConfiguration, RequestOption};
use crate::abstractions::query::{to_query_values, QueryValue};
use crate::abstractions::template::{self, TemplateValue};
use crate::error::{GraphError, Result};

/// Path parameters threaded from parent to child builders.
pub type PathParameters = BTreeMap<String, String>;

/// Path parameter key holding a caller-supplied URL.
pub const RAW_URL_KEY: &str = "request-raw-url";

/// Path parameter key holding the service root.
pub const BASE_URL_KEY: &str = "baseurl";

/// Content type used for JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP verbs used by request builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl HttpMethod {
    /// The method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Everything an adapter needs to send one request.
#[derive(Debug, Clone)]
pub struct RequestInformation {
    pub method: HttpMethod,
    pub url_template: String,
    pub path_parameters: PathParameters,
    pub query_parameters: BTreeMap<String, QueryValue>,
    pub headers: HeaderMap,
    pub options: Vec<RequestOption>,
    pub content: Option<Vec<u8>>,
}

impl RequestInformation {
    /// Create request information for a method, template and path parameters.
    pub fn new(method: HttpMethod, url_template: &str, path_parameters: PathParameters) -> Self {
        Self {
            method,
            url_template: url_template.to_string(),
            path_parameters,
            query_parameters: BTreeMap::new(),
            headers: HeaderMap::new(),
            options: Vec::new(),
            content: None,
        }
    }

    /// Apply a request configuration: query parameters, headers and options.
    pub fn configure<Q: Serialize>(&mut self, config: Option<&RequestConfiguration<Q>>) -> Result<()> {
        let Some(config) = config else {
            return Ok(());
        };
        if let Some(query) = &config.query_parameters {
            self.add_query_parameters(query)?;
        }
        for (name, value) in config.headers.iter() {
            self.headers.append(name.clone(), value.clone());
        }
        self.options.extend(config.options.iter().cloned());
        Ok(())
    }

    /// Merge the fields of a query struct into the query parameters.
    pub fn add_query_parameters<Q: Serialize + ?Sized>(&mut self, query: &Q) -> Result<()> {
        self.query_parameters.extend(to_query_values(query)?);
        Ok(())
    }

    /// Add a header only if no value is present for it yet.
    pub fn try_add_header(&mut self, name: HeaderName, value: &'static str) {
        self.headers
            .entry(name)
            .or_insert_with(|| HeaderValue::from_static(value));
    }

    /// Set the `Accept` header unless the caller already chose one.
    pub fn accept(&mut self, value: &'static str) {
        self.try_add_header(ACCEPT, value);
    }

    /// Serialize `body` as the request content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type is not JSON or serialization fails.
    pub fn set_content_from_serializable<B: Serialize + ?Sized>(
        &mut self,
        content_type: &'static str,
        body: &B,
    ) -> Result<()> {
        if content_type != JSON_CONTENT_TYPE {
            return Err(GraphError::InvalidRequest(format!(
                "unsupported content type '{content_type}'"
            )));
        }
        let bytes = serde_json::to_vec(body)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        self.content = Some(bytes);
        Ok(())
    }

    /// The per-request timeout, if one was configured.
    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.options.iter().find_map(|option| match option {
            RequestOption::Timeout(d) => Some(*d),
        })
    }

    /// Resolve the URL template against path and query parameters.
    ///
    /// A raw URL supplied at construction time is returned verbatim.
    pub fn uri(&self) -> Result<Url> {
        if let Some(raw) = self.path_parameters.get(RAW_URL_KEY) {
            return Ok(Url::parse(raw)?);
        }
        let expanded = template::expand(&self.url_template, |name| {
            if let Some(value) = self.path_parameters.get(name) {
                return Some(TemplateValue::Str(value));
            }
            self.query_parameters.get(name).map(|value| match value {
                QueryValue::Single(s) => TemplateValue::Str(s),
                QueryValue::List(items) => TemplateValue::List(items),
            })
        })?;
        Ok(Url::parse(&expanded)?)
    }
}
