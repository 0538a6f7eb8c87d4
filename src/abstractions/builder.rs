//! Shared request builder state and generic verb dispatch.
//!
//! Each resource builder wraps a [`BaseRequestBuilder`] holding its URL
//! template, its own copy of the path parameters, and the adapter. The
//! [`request_builder!`](crate::request_builder) macro declares the builder
//! shell and [`request_operations!`](crate::request_operations) declares its
//! verbs from a one-line-per-operation table.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::abstractions::adapter::{ErrorMappings, ParsableFactory, RequestAdapter};
use crate::abstractions::config::RequestConfiguration;
use crate::abstractions::request_information::{
    HttpMethod, PathParameters, RequestInformation, JSON_CONTENT_TYPE,
};
use crate::error::{GraphError, Result};

/// `Accept` value for object, collection and no-content responses.
pub const ACCEPT_JSON: &str = "application/json";

/// `Accept` value for scalar `$count` responses.
pub const ACCEPT_TEXT: &str = "text/plain;q=0.9";

/// `Accept` value for binary report streams.
pub const ACCEPT_OCTET_STREAM: &str = "application/octet-stream";

/// State shared by every resource builder.
#[derive(Clone)]
pub struct BaseRequestBuilder {
    url_template: &'static str,
    path_parameters: PathParameters,
    adapter: Arc<dyn RequestAdapter>,
}

impl fmt::Debug for BaseRequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseRequestBuilder")
            .field("url_template", &self.url_template)
            .field("path_parameters", &self.path_parameters)
            .finish_non_exhaustive()
    }
}

impl BaseRequestBuilder {
    pub fn new(
        adapter: Arc<dyn RequestAdapter>,
        url_template: &'static str,
        path_parameters: PathParameters,
    ) -> Self {
        Self {
            url_template,
            path_parameters,
            adapter,
        }
    }

    pub fn url_template(&self) -> &'static str {
        self.url_template
    }

    pub fn path_parameters(&self) -> &PathParameters {
        &self.path_parameters
    }

    pub fn adapter(&self) -> &Arc<dyn RequestAdapter> {
        &self.adapter
    }

    /// A copy of the path parameters with one extra entry, for indexed children.
    pub fn path_parameters_with(&self, key: &str, value: impl Into<String>) -> PathParameters {
        let mut params = self.path_parameters.clone();
        params.insert(key.to_string(), value.into());
        params
    }

    /// Construct a child builder that shares this builder's path parameters.
    pub fn child<B>(
        &self,
        from_parts: impl FnOnce(PathParameters, Arc<dyn RequestAdapter>) -> B,
    ) -> B {
        from_parts(self.path_parameters.clone(), self.adapter.clone())
    }

    /// Construct an indexed child builder with one extra path parameter.
    pub fn indexed_child<B>(
        &self,
        key: &str,
        value: impl Into<String>,
        from_parts: impl FnOnce(PathParameters, Arc<dyn RequestAdapter>) -> B,
    ) -> B {
        from_parts(self.path_parameters_with(key, value), self.adapter.clone())
    }

    /// Build request information without a body.
    pub fn request_information<Q: Serialize>(
        &self,
        method: HttpMethod,
        config: Option<&RequestConfiguration<Q>>,
        accept: &'static str,
    ) -> Result<RequestInformation> {
        let mut info =
            RequestInformation::new(method, self.url_template, self.path_parameters.clone());
        info.configure(config)?;
        info.accept(accept);
        Ok(info)
    }

    /// Build request information carrying a JSON body.
    pub fn request_information_with_body<B, Q>(
        &self,
        method: HttpMethod,
        body: &B,
        config: Option<&RequestConfiguration<Q>>,
        accept: &'static str,
    ) -> Result<RequestInformation>
    where
        B: Serialize + ?Sized,
        Q: Serialize,
    {
        let mut info = self.request_information(method, config, accept)?;
        info.set_content_from_serializable(JSON_CONTENT_TYPE, body)?;
        Ok(info)
    }

    /// Send and deserialize the body with the type's own deserializer.
    pub async fn send<T: DeserializeOwned>(&self, info: RequestInformation) -> Result<Option<T>> {
        self.send_with_factory(info, serde_json::from_value::<T>)
            .await
    }

    /// Send and build the result with `factory`.
    pub async fn send_with_factory<T>(
        &self,
        info: RequestInformation,
        factory: ParsableFactory<T>,
    ) -> Result<Option<T>> {
        let body = self.adapter.send(info, &ErrorMappings::odata()).await?;
        match body {
            Some(value) => Ok(Some(factory(value)?)),
            None => Ok(None),
        }
    }

    /// Send and parse a scalar text body.
    pub async fn send_primitive<T>(&self, info: RequestInformation) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let Some(bytes) = self.send_bytes(info).await? else {
            return Ok(None);
        };
        let text = String::from_utf8(bytes)
            .map_err(|e| GraphError::PrimitiveParse(e.to_string()))?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        text.parse::<T>()
            .map(Some)
            .map_err(|e| GraphError::PrimitiveParse(format!("'{text}': {e}")))
    }

    /// Send and return the raw body.
    pub async fn send_bytes(&self, info: RequestInformation) -> Result<Option<Vec<u8>>> {
        self.adapter
            .send_primitive(info, &ErrorMappings::odata())
            .await
    }

    /// Send, expecting no response body.
    pub async fn send_no_content(&self, info: RequestInformation) -> Result<()> {
        self.adapter
            .send_no_content(info, &ErrorMappings::odata())
            .await
    }
}

/// Declare a resource builder type bound to a URL template.
///
/// The generated type has a raw-URL constructor (`new`), a path-parameter
/// constructor used by parent navigation (`from_parts`) and `with_url`.
#[macro_export]
macro_rules! request_builder {
    ($(#[$meta:meta])* $vis:vis struct $name:ident => $template:expr;) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            base: $crate::abstractions::BaseRequestBuilder,
        }

        impl $name {
            /// URL template for this resource.
            pub const URL_TEMPLATE: &'static str = $template;

            /// Create a builder for a caller-supplied URL. Path and query
            /// parameters are ignored for requests made through it.
            pub fn new(
                raw_url: impl Into<String>,
                adapter: ::std::sync::Arc<dyn $crate::abstractions::RequestAdapter>,
            ) -> Self {
                let mut path_parameters = $crate::abstractions::PathParameters::new();
                path_parameters.insert(
                    $crate::abstractions::RAW_URL_KEY.to_string(),
                    raw_url.into(),
                );
                Self::from_parts(path_parameters, adapter)
            }

            /// Create a builder from path parameters and an adapter.
            pub fn from_parts(
                path_parameters: $crate::abstractions::PathParameters,
                adapter: ::std::sync::Arc<dyn $crate::abstractions::RequestAdapter>,
            ) -> Self {
                Self {
                    base: $crate::abstractions::BaseRequestBuilder::new(
                        adapter,
                        Self::URL_TEMPLATE,
                        path_parameters,
                    ),
                }
            }

            /// Returns a builder for this resource bound to an arbitrary URL.
            pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
                Self::new(raw_url, self.base.adapter().clone())
            }

            /// The path parameters this builder resolves its template with.
            pub fn path_parameters(&self) -> &$crate::abstractions::PathParameters {
                self.base.path_parameters()
            }
        }
    };
}

/// Declare the HTTP operations of a resource builder.
///
/// Each line names a verb, its query or body type and its response type:
///
/// ```ignore
/// request_operations! {
///     GroupItemRequestBuilder {
///         get(ItemQueryParameters) -> Group;
///         patch(Group) -> Group;
///         delete;
///     }
/// }
/// ```
///
/// `get(Q) -> T, with factory;` builds the response with an explicit
/// [`ParsableFactory`](crate::abstractions::ParsableFactory) instead of the
/// type's own deserializer. Every verb gets a `to_<verb>_request_information`
/// companion.
#[macro_export]
macro_rules! request_operations {
    ($builder:ty { $($ops:tt)* }) => {
        impl $builder {
            $crate::request_operations!(@ops $($ops)*);
        }
    };

    (@ops) => {};

    (@ops $(#[$m:meta])* get($q:ty) -> $out:ty, with $factory:expr; $($rest:tt)*) => {
        $(#[$m])*
        pub async fn get(
            &self,
            config: Option<&$crate::abstractions::RequestConfiguration<$q>>,
        ) -> $crate::Result<Option<$out>> {
            let info = self.to_get_request_information(config)?;
            self.base.send_with_factory(info, $factory).await
        }

        /// Request information for `get`.
        pub fn to_get_request_information(
            &self,
            config: Option<&$crate::abstractions::RequestConfiguration<$q>>,
        ) -> $crate::Result<$crate::abstractions::RequestInformation> {
            self.base.request_information(
                $crate::abstractions::HttpMethod::Get,
                config,
                $crate::abstractions::ACCEPT_JSON,
            )
        }

        $crate::request_operations!(@ops $($rest)*);
    };

    (@ops $(#[$m:meta])* get($q:ty) -> $out:ty; $($rest:tt)*) => {
        $(#[$m])*
        pub async fn get(
            &self,
            config: Option<&$crate::abstractions::RequestConfiguration<$q>>,
        ) -> $crate::Result<Option<$out>> {
            let info = self.to_get_request_information(config)?;
            self.base.send::<$out>(info).await
        }

        /// Request information for `get`.
        pub fn to_get_request_information(
            &self,
            config: Option<&$crate::abstractions::RequestConfiguration<$q>>,
        ) -> $crate::Result<$crate::abstractions::RequestInformation> {
            self.base.request_information(
                $crate::abstractions::HttpMethod::Get,
                config,
                $crate::abstractions::ACCEPT_JSON,
            )
        }

        $crate::request_operations!(@ops $($rest)*);
    };

    (@ops $(#[$m:meta])* get_count($q:ty); $($rest:tt)*) => {
        $(#[$m])*
        pub async fn get(
            &self,
            config: Option<&$crate::abstractions::RequestConfiguration<$q>>,
        ) -> $crate::Result<Option<i32>> {
            let info = self.to_get_request_information(config)?;
            self.base.send_primitive::<i32>(info).await
        }

        /// Request information for `get`.
        pub fn to_get_request_information(
            &self,
            config: Option<&$crate::abstractions::RequestConfiguration<$q>>,
        ) -> $crate::Result<$crate::abstractions::RequestInformation> {
            self.base.request_information(
                $crate::abstractions::HttpMethod::Get,
                config,
                $crate::abstractions::ACCEPT_TEXT,
            )
        }

        $crate::request_operations!(@ops $($rest)*);
    };

    (@ops $(#[$m:meta])* get_bytes($q:ty); $($rest:tt)*) => {
        $(#[$m])*
        pub async fn get(
            &self,
            config: Option<&$crate::abstractions::RequestConfiguration<$q>>,
        ) -> $crate::Result<Option<Vec<u8>>> {
            let info = self.to_get_request_information(config)?;
            self.base.send_bytes(info).await
        }

        /// Request information for `get`.
        pub fn to_get_request_information(
            &self,
            config: Option<&$crate::abstractions::RequestConfiguration<$q>>,
        ) -> $crate::Result<$crate::abstractions::RequestInformation> {
            self.base.request_information(
                $crate::abstractions::HttpMethod::Get,
                config,
                $crate::abstractions::ACCEPT_OCTET_STREAM,
            )
        }

        $crate::request_operations!(@ops $($rest)*);
    };

    (@ops $(#[$m:meta])* post($body:ty) -> $out:ty; $($rest:tt)*) => {
        $(#[$m])*
        pub async fn post(
            &self,
            body: &$body,
            config: Option<&$crate::abstractions::RequestConfiguration>,
        ) -> $crate::Result<Option<$out>> {
            let info = self.to_post_request_information(body, config)?;
            self.base.send::<$out>(info).await
        }

        /// Request information for `post`.
        pub fn to_post_request_information(
            &self,
            body: &$body,
            config: Option<&$crate::abstractions::RequestConfiguration>,
        ) -> $crate::Result<$crate::abstractions::RequestInformation> {
            self.base.request_information_with_body(
                $crate::abstractions::HttpMethod::Post,
                body,
                config,
                $crate::abstractions::ACCEPT_JSON,
            )
        }

        $crate::request_operations!(@ops $($rest)*);
    };

    (@ops $(#[$m:meta])* post_no_content($body:ty); $($rest:tt)*) => {
        $(#[$m])*
        pub async fn post(
            &self,
            body: &$body,
            config: Option<&$crate::abstractions::RequestConfiguration>,
        ) -> $crate::Result<()> {
            let info = self.to_post_request_information(body, config)?;
            self.base.send_no_content(info).await
        }

        /// Request information for `post`.
        pub fn to_post_request_information(
            &self,
            body: &$body,
            config: Option<&$crate::abstractions::RequestConfiguration>,
        ) -> $crate::Result<$crate::abstractions::RequestInformation> {
            self.base.request_information_with_body(
                $crate::abstractions::HttpMethod::Post,
                body,
                config,
                $crate::abstractions::ACCEPT_JSON,
            )
        }

        $crate::request_operations!(@ops $($rest)*);
    };

    (@ops $(#[$m:meta])* patch($body:ty) -> $out:ty; $($rest:tt)*) => {
        $(#[$m])*
        pub async fn patch(
            &self,
            body: &$body,
            config: Option<&$crate::abstractions::RequestConfiguration>,
        ) -> $crate::Result<Option<$out>> {
            let info = self.to_patch_request_information(body, config)?;
            self.base.send::<$out>(info).await
        }

        /// Request information for `patch`.
        pub fn to_patch_request_information(
            &self,
            body: &$body,
            config: Option<&$crate::abstractions::RequestConfiguration>,
        ) -> $crate::Result<$crate::abstractions::RequestInformation> {
            self.base.request_information_with_body(
                $crate::abstractions::HttpMethod::Patch,
                body,
                config,
                $crate::abstractions::ACCEPT_JSON,
            )
        }

        $crate::request_operations!(@ops $($rest)*);
    };

    (@ops $(#[$m:meta])* put($body:ty) -> $out:ty; $($rest:tt)*) => {
        $(#[$m])*
        pub async fn put(
            &self,
            body: &$body,
            config: Option<&$crate::abstractions::RequestConfiguration>,
        ) -> $crate::Result<Option<$out>> {
            let info = self.to_put_request_information(body, config)?;
            self.base.send::<$out>(info).await
        }

        /// Request information for `put`.
        pub fn to_put_request_information(
            &self,
            body: &$body,
            config: Option<&$crate::abstractions::RequestConfiguration>,
        ) -> $crate::Result<$crate::abstractions::RequestInformation> {
            self.base.request_information_with_body(
                $crate::abstractions::HttpMethod::Put,
                body,
                config,
                $crate::abstractions::ACCEPT_JSON,
            )
        }

        $crate::request_operations!(@ops $($rest)*);
    };

    (@ops $(#[$m:meta])* delete; $($rest:tt)*) => {
        $(#[$m])*
        pub async fn delete(
            &self,
            config: Option<&$crate::abstractions::RequestConfiguration>,
        ) -> $crate::Result<()> {
            let info = self.to_delete_request_information(config)?;
            self.base.send_no_content(info).await
        }

        /// Request information for `delete`.
        pub fn to_delete_request_information(
            &self,
            config: Option<&$crate::abstractions::RequestConfiguration>,
        ) -> $crate::Result<$crate::abstractions::RequestInformation> {
            self.base.request_information(
                $crate::abstractions::HttpMethod::Delete,
                config,
                $crate::abstractions::ACCEPT_JSON,
            )
        }

        $crate::request_operations!(@ops $($rest)*);
    };
}
