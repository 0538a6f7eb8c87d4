//! Transport-independent request building.
//!
//! Builders produce [`RequestInformation`] values and hand them to a
//! [`RequestAdapter`]. Nothing in this module performs I/O.

mod adapter;
mod builder;
mod config;
mod query;
mod request_information;
pub mod template;

pub use adapter::{ErrorFactory, ErrorMappings, ParsableFactory, RequestAdapter};
pub use builder::{BaseRequestBuilder, ACCEPT_JSON, ACCEPT_OCTET_STREAM, ACCEPT_TEXT};
pub use config::{RequestConfiguration, RequestOption};
pub use query::{
    to_query_values, CollectionQueryParameters, CountQueryParameters, ItemQueryParameters,
    NoQueryParameters, QueryValue,
};
pub use request_information::{
    HttpMethod, PathParameters, RequestInformation, BASE_URL_KEY, JSON_CONTENT_TYPE, RAW_URL_KEY,
};
