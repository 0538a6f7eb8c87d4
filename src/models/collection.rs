//! Collection response envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A page of entities as returned by any collection endpoint.
///
/// `next_link` is exposed as data; follow it by constructing a builder with
/// `with_url(next_link)`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,

    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,

    #[serde(rename = "@odata.count")]
    pub count: Option<i64>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

impl<T> Default for CollectionResponse<T> {
    fn default() -> Self {
        Self {
            value: Vec::new(),
            next_link: None,
            count: None,
            additional_data: Map::new(),
        }
    }
}

impl<T> CollectionResponse<T> {
    pub fn new(value: Vec<T>) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Whether the server indicated more results are available.
    pub fn has_more(&self) -> bool {
        self.next_link.is_some()
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl<T> IntoIterator for CollectionResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.value.into_iter()
    }
}
