//! The root of the request builder tree.

use std::sync::Arc;

use crate::abstractions::{BaseRequestBuilder, PathParameters, RequestAdapter, BASE_URL_KEY};
use crate::drives::DrivesRequestBuilder;
use crate::error::Result;
use crate::groups::GroupsRequestBuilder;
use crate::http::HttpRequestAdapter;
use crate::reports::ReportsRequestBuilder;
use crate::users::{MeRequestBuilder, UsersRequestBuilder};

/// Entry point for Microsoft Graph requests.
///
/// Cheap to clone; every builder it hands out shares the same adapter.
///
/// # Example
///
/// ```no_run
/// use graphapi::GraphServiceClient;
///
/// # async fn example() -> graphapi::Result<()> {
/// let client = GraphServiceClient::from_env()?;
///
/// let group = client.groups().by_group_id("g1").get(None).await?;
/// println!("{:?}", group.and_then(|g| g.display_name));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GraphServiceClient {
    base: BaseRequestBuilder,
}

impl GraphServiceClient {
    /// URL template of the service root.
    pub const URL_TEMPLATE: &'static str = "{+baseurl}";

    /// Create a client on top of any request adapter.
    pub fn new(adapter: Arc<dyn RequestAdapter>) -> Self {
        let mut path_parameters = PathParameters::new();
        path_parameters.insert(BASE_URL_KEY.to_string(), adapter.base_url());
        Self {
            base: BaseRequestBuilder::new(adapter, Self::URL_TEMPLATE, path_parameters),
        }
    }

    /// Create a client using an [`HttpRequestAdapter`] configured from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `GRAPH_ACCESS_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Arc::new(HttpRequestAdapter::from_env()?)))
    }

    pub fn adapter(&self) -> &Arc<dyn RequestAdapter> {
        self.base.adapter()
    }

    pub fn path_parameters(&self) -> &PathParameters {
        self.base.path_parameters()
    }

    pub fn groups(&self) -> GroupsRequestBuilder {
        self.base.child(GroupsRequestBuilder::from_parts)
    }

    pub fn users(&self) -> UsersRequestBuilder {
        self.base.child(UsersRequestBuilder::from_parts)
    }

    pub fn drives(&self) -> DrivesRequestBuilder {
        self.base.child(DrivesRequestBuilder::from_parts)
    }

    pub fn reports(&self) -> ReportsRequestBuilder {
        self.base.child(ReportsRequestBuilder::from_parts)
    }

    /// The signed-in user.
    pub fn me(&self) -> MeRequestBuilder {
        self.base.child(MeRequestBuilder::from_parts)
    }
}
