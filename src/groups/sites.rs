//! `/groups/{group-id}/sites`

use crate::abstractions::{
    CollectionQueryParameters, CountQueryParameters, ItemQueryParameters,
};
use crate::groups::SiteListsRequestBuilder;
use crate::models::{CollectionResponse, Site};

crate::request_builder! {
    /// The SharePoint sites of a group.
    pub struct GroupSitesRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/sites{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
}

crate::request_operations! {
    GroupSitesRequestBuilder {
        /// List the group's sites.
        get(CollectionQueryParameters) -> CollectionResponse<Site>;
    }
}

impl GroupSitesRequestBuilder {
    pub fn by_site_id(&self, site_id: impl Into<String>) -> SiteItemRequestBuilder {
        self.base
            .indexed_child("site%2Did", site_id, SiteItemRequestBuilder::from_parts)
    }

    pub fn count(&self) -> GroupSitesCountRequestBuilder {
        self.base.child(GroupSitesCountRequestBuilder::from_parts)
    }
}

crate::request_builder! {
    pub struct GroupSitesCountRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/sites/$count{?%24filter,%24search}";
}

crate::request_operations! {
    GroupSitesCountRequestBuilder {
        get_count(CountQueryParameters);
    }
}

crate::request_builder! {
    /// A single site of a group.
    pub struct SiteItemRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/sites/{site%2Did}{?%24expand,%24select}";
}

crate::request_operations! {
    SiteItemRequestBuilder {
        /// Get a site.
        get(ItemQueryParameters) -> Site;
        /// Update a site.
        patch(Site) -> Site;
    }
}

impl SiteItemRequestBuilder {
    pub fn lists(&self) -> SiteListsRequestBuilder {
        self.base.child(SiteListsRequestBuilder::from_parts)
    }
}
