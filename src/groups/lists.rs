//! `/groups/{group-id}/sites/{site-id}/lists` and the resources below it.

use crate::abstractions::{
    CollectionQueryParameters, CountQueryParameters, ItemQueryParameters,
};
use crate::models::{CollectionResponse, ContentType, List, ListItem};

crate::request_builder! {
    /// The lists of a site.
    pub struct SiteListsRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/sites/{site%2Did}/lists{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
}

crate::request_operations! {
    SiteListsRequestBuilder {
        /// List the site's lists.
        get(CollectionQueryParameters) -> CollectionResponse<List>;
        /// Create a list.
        post(List) -> List;
    }
}

impl SiteListsRequestBuilder {
    pub fn by_list_id(&self, list_id: impl Into<String>) -> SiteListItemRequestBuilder {
        self.base
            .indexed_child("list%2Did", list_id, SiteListItemRequestBuilder::from_parts)
    }

    pub fn count(&self) -> SiteListsCountRequestBuilder {
        self.base.child(SiteListsCountRequestBuilder::from_parts)
    }
}

crate::request_builder! {
    pub struct SiteListsCountRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/sites/{site%2Did}/lists/$count{?%24filter,%24search}";
}

crate::request_operations! {
    SiteListsCountRequestBuilder {
        get_count(CountQueryParameters);
    }
}

crate::request_builder! {
    /// A single list of a site.
    pub struct SiteListItemRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/sites/{site%2Did}/lists/{list%2Did}{?%24expand,%24select}";
}

crate::request_operations! {
    SiteListItemRequestBuilder {
        /// Get a list.
        get(ItemQueryParameters) -> List;
        /// Update a list.
        patch(List) -> List;
        /// Delete a list.
        delete;
    }
}

impl SiteListItemRequestBuilder {
    pub fn content_types(&self) -> ListContentTypesRequestBuilder {
        self.base.child(ListContentTypesRequestBuilder::from_parts)
    }

    pub fn items(&self) -> ListItemsRequestBuilder {
        self.base.child(ListItemsRequestBuilder::from_parts)
    }
}

crate::request_builder! {
    /// Content types enabled on a list.
    pub struct ListContentTypesRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/sites/{site%2Did}/lists/{list%2Did}/contentTypes{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
}

crate::request_operations! {
    ListContentTypesRequestBuilder {
        get(CollectionQueryParameters) -> CollectionResponse<ContentType>;
        post(ContentType) -> ContentType;
    }
}

impl ListContentTypesRequestBuilder {
    pub fn by_content_type_id(
        &self,
        content_type_id: impl Into<String>,
    ) -> ListContentTypeItemRequestBuilder {
        self.base.indexed_child(
            "contentType%2Did",
            content_type_id,
            ListContentTypeItemRequestBuilder::from_parts,
        )
    }

    pub fn count(&self) -> ListContentTypesCountRequestBuilder {
        self.base.child(ListContentTypesCountRequestBuilder::from_parts)
    }
}

crate::request_builder! {
    pub struct ListContentTypesCountRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/sites/{site%2Did}/lists/{list%2Did}/contentTypes/$count{?%24filter,%24search}";
}

crate::request_operations! {
    ListContentTypesCountRequestBuilder {
        get_count(CountQueryParameters);
    }
}

crate::request_builder! {
    pub struct ListContentTypeItemRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/sites/{site%2Did}/lists/{list%2Did}/contentTypes/{contentType%2Did}{?%24expand,%24select}";
}

crate::request_operations! {
    ListContentTypeItemRequestBuilder {
        get(ItemQueryParameters) -> ContentType;
        patch(ContentType) -> ContentType;
        delete;
    }
}

crate::request_builder! {
    /// Items in a list.
    pub struct ListItemsRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/sites/{site%2Did}/lists/{list%2Did}/items{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
}

crate::request_operations! {
    ListItemsRequestBuilder {
        /// List the items, with column values when `$expand=fields` is requested.
        get(CollectionQueryParameters) -> CollectionResponse<ListItem>;
        /// Create an item.
        post(ListItem) -> ListItem;
    }
}

impl ListItemsRequestBuilder {
    pub fn by_list_item_id(&self, list_item_id: impl Into<String>) -> ListItemsItemRequestBuilder {
        self.base.indexed_child(
            "listItem%2Did",
            list_item_id,
            ListItemsItemRequestBuilder::from_parts,
        )
    }

    pub fn count(&self) -> ListItemsCountRequestBuilder {
        self.base.child(ListItemsCountRequestBuilder::from_parts)
    }
}

crate::request_builder! {
    pub struct ListItemsCountRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/sites/{site%2Did}/lists/{list%2Did}/items/$count{?%24filter,%24search}";
}

crate::request_operations! {
    ListItemsCountRequestBuilder {
        get_count(CountQueryParameters);
    }
}

crate::request_builder! {
    /// A single item of a list.
    pub struct ListItemsItemRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/sites/{site%2Did}/lists/{list%2Did}/items/{listItem%2Did}{?%24expand,%24select}";
}

crate::request_operations! {
    ListItemsItemRequestBuilder {
        get(ItemQueryParameters) -> ListItem;
        patch(ListItem) -> ListItem;
        delete;
    }
}
