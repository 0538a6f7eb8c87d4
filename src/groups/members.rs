//! `/groups/{group-id}/members`
//!
//! Members are directory objects of mixed type, so responses are built with
//! the discriminator factory.

use crate::abstractions::{
    CollectionQueryParameters, CountQueryParameters, ItemQueryParameters,
};
use crate::models::{CollectionResponse, DirectoryObject};

crate::request_builder! {
    /// Direct members of a group: users, groups, devices and others.
    pub struct GroupMembersRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/members{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
}

crate::request_operations! {
    GroupMembersRequestBuilder {
        /// List the direct members of the group.
        get(CollectionQueryParameters) -> CollectionResponse<DirectoryObject>,
            with CollectionResponse::<DirectoryObject>::create_from_discriminator_value;
    }
}

impl GroupMembersRequestBuilder {
    pub fn by_directory_object_id(
        &self,
        directory_object_id: impl Into<String>,
    ) -> GroupMemberItemRequestBuilder {
        self.base.indexed_child(
            "directoryObject%2Did",
            directory_object_id,
            GroupMemberItemRequestBuilder::from_parts,
        )
    }

    pub fn count(&self) -> GroupMembersCountRequestBuilder {
        self.base.child(GroupMembersCountRequestBuilder::from_parts)
    }
}

crate::request_builder! {
    pub struct GroupMembersCountRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/members/$count{?%24filter,%24search}";
}

crate::request_operations! {
    GroupMembersCountRequestBuilder {
        get_count(CountQueryParameters);
    }
}

crate::request_builder! {
    /// A single member of a group.
    pub struct GroupMemberItemRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/members/{directoryObject%2Did}{?%24expand,%24select}";
}

crate::request_operations! {
    GroupMemberItemRequestBuilder {
        get(ItemQueryParameters) -> DirectoryObject,
            with DirectoryObject::create_from_discriminator_value;
    }
}
