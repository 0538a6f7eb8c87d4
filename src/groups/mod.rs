//! Builders under `/groups`.

mod actions;
mod events;
mod lists;
mod members;
mod sites;

pub use actions::*;
pub use events::*;
pub use lists::*;
pub use members::*;
pub use sites::*;

use crate::abstractions::{
    CollectionQueryParameters, CountQueryParameters, ItemQueryParameters,
};
use crate::models::{CollectionResponse, Drive, Group, Team};

crate::request_builder! {
    /// `/groups`: the group collection.
    pub struct GroupsRequestBuilder =>
        "{+baseurl}/groups{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
}

crate::request_operations! {
    GroupsRequestBuilder {
        /// List groups.
        get(CollectionQueryParameters) -> CollectionResponse<Group>;
        /// Create a group.
        post(Group) -> Group;
    }
}

impl GroupsRequestBuilder {
    /// Navigate to a single group.
    pub fn by_group_id(&self, group_id: impl Into<String>) -> GroupItemRequestBuilder {
        self.base
            .indexed_child("group%2Did", group_id, GroupItemRequestBuilder::from_parts)
    }

    pub fn count(&self) -> GroupsCountRequestBuilder {
        self.base.child(GroupsCountRequestBuilder::from_parts)
    }
}

crate::request_builder! {
    /// `/groups/$count`
    pub struct GroupsCountRequestBuilder => "{+baseurl}/groups/$count{?%24filter,%24search}";
}

crate::request_operations! {
    GroupsCountRequestBuilder {
        /// Get the number of groups.
        get_count(CountQueryParameters);
    }
}

crate::request_builder! {
    /// `/groups/{group-id}`: a single group.
    pub struct GroupItemRequestBuilder => "{+baseurl}/groups/{group%2Did}{?%24expand,%24select}";
}

crate::request_operations! {
    GroupItemRequestBuilder {
        /// Get the properties of a group.
        get(ItemQueryParameters) -> Group;
        /// Update the properties of a group.
        patch(Group) -> Group;
        /// Delete a group.
        delete;
    }
}

impl GroupItemRequestBuilder {
    pub fn events(&self) -> GroupEventsRequestBuilder {
        self.base.child(GroupEventsRequestBuilder::from_parts)
    }

    pub fn sites(&self) -> GroupSitesRequestBuilder {
        self.base.child(GroupSitesRequestBuilder::from_parts)
    }

    pub fn drive(&self) -> GroupDriveRequestBuilder {
        self.base.child(GroupDriveRequestBuilder::from_parts)
    }

    pub fn members(&self) -> GroupMembersRequestBuilder {
        self.base.child(GroupMembersRequestBuilder::from_parts)
    }

    pub fn add_favorite(&self) -> AddFavoriteRequestBuilder {
        self.base.child(AddFavoriteRequestBuilder::from_parts)
    }

    pub fn get_member_groups(&self) -> GetMemberGroupsRequestBuilder {
        self.base.child(GetMemberGroupsRequestBuilder::from_parts)
    }

    pub fn team(&self) -> GroupTeamRequestBuilder {
        self.base.child(GroupTeamRequestBuilder::from_parts)
    }
}

crate::request_builder! {
    /// `/groups/{group-id}/team`: the team backing a unified group.
    pub struct GroupTeamRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/team{?%24expand,%24select}";
}

crate::request_operations! {
    GroupTeamRequestBuilder {
        get(ItemQueryParameters) -> Team;
        /// Create a team for the group. The group must have at least one owner.
        put(Team) -> Team;
        patch(Team) -> Team;
    }
}

crate::request_builder! {
    /// `/groups/{group-id}/drive`: the group's default document library.
    pub struct GroupDriveRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/drive{?%24expand,%24select}";
}

crate::request_operations! {
    GroupDriveRequestBuilder {
        get(ItemQueryParameters) -> Drive;
    }
}
