//! Group actions: `addFavorite` and `getMemberGroups`.

use crate::abstractions::{HttpMethod, RequestConfiguration, RequestInformation, ACCEPT_JSON};
use crate::error::Result;
use crate::models::{GetMemberGroupsPostRequestBody, GetMemberGroupsPostResponse};

crate::request_builder! {
    /// Add the group to the signed-in user's favorites.
    pub struct AddFavoriteRequestBuilder => "{+baseurl}/groups/{group%2Did}/addFavorite";
}

impl AddFavoriteRequestBuilder {
    /// Invoke the action. Supported for Microsoft 365 groups only.
    pub async fn post(&self, config: Option<&RequestConfiguration>) -> Result<()> {
        let info = self.to_post_request_information(config)?;
        self.base.send_no_content(info).await
    }

    pub fn to_post_request_information(
        &self,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        self.base
            .request_information(HttpMethod::Post, config, ACCEPT_JSON)
    }
}

crate::request_builder! {
    /// Return the groups the group is a member of, transitively.
    pub struct GetMemberGroupsRequestBuilder => "{+baseurl}/groups/{group%2Did}/getMemberGroups";
}

impl GetMemberGroupsRequestBuilder {
    /// Invoke the action and return the ids of the containing groups.
    pub async fn post_as_get_member_groups_post_response(
        &self,
        body: &GetMemberGroupsPostRequestBody,
        config: Option<&RequestConfiguration>,
    ) -> Result<Option<GetMemberGroupsPostResponse>> {
        let info = self.to_post_request_information(body, config)?;
        self.base.send(info).await
    }

    /// Invoke the action and return the ids of the containing groups.
    #[deprecated(note = "use post_as_get_member_groups_post_response instead")]
    pub async fn post(
        &self,
        body: &GetMemberGroupsPostRequestBody,
        config: Option<&RequestConfiguration>,
    ) -> Result<Option<GetMemberGroupsPostResponse>> {
        self.post_as_get_member_groups_post_response(body, config)
            .await
    }

    pub fn to_post_request_information(
        &self,
        body: &GetMemberGroupsPostRequestBody,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        self.base
            .request_information_with_body(HttpMethod::Post, body, config, ACCEPT_JSON)
    }
}
