//! Builders under `/users` and `/me`.

mod events;

pub use events::*;

use crate::abstractions::{
    CollectionQueryParameters, CountQueryParameters, ItemQueryParameters,
};
use crate::models::{
    CollectionResponse, DirectoryObject, Drive, SendMailPostRequestBody, User,
};

crate::request_builder! {
    /// `/users`: the user collection.
    pub struct UsersRequestBuilder =>
        "{+baseurl}/users{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
}

crate::request_operations! {
    UsersRequestBuilder {
        /// List users.
        get(CollectionQueryParameters) -> CollectionResponse<User>;
        /// Create a user.
        post(User) -> User;
    }
}

impl UsersRequestBuilder {
    /// Navigate to a single user by object id or user principal name.
    pub fn by_user_id(&self, user_id: impl Into<String>) -> UserItemRequestBuilder {
        self.base
            .indexed_child("user%2Did", user_id, UserItemRequestBuilder::from_parts)
    }

    pub fn count(&self) -> UsersCountRequestBuilder {
        self.base.child(UsersCountRequestBuilder::from_parts)
    }
}

crate::request_builder! {
    /// `/users/$count`
    pub struct UsersCountRequestBuilder => "{+baseurl}/users/$count{?%24filter,%24search}";
}

crate::request_operations! {
    UsersCountRequestBuilder {
        get_count(CountQueryParameters);
    }
}

crate::request_builder! {
    /// `/users/{user-id}`: a single user.
    pub struct UserItemRequestBuilder => "{+baseurl}/users/{user%2Did}{?%24expand,%24select}";
}

crate::request_operations! {
    UserItemRequestBuilder {
        /// Get the properties of a user.
        get(ItemQueryParameters) -> User;
        /// Update the properties of a user.
        patch(User) -> User;
        /// Delete a user.
        delete;
    }
}

impl UserItemRequestBuilder {
    pub fn events(&self) -> UserEventsRequestBuilder {
        self.base.child(UserEventsRequestBuilder::from_parts)
    }

    pub fn drive(&self) -> UserDriveRequestBuilder {
        self.base.child(UserDriveRequestBuilder::from_parts)
    }

    pub fn member_of(&self) -> MemberOfRequestBuilder {
        self.base.child(MemberOfRequestBuilder::from_parts)
    }

    pub fn send_mail(&self) -> SendMailRequestBuilder {
        self.base.child(SendMailRequestBuilder::from_parts)
    }
}

crate::request_builder! {
    /// The user's OneDrive.
    pub struct UserDriveRequestBuilder =>
        "{+baseurl}/users/{user%2Did}/drive{?%24expand,%24select}";
}

crate::request_operations! {
    UserDriveRequestBuilder {
        get(ItemQueryParameters) -> Drive;
    }
}

crate::request_builder! {
    /// Groups and directory roles the user is a direct member of.
    pub struct MemberOfRequestBuilder =>
        "{+baseurl}/users/{user%2Did}/memberOf{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
}

crate::request_operations! {
    MemberOfRequestBuilder {
        get(CollectionQueryParameters) -> CollectionResponse<DirectoryObject>,
            with CollectionResponse::<DirectoryObject>::create_from_discriminator_value;
    }
}

impl MemberOfRequestBuilder {
    pub fn count(&self) -> MemberOfCountRequestBuilder {
        self.base.child(MemberOfCountRequestBuilder::from_parts)
    }
}

crate::request_builder! {
    pub struct MemberOfCountRequestBuilder =>
        "{+baseurl}/users/{user%2Did}/memberOf/$count{?%24filter,%24search}";
}

crate::request_operations! {
    MemberOfCountRequestBuilder {
        get_count(CountQueryParameters);
    }
}

crate::request_builder! {
    /// Send a message as the user.
    pub struct SendMailRequestBuilder => "{+baseurl}/users/{user%2Did}/sendMail";
}

crate::request_operations! {
    SendMailRequestBuilder {
        /// Send the message in the body. Graph answers 202 with no content.
        post_no_content(SendMailPostRequestBody);
    }
}

crate::request_builder! {
    /// `/me`: the signed-in user.
    pub struct MeRequestBuilder => "{+baseurl}/me{?%24expand,%24select}";
}

crate::request_operations! {
    MeRequestBuilder {
        /// Get the signed-in user.
        get(ItemQueryParameters) -> User;
        /// Update the signed-in user.
        patch(User) -> User;
    }
}
