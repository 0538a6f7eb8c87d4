//! `/users/{user-id}/events`

use crate::abstractions::{
    CollectionQueryParameters, CountQueryParameters, ItemQueryParameters,
};
use crate::models::{CollectionResponse, Event};

crate::request_builder! {
    /// Events in the user's primary calendar.
    pub struct UserEventsRequestBuilder =>
        "{+baseurl}/users/{user%2Did}/events{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
}

crate::request_operations! {
    UserEventsRequestBuilder {
        get(CollectionQueryParameters) -> CollectionResponse<Event>;
        post(Event) -> Event;
    }
}

impl UserEventsRequestBuilder {
    pub fn by_event_id(&self, event_id: impl Into<String>) -> UserEventItemRequestBuilder {
        self.base
            .indexed_child("event%2Did", event_id, UserEventItemRequestBuilder::from_parts)
    }

    pub fn count(&self) -> UserEventsCountRequestBuilder {
        self.base.child(UserEventsCountRequestBuilder::from_parts)
    }
}

crate::request_builder! {
    pub struct UserEventsCountRequestBuilder =>
        "{+baseurl}/users/{user%2Did}/events/$count{?%24filter,%24search}";
}

crate::request_operations! {
    UserEventsCountRequestBuilder {
        get_count(CountQueryParameters);
    }
}

crate::request_builder! {
    pub struct UserEventItemRequestBuilder =>
        "{+baseurl}/users/{user%2Did}/events/{event%2Did}{?%24expand,%24select}";
}

crate::request_operations! {
    UserEventItemRequestBuilder {
        get(ItemQueryParameters) -> Event;
        patch(Event) -> Event;
        delete;
    }
}
