//! `/groups/{group-id}/events`

use crate::abstractions::{
    CollectionQueryParameters, CountQueryParameters, ItemQueryParameters,
};
use crate::models::{CollectionResponse, Event};

crate::request_builder! {
    /// The events of a group calendar.
    pub struct GroupEventsRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/events{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
}

crate::request_operations! {
    GroupEventsRequestBuilder {
        /// List the events of the group calendar.
        get(CollectionQueryParameters) -> CollectionResponse<Event>;
        /// Create an event in the group calendar.
        post(Event) -> Event;
    }
}

impl GroupEventsRequestBuilder {
    pub fn by_event_id(&self, event_id: impl Into<String>) -> GroupEventItemRequestBuilder {
        self.base
            .indexed_child("event%2Did", event_id, GroupEventItemRequestBuilder::from_parts)
    }

    pub fn count(&self) -> GroupEventsCountRequestBuilder {
        self.base.child(GroupEventsCountRequestBuilder::from_parts)
    }
}

crate::request_builder! {
    pub struct GroupEventsCountRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/events/$count{?%24filter,%24search}";
}

crate::request_operations! {
    GroupEventsCountRequestBuilder {
        get_count(CountQueryParameters);
    }
}

crate::request_builder! {
    /// A single event of a group calendar.
    pub struct GroupEventItemRequestBuilder =>
        "{+baseurl}/groups/{group%2Did}/events/{event%2Did}{?%24expand,%24select}";
}

crate::request_operations! {
    GroupEventItemRequestBuilder {
        /// Get an event.
        get(ItemQueryParameters) -> Event;
        /// Update an event.
        patch(Event) -> Event;
        /// Delete an event.
        delete;
    }
}
