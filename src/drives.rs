//! Builders under `/drives`.

use crate::abstractions::{CollectionQueryParameters, ItemQueryParameters};
use crate::models::{CollectionResponse, Drive};

crate::request_builder! {
    /// `/drives`: drives available to the caller.
    pub struct DrivesRequestBuilder =>
        "{+baseurl}/drives{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
}

crate::request_operations! {
    DrivesRequestBuilder {
        /// List drives.
        get(CollectionQueryParameters) -> CollectionResponse<Drive>;
        /// Add a drive.
        post(Drive) -> Drive;
    }
}

impl DrivesRequestBuilder {
    pub fn by_drive_id(&self, drive_id: impl Into<String>) -> DriveItemRequestBuilder {
        self.base
            .indexed_child("drive%2Did", drive_id, DriveItemRequestBuilder::from_parts)
    }
}

crate::request_builder! {
    /// `/drives/{drive-id}`
    pub struct DriveItemRequestBuilder => "{+baseurl}/drives/{drive%2Did}{?%24expand,%24select}";
}

crate::request_operations! {
    DriveItemRequestBuilder {
        get(ItemQueryParameters) -> Drive;
        patch(Drive) -> Drive;
        delete;
    }
}
