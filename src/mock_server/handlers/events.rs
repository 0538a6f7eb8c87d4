//! Calendar event handlers, nested under a group or user.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;

use super::entities::text_count;
use crate::mock_server::odata::{self, ODataQuery};
use crate::mock_server::state::{MockEntity, MockState};
use crate::models::Event;

type SharedState = State<Arc<RwLock<MockState>>>;

/// GET /{set}/{owner}/events
pub async fn list_events<T: MockEntity>(
    State(state): SharedState,
    Path(owner_id): Path<String>,
    Query(query): Query<ODataQuery>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = odata::authorize(&state, &headers) {
        return rejection;
    }
    let Some(events) = state.events_of::<T>(&owner_id) else {
        return odata::not_found(&owner_id);
    };
    let path = format!("/{}/{owner_id}/events", T::SET);
    match query.collection(&events, &state.base_url, &path) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(rejection) => rejection,
    }
}

/// GET /{set}/{owner}/events/{id}, including `$count`.
pub async fn get_event<T: MockEntity>(
    State(state): SharedState,
    Path((owner_id, event_id)): Path<(String, String)>,
    Query(query): Query<ODataQuery>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = odata::authorize(&state, &headers) {
        return rejection;
    }
    if event_id == "$count" {
        let Some(events) = state.events_of::<T>(&owner_id) else {
            return odata::not_found(&owner_id);
        };
        return match query.matching(&events) {
            Ok(values) => text_count(values.len()),
            Err(rejection) => rejection,
        };
    }

    let Some(event) = state.get_event(T::SET, &owner_id, &event_id) else {
        return odata::not_found(&event_id);
    };
    match serde_json::to_value(event) {
        Ok(value) => (StatusCode::OK, Json(query.project(value))).into_response(),
        Err(e) => odata::error(StatusCode::INTERNAL_SERVER_ERROR, "generalException", e.to_string()),
    }
}

/// POST /{set}/{owner}/events
pub async fn create_event<T: MockEntity>(
    State(state): SharedState,
    Path(owner_id): Path<String>,
    headers: HeaderMap,
    Json(event): Json<Event>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = odata::authorize(&state, &headers) {
        return rejection;
    }
    if state.get::<T>(&owner_id).is_none() {
        return odata::not_found(&owner_id);
    }
    let created = state.insert_event(T::SET, &owner_id, event);
    (StatusCode::CREATED, Json(created)).into_response()
}

/// PATCH /{set}/{owner}/events/{id}
pub async fn update_event<T: MockEntity>(
    State(state): SharedState,
    Path((owner_id, event_id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(patch): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = odata::authorize(&state, &headers) {
        return rejection;
    }
    match state.update_event(T::SET, &owner_id, &event_id, patch) {
        Some(Ok(())) => StatusCode::NO_CONTENT.into_response(),
        Some(Err(e)) => odata::bad_request(e.to_string()),
        None => odata::not_found(&event_id),
    }
}

/// DELETE /{set}/{owner}/events/{id}
pub async fn delete_event<T: MockEntity>(
    State(state): SharedState,
    Path((owner_id, event_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = odata::authorize(&state, &headers) {
        return rejection;
    }
    if state.delete_event(T::SET, &owner_id, &event_id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        odata::not_found(&event_id)
    }
}
