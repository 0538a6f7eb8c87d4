//! Handlers for top-level entity sets such as `/groups` and `/users`.
//!
//! Each handler is generic over [`MockEntity`] so one implementation serves
//! every set the router mounts.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::mock_server::odata::{self, ODataQuery};
use crate::mock_server::state::{MockEntity, MockState};

type SharedState = State<Arc<RwLock<MockState>>>;

/// GET /{set}
pub async fn list<T: MockEntity>(
    State(state): SharedState,
    Query(query): Query<ODataQuery>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(rejection) = odata::authorize(&state, &headers) {
        return rejection;
    }
    // directory objects only count with eventual consistency
    if query.count == Some(true) {
        if let Err(rejection) = odata::require_eventual_consistency(&headers) {
            return rejection;
        }
    }

    let items = state.list::<T>();
    match query.collection(&items, &state.base_url, &format!("/{}", T::SET)) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(rejection) => rejection,
    }
}

/// GET /{set}/$count, reached through [`get_one`].
fn count_response<T: MockEntity>(state: &MockState, query: &ODataQuery, headers: &HeaderMap) -> Response {
    if let Err(rejection) = odata::authorize(state, headers) {
        return rejection;
    }
    if let Err(rejection) = odata::require_eventual_consistency(headers) {
        return rejection;
    }
    let items = state.list::<T>();
    match query.matching(&items) {
        Ok(values) => text_count(values.len()),
        Err(rejection) => rejection,
    }
}

pub(crate) fn text_count(count: usize) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain")],
        count.to_string(),
    )
        .into_response()
}

/// GET /{set}/{id}
pub async fn get_one<T: MockEntity>(
    State(state): SharedState,
    Path(id): Path<String>,
    Query(query): Query<ODataQuery>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    // `$count` shares the item route
    if id == "$count" {
        return count_response::<T>(&state, &query, &headers);
    }
    if let Err(rejection) = odata::authorize(&state, &headers) {
        return rejection;
    }

    let Some(entity) = state.get::<T>(&id) else {
        return odata::not_found(&id);
    };
    match serde_json::to_value(entity) {
        Ok(value) => (StatusCode::OK, Json(query.project(value))).into_response(),
        Err(e) => odata::error(StatusCode::INTERNAL_SERVER_ERROR, "generalException", e.to_string()),
    }
}

/// POST /{set}
pub async fn create<T: MockEntity>(
    State(state): SharedState,
    headers: HeaderMap,
    Json(entity): Json<T>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = odata::authorize(&state, &headers) {
        return rejection;
    }
    let created = state.insert(entity);
    (StatusCode::CREATED, Json(created)).into_response()
}

/// PATCH /{set}/{id}
pub async fn update<T: MockEntity>(
    State(state): SharedState,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(patch): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = odata::authorize(&state, &headers) {
        return rejection;
    }
    match state.update::<T>(&id, patch) {
        Some(Ok(())) => StatusCode::NO_CONTENT.into_response(),
        Some(Err(e)) => odata::bad_request(e.to_string()),
        None => odata::not_found(&id),
    }
}

/// DELETE /{set}/{id}
pub async fn delete<T: MockEntity>(
    State(state): SharedState,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = odata::authorize(&state, &headers) {
        return rejection;
    }
    if state.delete::<T>(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        odata::not_found(&id)
    }
}
