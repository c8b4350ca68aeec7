//! Post handlers.
//!
//! One function per endpoint. Each performs a single store operation and
//! builds the whole response only after the operation succeeded, so an error
//! never follows a partially written success.

use axum::body::{to_bytes, Body};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http::response::ApiError;
use crate::observability::metrics;
use crate::store::{NewPost, PostId, PostStore};

/// `GET /posts`
pub fn list_posts(store: &PostStore) -> Result<Response, ApiError> {
    Ok(Json(store.list()).into_response())
}

/// `POST /posts`
///
/// Reads at most `max_body_bytes`; anything longer counts as unreadable.
pub async fn create_post(
    store: &PostStore,
    body: Body,
    max_body_bytes: usize,
) -> Result<Response, ApiError> {
    let bytes = to_bytes(body, max_body_bytes)
        .await
        .map_err(ApiError::BodyRead)?;
    let payload: NewPost = serde_json::from_slice(&bytes).map_err(ApiError::BodyParse)?;

    let post = store.create(payload.into_body());
    metrics::record_store_size(store.len());
    tracing::debug!(id = post.id, "Post created");

    Ok((StatusCode::CREATED, Json(post)).into_response())
}

/// `GET /posts/{id}`
pub fn get_post(store: &PostStore, id: PostId) -> Result<Response, ApiError> {
    let post = store.get(id)?;
    Ok(Json(post).into_response())
}

/// `DELETE /posts/{id}`
pub fn delete_post(store: &PostStore, id: PostId) -> Result<Response, ApiError> {
    store.delete(id)?;
    metrics::record_store_size(store.len());
    tracing::debug!(id, "Post deleted");

    Ok(StatusCode::OK.into_response())
}
