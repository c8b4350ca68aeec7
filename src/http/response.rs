//! Error responses.
//!
//! # Responsibilities
//! - Map routing, store and body failures to HTTP status codes
//! - Render every error as a plain-text body
//!
//! # Design Decisions
//! - One enum for everything a request can fail with
//! - Error bodies are fixed strings; internal detail stays in logs
//! - 405 responses list the allowed methods in `Allow`

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::routing::RouteError;
use crate::store::{PostId, StoreError};

/// Terminal failure of a request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Error reading req body")]
    BodyRead(#[source] axum::Error),

    #[error("Error parsing request body")]
    BodyParse(#[source] serde_json::Error),

    #[error("Bad post ID")]
    BadPostId(String),

    #[error("Post not found")]
    PostNotFound(PostId),

    #[error("Method not allowed")]
    MethodNotAllowed { allow: &'static str },

    #[error("404 page not found")]
    UnknownPath(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BodyRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BodyParse(_) | ApiError::BadPostId(_) => StatusCode::BAD_REQUEST,
            ApiError::PostNotFound(_) | ApiError::UnknownPath(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::NoMatch(path) => ApiError::UnknownPath(path),
            RouteError::BadPostId(raw) => ApiError::BadPostId(raw),
            RouteError::MethodNotAllowed { allow, .. } => ApiError::MethodNotAllowed { allow },
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::PostNotFound(id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.to_string();

        match self {
            ApiError::MethodNotAllowed { allow } => {
                (status, [(header::ALLOW, allow)], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
