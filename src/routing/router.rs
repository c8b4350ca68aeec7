//! Request dispatch.
//!
//! # Responsibilities
//! - Turn (method, path) into exactly one `Endpoint`
//! - Report bad ids, unsupported methods and unknown paths explicitly
//!
//! # Design Decisions
//! - Pure function over borrowed inputs; no state, nothing to share
//! - `Allow` values travel with the error so the response can carry them

use std::borrow::Cow;

use axum::http::Method;
use percent_encoding::percent_decode_str;
use thiserror::Error;

use crate::routing::matcher::PathShape;
use crate::store::PostId;

/// Methods accepted on the collection path.
pub const COLLECTION_ALLOW: &str = "GET, POST";

/// Methods accepted on item paths.
pub const ITEM_ALLOW: &str = "GET, DELETE";

/// One handler per (path shape, method) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /posts`
    ListPosts,
    /// `POST /posts`
    CreatePost,
    /// `GET /posts/{id}`
    GetPost(PostId),
    /// `DELETE /posts/{id}`
    DeletePost(PostId),
}

impl Endpoint {
    /// Stable label for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::ListPosts => "list_posts",
            Endpoint::CreatePost => "create_post",
            Endpoint::GetPost(_) => "get_post",
            Endpoint::DeletePost(_) => "delete_post",
        }
    }
}

/// Reasons a request does not reach a handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route for {0}")]
    NoMatch(String),

    #[error("invalid post id {0:?}")]
    BadPostId(String),

    #[error("method {method} not allowed (allow: {allow})")]
    MethodNotAllowed { method: Method, allow: &'static str },
}

/// Percent-decode a raw request path.
///
/// Malformed escapes are kept literally and invalid UTF-8 is replaced, so the
/// result never matches an id it should not.
pub fn decode_path(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw).decode_utf8_lossy()
}

/// Resolve a request to its endpoint.
///
/// `path` is the decoded path (see [`decode_path`]).
pub fn resolve(method: &Method, path: &str) -> Result<Endpoint, RouteError> {
    match PathShape::of(path) {
        Some(PathShape::Collection) => match *method {
            Method::GET => Ok(Endpoint::ListPosts),
            Method::POST => Ok(Endpoint::CreatePost),
            _ => Err(RouteError::MethodNotAllowed {
                method: method.clone(),
                allow: COLLECTION_ALLOW,
            }),
        },
        Some(PathShape::Item(suffix)) => {
            let id: PostId = suffix
                .parse()
                .map_err(|_| RouteError::BadPostId(suffix.to_string()))?;

            match *method {
                Method::GET => Ok(Endpoint::GetPost(id)),
                Method::DELETE => Ok(Endpoint::DeletePost(id)),
                _ => Err(RouteError::MethodNotAllowed {
                    method: method.clone(),
                    allow: ITEM_ALLOW,
                }),
            }
        }
        None => Err(RouteError::NoMatch(path.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_dispatch() {
        assert_eq!(resolve(&Method::GET, "/posts"), Ok(Endpoint::ListPosts));
        assert_eq!(resolve(&Method::POST, "/posts"), Ok(Endpoint::CreatePost));
        assert_eq!(
            resolve(&Method::DELETE, "/posts"),
            Err(RouteError::MethodNotAllowed {
                method: Method::DELETE,
                allow: COLLECTION_ALLOW,
            })
        );
    }

    #[test]
    fn test_item_dispatch() {
        assert_eq!(resolve(&Method::GET, "/posts/7"), Ok(Endpoint::GetPost(7)));
        assert_eq!(resolve(&Method::DELETE, "/posts/7"), Ok(Endpoint::DeletePost(7)));
        assert_eq!(resolve(&Method::GET, "/posts/-3"), Ok(Endpoint::GetPost(-3)));
        assert_eq!(
            resolve(&Method::PUT, "/posts/7"),
            Err(RouteError::MethodNotAllowed {
                method: Method::PUT,
                allow: ITEM_ALLOW,
            })
        );
    }

    #[test]
    fn test_bad_id_wins_over_method() {
        for method in [Method::GET, Method::DELETE, Method::PUT, Method::PATCH] {
            assert_eq!(
                resolve(&method, "/posts/abc"),
                Err(RouteError::BadPostId("abc".into()))
            );
        }
        assert_eq!(resolve(&Method::GET, "/posts/"), Err(RouteError::BadPostId(String::new())));
        assert_eq!(
            resolve(&Method::GET, "/posts/1/comments"),
            Err(RouteError::BadPostId("1/comments".into()))
        );
    }

    #[test]
    fn test_decoded_paths_resolve() {
        assert_eq!(decode_path("/posts/%31"), "/posts/1");
        assert_eq!(decode_path("/posts/%zz"), "/posts/%zz");
        assert_eq!(decode_path("/posts"), "/posts");

        assert_eq!(
            resolve(&Method::GET, &decode_path("/posts/%31%32")),
            Ok(Endpoint::GetPost(12))
        );
        assert_eq!(
            resolve(&Method::GET, &decode_path("/post%73")),
            Ok(Endpoint::ListPosts)
        );
        assert_eq!(
            resolve(&Method::GET, &decode_path("/posts/%zz")),
            Err(RouteError::BadPostId("%zz".into()))
        );
    }

    #[test]
    fn test_unknown_path() {
        assert_eq!(
            resolve(&Method::GET, "/users"),
            Err(RouteError::NoMatch("/users".into()))
        );
    }

    #[test]
    fn test_endpoint_names() {
        assert_eq!(Endpoint::ListPosts.name(), "list_posts");
        assert_eq!(Endpoint::DeletePost(1).name(), "delete_post");
    }
}
