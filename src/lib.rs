//! In-memory posts service library.
//!
//! A small HTTP API over a single mutex-guarded map of posts.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{Post, PostStore};
