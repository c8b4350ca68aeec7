//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (percent-decode path)
//!     → matcher.rs (classify path shape: collection or item)
//!     → router.rs (parse item id, then pair shape with method)
//!     → Return: Endpoint or RouteError
//! ```
//!
//! # Design Decisions
//! - Closed set of endpoints; every (shape, method) pair maps to one variant
//! - Item ids are parsed before the method is checked, so a bad id is a 400
//!   whatever the method
//! - Unknown paths are an explicit no-match, never a silent default

pub mod matcher;
pub mod router;

pub use matcher::PathShape;
pub use router::{decode_path, resolve, Endpoint, RouteError};
