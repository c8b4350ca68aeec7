//! In-memory post storage.
//!
//! # Data Flow
//! ```text
//! handler
//!     → PostStore (single Mutex)
//!         → HashMap<PostId, Post> + next_id counter
//!     → owned Post / Vec<Post> snapshot handed back
//! ```
//!
//! # Design Decisions
//! - One coarse lock serializes every operation, reads included
//! - Ids are assigned under the lock and never reused
//! - Callers only ever see owned copies, never references into the map

pub mod memory;
pub mod post;

pub use memory::{PostStore, StoreError};
pub use post::{NewPost, Post, PostId};
