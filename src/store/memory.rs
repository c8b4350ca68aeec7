//! Mutex-guarded post map.
//!
//! # Responsibilities
//! - Assign ids from a monotonic counter
//! - Insert, look up, snapshot and remove posts
//! - Keep the map and the counter consistent across concurrent callers
//!
//! # Design Decisions
//! - `std::sync::Mutex`: critical sections never await, so a blocking lock is enough
//! - A poisoned lock is recovered; no operation panics between its writes

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::store::post::{Post, PostId};

/// Errors returned by store lookups.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// No post with this id is currently stored.
    #[error("post {0} not found")]
    NotFound(PostId),
}

#[derive(Debug)]
struct StoreState {
    posts: HashMap<PostId, Post>,
    next_id: PostId,
}

/// Shared in-memory post store.
///
/// Every operation holds the lock for its whole duration, so operations are
/// totally ordered by lock acquisition.
#[derive(Debug)]
pub struct PostStore {
    state: Mutex<StoreState>,
}

impl PostStore {
    /// Create an empty store. The first post gets id 1.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                posts: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a new post and return it with its assigned id.
    pub fn create(&self, body: String) -> Post {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;

        let post = Post { id, body };
        state.posts.insert(id, post.clone());
        post
    }

    /// Snapshot of every stored post, ordered by id.
    pub fn list(&self) -> Vec<Post> {
        let state = self.lock();
        let mut posts: Vec<Post> = state.posts.values().cloned().collect();
        drop(state);

        posts.sort_unstable_by_key(|p| p.id);
        posts
    }

    pub fn get(&self, id: PostId) -> Result<Post, StoreError> {
        self.lock()
            .posts
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    pub fn delete(&self, id: PostId) -> Result<(), StoreError> {
        self.lock()
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    /// Number of posts currently stored.
    pub fn len(&self) -> usize {
        self.lock().posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}
