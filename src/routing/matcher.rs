//! Path shape matching.
//!
//! # Responsibilities
//! - Recognize the collection path (`/posts`)
//! - Recognize item paths (`/posts/<suffix>`) and hand back the raw suffix
//!
//! # Design Decisions
//! - Exact, case-sensitive comparison
//! - No regex; a prefix strip is all that is needed
//! - The suffix is not validated here (the router owns id parsing)

/// Path of the post collection.
pub const COLLECTION_PATH: &str = "/posts";

/// Prefix of single-post paths.
pub const ITEM_PREFIX: &str = "/posts/";

/// Shape of a recognized request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathShape<'a> {
    /// `/posts`
    Collection,
    /// `/posts/<suffix>`; the suffix may be empty or non-numeric.
    Item(&'a str),
}

impl<'a> PathShape<'a> {
    /// Classify a request path, or `None` if it is not a post path.
    pub fn of(path: &'a str) -> Option<Self> {
        if path == COLLECTION_PATH {
            return Some(PathShape::Collection);
        }
        path.strip_prefix(ITEM_PREFIX).map(PathShape::Item)
    }
}
