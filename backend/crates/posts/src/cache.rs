//! In-process post list cache
//!
//! Caches each user's full post list keyed by email. Entries live until
//! explicitly invalidated; there is no TTL and no size bound. Writers
//! must invalidate the owner's entry after every successful insert or
//! delete, before responding, so a subsequent read never serves a list
//! that predates the writer's own change.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entities::Post;

/// Shared post list cache
///
/// Interior mutability via a [`Mutex`]; share between handlers with an
/// `Arc<PostCache>`. The lock is only held for the map operation itself,
/// never across an await point.
#[derive(Debug, Default)]
pub struct PostCache {
    entries: Mutex<HashMap<String, Vec<Post>>>,
}

impl PostCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached post list for a user, if present
    pub fn get(&self, user_key: &str) -> Option<Vec<Post>> {
        self.lock().get(user_key).cloned()
    }

    /// Store a user's full post list, replacing any previous entry
    pub fn put(&self, user_key: &str, posts: Vec<Post>) {
        self.lock().insert(user_key.to_string(), posts);
    }

    /// Drop a user's entry. Removing an absent key is a no-op, so
    /// invalidation is idempotent.
    pub fn invalidate(&self, user_key: &str) {
        self.lock().remove(user_key);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Post>>> {
        // A poisoned lock only means another thread panicked mid-update;
        // the map itself is still usable.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
