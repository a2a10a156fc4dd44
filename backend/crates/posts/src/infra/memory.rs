//! In-memory Post Repository
//!
//! Process-local implementation for tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::domain::entities::{NewPost, Post};
use crate::domain::repository::PostRepository;
use crate::error::{PostError, PostResult};

/// HashMap-backed post store
#[derive(Debug, Clone, Default)]
pub struct InMemoryPostRepository {
    posts: Arc<Mutex<HashMap<i64, Post>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> PostResult<std::sync::MutexGuard<'_, HashMap<i64, Post>>> {
        self.posts
            .lock()
            .map_err(|_| PostError::Internal("Post store lock poisoned".into()))
    }
}

impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> PostResult<Post> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let post = new_post.into_post(PostId::from_raw(id));
        self.lock()?.insert(id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, post_id: PostId) -> PostResult<Option<Post>> {
        Ok(self.lock()?.get(&post_id.as_i64()).cloned())
    }

    async fn list_by_owner(&self, owner_id: UserId) -> PostResult<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .lock()?
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        // Ids are monotonic, so this is creation order
        posts.sort_by_key(|p| p.id.as_i64());
        Ok(posts)
    }

    async fn delete(&self, post_id: PostId) -> PostResult<()> {
        self.lock()?.remove(&post_id.as_i64());
        Ok(())
    }
}
