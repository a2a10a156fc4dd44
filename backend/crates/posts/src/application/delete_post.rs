//! Delete Post Use Case

use std::sync::Arc;

use auth::domain::entity::user::User;
use kernel::id::PostId;

use crate::cache::PostCache;
use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::error::{PostError, PostResult};

/// Deletes one of the acting user's posts
pub struct DeletePostUseCase<R> {
    repo: Arc<R>,
    cache: Arc<PostCache>,
}

impl<R: PostRepository> DeletePostUseCase<R> {
    pub fn new(repo: Arc<R>, cache: Arc<PostCache>) -> Self {
        Self { repo, cache }
    }

    /// Returns the deleted post as it was before removal.
    ///
    /// Existence is checked before ownership, so deleting a missing post
    /// is a 404 even for users who never owned it.
    pub async fn execute(&self, actor: &User, post_id: PostId) -> PostResult<Post> {
        let post = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or(PostError::NotFound)?;

        if post.owner_id != actor.id {
            return Err(PostError::Forbidden);
        }

        self.repo.delete(post_id).await?;
        self.cache.invalidate(actor.email.as_str());

        tracing::info!(post_id = %post.id, user_id = %actor.id, "Post deleted");

        Ok(post)
    }
}
