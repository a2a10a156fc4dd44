//! List Posts Use Case

use std::sync::Arc;

use auth::domain::entity::user::User;

use crate::cache::PostCache;
use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::error::PostResult;

/// Lists the acting user's posts, cache first
pub struct ListPostsUseCase<R> {
    repo: Arc<R>,
    cache: Arc<PostCache>,
}

impl<R: PostRepository> ListPostsUseCase<R> {
    pub fn new(repo: Arc<R>, cache: Arc<PostCache>) -> Self {
        Self { repo, cache }
    }

    pub async fn execute(&self, actor: &User) -> PostResult<Vec<Post>> {
        if let Some(posts) = self.cache.get(actor.email.as_str()) {
            tracing::debug!(user_id = %actor.id, "Post list served from cache");
            return Ok(posts);
        }

        let posts = self.repo.list_by_owner(actor.id).await?;
        self.cache.put(actor.email.as_str(), posts.clone());

        Ok(posts)
    }
}
