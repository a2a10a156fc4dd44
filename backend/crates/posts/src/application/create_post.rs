//! Create Post Use Case

use std::sync::Arc;

use auth::domain::entity::user::User;

use crate::cache::PostCache;
use crate::domain::entities::{NewPost, Post};
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::PostText;
use crate::error::PostResult;

/// Input for post creation
#[derive(Debug)]
pub struct CreatePostInput {
    pub text: String,
}

/// Creates a post owned by the acting user
pub struct CreatePostUseCase<R> {
    repo: Arc<R>,
    cache: Arc<PostCache>,
}

impl<R: PostRepository> CreatePostUseCase<R> {
    pub fn new(repo: Arc<R>, cache: Arc<PostCache>) -> Self {
        Self { repo, cache }
    }

    pub async fn execute(&self, actor: &User, input: CreatePostInput) -> PostResult<Post> {
        let text = PostText::new(input.text)?;

        let post = self
            .repo
            .create(NewPost::new(actor.id, text))
            .await?;

        // Drop the actor's cached list before responding, so the next
        // read reflects this insert
        self.cache.invalidate(actor.email.as_str());

        tracing::info!(post_id = %post.id, user_id = %actor.id, "Post created");

        Ok(post)
    }
}
