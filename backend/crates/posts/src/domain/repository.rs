//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{PostId, UserId};

use crate::domain::entities::{NewPost, Post};
use crate::error::PostResult;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Create a new post; the store assigns the id
    async fn create(&self, new_post: NewPost) -> PostResult<Post>;

    /// Find post by ID
    async fn find_by_id(&self, post_id: PostId) -> PostResult<Option<Post>>;

    /// List all posts by an owner, in creation order
    async fn list_by_owner(&self, owner_id: UserId) -> PostResult<Vec<Post>>;

    /// Delete a post
    async fn delete(&self, post_id: PostId) -> PostResult<()>;
}
