//! Data Transfer Objects

use kernel::id::{PostId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Post;

/// Post creation request body
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
}

/// Post representation in responses
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: PostId,
    pub owner_id: UserId,
    pub text: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            owner_id: post.owner_id,
            text: post.text.into_db(),
        }
    }
}
