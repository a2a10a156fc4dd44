//! Domain Entities

use kernel::id::{PostId, UserId};

use crate::domain::value_objects::PostText;

/// Post entity - a user's text post
///
/// The owner is fixed at creation and posts are never updated in place;
/// the only mutation is deletion by the owner.
#[derive(Debug, Clone)]
pub struct Post {
    /// Store-assigned identifier
    pub id: PostId,
    /// The user who created the post
    pub owner_id: UserId,
    /// Body text
    pub text: PostText,
}

/// A post about to be created; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewPost {
    pub owner_id: UserId,
    pub text: PostText,
}

impl NewPost {
    pub fn new(owner_id: UserId, text: PostText) -> Self {
        Self { owner_id, text }
    }

    /// Attach the store-assigned id, producing the persisted entity
    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            owner_id: self.owner_id,
            text: self.text,
        }
    }
}
