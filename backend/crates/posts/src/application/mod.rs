//! Application Layer

pub mod create_post;
pub mod delete_post;
pub mod list_posts;

pub use create_post::{CreatePostInput, CreatePostUseCase};
pub use delete_post::DeletePostUseCase;
pub use list_posts::ListPostsUseCase;
