//! Posts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Post entity, text bounds, repository trait
//! - `application/` - Create, list and delete use cases
//! - `infra/` - Store implementations (Postgres, in-memory)
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Authenticated users create, list and delete their own posts
//! - Per-user post list cache with invalidate-on-write, so a user's
//!   reads always reflect their own completed writes
//! - Ownership checks; posts are invisible to and untouchable by others

pub mod application;
pub mod cache;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use cache::PostCache;
pub use error::{PostError, PostResult};
pub use infra::memory::InMemoryPostRepository;
pub use infra::postgres::PgPostRepository;
pub use presentation::router::posts_router;

// Convenience re-exports
pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
