//! Posts Router
//!
//! Routes are relative; the app nests this under `/posts` and layers the
//! auth middleware on top.

use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::cache::PostCache;
use crate::domain::repository::PostRepository;
use crate::infra::postgres::PgPostRepository;
use crate::presentation::handlers::{self, PostsAppState};

/// Create the Posts router with PostgreSQL repository
pub fn posts_router(repo: PgPostRepository, cache: Arc<PostCache>) -> Router {
    posts_router_generic(repo, cache)
}

/// Create a generic Posts router for any repository implementation
pub fn posts_router_generic<R>(repo: R, cache: Arc<PostCache>) -> Router
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let state = PostsAppState {
        repo: Arc::new(repo),
        cache,
    };

    Router::new()
        .route("/", post(handlers::create_post::<R>))
        .route("/", get(handlers::list_posts::<R>))
        .route("/{post_id}", delete(handlers::delete_post::<R>))
        .with_state(state)
}
