//! HTTP Handlers
//!
//! All routes here assume the auth middleware already ran and stored a
//! [`CurrentUser`] in the request extensions.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use std::sync::Arc;

use auth::presentation::middleware::CurrentUser;
use kernel::id::PostId;

use crate::application::{
    CreatePostInput, CreatePostUseCase, DeletePostUseCase, ListPostsUseCase,
};
use crate::cache::PostCache;
use crate::domain::repository::PostRepository;
use crate::error::PostResult;
use crate::presentation::dto::{CreatePostRequest, PostResponse};

/// Shared state for post handlers
#[derive(Clone)]
pub struct PostsAppState<R>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub cache: Arc<PostCache>,
}

/// POST /posts
pub async fn create_post<R>(
    State(state): State<PostsAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CreatePostRequest>,
) -> PostResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreatePostUseCase::new(state.repo.clone(), state.cache.clone());

    let post = use_case
        .execute(&user, CreatePostInput { text: req.text })
        .await?;

    Ok(Json(post.into()))
}

/// GET /posts
pub async fn list_posts<R>(
    State(state): State<PostsAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> PostResult<Json<Vec<PostResponse>>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListPostsUseCase::new(state.repo.clone(), state.cache.clone());

    let posts = use_case.execute(&user).await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// DELETE /posts/{post_id}
pub async fn delete_post<R>(
    State(state): State<PostsAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
) -> PostResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeletePostUseCase::new(state.repo.clone(), state.cache.clone());

    let post = use_case.execute(&user, PostId::from_raw(post_id)).await?;

    Ok(Json(post.into()))
}
