//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use auth::CurrentUser;
use kernel::id::PostId;

use crate::application::{
    CreatePostInput, CreatePostUseCase, DeletePostUseCase, GetPostUseCase, ListPostsUseCase,
    UpdatePostInput, UpdatePostUseCase,
};
use crate::domain::repository::PostRepository;
use crate::error::{PostError, PostResult};
use crate::presentation::dto::{PostRequest, PostResponse};

/// Shared state for post handlers
#[derive(Clone)]
pub struct PostsAppState<R>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// Ids that are not integers name no post.
fn parse_post_id(raw: &str) -> PostResult<PostId> {
    raw.parse().map_err(|_| PostError::NotFound)
}

// ============================================================================
// Public
// ============================================================================

/// GET /posts
pub async fn list_posts<R>(
    State(state): State<PostsAppState<R>>,
) -> PostResult<Json<Vec<PostResponse>>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let posts = ListPostsUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// GET /posts/{id}
pub async fn get_post<R>(
    State(state): State<PostsAppState<R>>,
    Path(id): Path<String>,
) -> PostResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let post_id = parse_post_id(&id)?;
    let post = GetPostUseCase::new(state.repo.clone())
        .execute(post_id)
        .await?;

    Ok(Json(post.into()))
}

// ============================================================================
// Protected
// ============================================================================

/// POST /posts
pub async fn create_post<R>(
    State(state): State<PostsAppState<R>>,
    CurrentUser(identity): CurrentUser,
    payload: Result<Json<PostRequest>, JsonRejection>,
) -> PostResult<(StatusCode, Json<PostResponse>)>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let post = CreatePostUseCase::new(state.repo.clone())
        .execute(CreatePostInput {
            author: identity.id,
            title: req.title,
            content: req.content,
            status: req.status,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// PUT /posts/{id}
pub async fn update_post<R>(
    State(state): State<PostsAppState<R>>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<PostRequest>, JsonRejection>,
) -> PostResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let post_id = parse_post_id(&id)?;
    let Json(req) = payload?;

    let post = UpdatePostUseCase::new(state.repo.clone())
        .execute(UpdatePostInput {
            post_id,
            editor: identity.id,
            title: req.title,
            content: req.content,
            status: req.status,
        })
        .await?;

    Ok(Json(post.into()))
}

/// DELETE /posts/{id}
pub async fn delete_post<R>(
    State(state): State<PostsAppState<R>>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
) -> PostResult<StatusCode>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let post_id = parse_post_id(&id)?;

    DeletePostUseCase::new(state.repo.clone())
        .execute(post_id, identity.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
