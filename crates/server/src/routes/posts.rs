use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::{Comment, NewComment, Post, UserProfile};
use service::pagination::{Page, Pagination};

use super::auth::ServerState;
use crate::errors::JsonApiError;

#[derive(Debug, Deserialize)]
pub struct CommentInput {
    pub content: String,
}

#[utoipa::path(get, path = "/api/posts", tag = "posts", params(("page" = Option<usize>, Query,), ("per_page" = Option<usize>, Query,)), responses((status = 200, description = "Published posts, newest first")))]
pub async fn list_published(
    State(state): State<ServerState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Page<Post>>, JsonApiError> {
    let posts = state.store.published_posts().await?;
    Ok(Json(pagination.apply(posts)))
}

#[utoipa::path(get, path = "/api/posts/slug/{slug}", tag = "posts", params(("slug" = String, Path,)), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn by_slug(State(state): State<ServerState>, Path(slug): Path<String>) -> Result<Json<Post>, JsonApiError> {
    state.store.post_by_slug(&slug).await?.map(Json).ok_or_else(|| JsonApiError::not_found("post"))
}

#[utoipa::path(get, path = "/api/posts/{id}", tag = "posts", params(("id" = Uuid, Path,)), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn by_id(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<Post>, JsonApiError> {
    state.store.post_by_id(id).await?.map(Json).ok_or_else(|| JsonApiError::not_found("post"))
}

#[utoipa::path(get, path = "/api/posts/{id}/comments", tag = "posts", params(("id" = Uuid, Path,)), responses((status = 200, description = "Approved comments"), (status = 404, description = "Not Found")))]
pub async fn list_comments(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<Vec<Comment>>, JsonApiError> {
    if state.store.post_by_id(id).await?.is_none() {
        return Err(JsonApiError::not_found("post"));
    }
    Ok(Json(state.store.comments_by_post(id).await?))
}

/// The comment is stored unapproved and stays hidden until moderated.
#[utoipa::path(post, path = "/api/posts/{id}/comments", tag = "posts", params(("id" = Uuid, Path,)), request_body = crate::openapi::CommentRequest, responses((status = 201, description = "Submitted for moderation"), (status = 401, description = "Unauthorized"), (status = 404, description = "Not Found")))]
pub async fn create_comment(
    State(state): State<ServerState>,
    Extension(user): Extension<UserProfile>,
    Path(id): Path<Uuid>,
    Json(input): Json<CommentInput>,
) -> Result<(StatusCode, Json<Comment>), JsonApiError> {
    if state.store.post_by_id(id).await?.is_none() {
        return Err(JsonApiError::not_found("post"));
    }
    let comment = state
        .store
        .save_comment(NewComment { post_id: id, user_id: user.id, content: input.content })
        .await?;
    info!(comment_id = %comment.id, user_id = %user.id, "comment_received");
    Ok((StatusCode::CREATED, Json(comment)))
}
