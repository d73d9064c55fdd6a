//! Admin screens: dashboard, post editor, category and comment moderation.
//! Every route here sits behind `require_admin`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use models::slug::slug_or_derive;
use models::{Category, Comment, NewCategory, NewPost, Post, UserProfile};
use service::store::{CommentFilter, DashboardStats, ModeratedComment, PostFilter};

use super::auth::ServerState;
use crate::errors::JsonApiError;

/// Editor form. The author is the admin submitting it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostForm {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub content: String,
    pub excerpt: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    pub category_id: Uuid,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub read_time: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PostForm {
    fn into_new(self, author_id: Uuid) -> NewPost {
        NewPost {
            title: self.title,
            slug: self.slug,
            content: self.content,
            excerpt: self.excerpt,
            cover_image: self.cover_image,
            category_id: self.category_id,
            author_id,
            is_published: self.is_published,
            read_time: self.read_time,
            tags: self.tags,
        }
    }

    /// Apply the form over a stored post; id, author and timestamps stay.
    fn apply_to(self, mut post: Post) -> Post {
        post.slug = slug_or_derive(self.slug.as_deref(), &self.title);
        post.title = self.title;
        post.content = self.content;
        post.excerpt = self.excerpt;
        post.cover_image = self.cover_image;
        post.category_id = self.category_id;
        post.is_published = self.is_published;
        post.read_time = self.read_time;
        post.tags = self.tags;
        post
    }
}

#[utoipa::path(get, path = "/admin/stats", tag = "admin", responses((status = 200, description = "Dashboard counters"), (status = 403, description = "Forbidden")))]
pub async fn stats(State(state): State<ServerState>) -> Result<Json<DashboardStats>, JsonApiError> {
    Ok(Json(state.store.dashboard_stats().await?))
}

#[utoipa::path(get, path = "/admin/posts", tag = "admin", params(("query" = Option<String>, Query,), ("status" = Option<String>, Query, description = "all | published | draft")), responses((status = 200, description = "OK")))]
pub async fn list_posts(State(state): State<ServerState>, Query(filter): Query<PostFilter>) -> Result<Json<Vec<Post>>, JsonApiError> {
    Ok(Json(state.store.search_posts(&filter).await?))
}

#[utoipa::path(post, path = "/admin/posts", tag = "admin", request_body = crate::openapi::PostFormDoc, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn create_post(
    State(state): State<ServerState>,
    Extension(user): Extension<UserProfile>,
    Json(form): Json<PostForm>,
) -> Result<(StatusCode, Json<Post>), JsonApiError> {
    let post = state.store.save_post(form.into_new(user.id)).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(put, path = "/admin/posts/{id}", tag = "admin", params(("id" = Uuid, Path,)), request_body = crate::openapi::PostFormDoc, responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn update_post(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(form): Json<PostForm>,
) -> Result<Json<Post>, JsonApiError> {
    let existing = state.store.post_by_id(id).await?.ok_or_else(|| JsonApiError::not_found("post"))?;
    state
        .store
        .update_post(form.apply_to(existing))
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("post"))
}

#[utoipa::path(delete, path = "/admin/posts/{id}", tag = "admin", params(("id" = Uuid, Path,)), responses((status = 204, description = "Deleted with its comments"), (status = 404, description = "Not Found")))]
pub async fn delete_post(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    match state.store.delete_post(id).await? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(JsonApiError::not_found("post")),
    }
}

#[utoipa::path(post, path = "/admin/categories", tag = "admin", request_body = crate::openapi::CategoryFormDoc, responses((status = 201, description = "Created"), (status = 409, description = "Conflict")))]
pub async fn create_category(
    State(state): State<ServerState>,
    Json(input): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>), JsonApiError> {
    let category = state.store.save_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(put, path = "/admin/categories/{id}", tag = "admin", params(("id" = Uuid, Path,)), request_body = crate::openapi::CategoryFormDoc, responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn update_category(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<NewCategory>,
) -> Result<Json<Category>, JsonApiError> {
    let category = Category {
        id,
        slug: slug_or_derive(input.slug.as_deref(), &input.name),
        name: input.name,
        description: input.description,
    };
    state.store.update_category(category).await?.map(Json).ok_or_else(|| JsonApiError::not_found("category"))
}

#[utoipa::path(delete, path = "/admin/categories/{id}", tag = "admin", params(("id" = Uuid, Path,)), responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"), (status = 409, description = "Category still has posts")))]
pub async fn delete_category(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    match state.store.delete_category(id).await? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(JsonApiError::not_found("category")),
    }
}

#[utoipa::path(get, path = "/admin/comments", tag = "admin", params(("query" = Option<String>, Query,), ("status" = Option<String>, Query, description = "all | approved | pending")), responses((status = 200, description = "OK")))]
pub async fn list_comments(
    State(state): State<ServerState>,
    Query(filter): Query<CommentFilter>,
) -> Result<Json<Vec<ModeratedComment>>, JsonApiError> {
    Ok(Json(state.store.search_comments(&filter).await?))
}

#[utoipa::path(post, path = "/admin/comments/{id}/approve", tag = "admin", params(("id" = Uuid, Path,)), responses((status = 200, description = "Approved"), (status = 404, description = "Not Found")))]
pub async fn approve_comment(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<Comment>, JsonApiError> {
    if !state.store.approve_comment(id).await? {
        return Err(JsonApiError::not_found("comment"));
    }
    state.store.comment_by_id(id).await?.map(Json).ok_or_else(|| JsonApiError::not_found("comment"))
}

#[utoipa::path(delete, path = "/admin/comments/{id}", tag = "admin", params(("id" = Uuid, Path,)), responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found")))]
pub async fn delete_comment(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    match state.store.delete_comment(id).await? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(JsonApiError::not_found("comment")),
    }
}

#[utoipa::path(get, path = "/admin/users", tag = "admin", responses((status = 200, description = "Users without password hashes")))]
pub async fn list_users(State(state): State<ServerState>) -> Result<Json<Vec<UserProfile>>, JsonApiError> {
    let users = state.store.users().await?;
    Ok(Json(users.iter().map(UserProfile::from).collect()))
}
