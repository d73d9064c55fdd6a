use axum::{
    extract::{Path, State},
    Json,
};

use models::{Category, Post};

use super::auth::ServerState;
use crate::errors::JsonApiError;

#[utoipa::path(get, path = "/api/categories", tag = "categories", responses((status = 200, description = "OK")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Category>>, JsonApiError> {
    Ok(Json(state.store.categories().await?))
}

#[utoipa::path(get, path = "/api/categories/{slug}/posts", tag = "categories", params(("slug" = String, Path,)), responses((status = 200, description = "Published posts of the category"), (status = 404, description = "Not Found")))]
pub async fn posts(State(state): State<ServerState>, Path(slug): Path<String>) -> Result<Json<Vec<Post>>, JsonApiError> {
    let category = state.store.category_by_slug(&slug).await?.ok_or_else(|| JsonApiError::not_found("category"))?;
    Ok(Json(state.store.posts_by_category(category.id).await?))
}
