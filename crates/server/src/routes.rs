use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

pub mod admin;
pub mod auth;
pub mod categories;
pub mod posts;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::openapi::ApiDoc::openapi())
}

/// Build the full application router: public reads, authenticated comment
/// submission and the admin screens.
pub fn build_router(cors: CorsLayer, state: auth::ServerState) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/api/posts", get(posts::list_published))
        .route("/api/posts/slug/:slug", get(posts::by_slug))
        .route("/api/posts/:id", get(posts::by_id))
        .route("/api/posts/:id/comments", get(posts::list_comments))
        .route("/api/categories", get(categories::list))
        .route("/api/categories/:slug/posts", get(categories::posts));

    let signed_in = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/api/posts/:id/comments", post(posts::create_comment))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    let admin_routes = Router::new()
        .route("/admin/stats", get(admin::stats))
        .route("/admin/posts", get(admin::list_posts).post(admin::create_post))
        .route("/admin/posts/:id", put(admin::update_post).delete(admin::delete_post))
        .route("/admin/categories", post(admin::create_category))
        .route("/admin/categories/:id", put(admin::update_category).delete(admin::delete_category))
        .route("/admin/comments", get(admin::list_comments))
        .route("/admin/comments/:id/approve", post(admin::approve_comment))
        .route("/admin/comments/:id", axum::routing::delete(admin::delete_comment))
        .route("/admin/users", get(admin::list_users))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin));

    public
        .merge(signed_in)
        .merge(admin_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
