use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub name: String, pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct CommentRequest { pub content: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostFormDoc {
    pub title: String,
    /// derived from the title when omitted
    pub slug: Option<String>,
    pub content: String,
    pub excerpt: String,
    pub cover_image: Option<String>,
    pub category_id: Uuid,
    pub is_published: bool,
    pub read_time: Option<u32>,
    pub tags: Vec<String>,
}

#[derive(ToSchema)]
pub struct CategoryFormDoc {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::posts::list_published,
        crate::routes::posts::by_slug,
        crate::routes::posts::by_id,
        crate::routes::posts::list_comments,
        crate::routes::posts::create_comment,
        crate::routes::categories::list,
        crate::routes::categories::posts,
        crate::routes::admin::stats,
        crate::routes::admin::list_posts,
        crate::routes::admin::create_post,
        crate::routes::admin::update_post,
        crate::routes::admin::delete_post,
        crate::routes::admin::create_category,
        crate::routes::admin::update_category,
        crate::routes::admin::delete_category,
        crate::routes::admin::list_comments,
        crate::routes::admin::approve_comment,
        crate::routes::admin::delete_comment,
        crate::routes::admin::list_users,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            CommentRequest,
            PostFormDoc,
            CategoryFormDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "posts"),
        (name = "categories"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
