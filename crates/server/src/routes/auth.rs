use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use models::UserProfile;
use service::auth::domain::{AuthSession, LoginInput, RegisterInput};
use service::auth::AuthService;
use service::RecordStore;

use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<RecordStore>,
    pub auth: Arc<AuthService>,
}

impl ServerState {
    pub fn new(store: Arc<RecordStore>, auth: AuthService) -> Self {
        Self { store, auth: Arc::new(auth) }
    }
}

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 200, description = "Registered and logged in"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<RegisterInput>,
) -> Result<(CookieJar, Json<AuthSession>), JsonApiError> {
    let session = state.auth.register(input).await?;
    let jar = jar.add(session_cookie(session.token.clone()));
    Ok((jar, Json(session)))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<AuthSession>), JsonApiError> {
    let session = state.auth.login(input).await?;
    let jar = jar.add(session_cookie(session.token.clone()));
    Ok((jar, Json(session)))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 204, description = "Logged out")))]
pub async fn logout(State(state): State<ServerState>, jar: CookieJar) -> Result<(CookieJar, StatusCode), JsonApiError> {
    state.auth.logout().await?;
    let jar = jar.remove(Cookie::build(AUTH_COOKIE).path("/"));
    Ok((jar, StatusCode::NO_CONTENT))
}

#[utoipa::path(get, path = "/auth/me", tag = "auth", responses((status = 200, description = "Current user"), (status = 401, description = "Unauthorized")))]
pub async fn me(Extension(user): Extension<UserProfile>) -> Json<UserProfile> {
    Json(user)
}

/// `Authorization: Bearer <token>` first, then the `auth_token` cookie.
fn request_token(req: &Request) -> Result<String, JsonApiError> {
    if let Some(h) = req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return match h.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => {
                tracing::warn!(path = %req.uri().path(), "invalid Authorization format (expect Bearer)");
                Err(JsonApiError::unauthorized("expected a Bearer token"))
            }
        };
    }
    let jar = CookieJar::from_headers(req.headers());
    match jar.get(AUTH_COOKIE).map(|c| c.value().to_string()) {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(JsonApiError::unauthorized("missing Authorization header and auth_token cookie")),
    }
}

async fn resolve_user(state: &ServerState, token: Result<String, JsonApiError>, path: &str) -> Result<UserProfile, JsonApiError> {
    state.auth.user_for_token(&token?).await.map_err(|e| {
        tracing::warn!(%path, err = %e, "token validation failed");
        JsonApiError::from(e)
    })
}

// `Request` is !Sync: nothing borrowed from it may be held across an await.

/// Resolve the caller's token to a user and hand it to the handler as
/// `Extension<UserProfile>`.
pub async fn require_auth(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, JsonApiError> {
    let (token, path) = (request_token(&req), req.uri().path().to_string());
    let user = resolve_user(&state, token, &path).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Like [`require_auth`], and the user must be an admin.
pub async fn require_admin(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, JsonApiError> {
    let (token, path) = (request_token(&req), req.uri().path().to_string());
    let user = resolve_user(&state, token, &path).await?;
    if !user.is_admin {
        tracing::warn!(%path, user_id = %user.id, "admin route denied");
        return Err(JsonApiError::forbidden());
    }
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
