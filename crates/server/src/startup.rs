use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use configs::AppConfig;
use service::auth::{AuthConfig, AuthService};
use service::storage::FileBackend;
use service::{runtime, RecordStore};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn auth_config(cfg: &AppConfig) -> AuthConfig {
    AuthConfig {
        jwt_secret: cfg.auth.jwt_secret.clone(),
        token_ttl: chrono::Duration::hours(cfg.auth.token_ttl_hours),
        min_password_len: cfg.auth.min_password_len,
    }
}

/// Open the file-backed store under `storage.data_dir`, seeding empty keys
/// unless `storage.seed_on_start` is off.
pub async fn open_store(cfg: &AppConfig) -> Result<Arc<RecordStore>, StartupError> {
    runtime::ensure_env(&cfg.storage.data_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    let backend = FileBackend::new(cfg.storage.data_dir.as_str())
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    let store = RecordStore::new(Arc::new(backend));
    if cfg.storage.seed_on_start {
        store.initialize().await.map_err(|e| StartupError::Runtime(e.to_string()))?;
    }
    Ok(Arc::new(store))
}

/// Router over an already opened store.
pub fn build_app(store: Arc<RecordStore>, cfg: &AppConfig) -> Router {
    let auth = AuthService::new(store.clone(), auth_config(cfg));
    routes::build_router(build_cors(), ServerState::new(store, auth))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad listen address: {e}")))
}

/// Public entry: open the store described by an already validated
/// configuration and serve HTTP
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    if cfg.auth.is_dev_secret() {
        warn!("JWT_SECRET not set; using the development secret");
    }
    let addr = bind_addr(&cfg)?;

    let store = open_store(&cfg).await?;
    let app = build_app(store, &cfg);

    info!(%addr, data_dir = %cfg.storage.data_dir, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
