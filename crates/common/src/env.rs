//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data directory exists and is writable.
pub async fn ensure_env(data_dir: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;

    let probe = Path::new(data_dir).join(".write_probe");
    if let Err(e) = tokio::fs::write(&probe, b"ok").await {
        return Err(anyhow::anyhow!("data dir {data_dir} is not writable: {e}"));
    }
    if tokio::fs::remove_file(&probe).await.is_err() {
        warn!(%data_dir, "could not remove write probe");
    }
    info!(%data_dir, "data directory ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_data_dir() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("insightblog_env_{}", std::process::id()));
        let dir_str = dir.to_string_lossy().to_string();
        ensure_env(&dir_str).await?;
        assert!(tokio::fs::metadata(&dir).await?.is_dir());
        assert!(tokio::fs::metadata(dir.join(".write_probe")).await.is_err());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
