use std::sync::Arc;

use anyhow::Context;

use warden_api::config::ApiConfig;
use warden_auth::InMemoryUserDirectory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    warden_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;

    let directory = match &config.users_file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read users file {}", path.display()))?;
            InMemoryUserDirectory::from_json(&raw)
                .with_context(|| format!("failed to parse users file {}", path.display()))?
        }
        None => InMemoryUserDirectory::new(),
    };
    if directory.is_empty() {
        tracing::warn!("user directory is empty; every login will be rejected");
    } else {
        tracing::info!(users = directory.len(), "user directory loaded");
    }

    let app = warden_api::app::build_app(&config.auth, Arc::new(directory))
        .context("failed to build application")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
