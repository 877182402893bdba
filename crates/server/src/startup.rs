use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tracing::info;

use crate::errors::StartupError;
use crate::metrics;
use crate::routes::{self, AppState};
use service::movies::MovieStore;

/// Load host/port from the validated config
fn load_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    cfg.bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}: {e}", cfg.bind_addr())))
}

/// Open the movie store and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let store = MovieStore::new(&cfg.storage.movies_file, cfg.storage.pretty).await?;
    let state = AppState::new(Arc::clone(&store) as Arc<dyn service::movies::MovieCatalog>);
    Ok(routes::build_router(state, routes::build_cors()))
}

/// Public entry: read configuration and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate()?;
    run_with_config(cfg).await
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    if cfg.admin.enabled {
        common::admin_http::spawn_admin_server(&cfg.admin.addr, metrics::encode_metrics).await?;
    }

    let addr = load_bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, movies_file = %cfg.storage.movies_file.display(), "movie api listening");
    axum::serve(listener, app).await?;
    Ok(())
}
