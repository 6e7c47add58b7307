// crates/server/src/main.rs
//! Scanhub server binary.

use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scanhub_server::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn,scanhub_server=info".into()),
        )
        .init();

    let config = Config::from_env();
    let state = AppState::new(config.clone());

    // The root storage directory must exist before the first submission.
    state.storage.ensure_root()?;

    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        upload_root = %config.upload_root.display(),
        "scanhub listening on {addr}"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
