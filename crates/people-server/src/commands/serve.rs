//! Serve command implementation.

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

use people_server::api;
use people_server::bootstrap;
use people_server::cli::ServeArgs;

pub async fn run(args: ServeArgs) -> Result<()> {
    let state = bootstrap::app_state(&args)
        .await
        .context("Failed to initialize")?;

    let listener = TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("Failed to bind {}", args.listen))?;
    info!(addr = %args.listen, "Listening");

    api::serve(listener, state, shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
