// recipebox - Document-backed recipe storage behind a small JSON HTTP API
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use recipebox::cli::Args;
use recipebox::config::AppConfig;
use recipebox::server::create_router;
use recipebox::store;
use recipebox::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a local .env before anything reads the environment
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting recipebox v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Open the document store (failure is logged, not fatal)
    let store = store::connect_or_offline(&config.database.url).await;

    // Phase 4: Build and start HTTP server
    let app = create_router(config.clone(), store.clone())?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Phase 6: Release the store
    if let Err(e) = store.close().await {
        error!("Failed to close document store: {}", e);
    }

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
