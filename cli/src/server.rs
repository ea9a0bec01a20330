// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Relay HTTP server lifecycle

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use jkchat_core::{
    application::chat_service::StandardChatService,
    domain::relay_config::RelayConfig,
    infrastructure::llm::ProviderRegistry,
    presentation::api,
};

pub async fn start_server(config: RelayConfig) -> Result<()> {
    let registry = Arc::new(
        ProviderRegistry::from_config(&config).context("Failed to initialize LLM providers")?,
    );
    let chat_service = Arc::new(StandardChatService::new(registry));

    if !config.server.static_dir.join("welcomepage.html").exists() {
        warn!(
            "No welcomepage.html in {:?} - GET / will return 404",
            config.server.static_dir
        );
    }

    let app = api::app(chat_service, &config.server.static_dir);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Relay listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Relay shutting down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
