// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::env;

use orgnet_server::{
    api::router,
    config::{AppConfig, LOG_FORMAT_ENV},
    state::AppState,
};
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json = env::var(LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AppConfig::from_env().expect("Invalid configuration");
    tracing::info!(?config, "configuration loaded");

    let state = AppState::from_config(&config);

    if let Some(seed) = &config.seed_admin {
        match state.seed_admin(seed).await {
            Ok(Some(admin)) => tracing::info!(user_id = %admin.id, "seeded admin account"),
            Ok(None) => tracing::info!("seed admin already present"),
            Err(e) => tracing::error!(error = %e, "failed to seed admin account"),
        }
    }

    let app = router(state);
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!(%addr, "OrgNet server listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}
