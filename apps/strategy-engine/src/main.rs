//! Strategy Engine Binary
//!
//! Starts the options strategy engine HTTP service.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin strategy-engine
//! ```
//!
//! # Environment Variables
//!
//! All optional:
//! - `STRATEGY_ENGINE_HTTP_HOST`: Bind interface (default: 0.0.0.0)
//! - `STRATEGY_ENGINE_HTTP_PORT`: HTTP server port (default: 8090)
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

use strategy_engine::infrastructure::config::EngineConfig;
use strategy_engine::infrastructure::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    tracing::info!("Starting strategy engine");

    let config = EngineConfig::from_env();
    log_config(&config);

    let app = create_router(AppState::new());

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_addr()))?;

    tracing::info!(%addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health");
    tracing::info!("  GET    /v1/instruments");
    tracing::info!("  GET    /v1/instruments/{{symbol}}/expiries");
    tracing::info!("  GET    /v1/instruments/{{symbol}}/strikes");
    tracing::info!("  POST   /v1/quotes");
    tracing::info!("  POST   /v1/sessions");
    tracing::info!("  GET    /v1/sessions/{{id}}");
    tracing::info!("  DELETE /v1/sessions/{{id}}");
    tracing::info!("  POST   /v1/sessions/{{id}}/legs");
    tracing::info!("  DELETE /v1/sessions/{{id}}/legs");
    tracing::info!("  DELETE /v1/sessions/{{id}}/legs/{{leg_id}}");
    tracing::info!("  POST   /v1/sessions/{{id}}/template");
    tracing::info!("  GET    /v1/sessions/{{id}}/summary");
    tracing::info!("  POST   /v1/sessions/{{id}}/marks");
    tracing::info!("  GET    /v1/watchlist");
    tracing::info!("  POST   /v1/watchlist");
    tracing::info!("  DELETE /v1/watchlist");
    tracing::info!("  DELETE /v1/watchlist/{{symbol}}");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Strategy engine stopped");
    Ok(())
}

/// Load .env from the current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Initialize the tracing subscriber with environment filter.
///
/// Uses static directive strings that are compile-time constants guaranteed to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(
                    "strategy_engine=info"
                        .parse()
                        .expect("static directive 'strategy_engine=info' is valid"),
                )
                .add_directive(
                    "tower_http=info"
                        .parse()
                        .expect("static directive 'tower_http=info' is valid"),
                ),
        )
        .init();
}

/// Log the loaded configuration.
fn log_config(config: &EngineConfig) {
    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        "Configuration loaded"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed; a process that cannot
/// respond to termination signals should fail at startup instead.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
