//! Roost API Server
//!
//! REST API server for the Roost property marketplace.
//!
//! # Usage
//!
//! ```bash
//! # Start with environment from .env
//! roost-api-server
//!
//! # Override the bind address
//! roost-api-server --host 0.0.0.0 --port 8080
//! ```
//!
//! Required environment: `DATABASE_URL`, `JWT_SECRET`,
//! `PAYSTACK_SECRET_KEY`. Optional: `FRONTEND_URL`, `CORS_ORIGINS`,
//! `RUST_LOG`.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use roost_api::{create_router, ApiConfig, ApiSettings, AppState};
use roost_auth::{AuthConfig, AuthService};
use roost_db::{Database, DatabaseConfig};
use roost_paystack::{PaystackClient, PaystackConfig};

/// Roost API Server
#[derive(Parser, Debug)]
#[command(name = "roost-api-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Host to bind to
    #[arg(long, env = "ROOST_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "ROOST_PORT", default_value_t = 3000)]
    port: u16,

    /// Log level filter (overridden by RUST_LOG when set)
    #[arg(long, env = "ROOST_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Frontend base URL used for funding checkout redirects
    #[arg(long, env = "FRONTEND_URL", default_value = "http://localhost:5173")]
    frontend_url: String,

    /// Comma-separated list of allowed CORS origins, or * for any
    #[arg(long, env = "CORS_ORIGINS", default_value = "*")]
    cors_origins: String,

    /// Skip running migrations at startup
    #[arg(long, env = "ROOST_SKIP_MIGRATIONS")]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_tracing(&args.log_level);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Roost API server");

    // Database
    let db_config = DatabaseConfig::from_env();
    let db = Arc::new(Database::connect(&db_config).await?);
    if args.skip_migrations {
        tracing::warn!("Skipping migrations");
    } else {
        db.migrate().await?;
    }

    // Authentication
    let auth_config = AuthConfig::from_env()
        .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;
    if let Err(errors) = auth_config.validate() {
        anyhow::bail!("Invalid auth configuration: {}", errors.join("; "));
    }
    let auth = Arc::new(AuthService::with_tracing_notifier(auth_config));

    // Payment gateway
    let paystack_config = PaystackConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Paystack configuration: {}", e))?;
    let settings = ApiSettings {
        frontend_url: args.frontend_url.clone(),
        paystack_secret: paystack_config.secret_key.clone(),
    };
    let paystack = Arc::new(PaystackClient::new(&paystack_config));

    let state = Arc::new(AppState::new(db, auth.clone(), paystack, settings));

    let api_config = ApiConfig {
        enable_cors: true,
        cors_origins: args
            .cors_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .collect(),
        enable_tracing: true,
    };

    let router = create_router(state, auth.layer(), api_config);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},sqlx=warn,hyper=warn", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parsing() {
        let args = Args::parse_from(["roost-api-server", "--port", "8080"]);
        assert_eq!(args.port, 8080);
        assert_eq!(args.host, "127.0.0.1");
    }
}
