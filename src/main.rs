use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use clap::Parser;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::EnvFilter;

use lumina_api::config::{AppConfig, SecurityConfig};
use lumina_api::database::{DatabaseManager, PgStore};
use lumina_api::{build_router, AppState};

#[derive(Parser)]
#[command(name = "lumina-api")]
#[command(about = "Lumína - REST API for school administrative records")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Address to bind (overrides HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides PORT / LUMINA_API_PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Apply the bundled schema migrations before serving")]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_HOST, DB_NAME, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    tracing::info!(environment = ?config.environment, database = ?config.database, "Starting Lumína API");

    let pool = DatabaseManager::connect(&config.database)?;
    if cli.migrate {
        DatabaseManager::migrate(&pool).await?;
    }

    let app = build_router(AppState::new(PgStore::new(pool.clone())))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));
    let app = match cors_layer(&config.security) {
        Some(cors) => app.layer(cors),
        None => app,
    };

    let host = config.api.host.as_str();
    let port = config.api.port;
    let listener = lumina_api::router::bind(host, port)
        .await
        .with_context(|| format!("failed to bind {}:{}", host, port))?;

    tracing::info!(
        "Lumína API listening on http://{}",
        listener.local_addr().context("listener has no local address")?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Database pool closed");
    Ok(())
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    Some(CorsLayer::permissive().allow_origin(AllowOrigin::list(origins)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
