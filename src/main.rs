use axum::Router;
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::sync::Arc;
use std::time::Duration;

use teashop::config::Config;
use teashop::db::{create_pool, init_db, AppState};
use teashop::handlers;
use teashop::payments::PayOsClient;
use teashop::rate_limit::RateLimiters;
use teashop::seed;

#[derive(Parser, Debug)]
#[command(name = "teashop")]
#[command(about = "Backend for the 84tea storefront")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Upsert the launch catalog into the products table, then exit
    Seed,
}

/// Spawns a background task that drops stale rate-limiter buckets.
fn spawn_cleanup_task(limiters: Arc<RateLimiters>) {
    tokio::spawn(async move {
        let interval = Duration::from_secs(5 * 60);

        loop {
            tokio::time::sleep(interval).await;
            limiters.cleanup();
            tracing::debug!("rate limiter buckets cleaned up");
        }
    });

    tracing::info!("Background cleanup task started (runs every 5 minutes)");
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teashop=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if config.dev_mode {
        tracing::info!("Running in DEVELOPMENT mode");
    }
    if config.admin_token.is_empty() {
        tracing::warn!("ADMIN_TOKEN is not set, the admin API will reject every request");
    }

    let db_pool = create_pool(&config.database_path).expect("Failed to create database pool");
    {
        let conn = db_pool.get().expect("Failed to get connection");
        init_db(&conn).expect("Failed to initialize database");
    }

    if let Some(Command::Seed) = cli.command {
        let conn = db_pool.get().expect("Failed to get connection");
        let count = seed::seed_products(&conn).expect("Failed to seed products");
        tracing::info!("Seeded {} products", count);
        return;
    }

    let limiters = Arc::new(RateLimiters::new(&config.rate_limit));

    let state = AppState {
        db: db_pool,
        base_url: config.base_url.clone(),
        payos: PayOsClient::new(config.payos.clone()),
        admin_token: config.admin_token.clone(),
        limiters: Arc::clone(&limiters),
    };

    spawn_cleanup_task(limiters);

    let app = Router::new()
        // Public storefront endpoints (no auth)
        .merge(handlers::public::router())
        // PayOS webhook (signature auth)
        .merge(handlers::webhooks::router())
        // Admin API (bearer token auth)
        .merge(handlers::admin::router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("teashop server listening on {}", addr);

    // Connect info is required for IP-based rate limiting
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Failed to start server");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
