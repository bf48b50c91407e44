use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cache;
mod config;
mod error;
mod handlers;
mod metrics;
mod models;
mod rate_limit;
mod state;
mod sweeper;
mod upstream;
mod worker;

use config::Args;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // parse cli arguments
    let args = Args::parse();

    let api_token =
        std::env::var("HF_TOKEN").context("HF_TOKEN must be set (environment or .env)")?;

    // shared stores, injected everywhere they are needed
    let cache = Arc::new(DashMap::new());
    let rate_limiter = Arc::new(DashMap::new());
    let (queue_tx, queue_rx) = mpsc::channel(100);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.upstream_timeout))
        .build()
        .context("building http client")?;

    let state = Arc::new(AppState {
        cache: Arc::clone(&cache),
        ttl: Duration::from_secs(args.cache_ttl),
        rate_limiter: Arc::clone(&rate_limiter),
        rate_limit: args.rate_limit,
        rate_window: Duration::from_secs(args.rate_window),
        model: args.model.clone(),
        queue_tx,
    });

    // spawn the background worker
    tokio::spawn(worker::request_worker(
        queue_rx,
        client,
        args.api_url.clone(),
        api_token,
        Arc::clone(&cache),
        state.ttl,
    ));

    // optional cleanup sweep
    if args.sweep_interval > 0 {
        tokio::spawn(sweeper::cleanup_sweeper(
            Arc::clone(&cache),
            state.ttl,
            Arc::clone(&rate_limiter),
            Duration::from_secs(args.idle_after),
            Duration::from_secs(args.sweep_interval),
        ));
    }

    // creating the router with routes
    let app = Router::new()
        .route("/", get(handlers::home_handler))
        .route("/ui", get(handlers::ui_handler))
        .route("/health", get(handlers::health_handler))
        .route("/api/generate", post(handlers::generate_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    info!("gateway running on http://localhost:{}", args.port);
    info!("forwarding to {}", args.api_url);
    info!("default model: {}", args.model);
    info!("cache TTL: {}s", args.cache_ttl);
    info!(
        "rate limit: {} requests per {}s",
        args.rate_limit, args.rate_window
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
