mod config;
mod customers;
mod dashboard;
mod db;
mod errors;
mod format;
mod inventory;
mod invoices;
mod jobs;
mod marketing;
mod messages;
mod models;
mod routes;
mod schedule;
mod sms;
mod state;
mod vehicles;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::sms::SmsClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Atelier API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize the message relay client, if configured
    let sms = match (
        config.sms_relay_url.clone(),
        config.sms_relay_password.clone(),
    ) {
        (Some(url), Some(password)) => {
            info!("Message relay configured at {url}");
            Some(SmsClient::new(url, password))
        }
        _ => {
            info!("Message relay not configured; message endpoints answer 503");
            None
        }
    };

    // Build app state
    let state = AppState { db, sms };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
