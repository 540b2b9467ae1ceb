//! Storefront - in-memory storefront service

use anyhow::Result;
use storefront::{router, AppState, Checkout, Config, EventPublisher, MemStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let events = match config.nats_url.as_deref() {
        Some(url) => EventPublisher::connect(url).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "NATS unavailable, events will only be logged");
            EventPublisher::disabled()
        }),
        None => EventPublisher::disabled(),
    };
    let store = if config.seed_catalog { MemStore::seeded(events).await } else { MemStore::new(events) };
    let state = AppState::new(store, Checkout::new(config.checkout_delay));

    let addr = config.socket_addr();
    tracing::info!(%addr, "Storefront listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;
    Ok(())
}
