use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use shop_api::{
    clock::SystemClock,
    config::Config,
    db::{AccessLayer, shop_store::PgShopStore},
    handlers::AppState,
    routes,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shop_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = PgShopStore::new(AccessLayer::new(config.database_url.clone()));
    let state = AppState::new(Arc::new(store), Arc::new(SystemClock));
    let app = routes::router(state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Shop API listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
