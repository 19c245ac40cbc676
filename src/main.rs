//! Equipment relay server

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use equipment_relay::{api, config::AppConfig, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("equipment_relay={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting equipment relay v{}", env!("CARGO_PKG_VERSION"));

    if config.upstream.is_complete() {
        tracing::info!("Relaying to {}", config.upstream.url()?);
    } else {
        tracing::warn!(
            "Upstream configuration incomplete; every relay request will fail until API_BASE_URL, API_PATH and API_TOKEN are set"
        );
    }

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let services = Services::with_http(config.upstream.clone());
    let app = api::create_router(AppState::new(config, services));

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
