mod app;
mod config;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::external::krx::KrxListingSource;
use crate::external::naver::NaverPriceProvider;
use crate::logging::{init_logging, LoggingConfig};
use crate::services::company_directory::CompanyDirectory;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(&LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;

    let client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .user_agent(concat!("stocklens/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    let listing = KrxListingSource::new(client.clone(), config.listing_url.clone());
    let provider = NaverPriceProvider::new(client, config.chart_url.clone());
    tracing::info!("📊 Listing source: {}", config.listing_url);
    tracing::info!("📊 Price provider: {}", config.chart_url);

    let addr = config.bind_addr;
    let state = AppState {
        config: Arc::new(config),
        directory: Arc::new(CompanyDirectory::new(Arc::new(listing))),
        price_provider: Arc::new(provider),
    };
    let app = app::create_app(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Stock lookup service running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
