use portfolio_feed::app;
use portfolio_feed::state::{AppConfig, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Log initialized");

    let config = AppConfig::from_env();
    tracing::info!("Using CMS at {}", config.strapi_url);
    if config.strapi_api_token.is_none() {
        tracing::warn!("STRAPI_API_TOKEN is not set. Using anonymous read access.");
    }

    let http_client = portfolio_feed::build_http_client()?;
    let port = config.port;
    let app_state = AppState::new(config, http_client);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Portfolio API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let router = app(app_state);
    axum::serve(listener, router).await?;

    Ok(())
}
