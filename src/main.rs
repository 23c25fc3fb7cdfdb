use masquerade_api::api::{create_router, AppState};
use masquerade_api::catalog::Catalog;
use masquerade_api::config::Config;
use masquerade_api::services::{generator::GeneratorClient, images::ImageResolver};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = Catalog::load(&config.catalog_path)?;
    tracing::info!(costumes = catalog.len(), path = %config.catalog_path, "Catalog loaded");

    let generator = GeneratorClient::from_config(&config);
    if generator.is_none() {
        tracing::info!("No generator API key set; running fallback-only");
    }
    let images = ImageResolver::from_config(&config);

    let state = AppState::new(catalog, generator, images);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
