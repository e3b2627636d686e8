use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use chatbridge::application::services::api_key_is_plausible;
use chatbridge::domain::ModelCatalog;
use chatbridge::infrastructure::llm::GroqClient;
use chatbridge::infrastructure::observability::init_tracing;
use chatbridge::infrastructure::text_processing::CompositeFileLoader;
use chatbridge::presentation::config::DEFAULT_SESSION_SECRET;
use chatbridge::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&settings.logging);

    if !api_key_is_plausible(settings.upstream.api_key.as_deref()) {
        tracing::warn!("Upstream API key missing or invalid; AI endpoints will return 500");
    }
    if settings.session.secret == DEFAULT_SESSION_SECRET {
        tracing::warn!(environment = %environment, "SESSION_SECRET not set, using development default");
    }

    let catalog = Arc::new(ModelCatalog::groq());
    let llm_client = Arc::new(GroqClient::new(&settings.upstream)?);
    let file_loader = Arc::new(CompositeFileLoader::standard());

    let state = AppState::new(llm_client, file_loader, Arc::clone(&catalog), &settings);
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;

    tracing::info!(
        %addr,
        environment = %environment,
        models = catalog.keys().len(),
        upstream = %settings.upstream.api_url,
        "Server initialized"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
