use agripredict_be::api;
use agripredict_be::clients::{AiClient, NewsClient, TogetherClient};
use agripredict_be::config::Config;
use agripredict_be::data::{InMemoryRepository, PriceRepository};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agripredict_be=debug,tower_http=info".into()),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{}", e))?;

    // Load dataset
    let repository: Arc<dyn PriceRepository> = Arc::new(
        match &config.price_data_path {
            Some(path) => InMemoryRepository::from_path(path),
            None => InMemoryRepository::sample(),
        }
        .map_err(|e| anyhow::anyhow!("{}", e))?,
    );
    tracing::info!("Serving {} price records", repository.all().len());

    // Initialize clients
    let ai_client = config.together_api_key.as_ref().map(|key| {
        Arc::new(TogetherClient::new(key.clone(), &config.together_api_base)) as Arc<dyn AiClient>
    });
    if ai_client.is_none() {
        tracing::warn!("TOGETHER_API_KEY not set; /api/analyze will return 500");
    }
    let news_client = config
        .news_api_key
        .as_ref()
        .map(|key| Arc::new(NewsClient::new(key.clone(), &config.news_api_base)));

    // Create app state
    let app_state = Arc::new(api::AppState {
        repository,
        ai_client,
        news_client,
    });

    // Create router with state
    let cors = api::cors_layer(&config.allowed_origin).map_err(|e| anyhow::anyhow!("{}", e))?;
    let app = api::create_router().layer(cors).with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Server listening on http://{}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
