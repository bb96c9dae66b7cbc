pub mod analyze;
pub mod dashboard;
pub mod news;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, CorsLayer},
    trace::TraceLayer,
};

use crate::clients::{AiClient, NewsClient};
use crate::data::PriceRepository;
use crate::{AppError, Result};

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn PriceRepository>,
    /// `None` when no completion API key is configured.
    pub ai_client: Option<Arc<dyn AiClient>>,
    /// `None` when no news API key is configured.
    pub news_client: Option<Arc<NewsClient>>,
}

pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/analyze", post(analyze::handler))
        .route("/api/dashboard/analyze", post(analyze::dashboard_handler))
        .route("/api/dashboard", get(dashboard::dashboard))
        .route("/api/records", get(dashboard::records))
        .route("/api/filters", get(dashboard::filters))
        .route("/api/news", get(news::handler))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the single frontend origin.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| AppError::Config(format!("Invalid ALLOWED_ORIGIN: {}", e)))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request()))
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_origin_is_a_config_error() {
        assert!(matches!(
            cors_layer("http://localhost:8080\n"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn accepts_a_plain_origin() {
        assert!(cors_layer("http://localhost:8080").is_ok());
    }
}
