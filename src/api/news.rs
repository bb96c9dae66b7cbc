use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::AppState;
use crate::types::{NewsQuery, NewsResponse};
use crate::{AppError, Result};

pub async fn handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<NewsResponse>> {
    let client = state
        .news_client
        .as_ref()
        .ok_or_else(|| AppError::Config("The news API key is not configured.".to_string()))?;

    let news = client.search(query.product.as_deref()).await?;

    Ok(Json(news))
}
