use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;

use crate::api::AppState;
use crate::clients::ai::prompts::build_market_report_prompt;
use crate::clients::AiClient;
use crate::types::{AnalyzeRequest, AnalyzeResponse, FilterQuery};
use crate::views::display_records;
use crate::{AppError, Result};

pub const MISSING_KEY_MESSAGE: &str = "The AI provider API key is not configured on the server.";

fn ai_client(state: &AppState) -> Result<&Arc<dyn AiClient>> {
    state
        .ai_client
        .as_ref()
        .ok_or_else(|| AppError::Config(MISSING_KEY_MESSAGE.to_string()))
}

async fn run_analysis(client: &dyn AiClient, prompt: String) -> Result<AnalyzeResponse> {
    let start = Instant::now();
    let analysis = client.complete(prompt).await?;

    tracing::info!(
        provider = client.provider_name(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "AI analysis completed"
    );

    Ok(AnalyzeResponse { analysis })
}

/// `POST /api/analyze`: forwards a caller-built prompt.
pub async fn handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<AnalyzeRequest>>,
) -> Result<Json<AnalyzeResponse>> {
    let client = ai_client(&state)?;

    let prompt = body
        .and_then(|Json(request)| request.prompt)
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::Validation("The prompt field is required.".to_string()))?;

    Ok(Json(run_analysis(client.as_ref(), prompt).await?))
}

/// `POST /api/dashboard/analyze`: builds the market report prompt from the
/// records the dashboard shows for the same filter and forwards it.
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Json(filter): Json<FilterQuery>,
) -> Result<Json<AnalyzeResponse>> {
    let client = ai_client(&state)?;

    let records = display_records(
        state.repository.as_ref(),
        filter.product.as_deref(),
        filter.state.as_deref(),
    );
    if records.is_empty() {
        return Err(AppError::Validation(
            "No records are available for analysis.".to_string(),
        ));
    }

    let prompt = build_market_report_prompt(&records);
    Ok(Json(run_analysis(client.as_ref(), prompt).await?))
}
