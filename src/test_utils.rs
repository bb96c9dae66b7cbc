//! Fixtures shared by unit and API tests.

use async_trait::async_trait;
use axum::Router;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::api::{create_router, AppState};
use crate::clients::AiClient;
use crate::data::InMemoryRepository;
use crate::types::{ForecastRange, Month, PriceRecord};
use crate::{AppError, Result};

/// Builds a record from observed Jan..May prices, a June forecast and its range.
pub fn record(
    product: &str,
    state: &str,
    current: [Option<f64>; 5],
    june: f64,
    range: (f64, f64),
) -> PriceRecord {
    let current_price_by_month: BTreeMap<Month, Option<f64>> =
        Month::ALL.iter().copied().zip(current).collect();
    let forecast_by_month: BTreeMap<Month, f64> = [(Month::Jun, june)].into_iter().collect();

    PriceRecord {
        product: product.to_string(),
        classification: "EM GRÃOS".to_string(),
        state: state.to_string(),
        current_price_by_month,
        forecast_by_month,
        forecast_range_june: ForecastRange {
            min: range.0,
            max: range.1,
        },
        model_accuracy_percent: 95.0,
    }
}

/// Completion client that answers with a canned reply and records prompts.
pub struct StubAiClient {
    reply: std::result::Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubAiClient {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AiClient for StubAiClient {
    async fn complete(&self, prompt: String) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt);
        self.reply.clone().map_err(AppError::ExternalApi)
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

pub fn setup_test_app(ai_client: Option<Arc<dyn AiClient>>) -> Router {
    let state = Arc::new(AppState {
        repository: Arc::new(InMemoryRepository::sample().expect("sample dataset")),
        ai_client,
        news_client: None,
    });

    create_router().with_state(state)
}
