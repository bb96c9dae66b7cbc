use crate::clients::ai::AiClient;
use crate::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

pub const TOGETHER_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free";
const MAX_TOKENS: u32 = 512;
const TEMPERATURE: f64 = 0.7;
pub const EMPTY_COMPLETION_FALLBACK: &str = "Could not get a response from the AI.";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completion client for the Together AI API.
///
/// One request per call: no retries and no timeout beyond reqwest's defaults.
pub struct TogetherClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl TogetherClient {
    pub fn new(api_key: impl Into<String>, base_url: &Url) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: format!("{}/chat/completions", base_url.as_str().trim_end_matches('/')),
        }
    }

    async fn call_api(&self, prompt: &str) -> Result<String> {
        let request = CompletionRequest {
            model: TOGETHER_MODEL,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Together AI request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApi(format!(
                "Together AI returned {}: {}",
                status, error_text
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse Together AI response: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("Together AI returned no completion content");
                EMPTY_COMPLETION_FALLBACK.to_string()
            });

        Ok(content)
    }
}

#[async_trait]
impl AiClient for TogetherClient {
    async fn complete(&self, prompt: String) -> Result<String> {
        tracing::debug!("Sending {} prompt characters to Together AI", prompt.len());
        self.call_api(&prompt).await
    }

    fn provider_name(&self) -> &'static str {
        "together"
    }
}
