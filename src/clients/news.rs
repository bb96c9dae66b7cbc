use crate::types::{NewsArticle, NewsResponse};
use crate::{AppError, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::info;
use url::Url;

/// Query used when no product is selected.
pub const GENERIC_AGRO_QUERY: &str = "(agronegócio OR agricultura)";
const LANGUAGE: &str = "pt";
const SORT_BY: &str = "publishedAt";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
    source: RawSource,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

pub struct NewsClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl NewsClient {
    pub fn new(api_key: impl Into<String>, base_url: &Url) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.clone(),
        }
    }

    pub fn search_url(&self, query: &str) -> Result<Url> {
        let endpoint = format!("{}/everything", self.base_url.as_str().trim_end_matches('/'));
        Url::parse_with_params(
            &endpoint,
            &[
                ("q", query),
                ("language", LANGUAGE),
                ("sortBy", SORT_BY),
                ("apiKey", self.api_key.as_str()),
            ],
        )
        .map_err(|e| AppError::Config(format!("Invalid news API URL: {}", e)))
    }

    /// Latest articles for a product, or for agribusiness in general.
    pub async fn search(&self, product: Option<&str>) -> Result<NewsResponse> {
        let query = product
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(GENERIC_AGRO_QUERY)
            .to_string();

        info!("Searching news for {}", query);

        let response = self
            .client
            .get(self.search_url(&query)?)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("News API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&error_text)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("News API returned {}", status));
            return Err(AppError::ExternalApi(message));
        }

        let body: EverythingResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse news response: {}", e)))?;

        let articles = body.articles.into_iter().filter_map(to_article).collect();

        Ok(NewsResponse { query, articles })
    }
}

/// Articles lacking a link, an image, a description or a valid timestamp are dropped.
fn to_article(raw: RawArticle) -> Option<NewsArticle> {
    let url = raw.url.filter(|u| !u.is_empty())?;
    let image_url = raw.url_to_image.filter(|u| !u.is_empty())?;
    let description = raw.description.filter(|d| !d.is_empty())?;
    let published_at = DateTime::parse_from_rfc3339(raw.published_at.as_deref()?)
        .ok()?
        .with_timezone(&Utc);

    Some(NewsArticle {
        title: raw.title.unwrap_or_default(),
        description,
        url,
        image_url,
        published_label: published_at.format("%B %-d, %Y").to_string(),
        published_at,
        source: raw.source.name.unwrap_or_default(),
    })
}
