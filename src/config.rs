use url::Url;

use crate::{AppError, Result};

pub const DEFAULT_TOGETHER_API_BASE: &str = "https://api.together.xyz/v1";
pub const DEFAULT_NEWS_API_BASE: &str = "https://newsapi.org/v2";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3001";

/// Runtime settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub together_api_key: Option<String>,
    pub together_api_base: Url,
    pub news_api_key: Option<String>,
    pub news_api_base: Url,
    pub price_data_path: Option<String>,
    pub allowed_origin: String,
    pub bind_address: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            together_api_key: non_empty_var("TOGETHER_API_KEY"),
            together_api_base: url_var("TOGETHER_API_BASE", DEFAULT_TOGETHER_API_BASE)?,
            news_api_key: non_empty_var("NEWS_API_KEY"),
            news_api_base: url_var("NEWS_API_BASE", DEFAULT_NEWS_API_BASE)?,
            price_data_path: non_empty_var("PRICE_DATA_PATH"),
            allowed_origin: non_empty_var("ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            bind_address: non_empty_var("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn url_var(name: &str, default: &str) -> Result<Url> {
    let raw = non_empty_var(name).unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| AppError::Config(format!("{} is not a valid URL: {}", name, e)))
}
