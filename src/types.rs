use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::metrics::RecordMetrics;
use crate::views::Theme;

// Price Types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
}

impl Month {
    /// Chronological order, January through the June forecast month.
    pub const ALL: [Month; 6] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub product: String,
    pub classification: String,
    pub state: String,
    #[serde(default)]
    pub current_price_by_month: BTreeMap<Month, Option<f64>>,
    pub forecast_by_month: BTreeMap<Month, f64>,
    pub forecast_range_june: ForecastRange,
    pub model_accuracy_percent: f64,
}

impl PriceRecord {
    pub fn current_price(&self, month: Month) -> Option<f64> {
        self.current_price_by_month.get(&month).copied().flatten()
    }

    pub fn forecast(&self, month: Month) -> Option<f64> {
        self.forecast_by_month.get(&month).copied()
    }

    /// "PRODUCT (UF)", the label used by charts and prompt summaries.
    pub fn label(&self) -> String {
        format!("{} ({})", self.product, self.state)
    }
}

// Request Types
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub product: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub product: Option<String>,
    pub state: Option<String>,
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    pub product: Option<String>,
}

// Response Types
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FiltersResponse {
    pub products: Vec<String>,
    pub states: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordWithMetrics {
    #[serde(flatten)]
    pub record: PriceRecord,
    pub metrics: RecordMetrics,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub published_at: chrono::DateTime<chrono::Utc>,
    pub published_label: String,
    pub source: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewsResponse {
    pub query: String,
    pub articles: Vec<NewsArticle>,
}
