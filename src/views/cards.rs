use serde::Serialize;

use crate::format;
use crate::metrics::{Recommendation, RecordMetrics, Sentiment};
use crate::types::PriceRecord;
use crate::views::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl From<Sentiment> for Trend {
    fn from(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Opportunity => Trend::Up,
            Sentiment::Risk => Trend::Down,
            Sentiment::Stable => Trend::Stable,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationCard {
    pub product: String,
    pub classification: String,
    pub state: String,
    pub current_price: String,
    pub forecast_june: String,
    pub trend: Trend,
    pub variation: String,
    pub accuracy: String,
    pub action: Recommendation,
    pub color: &'static str,
    pub message: &'static str,
}

pub fn recommendation_card(record: &PriceRecord, palette: &Palette) -> RecommendationCard {
    let m = RecordMetrics::compute(record);
    let trend = Trend::from(m.sentiment);

    let message = match m.recommendation {
        Recommendation::Buy => "Good buying opportunity ahead of the rise",
        Recommendation::Sell => "Consider selling before the drop",
        Recommendation::Wait => "Stable price, wait for a better moment",
    };

    RecommendationCard {
        product: record.product.clone(),
        classification: record.classification.clone(),
        state: record.state.clone(),
        current_price: format::currency(m.last_observed_price),
        forecast_june: format::currency(m.forecast_june),
        trend,
        variation: format::signed_percent(m.percentage_change),
        accuracy: format::percent(record.model_accuracy_percent),
        action: m.recommendation,
        color: palette.sentiment(m.sentiment),
        message,
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub products_monitored: usize,
    pub average_accuracy: String,
    pub highest_predicted_rise: String,
    pub states_covered: usize,
}

pub fn summary_stats(
    records: &[PriceRecord],
    state_selected: bool,
    total_states: usize,
) -> SummaryStats {
    let average_accuracy = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.model_accuracy_percent).sum::<f64>() / records.len() as f64
    };

    let highest_rise = records
        .iter()
        .map(crate::metrics::percentage_change)
        .fold(None, |best: Option<f64>, change| {
            Some(best.map_or(change, |b| b.max(change)))
        })
        .unwrap_or(0.0);

    SummaryStats {
        products_monitored: records.len(),
        average_accuracy: format::percent(average_accuracy),
        highest_predicted_rise: format::signed_percent(highest_rise),
        states_covered: if state_selected { 1 } else { total_states },
    }
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExecutiveSummary {
    pub rising: usize,
    pub falling: usize,
    pub stable: usize,
}

pub fn executive_summary(records: &[PriceRecord]) -> ExecutiveSummary {
    records
        .iter()
        .fold(ExecutiveSummary::default(), |mut acc, record| {
            match crate::metrics::sentiment(record) {
                Sentiment::Opportunity => acc.rising += 1,
                Sentiment::Risk => acc.falling += 1,
                Sentiment::Stable => acc.stable += 1,
            }
            acc
        })
}
